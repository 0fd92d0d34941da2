//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use ferry_core::FerryConfig;

use crate::{EventSink, Sim, SimResult};

/// Default stack for vehicle threads.  Agents only hold a few handles and
/// format short messages; thousands of them should not reserve megabytes each.
const DEFAULT_VEHICLE_STACK: usize = 128 * 1024;

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`FerryConfig`] - vehicle counts, capacity, delay bounds, seed
/// - `Arc<S: EventSink>` - where events go; keep a clone to inspect it after
///   the run
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default   |
/// |----------------------------|-----------|
/// | `.vehicle_stack_size(b)`   | 128 KiB   |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config, Arc::clone(&log)).build()?;
/// let summary = sim.run()?;
/// ```
pub struct SimBuilder<S: EventSink> {
    config:     FerryConfig,
    sink:       Arc<S>,
    stack_size: Option<usize>,
}

impl<S: EventSink> SimBuilder<S> {
    /// Create a builder with all required inputs.
    pub fn new(config: FerryConfig, sink: Arc<S>) -> Self {
        Self {
            config,
            sink,
            stack_size: None,
        }
    }

    /// Override the stack reserved for each vehicle thread.
    pub fn vehicle_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate()?;

        Ok(Sim {
            config:        self.config,
            sink:          self.sink,
            vehicle_stack: self.stack_size.unwrap_or(DEFAULT_VEHICLE_STACK),
        })
    }
}
