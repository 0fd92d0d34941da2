//! The event sink: where agents report what they did.

use ferry_core::Event;

/// Receives every loggable event from every agent.
///
/// `record` is called concurrently from the ferry and all vehicle threads.
/// Implementations serialize internally and must assign events an order
/// consistent with the order of the calls; the protocol's happens-before
/// edges (a vehicle logs `boarding` before it posts `boarded`, the ferry logs
/// `leaving` only after collecting every `boarded`) then carry over to the log.
///
/// There is no return value: an agent cannot do anything useful with a write
/// failure mid-protocol.  Sinks that can fail store the error for the caller
/// to inspect after the run.
pub trait EventSink: Send + Sync + 'static {
    fn record(&self, event: Event);
}

/// An [`EventSink`] that drops everything.  Useful for benchmarks and for
/// exercising the protocol without output.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: Event) {}
}
