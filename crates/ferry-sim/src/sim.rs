//! The `Sim` launcher: spawn every agent, join every agent.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ferry_core::{AgentId, AgentRng, FerryConfig, Vehicle, VehicleClass, VehicleId};
use tracing::info;

use crate::{EventSink, Ferry, FerryStats, Shared, SimError, SimResult, VehicleAgent};

/// What a completed run reports back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub trips:            usize,
    pub vehicles_carried: usize,
    pub peak_units:       usize,
    /// `true` if no boarding/unboarding permit was left over after the run.
    pub signals_drained:  bool,
}

/// A configured, not-yet-started simulation.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: EventSink> {
    pub config:               FerryConfig,
    pub(crate) sink:          Arc<S>,
    pub(crate) vehicle_stack: usize,
}

impl<S: EventSink> Sim<S> {
    /// Run to completion.
    ///
    /// Spawns the ferry, then every Standard vehicle (`O 1..=O`), then every
    /// Heavy vehicle (`N 1..=N`), each on its own thread with its own RNG.
    /// Returns only after every thread has been joined, so the shared state
    /// and the sink are never torn down under a running agent.  A panic is
    /// reported as [`SimError::AgentPanicked`] once all joins are done.  A
    /// vehicle that panics before posting its `boarded` or `unboarded`
    /// permits leaves the ferry blocked, and then this call does not return.
    ///
    /// A spawn failure aborts the launch: the error is returned immediately
    /// and threads already started are detached.  They can never finish
    /// without the missing agent, so the caller is expected to exit.
    pub fn run(self) -> SimResult<RunSummary> {
        let config = &self.config;
        let shared = Arc::new(Shared::new(config.vehicle_count()));
        info!(
            heavy = config.heavy,
            standard = config.standard,
            capacity = config.capacity,
            seed = config.seed,
            "simulation starting"
        );

        let ferry = Ferry::new(
            Arc::clone(&shared),
            Arc::clone(&self.sink),
            AgentRng::new(config.seed, AgentId::FERRY),
            config.capacity as usize,
            config.max_travel_us,
        );
        let ferry_handle = thread::Builder::new()
            .name("ferry".into())
            .spawn(move || ferry.run())
            .map_err(|source| SimError::Spawn { agent: "ferry".into(), source })?;

        let mut vehicles: Vec<(String, JoinHandle<()>)> =
            Vec::with_capacity(config.vehicle_count());
        let mut next_agent = AgentId::FERRY.0 + 1;

        for (class, count) in [
            (VehicleClass::Standard, config.standard),
            (VehicleClass::Heavy, config.heavy),
        ] {
            for id in 1..=count {
                let mut rng = AgentRng::new(config.seed, AgentId(next_agent));
                next_agent += 1;

                let vehicle = Vehicle::new(VehicleId(id), class, rng.pick_port());
                let name = vehicle.to_string();
                let agent = VehicleAgent::new(
                    vehicle,
                    Arc::clone(&shared),
                    Arc::clone(&self.sink),
                    rng,
                    config.max_arrival_us,
                );

                let handle = thread::Builder::new()
                    .name(name.clone())
                    .stack_size(self.vehicle_stack)
                    .spawn(move || agent.run())
                    .map_err(|source| SimError::Spawn { agent: name.clone(), source })?;
                vehicles.push((name, handle));
            }
        }

        // Join everyone before reporting a panic, so no agent outlives the run.
        let mut panicked = None;
        for (name, handle) in vehicles {
            if handle.join().is_err() {
                panicked.get_or_insert(name);
            }
        }
        let stats: FerryStats = ferry_handle
            .join()
            .map_err(|_| SimError::AgentPanicked("ferry".into()))?;
        if let Some(name) = panicked {
            return Err(SimError::AgentPanicked(name));
        }

        let summary = RunSummary {
            trips:            stats.trips,
            vehicles_carried: stats.vehicles_carried,
            peak_units:       stats.peak_units,
            signals_drained:  shared.signals.is_drained(),
        };
        info!(trips = summary.trips, peak_units = summary.peak_units, "simulation finished");
        Ok(summary)
    }
}
