//! The ferry controller.

use std::sync::Arc;
use std::thread;

use ferry_core::{AgentRng, Event, Port};
use tracing::{debug, trace};

use crate::{EventSink, LoadPlan, Shared};

/// Tallies the ferry keeps about its own run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FerryStats {
    /// Crossings completed (every `leaving` line).
    pub trips: usize,
    /// Vehicles carried across, summed over all trips.
    pub vehicles_carried: usize,
    /// Most capacity units aboard on any single leg.
    pub peak_units: usize,
}

/// The single ferry agent.
///
/// Owns its RNG and a handle to the shared state; everything else it learns
/// through the harbor counters and the signal set.
pub struct Ferry<S: EventSink> {
    shared:        Arc<Shared>,
    sink:          Arc<S>,
    rng:           AgentRng,
    capacity:      usize,
    max_travel_us: u32,
    stats:         FerryStats,
}

impl<S: EventSink> Ferry<S> {
    pub fn new(
        shared:        Arc<Shared>,
        sink:          Arc<S>,
        rng:           AgentRng,
        capacity:      usize,
        max_travel_us: u32,
    ) -> Self {
        Self {
            shared,
            sink,
            rng,
            capacity,
            max_travel_us,
            stats: FerryStats::default(),
        }
    }

    /// Shuttle until every vehicle has completed its round trip.
    ///
    /// The first leg always runs, so even an empty run logs one arrival and
    /// one departure before `P: finish`.
    pub fn run(mut self) -> FerryStats {
        self.sink.record(Event::FerryStarted);

        loop {
            self.travel();
            let port = self.shared.lock().port;
            self.sink.record(Event::FerryArrived(port));

            self.unload(port);
            let plan = self.load(port);
            self.depart(port, &plan);

            let mut harbor = self.shared.lock();
            harbor.port = port.other();
            if harbor.is_finished() {
                break;
            }
        }

        self.travel();
        self.sink.record(Event::FerryFinished);
        debug!(trips = self.stats.trips, "ferry finished");
        self.stats
    }

    fn travel(&mut self) {
        let delay = self.rng.delay_up_to(self.max_travel_us);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    /// Release everyone aboard and wait until the deck is physically empty.
    fn unload(&self, port: Port) {
        let (vehicles, units) = self.shared.lock().take_onboard();
        if vehicles == 0 {
            return;
        }
        trace!(%port, vehicles, units, "unloading");

        let signals = &self.shared.signals;
        signals.unboarding(port).post_n(vehicles);
        signals.unboarded.wait_n(units);
    }

    /// Announce arrival, run the admission policy, and wait for every
    /// admitted vehicle to report aboard.
    fn load(&self, port: Port) -> LoadPlan {
        let plan = self.shared.announce_and_admit(self.capacity);
        debug!(%port, admitted = plan.vehicles(), units = plan.units, "loading");

        self.shared.signals.boarded.wait_n(plan.vehicles());
        plan
    }

    fn depart(&mut self, port: Port, plan: &LoadPlan) {
        self.sink.record(Event::FerryLeaving(port));
        self.shared.signals.ferry_ready.post_n(plan.vehicles());

        self.stats.trips += 1;
        self.stats.vehicles_carried += plan.vehicles();
        self.stats.peak_units = self.stats.peak_units.max(plan.units);
    }
}
