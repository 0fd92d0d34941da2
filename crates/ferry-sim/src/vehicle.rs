//! The vehicle agent: one round trip, six steps.

use std::sync::Arc;
use std::thread;

use ferry_core::{AgentRng, Event, Vehicle};
use tracing::trace;

use crate::{EventSink, Shared};

/// One vehicle's thread of control.
pub struct VehicleAgent<S: EventSink> {
    vehicle:        Vehicle,
    shared:         Arc<Shared>,
    sink:           Arc<S>,
    rng:            AgentRng,
    max_arrival_us: u32,
}

impl<S: EventSink> VehicleAgent<S> {
    pub fn new(
        vehicle:        Vehicle,
        shared:         Arc<Shared>,
        sink:           Arc<S>,
        rng:            AgentRng,
        max_arrival_us: u32,
    ) -> Self {
        Self { vehicle, shared, sink, rng, max_arrival_us }
    }

    /// Drive to the origin port, cross once, get off, and report done.
    pub fn run(mut self) {
        let v = self.vehicle;
        let signals = &self.shared.signals;

        self.sink.record(Event::started(&v));
        let delay = self.rng.delay_up_to(self.max_arrival_us);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        self.sink.record(Event::arrived(&v));

        // Queue up, then wait for the ferry to be announced here.
        self.shared.lock().register(v.origin, v.class);
        signals.ferry_arrived(v.origin, v.class).wait();

        // Any permit for our class at our port is ours: same-class vehicles
        // are interchangeable.
        signals.boarding(v.origin, v.class).wait();
        self.sink.record(Event::boarding(&v));
        signals.boarded.post();
        trace!(vehicle = %v, "aboard");

        signals.ferry_ready.wait();

        signals.unboarding(v.destination()).wait();
        self.sink.record(Event::left(&v));
        signals.unboarded.post_n(v.class.units());

        self.shared.lock().complete_trip();
        trace!(vehicle = %v, "done");
    }
}
