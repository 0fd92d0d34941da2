//! Shared, lock-protected simulation state.
//!
//! Every read-modify-write of the counters below happens while holding the
//! single `Shared` lock, and the lock is never held across a blocking wait on
//! a signal.  Invariants that hold whenever the lock is free:
//!
//! - `onboard_units ≤ K`
//! - `onboard_vehicles == 0` exactly when `onboard_units == 0`
//! - `remaining` only decreases; the run is over once it and the deck are empty

use std::sync::{Mutex, MutexGuard, PoisonError};

use ferry_core::{Port, VehicleClass};
use ferry_sync::SignalSet;

use crate::{LoadPlan, plan_load};

// ── Harbor ────────────────────────────────────────────────────────────────────

/// Counters shared by the ferry and every vehicle.
#[derive(Debug)]
pub struct Harbor {
    /// Vehicles waiting to board, `[port][class]`.
    waiting: [[usize; 2]; 2],
    /// Port the ferry is at or heading to.  Written only by the ferry.
    pub port: Port,
    /// Vehicles aboard.  Decides how many `unboarding` permits to post.
    pub onboard_vehicles: usize,
    /// Capacity units aboard.  Decides how many `unboarded` permits to collect.
    pub onboard_units: usize,
    /// Vehicles that have not yet completed their round trip.
    pub remaining: usize,
}

impl Harbor {
    pub fn new(vehicles: usize) -> Self {
        Self {
            waiting:          [[0; 2]; 2],
            port:             Port::FIRST,
            onboard_vehicles: 0,
            onboard_units:    0,
            remaining:        vehicles,
        }
    }

    #[inline]
    pub fn waiting(&self, port: Port, class: VehicleClass) -> usize {
        self.waiting[port.index()][class.index()]
    }

    /// Both classes combined.
    #[inline]
    pub fn waiting_at(&self, port: Port) -> usize {
        self.waiting[port.index()].iter().sum()
    }

    /// A vehicle of `class` joins the queue at `port`.
    pub fn register(&mut self, port: Port, class: VehicleClass) {
        self.waiting[port.index()][class.index()] += 1;
    }

    /// Empty the deck, returning `(vehicles, units)` that were aboard.
    pub fn take_onboard(&mut self) -> (usize, usize) {
        let vehicles = std::mem::take(&mut self.onboard_vehicles);
        let units = std::mem::take(&mut self.onboard_units);
        (vehicles, units)
    }

    /// Run the admission policy at the current port and commit the result:
    /// each admitted vehicle leaves the waiting count and joins the deck.
    pub fn admit(&mut self, capacity: usize) -> LoadPlan {
        let queue = &mut self.waiting[self.port.index()];
        let plan = plan_load(*queue, capacity.saturating_sub(self.onboard_units));
        for class in VehicleClass::ALL {
            queue[class.index()] -= plan.count(class);
        }
        self.onboard_vehicles += plan.vehicles();
        self.onboard_units += plan.units;
        plan
    }

    /// A vehicle finished its round trip.
    pub fn complete_trip(&mut self) {
        debug_assert!(self.remaining > 0, "more vehicles finished than started");
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// The ferry's stop condition.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0 && self.onboard_units == 0
    }
}

// ── Shared ────────────────────────────────────────────────────────────────────

/// Everything the agents share for the lifetime of a run: the harbor
/// counters behind their lock, and the signal set.
pub struct Shared {
    harbor:      Mutex<Harbor>,
    pub signals: SignalSet,
}

impl Shared {
    pub fn new(vehicles: usize) -> Self {
        Self {
            harbor:  Mutex::new(Harbor::new(vehicles)),
            signals: SignalSet::new(),
        }
    }

    /// The ferry's arrival announcement and admission, as one critical
    /// section at the ferry's current port.
    ///
    /// Posts `ferry_arrived[port][class]` once per vehicle of that class
    /// waiting here, runs the admission policy against the same counts, and
    /// posts one `boarding[port][class]` per admitted vehicle.  A vehicle that
    /// registers after this returns may take an announced permit, but only
    /// one of its own class.
    pub fn announce_and_admit(&self, capacity: usize) -> LoadPlan {
        let mut harbor = self.lock();
        let port = harbor.port;
        for class in VehicleClass::ALL {
            self.signals
                .ferry_arrived(port, class)
                .post_n(harbor.waiting(port, class));
        }

        let plan = harbor.admit(capacity);
        for &class in &plan.order {
            self.signals.boarding(port, class).post();
        }
        plan
    }

    /// Enter the critical section.
    pub fn lock(&self) -> MutexGuard<'_, Harbor> {
        // A panicking agent is reported at join time; the counters it leaves
        // behind are still the best view of the run.
        self.harbor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
