//! The fixed set of rendezvous signals between the ferry and the vehicles.
//!
//! | Signal                       | Posted by | Consumed by | Meaning                                  |
//! |------------------------------|-----------|-------------|------------------------------------------|
//! | `ferry_arrived[port][class]` | ferry     | vehicle     | ferry is at your port, go queue to board |
//! | `boarding[port][class]`      | ferry     | vehicle     | one vehicle of this class may board      |
//! | `boarded`                    | vehicle   | ferry       | I am aboard                              |
//! | `ferry_ready`                | ferry     | vehicle     | departing, you are riding                |
//! | `unboarding[port]`           | ferry     | vehicle     | you may disembark here                   |
//! | `unboarded`                  | vehicle   | ferry       | one capacity unit has left the deck      |
//!
//! All signals start with zero permits.  Within a class, vehicles are
//! interchangeable: whichever blocked vehicle takes a `boarding` permit is the
//! one that boards.  `ferry_arrived` is split by class for the same reason: a
//! vehicle that queues after an announcement may take an announced permit,
//! but only one meant for its own class, so a vehicle of the other class is
//! never left without one.

use ferry_core::{Port, VehicleClass};

use crate::Semaphore;

/// Every signal used by the protocol.  Shared by reference (`Arc`) between all
/// agents for the lifetime of a run.
#[derive(Default)]
pub struct SignalSet {
    ferry_arrived: [[Semaphore; 2]; 2],
    boarding:      [[Semaphore; 2]; 2],
    /// Vehicle → ferry: one per vehicle that finished boarding.
    pub boarded:     Semaphore,
    /// Ferry → vehicle: one per vehicle loaded on the departing leg.
    pub ferry_ready: Semaphore,
    unboarding:    [Semaphore; 2],
    /// Vehicle → ferry: one per capacity unit that left the deck.
    pub unboarded:   Semaphore,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ferry_arrived(&self, port: Port, class: VehicleClass) -> &Semaphore {
        &self.ferry_arrived[port.index()][class.index()]
    }

    #[inline]
    pub fn boarding(&self, port: Port, class: VehicleClass) -> &Semaphore {
        &self.boarding[port.index()][class.index()]
    }

    #[inline]
    pub fn unboarding(&self, port: Port) -> &Semaphore {
        &self.unboarding[port.index()]
    }

    /// `true` when no signal holds a pending permit.
    ///
    /// After a clean run every post has been matched by a wait, except
    /// `ferry_arrived`, which may legitimately keep surplus permits for
    /// vehicles that were announced more than once.
    pub fn is_drained(&self) -> bool {
        let boarding_clear = Port::ALL.iter().all(|&p| {
            VehicleClass::ALL
                .iter()
                .all(|&c| self.boarding(p, c).available() == 0)
        });
        let unboarding_clear = Port::ALL
            .iter()
            .all(|&p| self.unboarding(p).available() == 0);

        boarding_clear
            && unboarding_clear
            && self.boarded.available() == 0
            && self.ferry_ready.available() == 0
            && self.unboarded.available() == 0
    }
}
