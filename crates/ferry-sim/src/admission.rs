//! The loading-order policy.
//!
//! Classes take turns, starting with Heavy at every loading phase:
//!
//! ```text
//! while units < K and anyone waits:
//!   Heavy's turn,    Heavy waiting, units + 3 ≤ K  → admit Heavy,    turn = Standard
//!   Standard's turn, Standard waiting, units < K   → admit Standard, turn = Heavy
//!   Standard waiting, units < K                    → admit Standard, turn unchanged
//!   otherwise                                      → stop
//! ```
//!
//! A Standard vehicle fills the slack whenever Heavy cannot load, so a Heavy
//! that does not fit never holds the ramp.  The policy is a pure function of
//! the waiting counts and `K`.

use ferry_core::VehicleClass;

/// What one loading phase admitted, in admission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadPlan {
    pub order: Vec<VehicleClass>,
    /// Capacity units consumed by `order`.
    pub units: usize,
}

impl LoadPlan {
    /// Number of vehicles admitted.
    #[inline]
    pub fn vehicles(&self) -> usize {
        self.order.len()
    }

    /// Vehicles of `class` admitted.
    pub fn count(&self, class: VehicleClass) -> usize {
        self.order.iter().filter(|&&c| c == class).count()
    }

    fn admit(&mut self, class: VehicleClass, waiting: &mut [usize; 2]) {
        waiting[class.index()] -= 1;
        self.units += class.units();
        self.order.push(class);
    }
}

/// Run the admission policy against a snapshot of waiting counts.
///
/// `waiting` is indexed by [`VehicleClass::index`].  The returned plan never
/// exceeds `capacity` units and never admits more of a class than are
/// waiting.
pub fn plan_load(waiting: [usize; 2], capacity: usize) -> LoadPlan {
    use VehicleClass::{Heavy, Standard};

    let mut waiting = waiting;
    let mut plan = LoadPlan::default();
    let mut turn = Heavy;

    while plan.units < capacity && waiting.iter().any(|&w| w > 0) {
        let heavy_waiting = waiting[Heavy.index()] > 0;
        let standard_waiting = waiting[Standard.index()] > 0;

        if turn == Heavy && heavy_waiting && plan.units + Heavy.units() <= capacity {
            plan.admit(Heavy, &mut waiting);
            turn = Standard;
        } else if turn == Standard && standard_waiting {
            plan.admit(Standard, &mut waiting);
            turn = Heavy;
        } else if standard_waiting {
            plan.admit(Standard, &mut waiting);
        } else {
            break;
        }
    }

    plan
}
