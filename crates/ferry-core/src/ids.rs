//! Identifier newtypes.
//!
//! A vehicle is named by its class tag plus a per-class number (`N 3`), while
//! the RNG seeding needs one flat index over every agent.  Keeping the two in
//! separate types stops one from being passed where the other is meant.

use std::fmt;

/// Declares a `u32` identifier newtype.  `Display` prints the bare number,
/// which is how ids appear in the event log.
macro_rules! id_newtype {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype! {
    /// Flat index over every concurrent agent in a run.  The ferry is agent 0;
    /// vehicles follow in spawn order.  Only used to seed per-agent RNGs.
    pub struct AgentId;
}

id_newtype! {
    /// Per-class vehicle number as it appears in the log.  Starts at 1 within
    /// each class, so `N 1` and `O 1` are different vehicles.
    pub struct VehicleId;
}

impl AgentId {
    /// The ferry always takes the first slot.
    pub const FERRY: AgentId = AgentId(0);
}
