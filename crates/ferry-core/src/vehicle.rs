//! Vehicle classes, ports, and the per-vehicle identity record.

use std::fmt;

use crate::VehicleId;

// ── VehicleClass ──────────────────────────────────────────────────────────────

/// The two kinds of vehicle the ferry carries.
///
/// Capacity is measured in units: a Standard vehicle takes one, a Heavy
/// vehicle takes three.  The log tags them `O` and `N` respectively.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleClass {
    Standard,
    Heavy,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 2] = [VehicleClass::Standard, VehicleClass::Heavy];

    /// Capacity units this class occupies aboard.
    #[inline]
    pub const fn units(self) -> usize {
        match self {
            VehicleClass::Standard => 1,
            VehicleClass::Heavy    => 3,
        }
    }

    /// Single-character log tag.
    #[inline]
    pub const fn tag(self) -> char {
        match self {
            VehicleClass::Standard => 'O',
            VehicleClass::Heavy    => 'N',
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "O" => Some(VehicleClass::Standard),
            "N" => Some(VehicleClass::Heavy),
            _   => None,
        }
    }

    /// Slot in per-class arrays (`[Standard, Heavy]`).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            VehicleClass::Standard => 0,
            VehicleClass::Heavy    => 1,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ── Port ──────────────────────────────────────────────────────────────────────

/// One of the two landings the ferry shuttles between.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port(u8);

impl Port {
    /// Where the ferry starts.
    pub const FIRST: Port = Port(0);
    pub const SECOND: Port = Port(1);
    pub const ALL: [Port; 2] = [Port::FIRST, Port::SECOND];

    /// `None` for anything other than 0 or 1.
    pub fn new(index: u8) -> Option<Self> {
        (index < 2).then_some(Port(index))
    }

    /// The landing across the water.
    #[inline]
    pub const fn other(self) -> Port {
        Port(1 - self.0)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// Everything a vehicle agent knows about itself.
///
/// Owned exclusively by the agent's thread for the duration of one round trip.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:     VehicleId,
    pub class:  VehicleClass,
    pub origin: Port,
}

impl Vehicle {
    pub fn new(id: VehicleId, class: VehicleClass, origin: Port) -> Self {
        Self { id, class, origin }
    }

    /// Where this vehicle gets off.
    #[inline]
    pub fn destination(&self) -> Port {
        self.origin.other()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class.tag(), self.id.0)
    }
}
