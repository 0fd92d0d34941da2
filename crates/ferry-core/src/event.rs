//! The event vocabulary shared by the agents, the log writers, and the audit.
//!
//! Each variant renders to exactly one log message (without the sequence
//! prefix, which the log adds):
//!
//! ```text
//! O 1: started          P: started
//! O 1: arrived to 0     P: arrived to 0
//! O 1: boarding         P: leaving 0
//! O 1: leaving in 1     P: finish
//! ```
//!
//! `FromStr` is the inverse of `Display`, so a log written by one run can be
//! replayed by the audit in `ferry-output` without a second grammar.

use std::fmt;
use std::str::FromStr;

use crate::{FerryError, Port, Vehicle, VehicleClass, VehicleId};

/// One loggable happening.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
    VehicleStarted  { class: VehicleClass, id: VehicleId },
    VehicleArrived  { class: VehicleClass, id: VehicleId, port: Port },
    VehicleBoarding { class: VehicleClass, id: VehicleId },
    VehicleLeft     { class: VehicleClass, id: VehicleId, port: Port },
    FerryStarted,
    FerryArrived(Port),
    FerryLeaving(Port),
    FerryFinished,
}

impl Event {
    pub fn started(v: &Vehicle) -> Self {
        Event::VehicleStarted { class: v.class, id: v.id }
    }

    pub fn arrived(v: &Vehicle) -> Self {
        Event::VehicleArrived { class: v.class, id: v.id, port: v.origin }
    }

    pub fn boarding(v: &Vehicle) -> Self {
        Event::VehicleBoarding { class: v.class, id: v.id }
    }

    pub fn left(v: &Vehicle) -> Self {
        Event::VehicleLeft { class: v.class, id: v.id, port: v.destination() }
    }

    /// The vehicle this event belongs to, or `None` for ferry events.
    pub fn vehicle(&self) -> Option<(VehicleClass, VehicleId)> {
        match *self {
            Event::VehicleStarted { class, id }
            | Event::VehicleArrived { class, id, .. }
            | Event::VehicleBoarding { class, id }
            | Event::VehicleLeft { class, id, .. } => Some((class, id)),
            _ => None,
        }
    }

    /// The port named in the message, if any.
    pub fn port(&self) -> Option<Port> {
        match *self {
            Event::VehicleArrived { port, .. }
            | Event::VehicleLeft { port, .. }
            | Event::FerryArrived(port)
            | Event::FerryLeaving(port) => Some(port),
            _ => None,
        }
    }

    /// Short verb used by structured writers (`started`, `arrived`, ...).
    pub fn action(&self) -> &'static str {
        match self {
            Event::VehicleStarted { .. } | Event::FerryStarted => "started",
            Event::VehicleArrived { .. } | Event::FerryArrived(_) => "arrived",
            Event::VehicleBoarding { .. } => "boarding",
            Event::VehicleLeft { .. } | Event::FerryLeaving(_) => "leaving",
            Event::FerryFinished => "finish",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::VehicleStarted { class, id } => write!(f, "{} {}: started", class.tag(), id.0),
            Event::VehicleArrived { class, id, port } => {
                write!(f, "{} {}: arrived to {port}", class.tag(), id.0)
            }
            Event::VehicleBoarding { class, id } => write!(f, "{} {}: boarding", class.tag(), id.0),
            Event::VehicleLeft { class, id, port } => {
                write!(f, "{} {}: leaving in {port}", class.tag(), id.0)
            }
            Event::FerryStarted     => write!(f, "P: started"),
            Event::FerryArrived(p)  => write!(f, "P: arrived to {p}"),
            Event::FerryLeaving(p)  => write!(f, "P: leaving {p}"),
            Event::FerryFinished    => write!(f, "P: finish"),
        }
    }
}

impl FromStr for Event {
    type Err = FerryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (actor, what) = s
            .split_once(':')
            .ok_or_else(|| FerryError::Parse(format!("missing ':' in {s:?}")))?;
        let actor: Vec<&str> = actor.split_whitespace().collect();
        let what: Vec<&str> = what.split_whitespace().collect();

        match actor.as_slice() {
            ["P"] => match what.as_slice() {
                ["started"]               => Ok(Event::FerryStarted),
                ["finish"]                => Ok(Event::FerryFinished),
                ["arrived", "to", port]   => Ok(Event::FerryArrived(parse_port(port)?)),
                ["leaving", port]         => Ok(Event::FerryLeaving(parse_port(port)?)),
                _ => Err(FerryError::Parse(format!("invalid ferry event {:?}", what.join(" ")))),
            },
            [tag, id] => {
                let class = VehicleClass::from_tag(tag)
                    .ok_or_else(|| FerryError::Parse(format!("invalid actor {tag:?}")))?;
                let id = id
                    .parse::<u32>()
                    .map(VehicleId)
                    .map_err(|_| FerryError::Parse(format!("invalid vehicle id {id:?}")))?;
                match what.as_slice() {
                    ["started"]                   => Ok(Event::VehicleStarted { class, id }),
                    ["boarding"]                  => Ok(Event::VehicleBoarding { class, id }),
                    ["arrived", "to", port]       => {
                        Ok(Event::VehicleArrived { class, id, port: parse_port(port)? })
                    }
                    ["leaving", "in", port]       => {
                        Ok(Event::VehicleLeft { class, id, port: parse_port(port)? })
                    }
                    _ => Err(FerryError::Parse(format!("invalid event {:?}", what.join(" ")))),
                }
            }
            _ => Err(FerryError::Parse(format!("invalid actor {:?}", actor.join(" ")))),
        }
    }
}

fn parse_port(s: &str) -> Result<Port, FerryError> {
    s.parse::<u8>()
        .ok()
        .and_then(Port::new)
        .ok_or_else(|| FerryError::Parse(format!("invalid port {s:?}")))
}
