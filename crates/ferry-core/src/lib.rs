//! `ferry-core`: foundational types for the ferry simulation.
//!
//! This crate is a dependency of every other `ferry-*` crate.  It has no
//! `ferry-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `VehicleId`                                |
//! | [`vehicle`]     | `VehicleClass`, `Port`, `Vehicle`                     |
//! | [`event`]       | `Event` - every line the event log can carry          |
//! | [`config`]      | `FerryConfig`, argument limits                        |
//! | [`rng`]         | `AgentRng` (per-agent delays and origin ports)        |
//! | [`error`]       | `FerryError`, `FerryResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public value types.  |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FerryConfig;
pub use error::{FerryError, FerryResult};
pub use event::Event;
pub use ids::{AgentId, VehicleId};
pub use rng::AgentRng;
pub use vehicle::{Port, Vehicle, VehicleClass};
