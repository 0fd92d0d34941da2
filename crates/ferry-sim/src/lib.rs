//! `ferry-sim`: the synchronization protocol between one ferry and many
//! vehicles.
//!
//! # One leg of the ferry loop
//!
//! ```text
//! loop:
//!   ① Travel     - sleep up to TP µs, log "P: arrived to <port>".
//!   ② Unload     - post unboarding[port] once per vehicle aboard,
//!                  then collect one `unboarded` permit per capacity unit.
//!   ③ Announce   - post ferry_arrived[port][class] once per waiting vehicle.
//!   ④ Load       - admission policy picks classes up to capacity K and
//!                  posts boarding[port][class]; collect one `boarded` each.
//!   ⑤ Depart     - log "P: leaving <port>", post ferry_ready per rider,
//!                  switch port.
//!   until no vehicle remains and the deck is empty
//! final leg, log "P: finish"
//! ```
//!
//! Steps ③ and ④ share one critical section ([`Shared::announce_and_admit`]),
//! so admission runs on exactly the counts step ③ announced.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`state`]     | `Harbor` (lock-protected counters), `Shared`               |
//! | [`admission`] | `plan_load`, `LoadPlan` - the turn-alternating policy      |
//! | [`ferry`]     | `Ferry` controller, `FerryStats`                           |
//! | [`vehicle`]   | `VehicleAgent` lifecycle                                   |
//! | [`sink`]      | `EventSink` trait, `NoopSink`                              |
//! | [`builder`]   | `SimBuilder`                                               |
//! | [`sim`]       | `Sim` launcher, `RunSummary`                               |
//! | [`error`]     | `SimError`, `SimResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ferry_sim::{NoopSink, SimBuilder};
//!
//! let summary = SimBuilder::new(config, Arc::new(NoopSink)).build()?.run()?;
//! println!("{} trips", summary.trips);
//! ```

pub mod admission;
pub mod builder;
pub mod error;
pub mod ferry;
pub mod sim;
pub mod sink;
pub mod state;
pub mod vehicle;


pub use admission::{LoadPlan, plan_load};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use ferry::{Ferry, FerryStats};
pub use sim::{RunSummary, Sim};
pub use sink::{EventSink, NoopSink};
pub use state::{Harbor, Shared};
pub use vehicle::VehicleAgent;
