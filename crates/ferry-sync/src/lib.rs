//! `ferry-sync`: event-signaling primitives for the ferry simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`semaphore`]   | `Semaphore` - counting permits over `Mutex` + `Condvar`   |
//! | [`signals`]     | `SignalSet` - every rendezvous signal, indexed by port/class |
//!
//! Signals carry no data.  All shared counters live in the simulation's
//! lock-protected state; a signal only says "one more of these happened".

pub mod semaphore;
pub mod signals;


pub use semaphore::Semaphore;
pub use signals::SignalSet;
