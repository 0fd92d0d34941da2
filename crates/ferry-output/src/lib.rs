//! `ferry-output`: the event log and everything that reads or writes it.
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`log`]     | `EventLog` - sequence counter + writers behind one lock     |
//! | [`writer`]  | `OutputWriter` trait                                        |
//! | [`text`]    | `TextWriter` - `"<seq>: <message>"` lines                   |
//! | [`csv`]     | `CsvWriter` - structured trace, one `TraceRow` per event    |
//! | [`row`]     | `TraceRow`                                                  |
//! | [`audit`]   | `check` - replay a text log and report the first violation |
//! | [`error`]   | `OutputError`, `OutputResult<T>`                            |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ferry_output::{EventLog, TextWriter};
//!
//! let log = Arc::new(EventLog::new().with_writer(TextWriter::create(path)?));
//! SimBuilder::new(config, Arc::clone(&log)).build()?.run()?;
//! log.finish()?;
//! ```

pub mod audit;
pub mod csv;
pub mod error;
pub mod log;
pub mod row;
pub mod text;
pub mod writer;

#[cfg(test)]
mod tests;

pub use audit::{AuditReport, Expect, Violation, check};
pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use log::EventLog;
pub use row::TraceRow;
pub use text::TextWriter;
pub use writer::OutputWriter;
