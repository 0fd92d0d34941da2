//! The `OutputWriter` trait implemented by all backend writers.

use ferry_core::Event;

use crate::OutputResult;

/// Trait implemented by the text and CSV writers.
///
/// Writers are driven by [`EventLog`](crate::EventLog), which calls them one
/// at a time under its lock and in sequence order.  They never see
/// concurrent calls.
pub trait OutputWriter: Send {
    /// Write one numbered event.
    fn write_event(&mut self, seq: u64, event: &Event) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent - safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
