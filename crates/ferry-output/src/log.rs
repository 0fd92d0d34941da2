//! `EventLog`: the collaborator every agent records through.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ferry_core::Event;
use ferry_sim::EventSink;
use tracing::warn;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Numbers events and fans them out to every attached [`OutputWriter`].
///
/// Numbering and writing happen under one lock, so line `n` is always
/// written before line `n + 1` and the numbering has no gaps.
///
/// Agents cannot handle write errors, so [`record`][EventSink::record]
/// keeps the first one and carries on counting.  Check
/// [`take_error`][Self::take_error] after the run.
pub struct EventLog {
    inner: Mutex<LogState>,
}

struct LogState {
    seq:      u64,
    writers:  Vec<Box<dyn OutputWriter>>,
    error:    Option<OutputError>,
    finished: bool,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// A log with no writers.  Events are still numbered.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LogState {
                seq:      0,
                writers:  Vec::new(),
                error:    None,
                finished: false,
            }),
        }
    }

    /// Attach another backend.  Every backend sees every event.
    pub fn with_writer(self, writer: impl OutputWriter + 'static) -> Self {
        self.lock().writers.push(Box::new(writer));
        self
    }

    /// Number `event`, write it everywhere, and return its sequence number.
    ///
    /// Every writer is attempted even if an earlier one failed; the first
    /// failure is returned.
    pub fn append(&self, event: &Event) -> OutputResult<u64> {
        let mut state = self.lock();
        state.seq += 1;
        let seq = state.seq;

        let mut first = None;
        for writer in &mut state.writers {
            if let Err(e) = writer.write_event(seq, event) {
                first.get_or_insert(e);
            }
        }
        match first {
            Some(e) => Err(e),
            None => Ok(seq),
        }
    }

    /// Sequence number of the last event appended.
    pub fn lines_written(&self) -> u64 {
        self.lock().seq
    }

    /// Flush and close every writer.  Idempotent.
    pub fn finish(&self) -> OutputResult<()> {
        let mut state = self.lock();
        if state.finished {
            return Ok(());
        }
        state.finished = true;

        let mut first = None;
        for writer in &mut state.writers {
            if let Err(e) = writer.finish() {
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Take the first error stored by [`record`][EventSink::record].
    ///
    /// Returns `None` if every write succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        self.lock().error.take()
    }

    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for EventLog {
    fn record(&self, event: Event) {
        if let Err(e) = self.append(&event) {
            warn!(%event, error = %e, "event log write failed");
            let mut state = self.lock();
            // Keep only the first error.
            if state.error.is_none() {
                state.error = Some(e);
            }
        }
    }
}
