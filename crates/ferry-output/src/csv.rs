//! CSV trace backend.
//!
//! Columns: `seq,actor,id,action,port`.  Meant for loading a run into a
//! spreadsheet or dataframe; the text log stays the canonical record.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use ferry_core::Event;

use crate::writer::OutputWriter;
use crate::{OutputResult, TraceRow};

/// Writes one [`TraceRow`] per event.
pub struct CsvWriter {
    rows:     Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the trace file at `path`.  The header row is written
    /// with the first record.
    pub fn new(path: &Path) -> OutputResult<Self> {
        Ok(Self {
            rows:     Writer::from_path(path)?,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, seq: u64, event: &Event) -> OutputResult<()> {
        self.rows.serialize(TraceRow::new(seq, event))?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
