//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `think_trace.csv`: one row per trace line, or one `winner` row per
//!   think pass when the brain is not tracing
//! - `brain_events.csv`: one row per lifecycle event

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{EventRow, RecordResult, ThinkRecord};

pub const TRACE_FILE: &str = "think_trace.csv";
pub const EVENTS_FILE: &str = "brain_events.csv";

/// Writes recorder output to two CSV files.
pub struct CsvWriter {
    trace:    Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> RecordResult<Self> {
        let mut trace = Writer::from_path(dir.join(TRACE_FILE))?;
        trace.write_record(["tick", "time_secs", "depth", "kind", "subject", "score", "note"])?;

        let mut events = Writer::from_path(dir.join(EVENTS_FILE))?;
        events.write_record([
            "tick", "time_secs", "event", "action", "name", "previous", "target", "score",
        ])?;

        Ok(Self { trace, events, finished: false })
    }
}

impl TraceWriter for CsvWriter {
    fn write_think(&mut self, record: &ThinkRecord) -> RecordResult<()> {
        if record.lines.is_empty() {
            let note = if record.skipped { "uninterruptable" } else { "" };
            self.trace.write_record(&[
                record.tick.to_string(),
                format!("{:.3}", record.time_secs),
                "0".to_owned(),
                "winner".to_owned(),
                opt(record.winner),
                format!("{:.4}", record.score),
                note.to_owned(),
            ])?;
            return Ok(());
        }
        for line in &record.lines {
            self.trace.write_record(&[
                line.tick.to_string(),
                format!("{:.3}", line.time_secs),
                line.depth.to_string(),
                line.kind.as_str().to_owned(),
                line.subject.clone(),
                line.score.map(|s| format!("{s:.4}")).unwrap_or_default(),
                line.note.unwrap_or_default().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> RecordResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.time_secs),
            row.kind.as_str().to_owned(),
            opt(row.action),
            row.name.clone().unwrap_or_default(),
            opt(row.previous),
            opt(row.target),
            row.score.map(|s| format!("{s:.4}")).unwrap_or_default(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> RecordResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
