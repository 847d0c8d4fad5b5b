//! `RecorderObserver<W>`: bridges `BrainObserver` to a `TraceWriter`.

use tracing::warn;

use ua_brain::{ActionRef, BrainObserver, ThinkReport};
use ua_core::{BrainClock, Tick};

use crate::row::{EventKind, EventRow, ThinkRecord, TraceRow};
use crate::writer::TraceWriter;
use crate::{RecordError, RecordResult};

/// A [`BrainObserver`] that records think passes and lifecycle events to any
/// [`TraceWriter`] backend.
///
/// Errors from the writer are stored because observer callbacks have no
/// return value.  Check with [`take_error`][Self::take_error] after running.
pub struct RecorderObserver<W: TraceWriter> {
    writer:     W,
    recording:  bool,
    /// Elapsed seconds of the tick in progress.
    time_secs:  f64,
    last_error: Option<RecordError>,
}

impl<W: TraceWriter> RecorderObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            recording:  true,
            time_secs:  0.0,
            last_error: None,
        }
    }

    /// Start or stop recording.  Callbacks are ignored while stopped.
    pub fn set_recording(&mut self, on: bool) {
        self.recording = on;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<RecordError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Flush the writer.
    pub fn finish(&mut self) -> RecordResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: RecordResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "recorder write failed");
                self.last_error = Some(e);
            }
        }
    }

    fn event(&mut self, row: EventRow) {
        if self.recording {
            let result = self.writer.write_event(&row);
            self.store_err(result);
        }
    }

    fn row(&self, now: Tick, kind: EventKind) -> EventRow {
        EventRow::new(now.0, self.time_secs, kind)
    }

    fn action_row(&self, now: Tick, kind: EventKind, action: ActionRef<'_>) -> EventRow {
        let mut row = self.row(now, kind);
        row.action = Some(action.id.0);
        row.name = Some(action.name.to_owned());
        row.target = action.target.map(|t| t.0);
        row
    }
}

impl<W: TraceWriter> BrainObserver for RecorderObserver<W> {
    fn on_tick_start(&mut self, clock: &BrainClock) {
        self.time_secs = clock.elapsed_secs;
    }

    fn on_targets_refreshed(&mut self, now: Tick) {
        let row = self.row(now, EventKind::TargetsRefreshed);
        self.event(row);
    }

    fn on_think_completed(&mut self, report: &ThinkReport) {
        if !self.recording {
            return;
        }
        let tick = report.frame.0;
        let lines: Vec<TraceRow> = report
            .trace
            .as_ref()
            .map(|t| t.lines().iter().map(|l| TraceRow::from_line(tick, report.time_secs, l)).collect())
            .unwrap_or_default();
        let record = ThinkRecord {
            tick,
            time_secs: report.time_secs,
            skipped:   report.skipped,
            winner:    report.winner.map(|a| a.0),
            target:    report.target.map(|t| t.0),
            score:     report.score,
            changed:   report.changed,
            lines,
        };
        let result = self.writer.write_think(&record);
        self.store_err(result);

        let mut row = EventRow::new(tick, report.time_secs, EventKind::ThinkCompleted);
        row.action = record.winner;
        row.target = record.target;
        row.score = Some(record.score);
        self.event(row);
    }

    fn on_current_action_changed(
        &mut self,
        now:  Tick,
        prev: Option<ActionRef<'_>>,
        next: Option<ActionRef<'_>>,
    ) {
        let mut row = self.row(now, EventKind::CurrentActionChanged);
        row.previous = prev.map(|a| a.id.0);
        if let Some(next) = next {
            row.action = Some(next.id.0);
            row.name = Some(next.name.to_owned());
            row.target = next.target.map(|t| t.0);
        }
        self.event(row);
    }

    fn on_action_succeeded(&mut self, now: Tick, action: ActionRef<'_>) {
        let row = self.action_row(now, EventKind::ActionSucceeded, action);
        self.event(row);
    }

    fn on_action_failed(&mut self, now: Tick, action: ActionRef<'_>) {
        let row = self.action_row(now, EventKind::ActionFailed, action);
        self.event(row);
    }

    fn on_behavior_list_modified(&mut self, now: Tick) {
        let row = self.row(now, EventKind::BehaviorListModified);
        self.event(row);
    }
}
