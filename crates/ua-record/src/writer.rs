//! The `TraceWriter` trait implemented by all recorder backends.

use crate::{EventRow, RecordResult, ThinkRecord};

/// Sink for recorded think passes and lifecycle events.
///
/// Errors are stored by [`RecorderObserver`][crate::RecorderObserver] because
/// observer callbacks have no return value; retrieve them with
/// [`take_error`][crate::RecorderObserver::take_error].
pub trait TraceWriter {
    fn write_think(&mut self, record: &ThinkRecord) -> RecordResult<()>;

    fn write_event(&mut self, row: &EventRow) -> RecordResult<()>;

    /// Flush any buffered output.  Idempotent.
    fn finish(&mut self) -> RecordResult<()>;
}
