//! `ua-record`: think-trace and lifecycle-event recorder for the rust_ua
//! framework.
//!
//! | Writer         | Output                                                   |
//! |----------------|----------------------------------------------------------|
//! | `MemoryWriter` | bounded in-memory history of think passes and events     |
//! | `CsvWriter`    | `think_trace.csv`, `brain_events.csv`                    |
//!
//! Both implement [`TraceWriter`] and are driven by [`RecorderObserver`],
//! which implements `ua_brain::BrainObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ua_record::{CsvWriter, RecorderObserver};
//!
//! let mut rec = RecorderObserver::new(CsvWriter::new(Path::new("./out"))?);
//! for _ in 0..frames {
//!     brain.tick(dt, &mut world, &mut rec)?;
//! }
//! rec.finish()?;
//! if let Some(e) = rec.take_error() { eprintln!("record error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{RecordError, RecordResult};
pub use memory::MemoryWriter;
pub use observer::RecorderObserver;
pub use row::{EventKind, EventRow, ThinkRecord, TraceRow};
pub use writer::TraceWriter;
