//! `ua-core`: foundational types for the `rust_ua` utility-AI framework.
//!
//! This crate is a dependency of every other `ua-*` crate.  It intentionally
//! has no `ua-*` dependencies and minimal external ones (only `thiserror` and
//! `uuid`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ActionId`, `ActionSetId`, `TargetId`                 |
//! | [`identity`]    | `Guid`, `Identity` (name + write-once guid)           |
//! | [`curve`]       | `ResponseCurve` and its text form                     |
//! | [`time`]        | `Tick`, `BrainClock`, `Timer`                         |
//! | [`error`]       | `UaError`, `UaResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public config types. |

pub mod curve;
pub mod error;
pub mod identity;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use curve::ResponseCurve;
pub use error::{UaError, UaResult};
pub use identity::{Guid, Identity};
pub use ids::{ActionId, ActionSetId, TargetId};
pub use time::{BrainClock, Tick, Timer};
