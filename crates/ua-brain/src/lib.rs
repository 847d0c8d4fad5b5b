//! `ua-brain`: the decision engine of the rust_ua framework.
//!
//! # Per-tick loop
//!
//! ```text
//! Brain::tick(dt, &mut ctx, &mut observer):
//!   ① Targets  — target timer due → refresh_targets on every action.
//!   ② Think    — think timer due OR nothing current:
//!                  current uninterruptable → skip (report.skipped)
//!                  else rescore every action, select, and on change:
//!                    finish(old) → current = new → start(new) → changed event
//!   ③ Execute  — on_update, on_late_update, on_fixed_update × steps
//!                on the current action; succeed()/fail() ends it.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`brain`]    | `Brain<C>` — tick loop, think pass, lifecycle dispatch      |
//! | [`builder`]  | `BrainBuilder<C>`                                           |
//! | [`config`]   | `BrainConfig`                                               |
//! | [`select`]   | `SelectionAlgorithm` and the selection policies             |
//! | [`flat`]     | `FlatActionList` — SoA scoring list                         |
//! | [`observer`] | `BrainObserver`, `ThinkReport`, `EventLog`, `NoopObserver`  |
//! | [`error`]    | `BrainError`, `BrainResult<T>`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ua_brain::{BrainBuilder, NoopObserver};
//!
//! let template = Arc::new(BehaviorTemplate::new("villager").with_action_set(set));
//! let mut brain = BrainBuilder::new(template).build(&world)?;
//! loop {
//!     brain.tick(frame_dt, &mut world, &mut NoopObserver)?;
//! }
//! ```

pub mod brain;
pub mod builder;
pub mod config;
pub mod error;
pub mod flat;
pub mod observer;
pub mod select;

#[cfg(test)]
mod tests;

pub use brain::Brain;
pub use builder::BrainBuilder;
pub use config::BrainConfig;
pub use error::{BrainError, BrainResult};
pub use flat::FlatActionList;
pub use observer::{ActionRef, BrainEvent, BrainObserver, EventLog, NoopObserver, ThinkReport};
pub use select::SelectionAlgorithm;
