//! `ua-behavior`: considerations, actions, and behavior templates.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                          |
//! |------------------|-------------------------------------------------------------------|
//! | [`context`]      | `AgentContext`, `HasBlackboard` — what the host world provides    |
//! | [`consideration`]| `Consideration` trait, `ConsiderationSpec`, runtime instance, built-ins |
//! | [`action`]       | `ActionBehavior` trait, `ActionSpec`, `ActionControl`, `NoopAction` |
//! | [`targets`]      | `TargetList` — parallel candidate/score arrays with momentum pick |
//! | [`scoring`]      | compensation math and `RuntimeAction::compute_score`              |
//! | [`trace`]        | `ScoreTrace` — depth-indented per-think score lines               |
//! | [`template`]     | immutable `BehaviorTemplate` → `ActionSetTemplate` → `ActionTemplate` |
//! | [`runtime`]      | `RuntimeBehavior` — the per-agent arena cloned from a template    |
//! | [`blackboard`]   | typed key/value store and its definition                          |
//! | [`change`]       | `BlackboardChange` and scheduled `BlackboardChanger`              |
//! | [`loader`]       | CSV template loading through a `TypeRegistry`                     |
//! | [`error`]        | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Design notes
//!
//! A template is built once and shared (`Arc`) between every agent that uses
//! it.  Each brain turns it into a private [`RuntimeBehavior`]: every action
//! and every non-shared consideration is cloned into an arena indexed by
//! `ActionId`, so agents never share mutable scoring state.
//!
//! Concrete actions and considerations are user types implementing
//! [`ActionBehavior`] and [`Consideration`].  Both traits are generic over the
//! host context `C`; the framework only depends on the capability.

pub mod action;
pub mod blackboard;
pub mod change;
pub mod consideration;
pub mod context;
pub mod error;
pub mod loader;
pub mod runtime;
pub mod scoring;
pub mod targets;
pub mod template;
pub mod trace;


pub use action::{ActionBehavior, ActionControl, ActionOutcome, ActionSpec, NoopAction};
pub use blackboard::{Blackboard, BlackboardDefinition, BlackboardValue, KeyDefinition, KeyKind};
pub use change::{BlackboardChange, BlackboardChanger, ChangeMode, ChangeSchedule};
pub use consideration::{
    BlackboardConsideration, Consideration, ConsiderationInstance, ConsiderationSpec,
    ConstantConsideration, FnConsideration, RuntimeConsideration,
};
pub use context::{AgentContext, HasBlackboard};
pub use error::{BehaviorError, BehaviorResult};
pub use loader::{TypeRegistry, load_template_csv, load_template_reader};
pub use runtime::{RuntimeAction, RuntimeActionSet, RuntimeBehavior};
pub use scoring::{MOMENTUM_BONUS, SCORE_EPSILON, compensate, compensation_factor, normalize};
pub use targets::TargetList;
pub use template::{ActionSetTemplate, ActionTemplate, BehaviorTemplate, ConsiderationTemplate};
pub use trace::{ScoreTrace, TraceKind, TraceLine};
