//! The `ActionBehavior` trait and per-action configuration.

use ua_core::{ActionId, TargetId, UaError, UaResult};

use crate::TargetList;

// ── ActionSpec ────────────────────────────────────────────────────────────────

/// Static configuration of one action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionSpec {
    /// Higher priority actions may interrupt lower ones under the
    /// priority-gated selection policy.
    pub priority:         i32,
    /// `false` locks the action in once selected until it succeeds or fails.
    pub interruptable:    bool,
    /// Final score multiplier, in `[0, 10]`.
    pub weight:           f32,
    /// Target lists refuse candidates past this count.
    pub max_target_count: usize,
    /// Apply the momentum bonus to the previously chosen target.
    pub use_momentum:     bool,
}

impl Default for ActionSpec {
    fn default() -> Self {
        Self {
            priority:         0,
            interruptable:    true,
            weight:           1.0,
            max_target_count: 5,
            use_momentum:     true,
        }
    }
}

impl ActionSpec {
    pub const MAX_WEIGHT: f32 = 10.0;

    /// Fail with [`UaError::InvalidWeight`] unless `weight` is in `[0, 10]`.
    pub fn validate(&self, name: &str) -> UaResult<()> {
        if !(0.0..=Self::MAX_WEIGHT).contains(&self.weight) {
            return Err(UaError::InvalidWeight { name: name.to_owned(), weight: self.weight });
        }
        Ok(())
    }
}

// ── ActionControl ─────────────────────────────────────────────────────────────

/// How an action ended on its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Succeeded,
    Failed,
}

/// Handle passed to the running hooks of the current action.
///
/// Calling [`succeed`](Self::succeed) or [`fail`](Self::fail) ends the action:
/// the brain finishes it, clears its current action, and thinks again on the
/// next tick.  The first call wins; later calls are ignored.
#[derive(Debug)]
pub struct ActionControl {
    action:  ActionId,
    target:  Option<TargetId>,
    outcome: Option<ActionOutcome>,
}

impl ActionControl {
    pub fn new(action: ActionId, target: Option<TargetId>) -> Self {
        Self { action, target, outcome: None }
    }

    pub fn action(&self) -> ActionId {
        self.action
    }

    /// The target chosen by the most recent scoring pass, if any.
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn succeed(&mut self) {
        self.outcome.get_or_insert(ActionOutcome::Succeeded);
    }

    pub fn fail(&mut self) {
        self.outcome.get_or_insert(ActionOutcome::Failed);
    }

    pub fn outcome(&self) -> Option<ActionOutcome> {
        self.outcome
    }
}

// ── ActionBehavior trait ──────────────────────────────────────────────────────

/// What an action does once selected, and where it looks for targets.
///
/// Implementations are cloned into every brain built from a template, so
/// per-agent state can live in `self`.  Every hook except
/// [`refresh_targets`](Self::refresh_targets) defaults to a no-op.
pub trait ActionBehavior<C>: ActionClone<C> + Send + Sync {
    /// Rebuild the candidate list.  Called on the target-refresh cadence,
    /// whether or not the action is current.  Actions without targeted
    /// considerations usually leave `targets` alone.
    fn refresh_targets(&mut self, ctx: &C, targets: &mut TargetList);

    /// Called once when the owning brain initializes its runtime copy.
    fn on_initialized(&mut self, _ctx: &C) {}

    /// The action just became current.
    fn on_start(&mut self, _ctx: &mut C, _ctl: &mut ActionControl) {}

    /// Once per tick while current.
    fn on_update(&mut self, _ctx: &mut C, _dt: f32, _ctl: &mut ActionControl) {}

    /// Once per tick while current, after every `on_update`.
    fn on_late_update(&mut self, _ctx: &mut C, _dt: f32, _ctl: &mut ActionControl) {}

    /// Once per elapsed fixed step while current.
    fn on_fixed_update(&mut self, _ctx: &mut C, _step: f32, _ctl: &mut ActionControl) {}

    /// The action stopped being current (superseded, succeeded, failed, or
    /// removed).
    fn on_finish(&mut self, _ctx: &mut C) {}
}

/// Object-safe cloning for boxed actions.  Blanket-implemented for every
/// `Clone` action.
pub trait ActionClone<C> {
    fn clone_boxed(&self) -> Box<dyn ActionBehavior<C>>;
}

impl<C, T> ActionClone<C> for T
where
    T: ActionBehavior<C> + Clone + 'static,
{
    fn clone_boxed(&self) -> Box<dyn ActionBehavior<C>> {
        Box::new(self.clone())
    }
}

/// An action that does nothing and never looks for targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopAction;

impl<C> ActionBehavior<C> for NoopAction {
    fn refresh_targets(&mut self, _ctx: &C, _targets: &mut TargetList) {}
}
