//! Brain observer trait, think reports, and an event outbox.

use ua_behavior::{RuntimeAction, ScoreTrace};
use ua_core::{ActionId, BrainClock, TargetId, Tick};

// ── ActionRef ─────────────────────────────────────────────────────────────────

/// Borrowed view of an action handed to observer callbacks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActionRef<'a> {
    pub id:     ActionId,
    pub name:   &'a str,
    pub target: Option<TargetId>,
}

impl<'a> ActionRef<'a> {
    pub fn of<C>(action: &'a RuntimeAction<C>) -> Self {
        Self {
            id:     action.id,
            name:   &action.identity.name,
            target: action.chosen_target(),
        }
    }
}

// ── ThinkReport ───────────────────────────────────────────────────────────────

/// Result of one think pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ThinkReport {
    pub frame:     Tick,
    pub time_secs: f64,
    /// The current action was uninterruptable; nothing was rescored.
    pub skipped:   bool,
    /// The action that is current after the pass.
    pub winner:    Option<ActionId>,
    pub target:    Option<TargetId>,
    /// Score of `winner` in this pass (0 when skipped or none).
    pub score:     f32,
    /// `winner` differs from the action that was current before the pass.
    pub changed:   bool,
    /// Every rescored action in declaration order.  Empty when skipped.
    pub scores:    Vec<(ActionId, f32)>,
    /// Present when `BrainConfig::trace` is on.
    pub trace:     Option<ScoreTrace>,
}

// ── BrainObserver ─────────────────────────────────────────────────────────────

/// Callbacks invoked synchronously by a [`Brain`][crate::Brain] inside the
/// call that caused them.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait BrainObserver {
    /// Called at the start of every `Brain::tick`, after the clock advanced.
    fn on_tick_start(&mut self, _clock: &BrainClock) {}

    /// Every action's target list was rebuilt.
    fn on_targets_refreshed(&mut self, _now: Tick) {}

    fn on_think_completed(&mut self, _report: &ThinkReport) {}

    /// `prev → next`; either side may be `None`.
    fn on_current_action_changed(
        &mut self,
        _now:  Tick,
        _prev: Option<ActionRef<'_>>,
        _next: Option<ActionRef<'_>>,
    ) {}

    fn on_action_succeeded(&mut self, _now: Tick, _action: ActionRef<'_>) {}

    fn on_action_failed(&mut self, _now: Tick, _action: ActionRef<'_>) {}

    /// Action sets were added or removed.
    fn on_behavior_list_modified(&mut self, _now: Tick) {}

    /// Called at the end of every `Brain::tick`.
    fn on_tick_end(&mut self, _clock: &BrainClock) {}
}

/// A [`BrainObserver`] that does nothing.
pub struct NoopObserver;

impl BrainObserver for NoopObserver {}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// One lifecycle transition, as recorded by [`EventLog`].
#[derive(Clone, Debug, PartialEq)]
pub enum BrainEvent {
    TargetsRefreshed {
        now: Tick,
    },
    ThinkCompleted {
        now:     Tick,
        winner:  Option<ActionId>,
        skipped: bool,
    },
    CurrentActionChanged {
        now:  Tick,
        prev: Option<ActionId>,
        next: Option<ActionId>,
    },
    ActionSucceeded {
        now:    Tick,
        action: ActionId,
    },
    ActionFailed {
        now:    Tick,
        action: ActionId,
    },
    BehaviorListModified {
        now: Tick,
    },
}

/// Outbox observer: collects every event for the caller to drain.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<BrainEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BrainEvent] {
        &self.events
    }

    /// Take every event recorded so far.
    pub fn drain(&mut self) -> Vec<BrainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Only the `CurrentActionChanged` transitions, as `(prev, next)`.
    pub fn changes(&self) -> Vec<(Option<ActionId>, Option<ActionId>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BrainEvent::CurrentActionChanged { prev, next, .. } => Some((*prev, *next)),
                _ => None,
            })
            .collect()
    }
}

impl BrainObserver for EventLog {
    fn on_targets_refreshed(&mut self, now: Tick) {
        self.events.push(BrainEvent::TargetsRefreshed { now });
    }

    fn on_think_completed(&mut self, report: &ThinkReport) {
        self.events.push(BrainEvent::ThinkCompleted {
            now:     report.frame,
            winner:  report.winner,
            skipped: report.skipped,
        });
    }

    fn on_current_action_changed(
        &mut self,
        now:  Tick,
        prev: Option<ActionRef<'_>>,
        next: Option<ActionRef<'_>>,
    ) {
        self.events.push(BrainEvent::CurrentActionChanged {
            now,
            prev: prev.map(|a| a.id),
            next: next.map(|a| a.id),
        });
    }

    fn on_action_succeeded(&mut self, now: Tick, action: ActionRef<'_>) {
        self.events.push(BrainEvent::ActionSucceeded { now, action: action.id });
    }

    fn on_action_failed(&mut self, now: Tick, action: ActionRef<'_>) {
        self.events.push(BrainEvent::ActionFailed { now, action: action.id });
    }

    fn on_behavior_list_modified(&mut self, now: Tick) {
        self.events.push(BrainEvent::BehaviorListModified { now });
    }
}
