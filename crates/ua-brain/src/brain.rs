//! The `Brain` struct and its tick loop.

use std::sync::Arc;

use tracing::{debug, warn};

use ua_behavior::{
    ActionOutcome, ActionSetTemplate, AgentContext, BehaviorTemplate, RuntimeAction,
    RuntimeBehavior, ScoreTrace, TraceKind,
};
use ua_core::{ActionId, ActionSetId, BrainClock, Guid, Timer};

use crate::observer::{ActionRef, BrainObserver, ThinkReport};
use crate::select::select;
use crate::{BrainConfig, BrainError, BrainResult, FlatActionList};

/// The decision engine of one agent.
///
/// `Brain<C>` owns a private [`RuntimeBehavior`] cloned from a shared
/// template and drives it once per host frame:
///
/// 1. **Targets**: when the target timer is due, every action rebuilds its
///    candidate list.
/// 2. **Think**: when the think timer is due, or nothing is current, every
///    action is rescored and the selection policy picks the current action.
///    An uninterruptable current action skips the pass.
/// 3. **Execute**: `on_update`, `on_late_update`, then one `on_fixed_update`
///    per elapsed fixed step, on the current action.
///
/// Steps 1–2 stop while thinking is paused, step 3 while execution is paused.
/// A hook that calls `succeed()`/`fail()` ends the current action; the next
/// tick thinks again regardless of the timer.
///
/// Create via [`BrainBuilder`][crate::BrainBuilder].
pub struct Brain<C> {
    template:          Arc<BehaviorTemplate<C>>,
    config:            BrainConfig,
    runtime:           RuntimeBehavior<C>,
    flat:              FlatActionList,
    current:           Option<ActionId>,
    clock:             BrainClock,
    think_timer:       Timer,
    target_timer:      Timer,
    fixed_accumulator: f32,
    thinking_paused:   bool,
    execution_paused:  bool,
}

impl<C: AgentContext> Brain<C> {
    pub(crate) fn assemble(
        template: Arc<BehaviorTemplate<C>>,
        config:   BrainConfig,
        runtime:  RuntimeBehavior<C>,
    ) -> Self {
        let mut flat = FlatActionList::default();
        flat.rebuild(&runtime);
        Self {
            think_timer: Timer::new(config.think_interval),
            target_timer: Timer::new(config.target_refresh_interval),
            template,
            config,
            runtime,
            flat,
            current: None,
            clock: BrainClock::new(),
            fixed_accumulator: 0.0,
            thinking_paused: false,
            execution_paused: false,
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the brain by one host frame of `dt` seconds.
    pub fn tick<O: BrainObserver>(&mut self, dt: f32, ctx: &mut C, observer: &mut O) -> BrainResult<()> {
        let dt = dt.max(0.0);
        self.clock.advance(dt);
        self.think_timer.interval = self.config.think_interval;
        self.target_timer.interval = self.config.target_refresh_interval;
        observer.on_tick_start(&self.clock);

        if !self.flat.is_empty() {
            if !self.thinking_paused {
                self.target_timer.accumulate(dt);
                if self.target_timer.is_due() {
                    self.update_targets(ctx, observer);
                }

                self.think_timer.accumulate(dt);
                if self.think_timer.is_due() || self.current.is_none() {
                    self.think_timer.reset();
                    self.think(ctx, observer)?;
                }
            }

            if !self.execution_paused {
                self.execute(dt, ctx, observer);
            }
        }

        observer.on_tick_end(&self.clock);
        Ok(())
    }

    /// Rebuild every action's target list now and restart the refresh timer.
    pub fn update_targets<O: BrainObserver>(&mut self, ctx: &C, observer: &mut O) {
        self.runtime.refresh_targets(ctx);
        self.target_timer.reset();
        debug!(frame = %self.clock.frame, "targets refreshed");
        observer.on_targets_refreshed(self.clock.frame);
    }

    /// Run a think pass now.  Does not touch the think timer.
    pub fn think<O: BrainObserver>(&mut self, ctx: &mut C, observer: &mut O) -> BrainResult<ThinkReport> {
        self.config.selection.ensure_supported(self.config.top_n)?;
        if self.flat.is_stale(&self.runtime) {
            self.flat.rebuild(&self.runtime);
        }

        let now = self.clock.frame;
        let mut trace = self.config.trace.then(ScoreTrace::new);
        if let Some(t) = trace.as_mut() {
            t.section(0, "Actions");
        }

        // ── Interruption lock ─────────────────────────────────────────────
        let locked = self
            .current
            .and_then(|id| self.runtime.action(id))
            .filter(|a| !a.is_interruptable());
        if let Some(cur) = locked {
            if let Some(t) = trace.as_mut() {
                let line = t.push(1, TraceKind::Action, cur.identity.name.clone(), None);
                t.set_note(line, "uninterruptable");
            }
            let report = ThinkReport {
                frame:     now,
                time_secs: self.clock.elapsed_secs,
                skipped:   true,
                winner:    Some(cur.id),
                target:    cur.chosen_target(),
                score:     cur.score(),
                changed:   false,
                scores:    Vec::new(),
                trace,
            };
            observer.on_think_completed(&report);
            return Ok(report);
        }

        // ── Rescore ───────────────────────────────────────────────────────
        for row in 0..self.flat.len() {
            let id = self.flat.actions[row];
            self.flat.scores[row] = match self.runtime.action_mut(id) {
                Some(action) => action.compute_score(&*ctx, trace.as_mut()),
                None => 0.0,
            };
        }
        let scores: Vec<(ActionId, f32)> = self
            .flat
            .actions
            .iter()
            .copied()
            .zip(self.flat.scores.iter().copied())
            .collect();

        // ── Select ────────────────────────────────────────────────────────
        let previous = self.current;
        let pick = select(
            self.config.selection,
            &self.flat,
            previous.and_then(|id| self.flat.position(id)),
            self.config.interruption_delta_threshold,
            self.config.top_n,
        )?;
        let winner = pick.map(|row| self.flat.actions[row]).or(previous);
        if let Some(next) = winner.filter(|&w| Some(w) != previous) {
            self.switch_to(next, ctx, observer);
        }

        let (score, target) = winner
            .and_then(|id| self.runtime.action(id))
            .map(|a| (a.score(), a.chosen_target()))
            .unwrap_or((0.0, None));
        if let Some(t) = trace.as_mut() {
            if let Some(action) = winner.and_then(|id| self.runtime.action(id)) {
                let subject = match target {
                    Some(tg) => format!("{} -> {tg}", action.identity.name),
                    None => action.identity.name.clone(),
                };
                t.push(1, TraceKind::Winner, subject, Some(score));
            }
        }

        debug!(frame = %now, winner = ?winner, score, "think pass complete");
        let report = ThinkReport {
            frame: now,
            time_secs: self.clock.elapsed_secs,
            skipped: false,
            winner,
            target,
            score,
            changed: winner != previous,
            scores,
            trace,
        };
        observer.on_think_completed(&report);
        Ok(report)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Finish the current action (if any), make `next` current, and start it.
    fn switch_to<O: BrainObserver>(&mut self, next: ActionId, ctx: &mut C, observer: &mut O) {
        let now = self.clock.frame;
        let prev = self.current;
        if let Some(action) = prev.and_then(|id| self.runtime.action_mut(id)) {
            action.finish(ctx);
        }
        self.current = Some(next);
        let outcome = self.runtime.action_mut(next).and_then(|a| a.start(ctx));
        debug!(frame = %now, from = ?prev, to = %next, "current action changed");
        observer.on_current_action_changed(now, self.action_ref(prev), self.action_ref(Some(next)));
        if let Some(outcome) = outcome {
            self.complete(next, outcome, ctx, observer);
        }
    }

    /// Report the outcome, finish the action, and clear it if current.
    fn complete<O: BrainObserver>(
        &mut self,
        id:       ActionId,
        outcome:  ActionOutcome,
        ctx:      &mut C,
        observer: &mut O,
    ) {
        let now = self.clock.frame;
        if let Some(action) = self.action_ref(Some(id)) {
            match outcome {
                ActionOutcome::Succeeded => observer.on_action_succeeded(now, action),
                ActionOutcome::Failed => observer.on_action_failed(now, action),
            }
        }
        if let Some(action) = self.runtime.action_mut(id) {
            action.finish(ctx);
        }
        if self.current == Some(id) {
            self.current = None;
            debug!(frame = %now, action = %id, ?outcome, "current action ended");
            observer.on_current_action_changed(now, self.action_ref(Some(id)), None);
        }
    }

    fn execute<O: BrainObserver>(&mut self, dt: f32, ctx: &mut C, observer: &mut O) {
        let Some(id) = self.current else {
            self.fixed_accumulator = 0.0;
            return;
        };

        if let Some(o) = self.runtime.action_mut(id).and_then(|a| a.update(ctx, dt)) {
            self.complete(id, o, ctx, observer);
            return;
        }
        if let Some(o) = self.runtime.action_mut(id).and_then(|a| a.late_update(ctx, dt)) {
            self.complete(id, o, ctx, observer);
            return;
        }

        let step = self.config.fixed_timestep;
        if step <= 0.0 {
            return;
        }
        self.fixed_accumulator += dt.max(0.0);
        let due = (self.fixed_accumulator / step).floor();
        let max = self.config.max_fixed_steps;
        let steps = if due > max as f32 {
            // Too far behind to catch up: run the cap and drop the backlog.
            warn!(action = %id, due, max, "fixed-step backlog dropped");
            self.fixed_accumulator = 0.0;
            max
        } else {
            self.fixed_accumulator = (self.fixed_accumulator - due * step).max(0.0);
            due as u32
        };
        for _ in 0..steps {
            if let Some(o) = self.runtime.action_mut(id).and_then(|a| a.fixed_update(ctx, step)) {
                self.complete(id, o, ctx, observer);
                return;
            }
        }
    }

    /// End `id` as succeeded from outside its hooks.
    pub fn action_succeeded<O: BrainObserver>(
        &mut self,
        id:       ActionId,
        ctx:      &mut C,
        observer: &mut O,
    ) -> BrainResult<()> {
        self.end_action(id, ActionOutcome::Succeeded, ctx, observer)
    }

    /// End `id` as failed from outside its hooks.
    pub fn action_failed<O: BrainObserver>(
        &mut self,
        id:       ActionId,
        ctx:      &mut C,
        observer: &mut O,
    ) -> BrainResult<()> {
        self.end_action(id, ActionOutcome::Failed, ctx, observer)
    }

    fn end_action<O: BrainObserver>(
        &mut self,
        id:       ActionId,
        outcome:  ActionOutcome,
        ctx:      &mut C,
        observer: &mut O,
    ) -> BrainResult<()> {
        if self.runtime.action(id).is_none() {
            return Err(BrainError::UnknownAction(id));
        }
        self.complete(id, outcome, ctx, observer);
        Ok(())
    }

    // ── Structural changes ────────────────────────────────────────────────

    /// Clone and add one action set.  `Ok(None)` if its guid is already
    /// loaded.
    pub fn add_action_set<O: BrainObserver>(
        &mut self,
        set:      &ActionSetTemplate<C>,
        ctx:      &C,
        observer: &mut O,
    ) -> BrainResult<Option<ActionSetId>> {
        let added = self.runtime.add_set(set, ctx);
        self.sync_structure(observer);
        Ok(added?)
    }

    /// Add every action set of `behavior`; returns the ids of the sets that
    /// were not already loaded.
    pub fn add_behavior<O: BrainObserver>(
        &mut self,
        behavior: &BehaviorTemplate<C>,
        ctx:      &C,
        observer: &mut O,
    ) -> BrainResult<Vec<ActionSetId>> {
        let added = self.runtime.add_behavior(behavior, ctx);
        self.sync_structure(observer);
        Ok(added?)
    }

    /// Remove the action set with `guid`.  If it owns the current action,
    /// that action is finished and nothing is current afterwards.
    pub fn remove_action_set<O: BrainObserver>(&mut self, guid: Guid, ctx: &mut C, observer: &mut O) -> bool {
        let removed = self.detach_set(guid, ctx, observer);
        self.sync_structure(observer);
        removed
    }

    /// Remove every action set of `behavior`; returns how many were loaded.
    pub fn remove_behavior<O: BrainObserver>(
        &mut self,
        behavior: &BehaviorTemplate<C>,
        ctx:      &mut C,
        observer: &mut O,
    ) -> usize {
        let removed = behavior
            .action_sets
            .iter()
            .filter_map(|s| s.identity.guid())
            .filter(|&guid| self.detach_set(guid, ctx, observer))
            .count();
        self.sync_structure(observer);
        removed
    }

    fn detach_set<O: BrainObserver>(&mut self, guid: Guid, ctx: &mut C, observer: &mut O) -> bool {
        let Some((set, mut actions)) = self.runtime.remove_set(guid) else {
            return false;
        };
        debug!(set = %set.identity, actions = actions.len(), "action set removed");
        if let Some(cur) = self.current {
            if let Some(action) = actions.iter_mut().find(|a| a.id == cur) {
                action.finish(ctx);
                self.current = None;
                observer.on_current_action_changed(self.clock.frame, Some(ActionRef::of(action)), None);
            }
        }
        true
    }

    fn sync_structure<O: BrainObserver>(&mut self, observer: &mut O) {
        if self.flat.is_stale(&self.runtime) {
            self.flat.rebuild(&self.runtime);
            observer.on_behavior_list_modified(self.clock.frame);
        }
    }

    // ── Pausing ───────────────────────────────────────────────────────────

    /// Stop (or resume) target refreshes and think passes.
    pub fn pause_thinking(&mut self, pause: bool) {
        self.thinking_paused = pause;
    }

    /// Stop (or resume) running the current action's hooks.
    pub fn pause_execution(&mut self, pause: bool) {
        self.execution_paused = pause;
    }

    pub fn is_thinking_paused(&self) -> bool {
        self.thinking_paused
    }

    pub fn is_execution_paused(&self) -> bool {
        self.execution_paused
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn current_action(&self) -> Option<ActionId> {
        self.current
    }

    pub fn current(&self) -> Option<&RuntimeAction<C>> {
        self.current.and_then(|id| self.runtime.action(id))
    }

    pub fn action(&self, id: ActionId) -> Option<&RuntimeAction<C>> {
        self.runtime.action(id)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut RuntimeAction<C>> {
        self.runtime.action_mut(id)
    }

    /// First live action named `name`, in declaration order.
    pub fn find_action(&self, name: &str) -> Option<ActionId> {
        self.runtime.iter_actions().find(|a| a.identity.name == name).map(|a| a.id)
    }

    pub fn runtime(&self) -> &RuntimeBehavior<C> {
        &self.runtime
    }

    pub fn flat(&self) -> &FlatActionList {
        &self.flat
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    /// Interval changes apply from the next tick.  An unsupported selection
    /// algorithm fails the next think pass.
    pub fn config_mut(&mut self) -> &mut BrainConfig {
        &mut self.config
    }

    pub fn clock(&self) -> &BrainClock {
        &self.clock
    }

    pub fn think_timer(&self) -> &Timer {
        &self.think_timer
    }

    pub fn target_timer(&self) -> &Timer {
        &self.target_timer
    }

    pub fn template(&self) -> &Arc<BehaviorTemplate<C>> {
        &self.template
    }

    fn action_ref(&self, id: Option<ActionId>) -> Option<ActionRef<'_>> {
        id.and_then(|id| self.runtime.action(id)).map(ActionRef::of)
    }
}
