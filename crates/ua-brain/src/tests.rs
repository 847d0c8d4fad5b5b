//! Unit tests for ua-brain.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use ua_behavior::{
    ActionBehavior, ActionControl, ActionOutcome, ActionSetTemplate, ActionTemplate, AgentContext,
    BehaviorTemplate, ConsiderationTemplate, FnConsideration, TargetList,
};
use ua_core::{ActionId, TargetId, Tick};

use crate::{Brain, BrainBuilder, BrainEvent, EventLog, SelectionAlgorithm};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct World {
    targets:     BTreeMap<TargetId, f32>,
    knobs:       HashMap<&'static str, f32>,
    /// Outcome the current action reports on its next update.
    pending:     Option<ActionOutcome>,
    log:         Vec<String>,
    updates:     u32,
    fixed_steps: u32,
}

impl World {
    fn with_knobs(knobs: &[(&'static str, f32)]) -> Self {
        Self { knobs: knobs.iter().copied().collect(), ..Self::default() }
    }
}

impl AgentContext for World {
    fn resolves(&self, target: TargetId) -> bool {
        self.targets.contains_key(&target)
    }
}

#[derive(Clone)]
struct Scripted {
    name:  &'static str,
    seeks: bool,
}

impl ActionBehavior<World> for Scripted {
    fn refresh_targets(&mut self, ctx: &World, targets: &mut TargetList) {
        if self.seeks {
            targets.clear();
            targets.extend(ctx.targets.keys().copied());
        }
    }

    fn on_start(&mut self, ctx: &mut World, _ctl: &mut ActionControl) {
        ctx.log.push(format!("start:{}", self.name));
    }

    fn on_update(&mut self, ctx: &mut World, _dt: f32, ctl: &mut ActionControl) {
        ctx.updates += 1;
        match ctx.pending.take() {
            Some(ActionOutcome::Succeeded) => ctl.succeed(),
            Some(ActionOutcome::Failed) => ctl.fail(),
            None => {}
        }
    }

    fn on_fixed_update(&mut self, ctx: &mut World, _step: f32, _ctl: &mut ActionControl) {
        ctx.fixed_steps += 1;
    }

    fn on_finish(&mut self, ctx: &mut World) {
        ctx.log.push(format!("finish:{}", self.name));
    }
}

fn knob(key: &'static str) -> ConsiderationTemplate<World> {
    ConsiderationTemplate::new(
        key,
        FnConsideration::new(move |w: &World, _| w.knobs.get(key).copied().unwrap_or(0.0)),
    )
}

/// An action scored by a single knob.
fn action(name: &'static str, key: &'static str) -> ActionTemplate<World> {
    ActionTemplate::new(name, Scripted { name, seeks: false }).with_consideration(knob(key))
}

fn behavior(actions: Vec<ActionTemplate<World>>) -> Arc<BehaviorTemplate<World>> {
    let set = actions.into_iter().fold(ActionSetTemplate::new("Main"), |s, a| s.with_action(a));
    Arc::new(BehaviorTemplate::new("Test").with_action_set(set))
}

const IDLE: ActionId = ActionId(0);
const ATTACK: ActionId = ActionId(1);

/// `Idle` scored by the `idle` knob; `Attack` scores 0.9 per live target.
fn idle_attack() -> Arc<BehaviorTemplate<World>> {
    let in_range = ConsiderationTemplate::new(
        "InRange",
        FnConsideration::new(|w: &World, t: Option<TargetId>| {
            if t.is_some_and(|t| w.targets.contains_key(&t)) { 0.9 } else { 0.0 }
        }),
    )
    .targeted();
    behavior(vec![
        action("Idle", "idle"),
        ActionTemplate::new("Attack", Scripted { name: "Attack", seeks: true }).with_consideration(in_range),
    ])
}

fn think_frames(log: &EventLog) -> Vec<Tick> {
    log.events()
        .iter()
        .filter_map(|e| match e {
            BrainEvent::ThinkCompleted { now, .. } => Some(*now),
            _ => None,
        })
        .collect()
}

fn build(template: Arc<BehaviorTemplate<World>>, world: &World) -> Brain<World> {
    BrainBuilder::new(template).build(world).unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use ua_core::UaError;

    use super::*;
    use crate::BrainError;

    #[test]
    fn builds_and_fills_targets() {
        let mut world = World::default();
        world.targets.insert(TargetId(3), 1.0);
        let brain = build(idle_attack(), &world);
        assert_eq!(brain.flat().len(), 2);
        assert_eq!(brain.current_action(), None);
        assert_eq!(brain.action(ATTACK).unwrap().targets().candidates(), &[TargetId(3)]);
    }

    #[test]
    fn unsupported_selection_rejected() {
        for algorithm in [
            SelectionAlgorithm::RandomTopN,
            SelectionAlgorithm::RandomTopNWithPriority,
            SelectionAlgorithm::WeightedRandomTopN,
            SelectionAlgorithm::WeightedRandomTopNWithPriority,
        ] {
            let err = BrainBuilder::new(idle_attack())
                .selection(algorithm)
                .build(&World::default())
                .err()
                .unwrap();
            assert!(matches!(err, BrainError::UnsupportedSelection { .. }), "{algorithm:?}");
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let err = BrainBuilder::new(idle_attack())
            .fixed_timestep(0.0)
            .build(&World::default())
            .err()
            .unwrap();
        assert!(matches!(err, BrainError::Config(_)));

        let err = BrainBuilder::new(idle_attack())
            .think_interval(-1.0)
            .build(&World::default())
            .err()
            .unwrap();
        assert!(matches!(err, BrainError::Config(_)));
    }

    #[test]
    fn invalid_consideration_range_aborts_build() {
        let t = behavior(vec![ActionTemplate::new("A", Scripted { name: "A", seeks: false })
            .with_consideration(knob("a").range(2.0, 1.0))]);
        let err = BrainBuilder::new(t).build(&World::default()).err().unwrap();
        assert!(matches!(err, BrainError::Core(UaError::InvalidRange { .. })));
    }
}

// ── Think cycle ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod think_tests {
    use super::*;

    #[test]
    fn idle_until_a_target_appears() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();

        brain.tick(0.5, &mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(IDLE));

        world.targets.insert(TargetId(7), 1.0);
        brain.update_targets(&world, &mut log);
        let report = brain.think(&mut world, &mut log).unwrap();

        assert_eq!(report.winner, Some(ATTACK));
        assert_eq!(report.target, Some(TargetId(7)));
        assert!((report.score - 0.9).abs() < 1e-6);
        assert!(report.changed);
        assert_eq!(report.scores.len(), 2);
        assert_eq!(log.changes(), vec![(None, Some(IDLE)), (Some(IDLE), Some(ATTACK))]);
        assert_eq!(world.log, ["start:Idle", "finish:Idle", "start:Attack"]);
    }

    #[test]
    fn thinks_immediately_then_on_interval() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = BrainBuilder::new(idle_attack()).think_interval(2.0).build(&world).unwrap();
        let mut log = EventLog::new();
        for _ in 0..9 {
            brain.tick(0.5, &mut world, &mut log).unwrap();
        }
        assert_eq!(think_frames(&log), vec![Tick(1), Tick(5), Tick(9)]);
    }

    #[test]
    fn forced_think_leaves_timer_alone() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();
        brain.tick(0.5, &mut world, &mut log).unwrap();
        brain.tick(0.5, &mut world, &mut log).unwrap();
        let elapsed = brain.think_timer().elapsed;
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.think_timer().elapsed, elapsed);
    }

    #[test]
    fn uninterruptable_action_is_never_replaced() {
        let mut world = World::with_knobs(&[("guard", 0.5), ("rest", 0.1)]);
        let t = behavior(vec![action("Guard", "guard").interruptable(false), action("Rest", "rest")]);
        let mut brain = build(t, &world);
        let mut log = EventLog::new();

        brain.tick(0.1, &mut world, &mut log).unwrap();
        let guard = brain.current_action();
        assert_eq!(guard, Some(ActionId(0)));

        world.knobs.insert("rest", 1.0);
        for _ in 0..5 {
            let report = brain.think(&mut world, &mut log).unwrap();
            assert!(report.skipped);
            assert!(report.scores.is_empty());
            assert_eq!(brain.current_action(), guard);
        }

        world.pending = Some(ActionOutcome::Succeeded);
        log.drain();
        brain.tick(0.1, &mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), None);
        assert_eq!(
            log.events(),
            &[
                BrainEvent::ActionSucceeded { now: Tick(2), action: ActionId(0) },
                BrainEvent::CurrentActionChanged { now: Tick(2), prev: Some(ActionId(0)), next: None },
            ]
        );

        brain.tick(0.1, &mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(1)));
    }

    #[test]
    fn external_failure_clears_current() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();
        brain.tick(0.1, &mut world, &mut log).unwrap();

        log.drain();
        brain.action_failed(IDLE, &mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), None);
        assert!(matches!(log.events()[0], BrainEvent::ActionFailed { action: IDLE, .. }));
        assert_eq!(log.changes(), vec![(Some(IDLE), None)]);
        assert_eq!(world.log.last().map(String::as_str), Some("finish:Idle"));

        assert!(brain.action_succeeded(ActionId(99), &mut world, &mut log).is_err());
    }

    #[test]
    fn failing_on_start_clears_immediately() {
        #[derive(Clone)]
        struct Doomed;
        impl ActionBehavior<World> for Doomed {
            fn refresh_targets(&mut self, _ctx: &World, _targets: &mut TargetList) {}
            fn on_start(&mut self, _ctx: &mut World, ctl: &mut ActionControl) {
                ctl.fail();
            }
        }
        let mut world = World::with_knobs(&[("d", 1.0)]);
        let t = behavior(vec![ActionTemplate::new("Doomed", Doomed).with_consideration(knob("d"))]);
        let mut brain = build(t, &world);
        let mut log = EventLog::new();
        brain.tick(0.1, &mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), None);
        assert_eq!(log.changes(), vec![(None, Some(ActionId(0))), (Some(ActionId(0)), None)]);
    }

    #[test]
    fn plain_max_prefers_first_declared_on_ties() {
        let mut world = World::with_knobs(&[("a", 0.5), ("b", 0.5)]);
        let mut brain = build(behavior(vec![action("A", "a"), action("B", "b")]), &world);
        let report = brain.think(&mut world, &mut EventLog::new()).unwrap();
        assert_eq!(report.winner, Some(ActionId(0)));
    }

    #[test]
    fn plain_max_picks_even_when_everything_scores_zero() {
        let mut world = World::default();
        let mut brain = build(behavior(vec![action("A", "a"), action("B", "b")]), &world);
        let report = brain.think(&mut world, &mut EventLog::new()).unwrap();
        assert_eq!(report.winner, Some(ActionId(0)));
    }

    #[test]
    fn unsupported_selection_fails_at_think_time() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        brain.config_mut().selection = SelectionAlgorithm::WeightedRandomTopN;
        assert!(brain.think(&mut world, &mut EventLog::new()).is_err());
        assert!(brain.tick(0.1, &mut world, &mut EventLog::new()).is_err());
    }

    #[test]
    fn trace_records_sections_and_winner() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = BrainBuilder::new(idle_attack()).trace(true).build(&world).unwrap();
        let report = brain.think(&mut world, &mut EventLog::new()).unwrap();
        let trace = report.trace.unwrap();
        let first = &trace.lines()[0];
        assert_eq!((first.depth, first.subject.as_str()), (0, "Actions"));
        let last = trace.lines().last().unwrap();
        assert_eq!(last.kind, ua_behavior::TraceKind::Winner);
        assert_eq!(last.subject, "Idle");
    }
}

// ── Priority-gated selection ──────────────────────────────────────────────────

#[cfg(test)]
mod priority_tests {
    use super::*;

    fn gated(actions: Vec<ActionTemplate<World>>, world: &World, delta: f32) -> Brain<World> {
        BrainBuilder::new(behavior(actions))
            .selection(SelectionAlgorithm::HighestScoreWithPriority)
            .interruption_delta_threshold(delta)
            .build(world)
            .unwrap()
    }

    #[test]
    fn higher_priority_interrupts_with_any_positive_score() {
        let mut world = World::with_knobs(&[("a", 0.9)]);
        let mut brain = gated(vec![action("A", "a"), action("B", "b").priority(1)], &world, 0.0);
        let mut log = EventLog::new();
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(0)));

        world.knobs.insert("b", 0.2);
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(1)));
    }

    #[test]
    fn lower_priority_never_interrupts() {
        let mut world = World::with_knobs(&[("b", 0.1)]);
        let mut brain = gated(vec![action("A", "a"), action("B", "b").priority(1)], &world, 0.0);
        let mut log = EventLog::new();
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(1)));

        world.knobs.insert("a", 1.0);
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(1)));
    }

    #[test]
    fn equal_priority_needs_more_than_delta() {
        let mut world = World::with_knobs(&[("a", 0.5)]);
        let mut brain = gated(vec![action("A", "a"), action("C", "c")], &world, 0.1);
        let mut log = EventLog::new();
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(0)));

        world.knobs.insert("c", 0.55);
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(0)));

        world.knobs.insert("c", 0.7);
        brain.think(&mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(ActionId(1)));
    }

    #[test]
    fn nothing_selected_when_all_scores_are_zero() {
        let mut world = World::default();
        let mut brain = gated(vec![action("A", "a")], &world, 0.0);
        let report = brain.think(&mut world, &mut EventLog::new()).unwrap();
        assert_eq!(report.winner, None);
        assert_eq!(brain.current_action(), None);
    }
}

// ── Execution ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod execution_tests {
    use super::*;

    #[test]
    fn fixed_steps_follow_accumulated_time() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = BrainBuilder::new(idle_attack()).fixed_timestep(0.02).build(&world).unwrap();
        brain.tick(0.05, &mut world, &mut EventLog::new()).unwrap();
        assert_eq!(world.updates, 1);
        assert_eq!(world.fixed_steps, 2);
    }

    #[test]
    fn huge_delta_runs_at_most_max_fixed_steps() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = BrainBuilder::new(idle_attack()).fixed_timestep(0.02).build(&world).unwrap();
        let mut log = EventLog::new();
        brain.tick(20_000.0, &mut world, &mut log).unwrap();
        assert_eq!(world.fixed_steps, 16);

        // The backlog is gone; the next frame steps normally.
        brain.tick(0.05, &mut world, &mut log).unwrap();
        assert_eq!(world.fixed_steps, 18);
    }

    #[test]
    fn max_fixed_steps_is_configurable() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = BrainBuilder::new(idle_attack())
            .fixed_timestep(0.02)
            .max_fixed_steps(3)
            .build(&world)
            .unwrap();
        brain.tick(1.0, &mut world, &mut EventLog::new()).unwrap();
        assert_eq!(world.fixed_steps, 3);

        let err = BrainBuilder::new(idle_attack()).max_fixed_steps(0).build(&world).err().unwrap();
        assert!(matches!(err, crate::BrainError::Config(_)));
    }

    #[test]
    fn paused_thinking_never_selects() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();
        brain.pause_thinking(true);
        for _ in 0..20 {
            brain.tick(0.5, &mut world, &mut log).unwrap();
        }
        assert!(log.events().is_empty());
        assert_eq!(brain.current_action(), None);

        brain.pause_thinking(false);
        brain.tick(0.5, &mut world, &mut log).unwrap();
        assert_eq!(brain.current_action(), Some(IDLE));
    }

    #[test]
    fn paused_execution_skips_hooks() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();
        brain.tick(0.1, &mut world, &mut log).unwrap();
        assert_eq!(world.updates, 1);

        brain.pause_execution(true);
        brain.tick(0.1, &mut world, &mut log).unwrap();
        assert_eq!(world.updates, 1);
        assert!(brain.is_execution_paused());
    }

    #[test]
    fn targets_refresh_on_their_own_cadence() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = BrainBuilder::new(idle_attack())
            .target_refresh_interval(1.0)
            .build(&world)
            .unwrap();
        let mut log = EventLog::new();
        world.targets.insert(TargetId(1), 1.0);
        brain.tick(0.5, &mut world, &mut log).unwrap();
        assert!(brain.action(ATTACK).unwrap().targets().is_empty());

        brain.tick(0.5, &mut world, &mut log).unwrap();
        assert!(log.events().contains(&BrainEvent::TargetsRefreshed { now: Tick(2) }));
        assert_eq!(brain.action(ATTACK).unwrap().targets().candidates(), &[TargetId(1)]);
        assert_eq!(brain.target_timer().elapsed, 0.0);
    }

    #[test]
    fn empty_behavior_is_inert() {
        let mut world = World::default();
        let mut brain = build(Arc::new(BehaviorTemplate::new("Empty")), &world);
        let mut log = EventLog::new();
        brain.tick(1.0, &mut world, &mut log).unwrap();
        assert!(log.events().is_empty());
    }
}

// ── Structural changes ────────────────────────────────────────────────────────

#[cfg(test)]
mod structure_tests {
    use super::*;

    fn modified_count(log: &EventLog) -> usize {
        log.events()
            .iter()
            .filter(|e| matches!(e, BrainEvent::BehaviorListModified { .. }))
            .count()
    }

    #[test]
    fn add_and_remove_action_set() {
        let mut world = World::with_knobs(&[("idle", 0.3)]);
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();

        let extra = ActionSetTemplate::new("Extra").with_action(action("Dance", "dance"));
        assert!(brain.add_action_set(&extra, &world, &mut log).unwrap().is_some());
        assert!(brain.add_action_set(&extra, &world, &mut log).unwrap().is_none());
        assert_eq!(brain.flat().len(), 3);
        assert_eq!(modified_count(&log), 1);

        world.knobs.insert("dance", 1.0);
        brain.think(&mut world, &mut log).unwrap();
        let dance = brain.find_action("Dance");
        assert_eq!(brain.current_action(), dance);

        log.drain();
        let guid = extra.identity.guid().unwrap();
        assert!(brain.remove_action_set(guid, &mut world, &mut log));
        assert_eq!(brain.current_action(), None);
        assert_eq!(log.changes(), vec![(dance, None)]);
        assert_eq!(modified_count(&log), 1);
        assert_eq!(world.log.last().map(String::as_str), Some("finish:Dance"));
        assert_eq!(brain.flat().len(), 2);

        assert!(!brain.remove_action_set(guid, &mut world, &mut log));
        assert_eq!(modified_count(&log), 1);
    }

    #[test]
    fn add_and_remove_behavior() {
        let mut world = World::default();
        let mut brain = build(idle_attack(), &world);
        let mut log = EventLog::new();

        let more = BehaviorTemplate::new("More")
            .with_action_set(ActionSetTemplate::new("S1").with_action(action("X", "x")))
            .with_action_set(ActionSetTemplate::new("S2").with_action(action("Y", "y")));
        assert_eq!(brain.add_behavior(&more, &world, &mut log).unwrap().len(), 2);
        assert_eq!(brain.flat().len(), 4);

        assert_eq!(brain.remove_behavior(&more, &mut world, &mut log), 2);
        assert_eq!(brain.flat().len(), 2);
        assert_eq!(modified_count(&log), 2);
    }
}

// ── Selection policies (direct) ───────────────────────────────────────────────

#[cfg(test)]
mod select_tests {
    use ua_core::ActionSetId;

    use crate::FlatActionList;
    use crate::select::select;

    use super::*;

    fn flat(rows: &[(i32, f32)]) -> FlatActionList {
        let mut f = FlatActionList::default();
        for (i, &(p, s)) in rows.iter().enumerate() {
            f.sets.push(ActionSetId(0));
            f.actions.push(ActionId(i as u32));
            f.priorities.push(p);
            f.scores.push(s);
        }
        f
    }

    #[test]
    fn highest_score() {
        let f = flat(&[(0, 0.2), (0, 0.8), (0, 0.8)]);
        assert_eq!(select(SelectionAlgorithm::HighestScore, &f, None, 0.0, 5).unwrap(), Some(1));
        assert_eq!(select(SelectionAlgorithm::HighestScore, &flat(&[]), None, 0.0, 5).unwrap(), None);
    }

    #[test]
    fn priority_candidate_ignores_zero_scores() {
        let f = flat(&[(0, 0.4), (5, 0.0), (1, 0.1)]);
        let pick = select(SelectionAlgorithm::HighestScoreWithPriority, &f, None, 0.0, 5).unwrap();
        assert_eq!(pick, Some(2));
    }

    #[test]
    fn priority_keeps_current_without_candidates() {
        let f = flat(&[(0, 0.0), (0, 0.0)]);
        let pick = select(SelectionAlgorithm::HighestScoreWithPriority, &f, Some(1), 0.0, 5).unwrap();
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn priority_without_current_or_candidates_is_none() {
        let f = flat(&[(0, 0.0), (3, 0.0)]);
        assert_eq!(select(SelectionAlgorithm::HighestScoreWithPriority, &f, None, 0.0, 5).unwrap(), None);
    }

    #[test]
    fn random_policies_fail() {
        let f = flat(&[(0, 1.0)]);
        assert!(select(SelectionAlgorithm::RandomTopN, &f, None, 0.0, 3).is_err());
    }
}

// ── Shared templates ──────────────────────────────────────────────────────────

#[cfg(test)]
mod isolation_tests {
    use super::*;

    #[test]
    fn brains_sharing_a_template_decide_independently() {
        let template = idle_attack();
        let mut quiet = World::with_knobs(&[("idle", 0.3)]);
        let mut busy = World::with_knobs(&[("idle", 0.3)]);
        busy.targets.insert(TargetId(9), 1.0);

        let mut a = build(Arc::clone(&template), &quiet);
        let mut b = build(Arc::clone(&template), &busy);
        let mut log = EventLog::new();

        a.tick(0.5, &mut quiet, &mut log).unwrap();
        b.tick(0.5, &mut busy, &mut log).unwrap();

        assert_eq!(a.current_action(), Some(IDLE));
        assert!(a.action(ATTACK).unwrap().targets().is_empty());
        assert_eq!(a.action(ATTACK).unwrap().chosen_target(), None);
        assert_eq!(a.action(ATTACK).unwrap().score(), 0.0);

        assert_eq!(b.current_action(), Some(ATTACK));
        assert_eq!(b.action(ATTACK).unwrap().chosen_target(), Some(TargetId(9)));
        assert!((b.action(ATTACK).unwrap().score() - 0.9).abs() < 1e-5);

        for _ in 0..3 {
            b.tick(0.5, &mut busy, &mut log).unwrap();
        }
        assert_eq!(a.clock().frame, Tick(1));
        assert_eq!(b.clock().frame, Tick(4));
        assert_eq!(a.think_timer().elapsed, 0.0);
        assert!((b.think_timer().elapsed - 1.5).abs() < 1e-5);

        // Losing the target only affects the brain that saw it.
        busy.targets.clear();
        b.update_targets(&busy, &mut log);
        b.think(&mut busy, &mut log).unwrap();
        assert_eq!(b.current_action(), Some(IDLE));
        assert_eq!(b.action(ATTACK).unwrap().chosen_target(), None);
        assert_eq!(a.current_action(), Some(IDLE));
        assert_eq!(a.clock().frame, Tick(1));
    }
}
