//! Action scoring.
//!
//! # Algorithm
//!
//! An action's score is the product of its considerations' *compensated*
//! scores, scaled by its weight:
//!
//! 1. No considerations → 0.
//! 2. `factor = 1 - 1/n` where `n` counts self and targeted considerations;
//!    each score `s` becomes `s + (1 - s)·factor·s`.  Without this an action
//!    with many considerations is pushed towards 0 just by having them.
//! 3. Self considerations are multiplied in order.  A product below
//!    [`SCORE_EPSILON`] is 0; outside trace mode evaluation stops early.
//! 4. Dead targets are pruned (`AgentContext::resolves`).
//! 5. No targets left: 0 if the action has targeted considerations,
//!    otherwise `self · weight`.
//! 6. Every candidate's running score restarts at 1 and is multiplied by each
//!    targeted consideration evaluated against it.
//! 7. The best candidate wins, with [`MOMENTUM_BONUS`] added to the previous
//!    choice for the comparison only (see `TargetList::select_best`).
//! 8. `self · best · weight`.
//!
//! Tracing only changes how much gets evaluated, never the result: running
//! scores at or below epsilon are flushed to 0 in both modes.

use tracing::{debug, warn};

use crate::runtime::RuntimeAction;
use crate::trace::{ScoreTrace, TraceKind};
use crate::AgentContext;

/// Stickiness added to the previously chosen target when picking the best.
pub const MOMENTUM_BONUS: f32 = 0.25;

/// Scores at or below this are treated as zero.
pub const SCORE_EPSILON: f32 = f32::EPSILON;

/// `1 - 1/count`, or 0 for an empty action.
#[inline]
pub fn compensation_factor(count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    1.0 - 1.0 / count as f32
}

/// Boost `score` towards 1 by `factor`.  Fixes 0 and 1.
#[inline]
pub fn compensate(score: f32, factor: f32) -> f32 {
    score + (1.0 - score) * factor * score
}

/// Clamp `raw` into `[min, max]` and rescale to `[0, 1]`.
///
/// An empty or inverted range yields 0.
#[inline]
pub fn normalize(raw: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span.is_nan() || span <= 0.0 {
        return 0.0;
    }
    (raw - min).clamp(0.0, span) / span
}

impl<C: AgentContext> RuntimeAction<C> {
    /// Recompute and store this action's score.
    ///
    /// With `trace` set every consideration is evaluated and logged;
    /// otherwise evaluation short-circuits once a product reaches zero.
    pub fn compute_score(&mut self, ctx: &C, mut trace: Option<&mut ScoreTrace>) -> f32 {
        let tracing = trace.is_some();
        let line = trace
            .as_deref_mut()
            .map(|t| t.push(1, TraceKind::Action, self.identity.name.clone(), None));

        let total = self.considerations.len();
        if total == 0 {
            debug!(action = %self.identity, "no considerations, scoring 0");
            if let (Some(t), Some(l)) = (trace.as_deref_mut(), line) {
                t.set_note(l, "no considerations");
            }
            return self.store_score(0.0, line, trace);
        }
        let factor = compensation_factor(total);

        // ── Self considerations ──────────────────────────────────────────
        let mut self_score = 1.0_f32;
        for &ci in &self.self_idx {
            let c = &mut self.considerations[ci];
            let s = c.score(ctx, None);
            self_score *= compensate(s, factor);
            match trace.as_deref_mut() {
                Some(t) => {
                    t.push(2, TraceKind::Consideration, c.identity.name.clone(), Some(s));
                }
                None if self_score < SCORE_EPSILON => break,
                None => {}
            }
        }
        if self_score < SCORE_EPSILON {
            self_score = 0.0;
        }
        if self_score == 0.0 {
            self.chosen_target = None;
            if tracing {
                for &ci in &self.targeted_idx {
                    self.considerations[ci].set_last_score(0.0);
                }
            }
            return self.store_score(0.0, line, trace);
        }

        // ── Targets ──────────────────────────────────────────────────────
        self.targets.prune(|t| ctx.resolves(t));
        if self.targets.is_empty() {
            self.chosen_target = None;
            if !self.targeted_idx.is_empty() {
                debug!(action = %self.identity, "targeted action has no targets, scoring 0");
                if let (Some(t), Some(l)) = (trace.as_deref_mut(), line) {
                    t.set_note(l, "no targets");
                }
                return self.store_score(0.0, line, trace);
            }
            let score = self_score * self.spec.weight;
            return self.store_score(score, line, trace);
        }
        if tracing && self.targeted_idx.is_empty() {
            warn!(action = %self.identity, "action has targets but no targeted considerations");
        }

        self.targets.reset_scores();
        let per_target = self.targeted_idx.len();
        let mut rows: Vec<f32> = Vec::new();
        for i in 0..self.targets.len() {
            let target = self.targets.candidates()[i];
            if let Some(t) = trace.as_deref_mut() {
                t.target(2, target);
            }
            for &ci in &self.targeted_idx {
                if !tracing && self.targets.scores()[i] <= SCORE_EPSILON {
                    break;
                }
                let c = &mut self.considerations[ci];
                let s = c.score(ctx, Some(target));
                self.targets.multiply(i, compensate(s, factor));
                if let Some(t) = trace.as_deref_mut() {
                    t.push(3, TraceKind::Consideration, c.identity.name.clone(), Some(s));
                    rows.push(s);
                }
            }
        }
        self.targets.flush_below(SCORE_EPSILON);

        let momentum = self.spec.use_momentum.then_some(MOMENTUM_BONUS);
        let Some(best) = self.targets.select_best(self.chosen_target, momentum) else {
            self.chosen_target = None;
            return self.store_score(0.0, line, trace);
        };
        self.chosen_target = Some(self.targets.candidates()[best]);

        // Leave the chosen candidate's values behind for inspection.
        if tracing && per_target > 0 {
            let row = &rows[best * per_target..(best + 1) * per_target];
            for (&ci, &s) in self.targeted_idx.iter().zip(row) {
                self.considerations[ci].set_last_score(s);
            }
        }

        let score = self_score * self.targets.scores()[best] * self.spec.weight;
        self.store_score(score, line, trace)
    }

    fn store_score(&mut self, score: f32, line: Option<usize>, trace: Option<&mut ScoreTrace>) -> f32 {
        let score = score.max(0.0);
        self.score = score;
        if let (Some(t), Some(l)) = (trace, line) {
            t.set_score(l, score);
        }
        score
    }
}
