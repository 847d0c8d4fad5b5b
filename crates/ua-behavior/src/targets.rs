//! Candidate targets of one action.

use ua_core::TargetId;

/// Parallel arrays of candidate targets and their running scores.
///
/// Candidates keep insertion order; the order matters because the best-target
/// scan breaks ties in favor of the most recently added candidate.  The list
/// holds at most `limit` candidates and never holds the same target twice.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetList {
    candidates: Vec<TargetId>,
    scores:     Vec<f32>,
    limit:      usize,
}

impl TargetList {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            candidates: Vec::with_capacity(limit.min(64)),
            scores:     Vec::with_capacity(limit.min(64)),
            limit,
        }
    }

    /// Append a candidate with a running score of 1.
    ///
    /// Returns `false` (and changes nothing) if the list is full or already
    /// holds `target`.
    pub fn add(&mut self, target: TargetId) -> bool {
        if self.candidates.len() >= self.limit || self.contains(target) {
            return false;
        }
        self.candidates.push(target);
        self.scores.push(1.0);
        true
    }

    /// Add every target in order; returns how many were accepted.
    pub fn extend<I: IntoIterator<Item = TargetId>>(&mut self, targets: I) -> usize {
        targets.into_iter().filter(|&t| self.add(t)).count()
    }

    /// Remove `target`; returns whether it was present.
    pub fn remove(&mut self, target: TargetId) -> bool {
        match self.candidates.iter().position(|&t| t == target) {
            Some(i) => {
                self.candidates.remove(i);
                self.scores.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.scores.clear();
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.candidates.contains(&target)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn candidates(&self) -> &[TargetId] {
        &self.candidates
    }

    /// Running scores from the most recent scoring pass, parallel to
    /// [`candidates`](Self::candidates).
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    // ── Scoring internals ────────────────────────────────────────────────────

    /// Drop every candidate for which `keep` returns `false`.
    pub(crate) fn prune(&mut self, mut keep: impl FnMut(TargetId) -> bool) {
        let mut i = 0;
        while i < self.candidates.len() {
            if keep(self.candidates[i]) {
                i += 1;
            } else {
                self.candidates.remove(i);
                self.scores.remove(i);
            }
        }
    }

    pub(crate) fn reset_scores(&mut self) {
        self.scores.iter_mut().for_each(|s| *s = 1.0);
    }

    pub(crate) fn multiply(&mut self, index: usize, factor: f32) {
        self.scores[index] *= factor;
    }

    /// Zero every running score at or below `eps`.
    pub(crate) fn flush_below(&mut self, eps: f32) {
        for s in &mut self.scores {
            if *s <= eps {
                *s = 0.0;
            }
        }
    }

    /// Index of the best candidate.
    ///
    /// When `momentum` is set and `previous` is still a candidate, its running
    /// score is raised by the bonus for the comparison only; the stored score
    /// is restored before returning.  Ties go to the later candidate.
    pub(crate) fn select_best(&mut self, previous: Option<TargetId>, momentum: Option<f32>) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }

        let boosted = match (previous, momentum) {
            (Some(prev), Some(bonus)) => self
                .candidates
                .iter()
                .position(|&t| t == prev)
                .map(|i| {
                    let original = self.scores[i];
                    self.scores[i] += bonus;
                    (i, original)
                }),
            _ => None,
        };

        let mut best = 0;
        let mut max = f32::NEG_INFINITY;
        for (i, &s) in self.scores.iter().enumerate() {
            if s >= max {
                max = s;
                best = i;
            }
        }

        if let Some((i, original)) = boosted {
            self.scores[i] = original;
        }
        Some(best)
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::with_limit(5)
    }
}
