//! Action selection policies.
//!
//! # Policies
//!
//! | Algorithm                        | Rule                                                    |
//! |----------------------------------|---------------------------------------------------------|
//! | `HighestScore`                   | highest score wins; ties go to the first declared       |
//! | `HighestScoreWithPriority`       | best (priority, score) candidate, gated against current |
//! | `RandomTopN*`, `WeightedRandom*` | not supported; configuring one is an error              |
//!
//! Priority gating: the candidate is the highest-priority action with a
//! positive score (highest score within that priority, first declared on
//! ties).  It replaces the current action when its priority is strictly
//! higher, or when priorities are equal and it outscores the current action
//! by more than `interruption_delta_threshold`.  With no current action any
//! candidate is accepted.

use crate::{BrainError, BrainResult, FlatActionList};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionAlgorithm {
    #[default]
    HighestScore,
    HighestScoreWithPriority,
    RandomTopN,
    RandomTopNWithPriority,
    WeightedRandomTopN,
    WeightedRandomTopNWithPriority,
}

impl SelectionAlgorithm {
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            SelectionAlgorithm::HighestScore | SelectionAlgorithm::HighestScoreWithPriority
        )
    }

    pub(crate) fn ensure_supported(self, top_n: usize) -> BrainResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(BrainError::UnsupportedSelection { algorithm: self, top_n })
        }
    }
}

/// Pick the row that should be current after a think pass.
///
/// `current` is the row of the current action, if any.  `None` means "keep
/// whatever is current" (possibly nothing).
pub(crate) fn select(
    algorithm: SelectionAlgorithm,
    flat:      &FlatActionList,
    current:   Option<usize>,
    delta:     f32,
    top_n:     usize,
) -> BrainResult<Option<usize>> {
    match algorithm {
        SelectionAlgorithm::HighestScore => Ok(highest_score(&flat.scores)),
        SelectionAlgorithm::HighestScoreWithPriority => {
            Ok(highest_with_priority(flat, current, delta))
        }
        other => Err(BrainError::UnsupportedSelection { algorithm: other, top_n }),
    }
}

fn highest_score(scores: &[f32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some(b) if s <= scores[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

fn highest_with_priority(flat: &FlatActionList, current: Option<usize>, delta: f32) -> Option<usize> {
    let mut candidate: Option<usize> = None;
    for i in 0..flat.len() {
        if flat.scores[i] <= 0.0 {
            continue;
        }
        let better = match candidate {
            None => true,
            Some(c) => {
                flat.priorities[i] > flat.priorities[c]
                    || (flat.priorities[i] == flat.priorities[c] && flat.scores[i] > flat.scores[c])
            }
        };
        if better {
            candidate = Some(i);
        }
    }

    let Some(cand) = candidate else {
        return current;
    };
    let Some(cur) = current else {
        return Some(cand);
    };
    if cand == cur {
        return Some(cur);
    }
    let (cand_pri, cur_pri) = (flat.priorities[cand], flat.priorities[cur]);
    let replace = cand_pri > cur_pri
        || (cand_pri == cur_pri && flat.scores[cand] - flat.scores[cur] > delta);
    Some(if replace { cand } else { cur })
}
