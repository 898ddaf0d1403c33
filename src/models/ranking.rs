use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Outcome of ranking professors against a thesis topic.
///
/// Scores are percentages in `[0, 100]`, one per professor that had at
/// least one declared specialty. `best` holds every professor tied for the
/// top score and is empty exactly when `scores` is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub scores: BTreeMap<String, f64>,
    pub best: BTreeSet<String>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The score shared by the professors in `best`, if any were ranked.
    pub fn top_score(&self) -> Option<f64> {
        self.best
            .iter()
            .next()
            .and_then(|professor| self.scores.get(professor))
            .copied()
    }
}
