// Similarity ranking. The trait hides the hosted endpoint so ranking logic
// can be exercised against in-process scorers.

pub mod client;

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{MatchError, Result};
use crate::models::{Ranking, SpecialtyMap};

pub use client::{SimilarityClient, BGE_M3_API_URL};

/// Scores a batch of sentences against one source sentence.
///
/// Implementations return exactly one similarity per input sentence, in
/// input order, nominally in `[0, 1]`.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    async fn score(&self, source: &str, sentences: &[String]) -> Result<Vec<f64>>;
}

/// Validates the thesis topic before any parsing or network work.
/// Whitespace-only topics count as empty; the trimmed topic is returned.
pub(crate) fn ensure_topic(topic: &str) -> Result<&str> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(MatchError::InvalidInput(
            "thesis topic must not be empty".to_string(),
        ));
    }
    Ok(topic)
}

/// Ranks every professor in `professors` against `topic`.
///
/// A professor's score is their best specialty similarity as a percentage:
/// `max(similarities) * 100`. Professors with no declared specialties are
/// left out entirely, without a scoring call. Any scoring failure fails the
/// whole ranking; no partial result is returned.
pub async fn rank(
    topic: &str,
    professors: &SpecialtyMap,
    scorer: &dyn SimilarityScorer,
) -> Result<Ranking> {
    let topic = ensure_topic(topic)?;

    let mut scores = BTreeMap::new();
    for (professor, specialties) in professors.iter() {
        if specialties.is_empty() {
            debug!("skipping '{professor}': no declared specialties");
            continue;
        }

        let similarities = scorer.score(topic, specialties).await?;
        if similarities.len() != specialties.len() {
            return Err(MatchError::ScoringRequest {
                status: 200,
                message: format!(
                    "expected {} similarity score(s) for '{professor}', got {}",
                    specialties.len(),
                    similarities.len()
                ),
            });
        }

        // f64::max ignores NaN operands, so a stray NaN cannot win.
        let top = similarities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !top.is_finite() {
            return Err(MatchError::ScoringRequest {
                status: 200,
                message: format!("no finite similarity score for '{professor}'"),
            });
        }
        scores.insert(professor.to_string(), top * 100.0);
    }

    let best = best_set(&scores);
    debug!("ranked {} professor(s), {} tied for best", scores.len(), best.len());
    Ok(Ranking { scores, best })
}

/// Every professor tied for the highest score. Empty iff `scores` is.
fn best_set(scores: &BTreeMap<String, f64>) -> BTreeSet<String> {
    let top = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .filter(|(_, score)| **score == top)
        .map(|(professor, _)| professor.clone())
        .collect()
}
