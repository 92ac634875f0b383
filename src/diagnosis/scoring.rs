//! @acp:module "Diagnosis Scoring"
//! @acp:summary "Normalization, perceived-zone resolution and twist decision"
//! @acp:domain diagnosis
//! @acp:layer logic

use super::selector::pick_max_zone;
use super::table::ZoneTable;
use super::types::*;

/// Divide each raw score by its zone's max score.
///
/// Zones feed from different numbers of questions with different weights,
/// so raw counters are only comparable after this step. Scores above the
/// configured max are clamped to 1.0.
pub fn normalize_scores(raw_scores: &ZoneScores, table: &ZoneTable) -> NormScores {
    raw_scores
        .iter()
        .map(|(zone, raw)| {
            let max = table.max_score(*zone);
            if *raw > max {
                tracing::warn!("Zone '{}' raw score {} exceeds max {}, clamping", zone, raw, max);
            }
            (*zone, (*raw).min(max) as f64 / max as f64)
        })
        .collect()
}

/// The zone the user believes is their problem.
///
/// Explicit self-report wins; otherwise the zone of the strongest complaint.
pub fn resolve_perceived(state: &AnswersState) -> Option<Zone> {
    state
        .perceived_zone
        .or_else(|| state.complaint_best.map(|(zone, _)| zone))
}

/// Whether the result should be framed as a twist.
///
/// Requires a known perceived zone that differs from the bottleneck by at
/// least `threshold` in normalized score (inclusive).
pub fn decide_twist(
    bottleneck: Zone,
    perceived: Option<Zone>,
    norm_scores: &NormScores,
    threshold: f64,
) -> bool {
    let Some(perceived) = perceived else {
        return false;
    };
    if perceived == bottleneck {
        return false;
    }

    let score = |zone: Zone| norm_scores.get(&zone).copied().unwrap_or(0.0);
    score(bottleneck) - score(perceived) >= threshold
}

/// Compute the diagnosis for a finished session
pub fn compute_result(state: &AnswersState, table: &ZoneTable, threshold: f64) -> DiagnosticResult {
    let mut raw_scores = zeroed_scores();
    raw_scores.extend(state.scores.iter().map(|(zone, score)| (*zone, *score)));

    let norm_scores = normalize_scores(&raw_scores, table);
    let bottleneck = pick_max_zone(&norm_scores, table.priority());
    let perceived = resolve_perceived(state);
    let twist = decide_twist(bottleneck, perceived, &norm_scores, threshold);

    tracing::debug!(
        bottleneck = %bottleneck,
        perceived = ?perceived,
        twist,
        "Computed diagnosis"
    );

    DiagnosticResult {
        bottleneck,
        perceived,
        twist,
        norm_scores,
        raw_scores,
    }
}
