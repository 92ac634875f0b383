//! @acp:module "Bottleneck Selector"
//! @acp:summary "Pick the zone with the highest normalized score, priority tie-break"
//! @acp:domain diagnosis
//! @acp:layer logic

use super::types::*;

/// Pick the zone with the maximum normalized score.
///
/// Ties are exact float equality and go to whichever tied zone comes first
/// in `priority`. If the priority list covers none of the tied zones,
/// the first tied zone in [`Zone::ALL`] order is returned.
///
/// An empty score map yields the first priority zone, or `Zone::ALL[0]`.
pub fn pick_max_zone(norm_scores: &NormScores, priority: &[Zone]) -> Zone {
    let max_val = norm_scores
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let tied: Vec<Zone> = norm_scores
        .iter()
        .filter(|(_, score)| **score == max_val)
        .map(|(zone, _)| *zone)
        .collect();

    if tied.is_empty() {
        return priority.first().copied().unwrap_or(Zone::ALL[0]);
    }

    if let Some(zone) = priority.iter().find(|zone| tied.contains(zone)) {
        return *zone;
    }

    tracing::warn!(
        "Priority order covers none of the tied zones {:?}, using first tied zone",
        tied
    );
    tied[0]
}
