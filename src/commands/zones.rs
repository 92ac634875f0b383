//! @acp:module "Zones Command"
//! @acp:summary "List the zone table in tie-break order"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::build_engine;
use crate::collector::reachable_scores;
use crate::config::Config;
use crate::diagnosis::{CliOverrides, DiagnosisEngine, Zone};

/// Options for the zones command
#[derive(Debug, Clone, Default)]
pub struct ZonesOptions {
    pub json: bool,
}

/// One row of the zone listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRow {
    pub zone: Zone,
    pub label: String,
    pub rank: usize,
    pub max_score: u32,
    pub reachable: u32,
    pub has_series: bool,
}

/// Execute the zones command
pub fn execute_zones(options: ZonesOptions, config: &Config) -> Result<()> {
    let engine = build_engine(config, &CliOverrides::default())?;
    let rows = zone_rows(&engine);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} (twist threshold {:.2})\n",
        style("Zones by tie-break priority").bold(),
        engine.twist_threshold()
    );
    for row in &rows {
        let status = if row.has_series {
            style("✓").green()
        } else {
            style("⚠ no copy").yellow()
        };
        println!(
            "  {}. {:8} {:28} max={} {}",
            row.rank,
            row.zone.as_str(),
            row.label,
            row.max_score,
            status
        );
    }
    Ok(())
}

/// Rows in priority order, rank starting at 1
pub fn zone_rows(engine: &DiagnosisEngine) -> Vec<ZoneRow> {
    let table = engine.table();
    let reachable = reachable_scores();
    table
        .priority()
        .iter()
        .enumerate()
        .map(|(i, zone)| ZoneRow {
            zone: *zone,
            label: table.label(*zone).to_string(),
            rank: i + 1,
            max_score: table.max_score(*zone),
            reachable: reachable.get(zone).copied().unwrap_or(0),
            has_series: table.get(*zone).series.is_some(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rows_follow_priority() {
        let engine = DiagnosisEngine::builtin().unwrap();
        let zones: Vec<Zone> = zone_rows(&engine).iter().map(|r| r.zone).collect();
        assert_eq!(
            zones,
            vec![Zone::Sales, Zone::Product, Zone::Content, Zone::Traffic, Zone::System]
        );
    }

    #[test]
    fn test_rows_match_question_bank() {
        let engine = DiagnosisEngine::builtin().unwrap();
        for row in zone_rows(&engine) {
            assert_eq!(row.max_score, row.reachable, "zone {}", row.zone);
            assert!(row.has_series);
        }
    }
}
