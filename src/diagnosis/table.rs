//! @acp:module "Zone Table"
//! @acp:summary "Validated, read-only per-zone configuration"
//! @acp:domain diagnosis
//! @acp:layer logic

use super::types::*;
use crate::error::{QuizError, Result};

/// Zone configuration that passed validation.
///
/// Every zone has an entry with a non-zero max score, a non-empty label and
/// a unique priority rank, so lookups never fail.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    entries: Vec<ZoneConfig>,
    priority: Vec<Zone>,
}

impl ZoneTable {
    /// Validate a loaded configuration and freeze it
    pub fn from_config(config: &DiagnosisConfig) -> Result<Self> {
        let mut entries = Vec::with_capacity(Zone::ALL.len());
        let mut ranked: Vec<(u32, Zone)> = Vec::with_capacity(Zone::ALL.len());

        for zone in Zone::ALL {
            let entry = config
                .zones
                .get(&zone)
                .ok_or(QuizError::MissingZone(zone))?;

            if entry.max_score == 0 {
                return Err(QuizError::ZeroMaxScore(zone));
            }
            if entry.label.trim().is_empty() {
                return Err(QuizError::EmptyLabel(zone));
            }
            let rank = entry.priority_rank.ok_or(QuizError::MissingPriority(zone))?;
            if let Some((_, other)) = ranked.iter().find(|(r, _)| *r == rank) {
                return Err(QuizError::DuplicatePriority {
                    rank,
                    first: *other,
                    second: zone,
                });
            }
            ranked.push((rank, zone));

            if entry.series.is_none() {
                tracing::warn!("No result copy authored for zone '{}'", zone);
            }
            entries.push(entry.clone());
        }

        ranked.sort_by_key(|(rank, _)| *rank);

        Ok(Self {
            entries,
            priority: ranked.into_iter().map(|(_, zone)| zone).collect(),
        })
    }

    pub fn get(&self, zone: Zone) -> &ZoneConfig {
        &self.entries[zone.index()]
    }

    pub fn max_score(&self, zone: Zone) -> u32 {
        self.get(zone).max_score
    }

    pub fn label(&self, zone: Zone) -> &str {
        &self.get(zone).label
    }

    /// Zones ordered from highest to lowest tie-break priority
    pub fn priority(&self) -> &[Zone] {
        &self.priority
    }

    /// Zones that have no authored result copy
    pub fn missing_series(&self) -> Vec<Zone> {
        Zone::ALL
            .into_iter()
            .filter(|zone| self.get(*zone).series.is_none())
            .collect()
    }

    /// Fail if a configured max is below what the questions can award
    pub fn check_reachable(&self, reachable: &ZoneScores) -> Result<()> {
        for (zone, points) in reachable {
            let max = self.max_score(*zone);
            if *points > max {
                return Err(QuizError::UnreachableMaxScore {
                    zone: *zone,
                    max,
                    reachable: *points,
                });
            }
            if *points < max {
                tracing::warn!(
                    "Zone '{}' max score {} exceeds reachable score {}",
                    zone,
                    max,
                    points
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;

    pub(crate) fn zone_config(max_score: u32, rank: u32, label: &str) -> ZoneConfig {
        ZoneConfig {
            max_score,
            priority_rank: Some(rank),
            label: label.to_string(),
            complaint: None,
            series: None,
        }
    }

    pub(crate) fn test_config() -> DiagnosisConfig {
        let mut zones = BTreeMap::new();
        zones.insert(Zone::Product, zone_config(2, 2, "Product"));
        zones.insert(Zone::Traffic, zone_config(2, 4, "Traffic"));
        zones.insert(Zone::Content, zone_config(2, 3, "Content"));
        zones.insert(Zone::Sales, zone_config(3, 1, "Sales"));
        zones.insert(Zone::System, zone_config(2, 5, "System"));
        DiagnosisConfig {
            version: "1.0.0".to_string(),
            twist_threshold: 0.4,
            fallback_complaint: "an unclear problem".to_string(),
            default_vars: TemplateVars::default(),
            zones,
        }
    }

    #[test]
    fn test_priority_sorted_by_rank() {
        let table = ZoneTable::from_config(&test_config()).unwrap();
        assert_eq!(
            table.priority(),
            &[Zone::Sales, Zone::Product, Zone::Content, Zone::Traffic, Zone::System]
        );
        assert_eq!(table.max_score(Zone::Sales), 3);
        assert_eq!(table.label(Zone::Traffic), "Traffic");
    }

    #[test]
    fn test_zero_max_score_rejected() {
        let mut config = test_config();
        config.zones.get_mut(&Zone::Content).unwrap().max_score = 0;
        let err = ZoneTable::from_config(&config).unwrap_err();
        assert!(matches!(err, QuizError::ZeroMaxScore(Zone::Content)));
    }

    #[test]
    fn test_missing_zone_rejected() {
        let mut config = test_config();
        config.zones.remove(&Zone::System);
        let err = ZoneTable::from_config(&config).unwrap_err();
        assert!(matches!(err, QuizError::MissingZone(Zone::System)));
    }

    #[test]
    fn test_missing_priority_rejected() {
        let mut config = test_config();
        config.zones.get_mut(&Zone::Traffic).unwrap().priority_rank = None;
        let err = ZoneTable::from_config(&config).unwrap_err();
        assert!(matches!(err, QuizError::MissingPriority(Zone::Traffic)));
    }

    #[test]
    fn test_duplicate_priority_rejected() {
        let mut config = test_config();
        config.zones.get_mut(&Zone::System).unwrap().priority_rank = Some(1);
        let err = ZoneTable::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            QuizError::DuplicatePriority { rank: 1, first: Zone::Sales, second: Zone::System }
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut config = test_config();
        config.zones.get_mut(&Zone::Product).unwrap().label = "  ".to_string();
        assert!(matches!(
            ZoneTable::from_config(&config).unwrap_err(),
            QuizError::EmptyLabel(Zone::Product)
        ));
    }

    #[test]
    fn test_missing_series_is_not_an_error() {
        let table = ZoneTable::from_config(&test_config()).unwrap();
        assert_eq!(table.missing_series().len(), 5);
    }

    #[test]
    fn test_check_reachable() {
        let table = ZoneTable::from_config(&test_config()).unwrap();
        let mut reachable = zeroed_scores();
        reachable.insert(Zone::Sales, 3);
        assert!(table.check_reachable(&reachable).is_ok());

        reachable.insert(Zone::Product, 4);
        assert!(matches!(
            table.check_reachable(&reachable).unwrap_err(),
            QuizError::UnreachableMaxScore { zone: Zone::Product, max: 2, reachable: 4 }
        ));
    }
}
