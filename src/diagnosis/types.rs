//! @acp:module "Diagnosis Types"
//! @acp:summary "Zones, per-session answer state, content configuration and results"
//! @acp:domain diagnosis
//! @acp:layer types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::QuizError;

/// Raw pain counters per zone
pub type ZoneScores = BTreeMap<Zone, u32>;

/// Normalized scores per zone, each in [0, 1]
pub type NormScores = BTreeMap<Zone, f64>;

/// Business zone diagnosed by the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Product,
    Traffic,
    Content,
    Sales,
    System,
}

impl Zone {
    /// Every zone, in declaration order
    pub const ALL: [Zone; 5] = [
        Zone::Product,
        Zone::Traffic,
        Zone::Content,
        Zone::Sales,
        Zone::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Product => "product",
            Zone::Traffic => "traffic",
            Zone::Content => "content",
            Zone::Sales => "sales",
            Zone::System => "system",
        }
    }

    /// Position in [`Zone::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Zone::Product => 0,
            Zone::Traffic => 1,
            Zone::Content => 2,
            Zone::Sales => 3,
            Zone::System => 4,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Zone {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(Zone::Product),
            "traffic" => Ok(Zone::Traffic),
            "content" => Ok(Zone::Content),
            "sales" => Ok(Zone::Sales),
            "system" => Ok(Zone::System),
            other => Err(QuizError::UnknownZone(other.to_string())),
        }
    }
}

/// Scores with every zone present and zeroed
pub fn zeroed_scores() -> ZoneScores {
    Zone::ALL.iter().map(|zone| (*zone, 0)).collect()
}

/// Answer state accumulated over one quiz session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersState {
    /// Raw pain per zone; only ever incremented
    #[serde(default = "zeroed_scores")]
    pub scores: ZoneScores,

    /// Zone the user explicitly named as their problem
    #[serde(default)]
    pub perceived_zone: Option<Zone>,

    /// Strongest complaint signal seen: (zone, level)
    #[serde(default)]
    pub complaint_best: Option<(Zone, u8)>,
}

impl Default for AnswersState {
    fn default() -> Self {
        Self {
            scores: zeroed_scores(),
            perceived_zone: None,
            complaint_best: None,
        }
    }
}

impl AnswersState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add pain points to a zone
    pub fn add_pain(&mut self, zone: Zone, points: u32) {
        let score = self.scores.entry(zone).or_insert(0);
        *score = score.saturating_add(points);
    }

    /// Keep the complaint if it is strictly stronger than the current best
    pub fn record_complaint(&mut self, zone: Zone, level: u8) {
        if level == 0 {
            return;
        }
        match self.complaint_best {
            Some((_, best)) if best >= level => {}
            _ => self.complaint_best = Some((zone, level)),
        }
    }

    pub fn score(&self, zone: Zone) -> u32 {
        self.scores.get(&zone).copied().unwrap_or(0)
    }
}

/// Global values substituted into result copy and button labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVars {
    /// Display name of the expert behind the funnel
    #[serde(default = "default_expert_name")]
    pub expert_name: String,

    /// Name of the product offered after the diagnosis
    #[serde(default = "default_product")]
    pub product: String,

    /// Code word the user sends to claim the offer
    #[serde(default = "default_code_word")]
    pub code_word: String,
}

impl Default for TemplateVars {
    fn default() -> Self {
        Self {
            expert_name: default_expert_name(),
            product: default_product(),
            code_word: default_code_word(),
        }
    }
}

impl TemplateVars {
    /// Replace only the fields the override sets
    pub fn apply(&mut self, vars: &TemplateVarsOverride) {
        if let Some(ref name) = vars.expert_name {
            self.expert_name = name.clone();
        }
        if let Some(ref product) = vars.product {
            self.product = product.clone();
        }
        if let Some(ref code_word) = vars.code_word {
            self.code_word = code_word.clone();
        }
    }
}

/// Partial template vars from a config or content file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVarsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expert_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_word: Option<String>,
}

fn default_expert_name() -> String {
    "your mentor".to_string()
}

fn default_product() -> String {
    "the X100 strategy session".to_string()
}

fn default_code_word() -> String {
    "X100".to_string()
}

/// Follow-up button as authored in content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonTemplate {
    /// Opaque action identifier
    pub id: String,
    /// Label text, may contain template tokens
    pub text: String,
}

/// Copy and buttons for one bottleneck zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSeries {
    /// Used when the diagnosis confirms what the user believed
    pub confirmation: String,
    /// Used when the real bottleneck differs from the perceived one
    pub twist: String,
    #[serde(default)]
    pub buttons: Vec<ButtonTemplate>,
}

/// Per-zone configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    /// Highest raw score the diagnostic questions can give this zone
    pub max_score: u32,

    /// Tie-break rank, lower wins
    #[serde(default)]
    pub priority_rank: Option<u32>,

    pub label: String,

    /// How users typically phrase a problem in this zone
    #[serde(default)]
    pub complaint: Option<String>,

    #[serde(default)]
    pub series: Option<ResultSeries>,
}

/// Complete engine configuration, as loaded and merged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisConfig {
    #[serde(default = "default_version")]
    pub version: String,

    /// Minimum normalized gap for a twist
    #[serde(default = "default_twist_threshold")]
    pub twist_threshold: f64,

    /// Complaint phrase used when the perceived zone has none
    #[serde(default = "default_fallback_complaint")]
    pub fallback_complaint: String,

    #[serde(default)]
    pub default_vars: TemplateVars,

    pub zones: BTreeMap<Zone, ZoneConfig>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

pub(crate) fn default_twist_threshold() -> f64 {
    0.4
}

fn default_fallback_complaint() -> String {
    "an unclear problem".to_string()
}

/// Partial per-zone override from a project content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverride {
    #[serde(default)]
    pub max_score: Option<u32>,
    #[serde(default)]
    pub priority_rank: Option<u32>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub complaint: Option<String>,
    #[serde(default)]
    pub series: Option<ResultSeries>,
}

/// Project content file layered over the built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisOverrides {
    #[serde(default)]
    pub twist_threshold: Option<f64>,
    #[serde(default)]
    pub fallback_complaint: Option<String>,
    #[serde(default)]
    pub default_vars: Option<TemplateVarsOverride>,
    #[serde(default)]
    pub zones: BTreeMap<Zone, ZoneOverride>,
    /// Zones whose authored copy should be dropped
    #[serde(default)]
    pub disabled_series: Vec<Zone>,
}

/// Outcome of diagnosing one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    /// The real bottleneck
    pub bottleneck: Zone,
    /// What the user believes
    pub perceived: Option<Zone>,
    pub twist: bool,
    pub norm_scores: NormScores,
    pub raw_scores: ZoneScores,
}

/// Button ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedButton {
    pub label: String,
    pub action: String,
}

/// Final message and buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedResult {
    pub text: String,
    pub buttons: Vec<RenderedButton>,
}
