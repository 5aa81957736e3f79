use crate::results::LanguageStats;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Contents of `submission.json`: top-level scalar metrics for a run.
///
/// Every field is optional; older harness versions omit most of them.
/// Passthrough document, unknown keys survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RunStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_pass_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_possible_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_passes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_passes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_violations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_language: Option<BTreeMap<String, LanguageStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harness_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_hash: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
