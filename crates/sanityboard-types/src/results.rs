use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Outcome of one benchmark task within a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskResult {
    pub task: String,
    pub language: String,
    pub tier: String,
    pub difficulty: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_chars: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
}

/// Aggregate pass/fail counters, reused for per-language, per-tier and
/// per-difficulty breakdowns.
///
/// The harness adds fields across versions, so unknown keys are kept in
/// `extra` and re-emitted on serialization rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LanguageStats {
    pub passed: u64,
    pub failed: u64,
    pub total: u64,
    pub pass_rate: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of `summary.json`: the full task list plus optional category
/// breakdowns. Passthrough document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RunResults {
    pub results: Vec<TaskResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_tier: Option<BTreeMap<String, LanguageStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_difficulty: Option<BTreeMap<String, LanguageStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_language: Option<BTreeMap<String, LanguageStats>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
