//! Schema validation for the three on-disk document kinds.
//!
//! The validator walks a parsed `serde_json::Value` and either produces the
//! typed document or a [`SchemaViolations`] error listing every field that
//! failed, not just the first one. Required fields fail when missing or
//! mistyped; optional fields fail only when present with the wrong type.
//! Stats and results documents are passthrough: keys the validator does not
//! know about are kept in the struct's residual map so a newer harness
//! version round-trips unchanged.

use crate::{AgentType, LanguageStats, ModelType, RunMetadata, RunResults, RunStats, TaskResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Which document a value is being validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Metadata,
    Stats,
    Results,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Metadata => "metadata",
            DocumentKind::Stats => "stats",
            DocumentKind::Results => "results",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path to the field, e.g. `results[3].passed`.
    pub field: String,
    pub expected: &'static str,
    /// What was actually there: a JSON type name, `missing`, or the
    /// offending value for enum mismatches.
    pub found: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}`: expected {}, found {}",
            self.field, self.expected, self.found
        )
    }
}

/// Validation failure for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaViolations {
    pub kind: DocumentKind,
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} document failed validation: ", self.kind)?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaViolations {}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accumulates violations while pulling typed fields out of one JSON object.
struct Checker<'a> {
    obj: &'a Map<String, Value>,
    path: String,
    violations: Vec<FieldViolation>,
}

impl<'a> Checker<'a> {
    fn new(obj: &'a Map<String, Value>, path: impl Into<String>) -> Self {
        Self {
            obj,
            path: path.into(),
            violations: Vec::new(),
        }
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn record(&mut self, key: &str, expected: &'static str, found: String) {
        self.violations.push(FieldViolation {
            field: self.field_path(key),
            expected,
            found,
        });
    }

    fn require_string(&mut self, key: &str) -> Option<String> {
        match self.obj.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.record(key, "string", json_type_name(other).to_string());
                None
            }
            None => {
                self.record(key, "string", "missing".to_string());
                None
            }
        }
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.obj.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.record(key, "string", json_type_name(other).to_string());
                None
            }
            None => None,
        }
    }

    fn require_bool(&mut self, key: &str) -> Option<bool> {
        match self.obj.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.record(key, "boolean", json_type_name(other).to_string());
                None
            }
            None => {
                self.record(key, "boolean", "missing".to_string());
                None
            }
        }
    }

    fn optional_bool(&mut self, key: &str) -> Option<bool> {
        match self.obj.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.record(key, "boolean", json_type_name(other).to_string());
                None
            }
            None => None,
        }
    }

    fn require_uint(&mut self, key: &str) -> Option<u64> {
        match self.obj.get(key) {
            Some(Value::Number(n)) if n.as_u64().is_some() => n.as_u64(),
            Some(other) => {
                self.record(key, "non-negative integer", json_type_name(other).to_string());
                None
            }
            None => {
                self.record(key, "non-negative integer", "missing".to_string());
                None
            }
        }
    }

    fn optional_uint(&mut self, key: &str) -> Option<u64> {
        match self.obj.get(key) {
            Some(Value::Number(n)) if n.as_u64().is_some() => n.as_u64(),
            Some(other) => {
                self.record(key, "non-negative integer", json_type_name(other).to_string());
                None
            }
            None => None,
        }
    }

    fn require_float(&mut self, key: &str) -> Option<f64> {
        match self.obj.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => {
                self.record(key, "number", json_type_name(other).to_string());
                None
            }
            None => {
                self.record(key, "number", "missing".to_string());
                None
            }
        }
    }

    fn optional_float(&mut self, key: &str) -> Option<f64> {
        match self.obj.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => {
                self.record(key, "number", json_type_name(other).to_string());
                None
            }
            None => None,
        }
    }

    fn optional_enum<T: Copy>(
        &mut self,
        key: &str,
        parse: fn(&str) -> Option<T>,
        expected: &'static str,
    ) -> Option<T> {
        match self.obj.get(key) {
            Some(Value::String(s)) => match parse(s) {
                Some(v) => Some(v),
                None => {
                    self.record(key, expected, format!("\"{s}\""));
                    None
                }
            },
            Some(other) => {
                self.record(key, expected, json_type_name(other).to_string());
                None
            }
            None => None,
        }
    }

    /// Everything not in `known` survives as the passthrough residual.
    fn residual(&self, known: &[&str]) -> Map<String, Value> {
        self.obj
            .iter()
            .filter(|(k, _)| !known.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

fn as_object<'a>(
    value: &'a Value,
    kind: DocumentKind,
) -> Result<&'a Map<String, Value>, SchemaViolations> {
    value.as_object().ok_or_else(|| SchemaViolations {
        kind,
        violations: vec![FieldViolation {
            field: "$".to_string(),
            expected: "object",
            found: json_type_name(value).to_string(),
        }],
    })
}

fn finish(kind: DocumentKind, violations: Vec<FieldViolation>) -> Result<(), SchemaViolations> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaViolations { kind, violations })
    }
}

/// Validate a `metadata.json` document. Strict on the load-bearing fields,
/// tolerant of unknown keys (ignored, not retained).
pub fn validate_metadata(value: &Value) -> Result<RunMetadata, SchemaViolations> {
    let obj = as_object(value, DocumentKind::Metadata)?;
    let mut c = Checker::new(obj, "");

    let agent_name = c.require_string("Agent Name");
    let agent_version = c.require_string("Agent Version");
    let agent_type = c.optional_enum(
        "Agent Type",
        AgentType::parse,
        "one of \"Open Source\", \"Proprietary\"",
    );
    let agent_url = c.optional_string("Agent URL");
    let model_name = c.require_string("Model Name");
    let variant = c.optional_string("Variant");
    let model_type = c.optional_enum(
        "Model Type",
        ModelType::parse,
        "one of \"Open Source\", \"Open Weight\", \"Proprietary\"",
    );
    let model_provider = c.require_string("Model Provider");
    let access_provider = c.optional_string("Access Provider");
    let run_date = c.require_string("Run Date");
    let mcp_tools_available = c.optional_bool("MCP tools available");
    let verified = c.optional_bool("verified");

    finish(DocumentKind::Metadata, c.into_violations())?;
    Ok(RunMetadata {
        agent_name: agent_name.unwrap_or_default(),
        agent_version: agent_version.unwrap_or_default(),
        agent_type,
        agent_url,
        model_name: model_name.unwrap_or_default(),
        variant,
        model_type,
        model_provider: model_provider.unwrap_or_default(),
        access_provider,
        run_date: run_date.unwrap_or_default(),
        mcp_tools_available,
        verified,
    })
}

fn check_language_stats(
    value: &Value,
    path: &str,
    out: &mut Vec<FieldViolation>,
) -> Option<LanguageStats> {
    let Some(obj) = value.as_object() else {
        out.push(FieldViolation {
            field: path.to_string(),
            expected: "object",
            found: json_type_name(value).to_string(),
        });
        return None;
    };
    let mut c = Checker::new(obj, path);
    let passed = c.require_uint("passed");
    let failed = c.require_uint("failed");
    let total = c.require_uint("total");
    let pass_rate = c.require_float("pass_rate");
    let extra = c.residual(&["passed", "failed", "total", "pass_rate"]);
    let violations = c.into_violations();
    if !violations.is_empty() {
        out.extend(violations);
        return None;
    }
    Some(LanguageStats {
        passed: passed.unwrap_or_default(),
        failed: failed.unwrap_or_default(),
        total: total.unwrap_or_default(),
        pass_rate: pass_rate.unwrap_or_default(),
        extra,
    })
}

fn check_stats_map(
    value: &Value,
    path: &str,
    out: &mut Vec<FieldViolation>,
) -> Option<BTreeMap<String, LanguageStats>> {
    let Some(obj) = value.as_object() else {
        out.push(FieldViolation {
            field: path.to_string(),
            expected: "object",
            found: json_type_name(value).to_string(),
        });
        return None;
    };
    let mut map = BTreeMap::new();
    for (key, entry) in obj {
        if let Some(stats) = check_language_stats(entry, &format!("{path}.{key}"), out) {
            map.insert(key.clone(), stats);
        }
    }
    Some(map)
}

fn check_task_result(
    value: &Value,
    path: &str,
    out: &mut Vec<FieldViolation>,
) -> Option<TaskResult> {
    let Some(obj) = value.as_object() else {
        out.push(FieldViolation {
            field: path.to_string(),
            expected: "object",
            found: json_type_name(value).to_string(),
        });
        return None;
    };
    let mut c = Checker::new(obj, path);
    let task = c.require_string("task");
    let language = c.require_string("language");
    let tier = c.require_string("tier");
    let difficulty = c.require_string("difficulty");
    let passed = c.require_bool("passed");
    let status = c.optional_string("status");
    let attempts = c.require_uint("attempts");
    let duration_seconds = c.optional_float("duration_seconds");
    let agent_duration_seconds = c.optional_float("agent_duration_seconds");
    let validation_duration_seconds = c.optional_float("validation_duration_seconds");
    let prompt_chars = c.optional_uint("prompt_chars");
    let weight = c.optional_float("weight");
    let weighted_score = c.optional_float("weighted_score");
    let violations = c.into_violations();
    if !violations.is_empty() {
        out.extend(violations);
        return None;
    }
    Some(TaskResult {
        task: task.unwrap_or_default(),
        language: language.unwrap_or_default(),
        tier: tier.unwrap_or_default(),
        difficulty: difficulty.unwrap_or_default(),
        passed: passed.unwrap_or_default(),
        status,
        attempts: attempts.unwrap_or_default() as u32,
        duration_seconds,
        agent_duration_seconds,
        validation_duration_seconds,
        prompt_chars,
        weight,
        weighted_score,
    })
}

const RESULTS_KEYS: &[&str] = &["results", "by_tier", "by_difficulty", "by_language"];

/// Validate a `summary.json` document.
pub fn validate_results(value: &Value) -> Result<RunResults, SchemaViolations> {
    let obj = as_object(value, DocumentKind::Results)?;
    let mut violations = Vec::new();

    let results = match obj.get("results") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                check_task_result(item, &format!("results[{i}]"), &mut violations)
            })
            .collect(),
        Some(other) => {
            violations.push(FieldViolation {
                field: "results".to_string(),
                expected: "array",
                found: json_type_name(other).to_string(),
            });
            Vec::new()
        }
        None => {
            violations.push(FieldViolation {
                field: "results".to_string(),
                expected: "array",
                found: "missing".to_string(),
            });
            Vec::new()
        }
    };

    let mut breakdown = |key: &str| -> Option<BTreeMap<String, LanguageStats>> {
        obj.get(key)
            .and_then(|v| check_stats_map(v, key, &mut violations))
    };
    let by_tier = breakdown("by_tier");
    let by_difficulty = breakdown("by_difficulty");
    let by_language = breakdown("by_language");

    let extra = obj
        .iter()
        .filter(|(k, _)| !RESULTS_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    finish(DocumentKind::Results, violations)?;
    Ok(RunResults {
        results,
        by_tier,
        by_difficulty,
        by_language,
        extra,
    })
}

const STATS_KEYS: &[&str] = &[
    "agent",
    "model",
    "timestamp",
    "pass_rate",
    "weighted_pass_rate",
    "passed",
    "failed",
    "total",
    "weighted_score",
    "max_possible_score",
    "clean_passes",
    "partial_passes",
    "integrity_violations",
    "by_language",
    "total_duration_seconds",
    "agent_duration_seconds",
    "harness_version",
    "weight_version",
    "tasks_hash",
    "results_hash",
];

/// Validate a `submission.json` document. Every field is optional.
pub fn validate_stats(value: &Value) -> Result<RunStats, SchemaViolations> {
    let obj = as_object(value, DocumentKind::Stats)?;
    let mut c = Checker::new(obj, "");

    let agent = c.optional_string("agent");
    let model = c.optional_string("model");
    let timestamp = c.optional_string("timestamp");
    let pass_rate = c.optional_float("pass_rate");
    let weighted_pass_rate = c.optional_float("weighted_pass_rate");
    let passed = c.optional_uint("passed");
    let failed = c.optional_uint("failed");
    let total = c.optional_uint("total");
    let weighted_score = c.optional_float("weighted_score");
    let max_possible_score = c.optional_float("max_possible_score");
    let clean_passes = c.optional_uint("clean_passes");
    let partial_passes = c.optional_uint("partial_passes");
    let integrity_violations = c.optional_uint("integrity_violations");
    let total_duration_seconds = c.optional_float("total_duration_seconds");
    let agent_duration_seconds = c.optional_float("agent_duration_seconds");
    let harness_version = c.optional_string("harness_version");
    let weight_version = c.optional_string("weight_version");
    let tasks_hash = c.optional_string("tasks_hash");
    let results_hash = c.optional_string("results_hash");
    let extra = c.residual(STATS_KEYS);
    let mut violations = c.into_violations();

    let by_language = obj
        .get("by_language")
        .and_then(|v| check_stats_map(v, "by_language", &mut violations));

    finish(DocumentKind::Stats, violations)?;
    Ok(RunStats {
        agent,
        model,
        timestamp,
        pass_rate,
        weighted_pass_rate,
        passed,
        failed,
        total,
        weighted_score,
        max_possible_score,
        clean_passes,
        partial_passes,
        integrity_violations,
        by_language,
        total_duration_seconds,
        agent_duration_seconds,
        harness_version,
        weight_version,
        tasks_hash,
        results_hash,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_metadata() -> Value {
        json!({
            "Agent Name": "Amp Code CLI",
            "Agent Version": "1.4.2",
            "Agent Type": "Proprietary",
            "Agent URL": "https://ampcode.com",
            "Model Name": "claude-sonnet",
            "Variant": "thinking",
            "Model Type": "Proprietary",
            "Model Provider": "Anthropic",
            "Access Provider": "direct",
            "Run Date": "2026-01-13",
            "MCP tools available": true,
            "verified": true
        })
    }

    #[test]
    fn metadata_accepts_full_document() {
        let metadata = validate_metadata(&full_metadata()).unwrap();
        assert_eq!(metadata.agent_name, "Amp Code CLI");
        assert_eq!(metadata.agent_type, Some(AgentType::Proprietary));
        assert_eq!(metadata.model_type, Some(ModelType::Proprietary));
        assert!(metadata.is_verified());
    }

    #[test]
    fn metadata_accepts_minimal_document() {
        let doc = json!({
            "Agent Name": "Kimi CLI",
            "Agent Version": "0.9",
            "Model Name": "kimi-k2",
            "Model Provider": "Moonshot",
            "Run Date": "2026-01-09"
        });
        let metadata = validate_metadata(&doc).unwrap();
        assert!(!metadata.is_verified());
        assert!(metadata.agent_type.is_none());
    }

    #[test]
    fn metadata_enumerates_every_missing_required_field() {
        let doc = json!({ "Agent Version": "1.0", "Run Date": 20260113 });
        let err = validate_metadata(&doc).unwrap_err();
        assert_eq!(err.kind, DocumentKind::Metadata);
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"Agent Name"));
        assert!(fields.contains(&"Model Name"));
        assert!(fields.contains(&"Model Provider"));
        assert!(fields.contains(&"Run Date"));
        // Mistyped required field reports the found type.
        let date = err
            .violations
            .iter()
            .find(|v| v.field == "Run Date")
            .unwrap();
        assert_eq!(date.found, "integer");
    }

    #[test]
    fn metadata_rejects_unknown_enum_value() {
        let mut doc = full_metadata();
        doc["Agent Type"] = json!("Freeware");
        let err = validate_metadata(&doc).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "Agent Type");
        assert_eq!(err.violations[0].found, "\"Freeware\"");
    }

    #[test]
    fn metadata_ignores_unknown_keys() {
        let mut doc = full_metadata();
        doc["Something New"] = json!("ignored");
        assert!(validate_metadata(&doc).is_ok());
    }

    #[test]
    fn non_object_document_is_rejected_at_the_root() {
        let err = validate_metadata(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.violations[0].field, "$");
        assert_eq!(err.violations[0].found, "array");
    }

    #[test]
    fn stats_keeps_unknown_fields_through_a_round_trip() {
        let doc = json!({
            "weighted_score": 16.8,
            "pass_rate": 0.62,
            "future_metric": {"a": 1},
            "by_language": {
                "Python": {"passed": 5, "failed": 1, "total": 6, "pass_rate": 0.833, "median_attempts": 2}
            }
        });
        let stats = validate_stats(&doc).unwrap();
        assert_eq!(stats.weighted_score, Some(16.8));
        assert_eq!(stats.extra["future_metric"], json!({"a": 1}));
        let python = &stats.by_language.as_ref().unwrap()["Python"];
        assert_eq!(python.extra["median_attempts"], json!(2));

        let emitted = serde_json::to_value(&stats).unwrap();
        assert_eq!(emitted["future_metric"], json!({"a": 1}));
        assert_eq!(emitted["by_language"]["Python"]["median_attempts"], json!(2));
    }

    #[test]
    fn stats_rejects_mistyped_known_field() {
        let doc = json!({ "passed": "14" });
        let err = validate_stats(&doc).unwrap_err();
        assert_eq!(err.kind, DocumentKind::Stats);
        assert_eq!(err.violations[0].field, "passed");
        assert_eq!(err.violations[0].found, "string");
    }

    #[test]
    fn results_reports_task_violations_with_index_paths() {
        let doc = json!({
            "results": [
                {"task": "t1", "language": "Rust", "tier": "core", "difficulty": "easy",
                 "passed": true, "attempts": 1},
                {"task": "t2", "language": "Go", "tier": "core", "difficulty": "easy",
                 "passed": "yes", "attempts": 1.5}
            ]
        });
        let err = validate_results(&doc).unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"results[1].passed"));
        assert!(fields.contains(&"results[1].attempts"));
        assert!(!fields.iter().any(|f| f.starts_with("results[0]")));
    }

    #[test]
    fn results_with_empty_task_list_is_valid() {
        let results = validate_results(&json!({ "results": [] })).unwrap();
        assert!(results.results.is_empty());
        assert!(results.by_language.is_none());
    }

    #[test]
    fn results_requires_the_results_array() {
        let err = validate_results(&json!({ "by_tier": {} })).unwrap_err();
        assert_eq!(err.violations[0].field, "results");
        assert_eq!(err.violations[0].found, "missing");
    }

    #[test]
    fn breakdown_entries_are_validated_per_key() {
        let doc = json!({
            "results": [],
            "by_language": {
                "Python": {"passed": 1, "failed": 0, "total": 1, "pass_rate": 1.0},
                "Go": {"passed": 1, "failed": 0, "total": 1}
            }
        });
        let err = validate_results(&doc).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "by_language.Go.pass_rate");
        assert_eq!(err.violations[0].found, "missing");
    }

    #[test]
    fn violation_display_names_kind_and_fields() {
        let err = validate_metadata(&json!({})).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("metadata document failed validation"));
        assert!(text.contains("`Agent Name`: expected string, found missing"));
    }
}
