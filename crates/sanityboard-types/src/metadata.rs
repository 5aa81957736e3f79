use serde::{Deserialize, Serialize};

/// Static facts about who produced a run.
///
/// Written once by the external harness at ingestion time; read-only here.
/// The on-disk keys are fixed by the harness and contain spaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMetadata {
    #[serde(rename = "Agent Name")]
    pub agent_name: String,
    #[serde(rename = "Agent Version")]
    pub agent_version: String,
    #[serde(rename = "Agent Type", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
    #[serde(rename = "Agent URL", skip_serializing_if = "Option::is_none")]
    pub agent_url: Option<String>,
    #[serde(rename = "Model Name")]
    pub model_name: String,
    #[serde(rename = "Variant", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(rename = "Model Type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<ModelType>,
    #[serde(rename = "Model Provider")]
    pub model_provider: String,
    #[serde(rename = "Access Provider", skip_serializing_if = "Option::is_none")]
    pub access_provider: Option<String>,
    /// Run date as written by the harness; parsing happens at sort time.
    #[serde(rename = "Run Date")]
    pub run_date: String,
    #[serde(rename = "MCP tools available", skip_serializing_if = "Option::is_none")]
    pub mcp_tools_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl RunMetadata {
    /// A run without an explicit `verified` flag is a community submission.
    pub fn is_verified(&self) -> bool {
        self.verified.unwrap_or(false)
    }

    /// MCP tool availability, with absence counting as "no".
    pub fn has_mcp_tools(&self) -> bool {
        self.mcp_tools_available.unwrap_or(false)
    }
}

/// Licensing category of the agent under evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgentType {
    #[serde(rename = "Open Source")]
    OpenSource,
    Proprietary,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::OpenSource => "Open Source",
            AgentType::Proprietary => "Proprietary",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Open Source" => Some(AgentType::OpenSource),
            "Proprietary" => Some(AgentType::Proprietary),
            _ => None,
        }
    }
}

/// Licensing category of the model behind the agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelType {
    #[serde(rename = "Open Source")]
    OpenSource,
    #[serde(rename = "Open Weight")]
    OpenWeight,
    Proprietary,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::OpenSource => "Open Source",
            ModelType::OpenWeight => "Open Weight",
            ModelType::Proprietary => "Proprietary",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Open Source" => Some(ModelType::OpenSource),
            "Open Weight" => Some(ModelType::OpenWeight),
            "Proprietary" => Some(ModelType::Proprietary),
            _ => None,
        }
    }
}
