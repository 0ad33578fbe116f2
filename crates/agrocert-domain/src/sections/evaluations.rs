use serde::{Deserialize, Serialize};

/// Evaluación de mitigación de riesgos (0..1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMitigationEvaluation {
    pub risk_mitigation_practices: bool,
    pub contamination_barriers: bool,
    pub tool_storage: bool,
    pub organic_input_storage: bool,
    pub avoids_residue_burning: bool,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Evaluación de poscosecha (0..1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostHarvestEvaluation {
    pub clean_drying_area: bool,
    pub clean_containers: bool,
    pub protected_storage: bool,
    pub separates_conventional: bool,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Evaluación de conocimiento de normas (0..1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEvaluation {
    pub knows_organic_rules: bool,
    pub knows_internal_rules: bool,
    pub attended_training: bool,
    #[serde(default)]
    pub comments: Option<String>,
}
