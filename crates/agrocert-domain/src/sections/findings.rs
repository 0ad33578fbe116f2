use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Acción correctiva (0..N), ordenada por `sequence` (asignado por el
/// llamador, único dentro de la ficha).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectiveAction {
    pub sequence: i32,
    pub description: String,
    #[serde(default)]
    pub implementation: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// No conformidad detectada (0..N) con plazo de subsanación y estado de
/// seguimiento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonConformity {
    pub description: String,
    #[serde(default)]
    pub proposed_action: Option<String>,
    pub deadline: NaiveDate,
    pub follow_up_status: String,
    #[serde(default)]
    pub follow_up_notes: Option<String>,
}
