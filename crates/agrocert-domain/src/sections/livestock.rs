use serde::{Deserialize, Serialize};

/// Actividad pecuaria del productor (0..N).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestockActivity {
    pub species: String,
    pub quantity: i32,
    pub management_method: String,
    #[serde(default)]
    pub management_method_other: Option<String>,
    #[serde(default)]
    pub manure_use: Option<String>,
}
