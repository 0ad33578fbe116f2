use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plan de siembra para la próxima gestión, uno por parcela.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingPlan {
    pub plot_id: Uuid,
    pub crop_type_id: Uuid,
    pub planned_area_ha: f64,
    #[serde(default)]
    pub planned_sowing_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}
