//! Detalle de cultivo por parcela y sub-registro condicional de manejo.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tipo de cultivo del catálogo de referencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropType {
    pub id: Uuid,
    pub name: String,
    /// Cultivo principal certificable: exige registrar el manejo del cultivo
    /// cuando se informa la procedencia de semilla.
    pub principal_certifiable: bool,
}

/// Detalle de cultivo de una parcela en esta inspección. Único por
/// (`plot_id`, `crop_type_id`) dentro de la ficha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotCropDetail {
    pub plot_id: Uuid,
    pub crop_type_id: Uuid,
    pub area_ha: f64,
    pub plot_condition: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Elemento del payload: detalle + datos de manejo opcionales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotCropDetailInput {
    #[serde(flatten)]
    pub detail: PlotCropDetail,
    #[serde(default)]
    pub management: Option<CropManagement>,
}

impl PlotCropDetailInput {
    /// Datos de manejo a persistir si el payload trae procedencia de semilla
    /// (no vacía). Sin procedencia el manejo se descarta sin error.
    pub fn management_with_seed_origin(&self) -> Option<&CropManagement> {
        self.management.as_ref().filter(|m| m.has_seed_origin())
    }
}

/// Manejo del cultivo ("manejo"): semilla, abonamiento, deshierbe y cosecha.
/// Toda elección con opción `other` tiene su campo `*_other` asociado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropManagement {
    pub seed_origin: Option<String>,
    pub seed_origin_other: Option<String>,
    pub seed_category: Option<String>,
    pub seed_treatment: Option<String>,
    pub seed_treatment_other: Option<String>,
    pub fertilization_method: Option<String>,
    pub fertilization_method_other: Option<String>,
    pub weeding_method: Option<String>,
    pub weeding_method_other: Option<String>,
    pub harvest_method: Option<String>,
    pub harvest_method_other: Option<String>,
}

impl CropManagement {
    pub fn has_seed_origin(&self) -> bool {
        self.seed_origin.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Manejo persistido, dueño: un detalle de cultivo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropManagementRecord {
    pub id: Uuid,
    pub crop_detail_id: Uuid,
    #[serde(flatten)]
    pub data: CropManagement,
}
