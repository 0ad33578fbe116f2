//! Secciones hijas de la ficha.
//!
//! Cada sección se modela con su tipo de datos (lo que envía el llamador) y,
//! una vez persistida, se envuelve en `SectionRecord<T>` que añade el
//! identificador propio y el de la ficha dueña.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod crops;
mod documentation;
mod evaluations;
mod files;
mod findings;
mod harvest;
mod livestock;
mod planting;
mod plots;

pub use crops::{CropManagement, CropManagementRecord, CropType, PlotCropDetail, PlotCropDetailInput};
pub use documentation::DocumentationReview;
pub use evaluations::{KnowledgeEvaluation, PostHarvestEvaluation, RiskMitigationEvaluation};
pub use files::InspectionFile;
pub use findings::{CorrectiveAction, NonConformity};
pub use harvest::HarvestSale;
pub use livestock::LivestockActivity;
pub use planting::PlantingPlan;
pub use plots::{Plot, PlotSnapshot, PlotUpdate};

/// Fila persistida de una sección: datos + identidad + ficha dueña.
///
/// Los identificadores se regeneran en cada reemplazo del agregado; no deben
/// cachearse entre llamadas a `replace_aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord<T> {
    pub id: Uuid,
    pub record_id: Uuid,
    #[serde(flatten)]
    pub data: T,
}

impl<T> SectionRecord<T> {
    pub fn new(id: Uuid, record_id: Uuid, data: T) -> Self {
        Self { id, record_id, data }
    }
}

/// Payload de secciones para create/replace.
///
/// Reemplazo completo: toda sección que deba conservarse se reenvía. Las
/// secciones ausentes (`None` / lista vacía) simplemente no se escriben.
/// `harvest_sales` debe contener exactamente un elemento.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateSections {
    pub documentation_review: Option<DocumentationReview>,
    pub corrective_actions: Vec<CorrectiveAction>,
    pub non_conformities: Vec<NonConformity>,
    pub risk_mitigation: Option<RiskMitigationEvaluation>,
    pub post_harvest: Option<PostHarvestEvaluation>,
    pub knowledge: Option<KnowledgeEvaluation>,
    pub livestock: Vec<LivestockActivity>,
    pub crop_details: Vec<PlotCropDetailInput>,
    pub harvest_sales: Vec<HarvestSale>,
    pub planting_plans: Vec<PlantingPlan>,
    pub files: Vec<InspectionFile>,
    pub plot_updates: Vec<PlotUpdate>,
}
