//! Vista compuesta del agregado (raíz + secciones presentes).
use serde::{Deserialize, Serialize};

use crate::record::InspectionRecord;
use crate::sections::{CorrectiveAction, CropManagementRecord, DocumentationReview, HarvestSale, InspectionFile,
                      KnowledgeEvaluation, LivestockActivity, NonConformity, PlantingPlan, PlotCropDetail,
                      PlotSnapshot, PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};

/// Detalle de cultivo decorado en lectura: nombre del cultivo, bandera de
/// certificable y atributos vigentes de la parcela.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDetailView {
    #[serde(flatten)]
    pub detail: SectionRecord<PlotCropDetail>,
    pub crop_name: String,
    pub principal_certifiable: bool,
    pub plot: Option<PlotSnapshot>,
    pub management: Option<CropManagementRecord>,
}

/// Agregado completo tal como lo devuelven create/replace/load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionAggregate {
    pub record: InspectionRecord,
    pub documentation_review: Option<SectionRecord<DocumentationReview>>,
    pub corrective_actions: Vec<SectionRecord<CorrectiveAction>>,
    pub non_conformities: Vec<SectionRecord<NonConformity>>,
    pub risk_mitigation: Option<SectionRecord<RiskMitigationEvaluation>>,
    pub post_harvest: Option<SectionRecord<PostHarvestEvaluation>>,
    pub knowledge: Option<SectionRecord<KnowledgeEvaluation>>,
    pub livestock: Vec<SectionRecord<LivestockActivity>>,
    pub crop_details: Vec<CropDetailView>,
    pub harvest_sale: Option<SectionRecord<HarvestSale>>,
    pub planting_plans: Vec<SectionRecord<PlantingPlan>>,
    pub files: Vec<SectionRecord<InspectionFile>>,
}

impl InspectionAggregate {
    /// Identificadores de todas las filas hijas (incluye manejos), útil para
    /// verificar la regeneración de ids tras un reemplazo.
    pub fn child_ids(&self) -> Vec<uuid::Uuid> {
        let mut ids = Vec::new();
        ids.extend(self.documentation_review.iter().map(|s| s.id));
        ids.extend(self.corrective_actions.iter().map(|s| s.id));
        ids.extend(self.non_conformities.iter().map(|s| s.id));
        ids.extend(self.risk_mitigation.iter().map(|s| s.id));
        ids.extend(self.post_harvest.iter().map(|s| s.id));
        ids.extend(self.knowledge.iter().map(|s| s.id));
        ids.extend(self.livestock.iter().map(|s| s.id));
        for d in &self.crop_details {
            ids.push(d.detail.id);
            ids.extend(d.management.iter().map(|m| m.id));
        }
        ids.extend(self.harvest_sale.iter().map(|s| s.id));
        ids.extend(self.planting_plans.iter().map(|s| s.id));
        ids.extend(self.files.iter().map(|s| s.id));
        ids
    }
}
