//! agrocert-domain
//!
//! Entidades de la ficha de inspección (raíz + secciones hijas), los payloads
//! que recibe el motor de persistencia y el validador de reglas de negocio.
//!
//! Módulos:
//! - `record`: ficha raíz (`InspectionRecord`) y su payload de entrada.
//! - `sections`: secciones hijas, sub-registro condicional de manejo y
//!   actualizaciones de parcela.
//! - `view`: vista compuesta del agregado (`InspectionAggregate`).
//! - `validation`: funciones puras de validación por entidad.
pub mod record;
pub mod sections;
pub mod validation;
pub mod view;

pub use record::{InspectionRecord, InspectionRecordInput};
pub use sections::{AggregateSections, CorrectiveAction, CropManagement, CropManagementRecord, CropType,
                   DocumentationReview, HarvestSale, InspectionFile, KnowledgeEvaluation, LivestockActivity,
                   NonConformity, PlantingPlan, Plot, PlotCropDetail, PlotCropDetailInput, PlotSnapshot,
                   PlotUpdate, PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};
pub use validation::ValidationReport;
pub use view::{CropDetailView, InspectionAggregate};
