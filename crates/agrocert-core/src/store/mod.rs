//! Contratos de almacenamiento del agregado.
//!
//! - `ReferenceLookup`: consulta de catálogo usada a mitad de transacción.
//! - `AggregateTx`: manejador transaccional; todas las escrituras de una
//!   operación pasan por él y se serializan.
//! - `AggregateReader`: lecturas independientes por sección (sin transacción),
//!   aptas para ejecutarse en paralelo.
//! - `AggregateStore`: abre transacciones todo-o-nada y borra fichas.
//!
//! Backends: `memory::InMemoryAggregateStore` (tests/prototipos) y el backend
//! Postgres de `agrocert-persistence`, con paridad de restricciones.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use agrocert_domain::{CorrectiveAction, CropDetailView, CropManagementRecord, DocumentationReview, HarvestSale,
                      InspectionFile, InspectionRecord, InspectionRecordInput, KnowledgeEvaluation,
                      LivestockActivity, NonConformity, PlantingPlan, PlotCropDetail, PlotUpdate,
                      PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};

use crate::errors::AggregateError;

pub mod memory;

pub use memory::InMemoryAggregateStore;

pub type StoreResult<T> = Result<T, AggregateError>;

/// Catálogo de tipos de cultivo.
pub trait ReferenceLookup {
    /// `true` si el tipo de cultivo es principal certificable. Un tipo
    /// inexistente se considera no certificable.
    fn is_certifiable(&mut self, crop_type_id: Uuid) -> StoreResult<bool>;
}

/// Manejador transaccional. Las filas de listas reciben `position` (orden
/// del payload) para que el lector las devuelva en el mismo orden.
pub trait AggregateTx: ReferenceLookup {
    /// Inserta la raíz. Una violación de unicidad (productor, gestión) se
    /// reporta como `DuplicateAggregate`.
    fn insert_record(&mut self, record: &InspectionRecord) -> StoreResult<()>;
    /// Actualiza los campos editables de la raíz; `false` si no existe.
    fn update_record(&mut self, id: Uuid, input: &InspectionRecordInput, now: DateTime<Utc>) -> StoreResult<bool>;
    /// Borra todas las filas hijas de la ficha (los manejos caen con sus
    /// detalles de cultivo).
    fn delete_children(&mut self, record_id: Uuid) -> StoreResult<()>;

    fn insert_documentation_review(&mut self, row: &SectionRecord<DocumentationReview>) -> StoreResult<()>;
    fn insert_corrective_action(&mut self, row: &SectionRecord<CorrectiveAction>, position: i32) -> StoreResult<()>;
    fn insert_non_conformity(&mut self, row: &SectionRecord<NonConformity>, position: i32) -> StoreResult<()>;
    fn insert_risk_mitigation(&mut self, row: &SectionRecord<RiskMitigationEvaluation>) -> StoreResult<()>;
    fn insert_post_harvest(&mut self, row: &SectionRecord<PostHarvestEvaluation>) -> StoreResult<()>;
    fn insert_knowledge(&mut self, row: &SectionRecord<KnowledgeEvaluation>) -> StoreResult<()>;
    fn insert_livestock(&mut self, row: &SectionRecord<LivestockActivity>, position: i32) -> StoreResult<()>;
    fn insert_crop_detail(&mut self, row: &SectionRecord<PlotCropDetail>, position: i32) -> StoreResult<()>;
    fn insert_crop_management(&mut self, row: &CropManagementRecord) -> StoreResult<()>;
    fn insert_harvest_sale(&mut self, row: &SectionRecord<HarvestSale>) -> StoreResult<()>;
    fn insert_planting_plan(&mut self, row: &SectionRecord<PlantingPlan>, position: i32) -> StoreResult<()>;
    fn insert_file(&mut self, row: &SectionRecord<InspectionFile>, position: i32) -> StoreResult<()>;

    /// Actualización parcial de una parcela activa (sólo campos informados).
    /// `false` si la parcela no existe o está inactiva.
    fn apply_plot_update(&mut self, update: &PlotUpdate, now: DateTime<Utc>) -> StoreResult<bool>;
}

/// Lecturas por sección. Cada método es independiente y de sólo lectura.
pub trait AggregateReader: Sync {
    fn find_record(&self, id: Uuid) -> StoreResult<Option<InspectionRecord>>;
    fn find_record_by_producer_cycle(&self, producer_code: &str, cycle_year: i32)
                                     -> StoreResult<Option<InspectionRecord>>;

    fn documentation_review(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<DocumentationReview>>>;
    /// Ordenadas por `sequence` y luego por posición.
    fn corrective_actions(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<CorrectiveAction>>>;
    fn non_conformities(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<NonConformity>>>;
    fn risk_mitigation(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<RiskMitigationEvaluation>>>;
    fn post_harvest(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<PostHarvestEvaluation>>>;
    fn knowledge(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<KnowledgeEvaluation>>>;
    fn livestock(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<LivestockActivity>>>;
    /// Detalles con join a tipo de cultivo, parcela y manejo.
    fn crop_details(&self, record_id: Uuid) -> StoreResult<Vec<CropDetailView>>;
    fn harvest_sale(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<HarvestSale>>>;
    fn planting_plans(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<PlantingPlan>>>;
    fn files(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<InspectionFile>>>;
}

/// Almacén transaccional del agregado.
pub trait AggregateStore: AggregateReader + Send {
    /// Ejecuta `work` dentro de una transacción. `Ok` confirma; cualquier
    /// `Err` revierte todo y se devuelve tal cual.
    fn transaction<T, F>(&self, work: F) -> StoreResult<T>
        where F: FnOnce(&mut dyn AggregateTx) -> StoreResult<T>;

    /// Borrado físico de la ficha con cascada a sus hijos. `false` si no
    /// existía.
    fn delete_record(&self, id: Uuid) -> StoreResult<bool>;
}
