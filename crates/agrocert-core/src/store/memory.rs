//! Backend en memoria con paridad de restricciones respecto a Postgres.
//!
//! Una transacción trabaja sobre una copia de las tablas tomada bajo el
//! lock de escritura; sólo si el trabajo termina en `Ok` la copia reemplaza
//! al estado visible. Los escritores quedan serializados por el lock y los
//! lectores nunca observan una escritura a medias.
//!
//! Restricciones replicadas: unicidad (productor, gestión), secciones 0..1
//! únicas por ficha, claves foráneas a ficha / parcela / tipo de cultivo,
//! (ficha, parcela, cultivo) único en detalles y (ficha, parcela) único en
//! planes de siembra.
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use agrocert_domain::{CorrectiveAction, CropDetailView, CropManagementRecord, CropType, DocumentationReview,
                      HarvestSale, InspectionFile, InspectionRecord, InspectionRecordInput, KnowledgeEvaluation,
                      LivestockActivity, NonConformity, PlantingPlan, Plot, PlotCropDetail, PlotUpdate,
                      PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};

use super::{AggregateReader, AggregateStore, AggregateTx, ReferenceLookup, StoreResult};
use crate::errors::AggregateError;

#[derive(Debug, Clone, Default)]
struct Tables {
    crop_types: HashMap<Uuid, CropType>,
    plots: HashMap<Uuid, Plot>,
    records: HashMap<Uuid, InspectionRecord>,
    documentation_reviews: Vec<SectionRecord<DocumentationReview>>,
    corrective_actions: Vec<SectionRecord<CorrectiveAction>>,
    non_conformities: Vec<SectionRecord<NonConformity>>,
    risk_mitigations: Vec<SectionRecord<RiskMitigationEvaluation>>,
    post_harvests: Vec<SectionRecord<PostHarvestEvaluation>>,
    knowledge_evaluations: Vec<SectionRecord<KnowledgeEvaluation>>,
    livestock: Vec<SectionRecord<LivestockActivity>>,
    crop_details: Vec<SectionRecord<PlotCropDetail>>,
    crop_managements: Vec<CropManagementRecord>,
    harvest_sales: Vec<SectionRecord<HarvestSale>>,
    planting_plans: Vec<SectionRecord<PlantingPlan>>,
    files: Vec<SectionRecord<InspectionFile>>,
}

fn unique_violation(table: &str, detail: impl std::fmt::Display) -> AggregateError {
    AggregateError::Store(format!("unique violation: {table} ({detail})"))
}

fn fk_violation(table: &str, column: &str, id: Uuid) -> AggregateError {
    AggregateError::Store(format!("foreign key violation: {table}.{column} = {id}"))
}

fn push_single<T: Clone>(rows: &mut Vec<SectionRecord<T>>, row: &SectionRecord<T>, table: &str) -> StoreResult<()> {
    if rows.iter().any(|r| r.record_id == row.record_id) {
        return Err(unique_violation(table, format!("record_id = {}", row.record_id)));
    }
    rows.push(row.clone());
    Ok(())
}

fn single_of<T: Clone>(rows: &[SectionRecord<T>], record_id: Uuid) -> Option<SectionRecord<T>> {
    rows.iter().find(|r| r.record_id == record_id).cloned()
}

fn all_of<T: Clone>(rows: &[SectionRecord<T>], record_id: Uuid) -> Vec<SectionRecord<T>> {
    rows.iter().filter(|r| r.record_id == record_id).cloned().collect()
}

impl Tables {
    fn require_record(&self, record_id: Uuid, table: &str) -> StoreResult<()> {
        if self.records.contains_key(&record_id) {
            Ok(())
        } else {
            Err(fk_violation(table, "record_id", record_id))
        }
    }

    fn require_references(&self, table: &str, plot_id: Uuid, crop_type_id: Uuid) -> StoreResult<()> {
        if !self.plots.contains_key(&plot_id) {
            return Err(fk_violation(table, "plot_id", plot_id));
        }
        if !self.crop_types.contains_key(&crop_type_id) {
            return Err(fk_violation(table, "crop_type_id", crop_type_id));
        }
        Ok(())
    }

    fn find_by_producer_cycle(&self, producer_code: &str, cycle_year: i32) -> Option<&InspectionRecord> {
        self.records
            .values()
            .find(|r| r.producer_code == producer_code && r.cycle_year == cycle_year)
    }

    fn remove_children(&mut self, record_id: Uuid) {
        let keep = |owner: Uuid| owner != record_id;
        self.documentation_reviews.retain(|r| keep(r.record_id));
        self.corrective_actions.retain(|r| keep(r.record_id));
        self.non_conformities.retain(|r| keep(r.record_id));
        self.risk_mitigations.retain(|r| keep(r.record_id));
        self.post_harvests.retain(|r| keep(r.record_id));
        self.knowledge_evaluations.retain(|r| keep(r.record_id));
        self.livestock.retain(|r| keep(r.record_id));
        self.crop_details.retain(|r| keep(r.record_id));
        self.harvest_sales.retain(|r| keep(r.record_id));
        self.planting_plans.retain(|r| keep(r.record_id));
        self.files.retain(|r| keep(r.record_id));
        // cascada: manejos cuyo detalle ya no existe
        let details = &self.crop_details;
        self.crop_managements
            .retain(|m| details.iter().any(|d| d.id == m.crop_detail_id));
    }

    fn owned_rows(&self) -> usize {
        self.records.len()
        + self.documentation_reviews.len()
        + self.corrective_actions.len()
        + self.non_conformities.len()
        + self.risk_mitigations.len()
        + self.post_harvests.len()
        + self.knowledge_evaluations.len()
        + self.livestock.len()
        + self.crop_details.len()
        + self.crop_managements.len()
        + self.harvest_sales.len()
        + self.planting_plans.len()
        + self.files.len()
    }
}

/// Almacén en memoria compartible entre hilos (`Sync`).
#[derive(Debug, Default)]
pub struct InMemoryAggregateStore {
    tables: RwLock<Tables>,
}

impl InMemoryAggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un tipo de cultivo al catálogo de referencia.
    pub fn with_crop_type(mut self, crop: CropType) -> Self {
        let tables = self.tables.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        tables.crop_types.insert(crop.id, crop);
        self
    }

    /// Agrega una parcela existente (entidad relacionada, no del agregado).
    pub fn with_plot(mut self, plot: Plot) -> Self {
        let tables = self.tables.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        tables.plots.insert(plot.id, plot);
        self
    }

    pub fn plot(&self, id: Uuid) -> StoreResult<Option<Plot>> {
        Ok(self.read()?.plots.get(&id).cloned())
    }

    /// Cantidad de filas pertenecientes a agregados (fichas + todas sus
    /// secciones + manejos). Las tablas de referencia no cuentan.
    pub fn owned_row_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.owned_rows())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| AggregateError::Store("lock de lectura envenenado".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| AggregateError::Store("lock de escritura envenenado".into()))
    }
}

struct InMemoryTx<'a> {
    tables: &'a mut Tables,
}

impl ReferenceLookup for InMemoryTx<'_> {
    fn is_certifiable(&mut self, crop_type_id: Uuid) -> StoreResult<bool> {
        Ok(self.tables
               .crop_types
               .get(&crop_type_id)
               .is_some_and(|c| c.principal_certifiable))
    }
}

impl AggregateTx for InMemoryTx<'_> {
    fn insert_record(&mut self, record: &InspectionRecord) -> StoreResult<()> {
        if self.tables.records.contains_key(&record.id) {
            return Err(unique_violation("inspection_records", format!("id = {}", record.id)));
        }
        if self.tables
               .find_by_producer_cycle(&record.producer_code, record.cycle_year)
               .is_some()
        {
            return Err(AggregateError::DuplicateAggregate { producer_code: record.producer_code.clone(),
                                                            cycle_year: record.cycle_year });
        }
        self.tables.records.insert(record.id, record.clone());
        Ok(())
    }

    fn update_record(&mut self, id: Uuid, input: &InspectionRecordInput, now: DateTime<Utc>) -> StoreResult<bool> {
        let Some(current) = self.tables.records.get(&id) else {
            return Ok(false);
        };
        if self.tables
               .find_by_producer_cycle(&input.producer_code, input.cycle_year)
               .is_some_and(|other| other.id != id)
        {
            return Err(AggregateError::DuplicateAggregate { producer_code: input.producer_code.clone(),
                                                            cycle_year: input.cycle_year });
        }
        let updated = current.replaced_with(input.clone(), now);
        self.tables.records.insert(id, updated);
        Ok(true)
    }

    fn delete_children(&mut self, record_id: Uuid) -> StoreResult<()> {
        self.tables.remove_children(record_id);
        Ok(())
    }

    fn insert_documentation_review(&mut self, row: &SectionRecord<DocumentationReview>) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "documentation_reviews")?;
        push_single(&mut self.tables.documentation_reviews, row, "documentation_reviews")
    }

    fn insert_corrective_action(&mut self, row: &SectionRecord<CorrectiveAction>, _position: i32) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "corrective_actions")?;
        if self.tables
               .corrective_actions
               .iter()
               .any(|a| a.record_id == row.record_id && a.data.sequence == row.data.sequence)
        {
            return Err(unique_violation("corrective_actions", format!("sequence = {}", row.data.sequence)));
        }
        self.tables.corrective_actions.push(row.clone());
        Ok(())
    }

    fn insert_non_conformity(&mut self, row: &SectionRecord<NonConformity>, _position: i32) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "non_conformities")?;
        self.tables.non_conformities.push(row.clone());
        Ok(())
    }

    fn insert_risk_mitigation(&mut self, row: &SectionRecord<RiskMitigationEvaluation>) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "risk_mitigation_evaluations")?;
        push_single(&mut self.tables.risk_mitigations, row, "risk_mitigation_evaluations")
    }

    fn insert_post_harvest(&mut self, row: &SectionRecord<PostHarvestEvaluation>) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "post_harvest_evaluations")?;
        push_single(&mut self.tables.post_harvests, row, "post_harvest_evaluations")
    }

    fn insert_knowledge(&mut self, row: &SectionRecord<KnowledgeEvaluation>) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "knowledge_evaluations")?;
        push_single(&mut self.tables.knowledge_evaluations, row, "knowledge_evaluations")
    }

    fn insert_livestock(&mut self, row: &SectionRecord<LivestockActivity>, _position: i32) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "livestock_activities")?;
        self.tables.livestock.push(row.clone());
        Ok(())
    }

    fn insert_crop_detail(&mut self, row: &SectionRecord<PlotCropDetail>, _position: i32) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "plot_crop_details")?;
        self.tables
            .require_references("plot_crop_details", row.data.plot_id, row.data.crop_type_id)?;
        if self.tables.crop_details.iter().any(|d| {
                                                  d.record_id == row.record_id
                                                  && d.data.plot_id == row.data.plot_id
                                                  && d.data.crop_type_id == row.data.crop_type_id
                                              })
        {
            return Err(unique_violation("plot_crop_details",
                                        format!("plot_id = {}, crop_type_id = {}",
                                                row.data.plot_id, row.data.crop_type_id)));
        }
        self.tables.crop_details.push(row.clone());
        Ok(())
    }

    fn insert_crop_management(&mut self, row: &CropManagementRecord) -> StoreResult<()> {
        if !self.tables.crop_details.iter().any(|d| d.id == row.crop_detail_id) {
            return Err(fk_violation("crop_managements", "crop_detail_id", row.crop_detail_id));
        }
        if self.tables
               .crop_managements
               .iter()
               .any(|m| m.crop_detail_id == row.crop_detail_id)
        {
            return Err(unique_violation("crop_managements", format!("crop_detail_id = {}", row.crop_detail_id)));
        }
        self.tables.crop_managements.push(row.clone());
        Ok(())
    }

    fn insert_harvest_sale(&mut self, row: &SectionRecord<HarvestSale>) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "harvest_sales")?;
        push_single(&mut self.tables.harvest_sales, row, "harvest_sales")
    }

    fn insert_planting_plan(&mut self, row: &SectionRecord<PlantingPlan>, _position: i32) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "planting_plans")?;
        self.tables
            .require_references("planting_plans", row.data.plot_id, row.data.crop_type_id)?;
        if self.tables
               .planting_plans
               .iter()
               .any(|p| p.record_id == row.record_id && p.data.plot_id == row.data.plot_id)
        {
            return Err(unique_violation("planting_plans", format!("plot_id = {}", row.data.plot_id)));
        }
        self.tables.planting_plans.push(row.clone());
        Ok(())
    }

    fn insert_file(&mut self, row: &SectionRecord<InspectionFile>, _position: i32) -> StoreResult<()> {
        self.tables.require_record(row.record_id, "inspection_files")?;
        self.tables.files.push(row.clone());
        Ok(())
    }

    fn apply_plot_update(&mut self, update: &PlotUpdate, now: DateTime<Utc>) -> StoreResult<bool> {
        match self.tables.plots.get_mut(&update.plot_id) {
            Some(plot) if plot.active => {
                plot.merge(update, now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl AggregateReader for InMemoryAggregateStore {
    fn find_record(&self, id: Uuid) -> StoreResult<Option<InspectionRecord>> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn find_record_by_producer_cycle(&self, producer_code: &str, cycle_year: i32)
                                     -> StoreResult<Option<InspectionRecord>> {
        Ok(self.read()?
               .find_by_producer_cycle(producer_code, cycle_year)
               .cloned())
    }

    fn documentation_review(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<DocumentationReview>>> {
        Ok(single_of(&self.read()?.documentation_reviews, record_id))
    }

    fn corrective_actions(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<CorrectiveAction>>> {
        let mut rows = all_of(&self.read()?.corrective_actions, record_id);
        // sort estable: a igual secuencia conserva el orden de inserción
        rows.sort_by_key(|a| a.data.sequence);
        Ok(rows)
    }

    fn non_conformities(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<NonConformity>>> {
        Ok(all_of(&self.read()?.non_conformities, record_id))
    }

    fn risk_mitigation(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<RiskMitigationEvaluation>>> {
        Ok(single_of(&self.read()?.risk_mitigations, record_id))
    }

    fn post_harvest(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<PostHarvestEvaluation>>> {
        Ok(single_of(&self.read()?.post_harvests, record_id))
    }

    fn knowledge(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<KnowledgeEvaluation>>> {
        Ok(single_of(&self.read()?.knowledge_evaluations, record_id))
    }

    fn livestock(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<LivestockActivity>>> {
        Ok(all_of(&self.read()?.livestock, record_id))
    }

    fn crop_details(&self, record_id: Uuid) -> StoreResult<Vec<CropDetailView>> {
        let t = self.read()?;
        let views = t.crop_details
                     .iter()
                     .filter(|d| d.record_id == record_id)
                     .map(|d| {
                         let crop = t.crop_types.get(&d.data.crop_type_id);
                         CropDetailView { detail: d.clone(),
                                          crop_name: crop.map(|c| c.name.clone()).unwrap_or_default(),
                                          principal_certifiable: crop.is_some_and(|c| c.principal_certifiable),
                                          plot: t.plots.get(&d.data.plot_id).map(Plot::snapshot),
                                          management: t.crop_managements
                                                       .iter()
                                                       .find(|m| m.crop_detail_id == d.id)
                                                       .cloned() }
                     })
                     .collect();
        Ok(views)
    }

    fn harvest_sale(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<HarvestSale>>> {
        Ok(single_of(&self.read()?.harvest_sales, record_id))
    }

    fn planting_plans(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<PlantingPlan>>> {
        Ok(all_of(&self.read()?.planting_plans, record_id))
    }

    fn files(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<InspectionFile>>> {
        Ok(all_of(&self.read()?.files, record_id))
    }
}

impl AggregateStore for InMemoryAggregateStore {
    fn transaction<T, F>(&self, work: F) -> StoreResult<T>
        where F: FnOnce(&mut dyn AggregateTx) -> StoreResult<T>
    {
        let mut guard = self.write()?;
        let mut working = guard.clone();
        let out = work(&mut InMemoryTx { tables: &mut working })?;
        *guard = working;
        Ok(out)
    }

    fn delete_record(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.write()?;
        if tables.records.remove(&id).is_none() {
            return Ok(false);
        }
        tables.remove_children(id);
        Ok(true)
    }
}
