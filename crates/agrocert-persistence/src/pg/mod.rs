//! Implementación Postgres (Diesel) de los contratos de almacenamiento del
//! core.
//!
//! - Paridad 1:1 con `InMemoryAggregateStore`: mismas restricciones (unicidad
//!   productor/gestión, secciones 0..1, claves foráneas, cascadas) declaradas
//!   en las migraciones.
//! - Cada create/replace corre en UNA transacción Diesel
//!   (`build_transaction().read_write()`); cualquier `Err` de la unidad de
//!   trabajo revierte todo.
//! - Las lecturas por sección toman su propia conexión del pool, por lo que el
//!   lector puede ejecutarlas en paralelo.
//! - Sin reintentos: un `SerializationConflict` o `TransientIo` llega al
//!   llamador como `AggregateError::Store`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::{debug, warn};
use uuid::Uuid;

use agrocert_core::{AggregateError, AggregateReader, AggregateStore, AggregateTx, ReferenceLookup, StoreResult};
use agrocert_domain::{CorrectiveAction, CropDetailView, CropManagementRecord, CropType, DocumentationReview,
                      HarvestSale, InspectionFile, InspectionRecord, InspectionRecordInput, KnowledgeEvaluation,
                      LivestockActivity, NonConformity, PlantingPlan, Plot, PlotCropDetail, PlotUpdate,
                      PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::{corrective_actions, crop_managements, crop_types, documentation_reviews, harvest_sales,
                    inspection_files, inspection_records, knowledge_evaluations, livestock_activities,
                    non_conformities, planting_plans, plot_crop_details, plots, post_harvest_evaluations,
                    risk_mitigation_evaluations};

pub mod rows;

use rows::{CorrectiveActionRow, CropDetailRow, CropManagementRow, CropTypeRow, DocumentationRow, FileRow,
           HarvestSaleRow, KnowledgeRow, LivestockRow, NonConformityRow, PlantingPlanRow, PlotChanges, PlotRow,
           PostHarvestRow, RecordChanges, RecordRow, RiskMitigationRow};

/// Nombre de la restricción única (productor, gestión) en `inspection_records`.
pub const PRODUCER_CYCLE_KEY: &str = "inspection_records_producer_cycle_key";

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
///
/// - El pool se construye con `min_idle` y `max_size`.
/// - Al construirlo se corren las migraciones pendientes (una sola vez).
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub type PgPooledConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones.
///
/// Permite inyectar un pool real (producción / tests de integración) o
/// simularlo sin acoplar a r2d2. Debe devolver una conexión válida o
/// `PersistenceError::TransientIo`.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
#[derive(Clone)]
pub struct PoolProvider {
    pub pool: PgPool,
}

impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<PgPooledConnection, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

fn store_err(e: DieselError) -> AggregateError {
    PersistenceError::from(e).into()
}

/// La violación de la clave (productor, gestión) es un duplicado de
/// agregado; cualquier otra falla es de almacén.
fn record_write_err(e: DieselError, producer_code: &str, cycle_year: i32) -> AggregateError {
    match &e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(PRODUCER_CYCLE_KEY) =>
        {
            AggregateError::DuplicateAggregate { producer_code: producer_code.to_string(),
                                                 cycle_year }
        }
        _ => store_err(e),
    }
}

/// Error de la unidad de trabajo dentro de `run`: Diesel exige poder
/// construirlo desde `diesel::result::Error` (fallos de BEGIN / COMMIT).
enum TxError {
    Aggregate(AggregateError),
    Diesel(DieselError),
}

impl From<DieselError> for TxError {
    fn from(e: DieselError) -> Self {
        TxError::Diesel(e)
    }
}

impl From<TxError> for AggregateError {
    fn from(e: TxError) -> Self {
        match e {
            TxError::Aggregate(e) => e,
            TxError::Diesel(e) => store_err(e),
        }
    }
}

/// Manejador transaccional sobre la conexión de la transacción en curso.
struct PgTx<'a> {
    conn: &'a mut PgConnection,
}

impl ReferenceLookup for PgTx<'_> {
    fn is_certifiable(&mut self, crop_type_id: Uuid) -> StoreResult<bool> {
        let flag = crop_types::table.find(crop_type_id)
                                    .select(crop_types::principal_certifiable)
                                    .first::<bool>(self.conn)
                                    .optional()
                                    .map_err(store_err)?;
        Ok(flag.unwrap_or(false))
    }
}

impl AggregateTx for PgTx<'_> {
    fn insert_record(&mut self, record: &InspectionRecord) -> StoreResult<()> {
        diesel::insert_into(inspection_records::table).values(RecordRow::from(record))
                                                      .execute(self.conn)
                                                      .map_err(|e| {
                                                          record_write_err(e, &record.producer_code, record.cycle_year)
                                                      })?;
        Ok(())
    }

    fn update_record(&mut self, id: Uuid, input: &InspectionRecordInput, now: DateTime<Utc>) -> StoreResult<bool> {
        let updated = diesel::update(inspection_records::table.find(id))
            .set(RecordChanges::new(input, now))
            .execute(self.conn)
            .map_err(|e| record_write_err(e, &input.producer_code, input.cycle_year))?;
        Ok(updated > 0)
    }

    fn delete_children(&mut self, record_id: Uuid) -> StoreResult<()> {
        // los manejos caen por ON DELETE CASCADE de plot_crop_details
        let conn = &mut *self.conn;
        diesel::delete(documentation_reviews::table.filter(documentation_reviews::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(corrective_actions::table.filter(corrective_actions::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(non_conformities::table.filter(non_conformities::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(risk_mitigation_evaluations::table
                           .filter(risk_mitigation_evaluations::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(post_harvest_evaluations::table.filter(post_harvest_evaluations::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(knowledge_evaluations::table.filter(knowledge_evaluations::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(livestock_activities::table.filter(livestock_activities::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(plot_crop_details::table.filter(plot_crop_details::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(harvest_sales::table.filter(harvest_sales::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(planting_plans::table.filter(planting_plans::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        diesel::delete(inspection_files::table.filter(inspection_files::record_id.eq(record_id)))
            .execute(conn)
            .map_err(store_err)?;
        Ok(())
    }

    fn insert_documentation_review(&mut self, row: &SectionRecord<DocumentationReview>) -> StoreResult<()> {
        diesel::insert_into(documentation_reviews::table).values(DocumentationRow::from(row))
                                                         .execute(self.conn)
                                                         .map_err(store_err)?;
        Ok(())
    }

    fn insert_corrective_action(&mut self, row: &SectionRecord<CorrectiveAction>, position: i32) -> StoreResult<()> {
        diesel::insert_into(corrective_actions::table).values(CorrectiveActionRow::new(row, position))
                                                      .execute(self.conn)
                                                      .map_err(store_err)?;
        Ok(())
    }

    fn insert_non_conformity(&mut self, row: &SectionRecord<NonConformity>, position: i32) -> StoreResult<()> {
        diesel::insert_into(non_conformities::table).values(NonConformityRow::new(row, position))
                                                    .execute(self.conn)
                                                    .map_err(store_err)?;
        Ok(())
    }

    fn insert_risk_mitigation(&mut self, row: &SectionRecord<RiskMitigationEvaluation>) -> StoreResult<()> {
        diesel::insert_into(risk_mitigation_evaluations::table).values(RiskMitigationRow::from(row))
                                                               .execute(self.conn)
                                                               .map_err(store_err)?;
        Ok(())
    }

    fn insert_post_harvest(&mut self, row: &SectionRecord<PostHarvestEvaluation>) -> StoreResult<()> {
        diesel::insert_into(post_harvest_evaluations::table).values(PostHarvestRow::from(row))
                                                            .execute(self.conn)
                                                            .map_err(store_err)?;
        Ok(())
    }

    fn insert_knowledge(&mut self, row: &SectionRecord<KnowledgeEvaluation>) -> StoreResult<()> {
        diesel::insert_into(knowledge_evaluations::table).values(KnowledgeRow::from(row))
                                                         .execute(self.conn)
                                                         .map_err(store_err)?;
        Ok(())
    }

    fn insert_livestock(&mut self, row: &SectionRecord<LivestockActivity>, position: i32) -> StoreResult<()> {
        diesel::insert_into(livestock_activities::table).values(LivestockRow::new(row, position))
                                                        .execute(self.conn)
                                                        .map_err(store_err)?;
        Ok(())
    }

    fn insert_crop_detail(&mut self, row: &SectionRecord<PlotCropDetail>, position: i32) -> StoreResult<()> {
        diesel::insert_into(plot_crop_details::table).values(CropDetailRow::new(row, position))
                                                     .execute(self.conn)
                                                     .map_err(store_err)?;
        Ok(())
    }

    fn insert_crop_management(&mut self, row: &CropManagementRecord) -> StoreResult<()> {
        let Some(values) = CropManagementRow::new(row) else {
            return Err(AggregateError::Store(format!("manejo {} sin procedencia de semilla", row.id)));
        };
        diesel::insert_into(crop_managements::table).values(values)
                                                    .execute(self.conn)
                                                    .map_err(store_err)?;
        Ok(())
    }

    fn insert_harvest_sale(&mut self, row: &SectionRecord<HarvestSale>) -> StoreResult<()> {
        diesel::insert_into(harvest_sales::table).values(HarvestSaleRow::from(row))
                                                 .execute(self.conn)
                                                 .map_err(store_err)?;
        Ok(())
    }

    fn insert_planting_plan(&mut self, row: &SectionRecord<PlantingPlan>, position: i32) -> StoreResult<()> {
        diesel::insert_into(planting_plans::table).values(PlantingPlanRow::new(row, position))
                                                  .execute(self.conn)
                                                  .map_err(store_err)?;
        Ok(())
    }

    fn insert_file(&mut self, row: &SectionRecord<InspectionFile>, position: i32) -> StoreResult<()> {
        diesel::insert_into(inspection_files::table).values(FileRow::new(row, position))
                                                    .execute(self.conn)
                                                    .map_err(store_err)?;
        Ok(())
    }

    fn apply_plot_update(&mut self, update: &PlotUpdate, now: DateTime<Utc>) -> StoreResult<bool> {
        let updated = diesel::update(plots::table.filter(plots::id.eq(update.plot_id))
                                                 .filter(plots::active.eq(true)))
            .set(PlotChanges::new(update, now))
            .execute(self.conn)
            .map_err(store_err)?;
        Ok(updated > 0)
    }
}

/// Implementación Postgres de `AggregateStore`.
pub struct PgAggregateStore<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgAggregateStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Alta / actualización de un tipo de cultivo del catálogo.
    pub fn upsert_crop_type(&self, crop: &CropType) -> StoreResult<()> {
        let mut conn = self.provider.connection()?;
        let row = CropTypeRow::from(crop);
        diesel::insert_into(crop_types::table).values(&row)
                                              .on_conflict(crop_types::id)
                                              .do_update()
                                              .set((crop_types::name.eq(&row.name),
                                                    crop_types::principal_certifiable.eq(row.principal_certifiable)))
                                              .execute(&mut conn)
                                              .map_err(store_err)?;
        Ok(())
    }

    /// Alta de una parcela (si ya existe se deja intacta).
    pub fn insert_plot(&self, plot: &Plot) -> StoreResult<()> {
        let mut conn = self.provider.connection()?;
        diesel::insert_into(plots::table).values(PlotRow::from(plot))
                                         .on_conflict_do_nothing()
                                         .execute(&mut conn)
                                         .map_err(store_err)?;
        Ok(())
    }

    pub fn plot(&self, id: Uuid) -> StoreResult<Option<Plot>> {
        let mut conn = self.provider.connection()?;
        let row = plots::table.find(id)
                              .select(PlotRow::as_select())
                              .first(&mut conn)
                              .optional()
                              .map_err(store_err)?;
        Ok(row.map(Plot::from))
    }
}

impl<P: ConnectionProvider> AggregateReader for PgAggregateStore<P> {
    fn find_record(&self, id: Uuid) -> StoreResult<Option<InspectionRecord>> {
        let mut conn = self.provider.connection()?;
        let row = inspection_records::table.find(id)
                                           .select(RecordRow::as_select())
                                           .first(&mut conn)
                                           .optional()
                                           .map_err(store_err)?;
        Ok(row.map(InspectionRecord::from))
    }

    fn find_record_by_producer_cycle(&self, producer_code: &str, cycle_year: i32)
                                     -> StoreResult<Option<InspectionRecord>> {
        let mut conn = self.provider.connection()?;
        let row = inspection_records::table.filter(inspection_records::producer_code.eq(producer_code))
                                           .filter(inspection_records::cycle_year.eq(cycle_year))
                                           .select(RecordRow::as_select())
                                           .first(&mut conn)
                                           .optional()
                                           .map_err(store_err)?;
        Ok(row.map(InspectionRecord::from))
    }

    fn documentation_review(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<DocumentationReview>>> {
        let mut conn = self.provider.connection()?;
        let row = documentation_reviews::table.filter(documentation_reviews::record_id.eq(record_id))
                                              .select(DocumentationRow::as_select())
                                              .first(&mut conn)
                                              .optional()
                                              .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    fn corrective_actions(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<CorrectiveAction>>> {
        let mut conn = self.provider.connection()?;
        let rows = corrective_actions::table.filter(corrective_actions::record_id.eq(record_id))
                                            .order((corrective_actions::sequence.asc(),
                                                    corrective_actions::position.asc()))
                                            .select(CorrectiveActionRow::as_select())
                                            .load(&mut conn)
                                            .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn non_conformities(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<NonConformity>>> {
        let mut conn = self.provider.connection()?;
        let rows = non_conformities::table.filter(non_conformities::record_id.eq(record_id))
                                          .order(non_conformities::position.asc())
                                          .select(NonConformityRow::as_select())
                                          .load(&mut conn)
                                          .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn risk_mitigation(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<RiskMitigationEvaluation>>> {
        let mut conn = self.provider.connection()?;
        let row = risk_mitigation_evaluations::table.filter(risk_mitigation_evaluations::record_id.eq(record_id))
                                                    .select(RiskMitigationRow::as_select())
                                                    .first(&mut conn)
                                                    .optional()
                                                    .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    fn post_harvest(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<PostHarvestEvaluation>>> {
        let mut conn = self.provider.connection()?;
        let row = post_harvest_evaluations::table.filter(post_harvest_evaluations::record_id.eq(record_id))
                                                 .select(PostHarvestRow::as_select())
                                                 .first(&mut conn)
                                                 .optional()
                                                 .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    fn knowledge(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<KnowledgeEvaluation>>> {
        let mut conn = self.provider.connection()?;
        let row = knowledge_evaluations::table.filter(knowledge_evaluations::record_id.eq(record_id))
                                              .select(KnowledgeRow::as_select())
                                              .first(&mut conn)
                                              .optional()
                                              .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    fn livestock(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<LivestockActivity>>> {
        let mut conn = self.provider.connection()?;
        let rows = livestock_activities::table.filter(livestock_activities::record_id.eq(record_id))
                                              .order(livestock_activities::position.asc())
                                              .select(LivestockRow::as_select())
                                              .load(&mut conn)
                                              .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn crop_details(&self, record_id: Uuid) -> StoreResult<Vec<CropDetailView>> {
        let mut conn = self.provider.connection()?;
        let details = plot_crop_details::table.filter(plot_crop_details::record_id.eq(record_id))
                                              .order(plot_crop_details::position.asc())
                                              .select(CropDetailRow::as_select())
                                              .load(&mut conn)
                                              .map_err(store_err)?;
        if details.is_empty() {
            return Ok(Vec::new());
        }

        let crop_ids: Vec<Uuid> = details.iter().map(|d| d.crop_type_id).collect();
        let plot_ids: Vec<Uuid> = details.iter().map(|d| d.plot_id).collect();
        let detail_ids: Vec<Uuid> = details.iter().map(|d| d.id).collect();

        let crops: HashMap<Uuid, CropTypeRow> = crop_types::table.filter(crop_types::id.eq_any(&crop_ids))
                                                                 .select(CropTypeRow::as_select())
                                                                 .load(&mut conn)
                                                                 .map_err(store_err)?
                                                                 .into_iter()
                                                                 .map(|c| (c.id, c))
                                                                 .collect();
        let plot_rows: HashMap<Uuid, Plot> = plots::table.filter(plots::id.eq_any(&plot_ids))
                                                         .select(PlotRow::as_select())
                                                         .load(&mut conn)
                                                         .map_err(store_err)?
                                                         .into_iter()
                                                         .map(|p| (p.id, Plot::from(p)))
                                                         .collect();
        let mut managements: HashMap<Uuid, CropManagementRecord> =
            crop_managements::table.filter(crop_managements::crop_detail_id.eq_any(&detail_ids))
                                   .select(CropManagementRow::as_select())
                                   .load(&mut conn)
                                   .map_err(store_err)?
                                   .into_iter()
                                   .map(|m| (m.crop_detail_id, CropManagementRecord::from(m)))
                                   .collect();

        let views = details.into_iter()
                           .map(|row| {
                               let crop = crops.get(&row.crop_type_id);
                               let plot = plot_rows.get(&row.plot_id).map(Plot::snapshot);
                               let management = managements.remove(&row.id);
                               CropDetailView { crop_name: crop.map(|c| c.name.clone()).unwrap_or_default(),
                                                principal_certifiable: crop.is_some_and(|c| c.principal_certifiable),
                                                plot,
                                                management,
                                                detail: row.into() }
                           })
                           .collect();
        Ok(views)
    }

    fn harvest_sale(&self, record_id: Uuid) -> StoreResult<Option<SectionRecord<HarvestSale>>> {
        let mut conn = self.provider.connection()?;
        let row = harvest_sales::table.filter(harvest_sales::record_id.eq(record_id))
                                      .select(HarvestSaleRow::as_select())
                                      .first(&mut conn)
                                      .optional()
                                      .map_err(store_err)?;
        Ok(row.map(Into::into))
    }

    fn planting_plans(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<PlantingPlan>>> {
        let mut conn = self.provider.connection()?;
        let rows = planting_plans::table.filter(planting_plans::record_id.eq(record_id))
                                        .order(planting_plans::position.asc())
                                        .select(PlantingPlanRow::as_select())
                                        .load(&mut conn)
                                        .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn files(&self, record_id: Uuid) -> StoreResult<Vec<SectionRecord<InspectionFile>>> {
        let mut conn = self.provider.connection()?;
        let rows = inspection_files::table.filter(inspection_files::record_id.eq(record_id))
                                          .order(inspection_files::position.asc())
                                          .select(FileRow::as_select())
                                          .load(&mut conn)
                                          .map_err(store_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl<P: ConnectionProvider> AggregateStore for PgAggregateStore<P> {
    fn transaction<T, F>(&self, work: F) -> StoreResult<T>
        where F: FnOnce(&mut dyn AggregateTx) -> StoreResult<T>
    {
        let mut conn = self.provider.connection()?;
        debug!("transaction:start");
        let result = conn.build_transaction()
                         .read_write()
                         .run(|tx_conn| {
                             let mut tx = PgTx { conn: tx_conn };
                             work(&mut tx).map_err(TxError::Aggregate)
                         })
                         .map_err(AggregateError::from);
        match &result {
            Ok(_) => debug!("transaction:commit"),
            Err(e) => debug!("transaction:rollback {e}"),
        }
        result
    }

    fn delete_record(&self, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.provider.connection()?;
        let deleted = diesel::delete(inspection_records::table.find(id)).execute(&mut conn)
                                                                        .map_err(store_err)?;
        debug!("delete_record id={id} deleted={deleted}");
        Ok(deleted > 0)
    }
}

/// Construye un pool Postgres r2d2 a partir de URL.
///
/// - Valida tamaños (0 pasa a 1; si `min_size > max_size`, usa `min = max`).
/// - Ejecuta migraciones pendientes con la primera conexión.
/// - Devuelve `PersistenceError::TransientIo` ante errores del pool/manager.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = min_size.max(1);
    let validated_max = max_size.max(1);
    if validated_min > validated_max {
        warn!("min_size > max_size ({validated_min} > {validated_max}), ajustando min=max");
    }
    let final_min = validated_min.min(validated_max);
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}

/// Helper de desarrollo: carga `.env`, lee configuración (DATABASE_URL,
/// tamaños) y construye un pool ya migrado.
pub fn build_dev_pool_from_env() -> Result<PgPool, PersistenceError> {
    let cfg = crate::config::DbConfig::from_env()?;
    build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)
}
