//! Filas Diesel y su mapeo desde / hacia las entidades del dominio.
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use agrocert_domain::{CorrectiveAction, CropManagement, CropManagementRecord, CropType, DocumentationReview,
                      HarvestSale, InspectionFile, InspectionRecord, InspectionRecordInput, KnowledgeEvaluation,
                      LivestockActivity, NonConformity, PlantingPlan, Plot, PlotCropDetail, PlotUpdate,
                      PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};

use crate::schema::{corrective_actions, crop_managements, crop_types, documentation_reviews, harvest_sales,
                    inspection_files, inspection_records, knowledge_evaluations, livestock_activities,
                    non_conformities, planting_plans, plot_crop_details, plots, post_harvest_evaluations,
                    risk_mitigation_evaluations};

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = inspection_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecordRow {
    pub id: Uuid,
    pub producer_code: String,
    pub cycle_id: Uuid,
    pub cycle_year: i32,
    pub inspection_date: NaiveDate,
    pub inspector: String,
    pub interviewee: Option<String>,
    pub previous_category: Option<String>,
    pub capture_origin: String,
    pub device_id: Option<String>,
    pub synced_at: Option<DateTime<Utc>>,
    pub status: String,
    pub certification_result: String,
    pub comments: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&InspectionRecord> for RecordRow {
    fn from(r: &InspectionRecord) -> Self {
        Self { id: r.id,
               producer_code: r.producer_code.clone(),
               cycle_id: r.cycle_id,
               cycle_year: r.cycle_year,
               inspection_date: r.inspection_date,
               inspector: r.inspector.clone(),
               interviewee: r.interviewee.clone(),
               previous_category: r.previous_category.clone(),
               capture_origin: r.capture_origin.clone(),
               device_id: r.device_id.clone(),
               synced_at: r.synced_at,
               status: r.status.clone(),
               certification_result: r.certification_result.clone(),
               comments: r.comments.clone(),
               created_by: r.created_by.clone(),
               created_at: r.created_at,
               updated_at: r.updated_at }
    }
}

impl From<RecordRow> for InspectionRecord {
    fn from(r: RecordRow) -> Self {
        Self { id: r.id,
               producer_code: r.producer_code,
               cycle_id: r.cycle_id,
               cycle_year: r.cycle_year,
               inspection_date: r.inspection_date,
               inspector: r.inspector,
               interviewee: r.interviewee,
               previous_category: r.previous_category,
               capture_origin: r.capture_origin,
               device_id: r.device_id,
               synced_at: r.synced_at,
               status: r.status,
               certification_result: r.certification_result,
               comments: r.comments,
               created_by: r.created_by,
               created_at: r.created_at,
               updated_at: r.updated_at }
    }
}

/// Campos editables de la raíz. `None` escribe NULL (reemplazo completo);
/// `created_by` y `created_at` no se tocan.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = inspection_records, treat_none_as_null = true)]
pub struct RecordChanges<'a> {
    pub producer_code: &'a str,
    pub cycle_id: Uuid,
    pub cycle_year: i32,
    pub inspection_date: NaiveDate,
    pub inspector: &'a str,
    pub interviewee: Option<&'a str>,
    pub previous_category: Option<&'a str>,
    pub capture_origin: &'a str,
    pub device_id: Option<&'a str>,
    pub synced_at: Option<DateTime<Utc>>,
    pub status: &'a str,
    pub certification_result: &'a str,
    pub comments: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> RecordChanges<'a> {
    pub fn new(input: &'a InspectionRecordInput, now: DateTime<Utc>) -> Self {
        Self { producer_code: &input.producer_code,
               cycle_id: input.cycle_id,
               cycle_year: input.cycle_year,
               inspection_date: input.inspection_date,
               inspector: &input.inspector,
               interviewee: input.interviewee.as_deref(),
               previous_category: input.previous_category.as_deref(),
               capture_origin: &input.capture_origin,
               device_id: input.device_id.as_deref(),
               synced_at: input.synced_at,
               status: &input.status,
               certification_result: &input.certification_result,
               comments: input.comments.as_deref(),
               updated_at: now }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = documentation_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentationRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub entry_request: String,
    pub internal_rules: String,
    pub production_contract: String,
    pub farm_sketch: String,
    pub field_diary: String,
    pub harvest_log: String,
    pub payment_receipt: String,
    pub notes: Option<String>,
}

impl From<&SectionRecord<DocumentationReview>> for DocumentationRow {
    fn from(s: &SectionRecord<DocumentationReview>) -> Self {
        let d = s.data.clone();
        Self { id: s.id,
               record_id: s.record_id,
               entry_request: d.entry_request,
               internal_rules: d.internal_rules,
               production_contract: d.production_contract,
               farm_sketch: d.farm_sketch,
               field_diary: d.field_diary,
               harvest_log: d.harvest_log,
               payment_receipt: d.payment_receipt,
               notes: d.notes }
    }
}

impl From<DocumentationRow> for SectionRecord<DocumentationReview> {
    fn from(r: DocumentationRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           DocumentationReview { entry_request: r.entry_request,
                                                 internal_rules: r.internal_rules,
                                                 production_contract: r.production_contract,
                                                 farm_sketch: r.farm_sketch,
                                                 field_diary: r.field_diary,
                                                 harvest_log: r.harvest_log,
                                                 payment_receipt: r.payment_receipt,
                                                 notes: r.notes })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = corrective_actions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CorrectiveActionRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub position: i32,
    pub sequence: i32,
    pub description: String,
    pub implementation: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl CorrectiveActionRow {
    pub fn new(s: &SectionRecord<CorrectiveAction>, position: i32) -> Self {
        Self { id: s.id,
               record_id: s.record_id,
               position,
               sequence: s.data.sequence,
               description: s.data.description.clone(),
               implementation: s.data.implementation.clone(),
               due_date: s.data.due_date }
    }
}

impl From<CorrectiveActionRow> for SectionRecord<CorrectiveAction> {
    fn from(r: CorrectiveActionRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           CorrectiveAction { sequence: r.sequence,
                                              description: r.description,
                                              implementation: r.implementation,
                                              due_date: r.due_date })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = non_conformities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NonConformityRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub position: i32,
    pub description: String,
    pub proposed_action: Option<String>,
    pub deadline: NaiveDate,
    pub follow_up_status: String,
    pub follow_up_notes: Option<String>,
}

impl NonConformityRow {
    pub fn new(s: &SectionRecord<NonConformity>, position: i32) -> Self {
        let d = s.data.clone();
        Self { id: s.id,
               record_id: s.record_id,
               position,
               description: d.description,
               proposed_action: d.proposed_action,
               deadline: d.deadline,
               follow_up_status: d.follow_up_status,
               follow_up_notes: d.follow_up_notes }
    }
}

impl From<NonConformityRow> for SectionRecord<NonConformity> {
    fn from(r: NonConformityRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           NonConformity { description: r.description,
                                           proposed_action: r.proposed_action,
                                           deadline: r.deadline,
                                           follow_up_status: r.follow_up_status,
                                           follow_up_notes: r.follow_up_notes })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = risk_mitigation_evaluations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RiskMitigationRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub risk_mitigation_practices: bool,
    pub contamination_barriers: bool,
    pub tool_storage: bool,
    pub organic_input_storage: bool,
    pub avoids_residue_burning: bool,
    pub comments: Option<String>,
}

impl From<&SectionRecord<RiskMitigationEvaluation>> for RiskMitigationRow {
    fn from(s: &SectionRecord<RiskMitigationEvaluation>) -> Self {
        let d = &s.data;
        Self { id: s.id,
               record_id: s.record_id,
               risk_mitigation_practices: d.risk_mitigation_practices,
               contamination_barriers: d.contamination_barriers,
               tool_storage: d.tool_storage,
               organic_input_storage: d.organic_input_storage,
               avoids_residue_burning: d.avoids_residue_burning,
               comments: d.comments.clone() }
    }
}

impl From<RiskMitigationRow> for SectionRecord<RiskMitigationEvaluation> {
    fn from(r: RiskMitigationRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           RiskMitigationEvaluation { risk_mitigation_practices: r.risk_mitigation_practices,
                                                      contamination_barriers: r.contamination_barriers,
                                                      tool_storage: r.tool_storage,
                                                      organic_input_storage: r.organic_input_storage,
                                                      avoids_residue_burning: r.avoids_residue_burning,
                                                      comments: r.comments })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = post_harvest_evaluations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostHarvestRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub clean_drying_area: bool,
    pub clean_containers: bool,
    pub protected_storage: bool,
    pub separates_conventional: bool,
    pub comments: Option<String>,
}

impl From<&SectionRecord<PostHarvestEvaluation>> for PostHarvestRow {
    fn from(s: &SectionRecord<PostHarvestEvaluation>) -> Self {
        let d = &s.data;
        Self { id: s.id,
               record_id: s.record_id,
               clean_drying_area: d.clean_drying_area,
               clean_containers: d.clean_containers,
               protected_storage: d.protected_storage,
               separates_conventional: d.separates_conventional,
               comments: d.comments.clone() }
    }
}

impl From<PostHarvestRow> for SectionRecord<PostHarvestEvaluation> {
    fn from(r: PostHarvestRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           PostHarvestEvaluation { clean_drying_area: r.clean_drying_area,
                                                   clean_containers: r.clean_containers,
                                                   protected_storage: r.protected_storage,
                                                   separates_conventional: r.separates_conventional,
                                                   comments: r.comments })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = knowledge_evaluations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct KnowledgeRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub knows_organic_rules: bool,
    pub knows_internal_rules: bool,
    pub attended_training: bool,
    pub comments: Option<String>,
}

impl From<&SectionRecord<KnowledgeEvaluation>> for KnowledgeRow {
    fn from(s: &SectionRecord<KnowledgeEvaluation>) -> Self {
        let d = &s.data;
        Self { id: s.id,
               record_id: s.record_id,
               knows_organic_rules: d.knows_organic_rules,
               knows_internal_rules: d.knows_internal_rules,
               attended_training: d.attended_training,
               comments: d.comments.clone() }
    }
}

impl From<KnowledgeRow> for SectionRecord<KnowledgeEvaluation> {
    fn from(r: KnowledgeRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           KnowledgeEvaluation { knows_organic_rules: r.knows_organic_rules,
                                                 knows_internal_rules: r.knows_internal_rules,
                                                 attended_training: r.attended_training,
                                                 comments: r.comments })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = livestock_activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LivestockRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub position: i32,
    pub species: String,
    pub quantity: i32,
    pub management_method: String,
    pub management_method_other: Option<String>,
    pub manure_use: Option<String>,
}

impl LivestockRow {
    pub fn new(s: &SectionRecord<LivestockActivity>, position: i32) -> Self {
        let d = s.data.clone();
        Self { id: s.id,
               record_id: s.record_id,
               position,
               species: d.species,
               quantity: d.quantity,
               management_method: d.management_method,
               management_method_other: d.management_method_other,
               manure_use: d.manure_use }
    }
}

impl From<LivestockRow> for SectionRecord<LivestockActivity> {
    fn from(r: LivestockRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           LivestockActivity { species: r.species,
                                               quantity: r.quantity,
                                               management_method: r.management_method,
                                               management_method_other: r.management_method_other,
                                               manure_use: r.manure_use })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = plot_crop_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CropDetailRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub position: i32,
    pub plot_id: Uuid,
    pub crop_type_id: Uuid,
    pub area_ha: f64,
    pub plot_condition: String,
    pub notes: Option<String>,
}

impl CropDetailRow {
    pub fn new(s: &SectionRecord<PlotCropDetail>, position: i32) -> Self {
        Self { id: s.id,
               record_id: s.record_id,
               position,
               plot_id: s.data.plot_id,
               crop_type_id: s.data.crop_type_id,
               area_ha: s.data.area_ha,
               plot_condition: s.data.plot_condition.clone(),
               notes: s.data.notes.clone() }
    }
}

impl From<CropDetailRow> for SectionRecord<PlotCropDetail> {
    fn from(r: CropDetailRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           PlotCropDetail { plot_id: r.plot_id,
                                            crop_type_id: r.crop_type_id,
                                            area_ha: r.area_ha,
                                            plot_condition: r.plot_condition,
                                            notes: r.notes })
    }
}

/// `seed_origin` es NOT NULL: un manejo sólo existe con procedencia.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crop_managements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CropManagementRow {
    pub id: Uuid,
    pub crop_detail_id: Uuid,
    pub seed_origin: String,
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

impl CropManagementRow {
    /// `None` si el manejo no trae procedencia de semilla.
    pub fn new(m: &CropManagementRecord) -> Option<Self> {
        let d = m.data.clone();
        Some(Self { id: m.id,
                    crop_detail_id: m.crop_detail_id,
                    seed_origin: d.seed_origin?,
                    seed_origin_other: d.seed_origin_other,
                    seed_category: d.seed_category,
                    seed_treatment: d.seed_treatment,
                    seed_treatment_other: d.seed_treatment_other,
                    fertilization_method: d.fertilization_method,
                    fertilization_method_other: d.fertilization_method_other,
                    weeding_method: d.weeding_method,
                    weeding_method_other: d.weeding_method_other,
                    harvest_method: d.harvest_method,
                    harvest_method_other: d.harvest_method_other })
    }
}

impl From<CropManagementRow> for CropManagementRecord {
    fn from(r: CropManagementRow) -> Self {
        Self { id: r.id,
               crop_detail_id: r.crop_detail_id,
               data: CropManagement { seed_origin: Some(r.seed_origin),
                                      seed_origin_other: r.seed_origin_other,
                                      seed_category: r.seed_category,
                                      seed_treatment: r.seed_treatment,
                                      seed_treatment_other: r.seed_treatment_other,
                                      fertilization_method: r.fertilization_method,
                                      fertilization_method_other: r.fertilization_method_other,
                                      weeding_method: r.weeding_method,
                                      weeding_method_other: r.weeding_method_other,
                                      harvest_method: r.harvest_method,
                                      harvest_method_other: r.harvest_method_other } }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = harvest_sales)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HarvestSaleRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub production_type: String,
    pub estimated_yield_kg: Option<f64>,
    pub harvested_kg: f64,
    pub sold_kg: f64,
    pub sale_destination: Option<String>,
    pub buyer: Option<String>,
    pub notes: Option<String>,
}

impl From<&SectionRecord<HarvestSale>> for HarvestSaleRow {
    fn from(s: &SectionRecord<HarvestSale>) -> Self {
        let d = s.data.clone();
        Self { id: s.id,
               record_id: s.record_id,
               production_type: d.production_type,
               estimated_yield_kg: d.estimated_yield_kg,
               harvested_kg: d.harvested_kg,
               sold_kg: d.sold_kg,
               sale_destination: d.sale_destination,
               buyer: d.buyer,
               notes: d.notes }
    }
}

impl From<HarvestSaleRow> for SectionRecord<HarvestSale> {
    fn from(r: HarvestSaleRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           HarvestSale { production_type: r.production_type,
                                         estimated_yield_kg: r.estimated_yield_kg,
                                         harvested_kg: r.harvested_kg,
                                         sold_kg: r.sold_kg,
                                         sale_destination: r.sale_destination,
                                         buyer: r.buyer,
                                         notes: r.notes })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = planting_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlantingPlanRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub position: i32,
    pub plot_id: Uuid,
    pub crop_type_id: Uuid,
    pub planned_area_ha: f64,
    pub planned_sowing_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl PlantingPlanRow {
    pub fn new(s: &SectionRecord<PlantingPlan>, position: i32) -> Self {
        Self { id: s.id,
               record_id: s.record_id,
               position,
               plot_id: s.data.plot_id,
               crop_type_id: s.data.crop_type_id,
               planned_area_ha: s.data.planned_area_ha,
               planned_sowing_date: s.data.planned_sowing_date,
               notes: s.data.notes.clone() }
    }
}

impl From<PlantingPlanRow> for SectionRecord<PlantingPlan> {
    fn from(r: PlantingPlanRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           PlantingPlan { plot_id: r.plot_id,
                                          crop_type_id: r.crop_type_id,
                                          planned_area_ha: r.planned_area_ha,
                                          planned_sowing_date: r.planned_sowing_date,
                                          notes: r.notes })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = inspection_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub position: i32,
    pub file_name: String,
    pub file_kind: String,
    pub storage_path: String,
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    pub captured_at: Option<DateTime<Utc>>,
}

impl FileRow {
    pub fn new(s: &SectionRecord<InspectionFile>, position: i32) -> Self {
        let d = s.data.clone();
        Self { id: s.id,
               record_id: s.record_id,
               position,
               file_name: d.file_name,
               file_kind: d.file_kind,
               storage_path: d.storage_path,
               mime_type: d.mime_type,
               size_bytes: d.size_bytes,
               captured_at: d.captured_at }
    }
}

impl From<FileRow> for SectionRecord<InspectionFile> {
    fn from(r: FileRow) -> Self {
        SectionRecord::new(r.id,
                           r.record_id,
                           InspectionFile { file_name: r.file_name,
                                            file_kind: r.file_kind,
                                            storage_path: r.storage_path,
                                            mime_type: r.mime_type,
                                            size_bytes: r.size_bytes,
                                            captured_at: r.captured_at })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crop_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CropTypeRow {
    pub id: Uuid,
    pub name: String,
    pub principal_certifiable: bool,
}

impl From<&CropType> for CropTypeRow {
    fn from(c: &CropType) -> Self {
        Self { id: c.id,
               name: c.name.clone(),
               principal_certifiable: c.principal_certifiable }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = plots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlotRow {
    pub id: Uuid,
    pub producer_code: String,
    pub plot_number: i32,
    pub area_ha: f64,
    pub rotation: Option<bool>,
    pub irrigation: Option<bool>,
    pub barrier_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude_m: Option<f64>,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&Plot> for PlotRow {
    fn from(p: &Plot) -> Self {
        Self { id: p.id,
               producer_code: p.producer_code.clone(),
               plot_number: p.plot_number,
               area_ha: p.area_ha,
               rotation: p.rotation,
               irrigation: p.irrigation,
               barrier_type: p.barrier_type.clone(),
               latitude: p.latitude,
               longitude: p.longitude,
               altitude_m: p.altitude_m,
               active: p.active,
               updated_at: p.updated_at }
    }
}

impl From<PlotRow> for Plot {
    fn from(r: PlotRow) -> Self {
        Self { id: r.id,
               producer_code: r.producer_code,
               plot_number: r.plot_number,
               area_ha: r.area_ha,
               rotation: r.rotation,
               irrigation: r.irrigation,
               barrier_type: r.barrier_type,
               latitude: r.latitude,
               longitude: r.longitude,
               altitude_m: r.altitude_m,
               active: r.active,
               updated_at: r.updated_at }
    }
}

/// Actualización parcial de parcela: los `None` no generan SET (se conserva
/// el valor actual); `updated_at` siempre se escribe.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = plots)]
pub struct PlotChanges<'a> {
    pub rotation: Option<bool>,
    pub irrigation: Option<bool>,
    pub barrier_type: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude_m: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PlotChanges<'a> {
    pub fn new(u: &'a PlotUpdate, now: DateTime<Utc>) -> Self {
        Self { rotation: u.rotation,
               irrigation: u.irrigation,
               barrier_type: u.barrier_type.as_deref(),
               latitude: u.latitude,
               longitude: u.longitude,
               altitude_m: u.altitude_m,
               updated_at: now }
    }
}
