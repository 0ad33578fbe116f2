//! Ficha de inspección: raíz del agregado.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Atributos de la ficha tal como los envía el llamador (create/replace).
///
/// No incluye identificador ni marcas de auditoría temporales: ambos los
/// asigna el motor a través de sus colaboradores (`IdGenerator`, `Clock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecordInput {
    pub producer_code: String,
    pub cycle_id: Uuid,
    pub cycle_year: i32,
    pub inspection_date: NaiveDate,
    pub inspector: String,
    #[serde(default)]
    pub interviewee: Option<String>,
    #[serde(default)]
    pub previous_category: Option<String>,
    pub capture_origin: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
    pub status: String,
    pub certification_result: String,
    #[serde(default)]
    pub comments: Option<String>,
    pub created_by: String,
}

/// Ficha persistida. Única por (`producer_code`, `cycle_year`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
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

impl InspectionRecord {
    /// Construye una ficha nueva a partir del payload; `created_at` y
    /// `updated_at` coinciden.
    pub fn from_input(id: Uuid, input: InspectionRecordInput, now: DateTime<Utc>) -> Self {
        Self { id,
               producer_code: input.producer_code,
               cycle_id: input.cycle_id,
               cycle_year: input.cycle_year,
               inspection_date: input.inspection_date,
               inspector: input.inspector,
               interviewee: input.interviewee,
               previous_category: input.previous_category,
               capture_origin: input.capture_origin,
               device_id: input.device_id,
               synced_at: input.synced_at,
               status: input.status,
               certification_result: input.certification_result,
               comments: input.comments,
               created_by: input.created_by,
               created_at: now,
               updated_at: now }
    }

    /// Reemplazo completo de los campos editables. Conserva `id`, `created_by`
    /// y `created_at`.
    pub fn replaced_with(&self, input: InspectionRecordInput, now: DateTime<Utc>) -> Self {
        Self { created_by: self.created_by.clone(),
               created_at: self.created_at,
               ..Self::from_input(self.id, input, now) }
    }
}
