use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadatos de un archivo adjunto. El binario vive en un almacenamiento
/// externo referenciado por `storage_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionFile {
    pub file_name: String,
    pub file_kind: String,
    pub storage_path: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub size_bytes: i64,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}
