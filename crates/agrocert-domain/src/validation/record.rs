use super::values::{CAPTURE_ORIGINS, CERTIFICATION_RESULTS, MAX_FREE_TEXT, MAX_PRODUCER_CODE, PREVIOUS_CATEGORIES,
                    RECORD_STATUSES};
use super::ValidationReport;
use crate::record::InspectionRecordInput;

/// Reglas de la ficha raíz.
pub fn validate_record(input: &InspectionRecordInput) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.require_text("producer_code", &input.producer_code);
    r.limit_text("producer_code", Some(&input.producer_code), MAX_PRODUCER_CODE);
    if !(2000..=2100).contains(&input.cycle_year) {
        r.push("cycle_year", format!("gestión {} fuera de rango [2000, 2100]", input.cycle_year));
    }
    r.require_text("inspector", &input.inspector);
    r.optional_one_of("previous_category", input.previous_category.as_deref(), PREVIOUS_CATEGORIES);
    r.require_one_of("capture_origin", &input.capture_origin, CAPTURE_ORIGINS);
    // captura offline: el dispositivo de origen es parte de los metadatos de sincronización
    if input.capture_origin == "offline" && input.device_id.as_deref().map_or(true, |d| d.trim().is_empty()) {
        r.push("device_id", "requerido cuando capture_origin es 'offline'");
    }
    r.require_one_of("status", &input.status, RECORD_STATUSES);
    r.require_one_of("certification_result", &input.certification_result, CERTIFICATION_RESULTS);
    r.limit_text("comments", input.comments.as_deref(), MAX_FREE_TEXT);
    r.require_text("created_by", &input.created_by);
    r
}
