//! Validador de reglas de negocio.
//!
//! Funciones puras por entidad: reciben una referencia, no mutan y no hacen
//! I/O. Devuelven un `ValidationReport` con TODAS las violaciones encontradas
//! (no se detienen en la primera) con el formato `campo: mensaje`, donde el
//! campo incluye sección e índice (`corrective_actions[1].description`).
//!
//! La validación del manejo de cultivo y de cosecha/venta se expone por
//! separado porque el motor la ejecuta dentro de la transacción (depende del
//! catálogo de cultivos y del orden de escritura).
use std::fmt::Display;

mod crops;
mod record;
mod sections;

pub use crops::{validate_crop_detail, validate_crop_management};
pub use record::validate_record;
pub use sections::{check_harvest_cardinality, validate_corrective_action, validate_documentation_review,
                   validate_evaluation_comments, validate_file, validate_harvest_sale, validate_livestock,
                   validate_non_conformity, validate_planting_plan, validate_plot_update, validate_sections};

/// Valores admitidos para los campos enumerados.
pub mod values {
    pub const OTHER: &str = "other";

    pub const PREVIOUS_CATEGORIES: &[&str] = &["E", "2T", "1T", "0T"];
    pub const CAPTURE_ORIGINS: &[&str] = &["online", "offline"];
    pub const RECORD_STATUSES: &[&str] = &["draft", "in_review", "approved", "rejected"];
    pub const CERTIFICATION_RESULTS: &[&str] = &["pending", "approved", "conditional", "rejected"];

    pub const COMPLIANCE_FLAGS: &[&str] = &["yes", "no", "not_applicable"];
    pub const FOLLOW_UP_STATUSES: &[&str] = &["pending", "in_progress", "resolved"];
    pub const LIVESTOCK_MANAGEMENT: &[&str] = &["stabled", "semi_stabled", "grazing", "other"];
    pub const PLOT_CONDITIONS: &[&str] = &["production", "fallow", "rotation"];
    pub const PRODUCTION_TYPES: &[&str] = &["organic", "in-transition"];
    pub const SALE_DESTINATIONS: &[&str] = &["local_market", "cooperative", "export", "self_consumption"];
    pub const FILE_KINDS: &[&str] = &["photo", "document", "sketch", "signature"];
    pub const BARRIER_TYPES: &[&str] = &["none", "live", "dead", "mixed"];

    pub const SEED_ORIGINS: &[&str] = &["own", "community", "purchased", "other"];
    pub const SEED_CATEGORIES: &[&str] = &["organic", "transition", "conventional"];
    pub const SEED_TREATMENTS: &[&str] = &["none", "natural", "chemical", "other"];
    pub const FERTILIZATION_METHODS: &[&str] = &["compost", "manure", "green_manure", "none", "other"];
    pub const WEEDING_METHODS: &[&str] = &["manual", "animal_traction", "mechanical", "other"];
    pub const HARVEST_METHODS: &[&str] = &["manual", "mechanical", "other"];

    /// Límite de texto libre (comentarios, notas).
    pub const MAX_FREE_TEXT: usize = 2000;
    pub const MAX_PRODUCER_CODE: usize = 32;
    pub const MAX_FILE_BYTES: i64 = 50 * 1024 * 1024;
}

/// Resultado de validar una entidad: `is_valid()` + lista de violaciones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// `Ok(())` si no hay violaciones; de lo contrario la lista completa.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn push(&mut self, field: impl Display, message: impl Display) {
        self.errors.push(format!("{field}: {message}"));
    }

    /// Incorpora las violaciones de otro reporte anteponiendo `scope.`.
    pub fn merge_scoped(&mut self, scope: impl Display, other: ValidationReport) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{scope}.{e}")));
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub(crate) fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "requerido");
        }
    }

    pub(crate) fn require_one_of(&mut self, field: &str, value: &str, allowed: &[&str]) {
        if !allowed.contains(&value) {
            self.push(field,
                      format!("valor '{value}' no permitido (permitidos: {})", allowed.join(", ")));
        }
    }

    pub(crate) fn optional_one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str]) {
        if let Some(v) = value {
            self.require_one_of(field, v, allowed);
        }
    }

    /// Si `choice` es el centinela `other`, `other_text` debe venir informado.
    pub(crate) fn require_other_text(&mut self, field: &str, choice: Option<&str>, other_text: Option<&str>) {
        if choice == Some(values::OTHER) && other_text.map_or(true, |t| t.trim().is_empty()) {
            self.push(format!("{field}_other"), format!("requerido cuando {field} es 'other'"));
        }
    }

    /// Rango cerrado `[min, max]`; NaN siempre queda fuera.
    pub(crate) fn require_range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        if !(value >= min && value <= max) {
            self.push(field, format!("valor {value} fuera de rango [{min}, {max}]"));
        }
    }

    pub(crate) fn require_non_negative(&mut self, field: &str, value: f64) {
        if !(value >= 0.0 && value.is_finite()) {
            self.push(field, format!("valor {value} debe ser >= 0"));
        }
    }

    /// Superficie en hectáreas: estrictamente positiva y acotada.
    pub(crate) fn require_area(&mut self, field: &str, value: f64) {
        if !(value > 0.0 && value <= 1000.0) {
            self.push(field, format!("superficie {value} fuera de rango (0, 1000]"));
        }
    }

    pub(crate) fn limit_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(v) = value {
            let len = v.chars().count();
            if len > max {
                self.push(field, format!("longitud {len} excede el máximo {max}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_scoped_prefixes_every_error() {
        let mut inner = ValidationReport::new();
        inner.require_text("description", " ");
        inner.require_one_of("status", "x", &["a", "b"]);
        let mut outer = ValidationReport::new();
        outer.merge_scoped("non_conformities[2]", inner);
        assert_eq!(outer.errors().len(), 2);
        assert_eq!(outer.errors()[0], "non_conformities[2].description: requerido");
        assert!(outer.errors()[1].starts_with("non_conformities[2].status: valor 'x' no permitido"));
    }

    #[test]
    fn other_text_only_required_for_other_choice() {
        let mut r = ValidationReport::new();
        r.require_other_text("seed_origin", Some("own"), None);
        r.require_other_text("seed_origin", None, None);
        assert!(r.is_valid());
        r.require_other_text("seed_origin", Some("other"), Some("  "));
        assert_eq!(r.into_errors(), vec!["seed_origin_other: requerido cuando seed_origin es 'other'".to_string()]);
    }

    #[test]
    fn range_rejects_nan() {
        let mut r = ValidationReport::new();
        r.require_range("latitude", f64::NAN, -90.0, 90.0);
        assert!(!r.is_valid());
    }
}
