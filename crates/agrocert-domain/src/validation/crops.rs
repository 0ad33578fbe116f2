use super::values::{FERTILIZATION_METHODS, HARVEST_METHODS, MAX_FREE_TEXT, PLOT_CONDITIONS, SEED_CATEGORIES,
                    SEED_ORIGINS, SEED_TREATMENTS, WEEDING_METHODS};
use super::ValidationReport;
use crate::sections::{CropManagement, PlotCropDetail};

pub fn validate_crop_detail(detail: &PlotCropDetail) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.require_area("area_ha", detail.area_ha);
    r.require_one_of("plot_condition", &detail.plot_condition, PLOT_CONDITIONS);
    r.limit_text("notes", detail.notes.as_deref(), MAX_FREE_TEXT);
    r
}

/// Reglas del manejo de cultivo. Sólo se invoca cuando el cultivo es
/// principal certificable y el payload trae procedencia de semilla.
pub fn validate_crop_management(m: &CropManagement) -> ValidationReport {
    let mut r = ValidationReport::new();
    match m.seed_origin.as_deref() {
        Some(origin) if !origin.trim().is_empty() => r.require_one_of("seed_origin", origin, SEED_ORIGINS),
        _ => r.push("seed_origin", "requerido"),
    }
    r.require_other_text("seed_origin", m.seed_origin.as_deref(), m.seed_origin_other.as_deref());

    r.optional_one_of("seed_category", m.seed_category.as_deref(), SEED_CATEGORIES);

    r.optional_one_of("seed_treatment", m.seed_treatment.as_deref(), SEED_TREATMENTS);
    r.require_other_text("seed_treatment", m.seed_treatment.as_deref(), m.seed_treatment_other.as_deref());

    r.optional_one_of("fertilization_method", m.fertilization_method.as_deref(), FERTILIZATION_METHODS);
    r.require_other_text("fertilization_method",
                         m.fertilization_method.as_deref(),
                         m.fertilization_method_other.as_deref());

    r.optional_one_of("weeding_method", m.weeding_method.as_deref(), WEEDING_METHODS);
    r.require_other_text("weeding_method", m.weeding_method.as_deref(), m.weeding_method_other.as_deref());

    r.optional_one_of("harvest_method", m.harvest_method.as_deref(), HARVEST_METHODS);
    r.require_other_text("harvest_method", m.harvest_method.as_deref(), m.harvest_method_other.as_deref());
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn management_other_choices_need_their_text() {
        let m = CropManagement { seed_origin: Some("other".into()),
                                 seed_treatment: Some("natural".into()),
                                 weeding_method: Some("other".into()),
                                 weeding_method_other: Some("con azadón".into()),
                                 harvest_method: Some("other".into()),
                                 ..Default::default() };
        let report = validate_crop_management(&m);
        assert_eq!(report.errors(),
                   ["seed_origin_other: requerido cuando seed_origin es 'other'",
                    "harvest_method_other: requerido cuando harvest_method es 'other'"]);
    }

    #[test]
    fn management_rejects_unknown_seed_category() {
        let m = CropManagement { seed_origin: Some("own".into()),
                                 seed_category: Some("hybrid".into()),
                                 ..Default::default() };
        let report = validate_crop_management(&m);
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].starts_with("seed_category"));
    }
}
