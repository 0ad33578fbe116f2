use std::collections::HashSet;

use super::crops::validate_crop_detail;
use super::values::{BARRIER_TYPES, COMPLIANCE_FLAGS, FILE_KINDS, FOLLOW_UP_STATUSES, LIVESTOCK_MANAGEMENT,
                    MAX_FILE_BYTES, MAX_FREE_TEXT, PRODUCTION_TYPES, SALE_DESTINATIONS};
use super::ValidationReport;
use crate::sections::{AggregateSections, CorrectiveAction, DocumentationReview, HarvestSale, InspectionFile,
                      LivestockActivity, NonConformity, PlantingPlan, PlotUpdate};

pub fn validate_documentation_review(review: &DocumentationReview) -> ValidationReport {
    let mut r = ValidationReport::new();
    for (field, value) in review.flags() {
        r.require_one_of(field, value, COMPLIANCE_FLAGS);
    }
    r.limit_text("notes", review.notes.as_deref(), MAX_FREE_TEXT);
    r
}

pub fn validate_corrective_action(action: &CorrectiveAction) -> ValidationReport {
    let mut r = ValidationReport::new();
    if action.sequence < 1 {
        r.push("sequence", format!("debe ser >= 1 (recibido {})", action.sequence));
    }
    r.require_text("description", &action.description);
    r.limit_text("description", Some(&action.description), MAX_FREE_TEXT);
    r.limit_text("implementation", action.implementation.as_deref(), MAX_FREE_TEXT);
    r
}

pub fn validate_non_conformity(nc: &NonConformity) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.require_text("description", &nc.description);
    r.limit_text("description", Some(&nc.description), MAX_FREE_TEXT);
    r.limit_text("proposed_action", nc.proposed_action.as_deref(), MAX_FREE_TEXT);
    r.require_one_of("follow_up_status", &nc.follow_up_status, FOLLOW_UP_STATUSES);
    r.limit_text("follow_up_notes", nc.follow_up_notes.as_deref(), MAX_FREE_TEXT);
    r
}

/// Las tres evaluaciones (mitigación, poscosecha, conocimiento) sólo
/// restringen su texto libre.
pub fn validate_evaluation_comments(comments: Option<&str>) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.limit_text("comments", comments, MAX_FREE_TEXT);
    r
}

pub fn validate_livestock(activity: &LivestockActivity) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.require_text("species", &activity.species);
    if !(0..=10_000).contains(&activity.quantity) {
        r.push("quantity", format!("cantidad {} fuera de rango [0, 10000]", activity.quantity));
    }
    r.require_one_of("management_method", &activity.management_method, LIVESTOCK_MANAGEMENT);
    r.require_other_text("management_method",
                         Some(activity.management_method.as_str()),
                         activity.management_method_other.as_deref());
    r
}

pub fn validate_planting_plan(plan: &PlantingPlan) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.require_area("planned_area_ha", plan.planned_area_ha);
    r.limit_text("notes", plan.notes.as_deref(), MAX_FREE_TEXT);
    r
}

pub fn validate_file(file: &InspectionFile) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.require_text("file_name", &file.file_name);
    r.require_one_of("file_kind", &file.file_kind, FILE_KINDS);
    r.require_text("storage_path", &file.storage_path);
    if !(1..=MAX_FILE_BYTES).contains(&file.size_bytes) {
        r.push("size_bytes", format!("tamaño {} fuera de rango [1, {MAX_FILE_BYTES}]", file.size_bytes));
    }
    r
}

pub fn validate_plot_update(update: &PlotUpdate) -> ValidationReport {
    let mut r = ValidationReport::new();
    r.optional_one_of("barrier_type", update.barrier_type.as_deref(), BARRIER_TYPES);
    match (update.latitude, update.longitude) {
        (Some(lat), Some(lon)) => {
            r.require_range("latitude", lat, -90.0, 90.0);
            r.require_range("longitude", lon, -180.0, 180.0);
        }
        (None, None) => {}
        _ => r.push("latitude", "latitud y longitud se informan juntas"),
    }
    if let Some(alt) = update.altitude_m {
        r.require_range("altitude_m", alt, -500.0, 9000.0);
    }
    r
}

/// Campos de cosecha/venta. El discriminador `production_type` se controla
/// en `check_harvest_cardinality`.
pub fn validate_harvest_sale(sale: &HarvestSale) -> ValidationReport {
    let mut r = ValidationReport::new();
    if let Some(est) = sale.estimated_yield_kg {
        r.require_non_negative("estimated_yield_kg", est);
    }
    r.require_non_negative("harvested_kg", sale.harvested_kg);
    r.require_non_negative("sold_kg", sale.sold_kg);
    if sale.sold_kg > sale.harvested_kg {
        r.push("sold_kg",
               format!("venta {} kg excede lo cosechado {} kg", sale.sold_kg, sale.harvested_kg));
    }
    r.optional_one_of("sale_destination", sale.sale_destination.as_deref(), SALE_DESTINATIONS);
    r.limit_text("notes", sale.notes.as_deref(), MAX_FREE_TEXT);
    r
}

/// Invariante de cardinalidad: exactamente una cosecha/venta con
/// discriminador `organic` o `in-transition`. Devuelve el único elemento o el
/// motivo de la violación.
pub fn check_harvest_cardinality(sales: &[HarvestSale]) -> Result<&HarvestSale, String> {
    match sales {
        [sale] if PRODUCTION_TYPES.contains(&sale.production_type.as_str()) => Ok(sale),
        [sale] => Err(format!("production_type '{}' inválido (permitidos: {})",
                              sale.production_type,
                              PRODUCTION_TYPES.join(", "))),
        other => Err(format!("se esperaba exactamente 1 registro de cosecha/venta, se recibieron {}",
                             other.len())),
    }
}

/// Validación previa a la transacción: todas las secciones salvo el manejo
/// condicional y la cosecha/venta, más las reglas de colección (unicidad de
/// secuencias, pares parcela-cultivo y planes por parcela).
pub fn validate_sections(sections: &AggregateSections) -> ValidationReport {
    let mut r = ValidationReport::new();

    if let Some(review) = &sections.documentation_review {
        r.merge_scoped("documentation_review", validate_documentation_review(review));
    }

    let mut sequences = HashSet::new();
    for (i, action) in sections.corrective_actions.iter().enumerate() {
        r.merge_scoped(format!("corrective_actions[{i}]"), validate_corrective_action(action));
        if !sequences.insert(action.sequence) {
            r.push(format!("corrective_actions[{i}].sequence"),
                   format!("secuencia {} duplicada", action.sequence));
        }
    }

    for (i, nc) in sections.non_conformities.iter().enumerate() {
        r.merge_scoped(format!("non_conformities[{i}]"), validate_non_conformity(nc));
    }

    if let Some(e) = &sections.risk_mitigation {
        r.merge_scoped("risk_mitigation", validate_evaluation_comments(e.comments.as_deref()));
    }
    if let Some(e) = &sections.post_harvest {
        r.merge_scoped("post_harvest", validate_evaluation_comments(e.comments.as_deref()));
    }
    if let Some(e) = &sections.knowledge {
        r.merge_scoped("knowledge", validate_evaluation_comments(e.comments.as_deref()));
    }

    for (i, activity) in sections.livestock.iter().enumerate() {
        r.merge_scoped(format!("livestock[{i}]"), validate_livestock(activity));
    }

    let mut pairs = HashSet::new();
    for (i, input) in sections.crop_details.iter().enumerate() {
        r.merge_scoped(format!("crop_details[{i}]"), validate_crop_detail(&input.detail));
        if !pairs.insert((input.detail.plot_id, input.detail.crop_type_id)) {
            r.push(format!("crop_details[{i}]"),
                   format!("parcela {} con cultivo {} duplicada",
                           input.detail.plot_id, input.detail.crop_type_id));
        }
    }

    let mut planned_plots = HashSet::new();
    for (i, plan) in sections.planting_plans.iter().enumerate() {
        r.merge_scoped(format!("planting_plans[{i}]"), validate_planting_plan(plan));
        if !planned_plots.insert(plan.plot_id) {
            r.push(format!("planting_plans[{i}].plot_id"),
                   format!("parcela {} ya tiene plan de siembra", plan.plot_id));
        }
    }

    for (i, file) in sections.files.iter().enumerate() {
        r.merge_scoped(format!("files[{i}]"), validate_file(file));
    }

    for (i, update) in sections.plot_updates.iter().enumerate() {
        r.merge_scoped(format!("plot_updates[{i}]"), validate_plot_update(update));
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(kind: &str) -> HarvestSale {
        HarvestSale { production_type: kind.into(),
                      estimated_yield_kg: Some(900.0),
                      harvested_kg: 850.0,
                      sold_kg: 600.0,
                      sale_destination: Some("cooperative".into()),
                      buyer: None,
                      notes: None }
    }

    #[test]
    fn cardinality_accepts_single_valid_discriminator() {
        let sales = vec![sale("in-transition")];
        assert!(check_harvest_cardinality(&sales).is_ok());
    }

    #[test]
    fn cardinality_rejects_zero_two_and_unknown_type() {
        assert!(check_harvest_cardinality(&[]).is_err());
        assert!(check_harvest_cardinality(&[sale("organic"), sale("organic")]).is_err());
        let err = check_harvest_cardinality(&[sale("conventional")]).unwrap_err();
        assert!(err.contains("conventional"));
    }

    #[test]
    fn sold_cannot_exceed_harvested() {
        let mut s = sale("organic");
        s.sold_kg = 900.0;
        let report = validate_harvest_sale(&s);
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].starts_with("sold_kg"));
    }

    #[test]
    fn livestock_other_method_needs_text() {
        let a = LivestockActivity { species: "ovino".into(),
                                    quantity: 12,
                                    management_method: "other".into(),
                                    management_method_other: None,
                                    manure_use: Some("abono".into()) };
        let report = validate_livestock(&a);
        assert_eq!(report.errors(), ["management_method_other: requerido cuando management_method es 'other'"]);
    }

    #[test]
    fn plot_update_requires_paired_coordinates() {
        let u = PlotUpdate { latitude: Some(-19.5), ..Default::default() };
        assert!(!validate_plot_update(&u).is_valid());
        let u = PlotUpdate { latitude: Some(-19.5), longitude: Some(-65.2), altitude_m: Some(2800.0), ..Default::default() };
        assert!(validate_plot_update(&u).is_valid());
    }
}
