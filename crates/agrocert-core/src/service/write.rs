use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use agrocert_domain::validation::{check_harvest_cardinality, validate_crop_management, validate_harvest_sale,
                                  validate_record, validate_sections};
use agrocert_domain::{AggregateSections, CropManagementRecord, InspectionAggregate, InspectionRecord,
                      InspectionRecordInput, SectionRecord, ValidationReport};

use super::{rolled_back, InspectionService};
use crate::collaborators::{Clock, IdGenerator};
use crate::errors::AggregateError;
use crate::store::{AggregateStore, AggregateTx, StoreResult};

/// Validación previa a la transacción: raíz + secciones no condicionales.
/// Todas las violaciones se reportan juntas.
pub fn validate_payload(record: &InspectionRecordInput, sections: &AggregateSections) -> Result<(), AggregateError> {
    let mut report = ValidationReport::new();
    report.merge_scoped("record", validate_record(record));
    report.merge(validate_sections(sections));
    report.into_result().map_err(AggregateError::ValidationFailed)
}

impl<S, G, C> InspectionService<S, G, C>
    where S: AggregateStore,
          G: IdGenerator,
          C: Clock
{
    /// Crea la ficha y todas sus secciones en una única transacción y
    /// devuelve el agregado leído después del commit.
    pub fn create_aggregate(&self, record: InspectionRecordInput, sections: AggregateSections)
                            -> Result<InspectionAggregate, AggregateError> {
        validate_payload(&record, &sections)?;

        // chequeo fuera de transacción; el índice único del almacén cubre la carrera
        if self.store
               .find_record_by_producer_cycle(&record.producer_code, record.cycle_year)?
               .is_some()
        {
            return Err(AggregateError::DuplicateAggregate { producer_code: record.producer_code,
                                                            cycle_year: record.cycle_year });
        }

        let now = self.clock.now();
        let root = InspectionRecord::from_input(self.ids.next_id(), record, now);
        let record_id = root.id;
        debug!("creando ficha {record_id} ({} / {})", root.producer_code, root.cycle_year);

        let written = self.store
                          .transaction(|tx| {
                              tx.insert_record(&root)?;
                              write_sections(tx, record_id, &sections, &self.ids, now)
                          })
                          .map_err(|e| rolled_back(record_id, e))?;
        debug!("ficha {record_id} confirmada con {written} filas hijas");

        self.load_aggregate(record_id)
    }
}

/// Escribe todas las secciones del payload dentro de la transacción `tx`.
/// Devuelve la cantidad de filas hijas insertadas (incluye manejos).
///
/// Orden: secciones únicas, listas, detalles de cultivo (con manejo
/// condicional), cosecha/venta y por último actualizaciones de parcela.
pub(crate) fn write_sections(tx: &mut dyn AggregateTx, record_id: Uuid, sections: &AggregateSections,
                             ids: &dyn IdGenerator, now: DateTime<Utc>)
                             -> StoreResult<usize> {
    let mut written = 0usize;
    if let Some(review) = &sections.documentation_review {
        tx.insert_documentation_review(&SectionRecord::new(ids.next_id(), record_id, review.clone()))?;
        written += 1;
    }
    if let Some(e) = &sections.risk_mitigation {
        tx.insert_risk_mitigation(&SectionRecord::new(ids.next_id(), record_id, e.clone()))?;
        written += 1;
    }
    if let Some(e) = &sections.post_harvest {
        tx.insert_post_harvest(&SectionRecord::new(ids.next_id(), record_id, e.clone()))?;
        written += 1;
    }
    if let Some(e) = &sections.knowledge {
        tx.insert_knowledge(&SectionRecord::new(ids.next_id(), record_id, e.clone()))?;
        written += 1;
    }

    for (position, action) in (0..).zip(&sections.corrective_actions) {
        tx.insert_corrective_action(&SectionRecord::new(ids.next_id(), record_id, action.clone()), position)?;
        written += 1;
    }
    for (position, nc) in (0..).zip(&sections.non_conformities) {
        tx.insert_non_conformity(&SectionRecord::new(ids.next_id(), record_id, nc.clone()), position)?;
        written += 1;
    }
    for (position, activity) in (0..).zip(&sections.livestock) {
        tx.insert_livestock(&SectionRecord::new(ids.next_id(), record_id, activity.clone()), position)?;
        written += 1;
    }
    for (position, plan) in (0..).zip(&sections.planting_plans) {
        tx.insert_planting_plan(&SectionRecord::new(ids.next_id(), record_id, plan.clone()), position)?;
        written += 1;
    }
    for (position, file) in (0..).zip(&sections.files) {
        tx.insert_file(&SectionRecord::new(ids.next_id(), record_id, file.clone()), position)?;
        written += 1;
    }

    written += write_crop_details(tx, record_id, sections, ids)?;

    let sale = check_harvest_cardinality(&sections.harvest_sales).map_err(AggregateError::CardinalityViolation)?;
    let mut report = ValidationReport::new();
    report.merge_scoped("harvest_sales[0]", validate_harvest_sale(sale));
    report.into_result().map_err(AggregateError::ValidationFailed)?;
    tx.insert_harvest_sale(&SectionRecord::new(ids.next_id(), record_id, sale.clone()))?;
    written += 1;

    for update in &sections.plot_updates {
        if !tx.apply_plot_update(update, now)? {
            debug!("parcela {} inexistente o inactiva: actualización omitida", update.plot_id);
        }
    }

    Ok(written)
}

/// Detalles de cultivo. El manejo se persiste sólo si el cultivo es
/// principal certificable y el payload trae procedencia de semilla; en
/// cualquier otro caso los datos de manejo se descartan sin error.
fn write_crop_details(tx: &mut dyn AggregateTx, record_id: Uuid, sections: &AggregateSections,
                      ids: &dyn IdGenerator)
                      -> StoreResult<usize> {
    let mut written = 0usize;
    for (i, input) in sections.crop_details.iter().enumerate() {
        let certifiable = tx.is_certifiable(input.detail.crop_type_id)?;
        let detail = SectionRecord::new(ids.next_id(), record_id, input.detail.clone());
        tx.insert_crop_detail(&detail, i as i32)?;
        written += 1;

        match (certifiable, input.management_with_seed_origin()) {
            (true, Some(management)) => {
                let mut report = ValidationReport::new();
                report.merge_scoped(format!("crop_details[{i}].management"), validate_crop_management(management));
                report.into_result().map_err(AggregateError::ValidationFailed)?;
                tx.insert_crop_management(&CropManagementRecord { id: ids.next_id(),
                                                                  crop_detail_id: detail.id,
                                                                  data: management.clone() })?;
                written += 1;
            }
            _ if input.management.is_some() => {
                debug!("crop_details[{i}]: manejo descartado (certificable = {certifiable}, sin procedencia o no aplica)");
            }
            _ => {}
        }
    }
    Ok(written)
}
