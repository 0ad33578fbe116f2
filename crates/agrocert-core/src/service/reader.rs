use uuid::Uuid;

use agrocert_domain::InspectionAggregate;

use crate::store::{AggregateReader, StoreResult};

/// Compone el agregado: una lectura de la raíz y luego una lectura por
/// sección, en paralelo sobre el pool de rayon. `None` si la ficha no
/// existe. El primer error de sección (en orden de campos) se propaga.
pub fn load_view<R>(reader: &R, record_id: Uuid) -> StoreResult<Option<InspectionAggregate>>
    where R: AggregateReader + ?Sized
{
    let Some(record) = reader.find_record(record_id)? else {
        return Ok(None);
    };

    let mut documentation_review: StoreResult<Option<_>> = Ok(None);
    let mut corrective_actions: StoreResult<Vec<_>> = Ok(Vec::new());
    let mut non_conformities: StoreResult<Vec<_>> = Ok(Vec::new());
    let mut risk_mitigation: StoreResult<Option<_>> = Ok(None);
    let mut post_harvest: StoreResult<Option<_>> = Ok(None);
    let mut knowledge: StoreResult<Option<_>> = Ok(None);
    let mut livestock: StoreResult<Vec<_>> = Ok(Vec::new());
    let mut crop_details: StoreResult<Vec<_>> = Ok(Vec::new());
    let mut harvest_sale: StoreResult<Option<_>> = Ok(None);
    let mut planting_plans: StoreResult<Vec<_>> = Ok(Vec::new());
    let mut files: StoreResult<Vec<_>> = Ok(Vec::new());

    rayon::scope(|s| {
        s.spawn(|_| documentation_review = reader.documentation_review(record_id));
        s.spawn(|_| corrective_actions = reader.corrective_actions(record_id));
        s.spawn(|_| non_conformities = reader.non_conformities(record_id));
        s.spawn(|_| risk_mitigation = reader.risk_mitigation(record_id));
        s.spawn(|_| post_harvest = reader.post_harvest(record_id));
        s.spawn(|_| knowledge = reader.knowledge(record_id));
        s.spawn(|_| livestock = reader.livestock(record_id));
        s.spawn(|_| crop_details = reader.crop_details(record_id));
        s.spawn(|_| harvest_sale = reader.harvest_sale(record_id));
        s.spawn(|_| planting_plans = reader.planting_plans(record_id));
        s.spawn(|_| files = reader.files(record_id));
    });

    Ok(Some(InspectionAggregate { record,
                                  documentation_review: documentation_review?,
                                  corrective_actions: corrective_actions?,
                                  non_conformities: non_conformities?,
                                  risk_mitigation: risk_mitigation?,
                                  post_harvest: post_harvest?,
                                  knowledge: knowledge?,
                                  livestock: livestock?,
                                  crop_details: crop_details?,
                                  harvest_sale: harvest_sale?,
                                  planting_plans: planting_plans?,
                                  files: files? }))
}
