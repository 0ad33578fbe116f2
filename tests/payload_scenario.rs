//! Escenario completo a través de la fachada: payload JSON tal como lo
//! envía un cliente, alta, relectura y reemplazo sobre el backend en memoria.

use agrocert::core::{FixedClock, SequentialIds};
use agrocert::domain::{CropType, Plot};
use agrocert::{AggregateError, AggregateSections, InMemoryAggregateStore, InspectionRecordInput, InspectionService};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

const PAYLOAD: &str = include_str!("data/ficha_p001_2024.json");

const PLOT_1: Uuid = Uuid::from_u128(0xA001);
const PLOT_2: Uuid = Uuid::from_u128(0xA002);
const QUINOA: Uuid = Uuid::from_u128(0xC001);
const BROAD_BEAN: Uuid = Uuid::from_u128(0xC002);

#[derive(Deserialize)]
struct Payload {
    record: InspectionRecordInput,
    sections: AggregateSections,
}

fn payload() -> Payload {
    serde_json::from_str(PAYLOAD).expect("payload de prueba")
}

fn plot(id: Uuid, number: i32) -> Plot {
    Plot { id,
           producer_code: "P001".into(),
           plot_number: number,
           area_ha: 2.0,
           rotation: Some(true),
           irrigation: Some(true),
           barrier_type: Some("dead".into()),
           latitude: None,
           longitude: None,
           altitude_m: Some(3700.0),
           active: true,
           updated_at: Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap() }
}

fn service() -> InspectionService<InMemoryAggregateStore, SequentialIds, FixedClock> {
    let store = InMemoryAggregateStore::new().with_crop_type(CropType { id: QUINOA,
                                                                        name: "Quinua".into(),
                                                                        principal_certifiable: true })
                                             .with_crop_type(CropType { id: BROAD_BEAN,
                                                                        name: "Haba".into(),
                                                                        principal_certifiable: false })
                                             .with_plot(plot(PLOT_1, 1))
                                             .with_plot(plot(PLOT_2, 2));
    let now = Utc.with_ymd_and_hms(2024, 6, 14, 9, 0, 0).unwrap();
    InspectionService::with_collaborators(store, SequentialIds::default(), FixedClock(now))
}

#[test]
fn client_payload_creates_full_aggregate() {
    let svc = service();
    let Payload { record, sections } = payload();
    let agg = svc.create_aggregate(record, sections).expect("create");

    assert_eq!(agg.record.producer_code, "P001");
    assert_eq!(agg.record.device_id.as_deref(), Some("tablet-07"));
    assert!(agg.documentation_review.is_some());
    let seqs: Vec<i32> = agg.corrective_actions.iter().map(|c| c.data.sequence).collect();
    assert_eq!(seqs, vec![1, 2]);
    assert_eq!(agg.non_conformities.len(), 1);
    assert!(agg.post_harvest.is_none());
    assert_eq!(agg.livestock[0].data.species, "llama");

    // el manejo sólo sobrevive en el cultivo principal certificable
    assert_eq!(agg.crop_details.len(), 2);
    assert_eq!(agg.crop_details[0].crop_name, "Quinua");
    assert!(agg.crop_details[0].management.is_some());
    assert_eq!(agg.crop_details[1].crop_name, "Haba");
    assert!(agg.crop_details[1].management.is_none());

    let harvest = agg.harvest_sale.as_ref().expect("cosecha");
    assert_eq!(harvest.data.production_type, "organic");

    let updated = svc.store().plot(PLOT_1).unwrap().expect("parcela");
    assert_eq!(updated.irrigation, Some(false));
    assert_eq!(updated.latitude, Some(-19.58));
    assert_eq!(updated.barrier_type.as_deref(), Some("dead"));
}

#[test]
fn aggregate_serializes_back_to_json() {
    let svc = service();
    let Payload { record, sections } = payload();
    let agg = svc.create_aggregate(record, sections).expect("create");

    let json = serde_json::to_value(&agg).expect("json");
    assert_eq!(json["record"]["cycle_year"], 2024);
    assert_eq!(json["harvest_sale"]["production_type"], "organic");
    assert_eq!(json["crop_details"][0]["crop_name"], "Quinua");
    assert_eq!(json["crop_details"][0]["management"]["seed_origin"], "own");
}

#[test]
fn resubmitting_same_payload_is_duplicate_until_replaced() {
    let svc = service();
    let first = payload();
    let created = svc.create_aggregate(first.record, first.sections).expect("create");

    let again = payload();
    let err = svc.create_aggregate(again.record, again.sections).unwrap_err();
    assert!(matches!(err, AggregateError::DuplicateAggregate { .. }));

    let third = payload();
    let replaced = svc.replace_aggregate(created.record.id, third.record, third.sections).expect("replace");
    assert_eq!(replaced.record, created.record);
    assert_eq!(replaced.crop_details.len(), created.crop_details.len());
}
