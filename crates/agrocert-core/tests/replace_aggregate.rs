
use std::sync::atomic::{AtomicI64, Ordering};

use agrocert_core::{AggregateError, Clock, InspectionService, SequentialIds};
use agrocert_domain::AggregateSections;
use chrono::{DateTime, Duration, Utc};
use fixtures::*;
use uuid::Uuid;

#[test]
fn replace_twice_keeps_root_values_but_regenerates_child_ids() {
    let svc = service();
    let created = svc.create_aggregate(record("P020", 2024), full_sections()).expect("create");
    let id = created.record.id;

    let first = svc.replace_aggregate(id, record("P020", 2024), full_sections()).expect("replace 1");
    let second = svc.replace_aggregate(id, record("P020", 2024), full_sections()).expect("replace 2");

    assert_eq!(first.record, second.record);
    assert_eq!(second.record.id, id);
    let a = first.child_ids();
    let b = second.child_ids();
    assert_eq!(a.len(), b.len());
    assert!(a.iter().all(|x| !b.contains(x)), "los ids hijos deben regenerarse");
    assert!(created.child_ids().iter().all(|x| !a.contains(x)));
}

/// Reloj que avanza una hora en cada lectura.
struct TickingClock(AtomicI64);

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        now() + Duration::hours(self.0.fetch_add(1, Ordering::SeqCst))
    }
}

#[test]
fn replace_keeps_creation_audit_and_updates_timestamp() {
    let svc = InspectionService::with_collaborators(seeded_store(), SequentialIds::default(), TickingClock(AtomicI64::new(0)));
    let created = svc.create_aggregate(record("P021", 2024), minimal_sections()).expect("create");

    let mut root = record("P021", 2024);
    root.created_by = "otro-usuario".into();
    root.status = "in_review".into();
    let replaced = svc.replace_aggregate(created.record.id, root, minimal_sections()).expect("replace");

    assert_eq!(replaced.record.created_by, "inspector07");
    assert_eq!(replaced.record.created_at, now());
    assert_eq!(replaced.record.updated_at, now() + Duration::hours(1));
    assert_eq!(replaced.record.status, "in_review");
}

#[test]
fn replace_is_full_replacement_not_patch() {
    let svc = service();
    let created = svc.create_aggregate(record("P022", 2024), full_sections()).expect("create");
    let replaced = svc.replace_aggregate(created.record.id, record("P022", 2024), minimal_sections())
                      .expect("replace");
    assert!(replaced.documentation_review.is_none());
    assert!(replaced.corrective_actions.is_empty());
    assert!(replaced.crop_details.is_empty());
    assert!(replaced.harvest_sale.is_some());
    // raíz + cosecha; los manejos cayeron con sus detalles
    assert_eq!(svc.store().owned_row_count().unwrap(), 2);
}

#[test]
fn replace_of_missing_root_is_not_found() {
    let svc = service();
    let missing = Uuid::from_u128(0xFFFF);
    let err = svc.replace_aggregate(missing, record("P023", 2024), minimal_sections()).unwrap_err();
    assert_eq!(err, AggregateError::NotFound(missing));
    assert_eq!(svc.store().owned_row_count().unwrap(), 0);
}

#[test]
fn failed_replace_leaves_previous_aggregate_intact() {
    let svc = service();
    let created = svc.create_aggregate(record("P024", 2024), full_sections()).expect("create");
    let broken = AggregateSections { harvest_sales: vec![],
                                     ..minimal_sections() };
    let mut root = record("P024", 2024);
    root.comments = Some("no debe persistir".into());

    let err = svc.replace_aggregate(created.record.id, root, broken).unwrap_err();
    assert!(matches!(err, AggregateError::CardinalityViolation(_)));
    assert_eq!(svc.load_aggregate(created.record.id).expect("load"), created);
}

#[test]
fn replace_onto_taken_producer_cycle_is_duplicate() {
    let svc = service();
    svc.create_aggregate(record("P025", 2024), minimal_sections()).expect("a");
    let b = svc.create_aggregate(record("P026", 2024), minimal_sections()).expect("b");
    let err = svc.replace_aggregate(b.record.id, record("P025", 2024), minimal_sections())
                 .unwrap_err();
    assert!(matches!(err, AggregateError::DuplicateAggregate { cycle_year: 2024, .. }));
    assert_eq!(svc.load_aggregate(b.record.id).unwrap().record.producer_code, "P026");
}

#[test]
fn delete_cascades_and_missing_is_not_found() {
    let svc = service();
    let created = svc.create_aggregate(record("P027", 2024), full_sections()).expect("create");
    let id = created.record.id;
    svc.delete_aggregate(id).expect("delete");
    assert_eq!(svc.store().owned_row_count().unwrap(), 0);
    assert_eq!(svc.load_aggregate(id).unwrap_err(), AggregateError::NotFound(id));
    assert_eq!(svc.delete_aggregate(id).unwrap_err(), AggregateError::NotFound(id));
    // la clave natural queda libre
    svc.create_aggregate(record("P027", 2024), minimal_sections()).expect("recreate");
}

#[test]
fn find_by_producer_and_cycle_returns_composed_view() {
    let svc = service();
    let created = svc.create_aggregate(record("P028", 2024), full_sections()).expect("create");
    let found = svc.find_by_producer_and_cycle("P028", 2024).unwrap().expect("found");
    assert_eq!(found, created);
    assert!(svc.find_by_producer_and_cycle("P028", 2023).unwrap().is_none());
}
