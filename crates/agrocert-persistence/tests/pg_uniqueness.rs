
use agrocert_core::{AggregateError, AggregateReader, AggregateStore, AggregateTx, InspectionService, StoreResult};
use agrocert_domain::{CorrectiveAction, CropDetailView, DocumentationReview, HarvestSale, InspectionFile,
                      InspectionRecord, KnowledgeEvaluation, LivestockActivity, NonConformity, PlantingPlan,
                      PostHarvestEvaluation, RiskMitigationEvaluation, SectionRecord};
use agrocert_persistence::{PgAggregateStore, PoolProvider};
use test_support::*;
use uuid::Uuid;

/// Almacén cuyo chequeo previo nunca encuentra la clave: el rechazo tiene
/// que venir de la restricción única de Postgres.
struct BlindPrecheck(PgAggregateStore<PoolProvider>);

impl AggregateReader for BlindPrecheck {
    fn find_record(&self, id: Uuid) -> StoreResult<Option<InspectionRecord>> {
        self.0.find_record(id)
    }
    fn find_record_by_producer_cycle(&self, _: &str, _: i32) -> StoreResult<Option<InspectionRecord>> {
        Ok(None)
    }
    fn documentation_review(&self, id: Uuid) -> StoreResult<Option<SectionRecord<DocumentationReview>>> {
        self.0.documentation_review(id)
    }
    fn corrective_actions(&self, id: Uuid) -> StoreResult<Vec<SectionRecord<CorrectiveAction>>> {
        self.0.corrective_actions(id)
    }
    fn non_conformities(&self, id: Uuid) -> StoreResult<Vec<SectionRecord<NonConformity>>> {
        self.0.non_conformities(id)
    }
    fn risk_mitigation(&self, id: Uuid) -> StoreResult<Option<SectionRecord<RiskMitigationEvaluation>>> {
        self.0.risk_mitigation(id)
    }
    fn post_harvest(&self, id: Uuid) -> StoreResult<Option<SectionRecord<PostHarvestEvaluation>>> {
        self.0.post_harvest(id)
    }
    fn knowledge(&self, id: Uuid) -> StoreResult<Option<SectionRecord<KnowledgeEvaluation>>> {
        self.0.knowledge(id)
    }
    fn livestock(&self, id: Uuid) -> StoreResult<Vec<SectionRecord<LivestockActivity>>> {
        self.0.livestock(id)
    }
    fn crop_details(&self, id: Uuid) -> StoreResult<Vec<CropDetailView>> {
        self.0.crop_details(id)
    }
    fn harvest_sale(&self, id: Uuid) -> StoreResult<Option<SectionRecord<HarvestSale>>> {
        self.0.harvest_sale(id)
    }
    fn planting_plans(&self, id: Uuid) -> StoreResult<Vec<SectionRecord<PlantingPlan>>> {
        self.0.planting_plans(id)
    }
    fn files(&self, id: Uuid) -> StoreResult<Vec<SectionRecord<InspectionFile>>> {
        self.0.files(id)
    }
}

impl AggregateStore for BlindPrecheck {
    fn transaction<T, F>(&self, work: F) -> StoreResult<T>
        where F: FnOnce(&mut dyn AggregateTx) -> StoreResult<T>
    {
        self.0.transaction(work)
    }

    fn delete_record(&self, id: Uuid) -> StoreResult<bool> {
        self.0.delete_record(id)
    }
}

#[test]
fn unique_constraint_on_insert_is_reported_as_duplicate() {
    let Some(pool) = TEST_POOL.as_ref() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let (store, _, _) = seeded_store(pool);
    let svc = InspectionService::new(BlindPrecheck(store));
    let producer = unique_producer();

    let first = svc.create_aggregate(record(&producer, 2024), minimal_sections()).expect("first");
    let err = svc.create_aggregate(record(&producer, 2024), minimal_sections()).unwrap_err();
    assert_eq!(err,
               AggregateError::DuplicateAggregate { producer_code: producer.clone(),
                                                    cycle_year: 2024 });
    // la segunda escritura no dejó nada
    let found = svc.store().0.find_record_by_producer_cycle(&producer, 2024).unwrap().expect("first");
    assert_eq!(found.id, first.record.id);

    svc.delete_aggregate(first.record.id).expect("cleanup");
}

#[test]
fn replace_onto_key_of_another_record_is_duplicate() {
    let Some(pool) = TEST_POOL.as_ref() else {
        eprintln!("skip (no DATABASE_URL)");
        return;
    };
    let (svc, _, _) = pg_service(pool);
    let taken = unique_producer();
    let other = unique_producer();
    let a = svc.create_aggregate(record(&taken, 2024), minimal_sections()).expect("a");
    let b = svc.create_aggregate(record(&other, 2024), minimal_sections()).expect("b");

    let err = svc.replace_aggregate(b.record.id, record(&taken, 2024), minimal_sections()).unwrap_err();
    assert_eq!(err,
               AggregateError::DuplicateAggregate { producer_code: taken.clone(),
                                                    cycle_year: 2024 });
    let reloaded = svc.load_aggregate(b.record.id).expect("b intacta");
    assert_eq!(reloaded, b);

    svc.delete_aggregate(a.record.id).expect("cleanup");
    svc.delete_aggregate(b.record.id).expect("cleanup");
}
