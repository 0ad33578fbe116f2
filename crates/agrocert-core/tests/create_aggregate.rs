
use agrocert_core::AggregateError;
use agrocert_domain::{AggregateSections, CropManagement};
use fixtures::*;

#[test]
fn p001_2024_scenario() {
    let svc = service();
    let sections = AggregateSections { documentation_review: Some(documentation()),
                                       crop_details: vec![crop(PLOT_A, QUINOA, Some(seed_management()))],
                                       harvest_sales: vec![harvest("organic")],
                                       ..Default::default() };
    let created = svc.create_aggregate(record("P001", 2024), sections).expect("create");

    let loaded = svc.load_aggregate(created.record.id).expect("load");
    assert!(loaded.documentation_review.is_some());
    assert!(loaded.corrective_actions.is_empty());
    assert_eq!(loaded.harvest_sale.as_ref().map(|h| h.data.production_type.as_str()), Some("organic"));
    assert_eq!(loaded.crop_details.len(), 1);
    let detail = &loaded.crop_details[0];
    assert_eq!(detail.crop_name, "Quinua");
    assert!(detail.principal_certifiable);
    let manejo = detail.management.as_ref().expect("manejo presente");
    assert_eq!(manejo.crop_detail_id, detail.detail.id);
    assert_eq!(manejo.data.seed_origin.as_deref(), Some("own"));
    assert_eq!(loaded, created);
}

#[test]
fn round_trip_returns_all_and_only_present_sections_in_order() {
    let svc = service();
    let sections = full_sections();
    let created = svc.create_aggregate(record("P002", 2024), sections.clone()).expect("create");
    let loaded = svc.load_aggregate(created.record.id).expect("load");
    assert_eq!(loaded.child_ids().len(), 1 + 2 + 1 + 3 + 2 + 2 + 1 + 1 + 1 + 2);

    assert_eq!(loaded.record.producer_code, "P002");
    assert_eq!(loaded.record.created_at, now());
    assert_eq!(loaded.documentation_review.map(|d| d.data), sections.documentation_review);
    // acciones correctivas: por secuencia
    let seqs: Vec<i32> = loaded.corrective_actions.iter().map(|a| a.data.sequence).collect();
    assert_eq!(seqs, vec![1, 2]);
    assert_eq!(loaded.non_conformities.iter().map(|n| n.data.clone()).collect::<Vec<_>>(),
               sections.non_conformities);
    assert_eq!(loaded.livestock.iter().map(|l| l.data.clone()).collect::<Vec<_>>(), sections.livestock);
    assert_eq!(loaded.planting_plans.iter().map(|p| p.data.clone()).collect::<Vec<_>>(),
               sections.planting_plans);
    assert_eq!(loaded.files.iter().map(|f| f.data.file_name.as_str()).collect::<Vec<_>>(),
               vec!["croquis.jpg", "firma.png"]);
    assert_eq!(loaded.risk_mitigation.map(|e| e.data), sections.risk_mitigation);
    assert_eq!(loaded.post_harvest.map(|e| e.data), sections.post_harvest);
    assert_eq!(loaded.knowledge.map(|e| e.data), sections.knowledge);
    assert_eq!(loaded.crop_details.iter().map(|d| d.detail.data.clone()).collect::<Vec<_>>(),
               sections.crop_details.iter().map(|c| c.detail.clone()).collect::<Vec<_>>());
}

#[test]
fn minimal_payload_loads_empty_sections() {
    let svc = service();
    let created = svc.create_aggregate(record("P003", 2024), minimal_sections()).expect("create");
    assert!(created.documentation_review.is_none());
    assert!(created.risk_mitigation.is_none());
    assert!(created.livestock.is_empty());
    assert!(created.crop_details.is_empty());
    assert_eq!(created.child_ids().len(), 1);
}

#[test]
fn manejo_only_for_certifiable_crop_with_seed_origin() {
    let svc = service();
    let details = vec![crop(PLOT_A, QUINOA, Some(seed_management())),
                       crop(PLOT_A, BROAD_BEAN, Some(seed_management())),
                       crop(PLOT_B, QUINOA, None)];
    let sections = AggregateSections { crop_details: details,
                                       ..minimal_sections() };
    let agg = svc.create_aggregate(record("P004", 2024), sections).expect("create");
    let managed: Vec<bool> = agg.crop_details.iter().map(|d| d.management.is_some()).collect();
    assert_eq!(managed, vec![true, false, false]);
    assert_eq!(svc.store().owned_row_count().unwrap(), 1 + 3 + 1 + 1);
}

#[test]
fn certifiable_crop_without_seed_origin_drops_seed_data_silently() {
    let svc = service();
    let partial = CropManagement { seed_category: Some("organic".into()),
                                   fertilization_method: Some("compost".into()),
                                   ..Default::default() };
    let sections = AggregateSections { crop_details: vec![crop(PLOT_A, QUINOA, Some(partial))],
                                       ..minimal_sections() };
    let agg = svc.create_aggregate(record("P005", 2024), sections).expect("create sin error");
    assert_eq!(agg.crop_details.len(), 1);
    assert!(agg.crop_details[0].management.is_none());
}

#[test]
fn invalid_manejo_aborts_whole_write() {
    let svc = service();
    let bad = CropManagement { seed_origin: Some("other".into()),
                               ..seed_management() };
    let sections = AggregateSections { crop_details: vec![crop(PLOT_A, QUINOA, Some(bad))],
                                       ..full_sections() };
    let err = svc.create_aggregate(record("P006", 2024), sections).unwrap_err();
    assert_eq!(err,
               AggregateError::ValidationFailed(vec!["crop_details[0].management.seed_origin_other: requerido cuando seed_origin es 'other'".into()]));
    assert_eq!(svc.store().owned_row_count().unwrap(), 0);
    assert!(svc.find_by_producer_and_cycle("P006", 2024).unwrap().is_none());
}

#[test]
fn invalid_manejo_on_non_certifiable_crop_is_ignored() {
    let svc = service();
    let bad = CropManagement { seed_origin: Some("other".into()),
                               ..Default::default() };
    let sections = AggregateSections { crop_details: vec![crop(PLOT_A, BROAD_BEAN, Some(bad))],
                                       ..minimal_sections() };
    let agg = svc.create_aggregate(record("P007", 2024), sections).expect("create");
    assert!(agg.crop_details[0].management.is_none());
}

#[test]
fn harvest_cardinality_zero_two_or_invalid_persists_nothing() {
    let svc = service();
    let cases = [vec![], vec![harvest("organic"), harvest("in-transition")], vec![harvest("conventional")]];
    for sales in cases {
        let sections = AggregateSections { harvest_sales: sales,
                                           ..full_sections() };
        let err = svc.create_aggregate(record("P008", 2024), sections).unwrap_err();
        assert!(matches!(err, AggregateError::CardinalityViolation(_)), "{err:?}");
        assert!(err.is_validation());
        assert_eq!(svc.store().owned_row_count().unwrap(), 0);
    }
    assert!(svc.find_by_producer_and_cycle("P008", 2024).unwrap().is_none());
}

#[test]
fn in_transition_harvest_is_accepted_and_stored_verbatim() {
    let svc = service();
    let sections = AggregateSections { harvest_sales: vec![harvest("in-transition")],
                                       ..minimal_sections() };
    let agg = svc.create_aggregate(record("P090", 2024), sections).expect("create");
    let sale = agg.harvest_sale.expect("cosecha");
    assert_eq!(sale.data.production_type, "in-transition");
}

#[test]
fn invalid_harvest_fields_fail_after_cardinality() {
    let svc = service();
    let mut sale = harvest("in-transition");
    sale.sold_kg = 5000.0;
    let sections = AggregateSections { harvest_sales: vec![sale],
                                       ..Default::default() };
    let err = svc.create_aggregate(record("P009", 2024), sections).unwrap_err();
    let AggregateError::ValidationFailed(violations) = err else {
        panic!("se esperaba ValidationFailed");
    };
    assert_eq!(violations.len(), 1);
    assert!(violations[0].starts_with("harvest_sales[0].sold_kg"));
    assert_eq!(svc.store().owned_row_count().unwrap(), 0);
}

#[test]
fn pre_validation_reports_root_and_sections_together() {
    let svc = service();
    let mut root = record("P010", 2024);
    root.capture_origin = "offline".into();
    let mut sections = full_sections();
    sections.livestock[1].quantity = -1;
    let err = svc.create_aggregate(root, sections).unwrap_err();
    let fields: Vec<String> = err.violations()
                                 .iter()
                                 .map(|v| v.split(':').next().unwrap_or_default().to_string())
                                 .collect();
    assert_eq!(fields, vec!["record.device_id", "livestock[1].quantity"]);
}

#[test]
fn second_create_for_same_producer_and_cycle_is_duplicate() {
    let svc = service();
    svc.create_aggregate(record("P001", 2024), minimal_sections()).expect("first");
    let err = svc.create_aggregate(record("P001", 2024), full_sections()).unwrap_err();
    assert_eq!(err,
               AggregateError::DuplicateAggregate { producer_code: "P001".into(),
                                                    cycle_year: 2024 });
    // otra gestión del mismo productor es válida
    svc.create_aggregate(record("P001", 2025), minimal_sections()).expect("otra gestión");
}

#[test]
fn plot_updates_merge_supplied_fields_and_skip_inactive_plots() {
    let svc = service();
    let mut sections = minimal_sections();
    sections.plot_updates = vec![agrocert_domain::PlotUpdate { plot_id: PLOT_A,
                                                               irrigation: Some(true),
                                                               latitude: Some(-19.58),
                                                               longitude: Some(-65.75),
                                                               ..Default::default() },
                                 agrocert_domain::PlotUpdate { plot_id: PLOT_RETIRED,
                                                               rotation: Some(true),
                                                               ..Default::default() },
                                 agrocert_domain::PlotUpdate { plot_id: uuid::Uuid::from_u128(0xDEAD),
                                                               rotation: Some(true),
                                                               ..Default::default() }];
    svc.create_aggregate(record("P011", 2024), sections).expect("create");

    let a = svc.store().plot(PLOT_A).unwrap().expect("plot A");
    assert_eq!(a.irrigation, Some(true));
    assert_eq!(a.latitude, Some(-19.58));
    // campos no informados se conservan
    assert_eq!(a.rotation, Some(false));
    assert_eq!(a.barrier_type.as_deref(), Some("live"));
    assert_eq!(a.altitude_m, Some(3850.0));
    assert_eq!(a.updated_at, now());

    let retired = svc.store().plot(PLOT_RETIRED).unwrap().expect("plot inactiva");
    assert_eq!(retired.rotation, Some(false));
}

#[test]
fn crop_detail_view_carries_current_plot_attributes() {
    let svc = service();
    let agg = svc.create_aggregate(record("P012", 2024), full_sections()).expect("create");
    let plot = agg.crop_details[0].plot.as_ref().expect("snapshot");
    assert_eq!(plot.plot_id, PLOT_A);
    assert_eq!(plot.irrigation, Some(true));
    assert_eq!(agg.crop_details[1].crop_name, "Haba");
}

#[test]
fn unknown_crop_type_is_a_store_error_and_rolls_back() {
    let svc = service();
    let sections = AggregateSections { crop_details: vec![crop(PLOT_A, uuid::Uuid::from_u128(0xBAD), None)],
                                       ..full_sections() };
    let err = svc.create_aggregate(record("P013", 2024), sections).unwrap_err();
    assert!(matches!(err, AggregateError::Store(_)), "{err:?}");
    assert_eq!(svc.store().owned_row_count().unwrap(), 0);
}
