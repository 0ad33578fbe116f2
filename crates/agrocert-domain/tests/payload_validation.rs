use agrocert_domain::validation::{validate_record, validate_sections};
use agrocert_domain::{AggregateSections, InspectionRecordInput};
use serde_json::json;

fn payload() -> serde_json::Value {
    json!({
        "record": {
            "producer_code": "P001",
            "cycle_id": "7d6b1c3e-2f4a-4d8e-9a0b-1c2d3e4f5a6b",
            "cycle_year": 2024,
            "inspection_date": "2024-06-14",
            "inspector": "Tec. Quispe",
            "capture_origin": "offline",
            "device_id": "tablet-03",
            "status": "draft",
            "certification_result": "pending",
            "created_by": "inspector03"
        },
        "sections": {
            "documentation_review": {
                "entry_request": "yes", "internal_rules": "yes", "production_contract": "no",
                "farm_sketch": "yes", "field_diary": "not_applicable", "harvest_log": "yes",
                "payment_receipt": "yes"
            },
            "corrective_actions": [
                { "sequence": 1, "description": "Actualizar croquis" }
            ],
            "crop_details": [
                {
                    "plot_id": "0b7e3f7a-1111-4c1c-9a3e-2b2b2b2b2b2b",
                    "crop_type_id": "5f1e2d3c-2222-4b4b-8c8c-3d3d3d3d3d3d",
                    "area_ha": 1.5,
                    "plot_condition": "production",
                    "management": { "seed_origin": "own", "seed_category": "organic" }
                }
            ],
            "harvest_sales": [
                { "production_type": "organic", "harvested_kg": 1200.0, "sold_kg": 900.0 }
            ]
        }
    })
}

#[test]
fn payload_deserializes_with_absent_sections_defaulted() {
    let v = payload();
    let record: InspectionRecordInput = serde_json::from_value(v["record"].clone()).expect("record");
    let sections: AggregateSections = serde_json::from_value(v["sections"].clone()).expect("sections");
    assert!(validate_record(&record).is_valid());
    assert!(validate_sections(&sections).is_valid());
    assert!(sections.non_conformities.is_empty());
    assert!(sections.risk_mitigation.is_none());
    let detail = &sections.crop_details[0];
    assert!(detail.management_with_seed_origin().is_some());
}

#[test]
fn sections_report_every_violation_across_sections() {
    let mut v = payload();
    v["sections"]["documentation_review"]["farm_sketch"] = json!("maybe");
    v["sections"]["corrective_actions"] = json!([
        { "sequence": 1, "description": "A" },
        { "sequence": 1, "description": "" }
    ]);
    v["sections"]["files"] = json!([
        { "file_name": "foto.jpg", "file_kind": "video", "storage_path": "s3://b/foto.jpg", "size_bytes": 0 }
    ]);
    let sections: AggregateSections = serde_json::from_value(v["sections"].clone()).expect("sections");
    let report = validate_sections(&sections);
    let fields: Vec<&str> = report.errors().iter().map(|e| e.split(':').next().unwrap_or_default()).collect();
    assert_eq!(fields,
               vec!["documentation_review.farm_sketch",
                    "corrective_actions[1].description",
                    "corrective_actions[1].sequence",
                    "files[0].file_kind",
                    "files[0].size_bytes"]);
}

#[test]
fn duplicate_plot_crop_pair_is_rejected() {
    let mut v = payload();
    let detail = v["sections"]["crop_details"][0].clone();
    v["sections"]["crop_details"] = json!([detail.clone(), detail]);
    let sections: AggregateSections = serde_json::from_value(v["sections"].clone()).expect("sections");
    let report = validate_sections(&sections);
    assert_eq!(report.errors().len(), 1);
    assert!(report.errors()[0].starts_with("crop_details[1]"));
}

#[test]
fn management_without_seed_origin_is_not_persistable() {
    let mut v = payload();
    v["sections"]["crop_details"][0]["management"] = json!({ "seed_category": "organic" });
    let sections: AggregateSections = serde_json::from_value(v["sections"].clone()).expect("sections");
    assert!(sections.crop_details[0].management_with_seed_origin().is_none());
}
