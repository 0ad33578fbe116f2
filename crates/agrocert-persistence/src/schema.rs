//! Esquema Diesel (mantenido a mano junto a `migrations/`). Reemplazable con
//! `diesel print-schema`.

diesel::table! {
    crop_types (id) {
        id -> Uuid,
        name -> Text,
        principal_certifiable -> Bool,
    }
}

diesel::table! {
    plots (id) {
        id -> Uuid,
        producer_code -> Text,
        plot_number -> Integer,
        area_ha -> Double,
        rotation -> Nullable<Bool>,
        irrigation -> Nullable<Bool>,
        barrier_type -> Nullable<Text>,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        altitude_m -> Nullable<Double>,
        active -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    inspection_records (id) {
        id -> Uuid,
        producer_code -> Text,
        cycle_id -> Uuid,
        cycle_year -> Integer,
        inspection_date -> Date,
        inspector -> Text,
        interviewee -> Nullable<Text>,
        previous_category -> Nullable<Text>,
        capture_origin -> Text,
        device_id -> Nullable<Text>,
        synced_at -> Nullable<Timestamptz>,
        status -> Text,
        certification_result -> Text,
        comments -> Nullable<Text>,
        created_by -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    documentation_reviews (id) {
        id -> Uuid,
        record_id -> Uuid,
        entry_request -> Text,
        internal_rules -> Text,
        production_contract -> Text,
        farm_sketch -> Text,
        field_diary -> Text,
        harvest_log -> Text,
        payment_receipt -> Text,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    corrective_actions (id) {
        id -> Uuid,
        record_id -> Uuid,
        position -> Integer,
        sequence -> Integer,
        description -> Text,
        implementation -> Nullable<Text>,
        due_date -> Nullable<Date>,
    }
}

diesel::table! {
    non_conformities (id) {
        id -> Uuid,
        record_id -> Uuid,
        position -> Integer,
        description -> Text,
        proposed_action -> Nullable<Text>,
        deadline -> Date,
        follow_up_status -> Text,
        follow_up_notes -> Nullable<Text>,
    }
}

diesel::table! {
    risk_mitigation_evaluations (id) {
        id -> Uuid,
        record_id -> Uuid,
        risk_mitigation_practices -> Bool,
        contamination_barriers -> Bool,
        tool_storage -> Bool,
        organic_input_storage -> Bool,
        avoids_residue_burning -> Bool,
        comments -> Nullable<Text>,
    }
}

diesel::table! {
    post_harvest_evaluations (id) {
        id -> Uuid,
        record_id -> Uuid,
        clean_drying_area -> Bool,
        clean_containers -> Bool,
        protected_storage -> Bool,
        separates_conventional -> Bool,
        comments -> Nullable<Text>,
    }
}

diesel::table! {
    knowledge_evaluations (id) {
        id -> Uuid,
        record_id -> Uuid,
        knows_organic_rules -> Bool,
        knows_internal_rules -> Bool,
        attended_training -> Bool,
        comments -> Nullable<Text>,
    }
}

diesel::table! {
    livestock_activities (id) {
        id -> Uuid,
        record_id -> Uuid,
        position -> Integer,
        species -> Text,
        quantity -> Integer,
        management_method -> Text,
        management_method_other -> Nullable<Text>,
        manure_use -> Nullable<Text>,
    }
}

diesel::table! {
    plot_crop_details (id) {
        id -> Uuid,
        record_id -> Uuid,
        position -> Integer,
        plot_id -> Uuid,
        crop_type_id -> Uuid,
        area_ha -> Double,
        plot_condition -> Text,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    crop_managements (id) {
        id -> Uuid,
        crop_detail_id -> Uuid,
        seed_origin -> Text,
        seed_origin_other -> Nullable<Text>,
        seed_category -> Nullable<Text>,
        seed_treatment -> Nullable<Text>,
        seed_treatment_other -> Nullable<Text>,
        fertilization_method -> Nullable<Text>,
        fertilization_method_other -> Nullable<Text>,
        weeding_method -> Nullable<Text>,
        weeding_method_other -> Nullable<Text>,
        harvest_method -> Nullable<Text>,
        harvest_method_other -> Nullable<Text>,
    }
}

diesel::table! {
    harvest_sales (id) {
        id -> Uuid,
        record_id -> Uuid,
        production_type -> Text,
        estimated_yield_kg -> Nullable<Double>,
        harvested_kg -> Double,
        sold_kg -> Double,
        sale_destination -> Nullable<Text>,
        buyer -> Nullable<Text>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    planting_plans (id) {
        id -> Uuid,
        record_id -> Uuid,
        position -> Integer,
        plot_id -> Uuid,
        crop_type_id -> Uuid,
        planned_area_ha -> Double,
        planned_sowing_date -> Nullable<Date>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    inspection_files (id) {
        id -> Uuid,
        record_id -> Uuid,
        position -> Integer,
        file_name -> Text,
        file_kind -> Text,
        storage_path -> Text,
        mime_type -> Nullable<Text>,
        size_bytes -> BigInt,
        captured_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(documentation_reviews -> inspection_records (record_id));
diesel::joinable!(corrective_actions -> inspection_records (record_id));
diesel::joinable!(non_conformities -> inspection_records (record_id));
diesel::joinable!(risk_mitigation_evaluations -> inspection_records (record_id));
diesel::joinable!(post_harvest_evaluations -> inspection_records (record_id));
diesel::joinable!(knowledge_evaluations -> inspection_records (record_id));
diesel::joinable!(livestock_activities -> inspection_records (record_id));
diesel::joinable!(plot_crop_details -> inspection_records (record_id));
diesel::joinable!(plot_crop_details -> crop_types (crop_type_id));
diesel::joinable!(plot_crop_details -> plots (plot_id));
diesel::joinable!(crop_managements -> plot_crop_details (crop_detail_id));
diesel::joinable!(harvest_sales -> inspection_records (record_id));
diesel::joinable!(inspection_files -> inspection_records (record_id));

diesel::allow_tables_to_appear_in_same_query!(
    crop_types,
    plots,
    inspection_records,
    documentation_reviews,
    corrective_actions,
    non_conformities,
    risk_mitigation_evaluations,
    post_harvest_evaluations,
    knowledge_evaluations,
    livestock_activities,
    plot_crop_details,
    crop_managements,
    harvest_sales,
    planting_plans,
    inspection_files,
);
