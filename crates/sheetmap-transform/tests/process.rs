use serde_json::json;
use sheetmap_map::MappingStore;
use sheetmap_model::{DataType, Record, SourceColumn, TargetField, TargetSchema};
use sheetmap_transform::process_rows;

fn field(name: &str, display_name: &str, data_type: DataType, required: bool) -> TargetField {
    TargetField {
        name: name.to_string(),
        display_name: display_name.to_string(),
        data_type,
        required,
        description: None,
    }
}

fn column(name: &str, index: usize, inferred_type: DataType) -> SourceColumn {
    SourceColumn {
        name: name.to_string(),
        index,
        inferred_type,
        sample_values: Vec::new(),
    }
}

fn row(cells: &[(&str, serde_json::Value)]) -> Record {
    cells
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn mac_only_store() -> MappingStore {
    let schema =
        TargetSchema::new(vec![field("mac_address", "MAC address", DataType::String, true)])
            .expect("schema");
    let mut store = MappingStore::new(schema);
    store.create_session("assets.csv", vec![column("MAC", 0, DataType::String)], Vec::new());
    store.set_binding("mac_address", Some(column("MAC", 0, DataType::String)));
    store
}

#[test]
fn mapped_row_round_trips() {
    let store = mac_only_store();
    let rows = vec![row(&[("MAC", json!("00:11:22:33:44:55"))])];

    let result = process_rows(store.session(), &rows);
    assert_eq!(result.records_processed, 1);
    assert_eq!(result.errors_found, 0);
    assert_eq!(result.success_rate, 100.0);
    assert_eq!(
        result.exported_data,
        vec![row(&[("mac_address", json!("00:11:22:33:44:55"))])]
    );
}

#[test]
fn empty_required_value_fails_the_row() {
    let store = mac_only_store();
    let rows = vec![row(&[("MAC", json!(""))])];

    let result = process_rows(store.session(), &rows);
    assert_eq!(result.records_processed, 1);
    assert_eq!(result.errors_found, 1);
    assert!(result.exported_data.is_empty());
    assert_eq!(result.errors[0].row, 1);
    assert_eq!(result.errors[0].field, "MAC address");
    assert!(result.errors[0].error.contains("Required field is empty"));
}

#[test]
fn conversion_failure_excludes_the_row_but_counting_continues() {
    let schema = TargetSchema::new(vec![field("port_count", "Port count", DataType::Number, false)])
        .expect("schema");
    let mut store = MappingStore::new(schema);
    store.create_session("assets.csv", vec![column("Ports", 0, DataType::String)], Vec::new());
    store.set_binding("port_count", Some(column("Ports", 0, DataType::String)));

    let rows = vec![
        row(&[("Ports", json!("abc"))]),
        row(&[("Ports", json!("24"))]),
    ];
    let result = process_rows(store.session(), &rows);
    assert_eq!(result.records_processed, 2);
    assert_eq!(result.errors_found, 1);
    assert!(result.errors[0].error.contains("Data type conversion failed"));
    assert_eq!(result.errors[0].value, json!("abc"));
    assert_eq!(result.exported_data, vec![row(&[("port_count", json!(24))])]);
    assert_eq!(result.success_rate, 50.0);
}

#[test]
fn unmapped_required_field_fails_every_row() {
    let schema = TargetSchema::new(vec![
        field("mac_address", "MAC address", DataType::String, true),
        field("name", "Configured asset name", DataType::String, false),
    ])
    .expect("schema");
    let mut store = MappingStore::new(schema);
    store.create_session(
        "assets.csv",
        vec![column("Hostname", 0, DataType::String)],
        Vec::new(),
    );
    store.set_binding("name", Some(column("Hostname", 0, DataType::String)));

    let rows = vec![
        row(&[("Hostname", json!("plc-7"))]),
        row(&[("Hostname", json!("plc-8"))]),
    ];
    let result = process_rows(store.session(), &rows);
    assert_eq!(result.records_processed, 2);
    assert_eq!(result.errors_found, 2);
    assert!(result.exported_data.is_empty());
    assert!(result
        .errors
        .iter()
        .all(|e| e.error == "Required field is not mapped"));
    // The unmapped field never appears in output records, so nothing was
    // exported with a mac_address key.
    assert_eq!(result.errors[1].row, 2);
}

#[test]
fn unmapped_source_columns_pass_through_under_their_own_name() {
    let schema =
        TargetSchema::new(vec![field("mac_address", "MAC address", DataType::String, true)])
            .expect("schema");
    let mut store = MappingStore::new(schema);
    store.create_session(
        "assets.csv",
        vec![
            column("MAC", 0, DataType::String),
            column("Location", 1, DataType::String),
        ],
        Vec::new(),
    );
    store.set_binding("mac_address", Some(column("MAC", 0, DataType::String)));

    let rows = vec![row(&[
        ("MAC", json!("00:11:22:33:44:55")),
        ("Location", json!("Hall B")),
    ])];
    let result = process_rows(store.session(), &rows);
    assert_eq!(
        result.exported_data,
        vec![row(&[
            ("mac_address", json!("00:11:22:33:44:55")),
            ("Location", json!("Hall B")),
        ])]
    );
}

#[test]
fn passthrough_defaults_to_null_when_absent_from_the_row() {
    let schema =
        TargetSchema::new(vec![field("mac_address", "MAC address", DataType::String, true)])
            .expect("schema");
    let mut store = MappingStore::new(schema);
    store.create_session(
        "assets.csv",
        vec![
            column("MAC", 0, DataType::String),
            column("Location", 1, DataType::String),
        ],
        Vec::new(),
    );
    store.set_binding("mac_address", Some(column("MAC", 0, DataType::String)));

    let rows = vec![row(&[("MAC", json!("00:11:22:33:44:55"))])];
    let result = process_rows(store.session(), &rows);
    assert_eq!(result.exported_data[0].get("Location"), Some(&json!(null)));
}

#[test]
fn processing_is_idempotent() {
    let store = mac_only_store();
    let rows = vec![
        row(&[("MAC", json!("00:11:22:33:44:55"))]),
        row(&[("MAC", json!(""))]),
    ];

    let first = process_rows(store.session(), &rows);
    let second = process_rows(store.session(), &rows);
    assert_eq!(first, second);
}

#[test]
fn zero_rows_yield_zero_success_rate() {
    let store = mac_only_store();
    let result = process_rows(store.session(), &[]);
    assert_eq!(result.records_processed, 0);
    assert_eq!(result.success_rate, 0.0);
}

#[test]
fn no_session_yields_zero_valued_result() {
    let result = process_rows(None, &[row(&[("MAC", json!("x"))])]);
    assert_eq!(result.records_processed, 0);
    assert!(result.exported_data.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn date_and_boolean_fields_convert_in_place() {
    let schema = TargetSchema::new(vec![
        field("installed_on", "Installation date", DataType::Date, false),
        field("managed", "Managed device", DataType::Boolean, false),
    ])
    .expect("schema");
    let mut store = MappingStore::new(schema);
    store.create_session(
        "assets.csv",
        vec![
            column("Installed", 0, DataType::Date),
            column("Managed", 1, DataType::Boolean),
        ],
        Vec::new(),
    );
    store.set_binding("installed_on", Some(column("Installed", 0, DataType::Date)));
    store.set_binding("managed", Some(column("Managed", 1, DataType::Boolean)));

    let rows = vec![row(&[("Installed", json!("2024-03-05")), ("Managed", json!("yes"))])];
    let result = process_rows(store.session(), &rows);
    assert_eq!(result.errors_found, 0);
    assert_eq!(
        result.exported_data,
        vec![row(&[
            ("installed_on", json!("2024-03-05T00:00:00")),
            ("managed", json!(true)),
        ])]
    );
}
