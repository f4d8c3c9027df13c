mod common;

use autodash::classify::ColumnType;
use autodash::data::Cell;
use autodash::schema::{
    Schema, UNIQUE_VALUE_CAP, build_schema, build_schema_with_overrides,
};
use common::{TestWorkspace, dataset_of, num, text};

#[test]
fn unique_values_never_exceed_the_cap() {
    let rows = (0..200).map(|n| vec![text(&format!("city-{n}"))]).collect();
    let data = dataset_of(&["city"], rows);
    let schema = build_schema(&data);
    let column = &schema.columns[0];
    assert_eq!(column.column_type, ColumnType::Categorical);
    assert_eq!(
        column.unique_values.as_ref().map(|v| v.len()),
        Some(UNIQUE_VALUE_CAP)
    );
}

#[test]
fn unique_values_keep_first_occurrence_order() {
    let data = dataset_of(
        &["region"],
        vec![
            vec![text("West")],
            vec![text("East")],
            vec![text("West")],
            vec![text("North")],
        ],
    );
    let schema = build_schema(&data);
    assert_eq!(
        schema.columns[0].unique_values.as_deref(),
        Some(&["West".to_string(), "East".to_string(), "North".to_string()][..])
    );
}

#[test]
fn numeric_bounds_hold_min_not_above_max() {
    let data = dataset_of(
        &["amount"],
        vec![
            vec![text("1,200")],
            vec![text("$45")],
            vec![text("no data")],
            vec![num(300.0)],
        ],
    );
    let schema = build_schema(&data);
    let column = &schema.columns[0];
    assert_eq!(column.column_type, ColumnType::Numerical);
    assert_eq!(column.min, Some(45.0));
    assert_eq!(column.max, Some(1200.0));
    assert!(column.min <= column.max);
}

#[test]
fn bounds_default_to_zero_when_nothing_parses() {
    // Forced numerical via override: the column itself reads as text.
    let data = dataset_of(
        &["notes"],
        vec![vec![text("alpha")], vec![text("beta")], vec![text("gamma")]],
    );
    let mut edited = build_schema(&data);
    edited.columns[0].column_type = ColumnType::Numerical;
    let rebuilt = build_schema_with_overrides(&data, &edited);
    let column = &rebuilt.columns[0];
    assert_eq!(column.min, Some(0.0));
    assert_eq!(column.max, Some(0.0));
}

#[test]
fn exactly_one_fact_set_is_present_per_type() {
    let data = dataset_of(
        &["region", "amount", "day", "empty"],
        vec![
            vec![text("East"), num(1.0), text("2023-01-01"), Cell::Missing],
            vec![text("West"), num(2.0), text("2023-02-01"), Cell::Missing],
            vec![text("East"), num(3.0), text("2023-03-01"), Cell::Missing],
        ],
    );
    let schema = build_schema(&data);
    let types: Vec<ColumnType> = schema.columns.iter().map(|c| c.column_type).collect();
    assert_eq!(
        types,
        vec![
            ColumnType::Categorical,
            ColumnType::Numerical,
            ColumnType::Temporal,
            ColumnType::Unknown,
        ]
    );
    for column in &schema.columns {
        let has_uniques = column.unique_values.is_some();
        let has_bounds = column.min.is_some() && column.max.is_some();
        match column.column_type {
            ColumnType::Categorical => assert!(has_uniques && !has_bounds),
            ColumnType::Numerical => assert!(!has_uniques && has_bounds),
            ColumnType::Temporal | ColumnType::Unknown => {
                assert!(!has_uniques && !has_bounds)
            }
        }
    }
}

#[test]
fn schema_round_trips_through_yaml() {
    let data = common::sales_dataset();
    let schema = build_schema(&data);
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("sales.yaml");
    schema.save(&path).expect("save schema");
    let loaded = Schema::load(&path).expect("load schema");
    assert_eq!(loaded.columns, schema.columns);
}

#[test]
fn hand_edited_schema_file_overrides_types_on_reload() {
    let data = dataset_of(&["code"], vec![vec![num(7.0)], vec![num(8.0)]]);
    let schema = build_schema(&data);
    assert_eq!(schema.columns[0].column_type, ColumnType::Numerical);

    let workspace = TestWorkspace::new();
    let path = workspace.path().join("schema.yaml");
    schema.save(&path).expect("save schema");
    let edited = std::fs::read_to_string(&path)
        .expect("read schema")
        .replace("numerical", "categorical");
    std::fs::write(&path, edited).expect("write edited schema");

    let overrides = Schema::load(&path).expect("load edited schema");
    let rebuilt = build_schema_with_overrides(&data, &overrides);
    let column = &rebuilt.columns[0];
    assert_eq!(column.column_type, ColumnType::Categorical);
    assert_eq!(
        column.unique_values.as_deref(),
        Some(&["7".to_string(), "8".to_string()][..])
    );
}
