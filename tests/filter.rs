mod common;

use autodash::data::Cell;
use autodash::filter::{FilterSet, apply, parse_filters};
use common::{dataset_of, num, sales_dataset, text};

#[test]
fn empty_filter_set_returns_every_row() {
    let data = sales_dataset();
    let rows = apply(&data, &FilterSet::new());
    assert_eq!(rows.len(), data.row_count());
}

#[test]
fn empty_allow_list_imposes_no_constraint() {
    let data = sales_dataset();
    let mut filters = FilterSet::new();
    filters.allow("Region", Vec::new());
    let rows = apply(&data, &filters);
    assert_eq!(rows.len(), data.row_count());
}

#[test]
fn allow_list_keeps_matching_rows_only() {
    let data = sales_dataset();
    let mut filters = FilterSet::new();
    filters.allow("Region", vec!["East".to_string()]);
    let rows = apply(&data, &filters);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(data.cell(row, "Region"), &Cell::Text("East".to_string()));
    }
}

#[test]
fn values_within_one_column_combine_with_or() {
    let data = sales_dataset();
    let mut filters = FilterSet::new();
    filters.allow("Region", vec!["East".to_string(), "West".to_string()]);
    assert_eq!(apply(&data, &filters).len(), 3);
}

#[test]
fn columns_combine_with_and() {
    let data = sales_dataset();
    let mut filters = FilterSet::new();
    filters.allow("Region", vec!["East".to_string()]);
    filters.allow("Sales", vec!["100".to_string()]);
    let rows = apply(&data, &filters);
    assert_eq!(rows.len(), 1);
    assert_eq!(data.cell(rows[0], "Sales"), &Cell::Number(100.0));
}

#[test]
fn numeric_cells_match_their_string_form() {
    let data = sales_dataset();
    let mut filters = FilterSet::new();
    filters.allow("Sales", vec!["50".to_string()]);
    let rows = apply(&data, &filters);
    assert_eq!(rows.len(), 1);
    assert_eq!(data.cell(rows[0], "Region"), &Cell::Text("West".to_string()));
}

#[test]
fn filtering_is_idempotent() {
    let data = sales_dataset();
    let mut filters = FilterSet::new();
    filters.allow("Region", vec!["East".to_string()]);
    let once = apply(&data, &filters);

    let narrowed = dataset_of(
        &["Region", "Sales"],
        once.iter().map(|row| (*row).clone()).collect(),
    );
    let twice = apply(&narrowed, &filters);
    let once_rows: Vec<_> = once.iter().map(|row| (*row).clone()).collect();
    let twice_rows: Vec<_> = twice.iter().map(|row| (*row).clone()).collect();
    assert_eq!(once_rows, twice_rows);
}

#[test]
fn missing_cells_compare_as_empty_strings() {
    let data = dataset_of(
        &["Region", "Sales"],
        vec![
            vec![Cell::Missing, num(10.0)],
            vec![text("East"), num(20.0)],
        ],
    );
    let mut filters = FilterSet::new();
    filters.allow("Region", vec!["East".to_string()]);
    assert_eq!(apply(&data, &filters).len(), 1);

    // A constraint on a column the dataset lacks excludes every row.
    let mut filters = FilterSet::new();
    filters.allow("Nope", vec!["anything".to_string()]);
    assert!(apply(&data, &filters).is_empty());
}

#[test]
fn cli_filter_arguments_round_trip_through_apply() {
    let data = sales_dataset();
    let filters = parse_filters(&["Region=East,West".to_string()]).unwrap();
    assert_eq!(apply(&data, &filters).len(), 3);

    let filters = parse_filters(&["Region=East".to_string(), "Sales=30".to_string()]).unwrap();
    let rows = apply(&data, &filters);
    assert_eq!(rows.len(), 1);
    assert_eq!(data.cell(rows[0], "Sales"), &Cell::Number(30.0));
}
