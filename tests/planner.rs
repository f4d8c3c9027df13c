use autodash::classify::ColumnType;
use autodash::planner::{Aggregation, ChartType, MAX_CHARTS, plan};
use autodash::schema::ColumnSchema;

fn column(name: &str, column_type: ColumnType) -> ColumnSchema {
    let (unique_values, min, max) = match column_type {
        ColumnType::Categorical => (Some(Vec::new()), None, None),
        ColumnType::Numerical => (None, Some(0.0), Some(1.0)),
        _ => (None, None, None),
    };
    ColumnSchema {
        name: name.to_string(),
        column_type,
        unique_values,
        min,
        max,
        sample_values: Vec::new(),
    }
}

#[test]
fn bar_cross_product_comes_first_in_cat_major_order() {
    let columns = vec![
        column("Region", ColumnType::Categorical),
        column("Product", ColumnType::Categorical),
        column("Sales", ColumnType::Numerical),
        column("Profit", ColumnType::Numerical),
    ];
    let plan = plan(&columns);
    let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        &ids[..4],
        &["bar-0-0", "bar-0-1", "bar-1-0", "bar-1-1"]
    );
    assert_eq!(plan.get("bar-0-1").unwrap().title, "Profit by Region");
    assert_eq!(plan.get("bar-1-0").unwrap().title, "Sales by Product");
}

#[test]
fn six_chart_cap_drops_the_tail_rules() {
    let columns = vec![
        column("Region", ColumnType::Categorical),
        column("Product", ColumnType::Categorical),
        column("Sales", ColumnType::Numerical),
        column("Profit", ColumnType::Numerical),
        column("Day", ColumnType::Temporal),
    ];
    let plan = plan(&columns);
    assert_eq!(plan.len(), MAX_CHARTS);
    let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    // Four bars and two time lines fill the budget; pie and area are dropped.
    assert_eq!(
        ids,
        vec!["bar-0-0", "bar-0-1", "bar-1-0", "bar-1-1", "line-0", "line-1"]
    );
}

#[test]
fn single_pair_without_temporal_gets_bar_pie_and_line_fallback() {
    let columns = vec![
        column("Region", ColumnType::Categorical),
        column("Sales", ColumnType::Numerical),
    ];
    let plan = plan(&columns);
    let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["bar-0-0", "pie-0", "line-cat-0"]);

    let fallback = plan.get("line-cat-0").unwrap();
    assert_eq!(fallback.chart_type, ChartType::Line);
    assert_eq!(fallback.aggregation, Aggregation::Average);
    assert_eq!(fallback.title, "Sales Comparison");
    assert_eq!(fallback.label_column, "Region");
}

#[test]
fn temporal_datasets_get_time_series_and_trend_charts() {
    let columns = vec![
        column("Day", ColumnType::Temporal),
        column("Sales", ColumnType::Numerical),
        column("Profit", ColumnType::Numerical),
    ];
    let plan = plan(&columns);
    let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["line-0", "line-1", "area-0"]);

    let line = plan.get("line-0").unwrap();
    assert_eq!(line.title, "Sales over Time");
    assert_eq!(line.label_column, "Day");
    assert_eq!(line.aggregation, Aggregation::Sum);

    let area = plan.get("area-0").unwrap();
    assert_eq!(area.chart_type, ChartType::Area);
    assert_eq!(area.title, "Profit Trend");
    assert_eq!(area.value_column, "Profit");
}

#[test]
fn no_usable_columns_yields_an_empty_plan() {
    let columns = vec![
        column("Day", ColumnType::Temporal),
        column("Blank", ColumnType::Unknown),
    ];
    assert!(plan(&columns).is_empty());
    assert!(plan(&[]).is_empty());
}

#[test]
fn plan_is_deterministic_for_the_same_schema() {
    let columns = vec![
        column("Region", ColumnType::Categorical),
        column("Sales", ColumnType::Numerical),
        column("Day", ColumnType::Temporal),
    ];
    assert_eq!(plan(&columns).specs(), plan(&columns).specs());
}

#[test]
fn ids_are_unique_within_a_run() {
    let columns = vec![
        column("A", ColumnType::Categorical),
        column("B", ColumnType::Categorical),
        column("X", ColumnType::Numerical),
        column("Y", ColumnType::Numerical),
        column("T", ColumnType::Temporal),
    ];
    let plan = plan(&columns);
    let mut ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), plan.len());
}

#[test]
fn replace_swaps_by_id_and_preserves_identity() {
    let columns = vec![
        column("Region", ColumnType::Categorical),
        column("Sales", ColumnType::Numerical),
    ];
    let mut plan = plan(&columns);
    let mut edited = plan.get("pie-0").unwrap().clone();
    edited.chart_type = ChartType::Bar;
    edited.aggregation = Aggregation::Count;
    assert!(plan.replace(edited.clone()));

    let stored = plan.get("pie-0").unwrap();
    assert_eq!(stored.chart_type, ChartType::Bar);
    assert_eq!(stored.aggregation, Aggregation::Count);
    // Position is unchanged by replacement.
    assert_eq!(plan.specs()[1].id, "pie-0");

    let mut unknown = edited;
    unknown.id = "pie-9".to_string();
    assert!(!plan.replace(unknown));
}
