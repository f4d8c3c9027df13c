//! Grouped reduction of filtered rows into chart-ready series.
//!
//! Rows are grouped by the display form of the label column, the value
//! column is coerced through the shared numeric rule (non-numbers count as
//! zero), and each group reduces by the chart's aggregation. Series whose
//! labels all parse as dates sort ascending by date; everything else sorts
//! largest-first. Output is capped at [`SERIES_CAP`] points; callers wanting
//! more re-query with narrower filters.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, anyhow};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    cli::ChartArgs,
    data::{Cell, Dataset, Row, parse_flexible_date},
    export, filter,
    planner::{self, Aggregation, ChartSpec, ChartType},
    schema::Schema,
    table,
};

/// Maximum number of points in one chart series.
pub const SERIES_CAP: usize = 20;

/// Label used for rows whose label cell is missing.
pub const MISSING_LABEL: &str = "Unknown";

/// One aggregated point. Ephemeral: recomputed on every filter or spec
/// change, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Groups, reduces, sorts, and truncates one chart's series.
///
/// There is no error path: unknown columns read as missing, empty input
/// yields an empty series.
pub fn aggregate(
    dataset: &Dataset,
    rows: &[&Row],
    label_column: &str,
    value_column: &str,
    aggregation: Aggregation,
) -> Vec<ChartPoint> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();

    for row in rows {
        let label_cell = dataset.cell(row, label_column);
        let label = match label_cell {
            Cell::Missing => MISSING_LABEL.to_string(),
            other => other.as_display(),
        };
        let value = dataset.cell(row, value_column).numeric().unwrap_or(0.0);
        groups
            .entry(label.clone())
            .or_insert_with(|| {
                order.push(label);
                Vec::new()
            })
            .push(value);
    }

    let mut points: Vec<ChartPoint> = order
        .into_iter()
        .map(|label| {
            let values = &groups[&label];
            let value = reduce(values, aggregation);
            ChartPoint { label, value }
        })
        .collect();

    sort_points(&mut points);
    points.truncate(SERIES_CAP);
    points
}

fn reduce(values: &[f64], aggregation: Aggregation) -> f64 {
    match aggregation {
        Aggregation::Sum => values.iter().sum(),
        Aggregation::Average => values.iter().sum::<f64>() / values.len() as f64,
        Aggregation::Count => values.len() as f64,
    }
}

/// Ascending by date when every label parses as one, otherwise descending
/// by value. Sorting is stable, so ties keep first-occurrence order.
fn sort_points(points: &mut [ChartPoint]) {
    let dates: Option<Vec<_>> = points
        .iter()
        .map(|point| parse_flexible_date(&point.label))
        .collect();
    match dates {
        Some(dates) => {
            let mut keyed: Vec<usize> = (0..points.len()).collect();
            keyed.sort_by_key(|&idx| dates[idx]);
            let reordered: Vec<ChartPoint> =
                keyed.iter().map(|&idx| points[idx].clone()).collect();
            points.clone_from_slice(&reordered);
        }
        None => points.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
}

pub fn execute(args: &ChartArgs) -> Result<()> {
    let (dataset, schema) = crate::load_inputs(
        &args.input,
        args.meta.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let spec = resolve_spec(args, &schema)?;
    let filters = filter::parse_filters(&args.filters)?;
    let rows = filter::apply(&dataset, &filters);
    let points = aggregate(
        &dataset,
        &rows,
        &spec.label_column,
        &spec.value_column,
        spec.aggregation,
    );

    if args.csv {
        let rendered = export::chart_series_csv(&points)?;
        write_output(args.output.as_deref(), &rendered)?;
    } else {
        let headers = vec![spec.label_column.clone(), spec.aggregation.to_string()];
        let table_rows: Vec<Vec<String>> = points
            .iter()
            .map(|point| vec![point.label.clone(), format_number(point.value)])
            .collect();
        table::print_table(&headers, &table_rows);
    }
    info!(
        "Aggregated {} group(s) from {} row(s) for '{}'",
        points.len(),
        rows.len(),
        spec.title
    );
    Ok(())
}

/// Picks the chart to compute: a planned spec by id (optionally replaced
/// with a different type or aggregation, identity preserved), or an ad-hoc
/// spec from explicit column arguments.
fn resolve_spec(args: &ChartArgs, schema: &Schema) -> Result<ChartSpec> {
    if let Some(id) = &args.id {
        let mut plan = planner::plan(&schema.columns);
        let mut spec = plan
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("No planned chart with id '{id}'. Run 'plan' to list ids"))?;
        if args.chart_type.is_some() || args.aggregation.is_some() {
            if let Some(chart_type) = &args.chart_type {
                spec.chart_type = chart_type.parse()?;
            }
            if let Some(aggregation) = &args.aggregation {
                spec.aggregation = aggregation.parse()?;
            }
            plan.replace(spec.clone());
        }
        return Ok(spec);
    }

    let label_column = args
        .label_column
        .clone()
        .ok_or_else(|| anyhow!("Provide --id, or --label-column with --value-column"))?;
    let value_column = args
        .value_column
        .clone()
        .ok_or_else(|| anyhow!("Provide --id, or --label-column with --value-column"))?;
    for column in [&label_column, &value_column] {
        if schema.column(column).is_none() {
            return Err(anyhow!("Column '{column}' not found in the input file"));
        }
    }
    let chart_type = match &args.chart_type {
        Some(value) => value.parse()?,
        None => ChartType::Bar,
    };
    let aggregation = match &args.aggregation {
        Some(value) => value.parse()?,
        None => Aggregation::Sum,
    };
    Ok(ChartSpec {
        id: "adhoc-0".to_string(),
        chart_type,
        title: format!("{value_column} by {label_column}"),
        label_column,
        value_column,
        aggregation,
    })
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Writing output file {path:?}")),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
