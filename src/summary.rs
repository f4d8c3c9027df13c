//! Headline figures for a dashboard: row counts, the total and mean of the
//! leading numerical column, and the distinct count of the leading
//! categorical column.

use std::collections::HashSet;

use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::{
    cli::SummaryArgs,
    classify::ColumnType,
    data::{Dataset, Row},
    filter,
    schema::Schema,
    table,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub total: f64,
    pub mean: f64,
    pub total_label: String,
    pub distinct_categories: usize,
    pub category_label: String,
}

/// Computes headline figures over the filtered rows. Datasets without a
/// numerical or categorical column fall back to zeroed figures with generic
/// labels rather than failing.
pub fn summarize(dataset: &Dataset, rows: &[&Row], schema: &Schema) -> Summary {
    let numerical = schema
        .columns
        .iter()
        .find(|column| column.column_type == ColumnType::Numerical);
    let categorical = schema
        .columns
        .iter()
        .find(|column| column.column_type == ColumnType::Categorical);

    let (total, mean, total_label) = match numerical {
        Some(column) => {
            let total: f64 = rows
                .iter()
                .map(|row| dataset.cell(row, &column.name).numeric().unwrap_or(0.0))
                .sum();
            let mean = if rows.is_empty() {
                0.0
            } else {
                total / rows.len() as f64
            };
            (total, mean, format!("Total {}", column.name))
        }
        None => (0.0, 0.0, "Total Value".to_string()),
    };

    let (distinct_categories, category_label) = match categorical {
        Some(column) => {
            let unique: HashSet<String> = rows
                .iter()
                .map(|row| dataset.cell(row, &column.name).as_display())
                .collect();
            (unique.len(), format!("Unique {}", column.name))
        }
        None => (0, "Unique Categories".to_string()),
    };

    Summary {
        total_rows: dataset.row_count(),
        filtered_rows: rows.len(),
        total,
        mean,
        total_label,
        distinct_categories,
        category_label,
    }
}

pub fn execute(args: &SummaryArgs) -> Result<()> {
    let (dataset, schema) = crate::load_inputs(
        &args.input,
        args.meta.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let filters = filter::parse_filters(&args.filters)?;
    let rows = filter::apply(&dataset, &filters);
    let summary = summarize(&dataset, &rows, &schema);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let headers = vec!["figure".to_string(), "value".to_string()];
        let table_rows = vec![
            vec![
                "Rows".to_string(),
                format!("{} of {}", summary.filtered_rows, summary.total_rows),
            ],
            vec![
                summary.total_label.clone(),
                crate::aggregate::format_number(summary.total),
            ],
            vec![
                "Average".to_string(),
                crate::aggregate::format_number(summary.mean),
            ],
            vec![
                summary.category_label.clone(),
                summary.distinct_categories.to_string(),
            ],
        ];
        table::print_table(&headers, &table_rows);
    }
    info!(
        "Summarized {} of {} row(s) from {:?}",
        summary.filtered_rows, summary.total_rows, args.input
    );
    Ok(())
}
