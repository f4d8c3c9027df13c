//! Chart planning from a column schema.
//!
//! The planner walks a fixed rule order: categorical-by-numerical bars
//! first, then time series, then a distribution pie, then a trend area, and
//! finally a category line fallback when the dataset has no temporal column
//! at all. Whatever the rules produce beyond the chart cap is dropped from
//! the tail.

use std::{fmt, str::FromStr};

use anyhow::anyhow;
use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::{classify::ColumnType, schema::ColumnSchema};

/// Maximum number of charts planned for one dataset; excess rules are
/// dropped from the tail.
pub const MAX_CHARTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "area" => Ok(ChartType::Area),
            other => Err(anyhow!(
                "Unknown chart type '{other}'. Supported types: bar, line, pie, area"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Average,
    Count,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Average => "average",
            Aggregation::Count => "count",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "average" | "avg" | "mean" => Ok(Aggregation::Average),
            "count" => Ok(Aggregation::Count),
            other => Err(anyhow!(
                "Unknown aggregation '{other}'. Supported aggregations: sum, average, count"
            )),
        }
    }
}

/// A declarative description of one chart before any data is computed. The
/// id is synthetic, unique within a planning run, and stays stable when the
/// user later swaps the chart type or aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub label_column: String,
    pub value_column: String,
    pub aggregation: Aggregation,
}

/// Ordered chart specs keyed by id. User edits go through [`replace`]: the
/// spec is swapped whole, never mutated field by field, so planner output
/// and user overrides stay separable.
///
/// [`replace`]: ChartPlan::replace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartPlan {
    specs: Vec<ChartSpec>,
}

impl ChartPlan {
    pub fn specs(&self) -> &[ChartSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ChartSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Swaps the spec with the same id, keeping its position. Returns false
    /// when no spec has that id.
    pub fn replace(&mut self, spec: ChartSpec) -> bool {
        match self.specs.iter_mut().find(|existing| existing.id == spec.id) {
            Some(slot) => {
                *slot = spec;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        self.specs.iter()
    }
}

/// Derives chart specs from a column schema. Deterministic for a given
/// column ordering; an empty result is the legitimate outcome for datasets
/// with no categorical or numerical columns.
pub fn plan(columns: &[ColumnSchema]) -> ChartPlan {
    let categorical: Vec<&ColumnSchema> = columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Categorical)
        .collect();
    let numerical: Vec<&ColumnSchema> = columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Numerical)
        .collect();
    let temporal: Vec<&ColumnSchema> = columns
        .iter()
        .filter(|c| c.column_type == ColumnType::Temporal)
        .collect();

    let mut specs = Vec::new();

    for ((cat_idx, cat), (num_idx, num)) in iproduct!(
        categorical.iter().take(2).enumerate(),
        numerical.iter().take(2).enumerate()
    ) {
        specs.push(ChartSpec {
            id: format!("bar-{cat_idx}-{num_idx}"),
            chart_type: ChartType::Bar,
            title: format!("{} by {}", num.name, cat.name),
            label_column: cat.name.clone(),
            value_column: num.name.clone(),
            aggregation: Aggregation::Sum,
        });
    }

    if let Some(time) = temporal.first() {
        for (idx, num) in numerical.iter().take(2).enumerate() {
            specs.push(ChartSpec {
                id: format!("line-{idx}"),
                chart_type: ChartType::Line,
                title: format!("{} over Time", num.name),
                label_column: time.name.clone(),
                value_column: num.name.clone(),
                aggregation: Aggregation::Sum,
            });
        }
    }

    if let (Some(cat), Some(num)) = (categorical.first(), numerical.first()) {
        specs.push(ChartSpec {
            id: "pie-0".to_string(),
            chart_type: ChartType::Pie,
            title: format!("{} Distribution", num.name),
            label_column: cat.name.clone(),
            value_column: num.name.clone(),
            aggregation: Aggregation::Sum,
        });
    }

    if let (Some(time), Some(num)) = (temporal.first(), numerical.get(1)) {
        specs.push(ChartSpec {
            id: "area-0".to_string(),
            chart_type: ChartType::Area,
            title: format!("{} Trend", num.name),
            label_column: time.name.clone(),
            value_column: num.name.clone(),
            aggregation: Aggregation::Sum,
        });
    }

    // Single-category datasets still get a trend-style view.
    if temporal.is_empty()
        && let (Some(cat), Some(num)) = (categorical.first(), numerical.first())
    {
        specs.push(ChartSpec {
            id: "line-cat-0".to_string(),
            chart_type: ChartType::Line,
            title: format!("{} Comparison", num.name),
            label_column: cat.name.clone(),
            value_column: num.name.clone(),
            aggregation: Aggregation::Average,
        });
    }

    specs.truncate(MAX_CHARTS);
    ChartPlan { specs }
}
