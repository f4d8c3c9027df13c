//! Column schema construction and YAML persistence.
//!
//! The builder classifies every column and records the per-type facts the
//! dashboard layer needs: a bounded unique-value list for categorical
//! columns, min/max bounds for numerical ones, and a short sample of raw
//! values for preview. The schema can be written to a YAML file, hand-edited
//! to override inferred types, and reloaded; overridden columns get their
//! facts rebuilt so type and facts never disagree.

use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    classify::{ColumnType, classify},
    data::{Cell, Dataset},
};

/// Cap on distinct values recorded for a categorical column. Keeps
/// high-cardinality free-text columns from exploding the schema.
pub const UNIQUE_VALUE_CAP: usize = 50;
/// Number of leading raw values captured for preview.
pub const SAMPLE_VALUE_COUNT: usize = 5;

/// Inferred type and summary facts for one column.
///
/// Exactly one fact set is populated, determined by the type: categorical
/// columns carry `unique_values`, numerical columns carry `min`/`max`, and
/// temporal or unknown columns carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub sample_values: Vec<Cell>,
}

/// The full column schema list for one dataset, in header order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<ColumnSchema>,
}

impl Schema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating schema file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing schema YAML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening schema file {path:?}"))?;
        let reader = BufReader::new(file);
        let schema = serde_yaml::from_reader(reader).context("Parsing schema YAML")?;
        Ok(schema)
    }
}

/// Builds the schema for every column of a dataset.
pub fn build_schema(dataset: &Dataset) -> Schema {
    let columns = dataset
        .headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let column_type = classify(dataset.column_cells(index));
            build_column(dataset, index, name, column_type)
        })
        .collect();
    Schema { columns }
}

/// Rebuilds the schema taking column types from `overrides` where present.
/// Facts are always re-derived from the dataset, so a type edited by hand in
/// the schema file comes back with matching unique values or bounds.
pub fn build_schema_with_overrides(dataset: &Dataset, overrides: &Schema) -> Schema {
    let columns = dataset
        .headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let column_type = overrides
                .column(name)
                .map(|column| column.column_type)
                .unwrap_or_else(|| classify(dataset.column_cells(index)));
            build_column(dataset, index, name, column_type)
        })
        .collect();
    Schema { columns }
}

fn build_column(
    dataset: &Dataset,
    index: usize,
    name: &str,
    column_type: ColumnType,
) -> ColumnSchema {
    let (unique_values, min, max) = match column_type {
        ColumnType::Categorical => (
            Some(unique_values(dataset.column_cells(index))),
            None,
            None,
        ),
        ColumnType::Numerical => {
            let (min, max) = min_max(dataset.column_cells(index));
            (None, Some(min), Some(max))
        }
        ColumnType::Temporal | ColumnType::Unknown => (None, None, None),
    };
    let sample_values = dataset
        .column_cells(index)
        .take(SAMPLE_VALUE_COUNT)
        .cloned()
        .collect();
    ColumnSchema {
        name: name.to_string(),
        column_type,
        unique_values,
        min,
        max,
        sample_values,
    }
}

/// Distinct stringified non-blank values in first-occurrence order, stopping
/// early once the cap is reached.
fn unique_values<'a, I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for cell in cells {
        if cell.is_blank() {
            continue;
        }
        let value = cell.as_display();
        if seen.insert(value.clone()) {
            ordered.push(value);
            if ordered.len() >= UNIQUE_VALUE_CAP {
                break;
            }
        }
    }
    ordered
}

/// Full-column numeric bounds; values that fail the coercion rule are
/// skipped, and a column with no numeric values at all reports 0/0.
fn min_max<'a, I>(cells: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut bounds: Option<(f64, f64)> = None;
    for cell in cells {
        let Some(number) = cell.numeric() else {
            continue;
        };
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(number), max.max(number)),
            None => (number, number),
        });
    }
    bounds.unwrap_or((0.0, 0.0))
}
