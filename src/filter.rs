//! Per-column allow-list filtering of dataset rows.
//!
//! A filter set maps column names to the values a row may hold there.
//! Values within one column combine with OR, columns combine with AND, and
//! both empty sets and empty lists impose no constraint. Comparison happens
//! on the display form of each cell, so `100` written in the filter matches
//! a numeric cell holding 100.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, Row};

/// User-selected per-column value allow-lists. Session state: reset
/// whenever the underlying file is replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    entries: BTreeMap<String, Vec<String>>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allow-list for one column, replacing any previous list.
    pub fn allow(&mut self, column: impl Into<String>, values: Vec<String>) {
        self.entries.insert(column.into(), values);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// True when no column carries a non-empty allow-list.
    pub fn is_unrestricted(&self) -> bool {
        self.entries.values().all(|values| values.is_empty())
    }
}

/// Parses repeated CLI filter arguments of the form `Column=val1,val2`.
pub fn parse_filters(args: &[String]) -> Result<FilterSet> {
    let mut filters = FilterSet::new();
    for arg in args {
        let (column, values) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid filter '{arg}'. Expected 'Column=value1,value2'"))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(anyhow!("Invalid filter '{arg}'. Column name is empty"));
        }
        let values: Vec<String> = values
            .split(',')
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        filters.allow(column, values);
    }
    Ok(filters)
}

/// Applies a filter set, returning references into the dataset's rows. An
/// unrestricted set returns every row without comparisons.
pub fn apply<'a>(dataset: &'a Dataset, filters: &FilterSet) -> Vec<&'a Row> {
    if filters.is_unrestricted() {
        return dataset.rows.iter().collect();
    }
    dataset
        .rows
        .iter()
        .filter(|row| row_passes(dataset, row, filters))
        .collect()
}

fn row_passes(dataset: &Dataset, row: &Row, filters: &FilterSet) -> bool {
    filters.entries().all(|(column, allowed)| {
        if allowed.is_empty() {
            return true;
        }
        let value = dataset.cell(row, column).as_display();
        allowed.iter().any(|candidate| candidate == &value)
    })
}
