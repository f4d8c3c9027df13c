//! Column type classification from sampled raw values.
//!
//! A column is classified by inspecting a bounded sample of its non-blank
//! cells and counting how many look like dates or numbers. Decisions run in
//! temporal, numerical, categorical order against an inclusive threshold;
//! ambiguous mixes fall through to categorical so they stay filterable.

use std::{fmt, str::FromStr, sync::LazyLock};

use anyhow::anyhow;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::{Cell, parse_flexible_date};

/// Upper bound on how many non-blank values are inspected per column.
pub const CLASSIFY_SAMPLE_ROWS: usize = 100;
/// Fraction of the sample that must match a shape before the column takes
/// that type. The comparison is inclusive: exactly 70% qualifies.
pub const TYPE_FRACTION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Categorical,
    Numerical,
    Temporal,
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Categorical => "categorical",
            ColumnType::Numerical => "numerical",
            ColumnType::Temporal => "temporal",
            ColumnType::Unknown => "unknown",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["categorical", "numerical", "temporal", "unknown"]
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "categorical" | "category" => Ok(ColumnType::Categorical),
            "numerical" | "number" | "numeric" => Ok(ColumnType::Numerical),
            "temporal" | "date" => Ok(ColumnType::Temporal),
            "unknown" => Ok(ColumnType::Unknown),
            other => Err(anyhow!(
                "Unknown column type '{other}'. Supported types: {}",
                ColumnType::variants().join(", ")
            )),
        }
    }
}

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\d{4}-\d{2}-\d{2}$",
        r"^\d{2}/\d{2}/\d{4}$",
        r"^\d{2}-\d{2}-\d{4}$",
        r"^\d{4}/\d{2}/\d{2}$",
        r"^[A-Za-z]+ \d{1,2}, \d{4}$",
        r"^\d{1,2} [A-Za-z]+ \d{4}$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date pattern"))
    .collect()
});

static MONTH_YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[\s-]?\d{2,4}$")
        .expect("month-year pattern")
});

/// Whether a string reads as a date: it must match one of the fixed literal
/// patterns and actually parse, or match the short month-name + year form.
pub fn is_date_like(value: &str) -> bool {
    if DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value)) {
        return parse_flexible_date(value).is_some();
    }
    MONTH_YEAR_PATTERN.is_match(value)
}

/// Classifies a column from its raw cells.
///
/// Blank cells are dropped first; a column with nothing left is `Unknown`.
/// Otherwise the first [`CLASSIFY_SAMPLE_ROWS`] non-blank values are counted
/// by shape and the winning fraction (checked in date, number order) decides.
pub fn classify<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a Cell>,
{
    let sample: Vec<&Cell> = values
        .into_iter()
        .filter(|cell| !cell.is_blank())
        .take(CLASSIFY_SAMPLE_ROWS)
        .collect();
    if sample.is_empty() {
        return ColumnType::Unknown;
    }

    let mut date_count = 0usize;
    let mut number_count = 0usize;
    for cell in &sample {
        match cell {
            Cell::Date(_) => date_count += 1,
            Cell::Text(text) if is_date_like(text) => date_count += 1,
            _ if cell.numeric().is_some() => number_count += 1,
            _ => {}
        }
    }

    let size = sample.len() as f64;
    if date_count as f64 / size >= TYPE_FRACTION_THRESHOLD {
        ColumnType::Temporal
    } else if number_count as f64 / size >= TYPE_FRACTION_THRESHOLD {
        ColumnType::Numerical
    } else {
        ColumnType::Categorical
    }
}
