//! Cell values, datasets, and the shared coercion rules.
//!
//! Raw cells arrive from the parser as an untyped union of string, number,
//! date, or nothing; [`Cell`] makes that explicit. The numeric coercion rule
//! (strip `,` and `$`, then parse a finite float) lives here once and is the
//! only numeric interpretation used by classification, min/max scanning, and
//! aggregation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One raw cell value. Serialized untagged so persisted rows keep the plain
/// string/number/null shape produced by upstream parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl Cell {
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        if let Ok(number) = trimmed.parse::<f64>()
            && number.is_finite()
        {
            return Cell::Number(number);
        }
        Cell::Text(trimmed.to_string())
    }

    /// Missing, or text with no content. These never contribute to
    /// classification, unique values, or numeric statistics.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(number) => number.to_string(),
            Cell::Date(date) => date.format("%Y-%m-%d").to_string(),
            Cell::Text(text) => text.clone(),
        }
    }

    /// The single numeric coercion rule: numbers pass through, text parses
    /// after stripping comma and dollar separators, everything else is not a
    /// number. Callers decide whether a non-number means "skip" or "zero".
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Cell::Number(number) if number.is_finite() => Some(*number),
            Cell::Text(text) => parse_loose_number(text),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn parse_loose_number(value: &str) -> Option<f64> {
    let stripped: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$'))
        .collect();
    if stripped.is_empty() {
        return None;
    }
    stripped.parse::<f64>().ok().filter(|n| n.is_finite())
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%d %B %Y",
];

const MONTH_PREFIXES: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Parses a date from any of the supported literal formats, falling back to
/// month-name + year strings ("Mar 2024", "March-24") pinned to the first of
/// the month.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    parse_month_year(trimmed)
}

fn parse_month_year(value: &str) -> Option<NaiveDate> {
    let lowered = value.to_ascii_lowercase();
    let (_, month) = MONTH_PREFIXES
        .iter()
        .find(|(prefix, _)| lowered.starts_with(prefix))?;
    let rest = lowered[3..].trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let digits = rest.trim_start_matches([' ', '-']);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = digits.parse().ok()?;
    let year = match digits.len() {
        2 => 2000 + year,
        3 | 4 => year,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, *month, 1)
}

/// One parsed row; cells are positionally aligned with the dataset headers.
pub type Row = Vec<Cell>;

/// An immutable, fully parsed tabular file: ordered column names plus the
/// row collection. This is the boundary type external parsers hand over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

static MISSING: Cell = Cell::Missing;

impl Dataset {
    pub fn new(file_name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            file_name: file_name.into(),
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell for a named column within one of this dataset's rows. Unknown
    /// columns and short rows read as missing, never as an error.
    pub fn cell<'a>(&self, row: &'a Row, name: &str) -> &'a Cell {
        self.column_index(name)
            .and_then(|idx| row.get(idx))
            .unwrap_or(&MISSING)
    }

    pub fn column_cells<'a>(&'a self, index: usize) -> impl Iterator<Item = &'a Cell> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&MISSING))
    }
}
