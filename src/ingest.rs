//! Reading tabular files into a [`Dataset`].
//!
//! Only delimited text (csv/tsv) is parsed here; binary workbook formats
//! belong to external parsers, which hand rows straight to
//! [`Dataset::new`]. Unsupported extensions fail before any row is read.
//! Cells are dynamically typed on the way in: empty fields become missing,
//! plain finite numerics become numbers, everything else stays text.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::data::{Cell, Dataset, Row};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Delimiter for a path: explicit override first, then extension. Anything
/// other than csv/tsv is rejected here, before the file is opened.
pub fn resolve_delimiter(path: &Path, provided: Option<u8>) -> Result<u8> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(provided.unwrap_or(DEFAULT_CSV_DELIMITER)),
        "tsv" => Ok(provided.unwrap_or(DEFAULT_TSV_DELIMITER)),
        other => Err(anyhow!(
            "Unsupported file extension '{other}' for {path:?}. Expected a .csv or .tsv file"
        )),
    }
}

/// Reads a delimited file into a dataset. Headers come from the first row;
/// short rows are padded with missing cells and overlong rows truncated to
/// the header width.
pub fn load(
    path: &Path,
    delimiter: Option<u8>,
    encoding_label: Option<&str>,
) -> Result<Dataset> {
    let delimiter = resolve_delimiter(path, delimiter)?;
    let encoding = resolve_encoding(encoding_label)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Opening input file {path:?}"))?;

    let header_record = reader.byte_headers()?.clone();
    let headers: Vec<String> = header_record
        .iter()
        .map(|field| decode_field(field, encoding))
        .collect::<Result<_>>()?;

    let mut rows: Vec<Row> = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let mut row: Row = Vec::with_capacity(headers.len());
        for field in record.iter().take(headers.len()) {
            let decoded = decode_field(field, encoding)
                .with_context(|| format!("Decoding row {}", row_idx + 2))?;
            row.push(Cell::from_raw(&decoded));
        }
        while row.len() < headers.len() {
            row.push(Cell::Missing);
        }
        rows.push(row);
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Dataset::new(file_name, headers, rows))
}

fn decode_field(field: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (decoded, _, malformed) = encoding.decode(field);
    if malformed {
        return Err(anyhow!("Field is not valid {}", encoding.name()));
    }
    Ok(decoded.into_owned())
}
