//! CSV serialization of chart series and filtered row sets.
//!
//! Pure renderings of aggregator and filter output: a header row followed by
//! data rows. Quoting is minimal, so clean cells come out as plain
//! comma-joined text while cells containing delimiters stay parseable.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use csv::QuoteStyle;
use log::info;

use crate::{
    aggregate::ChartPoint,
    cli::ExportArgs,
    data::{Dataset, Row},
    filter,
};

/// Renders one chart's series as `Label,Value` CSV text.
pub fn chart_series_csv(points: &[ChartPoint]) -> Result<String> {
    let mut writer = csv_writer();
    writer
        .write_record(["Label", "Value"])
        .context("Writing series header")?;
    for point in points {
        writer
            .write_record([point.label.as_str(), &point.value.to_string()])
            .context("Writing series row")?;
    }
    finish(writer)
}

/// Renders the filtered row set as CSV text with the dataset's column names
/// as the header row. Missing cells serialize as empty fields.
pub fn filtered_rows_csv(dataset: &Dataset, rows: &[&Row]) -> Result<String> {
    let mut writer = csv_writer();
    writer
        .write_record(&dataset.headers)
        .context("Writing export header")?;
    for row in rows {
        let record: Vec<String> = dataset
            .headers
            .iter()
            .map(|name| dataset.cell(row, name).as_display())
            .collect();
        writer.write_record(&record).context("Writing export row")?;
    }
    finish(writer)
}

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().context("Flushing CSV output")?;
    String::from_utf8(bytes).context("Encoding CSV output")
}

pub fn execute(args: &ExportArgs) -> Result<()> {
    let (dataset, _schema) = crate::load_inputs(
        &args.input,
        args.meta.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let filters = filter::parse_filters(&args.filters)?;
    let rows = filter::apply(&dataset, &filters);
    let rendered = filtered_rows_csv(&dataset, &rows)?;
    write_output(args.output.as_deref(), &rendered)?;
    info!(
        "Exported {} of {} row(s) from {:?}",
        rows.len(),
        dataset.row_count(),
        args.input
    );
    Ok(())
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Writing output file {path:?}"))
        }
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}
