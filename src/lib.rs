pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod data;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod palette;
pub mod planner;
pub mod schema;
pub mod store;
pub mod summary;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    classify::ColumnType,
    cli::{Cli, Commands},
    data::Dataset,
    palette::Palette,
    schema::Schema,
    store::{DashboardRecord, DashboardStore},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("autodash", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => handle_probe(&args),
        Commands::Plan(args) => handle_plan(&args),
        Commands::Chart(args) => aggregate::execute(&args),
        Commands::Export(args) => export::execute(&args),
        Commands::Summary(args) => summary::execute(&args),
        Commands::Save(args) => handle_save(&args),
        Commands::List(args) => handle_list(&args),
        Commands::Open(args) => handle_open(&args),
        Commands::Share(args) => handle_share(&args),
        Commands::Delete(args) => handle_delete(&args),
    }
}

/// Ingests the input file and builds its schema, honoring a hand-edited
/// schema file's column types when one is supplied.
pub(crate) fn load_inputs(
    input: &Path,
    meta: Option<&Path>,
    delimiter: Option<u8>,
    encoding: Option<&str>,
) -> Result<(Dataset, Schema)> {
    let dataset = ingest::load(input, delimiter, encoding)
        .with_context(|| format!("Loading {input:?}"))?;
    let schema = match meta {
        Some(path) => {
            let overrides =
                Schema::load(path).with_context(|| format!("Loading schema from {path:?}"))?;
            schema::build_schema_with_overrides(&dataset, &overrides)
        }
        None => schema::build_schema(&dataset),
    };
    Ok((dataset, schema))
}

fn handle_probe(args: &cli::ProbeArgs) -> Result<()> {
    let (dataset, schema) = load_inputs(
        &args.input,
        None,
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    print_schema_table(&schema);
    if let Some(path) = &args.meta {
        schema
            .save(path)
            .with_context(|| format!("Writing schema to {path:?}"))?;
        info!("Schema written to {path:?}; edit column types there and pass --meta");
    }
    info!(
        "Inferred {} column(s) from {} row(s) in {:?}",
        schema.columns.len(),
        dataset.row_count(),
        args.input
    );
    Ok(())
}

fn handle_plan(args: &cli::PlanArgs) -> Result<()> {
    let (_dataset, schema) = load_inputs(
        &args.input,
        args.meta.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let plan = planner::plan(&schema.columns);
    if plan.is_empty() {
        info!(
            "No charts can be planned for {:?}: needs at least one categorical and one numerical column",
            args.input
        );
    }
    if args.json {
        let palette = Palette::new(args.colors.clone());
        let payload = serde_json::json!({
            "charts": plan.specs(),
            "palette": palette.colors(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_plan_table(&plan);
    }
    info!("Planned {} chart(s) for {:?}", plan.len(), args.input);
    Ok(())
}

fn handle_save(args: &cli::SaveArgs) -> Result<()> {
    let (dataset, schema) = load_inputs(
        &args.input,
        args.meta.as_deref(),
        args.delimiter,
        args.input_encoding.as_deref(),
    )?;
    let store = DashboardStore::open(&args.store)?;
    let record = DashboardRecord::new(&args.owner, &args.name, &dataset, &schema);
    store.save(&record)?;
    let record = if args.public {
        store.set_public(&record.id, true)?
    } else {
        record
    };
    match &record.share_token {
        Some(token) => info!(
            "Saved dashboard '{}' as {} (public, share token {token})",
            record.name, record.id
        ),
        None => info!("Saved dashboard '{}' as {}", record.name, record.id),
    }
    println!("{}", record.id);
    Ok(())
}

fn handle_list(args: &cli::ListArgs) -> Result<()> {
    let store = DashboardStore::open(&args.store)?;
    let entries = store.list()?;
    let headers = vec![
        "id".to_string(),
        "name".to_string(),
        "file".to_string(),
        "rows".to_string(),
        "visibility".to_string(),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            vec![
                entry.id.clone(),
                entry.name.clone(),
                entry.file_name.clone(),
                entry.row_count.to_string(),
                if entry.public {
                    "public".to_string()
                } else {
                    "private".to_string()
                },
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
    info!("Listed {} dashboard(s) from {:?}", entries.len(), args.store);
    Ok(())
}

fn handle_open(args: &cli::OpenArgs) -> Result<()> {
    let store = DashboardStore::open(&args.store)?;
    let record = match (&args.id, &args.token) {
        (Some(id), _) => store.load(id)?,
        (None, Some(token)) => store.find_by_token(token)?,
        (None, None) => return Err(anyhow!("Provide --id or --token")),
    };
    let schema = record.schema();
    print_schema_table(&schema);
    let plan = planner::plan(&schema.columns);
    print_plan_table(&plan);
    info!(
        "Opened dashboard '{}' ({} row(s) from '{}')",
        record.name, record.row_count, record.file_name
    );
    Ok(())
}

fn handle_share(args: &cli::ShareArgs) -> Result<()> {
    let store = DashboardStore::open(&args.store)?;
    let record = store.set_public(&args.id, !args.off)?;
    match &record.share_token {
        Some(token) => {
            info!("Dashboard '{}' is now public", record.name);
            println!("{token}");
        }
        None => info!("Dashboard '{}' is now private", record.name),
    }
    Ok(())
}

fn handle_delete(args: &cli::DeleteArgs) -> Result<()> {
    let store = DashboardStore::open(&args.store)?;
    store.delete(&args.id)?;
    info!("Deleted dashboard {} from {:?}", args.id, args.store);
    Ok(())
}

fn print_schema_table(schema: &Schema) {
    let headers = vec![
        "#".to_string(),
        "name".to_string(),
        "type".to_string(),
        "details".to_string(),
    ];
    let rows: Vec<Vec<String>> = schema
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let details = match column.column_type {
                ColumnType::Categorical => format!(
                    "{} unique value(s)",
                    column.unique_values.as_ref().map_or(0, |v| v.len())
                ),
                ColumnType::Numerical => format!(
                    "range {} to {}",
                    aggregate::format_number(column.min.unwrap_or(0.0)),
                    aggregate::format_number(column.max.unwrap_or(0.0)),
                ),
                ColumnType::Temporal | ColumnType::Unknown => String::new(),
            };
            vec![
                (idx + 1).to_string(),
                column.name.clone(),
                column.column_type.to_string(),
                details,
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
}

fn print_plan_table(plan: &planner::ChartPlan) {
    let headers = vec![
        "id".to_string(),
        "type".to_string(),
        "title".to_string(),
        "label".to_string(),
        "value".to_string(),
        "agg".to_string(),
    ];
    let rows: Vec<Vec<String>> = plan
        .iter()
        .map(|spec| {
            vec![
                spec.id.clone(),
                spec.chart_type.to_string(),
                spec.title.clone(),
                spec.label_column.clone(),
                spec.value_column.clone(),
                spec.aggregation.to_string(),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
}
