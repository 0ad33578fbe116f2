//! CLI de operación sobre fichas de inspección en Postgres.
//!
//! `agrocert <show|find|create|replace|delete|check>`; los payloads son JSON
//! con la forma `{ "record": {...}, "sections": {...} }`.
//!
//! Códigos de salida: 0 ok, 2 payload/validación, 3 duplicado,
//! 4 no encontrado, 5 almacén/configuración.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agrocert_core::{validate_payload, AggregateError, InspectionService};
use agrocert_domain::validation::{check_harvest_cardinality, validate_harvest_sale};
use agrocert_domain::{AggregateSections, InspectionAggregate, InspectionRecordInput, ValidationReport};
use agrocert_persistence::{build_dev_pool_from_env, PersistenceError, PgAggregateStore, PoolProvider};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "agrocert")]
#[command(about = "Persistencia de fichas de inspección (raíz + secciones)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Muestra el agregado completo de una ficha
    Show {
        /// Id de la ficha
        #[arg(long)]
        id: Uuid,
    },
    /// Busca la ficha de un productor en una gestión
    Find {
        #[arg(short, long)]
        producer: String,
        /// Año de la gestión
        #[arg(short, long)]
        cycle: i32,
    },
    /// Crea una ficha a partir de un payload JSON
    Create {
        /// Archivo con `{record, sections}`
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Reemplaza por completo una ficha existente
    Replace {
        #[arg(long)]
        id: Uuid,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Borra una ficha y todas sus secciones
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Valida un payload sin tocar la base de datos
    Check {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Deserialize)]
struct Payload {
    record: InspectionRecordInput,
    #[serde(default)]
    sections: AggregateSections,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("no se pudo leer {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("payload inválido: {0}")]
    Payload(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Payload(_) => 2,
            CliError::Aggregate(e) if e.is_validation() => 2,
            CliError::Aggregate(AggregateError::DuplicateAggregate { .. }) => 3,
            CliError::Aggregate(AggregateError::NotFound(_)) => 4,
            _ => 5,
        }
    }
}

type PgService = InspectionService<PgAggregateStore<PoolProvider>>;

fn read_payload(path: &Path) -> Result<Payload, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(),
                                                                      source })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Validación completa sin almacén: la previa a la transacción más la
/// cardinalidad y campos de cosecha/venta. El manejo depende del catálogo y
/// queda fuera.
fn check_payload(p: &Payload) -> Result<(), AggregateError> {
    validate_payload(&p.record, &p.sections)?;
    let sale = check_harvest_cardinality(&p.sections.harvest_sales).map_err(AggregateError::CardinalityViolation)?;
    let mut report = ValidationReport::new();
    report.merge_scoped("harvest_sales[0]", validate_harvest_sale(sale));
    report.into_result().map_err(AggregateError::ValidationFailed)
}

fn connect() -> Result<PgService, CliError> {
    let pool = build_dev_pool_from_env()?;
    Ok(InspectionService::new(PgAggregateStore::new(PoolProvider { pool })))
}

fn print_aggregate(agg: &InspectionAggregate) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(agg)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Check { file } => {
            let p = read_payload(&file)?;
            check_payload(&p)?;
            println!("ok");
        }
        Commands::Show { id } => print_aggregate(&connect()?.load_aggregate(id)?)?,
        Commands::Find { producer, cycle } => match connect()?.find_by_producer_and_cycle(&producer, cycle)? {
            Some(agg) => print_aggregate(&agg)?,
            None => println!("null"),
        },
        Commands::Create { file } => {
            let p = read_payload(&file)?;
            let agg = connect()?.create_aggregate(p.record, p.sections)?;
            info!(record_id = %agg.record.id, "ficha creada");
            print_aggregate(&agg)?;
        }
        Commands::Replace { id, file } => {
            let p = read_payload(&file)?;
            let agg = connect()?.replace_aggregate(id, p.record, p.sections)?;
            info!(record_id = %id, "ficha reemplazada");
            print_aggregate(&agg)?;
        }
        Commands::Delete { id } => {
            connect()?.delete_aggregate(id)?;
            info!(record_id = %id, "ficha borrada");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()
                                                  .add_directive(tracing::Level::INFO.into()))
                             .with_writer(std::io::stderr)
                             .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::Aggregate(a) = &e {
                for v in a.violations() {
                    eprintln!("  - {v}");
                }
            }
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
