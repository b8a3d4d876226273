// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, eyre};
use color_eyre::{Report, Result};
use staffload::{
    CoreError, EtlConfig, JsonFileLocationProvider, Normalizer, RetryingLocationProvider,
    SourceReader, StaticLocationProvider, convert_xlsx_to_csv, is_workbook,
};
use staffload_domain::{LocationProvider, NormalizedBatch};
use staffload_persistence::{LoadReport, Persistence, TableCounts};
use tracing::{error, info, warn};

/// Exit status for a source that lacks required columns.
const EXIT_MISSING_COLUMNS: u8 = 2;

/// Loads an HR workforce export into the staffload OLTP store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source file: CSV, or an Excel workbook (`.xlsx`/`.xlsm`).
    #[arg(short, long)]
    source: PathBuf,

    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// `MySQL` connection URL. Takes precedence over `--database`.
    #[cfg(feature = "mysql")]
    #[arg(long)]
    mysql_url: Option<String>,

    /// JSON file with scraped work-location addresses.
    #[arg(short, long)]
    locations: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rows per chunk; overrides the configuration file.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Append to the existing tables instead of recreating them.
    #[arg(long)]
    keep_schema: bool,

    /// Only convert the workbook given as `--source` to this CSV file.
    #[arg(long, value_name = "OUTPUT")]
    convert_only: Option<PathBuf>,
}

/// What a successful run did.
#[derive(Debug)]
enum RunOutcome {
    Converted {
        rows: usize,
    },
    Loaded {
        chunks: usize,
        report: LoadReport,
        counts: TableCounts,
    },
}

fn load_config(args: &Args) -> Result<EtlConfig> {
    let mut config: EtlConfig = match &args.config {
        Some(path) => EtlConfig::from_file(path)?,
        None => EtlConfig::default(),
    };

    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
        config.validate()?;
    }

    Ok(config)
}

fn open_persistence(args: &Args) -> Result<Persistence> {
    #[cfg(feature = "mysql")]
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL database");
        return Persistence::new_with_mysql(url).wrap_err("Failed to connect to MySQL");
    }

    if let Some(path) = &args.database {
        info!("Using file-based database at: {}", path.display());
        Persistence::new_with_file(path)
            .wrap_err_with(|| format!("Failed to open database {}", path.display()))
    } else {
        warn!("No --database given, loading into an in-memory database that is discarded on exit");
        Ok(Persistence::new_in_memory()?)
    }
}

fn build_provider(args: &Args, config: &EtlConfig) -> Box<dyn LocationProvider> {
    match &args.locations {
        Some(path) => {
            info!("Reading reference locations from {}", path.display());
            Box::new(RetryingLocationProvider::with_policy(
                JsonFileLocationProvider::new(path),
                config.lookup,
            ))
        }
        None => {
            info!("No reference locations given, unmatched locations get a placeholder address");
            Box::new(StaticLocationProvider::default())
        }
    }
}

fn convert(source: &Path, output: &Path, config: &EtlConfig) -> Result<RunOutcome> {
    if !is_workbook(source) {
        return Err(eyre!(
            "--convert-only needs an Excel workbook, got {}",
            source.display()
        ));
    }

    let rows: usize = convert_xlsx_to_csv(source, output, &config.date_format)?;
    Ok(RunOutcome::Converted { rows })
}

fn run(args: &Args) -> Result<RunOutcome> {
    let config: EtlConfig = load_config(args)?;

    if let Some(output) = &args.convert_only {
        return convert(&args.source, output, &config);
    }

    let mut reader: SourceReader =
        SourceReader::open(&args.source, config.chunk_size, &config.date_format)?;
    let normalizer: Normalizer = Normalizer::from_config(&config);

    // Checked before touching the database so a bad source leaves it intact.
    normalizer
        .validate_headers(reader.headers())
        .map_err(CoreError::from)?;

    let mut persistence: Persistence = open_persistence(args)?;
    if args.keep_schema {
        persistence.ensure_schema()?;
    } else {
        persistence.reset_schema()?;
    }

    let provider: Box<dyn LocationProvider> = build_provider(args, &config);
    let mut total: LoadReport = LoadReport::default();
    let mut chunks: usize = 0;

    for chunk in &mut reader {
        let chunk = chunk?;
        chunks += 1;

        let batch: NormalizedBatch = normalizer.normalize(&chunk).map_err(CoreError::from)?;
        let report: LoadReport = persistence
            .load_batch(&batch, provider.as_ref())
            .wrap_err_with(|| format!("Failed to load chunk {chunks}"))?;
        total += report;

        info!(
            chunk = chunks,
            rows = chunk.rows.len(),
            employees = report.employees_inserted,
            absences = report.absences_inserted,
            "Chunk loaded"
        );
    }

    Ok(RunOutcome::Loaded {
        chunks,
        report: total,
        counts: persistence.table_counts()?,
    })
}

fn log_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Converted { rows } => info!(rows, "Conversion complete"),
        RunOutcome::Loaded {
            chunks,
            report,
            counts,
        } => {
            info!(
                chunks,
                locations_matched = report.locations_matched,
                locations_placeholder = report.locations_placeholder,
                employees_inserted = report.employees_inserted,
                employees_skipped = report.employees_skipped,
                left_organisation = report.left_organisation_inserted,
                associations_inserted = report.associations_inserted,
                associations_skipped = report.associations_skipped,
                absences_inserted = report.absences_inserted,
                attendance_discarded = report.attendance_discarded,
                present_days = report.present_days,
                "Load complete"
            );
            info!(
                work_locations = counts.work_locations,
                employees = counts.employees,
                employee_work_locations = counts.employee_work_locations,
                absences = counts.absences,
                left_organisation = counts.left_organisation,
                "OLTP table counts"
            );
        }
    }
}

/// Maps a failed run to its process exit status.
fn exit_status(report: &Report) -> u8 {
    match report
        .downcast_ref::<CoreError>()
        .and_then(CoreError::missing_columns)
    {
        Some(missing) => {
            error!(missing = %missing.join(", "), "Source is missing required columns");
            EXIT_MISSING_COLUMNS
        }
        None => 1,
    }
}

fn main() -> ExitCode {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = color_eyre::install() {
        error!("Failed to install error report handler: {e}");
    }

    match run(&args) {
        Ok(outcome) => {
            log_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(report) => {
            let status: u8 = exit_status(&report);
            eprintln!("Error: {report:?}");
            ExitCode::from(status)
        }
    }
}
