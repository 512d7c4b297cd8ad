/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info, warn};

use timetable_engine::catalog::directory::FacultyDirectory;
use timetable_engine::catalog::Catalog;
use timetable_engine::config::TimetableConfig;
use timetable_engine::export::RunExport;
use timetable_engine::runner::CohortRunner;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Weekly cohort timetable generator.
///
/// Example:
///   timetable-engine --catalog demos/catalog.yaml --config demos/timetable.yaml \
///                    --faculty demos/faculty.yaml --seed 42 --output timetables.json
#[derive(Debug, Parser)]
#[command(
    name = "timetable-engine",
    about = "Weekly cohort timetable generator",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML course catalog.
    #[arg(short = 'c', long = "catalog")]
    catalog: PathBuf,

    /// Path to the YAML timetable configuration (day window, breaks, offsets).
    #[arg(short = 'g', long = "config")]
    config: Option<PathBuf>,

    /// Path to a YAML faculty directory to pre-register.
    #[arg(short = 'f', long = "faculty")]
    faculty: Option<PathBuf>,

    /// Seed for the random source; drawn from OS entropy when absent.
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Retry ceiling for every slot search (overrides the configuration).
    #[arg(short = 'm', long = "max-attempts")]
    max_attempts: Option<usize>,

    /// Write the JSON hand-off document to this path.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        catalog      = %cli.catalog.display(),
        config       = ?cli.config,
        faculty      = ?cli.faculty,
        seed         = ?cli.seed,
        max_attempts = ?cli.max_attempts,
        output       = ?cli.output,
        "Configuration"
    );

    // ── Load timetable configuration ──────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => match TimetableConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load timetable configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No timetable configuration file provided, using default day and break settings");
            TimetableConfig::default()
        }
    };

    if let Some(n) = cli.max_attempts {
        config.max_attempts = n;
        if let Err(e) = config.validate() {
            error!("Invalid --max-attempts: {:#}", e);
            process::exit(1);
        }
    }

    // ── Load catalog and faculty directory ────────────────────────────────────
    let catalog = match Catalog::load_from_file(&cli.catalog) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load course catalog: {:#}", e);
            process::exit(1);
        }
    };

    let directory = match &cli.faculty {
        Some(path) => match FacultyDirectory::load_from_file(path) {
            Ok(d) => Some(d),
            Err(e) => {
                error!("Failed to load faculty directory: {:#}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    // ── Generate ──────────────────────────────────────────────────────────────
    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, "Random source seeded");

    let mut runner = match CohortRunner::new(config, ChaCha8Rng::seed_from_u64(seed)) {
        Ok(r) => r,
        Err(e) => {
            error!("Cannot start timetable generation: {}", e);
            process::exit(1);
        }
    };
    if let Some(directory) = &directory {
        runner.register_faculty(directory);
    }

    let timetables = match runner.run(&catalog) {
        Ok(t) => t,
        Err(e) => {
            error!("Timetable generation failed: {}", e);
            process::exit(1);
        }
    };

    // ── Export ────────────────────────────────────────────────────────────────
    let export = RunExport::build(runner.slots(), &timetables, Some(seed));
    export.log_summary();

    if let Some(path) = &cli.output {
        if let Err(e) = export.write_to_file(path) {
            error!("Failed to write timetable export: {:#}", e);
            process::exit(1);
        }
    }
}
