// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HB-Lite CLI - energy model components from the command line.
//!
//! Inputs and outputs are JSON documents using the `"type"`-tagged object
//! format of `hb-lite-core`.
//!
//! # Commands
//!
//! - `apply-construction` - Assign opaque constructions to Faces, Doors or Rooms
//! - `check-model` - Check a model can be simulated and print its simulation folder
//! - `gap-material` - Create a window gas gap material
//! - `infiltration` - Create an Infiltration load
//! - `program-type` - Create a ProgramType from a base program and loads
//! - `deconstruct-people` - Print the properties of a People load
//!
//! # Environment
//!
//! - `HB_LITE_LIBRARY` - JSON resource library merged over the built-in defaults
//! - `HB_LITE_SIM_FOLDER` - Root folder for simulation files
//! - `HB_LITE_HORIZONTAL_TOLERANCE` - Tolerance for treating a surface as horizontal
//! - `RUST_LOG` - Log filter

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::Config;

/// HB-Lite - building energy model components
#[derive(Parser)]
#[command(name = "hb-lite")]
#[command(version)]
#[command(about = "Building energy model components: constructions, loads and programs")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write the result to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign opaque constructions, uniformly or by orientation
    ApplyConstruction(commands::ApplyConstructionArgs),
    /// Check a model for simulation
    CheckModel {
        /// Model JSON file
        model: PathBuf,
    },
    /// Create a window gas gap material
    GapMaterial(commands::GapMaterialArgs),
    /// Create an Infiltration load
    Infiltration(commands::InfiltrationArgs),
    /// Create a ProgramType
    ProgramType(commands::ProgramTypeArgs),
    /// Deconstruct a People load into its properties
    DeconstructPeople {
        /// People JSON file
        people: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hb_lite_energy=debug")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    tracing::debug!(
        library = ?config.library_path,
        sim_folder = %config.sim_folder.display(),
        horizontal_tolerance = config.horizontal_tolerance,
        "Loaded configuration"
    );
    let output = cli.output.as_deref();
    commands::check_output(output)?;

    let value = match &cli.command {
        Commands::ApplyConstruction(args) => commands::apply_construction(args, &config)?,
        Commands::CheckModel { model } => commands::check_model(model, &config)?,
        Commands::GapMaterial(args) => commands::gap_material(args)?,
        Commands::Infiltration(args) => commands::infiltration(args, &config)?,
        Commands::ProgramType(args) => commands::program_type(args, &config)?,
        Commands::DeconstructPeople { people } => commands::deconstruct_people_file(people)?,
    };
    commands::write_output(&value, output)
}
