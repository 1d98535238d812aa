// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subcommand handlers. Each returns the JSON value to print.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use hb_lite_core::{
    Equipment, GasType, Infiltration, Lighting, Model, People, Setpoint, Ventilation,
};
use hb_lite_energy::host::expect_object;
use hb_lite_energy::{
    assign_constructions_from_values, deconstruct_people, window_gap_material, ProgramTypeBuilder,
    ProgramTypeInput, ScheduleInput,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ApplyConstructionArgs {
    /// JSON file with a Face, Door or Room, or an array of them
    #[arg(long)]
    pub objects: PathBuf,

    /// Construction names; one for all targets, or one per orientation
    /// starting at north and going clockwise
    #[arg(long = "construction", required = true, num_args = 1..)]
    pub constructions: Vec<String>,
}

#[derive(Debug, Args)]
pub struct GapMaterialArgs {
    #[arg(long)]
    pub name: String,

    /// Gap thickness in meters
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Gas in the gap (Air, Argon, Krypton, Xenon); repeat for mixtures
    #[arg(long = "gas")]
    pub gases: Vec<String>,

    /// Volumetric fraction of each gas, in the same order
    #[arg(long = "ratio")]
    pub ratios: Vec<f64>,
}

#[derive(Debug, Args)]
pub struct InfiltrationArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// m3/s per m2 of exterior surface area
    #[arg(long)]
    pub flow_per_exterior_area: f64,

    /// Schedule name in the library
    #[arg(long)]
    pub schedule: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProgramTypeArgs {
    #[arg(long)]
    pub name: String,

    /// Program type name in the library to start from
    #[arg(long)]
    pub base: Option<String>,

    /// JSON files with the loads to set
    #[arg(long)]
    pub people: Option<PathBuf>,
    #[arg(long)]
    pub lighting: Option<PathBuf>,
    #[arg(long)]
    pub electric_equipment: Option<PathBuf>,
    #[arg(long)]
    pub gas_equipment: Option<PathBuf>,
    #[arg(long)]
    pub infiltration: Option<PathBuf>,
    #[arg(long)]
    pub ventilation: Option<PathBuf>,
    #[arg(long)]
    pub setpoint: Option<PathBuf>,
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Reads a typed load from an optional JSON file.
fn read_load<T: DeserializeOwned>(path: Option<&PathBuf>, tag: &'static str) -> Result<Option<T>> {
    path.map(|p| {
        let value = read_json(p)?;
        expect_object(&value, tag).with_context(|| format!("invalid {tag} in {}", p.display()))
    })
    .transpose()
}

/// A construction argument is a library name unless it parses as a JSON object.
fn construction_value(arg: &str) -> Value {
    match serde_json::from_str::<Value>(arg) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::String(arg.to_string()),
    }
}

pub fn apply_construction(args: &ApplyConstructionArgs, config: &Config) -> Result<Value> {
    let library = config.library()?;
    let objects = match read_json(&args.objects)? {
        Value::Array(values) => values,
        value => vec![value],
    };
    let constructions: Vec<Value> = args.constructions.iter().map(|c| construction_value(c)).collect();

    let assigned = assign_constructions_from_values(
        &objects,
        &constructions,
        &library,
        &config.assign_options(),
    )?;
    Ok(serde_json::to_value(assigned)?)
}

pub fn check_model(path: &Path, config: &Config) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let model = Model::from_json_str(&text)
        .with_context(|| format!("{} is not a valid model", path.display()))?;
    model.check_for_simulation()?;

    let directory = model.simulation_directory(&config.sim_folder);
    tracing::info!(
        model = %model.identifier,
        rooms = model.rooms.len(),
        faces = model.face_count(),
        directory = %directory.display(),
        "Model is ready for simulation"
    );
    Ok(json!({
        "model": model.identifier,
        "rooms": model.rooms.len(),
        "faces": model.face_count(),
        "simulation_directory": directory,
    }))
}

pub fn gap_material(args: &GapMaterialArgs) -> Result<Value> {
    let gases = args
        .gases
        .iter()
        .map(|g| g.parse::<GasType>())
        .collect::<hb_lite_core::Result<Vec<_>>>()?;
    let material = window_gap_material(&args.name, args.thickness, &gases, &args.ratios)?;
    Ok(serde_json::to_value(material)?)
}

pub fn infiltration(args: &InfiltrationArgs, config: &Config) -> Result<Value> {
    let library = config.library()?;
    let schedule = args.schedule.as_deref().map(ScheduleInput::from);
    let infil = hb_lite_energy::infiltration(
        args.name.as_deref(),
        args.flow_per_exterior_area,
        schedule,
        &library,
    )?;
    Ok(serde_json::to_value(infil)?)
}

pub fn program_type(args: &ProgramTypeArgs, config: &Config) -> Result<Value> {
    let builder = match &args.base {
        Some(base) => {
            let library = config.library()?;
            ProgramTypeBuilder::from_base(&args.name, &ProgramTypeInput::from(base.as_str()), &library)?
        }
        None => ProgramTypeBuilder::new(&args.name),
    };
    let program = builder
        .people(read_load::<People>(args.people.as_ref(), "People")?)
        .lighting(read_load::<Lighting>(args.lighting.as_ref(), "Lighting")?)
        .electric_equipment(read_load::<Equipment>(args.electric_equipment.as_ref(), "Equipment")?)
        .gas_equipment(read_load::<Equipment>(args.gas_equipment.as_ref(), "Equipment")?)
        .infiltration(read_load::<Infiltration>(args.infiltration.as_ref(), "Infiltration")?)
        .ventilation(read_load::<Ventilation>(args.ventilation.as_ref(), "Ventilation")?)
        .setpoint(read_load::<Setpoint>(args.setpoint.as_ref(), "Setpoint")?)
        .build();
    Ok(serde_json::to_value(program)?)
}

pub fn deconstruct_people_file(path: &Path) -> Result<Value> {
    let value = read_json(path)?;
    let parts = deconstruct_people(&value)?;
    Ok(serde_json::to_value(parts)?)
}

/// Writes `value` to `output`, or stdout when no file is given.
pub fn write_output(value: &Value, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

/// Rejects an output path that points at an existing directory.
pub fn check_output(output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if path.is_dir() {
            bail!("output {} is a directory", path.display());
        }
    }
    Ok(())
}
