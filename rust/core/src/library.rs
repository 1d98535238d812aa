// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resource libraries: lookup of constructions, schedules and program types
//! by identifier.
//!
//! Component inputs accept either a resolved object or the identifier of an
//! object in a library. [`ResourceLibrary`] is the lookup seam; [`Library`]
//! is the in-memory implementation, seeded with generic defaults and
//! optionally extended from a JSON document.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::construction::OpaqueConstruction;
use crate::error::{Error, Result};
use crate::load::{Equipment, Infiltration, Lighting, People, Setpoint, Ventilation};
use crate::material::{EnergyMaterial, Roughness};
use crate::program::ProgramType;
use crate::schedule::{Schedule, ScheduleTypeLimit, HOURS_PER_DAY};

/// Identifier of the schedule used when a load has no schedule input.
pub const ALWAYS_ON: &str = "Always On";

/// Lookup of named resources.
pub trait ResourceLibrary {
    fn opaque_construction(&self, identifier: &str) -> Option<Arc<OpaqueConstruction>>;

    fn schedule(&self, identifier: &str) -> Option<Schedule>;

    fn program_type(&self, identifier: &str) -> Option<ProgramType>;

    fn opaque_construction_by_name(&self, name: &str) -> Result<Arc<OpaqueConstruction>> {
        self.opaque_construction(name).ok_or_else(|| Error::Lookup {
            kind: "opaque construction",
            name: name.to_string(),
        })
    }

    fn schedule_by_name(&self, name: &str) -> Result<Schedule> {
        self.schedule(name).ok_or_else(|| Error::Lookup {
            kind: "schedule",
            name: name.to_string(),
        })
    }

    fn program_type_by_name(&self, name: &str) -> Result<ProgramType> {
        self.program_type(name).ok_or_else(|| Error::Lookup {
            kind: "program type",
            name: name.to_string(),
        })
    }
}

impl<T: ResourceLibrary + ?Sized> ResourceLibrary for &T {
    fn opaque_construction(&self, identifier: &str) -> Option<Arc<OpaqueConstruction>> {
        (**self).opaque_construction(identifier)
    }

    fn schedule(&self, identifier: &str) -> Option<Schedule> {
        (**self).schedule(identifier)
    }

    fn program_type(&self, identifier: &str) -> Option<ProgramType> {
        (**self).program_type(identifier)
    }
}

/// On-disk form of a library.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LibraryDocument {
    #[serde(default)]
    pub constructions: Vec<OpaqueConstruction>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub program_types: Vec<ProgramType>,
}

/// In-memory resource library keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Library {
    constructions: FxHashMap<String, Arc<OpaqueConstruction>>,
    schedules: FxHashMap<String, Schedule>,
    program_types: FxHashMap<String, ProgramType>,
}

impl Library {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding the generic constructions, schedules and program.
    pub fn with_defaults() -> Self {
        let mut lib = Self::new();
        for c in default_constructions() {
            lib.add_construction(c);
        }
        for s in default_schedules() {
            lib.add_schedule(s);
        }
        lib.add_program_type(generic_office_program());
        lib
    }

    /// Builds a library from a document, validating every entry.
    pub fn from_document(doc: LibraryDocument) -> Result<Self> {
        let mut lib = Self::new();
        for c in doc.constructions {
            c.validate()?;
            lib.add_construction(c);
        }
        for s in doc.schedules {
            s.validate()?;
            lib.add_schedule(s);
        }
        for p in doc.program_types {
            p.validate()?;
            lib.add_program_type(p);
        }
        Ok(lib)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Reads a library document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let lib = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            constructions = lib.constructions.len(),
            schedules = lib.schedules.len(),
            program_types = lib.program_types.len(),
            "Loaded resource library"
        );
        Ok(lib)
    }

    /// Adds entries of `other`, replacing entries with the same identifier.
    pub fn merge(&mut self, other: Library) {
        self.constructions.extend(other.constructions);
        self.schedules.extend(other.schedules);
        self.program_types.extend(other.program_types);
    }

    /// Adds a construction, returning any construction it replaced.
    pub fn add_construction(
        &mut self,
        construction: OpaqueConstruction,
    ) -> Option<Arc<OpaqueConstruction>> {
        self.constructions
            .insert(construction.identifier.clone(), Arc::new(construction))
    }

    pub fn add_schedule(&mut self, schedule: Schedule) -> Option<Schedule> {
        self.schedules.insert(schedule.identifier.clone(), schedule)
    }

    pub fn add_program_type(&mut self, program: ProgramType) -> Option<ProgramType> {
        self.program_types.insert(program.identifier.clone(), program)
    }

    /// Sorted construction identifiers.
    pub fn construction_identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.constructions.is_empty() && self.schedules.is_empty() && self.program_types.is_empty()
    }
}

impl ResourceLibrary for Library {
    fn opaque_construction(&self, identifier: &str) -> Option<Arc<OpaqueConstruction>> {
        self.constructions.get(identifier).cloned()
    }

    fn schedule(&self, identifier: &str) -> Option<Schedule> {
        self.schedules.get(identifier).cloned()
    }

    fn program_type(&self, identifier: &str) -> Option<ProgramType> {
        self.program_types.get(identifier).cloned()
    }
}

fn material(
    identifier: &str,
    thickness: f64,
    conductivity: f64,
    density: f64,
    specific_heat: f64,
) -> EnergyMaterial {
    EnergyMaterial {
        identifier: identifier.to_string(),
        thickness,
        conductivity,
        density,
        specific_heat,
        roughness: Roughness::MediumRough,
        thermal_absorptance: 0.9,
        solar_absorptance: 0.7,
        visible_absorptance: 0.7,
    }
}

fn construction(identifier: &str, materials: Vec<EnergyMaterial>) -> OpaqueConstruction {
    OpaqueConstruction {
        identifier: identifier.to_string(),
        materials,
    }
}

fn default_constructions() -> Vec<OpaqueConstruction> {
    let brick = material("Generic Brick", 0.1, 0.9, 1920.0, 790.0);
    let lw_concrete = material("Generic LW Concrete", 0.1, 0.53, 1280.0, 840.0);
    let hw_concrete = material("Generic HW Concrete", 0.2, 1.95, 2240.0, 900.0);
    let insulation_50 = material("Generic 50mm Insulation", 0.05, 0.03, 43.0, 1210.0);
    let insulation_25 = material("Generic 25mm Insulation", 0.025, 0.03, 43.0, 1210.0);
    let gypsum = material("Generic Gypsum Board", 0.0127, 0.16, 800.0, 1090.0);
    let membrane = material("Generic Roof Membrane", 0.01, 0.16, 1120.0, 1460.0);
    let tile = material("Generic Acoustic Tile", 0.02, 0.06, 368.0, 590.0);
    let metal = material("Generic Painted Metal", 0.0015, 45.0, 7690.0, 410.0);
    let wood = material("Generic 25mm Wood", 0.0254, 0.15, 608.0, 1630.0);

    vec![
        construction(
            "Generic Exterior Wall",
            vec![brick, lw_concrete.clone(), insulation_50.clone(), gypsum.clone()],
        ),
        construction("Generic Interior Wall", vec![gypsum.clone(), gypsum]),
        construction(
            "Generic Roof",
            vec![membrane, insulation_50.clone(), lw_concrete.clone(), tile],
        ),
        construction(
            "Generic Exposed Floor",
            vec![metal.clone(), insulation_50.clone(), lw_concrete],
        ),
        construction("Generic Ground Slab", vec![insulation_50, hw_concrete]),
        construction(
            "Generic Exterior Door",
            vec![metal.clone(), insulation_25, metal],
        ),
        construction("Generic Interior Door", vec![wood]),
    ]
}

fn office_hours(on: f64, off: f64) -> Vec<f64> {
    (0..HOURS_PER_DAY)
        .map(|h| if (8..18).contains(&h) { on } else { off })
        .collect()
}

fn schedule(identifier: &str, type_limit: ScheduleTypeLimit, values: Vec<f64>) -> Schedule {
    Schedule {
        identifier: identifier.to_string(),
        type_limit,
        values,
    }
}

fn default_schedules() -> Vec<Schedule> {
    vec![
        schedule(ALWAYS_ON, ScheduleTypeLimit::Fractional, vec![1.0; HOURS_PER_DAY]),
        schedule(
            "Generic Office Occupancy",
            ScheduleTypeLimit::Fractional,
            office_hours(0.95, 0.0),
        ),
        schedule(
            "Generic Office Activity",
            ScheduleTypeLimit::ActivityLevel,
            vec![120.0; HOURS_PER_DAY],
        ),
        schedule(
            "Generic Office Lighting",
            ScheduleTypeLimit::Fractional,
            office_hours(0.9, 0.05),
        ),
        schedule(
            "Generic Office Equipment",
            ScheduleTypeLimit::Fractional,
            office_hours(0.9, 0.4),
        ),
        schedule(
            "Generic Office Infiltration",
            ScheduleTypeLimit::Fractional,
            office_hours(0.25, 1.0),
        ),
        schedule(
            "Generic Office Heating",
            ScheduleTypeLimit::Temperature,
            office_hours(21.0, 15.6),
        ),
        schedule(
            "Generic Office Cooling",
            ScheduleTypeLimit::Temperature,
            office_hours(24.0, 26.7),
        ),
    ]
}

fn generic_office_program() -> ProgramType {
    let schedules: FxHashMap<String, Schedule> = default_schedules()
        .into_iter()
        .map(|s| (s.identifier.clone(), s))
        .collect();
    let sch = |id: &str| {
        schedules
            .get(id)
            .cloned()
            .unwrap_or_else(|| schedule(id, ScheduleTypeLimit::Fractional, vec![1.0; HOURS_PER_DAY]))
    };

    ProgramType {
        identifier: "Generic Office Program".to_string(),
        display_name: Some("Generic Office Program".to_string()),
        people: Some(People {
            identifier: "Generic Office People".to_string(),
            people_per_area: 0.0565,
            occupancy_schedule: sch("Generic Office Occupancy"),
            activity_schedule: sch("Generic Office Activity"),
            radiant_fraction: 0.3,
            latent_fraction: None,
        }),
        lighting: Some(Lighting {
            identifier: "Generic Office Lighting".to_string(),
            watts_per_area: 10.55,
            schedule: sch("Generic Office Lighting"),
            radiant_fraction: 0.32,
            visible_fraction: 0.25,
        }),
        electric_equipment: Some(Equipment {
            identifier: "Generic Office Equipment".to_string(),
            watts_per_area: 10.33,
            schedule: sch("Generic Office Equipment"),
            radiant_fraction: 0.5,
            latent_fraction: 0.0,
            lost_fraction: 0.0,
        }),
        gas_equipment: None,
        infiltration: Some(Infiltration {
            identifier: "Generic Office Infiltration".to_string(),
            flow_per_exterior_area: 0.0002266,
            schedule: sch("Generic Office Infiltration"),
            constant_coefficient: 1.0,
            temperature_coefficient: 0.0,
            velocity_coefficient: 0.0,
        }),
        ventilation: Some(Ventilation {
            identifier: "Generic Office Ventilation".to_string(),
            flow_per_person: 0.00236,
            flow_per_area: 0.000305,
            flow_per_zone: 0.0,
            air_changes_per_hour: 0.0,
        }),
        setpoint: Some(Setpoint {
            identifier: "Generic Office Setpoints".to_string(),
            heating_schedule: sch("Generic Office Heating"),
            cooling_schedule: sch("Generic Office Cooling"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let lib = Library::with_defaults();
        for id in lib.construction_identifiers() {
            lib.opaque_construction(id).unwrap().validate().unwrap();
        }
        lib.schedule_by_name(ALWAYS_ON).unwrap().validate().unwrap();

        let program = lib.program_type_by_name("Generic Office Program").unwrap();
        assert_eq!(program.load_count(), 6);
        program.validate().unwrap();
    }

    #[test]
    fn lookup_error_names_resource() {
        let lib = Library::with_defaults();
        let err = lib.opaque_construction_by_name("Nonexistent Wall").unwrap_err();
        match err {
            Error::Lookup { kind, name } => {
                assert_eq!(kind, "opaque construction");
                assert_eq!(name, "Nonexistent Wall");
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
        assert!(lib.schedule_by_name("Never").is_err());
        assert!(lib.program_type_by_name("Lab").is_err());
    }

    #[test]
    fn json_library_merges_over_defaults() {
        let json = r#"{
            "constructions": [{
                "type": "OpaqueConstruction",
                "identifier": "Generic Exterior Wall",
                "materials": [{
                    "type": "EnergyMaterial",
                    "identifier": "Thick Concrete",
                    "thickness": 0.3,
                    "conductivity": 1.4,
                    "density": 2300,
                    "specific_heat": 880
                }]
            }],
            "schedules": [{
                "type": "Schedule",
                "identifier": "Half",
                "type_limit": "Fractional",
                "values": [0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5,
                           0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5]
            }]
        }"#;
        let mut lib = Library::with_defaults();
        let before = lib.construction_identifiers().len();
        lib.merge(Library::from_json_str(json).unwrap());

        assert_eq!(lib.construction_identifiers().len(), before);
        let wall = lib.opaque_construction_by_name("Generic Exterior Wall").unwrap();
        assert_eq!(wall.layers(), vec!["Thick Concrete"]);
        assert_eq!(lib.schedule_by_name("Half").unwrap().average(), 0.5);
    }

    #[test]
    fn invalid_json_entries_rejected() {
        let json = r#"{"constructions": [{"type": "OpaqueConstruction", "identifier": "Empty", "materials": []}]}"#;
        let err = Library::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("1 to 10 layers"), "{err}");
        assert!(matches!(Library::from_json_str("{"), Err(Error::Serialization(_))));

        // Documents built in code are checked when the library is made
        let mut program = ProgramType::new("Bad Program").unwrap();
        let mut lighting = Library::with_defaults()
            .program_type("Generic Office Program")
            .and_then(|p| p.lighting.clone())
            .unwrap();
        lighting.radiant_fraction = 2.0;
        program.lighting = Some(lighting);
        let doc = LibraryDocument {
            program_types: vec![program],
            ..Default::default()
        };
        assert!(matches!(Library::from_document(doc), Err(Error::Validation(_))));
    }

    #[test]
    fn empty_library() {
        assert!(Library::new().is_empty());
        assert!(!Library::with_defaults().is_empty());
    }
}
