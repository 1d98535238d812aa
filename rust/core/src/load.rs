// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal loads and setpoints that make up a program type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schedule::{Schedule, ScheduleTypeLimit};
use crate::typing::valid_ep_string;

/// Metabolic rate of a seated adult in W/person.
pub const SEATED_ADULT_ACTIVITY: f64 = 120.0;

fn check_non_negative(owner: &str, name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{owner} {name} must be zero or positive, got {value}"
        )))
    }
}

fn check_fraction(owner: &str, name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{owner} {name} must be between 0 and 1, got {value}"
        )))
    }
}

fn check_type_limit(owner: &str, schedule: &Schedule, expected: &[ScheduleTypeLimit]) -> Result<()> {
    if expected.contains(&schedule.type_limit) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{owner} schedule \"{}\" has type {:?}; expected one of {expected:?}",
            schedule.identifier, schedule.type_limit
        )))
    }
}

const FRACTIONAL: [ScheduleTypeLimit; 2] = [ScheduleTypeLimit::Fractional, ScheduleTypeLimit::OnOff];

/// Default activity schedule: a seated adult at every hour.
pub fn seated_adult_activity() -> Schedule {
    Schedule {
        identifier: "Seated Adult Activity".to_string(),
        type_limit: ScheduleTypeLimit::ActivityLevel,
        values: vec![SEATED_ADULT_ACTIVITY; crate::schedule::HOURS_PER_DAY],
    }
}

/// Occupancy of a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "People", try_from = "PeopleData")]
pub struct People {
    pub identifier: String,
    /// People per m^2 of floor area.
    pub people_per_area: f64,
    pub occupancy_schedule: Schedule,
    pub activity_schedule: Schedule,
    #[serde(default = "default_people_radiant")]
    pub radiant_fraction: f64,
    /// `None` lets the simulation compute the latent fraction.
    #[serde(default)]
    pub latent_fraction: Option<f64>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "People")]
struct PeopleData {
    identifier: String,
    people_per_area: f64,
    occupancy_schedule: Schedule,
    activity_schedule: Schedule,
    #[serde(default = "default_people_radiant")]
    radiant_fraction: f64,
    #[serde(default)]
    latent_fraction: Option<f64>,
}

fn default_people_radiant() -> f64 {
    0.3
}

impl TryFrom<PeopleData> for People {
    type Error = Error;

    fn try_from(data: PeopleData) -> Result<Self> {
        let people = People {
            identifier: data.identifier,
            people_per_area: data.people_per_area,
            occupancy_schedule: data.occupancy_schedule,
            activity_schedule: data.activity_schedule,
            radiant_fraction: data.radiant_fraction,
            latent_fraction: data.latent_fraction,
        };
        people.validate()?;
        Ok(people)
    }
}

impl People {
    pub fn new(
        identifier: &str,
        people_per_area: f64,
        occupancy_schedule: Schedule,
        activity_schedule: Option<Schedule>,
    ) -> Result<Self> {
        let people = Self {
            identifier: identifier.to_string(),
            people_per_area,
            occupancy_schedule,
            activity_schedule: activity_schedule.unwrap_or_else(seated_adult_activity),
            radiant_fraction: default_people_radiant(),
            latent_fraction: None,
        };
        people.validate()?;
        Ok(people)
    }

    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "people identifier")?;
        check_non_negative("people", "people_per_area", self.people_per_area)?;
        check_fraction("people", "radiant_fraction", self.radiant_fraction)?;
        if let Some(latent) = self.latent_fraction {
            check_fraction("people", "latent_fraction", latent)?;
        }
        check_type_limit("occupancy", &self.occupancy_schedule, &FRACTIONAL)?;
        check_type_limit(
            "activity",
            &self.activity_schedule,
            &[ScheduleTypeLimit::ActivityLevel],
        )
    }

    /// Floor area per person in m^2, or `None` for unoccupied spaces.
    pub fn area_per_person(&self) -> Option<f64> {
        (self.people_per_area > 0.0).then(|| 1.0 / self.people_per_area)
    }
}

/// Uncontrolled outdoor air leakage through the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Infiltration", try_from = "InfiltrationData")]
pub struct Infiltration {
    pub identifier: String,
    /// m^3/s per m^2 of exterior surface area.
    pub flow_per_exterior_area: f64,
    pub schedule: Schedule,
    #[serde(default = "default_constant_coefficient")]
    pub constant_coefficient: f64,
    #[serde(default)]
    pub temperature_coefficient: f64,
    #[serde(default)]
    pub velocity_coefficient: f64,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Infiltration")]
struct InfiltrationData {
    identifier: String,
    flow_per_exterior_area: f64,
    schedule: Schedule,
    #[serde(default = "default_constant_coefficient")]
    constant_coefficient: f64,
    #[serde(default)]
    temperature_coefficient: f64,
    #[serde(default)]
    velocity_coefficient: f64,
}

fn default_constant_coefficient() -> f64 {
    1.0
}

impl TryFrom<InfiltrationData> for Infiltration {
    type Error = Error;

    fn try_from(data: InfiltrationData) -> Result<Self> {
        let infiltration = Infiltration {
            identifier: data.identifier,
            flow_per_exterior_area: data.flow_per_exterior_area,
            schedule: data.schedule,
            constant_coefficient: data.constant_coefficient,
            temperature_coefficient: data.temperature_coefficient,
            velocity_coefficient: data.velocity_coefficient,
        };
        infiltration.validate()?;
        Ok(infiltration)
    }
}

impl Infiltration {
    pub fn new(identifier: &str, flow_per_exterior_area: f64, schedule: Schedule) -> Result<Self> {
        let infiltration = Self {
            identifier: identifier.to_string(),
            flow_per_exterior_area,
            schedule,
            constant_coefficient: default_constant_coefficient(),
            temperature_coefficient: 0.0,
            velocity_coefficient: 0.0,
        };
        infiltration.validate()?;
        Ok(infiltration)
    }

    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "infiltration identifier")?;
        check_non_negative(
            "infiltration",
            "flow_per_exterior_area",
            self.flow_per_exterior_area,
        )?;
        check_type_limit("infiltration", &self.schedule, &FRACTIONAL)
    }
}

/// Electric lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Lighting", try_from = "LightingData")]
pub struct Lighting {
    pub identifier: String,
    /// W/m^2
    pub watts_per_area: f64,
    pub schedule: Schedule,
    #[serde(default = "default_lighting_radiant")]
    pub radiant_fraction: f64,
    #[serde(default = "default_lighting_visible")]
    pub visible_fraction: f64,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Lighting")]
struct LightingData {
    identifier: String,
    watts_per_area: f64,
    schedule: Schedule,
    #[serde(default = "default_lighting_radiant")]
    radiant_fraction: f64,
    #[serde(default = "default_lighting_visible")]
    visible_fraction: f64,
}

impl TryFrom<LightingData> for Lighting {
    type Error = Error;

    fn try_from(data: LightingData) -> Result<Self> {
        let lighting = Lighting {
            identifier: data.identifier,
            watts_per_area: data.watts_per_area,
            schedule: data.schedule,
            radiant_fraction: data.radiant_fraction,
            visible_fraction: data.visible_fraction,
        };
        lighting.validate()?;
        Ok(lighting)
    }
}

fn default_lighting_radiant() -> f64 {
    0.32
}

fn default_lighting_visible() -> f64 {
    0.25
}

impl Lighting {
    pub fn new(identifier: &str, watts_per_area: f64, schedule: Schedule) -> Result<Self> {
        let lighting = Self {
            identifier: identifier.to_string(),
            watts_per_area,
            schedule,
            radiant_fraction: default_lighting_radiant(),
            visible_fraction: default_lighting_visible(),
        };
        lighting.validate()?;
        Ok(lighting)
    }

    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "lighting identifier")?;
        check_non_negative("lighting", "watts_per_area", self.watts_per_area)?;
        check_fraction("lighting", "radiant_fraction", self.radiant_fraction)?;
        check_fraction("lighting", "visible_fraction", self.visible_fraction)?;
        check_type_limit("lighting", &self.schedule, &FRACTIONAL)
    }
}

/// Plug loads; used for both electric and gas equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Equipment", try_from = "EquipmentData")]
pub struct Equipment {
    pub identifier: String,
    /// W/m^2
    pub watts_per_area: f64,
    pub schedule: Schedule,
    #[serde(default)]
    pub radiant_fraction: f64,
    #[serde(default)]
    pub latent_fraction: f64,
    #[serde(default)]
    pub lost_fraction: f64,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Equipment")]
struct EquipmentData {
    identifier: String,
    watts_per_area: f64,
    schedule: Schedule,
    #[serde(default)]
    radiant_fraction: f64,
    #[serde(default)]
    latent_fraction: f64,
    #[serde(default)]
    lost_fraction: f64,
}

impl TryFrom<EquipmentData> for Equipment {
    type Error = Error;

    fn try_from(data: EquipmentData) -> Result<Self> {
        let equipment = Equipment {
            identifier: data.identifier,
            watts_per_area: data.watts_per_area,
            schedule: data.schedule,
            radiant_fraction: data.radiant_fraction,
            latent_fraction: data.latent_fraction,
            lost_fraction: data.lost_fraction,
        };
        equipment.validate()?;
        Ok(equipment)
    }
}

impl Equipment {
    pub fn new(identifier: &str, watts_per_area: f64, schedule: Schedule) -> Result<Self> {
        let equipment = Self {
            identifier: identifier.to_string(),
            watts_per_area,
            schedule,
            radiant_fraction: 0.0,
            latent_fraction: 0.0,
            lost_fraction: 0.0,
        };
        equipment.validate()?;
        Ok(equipment)
    }

    /// The radiant, latent and lost fractions may not add up to more than 1.
    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "equipment identifier")?;
        check_non_negative("equipment", "watts_per_area", self.watts_per_area)?;
        let fractions = [
            ("radiant_fraction", self.radiant_fraction),
            ("latent_fraction", self.latent_fraction),
            ("lost_fraction", self.lost_fraction),
        ];
        for (name, value) in fractions {
            check_fraction("equipment", name, value)?;
        }
        let total = self.radiant_fraction + self.latent_fraction + self.lost_fraction;
        if total > 1.0 {
            return Err(Error::validation(format!(
                "equipment \"{}\" fractions sum to {total}, more than 1",
                self.identifier
            )));
        }
        check_type_limit("equipment", &self.schedule, &FRACTIONAL)
    }
}

/// Minimum outdoor air requirement. The individual criteria are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Ventilation", try_from = "VentilationData")]
pub struct Ventilation {
    pub identifier: String,
    /// m^3/s per person
    #[serde(default)]
    pub flow_per_person: f64,
    /// m^3/s per m^2 of floor
    #[serde(default)]
    pub flow_per_area: f64,
    /// m^3/s for the whole zone
    #[serde(default)]
    pub flow_per_zone: f64,
    #[serde(default)]
    pub air_changes_per_hour: f64,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Ventilation")]
struct VentilationData {
    identifier: String,
    #[serde(default)]
    flow_per_person: f64,
    #[serde(default)]
    flow_per_area: f64,
    #[serde(default)]
    flow_per_zone: f64,
    #[serde(default)]
    air_changes_per_hour: f64,
}

impl TryFrom<VentilationData> for Ventilation {
    type Error = Error;

    fn try_from(data: VentilationData) -> Result<Self> {
        let ventilation = Ventilation {
            identifier: data.identifier,
            flow_per_person: data.flow_per_person,
            flow_per_area: data.flow_per_area,
            flow_per_zone: data.flow_per_zone,
            air_changes_per_hour: data.air_changes_per_hour,
        };
        ventilation.validate()?;
        Ok(ventilation)
    }
}

impl Ventilation {
    pub fn new(
        identifier: &str,
        flow_per_person: f64,
        flow_per_area: f64,
        flow_per_zone: f64,
        air_changes_per_hour: f64,
    ) -> Result<Self> {
        let ventilation = Self {
            identifier: identifier.to_string(),
            flow_per_person,
            flow_per_area,
            flow_per_zone,
            air_changes_per_hour,
        };
        ventilation.validate()?;
        Ok(ventilation)
    }

    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "ventilation identifier")?;
        let criteria = [
            ("flow_per_person", self.flow_per_person),
            ("flow_per_area", self.flow_per_area),
            ("flow_per_zone", self.flow_per_zone),
            ("air_changes_per_hour", self.air_changes_per_hour),
        ];
        for (name, value) in criteria {
            check_non_negative("ventilation", name, value)?;
        }
        Ok(())
    }
}

/// Thermostat heating and cooling setpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Setpoint", try_from = "SetpointData")]
pub struct Setpoint {
    pub identifier: String,
    pub heating_schedule: Schedule,
    pub cooling_schedule: Schedule,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Setpoint")]
struct SetpointData {
    identifier: String,
    heating_schedule: Schedule,
    cooling_schedule: Schedule,
}

impl TryFrom<SetpointData> for Setpoint {
    type Error = Error;

    fn try_from(data: SetpointData) -> Result<Self> {
        Self::new(&data.identifier, data.heating_schedule, data.cooling_schedule)
    }
}

impl Setpoint {
    pub fn new(identifier: &str, heating_schedule: Schedule, cooling_schedule: Schedule) -> Result<Self> {
        let setpoint = Self {
            identifier: identifier.to_string(),
            heating_schedule,
            cooling_schedule,
        };
        setpoint.validate()?;
        Ok(setpoint)
    }

    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "setpoint identifier")?;
        check_type_limit("heating", &self.heating_schedule, &[ScheduleTypeLimit::Temperature])?;
        check_type_limit("cooling", &self.cooling_schedule, &[ScheduleTypeLimit::Temperature])
    }

    /// Highest heating setpoint of the day in C.
    pub fn heating_setpoint(&self) -> f64 {
        self.heating_schedule
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Lowest cooling setpoint of the day in C.
    pub fn cooling_setpoint(&self) -> f64 {
        self.cooling_schedule
            .values
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }
}
