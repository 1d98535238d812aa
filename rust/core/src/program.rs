// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Program types: the bundle of loads describing how a space is used.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::load::{Equipment, Infiltration, Lighting, People, Setpoint, Ventilation};
use crate::typing::valid_ep_string;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "ProgramType", try_from = "ProgramTypeData")]
pub struct ProgramType {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<People>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting: Option<Lighting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electric_equipment: Option<Equipment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_equipment: Option<Equipment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infiltration: Option<Infiltration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ventilation: Option<Ventilation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<Setpoint>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "ProgramType")]
struct ProgramTypeData {
    identifier: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    people: Option<People>,
    #[serde(default)]
    lighting: Option<Lighting>,
    #[serde(default)]
    electric_equipment: Option<Equipment>,
    #[serde(default)]
    gas_equipment: Option<Equipment>,
    #[serde(default)]
    infiltration: Option<Infiltration>,
    #[serde(default)]
    ventilation: Option<Ventilation>,
    #[serde(default)]
    setpoint: Option<Setpoint>,
}

impl TryFrom<ProgramTypeData> for ProgramType {
    type Error = Error;

    fn try_from(data: ProgramTypeData) -> Result<Self> {
        // Loads were validated as they were read.
        Ok(ProgramType {
            identifier: valid_ep_string(&data.identifier, "program type identifier")?,
            display_name: data.display_name,
            people: data.people,
            lighting: data.lighting,
            electric_equipment: data.electric_equipment,
            gas_equipment: data.gas_equipment,
            infiltration: data.infiltration,
            ventilation: data.ventilation,
            setpoint: data.setpoint,
        })
    }
}

impl ProgramType {
    /// An empty program with no loads.
    pub fn new(identifier: &str) -> Result<Self> {
        Ok(Self {
            identifier: valid_ep_string(identifier, "program type identifier")?,
            ..Default::default()
        })
    }

    /// Checks the identifier and every load that is set.
    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "program type identifier")?;
        if let Some(people) = &self.people {
            people.validate()?;
        }
        if let Some(lighting) = &self.lighting {
            lighting.validate()?;
        }
        for equipment in [&self.electric_equipment, &self.gas_equipment].into_iter().flatten() {
            equipment.validate()?;
        }
        if let Some(infiltration) = &self.infiltration {
            infiltration.validate()?;
        }
        if let Some(ventilation) = &self.ventilation {
            ventilation.validate()?;
        }
        if let Some(setpoint) = &self.setpoint {
            setpoint.validate()?;
        }
        Ok(())
    }

    /// Display name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    /// Number of loads set on this program.
    pub fn load_count(&self) -> usize {
        [
            self.people.is_some(),
            self.lighting.is_some(),
            self.electric_equipment.is_some(),
            self.gas_equipment.is_some(),
            self.infiltration.is_some(),
            self.ventilation.is_some(),
            self.setpoint.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        let program = ProgramType::new("Plenum").unwrap();
        assert_eq!(program.display_name(), "Plenum");
        assert_eq!(program.load_count(), 0);

        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json, serde_json::json!({"type": "ProgramType", "identifier": "Plenum"}));
    }

    #[test]
    fn nested_schedules_validated_from_json() {
        let json = serde_json::json!({
            "type": "ProgramType",
            "identifier": "Office",
            "lighting": {
                "type": "Lighting",
                "identifier": "Office Lighting",
                "watts_per_area": 10.0,
                "schedule": {
                    "type": "Schedule",
                    "identifier": "Short",
                    "type_limit": "Fractional",
                    "values": [1.0]
                }
            }
        });
        let err = serde_json::from_value::<ProgramType>(json).unwrap_err();
        assert!(err.to_string().contains("24 hourly values"), "{err}");

        let json = serde_json::json!({"type": "ProgramType", "identifier": "Bad!Name"});
        assert!(serde_json::from_value::<ProgramType>(json).is_err());
    }

    #[test]
    fn display_name_preferred() {
        let mut program = ProgramType::new("Office_1a2b3c4d").unwrap();
        program.display_name = Some("Office".to_string());
        assert_eq!(program.display_name(), "Office");
    }
}
