// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque layer materials and window gap gases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::typing::valid_ep_string;

/// Surface roughness of an opaque material (affects exterior convection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Roughness {
    VeryRough,
    Rough,
    #[default]
    MediumRough,
    MediumSmooth,
    Smooth,
    VerySmooth,
}

/// A single homogeneous opaque layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "EnergyMaterial")]
pub struct EnergyMaterial {
    pub identifier: String,
    /// Layer thickness in m.
    pub thickness: f64,
    /// W/(m*K)
    pub conductivity: f64,
    /// kg/m^3
    pub density: f64,
    /// J/(kg*K)
    pub specific_heat: f64,
    #[serde(default)]
    pub roughness: Roughness,
    #[serde(default = "default_thermal_absorptance")]
    pub thermal_absorptance: f64,
    #[serde(default = "default_solar_absorptance")]
    pub solar_absorptance: f64,
    #[serde(default = "default_solar_absorptance")]
    pub visible_absorptance: f64,
}

fn default_thermal_absorptance() -> f64 {
    0.9
}

fn default_solar_absorptance() -> f64 {
    0.7
}

impl EnergyMaterial {
    pub fn new(
        identifier: &str,
        thickness: f64,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> Result<Self> {
        let material = Self {
            identifier: valid_ep_string(identifier, "material identifier")?,
            thickness,
            conductivity,
            density,
            specific_heat,
            roughness: Roughness::default(),
            thermal_absorptance: default_thermal_absorptance(),
            solar_absorptance: default_solar_absorptance(),
            visible_absorptance: default_solar_absorptance(),
        };
        material.validate()?;
        Ok(material)
    }

    /// Checks physical ranges; used for materials loaded from JSON as well.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("thickness", self.thickness),
            ("conductivity", self.conductivity),
            ("density", self.density),
            ("specific_heat", self.specific_heat),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::validation(format!(
                    "material \"{}\" {name} must be positive, got {value}",
                    self.identifier
                )));
            }
        }
        let fractions = [
            ("thermal_absorptance", self.thermal_absorptance),
            ("solar_absorptance", self.solar_absorptance),
            ("visible_absorptance", self.visible_absorptance),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::validation(format!(
                    "material \"{}\" {name} must be between 0 and 1, got {value}",
                    self.identifier
                )));
            }
        }
        Ok(())
    }

    /// Thermal resistance of the layer in m^2*K/W.
    pub fn r_value(&self) -> f64 {
        self.thickness / self.conductivity
    }

    /// Heat capacity per unit area in J/(m^2*K).
    pub fn thermal_capacity(&self) -> f64 {
        self.density * self.specific_heat * self.thickness
    }
}

/// Fill gas of a window cavity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GasType {
    Air,
    Argon,
    Krypton,
    Xenon,
}

impl GasType {
    pub const ALL: [GasType; 4] = [GasType::Air, GasType::Argon, GasType::Krypton, GasType::Xenon];

    pub fn as_str(&self) -> &'static str {
        match self {
            GasType::Air => "Air",
            GasType::Argon => "Argon",
            GasType::Krypton => "Krypton",
            GasType::Xenon => "Xenon",
        }
    }
}

impl fmt::Display for GasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GasType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GasType::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::validation(format!(
                    "unknown gas type \"{s}\"; choose from Air, Argon, Krypton, Xenon"
                ))
            })
    }
}

/// A window cavity filled with a single gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "EnergyWindowMaterialGas")]
pub struct EnergyWindowMaterialGas {
    pub identifier: String,
    pub thickness: f64,
    pub gas_type: GasType,
}

impl EnergyWindowMaterialGas {
    pub fn new(identifier: &str, thickness: f64, gas_type: GasType) -> Result<Self> {
        check_gap_thickness(identifier, thickness)?;
        Ok(Self {
            identifier: valid_ep_string(identifier, "gas material identifier")?,
            thickness,
            gas_type,
        })
    }
}

/// A window cavity filled with a mixture of two to four gases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "EnergyWindowMaterialGasMixture")]
pub struct EnergyWindowMaterialGasMixture {
    pub identifier: String,
    pub thickness: f64,
    pub gas_types: Vec<GasType>,
    pub gas_fractions: Vec<f64>,
}

/// Allowed deviation of the summed gas fractions from 1.
const FRACTION_SUM_TOLERANCE: f64 = 0.005;

impl EnergyWindowMaterialGasMixture {
    pub fn new(
        identifier: &str,
        thickness: f64,
        gas_types: Vec<GasType>,
        gas_fractions: Vec<f64>,
    ) -> Result<Self> {
        check_gap_thickness(identifier, thickness)?;
        if gas_types.len() != gas_fractions.len() {
            return Err(Error::validation(format!(
                "length of gas types ({}) does not equal length of gas fractions ({})",
                gas_types.len(),
                gas_fractions.len()
            )));
        }
        if !(2..=4).contains(&gas_types.len()) {
            return Err(Error::validation(format!(
                "a gas mixture needs 2 to 4 gases, got {}",
                gas_types.len()
            )));
        }
        if let Some(f) = gas_fractions.iter().find(|f| !(**f > 0.0 && **f <= 1.0)) {
            return Err(Error::validation(format!(
                "gas fractions must be in (0, 1], got {f}"
            )));
        }
        let total: f64 = gas_fractions.iter().sum();
        if (total - 1.0).abs() > FRACTION_SUM_TOLERANCE {
            return Err(Error::validation(format!(
                "gas fractions must sum to 1, got {total}"
            )));
        }
        Ok(Self {
            identifier: valid_ep_string(identifier, "gas material identifier")?,
            thickness,
            gas_types,
            gas_fractions,
        })
    }
}

fn check_gap_thickness(identifier: &str, thickness: f64) -> Result<()> {
    if thickness > 0.0 && thickness.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "gap \"{identifier}\" thickness must be positive, got {thickness}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn material_resistance_and_capacity() {
        let concrete = EnergyMaterial::new("Concrete", 0.2, 1.4, 2300.0, 880.0).unwrap();
        assert_relative_eq!(concrete.r_value(), 0.2 / 1.4, epsilon = 1e-12);
        assert_relative_eq!(concrete.thermal_capacity(), 404_800.0, epsilon = 1e-6);
        assert_eq!(concrete.roughness, Roughness::MediumRough);
    }

    #[test]
    fn material_rejects_non_positive_values() {
        assert!(EnergyMaterial::new("Bad", 0.0, 1.0, 1.0, 1.0).is_err());
        assert!(EnergyMaterial::new("Bad", 0.1, -1.0, 1.0, 1.0).is_err());
        assert!(EnergyMaterial::new("Bad;Name", 0.1, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn gas_type_parses_case_insensitively() {
        assert_eq!("argon".parse::<GasType>().unwrap(), GasType::Argon);
        assert_eq!(" XENON ".parse::<GasType>().unwrap(), GasType::Xenon);
        let err = "Helium".parse::<GasType>().unwrap_err();
        assert!(err.to_string().contains("Helium"));
    }

    #[test]
    fn mixture_validates_lengths_and_fractions() {
        let ok = EnergyWindowMaterialGasMixture::new(
            "Argon Air",
            0.0127,
            vec![GasType::Argon, GasType::Air],
            vec![0.9, 0.1],
        );
        assert!(ok.is_ok());

        let mismatch = EnergyWindowMaterialGasMixture::new(
            "Mix",
            0.0127,
            vec![GasType::Argon, GasType::Air],
            vec![1.0],
        )
        .unwrap_err();
        let msg = mismatch.to_string();
        assert!(msg.contains("(2)") && msg.contains("(1)"), "{msg}");

        assert!(EnergyWindowMaterialGasMixture::new(
            "Mix",
            0.0127,
            vec![GasType::Argon, GasType::Air],
            vec![0.5, 0.4],
        )
        .is_err());

        assert!(EnergyWindowMaterialGasMixture::new("Mix", 0.0127, vec![GasType::Air], vec![1.0])
            .is_err());
    }

    #[test]
    fn gas_requires_positive_thickness() {
        assert!(EnergyWindowMaterialGas::new("Gap", 0.0, GasType::Air).is_err());
        let gap = EnergyWindowMaterialGas::new("Gap", 0.0125, GasType::Air).unwrap();
        let json = serde_json::to_value(&gap).unwrap();
        assert_eq!(json["type"], "EnergyWindowMaterialGas");
        assert_eq!(json["gas_type"], "Air");
    }
}
