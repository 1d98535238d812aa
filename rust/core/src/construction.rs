// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque constructions: ordered material layers, outside to inside.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::material::EnergyMaterial;
use crate::typing::valid_ep_string;

/// Maximum number of layers a construction may have.
pub const MAX_LAYERS: usize = 10;

/// External surface film resistance in m^2*K/W (ISO 6946).
pub const R_SE: f64 = 0.04;
/// Internal surface film resistance for horizontal heat flow in m^2*K/W (ISO 6946).
pub const R_SI: f64 = 0.13;

/// A named stack of opaque layers. Identity is the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "OpaqueConstruction", try_from = "OpaqueConstructionData")]
pub struct OpaqueConstruction {
    pub identifier: String,
    /// Layers from outside to inside.
    pub materials: Vec<EnergyMaterial>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "OpaqueConstruction")]
struct OpaqueConstructionData {
    identifier: String,
    materials: Vec<EnergyMaterial>,
}

impl TryFrom<OpaqueConstructionData> for OpaqueConstruction {
    type Error = Error;

    fn try_from(data: OpaqueConstructionData) -> Result<Self> {
        Self::new(&data.identifier, data.materials)
    }
}

impl OpaqueConstruction {
    pub fn new(identifier: &str, materials: Vec<EnergyMaterial>) -> Result<Self> {
        let construction = Self {
            identifier: identifier.to_string(),
            materials,
        };
        construction.validate()?;
        Ok(construction)
    }

    /// Checks the identifier, the layer count and every layer.
    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "construction identifier")?;
        if self.materials.is_empty() || self.materials.len() > MAX_LAYERS {
            return Err(Error::validation(format!(
                "construction \"{}\" must have 1 to {MAX_LAYERS} layers, got {}",
                self.identifier,
                self.materials.len()
            )));
        }
        self.materials.iter().try_for_each(EnergyMaterial::validate)
    }

    /// Total thickness in m.
    pub fn thickness(&self) -> f64 {
        self.materials.iter().map(|m| m.thickness).sum()
    }

    /// Layer resistance in m^2*K/W, without air films.
    pub fn r_value(&self) -> f64 {
        self.materials.iter().map(EnergyMaterial::r_value).sum()
    }

    /// Layer conductance in W/(m^2*K), without air films.
    pub fn u_value(&self) -> f64 {
        1.0 / self.r_value()
    }

    /// Overall heat transfer coefficient including both air films.
    pub fn u_factor(&self) -> f64 {
        1.0 / (R_SE + self.r_value() + R_SI)
    }

    pub fn thermal_capacity(&self) -> f64 {
        self.materials
            .iter()
            .map(EnergyMaterial::thermal_capacity)
            .sum()
    }

    /// Identifiers of the layers, outside to inside.
    pub fn layers(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.identifier.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn concrete() -> EnergyMaterial {
        EnergyMaterial::new("Concrete", 0.2, 1.4, 2300.0, 880.0).unwrap()
    }

    #[test]
    fn single_layer_u_factor() {
        let c = OpaqueConstruction::new("Concrete Wall", vec![concrete()]).unwrap();
        // 0.04 + 0.1429 + 0.13 = 0.3129
        assert_relative_eq!(c.u_factor(), 1.0 / 0.312_857_142_857, epsilon = 1e-6);
        assert_relative_eq!(c.u_value(), 7.0, epsilon = 1e-9);
        assert_relative_eq!(c.thickness(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn layer_order_preserved() {
        let insulation = EnergyMaterial::new("Insulation", 0.1, 0.04, 30.0, 1030.0).unwrap();
        let c = OpaqueConstruction::new("Insulated", vec![insulation, concrete()]).unwrap();
        assert_eq!(c.layers(), vec!["Insulation", "Concrete"]);
        assert!(c.u_factor() < 0.4);
    }

    #[test]
    fn layer_count_checked() {
        assert!(OpaqueConstruction::new("Empty", vec![]).is_err());
        let many = vec![concrete(); MAX_LAYERS + 1];
        assert!(OpaqueConstruction::new("Thick", many).is_err());
    }

    #[test]
    fn json_layers_validated() {
        let good = serde_json::to_value(OpaqueConstruction::new("Slab", vec![concrete()]).unwrap()).unwrap();
        assert!(serde_json::from_value::<OpaqueConstruction>(good.clone()).is_ok());

        let mut bad = good;
        bad["materials"][0]["conductivity"] = serde_json::json!(-1.0);
        let err = serde_json::from_value::<OpaqueConstruction>(bad).unwrap_err();
        assert!(err.to_string().contains("conductivity must be positive"), "{err}");
    }
}
