// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window gap materials.

use hb_lite_core::{EnergyWindowMaterialGas, EnergyWindowMaterialGasMixture, Error, GasType, Result};
use serde::Serialize;

/// Gap thickness in meters when none is given.
pub const DEFAULT_GAP_THICKNESS: f64 = 0.0125;

/// A single-gas gap or a mixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GapMaterial {
    Gas(EnergyWindowMaterialGas),
    Mixture(EnergyWindowMaterialGasMixture),
}

impl GapMaterial {
    pub fn identifier(&self) -> &str {
        match self {
            GapMaterial::Gas(g) => &g.identifier,
            GapMaterial::Mixture(m) => &m.identifier,
        }
    }

    pub fn thickness(&self) -> f64 {
        match self {
            GapMaterial::Gas(g) => g.thickness,
            GapMaterial::Mixture(m) => m.thickness,
        }
    }
}

/// Builds a gas gap layer for a window construction.
///
/// No gas types means air. No ratios means equal parts of every gas. When
/// both lists are given they must have the same length.
pub fn window_gap_material(
    name: &str,
    thickness: Option<f64>,
    gas_types: &[GasType],
    gas_ratios: &[f64],
) -> Result<GapMaterial> {
    let thickness = thickness.unwrap_or(DEFAULT_GAP_THICKNESS);
    let gas_types = if gas_types.is_empty() {
        vec![GasType::Air]
    } else {
        gas_types.to_vec()
    };
    let gas_ratios = if gas_ratios.is_empty() {
        vec![1.0 / gas_types.len() as f64; gas_types.len()]
    } else {
        gas_ratios.to_vec()
    };
    if gas_types.len() != gas_ratios.len() {
        return Err(Error::validation(format!(
            "length of gas types ({}) does not equal length of gas ratios ({})",
            gas_types.len(),
            gas_ratios.len()
        )));
    }

    let material = if gas_types.len() == 1 {
        GapMaterial::Gas(EnergyWindowMaterialGas::new(name, thickness, gas_types[0])?)
    } else {
        GapMaterial::Mixture(EnergyWindowMaterialGasMixture::new(
            name, thickness, gas_types, gas_ratios,
        )?)
    };
    tracing::debug!(
        identifier = material.identifier(),
        thickness,
        "Created window gap material"
    );
    Ok(material)
}
