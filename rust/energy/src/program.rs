// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Program type assembly.

use hb_lite_core::typing::clean_and_id_ep_string;
use hb_lite_core::{
    Equipment, Infiltration, Lighting, People, ProgramType, ResourceLibrary, Result, Setpoint,
    Ventilation,
};

use crate::inputs::ProgramTypeInput;

/// Builds a [`ProgramType`] from an optional base and individual loads.
///
/// The identifier is derived from `name` with a unique suffix and `name`
/// becomes the display name. A load left unset keeps the base program's
/// load, or no load when starting blank.
#[derive(Debug, Clone)]
pub struct ProgramTypeBuilder {
    program: ProgramType,
}

impl ProgramTypeBuilder {
    /// Starts from a program with no loads.
    pub fn new(name: &str) -> Self {
        Self {
            program: ProgramType {
                identifier: clean_and_id_ep_string(name),
                display_name: Some(name.to_string()),
                ..Default::default()
            },
        }
    }

    /// Starts from a copy of `base`, looking it up in `library` when named.
    pub fn from_base<L: ResourceLibrary + ?Sized>(
        name: &str,
        base: &ProgramTypeInput,
        library: &L,
    ) -> Result<Self> {
        let mut program = base.resolve(library)?;
        program.identifier = clean_and_id_ep_string(name);
        program.display_name = Some(name.to_string());
        Ok(Self { program })
    }

    pub fn people(mut self, people: impl Into<Option<People>>) -> Self {
        if let Some(people) = people.into() {
            self.program.people = Some(people);
        }
        self
    }

    pub fn lighting(mut self, lighting: impl Into<Option<Lighting>>) -> Self {
        if let Some(lighting) = lighting.into() {
            self.program.lighting = Some(lighting);
        }
        self
    }

    pub fn electric_equipment(mut self, equipment: impl Into<Option<Equipment>>) -> Self {
        if let Some(equipment) = equipment.into() {
            self.program.electric_equipment = Some(equipment);
        }
        self
    }

    pub fn gas_equipment(mut self, equipment: impl Into<Option<Equipment>>) -> Self {
        if let Some(equipment) = equipment.into() {
            self.program.gas_equipment = Some(equipment);
        }
        self
    }

    pub fn infiltration(mut self, infiltration: impl Into<Option<Infiltration>>) -> Self {
        if let Some(infiltration) = infiltration.into() {
            self.program.infiltration = Some(infiltration);
        }
        self
    }

    pub fn ventilation(mut self, ventilation: impl Into<Option<Ventilation>>) -> Self {
        if let Some(ventilation) = ventilation.into() {
            self.program.ventilation = Some(ventilation);
        }
        self
    }

    pub fn setpoint(mut self, setpoint: impl Into<Option<Setpoint>>) -> Self {
        if let Some(setpoint) = setpoint.into() {
            self.program.setpoint = Some(setpoint);
        }
        self
    }

    pub fn build(self) -> ProgramType {
        tracing::debug!(
            identifier = %self.program.identifier,
            loads = self.program.load_count(),
            "Built program type"
        );
        self.program
    }
}
