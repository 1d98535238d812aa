// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Faces and their sub-faces (apertures and doors).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::boundary::{BoundaryCondition, FaceType};
use crate::construction::OpaqueConstruction;
use crate::error::{Error, Result};
use crate::geometry::Face3D;
use crate::surface::{OpaqueAssignable, Surface};
use crate::typing::valid_ep_string;

/// Energy properties of an opaque surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpaqueEnergyProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction: Option<Arc<OpaqueConstruction>>,
}

/// A planar surface bounding a Room, or an orphaned surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Face", try_from = "FaceData")]
pub struct Face {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    pub face_type: FaceType,
    pub boundary_condition: BoundaryCondition,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apertures: Vec<Aperture>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub energy: OpaqueEnergyProperties,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Face")]
struct FaceData {
    identifier: String,
    #[serde(default)]
    display_name: Option<String>,
    geometry: Face3D,
    face_type: FaceType,
    boundary_condition: BoundaryCondition,
    #[serde(default)]
    apertures: Vec<Aperture>,
    #[serde(default)]
    doors: Vec<Door>,
    #[serde(default)]
    energy: OpaqueEnergyProperties,
}

/// Apertures and doors may only face the outdoors or another surface.
fn allows_sub_faces(bc: &BoundaryCondition) -> bool {
    matches!(
        bc,
        BoundaryCondition::Outdoors { .. } | BoundaryCondition::Surface { .. }
    )
}

impl Face {
    /// Creates a face, guessing its type from the normal and its boundary
    /// condition from its elevation.
    pub fn new(identifier: &str, geometry: Face3D) -> Result<Self> {
        let face_type = FaceType::from_normal(&geometry);
        let boundary_condition = BoundaryCondition::from_position(&geometry);
        Self::with_type(identifier, geometry, face_type, boundary_condition)
    }

    pub fn with_type(
        identifier: &str,
        geometry: Face3D,
        face_type: FaceType,
        boundary_condition: BoundaryCondition,
    ) -> Result<Self> {
        Ok(Self {
            identifier: valid_ep_string(identifier, "face identifier")?,
            display_name: None,
            geometry,
            face_type,
            boundary_condition,
            apertures: Vec::new(),
            doors: Vec::new(),
            energy: OpaqueEnergyProperties::default(),
        })
    }

    /// Checks the identifier and that the boundary condition can host the
    /// sub-faces.
    pub fn validate(&self) -> Result<()> {
        valid_ep_string(&self.identifier, "face identifier")?;
        if allows_sub_faces(&self.boundary_condition) {
            return Ok(());
        }
        if let Some(door) = self.doors.first() {
            return Err(self.host_error("door", &door.identifier));
        }
        if let Some(aperture) = self.apertures.first() {
            return Err(self.host_error("aperture", &aperture.identifier));
        }
        Ok(())
    }

    fn host_error(&self, kind: &str, sub_face: &str) -> Error {
        Error::validation(format!(
            "{kind} \"{sub_face}\" cannot be hosted by face \"{}\" with a {} boundary condition",
            self.identifier,
            self.boundary_condition.as_str()
        ))
    }

    /// A Wall with an Outdoors boundary condition.
    pub fn is_exterior_wall(&self) -> bool {
        self.face_type == FaceType::Wall && self.boundary_condition.is_outdoors()
    }

    /// Adds a door; it takes the boundary condition of this face.
    pub fn add_door(&mut self, mut door: Door) -> Result<()> {
        if !allows_sub_faces(&self.boundary_condition) {
            return Err(self.host_error("door", &door.identifier));
        }
        door.boundary_condition = self.boundary_condition.clone();
        self.doors.push(door);
        Ok(())
    }

    /// Adds an aperture; it takes the boundary condition of this face.
    pub fn add_aperture(&mut self, mut aperture: Aperture) -> Result<()> {
        if !allows_sub_faces(&self.boundary_condition) {
            return Err(self.host_error("aperture", &aperture.identifier));
        }
        aperture.boundary_condition = self.boundary_condition.clone();
        self.apertures.push(aperture);
        Ok(())
    }
}

impl TryFrom<FaceData> for Face {
    type Error = Error;

    fn try_from(data: FaceData) -> Result<Self> {
        let face = Face {
            identifier: data.identifier,
            display_name: data.display_name,
            geometry: data.geometry,
            face_type: data.face_type,
            boundary_condition: data.boundary_condition,
            apertures: data.apertures,
            doors: data.doors,
            energy: data.energy,
        };
        face.validate()?;
        Ok(face)
    }
}

impl Surface for Face {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn geometry(&self) -> &Face3D {
        &self.geometry
    }
}

impl OpaqueAssignable for Face {
    fn construction(&self) -> Option<&Arc<OpaqueConstruction>> {
        self.energy.construction.as_ref()
    }

    fn set_construction(&mut self, construction: Arc<OpaqueConstruction>) {
        self.energy.construction = Some(construction);
    }
}

/// Shared check for sub-faces, which may not sit on the ground or an
/// adiabatic surface.
fn validate_sub_face(kind: &str, identifier: &str, bc: &BoundaryCondition) -> Result<()> {
    valid_ep_string(identifier, &format!("{kind} identifier"))?;
    if allows_sub_faces(bc) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{kind} \"{identifier}\" must have an Outdoors or Surface boundary condition, got {}",
            bc.as_str()
        )))
    }
}

/// An opaque (or glass) door hosted by a Face, or an orphaned door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Door", try_from = "DoorData")]
pub struct Door {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub is_glass: bool,
    #[serde(default)]
    pub energy: OpaqueEnergyProperties,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Door")]
struct DoorData {
    identifier: String,
    #[serde(default)]
    display_name: Option<String>,
    geometry: Face3D,
    #[serde(default)]
    boundary_condition: BoundaryCondition,
    #[serde(default)]
    is_glass: bool,
    #[serde(default)]
    energy: OpaqueEnergyProperties,
}

impl Door {
    pub fn new(identifier: &str, geometry: Face3D) -> Result<Self> {
        Ok(Self {
            identifier: valid_ep_string(identifier, "door identifier")?,
            display_name: None,
            geometry,
            boundary_condition: BoundaryCondition::outdoors(),
            is_glass: false,
            energy: OpaqueEnergyProperties::default(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_sub_face("door", &self.identifier, &self.boundary_condition)
    }
}

impl TryFrom<DoorData> for Door {
    type Error = Error;

    fn try_from(data: DoorData) -> Result<Self> {
        let door = Door {
            identifier: data.identifier,
            display_name: data.display_name,
            geometry: data.geometry,
            boundary_condition: data.boundary_condition,
            is_glass: data.is_glass,
            energy: data.energy,
        };
        door.validate()?;
        Ok(door)
    }
}

impl Surface for Door {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn geometry(&self) -> &Face3D {
        &self.geometry
    }
}

impl OpaqueAssignable for Door {
    fn construction(&self) -> Option<&Arc<OpaqueConstruction>> {
        self.energy.construction.as_ref()
    }

    fn set_construction(&mut self, construction: Arc<OpaqueConstruction>) {
        self.energy.construction = Some(construction);
    }
}

/// A window or skylight. Window constructions are not modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Aperture", try_from = "ApertureData")]
pub struct Aperture {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub is_operable: bool,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Aperture")]
struct ApertureData {
    identifier: String,
    #[serde(default)]
    display_name: Option<String>,
    geometry: Face3D,
    #[serde(default)]
    boundary_condition: BoundaryCondition,
    #[serde(default)]
    is_operable: bool,
}

impl Aperture {
    pub fn new(identifier: &str, geometry: Face3D) -> Result<Self> {
        Ok(Self {
            identifier: valid_ep_string(identifier, "aperture identifier")?,
            display_name: None,
            geometry,
            boundary_condition: BoundaryCondition::outdoors(),
            is_operable: false,
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_sub_face("aperture", &self.identifier, &self.boundary_condition)
    }
}

impl TryFrom<ApertureData> for Aperture {
    type Error = Error;

    fn try_from(data: ApertureData) -> Result<Self> {
        let aperture = Aperture {
            identifier: data.identifier,
            display_name: data.display_name,
            geometry: data.geometry,
            boundary_condition: data.boundary_condition,
            is_operable: data.is_operable,
        };
        aperture.validate()?;
        Ok(aperture)
    }
}

impl Surface for Aperture {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn geometry(&self) -> &Face3D {
        &self.geometry
    }
}
