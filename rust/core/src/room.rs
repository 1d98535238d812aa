// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooms: closed volumes bounded by Faces.

use std::sync::Arc;

use nalgebra::Point3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::boundary::FaceType;
use crate::error::{Error, Result};
use crate::face::Face;
use crate::geometry::Face3D;
use crate::program::ProgramType;
use crate::typing::valid_ep_string;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomEnergyProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<Arc<ProgramType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Room", try_from = "RoomData")]
pub struct Room {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub faces: Vec<Face>,
    #[serde(default)]
    pub energy: RoomEnergyProperties,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Room")]
struct RoomData {
    identifier: String,
    #[serde(default)]
    display_name: Option<String>,
    faces: Vec<Face>,
    #[serde(default)]
    energy: RoomEnergyProperties,
}

impl Room {
    /// Creates a room from at least one face. Face identifiers must be unique.
    pub fn new(identifier: &str, faces: Vec<Face>) -> Result<Self> {
        let room = Self {
            identifier: identifier.to_string(),
            display_name: None,
            faces,
            energy: RoomEnergyProperties::default(),
        };
        room.validate()?;
        Ok(room)
    }

    pub fn validate(&self) -> Result<()> {
        let identifier = valid_ep_string(&self.identifier, "room identifier")?;
        if self.faces.is_empty() {
            return Err(Error::validation(format!(
                "room \"{identifier}\" must have at least one face"
            )));
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = self.faces.iter().find(|f| !seen.insert(f.identifier.as_str())) {
            return Err(Error::validation(format!(
                "room \"{identifier}\" has duplicate face identifier \"{}\"",
                dup.identifier
            )));
        }
        Ok(())
    }

    /// A box-shaped room with its south-west-bottom corner at `origin`.
    ///
    /// Faces are named `<id>_Front` (south), `_Right` (east), `_Back` (north),
    /// `_Left` (west), `_Bottom` and `_Top`.
    pub fn from_box(
        identifier: &str,
        width: f64,
        depth: f64,
        height: f64,
        origin: Point3<f64>,
    ) -> Result<Self> {
        for (name, value) in [("width", width), ("depth", depth), ("height", height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::validation(format!(
                    "room {name} must be positive, got {value}"
                )));
            }
        }
        let (x0, y0, z0) = (origin.x, origin.y, origin.z);
        let (x1, y1, z1) = (x0 + width, y0 + depth, z0 + height);
        // Walls are built from the box corners so cardinal walls have exact
        // axis-aligned normals. Bottom edge runs left to right seen from outside.
        let walls = [
            ("Front", [x0, y0], [x1, y0]),
            ("Right", [x1, y0], [x1, y1]),
            ("Back", [x1, y1], [x0, y1]),
            ("Left", [x0, y1], [x0, y0]),
        ];
        let mut faces = Vec::with_capacity(6);
        for (suffix, [ax, ay], [bx, by]) in walls {
            let geo = Face3D::new(vec![
                Point3::new(ax, ay, z0),
                Point3::new(bx, by, z0),
                Point3::new(bx, by, z1),
                Point3::new(ax, ay, z1),
            ])?;
            faces.push(Face::new(&format!("{identifier}_{suffix}"), geo)?);
        }
        let floor = Face3D::horizontal_rectangle(origin, width, depth, false)?;
        faces.push(Face::new(&format!("{identifier}_Bottom"), floor)?);
        let roof = Face3D::horizontal_rectangle(Point3::new(x0, y0, z1), width, depth, true)?;
        faces.push(Face::new(&format!("{identifier}_Top"), roof)?);
        Room::new(identifier, faces)
    }

    /// Faces that are Walls with an Outdoors boundary condition.
    pub fn exterior_walls(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|f| f.is_exterior_wall())
    }

    pub fn exterior_walls_mut(&mut self) -> impl Iterator<Item = &mut Face> {
        self.faces.iter_mut().filter(|f| f.is_exterior_wall())
    }

    pub fn floor_area(&self) -> f64 {
        self.faces
            .iter()
            .filter(|f| f.face_type == FaceType::Floor)
            .map(|f| f.geometry.area())
            .sum()
    }

    /// Area of all outdoor-exposed faces.
    pub fn exposed_area(&self) -> f64 {
        self.faces
            .iter()
            .filter(|f| f.boundary_condition.is_outdoors())
            .map(|f| f.geometry.area())
            .sum()
    }

    pub fn face(&self, identifier: &str) -> Option<&Face> {
        self.faces.iter().find(|f| f.identifier == identifier)
    }
}

impl TryFrom<RoomData> for Room {
    type Error = Error;

    fn try_from(data: RoomData) -> Result<Self> {
        let room = Room {
            identifier: data.identifier,
            display_name: data.display_name,
            faces: data.faces,
            energy: data.energy,
        };
        room.validate()?;
        Ok(room)
    }
}
