// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Models: the top-level container handed to a simulation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::face::{Aperture, Door, Face};
use crate::room::Room;
use crate::typing::valid_folder_name;

/// The identifier doubles as the simulation folder name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Model", try_from = "ModelData")]
pub struct Model {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_faces: Vec<Face>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_apertures: Vec<Aperture>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_doors: Vec<Door>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename = "Model")]
struct ModelData {
    identifier: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    orphaned_faces: Vec<Face>,
    #[serde(default)]
    orphaned_apertures: Vec<Aperture>,
    #[serde(default)]
    orphaned_doors: Vec<Door>,
}

impl TryFrom<ModelData> for Model {
    type Error = Error;

    fn try_from(data: ModelData) -> Result<Self> {
        Ok(Model {
            identifier: valid_folder_name(&data.identifier, "model identifier")?,
            display_name: data.display_name,
            rooms: data.rooms,
            orphaned_faces: data.orphaned_faces,
            orphaned_apertures: data.orphaned_apertures,
            orphaned_doors: data.orphaned_doors,
        })
    }
}

impl Model {
    pub fn new(identifier: &str, rooms: Vec<Room>) -> Result<Self> {
        Ok(Self {
            identifier: valid_folder_name(identifier, "model identifier")?,
            display_name: None,
            rooms,
            orphaned_faces: Vec::new(),
            orphaned_apertures: Vec::new(),
            orphaned_doors: Vec::new(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Ensures the model can be simulated: energy models may not contain
    /// Faces, Apertures or Doors that are not part of a Room.
    pub fn check_for_simulation(&self) -> Result<()> {
        let orphans = [
            ("Face", self.orphaned_faces.len()),
            ("Aperture", self.orphaned_apertures.len()),
            ("Door", self.orphaned_doors.len()),
        ];
        if let Some((kind, count)) = orphans.into_iter().find(|(_, n)| *n > 0) {
            return Err(Error::validation(format!(
                "model \"{}\" contains {count} orphaned {kind}(s), which are not permitted \
                 in models for energy simulation. Geometry that is not part of a Room \
                 boundary should be added as shades",
                self.identifier
            )));
        }
        Ok(())
    }

    /// Folder holding the simulation files of this model under `root`.
    pub fn simulation_directory(&self, root: &Path) -> PathBuf {
        root.join(&self.identifier).join("EnergyPlus")
    }

    pub fn face_count(&self) -> usize {
        self.rooms.iter().map(|r| r.faces.len()).sum::<usize>() + self.orphaned_faces.len()
    }
}
