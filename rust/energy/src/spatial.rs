// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Objects that can receive an opaque construction.

use hb_lite_core::{Door, Error, Face, OpaqueAssignable, Result, Room};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::host::value_kind;

/// Kinds accepted by [`SpatialObject::from_value`], for error messages.
pub const SPATIAL_KINDS: &str = "Room, Face, or Door";

/// A Face, Door or Room.
///
/// Serializes as the wrapped object, whose `"type"` field identifies it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpatialObject {
    Face(Face),
    Door(Door),
    Room(Room),
}

impl SpatialObject {
    /// Checks that `value` is tagged as a Face, Door or Room without
    /// deserializing it.
    pub fn check_kind(value: &Value) -> Result<()> {
        match value_kind(value).as_str() {
            "Face" | "Door" | "Room" => Ok(()),
            _ => Err(unsupported(value)),
        }
    }

    /// Builds an owned object from a host value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = match value_kind(value).as_str() {
            "Face" => SpatialObject::Face(serde_json::from_value(value.clone())?),
            "Door" => SpatialObject::Door(serde_json::from_value(value.clone())?),
            "Room" => SpatialObject::Room(serde_json::from_value(value.clone())?),
            _ => return Err(unsupported(value)),
        };
        Ok(object)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SpatialObject::Face(_) => "Face",
            SpatialObject::Door(_) => "Door",
            SpatialObject::Room(_) => "Room",
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            SpatialObject::Face(f) => &f.identifier,
            SpatialObject::Door(d) => &d.identifier,
            SpatialObject::Room(r) => &r.identifier,
        }
    }

    /// Calls `f` on every surface that receives a construction: the Face or
    /// Door itself, or the exterior walls of a Room.
    pub fn for_each_target<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn OpaqueAssignable),
    {
        match self {
            SpatialObject::Face(face) => f(face),
            SpatialObject::Door(door) => f(door),
            SpatialObject::Room(room) => {
                for face in room.exterior_walls_mut() {
                    f(face);
                }
            }
        }
    }

    /// Identifiers of the surfaces [`for_each_target`](Self::for_each_target) visits.
    pub fn target_identifiers(&self) -> Vec<&str> {
        match self {
            SpatialObject::Face(f) => vec![f.identifier.as_str()],
            SpatialObject::Door(d) => vec![d.identifier.as_str()],
            SpatialObject::Room(r) => r.exterior_walls().map(|f| f.identifier.as_str()).collect(),
        }
    }
}

fn unsupported(value: &Value) -> Error {
    Error::UnsupportedObjectKind {
        expected: SPATIAL_KINDS,
        found: value_kind(value),
    }
}

impl<'de> Deserialize<'de> for SpatialObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SpatialObject::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl From<Face> for SpatialObject {
    fn from(face: Face) -> Self {
        SpatialObject::Face(face)
    }
}

impl From<Door> for SpatialObject {
    fn from(door: Door) -> Self {
        SpatialObject::Door(door)
    }
}

impl From<Room> for SpatialObject {
    fn from(room: Room) -> Self {
        SpatialObject::Room(room)
    }
}
