// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # HB-Lite Core
//!
//! Typed building-energy model used by the HB-Lite components.
//!
//! ## Overview
//!
//! - **Geometry**: planar [`Face3D`] polygons with outward normals and compass azimuths
//! - **Objects**: [`Face`], [`Door`], [`Aperture`], [`Room`] and [`Model`]
//! - **Envelope**: [`EnergyMaterial`] layers, [`OpaqueConstruction`]s and window gap gases
//! - **Programs**: [`Schedule`]s, loads ([`People`], [`Infiltration`], ...) and [`ProgramType`]s
//! - **Libraries**: name lookup through [`ResourceLibrary`], backed by [`Library`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hb_lite_core::{Library, ResourceLibrary, Room};
//! use nalgebra::Point3;
//!
//! let lib = Library::with_defaults();
//! let wall = lib.opaque_construction_by_name("Generic Exterior Wall")?;
//!
//! let mut room = Room::from_box("Office", 10.0, 5.0, 3.0, Point3::origin())?;
//! for face in room.exterior_walls_mut() {
//!     face.energy.construction = Some(wall.clone());
//! }
//! ```
//!
//! Every object serializes to JSON with a `"type"` tag, so models can be
//! exchanged with other tools.

pub mod boundary;
pub mod construction;
pub mod error;
pub mod face;
pub mod geometry;
pub mod library;
pub mod load;
pub mod material;
pub mod model;
pub mod program;
pub mod room;
pub mod schedule;
pub mod surface;
pub mod typing;

pub use boundary::{BoundaryCondition, FaceType};
pub use construction::OpaqueConstruction;
pub use error::{Error, Result};
pub use face::{Aperture, Door, Face, OpaqueEnergyProperties};
pub use geometry::{Face3D, DEFAULT_HORIZONTAL_TOLERANCE};
pub use library::{Library, LibraryDocument, ResourceLibrary, ALWAYS_ON};
pub use load::{Equipment, Infiltration, Lighting, People, Setpoint, Ventilation};
pub use material::{
    EnergyMaterial, EnergyWindowMaterialGas, EnergyWindowMaterialGasMixture, GasType, Roughness,
};
pub use model::Model;
pub use program::ProgramType;
pub use room::{Room, RoomEnergyProperties};
pub use schedule::{Schedule, ScheduleTypeLimit};
pub use surface::{OpaqueAssignable, Surface};

// Re-export nalgebra types used in the public API
pub use nalgebra::{Point3, Vector3};
