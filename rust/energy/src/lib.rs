// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # HB-Lite Energy
//!
//! Component logic on top of [`hb_lite_core`]: the operations a visual
//! programming host exposes to users.
//!
//! - [`assign_constructions`]: opaque constructions for Faces, Doors and the
//!   exterior walls of Rooms, uniformly or by cardinal orientation
//! - [`window_gap_material`]: single-gas or mixed window gaps
//! - [`infiltration`]: infiltration loads with a library schedule
//! - [`ProgramTypeBuilder`]: program types from a base and loads
//! - [`deconstruct_people`]: the properties of a People load
//!
//! Inputs that accept either an object or a library name are modeled by
//! [`Resource`]. Untyped host values are read from `serde_json::Value`.
//!
//! ```rust,ignore
//! use hb_lite_core::{Library, Point3, Room};
//! use hb_lite_energy::{assign_constructions, ConstructionInput, SpatialObject};
//!
//! let lib = Library::with_defaults();
//! let room = Room::from_box("Office", 10.0, 5.0, 3.0, Point3::origin())?;
//! let walls = ["Generic Exterior Wall", "Generic Interior Wall"].map(ConstructionInput::from);
//! let out = assign_constructions(&[SpatialObject::from(room)], &walls, &lib)?;
//! ```

pub mod assign;
pub mod gap_material;
pub mod host;
pub mod infiltration;
pub mod inputs;
pub mod orientation;
pub mod people;
pub mod program;
pub mod spatial;

pub use assign::{
    assign_constructions, assign_constructions_from_values, assign_constructions_with,
    resolve_constructions, AssignOptions,
};
pub use gap_material::{window_gap_material, GapMaterial, DEFAULT_GAP_THICKNESS};
pub use host::value_kind;
pub use infiltration::infiltration;
pub use inputs::{ConstructionInput, LibraryResource, ProgramTypeInput, Resource, ScheduleInput};
pub use orientation::OrientationBuckets;
pub use people::{deconstruct_people, PeopleParts};
pub use program::ProgramTypeBuilder;
pub use spatial::SpatialObject;
