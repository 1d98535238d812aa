// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Library files and model checks as used by the command-line host.

use approx::assert_relative_eq;
use hb_lite_core::{
    Door, Error, Face3D, Library, LibraryDocument, Model, OpaqueConstruction, Point3,
    ResourceLibrary, Room, Schedule, ScheduleTypeLimit,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Write a library document to a temp file removed when dropped
fn write_library(doc: &LibraryDocument) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(doc).unwrap().as_bytes())
        .unwrap();
    file
}

#[test]
fn library_file_round_trip() {
    let defaults = Library::with_defaults();
    let wall = defaults.opaque_construction_by_name("Generic Exterior Wall").unwrap();
    let doc = LibraryDocument {
        constructions: vec![OpaqueConstruction::clone(&wall)],
        schedules: vec![Schedule::constant("Night Setback", ScheduleTypeLimit::Temperature, 15.0).unwrap()],
        program_types: vec![],
    };
    let file = write_library(&doc);

    let lib = Library::load(file.path()).unwrap();

    let loaded = lib.opaque_construction_by_name("Generic Exterior Wall").unwrap();
    assert_eq!(*loaded, *wall);
    assert_relative_eq!(loaded.u_factor(), wall.u_factor(), epsilon = 1e-12);
    assert_eq!(lib.schedule_by_name("Night Setback").unwrap().value_at(3), 15.0);
    assert!(lib.program_type("Generic Office Program").is_none());
}

#[test]
fn missing_library_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing_library.json");
    assert!(matches!(Library::load(&path), Err(Error::Io(_))));
}

#[test]
fn model_with_orphaned_door_cannot_be_simulated() {
    let room = Room::from_box("Office", 6.0, 4.0, 3.0, Point3::origin()).unwrap();
    let mut model = Model::new("Office_Model", vec![room]).unwrap();
    model.check_for_simulation().unwrap();

    let geo = Face3D::vertical_rectangle(Point3::new(20.0, 0.0, 0.0), 180.0, 1.0, 2.1).unwrap();
    model.orphaned_doors.push(Door::new("Loose_Door", geo).unwrap());

    let text = serde_json::to_string(&model).unwrap();
    let model = Model::from_json_str(&text).unwrap();
    let err = model.check_for_simulation().unwrap_err();
    assert!(err.to_string().contains("1 orphaned Door(s)"), "{err}");

    let dir = model.simulation_directory(&PathBuf::from("/sims"));
    assert_eq!(dir, PathBuf::from("/sims/Office_Model/EnergyPlus"));
}
