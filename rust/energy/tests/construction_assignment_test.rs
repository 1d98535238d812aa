// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end construction assignment through host JSON values.
//! Covers a two-room model exchanged as JSON with a custom library.

use hb_lite_core::{
    Door, Face, Face3D, Library, Model, OpaqueAssignable, Point3, ResourceLibrary, Room,
    DEFAULT_HORIZONTAL_TOLERANCE,
};
use hb_lite_energy::{assign_constructions_from_values, AssignOptions, OrientationBuckets, SpatialObject};
use serde_json::{json, Value};

const LIBRARY_JSON: &str = r#"{
    "constructions": [
        {
            "type": "OpaqueConstruction",
            "identifier": "Heavy North Wall",
            "materials": [{
                "type": "EnergyMaterial",
                "identifier": "Dense Block",
                "thickness": 0.25,
                "conductivity": 1.1,
                "density": 2000,
                "specific_heat": 900
            }]
        },
        {
            "type": "OpaqueConstruction",
            "identifier": "Light South Wall",
            "materials": [{
                "type": "EnergyMaterial",
                "identifier": "Timber Panel",
                "thickness": 0.05,
                "conductivity": 0.13,
                "density": 500,
                "specific_heat": 1600
            }]
        }
    ]
}"#;

/// Library with the generic defaults plus the two custom walls
fn library() -> Library {
    let mut lib = Library::with_defaults();
    lib.merge(Library::from_json_str(LIBRARY_JSON).expect("library JSON"));
    lib
}

fn room_values() -> Vec<Value> {
    let east = Room::from_box("East_Room", 5.0, 5.0, 3.0, Point3::new(5.0, 0.0, 0.0)).unwrap();
    let west = Room::from_box("West_Room", 5.0, 5.0, 3.0, Point3::origin()).unwrap();
    let model = Model::new("Two_Rooms", vec![west, east]).unwrap();
    // Exchange through JSON text like a host would
    let text = serde_json::to_string(&model).unwrap();
    let model = Model::from_json_str(&text).unwrap();
    model
        .rooms
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect()
}

fn wall_construction(room: &Room, suffix: &str) -> Option<String> {
    let id = format!("{}_{}", room.identifier, suffix);
    room.face(&id)
        .and_then(|f| f.construction())
        .map(|c| c.identifier.clone())
}

#[test]
fn two_constructions_split_rooms_north_and_south() {
    let lib = library();
    let objects = room_values();
    let out = assign_constructions_from_values(
        &objects,
        &[json!("Heavy North Wall"), json!("Light South Wall")],
        &lib,
        &AssignOptions::default(),
    )
    .unwrap();
    assert_eq!(out.len(), 2);

    for object in &out {
        let SpatialObject::Room(room) = object else {
            panic!("expected rooms, got {}", object.kind());
        };
        assert_eq!(wall_construction(room, "Back").as_deref(), Some("Heavy North Wall"));
        assert_eq!(wall_construction(room, "Front").as_deref(), Some("Light South Wall"));
        // East (90) and west (270) walls lie on the bucket boundaries and
        // go to the next bucket clockwise; 270 wraps to bucket 0.
        assert_eq!(wall_construction(room, "Right").as_deref(), Some("Light South Wall"));
        assert_eq!(wall_construction(room, "Left").as_deref(), Some("Heavy North Wall"));
        assert_eq!(wall_construction(room, "Top"), None);
        assert_eq!(wall_construction(room, "Bottom"), None);
    }

    // The host values are untouched
    for value in &objects {
        assert!(!value.to_string().contains("Heavy North Wall"));
    }
}

#[test]
fn boundary_azimuths_follow_bucket_tie_break() {
    let buckets = OrientationBuckets::new(2).unwrap();
    let lib = library();
    for azimuth in [90.0, 270.0] {
        let geo = Face3D::vertical_rectangle(Point3::new(0.0, 0.0, 1.0), azimuth, 2.0, 2.0).unwrap();
        let face = Face::new("Boundary_Wall", geo).unwrap();
        let azimuth = face.geometry.azimuth(DEFAULT_HORIZONTAL_TOLERANCE).unwrap();
        let expected = buckets.classify(azimuth);

        let out = assign_constructions_from_values(
            &[serde_json::to_value(&face).unwrap()],
            &[json!("Heavy North Wall"), json!("Light South Wall")],
            &lib,
            &AssignOptions::default(),
        )
        .unwrap();
        let SpatialObject::Face(face) = &out[0] else {
            panic!("expected a face");
        };
        let names = ["Heavy North Wall", "Light South Wall"];
        assert_eq!(
            face.construction().map(|c| c.identifier.as_str()),
            Some(names[expected])
        );
    }
}

#[test]
fn resolved_construction_objects_are_accepted() {
    let lib = library();
    let roof = lib.opaque_construction_by_name("Generic Roof").unwrap();
    let objects = room_values();
    let out = assign_constructions_from_values(
        &objects[..1],
        &[serde_json::to_value(&*roof).unwrap()],
        &Library::new(),
        &AssignOptions::default(),
    )
    .unwrap();
    let SpatialObject::Room(room) = &out[0] else {
        panic!("expected a room");
    };
    assert_eq!(room.exterior_walls().count(), 4);
    assert!(room
        .exterior_walls()
        .all(|f| f.construction().map(|c| c.identifier.as_str()) == Some("Generic Roof")));
}

#[test]
fn invalid_host_objects_are_rejected() {
    let lib = library();
    let assign = |object: Value| {
        assign_constructions_from_values(
            &[object],
            &[json!("Heavy North Wall")],
            &lib,
            &AssignOptions::default(),
        )
    };
    let room = room_values().remove(0);

    let mut bad_id = room.clone();
    bad_id["identifier"] = json!("bad;id,with!illegal");
    assert!(assign(bad_id).is_err());

    let mut duplicate = room.clone();
    let first = duplicate["faces"][0].clone();
    duplicate["faces"].as_array_mut().unwrap().push(first);
    let err = assign(duplicate).unwrap_err();
    assert!(err.to_string().contains("duplicate face identifier"), "{err}");

    let empty = json!({"type": "Room", "identifier": "Empty", "faces": []});
    assert!(assign(empty).is_err());

    let geo = Face3D::vertical_rectangle(Point3::origin(), 0.0, 1.0, 2.0).unwrap();
    let mut door = serde_json::to_value(Door::new("Front_Door", geo).unwrap()).unwrap();
    assert!(assign(door.clone()).is_ok());
    door["boundary_condition"] = json!({"type": "Ground"});
    assert!(assign(door).is_err());
}
