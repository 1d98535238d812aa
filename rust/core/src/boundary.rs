// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face types and boundary conditions.

use serde::{Deserialize, Serialize};

use crate::geometry::Face3D;

/// Tilt (degrees from vertical axis) within which a face counts as a roof or floor.
pub const ROOF_FLOOR_ANGLE: f64 = 30.0;

/// Functional type of a Face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceType {
    Wall,
    RoofCeiling,
    Floor,
    AirBoundary,
}

impl FaceType {
    /// Guesses the face type from the surface tilt.
    pub fn from_normal(geometry: &Face3D) -> Self {
        let tilt = geometry.tilt();
        if tilt < ROOF_FLOOR_ANGLE {
            FaceType::RoofCeiling
        } else if tilt > 180.0 - ROOF_FLOOR_ANGLE {
            FaceType::Floor
        } else {
            FaceType::Wall
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaceType::Wall => "Wall",
            FaceType::RoofCeiling => "RoofCeiling",
            FaceType::Floor => "Floor",
            FaceType::AirBoundary => "AirBoundary",
        }
    }
}

/// What lies on the other side of a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoundaryCondition {
    Outdoors {
        #[serde(default = "default_true")]
        sun_exposure: bool,
        #[serde(default = "default_true")]
        wind_exposure: bool,
    },
    Ground,
    Adiabatic,
    /// Adjacent to another surface; holds the identifiers of the adjacent
    /// sub-face, face and room.
    Surface {
        boundary_condition_objects: Vec<String>,
    },
}

fn default_true() -> bool {
    true
}

impl BoundaryCondition {
    /// Sun- and wind-exposed outdoor condition.
    pub fn outdoors() -> Self {
        BoundaryCondition::Outdoors {
            sun_exposure: true,
            wind_exposure: true,
        }
    }

    /// Ground when no vertex lies above z = 0, outdoors otherwise.
    pub fn from_position(geometry: &Face3D) -> Self {
        if geometry.max_z() <= 0.0 {
            BoundaryCondition::Ground
        } else {
            BoundaryCondition::outdoors()
        }
    }

    pub fn is_outdoors(&self) -> bool {
        matches!(self, BoundaryCondition::Outdoors { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryCondition::Outdoors { .. } => "Outdoors",
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Adiabatic => "Adiabatic",
            BoundaryCondition::Surface { .. } => "Surface",
        }
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        BoundaryCondition::outdoors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn face_type_from_tilt() {
        let roof = Face3D::horizontal_rectangle(Point3::new(0.0, 0.0, 3.0), 1.0, 1.0, true).unwrap();
        let floor = Face3D::horizontal_rectangle(Point3::origin(), 1.0, 1.0, false).unwrap();
        let wall = Face3D::vertical_rectangle(Point3::origin(), 90.0, 1.0, 1.0).unwrap();
        assert_eq!(FaceType::from_normal(&roof), FaceType::RoofCeiling);
        assert_eq!(FaceType::from_normal(&floor), FaceType::Floor);
        assert_eq!(FaceType::from_normal(&wall), FaceType::Wall);
    }

    #[test]
    fn boundary_from_position() {
        let basement =
            Face3D::horizontal_rectangle(Point3::new(0.0, 0.0, -3.0), 1.0, 1.0, false).unwrap();
        let slab = Face3D::horizontal_rectangle(Point3::origin(), 1.0, 1.0, false).unwrap();
        let upper =
            Face3D::horizontal_rectangle(Point3::new(0.0, 0.0, 3.0), 1.0, 1.0, false).unwrap();
        let wall = Face3D::vertical_rectangle(Point3::origin(), 0.0, 1.0, 1.0).unwrap();
        assert_eq!(BoundaryCondition::from_position(&basement), BoundaryCondition::Ground);
        assert_eq!(BoundaryCondition::from_position(&slab), BoundaryCondition::Ground);
        assert!(BoundaryCondition::from_position(&upper).is_outdoors());
        assert!(BoundaryCondition::from_position(&wall).is_outdoors());
    }

    #[test]
    fn outdoors_json_defaults_exposure() {
        let bc: BoundaryCondition = serde_json::from_str(r#"{"type": "Outdoors"}"#).unwrap();
        assert_eq!(bc, BoundaryCondition::outdoors());

        let surface: BoundaryCondition = serde_json::from_str(
            r#"{"type": "Surface", "boundary_condition_objects": ["f1", "r1"]}"#,
        )
        .unwrap();
        assert_eq!(surface.as_str(), "Surface");
        assert!(!surface.is_outdoors());
    }
}
