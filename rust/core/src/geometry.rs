// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar surface geometry.
//!
//! Only what the energy model needs is provided: the outward normal (Newell's
//! method), area, elevation and the compass azimuth of the normal. North is
//! +Y, east is +X and up is +Z.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Horizontal normal components at or below this length mean "no azimuth".
pub const DEFAULT_HORIZONTAL_TOLERANCE: f64 = 1e-9;

/// Minimum Newell vector length for a polygon to be considered non-degenerate.
const DEGENERATE_EPS: f64 = 1e-12;

/// A planar polygon whose vertex order defines its outward normal
/// (counter-clockwise when viewed from outside).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Face3DData", into = "Face3DData")]
pub struct Face3D {
    boundary: Vec<Point3<f64>>,
    normal: Vector3<f64>,
    area: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Face3D")]
struct Face3DData {
    boundary: Vec<[f64; 3]>,
}

impl Face3D {
    /// Creates a face from its boundary vertices.
    ///
    /// Fails when fewer than three vertices are given, the vertices are
    /// collinear/coincident, or the normal cannot be computed in floating point.
    pub fn new(boundary: Vec<Point3<f64>>) -> Result<Self> {
        if boundary.len() < 3 {
            return Err(Error::validation(format!(
                "a face needs at least 3 vertices, got {}",
                boundary.len()
            )));
        }
        if boundary.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(Error::validation("face vertices must have finite coordinates"));
        }
        let newell = newell_vector(&boundary);
        let length = newell.norm();
        if !length.is_finite() {
            return Err(Error::validation(
                "face coordinates are too large to compute a normal",
            ));
        }
        if length < DEGENERATE_EPS {
            return Err(Error::validation("face vertices are degenerate (zero area)"));
        }
        Ok(Self {
            normal: newell / length,
            area: length / 2.0,
            boundary,
        })
    }

    /// A vertical rectangle whose outward normal points at `azimuth` degrees
    /// (clockwise from north). `origin` is the bottom-left corner as seen
    /// from outside.
    pub fn vertical_rectangle(
        origin: Point3<f64>,
        azimuth: f64,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        check_positive("width", width)?;
        check_positive("height", height)?;
        let rad = azimuth.to_radians();
        // Right-hand direction when looking at the face from outside: up x normal.
        let right = Vector3::new(-rad.cos(), rad.sin(), 0.0);
        let up = Vector3::z();
        Self::new(vec![
            origin,
            origin + right * width,
            origin + right * width + up * height,
            origin + up * height,
        ])
    }

    /// An axis-aligned horizontal rectangle spanning `width` along +X and
    /// `depth` along +Y from `origin`.
    pub fn horizontal_rectangle(
        origin: Point3<f64>,
        width: f64,
        depth: f64,
        facing_up: bool,
    ) -> Result<Self> {
        check_positive("width", width)?;
        check_positive("depth", depth)?;
        let mut pts = vec![
            origin,
            origin + Vector3::x() * width,
            origin + Vector3::x() * width + Vector3::y() * depth,
            origin + Vector3::y() * depth,
        ];
        if !facing_up {
            pts.reverse();
        }
        Self::new(pts)
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.boundary
    }

    /// Unit outward normal.
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn min_z(&self) -> f64 {
        self.boundary
            .iter()
            .map(|p| p.z)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_z(&self) -> f64 {
        self.boundary
            .iter()
            .map(|p| p.z)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Angle in degrees between the normal and straight up (0 = facing up).
    pub fn tilt(&self) -> f64 {
        self.normal.z.clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// Compass bearing of the normal in `[0, 360)`, clockwise from north.
    ///
    /// Returns `None` for horizontal faces, whose normal has no horizontal
    /// component longer than `tolerance`.
    pub fn azimuth(&self, tolerance: f64) -> Option<f64> {
        let horizontal = self.normal.x.hypot(self.normal.y);
        if horizontal <= tolerance {
            return None;
        }
        let mut azimuth = self.normal.x.atan2(self.normal.y).to_degrees();
        if azimuth < 0.0 {
            azimuth += 360.0;
        }
        if azimuth >= 360.0 {
            azimuth -= 360.0;
        }
        Some(azimuth)
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "rectangle {name} must be positive, got {value}"
        )))
    }
}

/// Newell's method: a vector normal to the polygon with length twice its area.
fn newell_vector(pts: &[Point3<f64>]) -> Vector3<f64> {
    let mut n = Vector3::zeros();
    for (i, curr) in pts.iter().enumerate() {
        let next = &pts[(i + 1) % pts.len()];
        n.x += (curr.y - next.y) * (curr.z + next.z);
        n.y += (curr.z - next.z) * (curr.x + next.x);
        n.z += (curr.x - next.x) * (curr.y + next.y);
    }
    n
}

impl TryFrom<Face3DData> for Face3D {
    type Error = Error;

    fn try_from(data: Face3DData) -> Result<Self> {
        Face3D::new(
            data.boundary
                .into_iter()
                .map(|[x, y, z]| Point3::new(x, y, z))
                .collect(),
        )
    }
}

impl From<Face3D> for Face3DData {
    fn from(face: Face3D) -> Self {
        Face3DData {
            boundary: face.boundary.iter().map(|p| [p.x, p.y, p.z]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn square_facing_up() {
        let face = Face3D::horizontal_rectangle(Point3::origin(), 2.0, 3.0, true).unwrap();
        assert_relative_eq!(face.normal(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(face.area(), 6.0, epsilon = 1e-12);
        assert!(face.azimuth(DEFAULT_HORIZONTAL_TOLERANCE).is_none());
        assert_relative_eq!(face.tilt(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn square_facing_down() {
        let face = Face3D::horizontal_rectangle(Point3::origin(), 2.0, 3.0, false).unwrap();
        assert_relative_eq!(face.normal(), -Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(face.tilt(), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn vertical_rectangle_normals_match_azimuth() {
        let cases = [
            (0.0, Vector3::new(0.0, 1.0, 0.0)),
            (90.0, Vector3::new(1.0, 0.0, 0.0)),
            (180.0, Vector3::new(0.0, -1.0, 0.0)),
            (270.0, Vector3::new(-1.0, 0.0, 0.0)),
        ];
        for (azimuth, expected) in cases {
            let face = Face3D::vertical_rectangle(Point3::origin(), azimuth, 4.0, 3.0).unwrap();
            assert_relative_eq!(face.normal(), expected, epsilon = 1e-9);
            assert_relative_eq!(face.area(), 12.0, epsilon = 1e-9);
            let measured = face.azimuth(DEFAULT_HORIZONTAL_TOLERANCE).unwrap();
            let diff = (measured - azimuth).rem_euclid(360.0);
            assert!(diff < 1e-9 || diff > 360.0 - 1e-9, "{azimuth} vs {measured}");
        }
    }

    #[test]
    fn azimuth_in_range_for_oblique_faces() {
        let face = Face3D::vertical_rectangle(Point3::origin(), 315.0, 1.0, 1.0).unwrap();
        assert_relative_eq!(
            face.azimuth(DEFAULT_HORIZONTAL_TOLERANCE).unwrap(),
            315.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn tilted_roof_has_azimuth() {
        // Slopes down towards south, so the normal leans south.
        let face = Face3D::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ])
        .unwrap();
        assert_relative_eq!(
            face.azimuth(DEFAULT_HORIZONTAL_TOLERANCE).unwrap(),
            180.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(face.tilt(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_faces_rejected() {
        assert!(Face3D::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_err());
        assert!(Face3D::new(vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
        .is_err());
        assert!(Face3D::vertical_rectangle(Point3::origin(), 0.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn huge_or_nan_coordinates_rejected() {
        let huge = Face3D::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e308, 0.0, 0.0),
            Point3::new(1e308, 0.0, 1e308),
            Point3::new(0.0, 0.0, 1e308),
        ]);
        assert!(matches!(huge, Err(Error::Validation(_))));

        let nan = Face3D::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, f64::NAN),
            Point3::new(1.0, 0.0, 1.0),
        ]);
        assert!(nan.is_err());

        let json = serde_json::json!({
            "type": "Face3D",
            "boundary": [[0, 0, 0], [1e308, 0, 0], [1e308, 0, 1e308], [0, 0, 1e308]]
        });
        assert!(serde_json::from_value::<Face3D>(json).is_err());
    }

    #[test]
    fn json_uses_boundary_arrays() {
        let face = Face3D::horizontal_rectangle(Point3::new(0.0, 0.0, 3.0), 1.0, 1.0, true).unwrap();
        let json = serde_json::to_value(&face).unwrap();
        assert_eq!(json["type"], "Face3D");
        assert_eq!(json["boundary"][0], serde_json::json!([0.0, 0.0, 3.0]));

        let back: Face3D = serde_json::from_value(json).unwrap();
        assert_eq!(back, face);
    }

    #[test]
    fn json_with_degenerate_boundary_fails() {
        let json = serde_json::json!({"type": "Face3D", "boundary": [[0, 0, 0], [1, 0, 0]]});
        assert!(serde_json::from_value::<Face3D>(json).is_err());
    }
}
