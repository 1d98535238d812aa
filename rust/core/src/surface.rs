// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capabilities shared by planar model objects.

use std::sync::Arc;

use crate::construction::OpaqueConstruction;
use crate::geometry::Face3D;

/// A named planar object.
pub trait Surface {
    fn identifier(&self) -> &str;

    fn geometry(&self) -> &Face3D;

    /// Compass azimuth of the outward normal, `None` when horizontal.
    fn azimuth(&self, tolerance: f64) -> Option<f64> {
        self.geometry().azimuth(tolerance)
    }
}

/// A surface that carries an opaque construction.
///
/// `None` means the construction is inherited from a construction set.
pub trait OpaqueAssignable: Surface {
    fn construction(&self) -> Option<&Arc<OpaqueConstruction>>;

    fn set_construction(&mut self, construction: Arc<OpaqueConstruction>);
}
