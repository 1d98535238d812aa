// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cardinal orientation buckets.
//!
//! The compass circle is split into `n` equal arcs. Bucket 0 is centred on
//! north and the buckets proceed clockwise, so with four buckets the indices
//! are north, east, south and west. Arcs are half-open: an azimuth lying
//! exactly on a boundary belongs to the next bucket clockwise.

use hb_lite_core::{Error, Result, Surface};
use smallvec::SmallVec;

/// Upper boundaries of the orientation arcs, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationBuckets {
    boundaries: SmallVec<[f64; 8]>,
}

impl OrientationBuckets {
    /// Splits the circle into `count` arcs. `count` must be at least 1.
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::validation(
                "at least one orientation bucket is required",
            ));
        }
        let step = 360.0 / count as f64;
        let boundaries = (0..count)
            .map(|i| step / 2.0 + i as f64 * step)
            .collect();
        Ok(Self { boundaries })
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Arc width in degrees.
    pub fn step(&self) -> f64 {
        360.0 / self.boundaries.len() as f64
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Index of the bucket containing `azimuth` (degrees, any range).
    pub fn classify(&self, azimuth: f64) -> usize {
        let azimuth = azimuth.rem_euclid(360.0);
        self.boundaries
            .iter()
            .position(|upper| azimuth < *upper)
            // Past the last boundary: back in the north arc
            .unwrap_or(0)
    }

    /// Bucket of a surface, or `None` when it is horizontal.
    pub fn classify_surface<S: Surface + ?Sized>(&self, surface: &S, tolerance: f64) -> Option<usize> {
        surface.azimuth(tolerance).map(|azimuth| self.classify(azimuth))
    }
}
