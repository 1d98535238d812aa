// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque construction assignment.
//!
//! With a single construction every target receives it. With several, the
//! compass is split into as many orientation buckets and each target receives
//! the construction of the bucket its outward normal points into. Horizontal
//! targets have no orientation and are left as they are in that case.
//!
//! Targets are Faces and Doors themselves, or the exterior walls of a Room.
//! Inputs are never modified; the assigned objects are returned as new values.

use std::sync::Arc;

use hb_lite_core::{
    Error, OpaqueAssignable, OpaqueConstruction, ResourceLibrary, Result,
    DEFAULT_HORIZONTAL_TOLERANCE,
};
use serde_json::Value;

use crate::inputs::ConstructionInput;
use crate::orientation::OrientationBuckets;
use crate::spatial::SpatialObject;

/// Options for construction assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignOptions {
    /// Largest horizontal normal component still treated as horizontal.
    pub horizontal_tolerance: f64,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            horizontal_tolerance: DEFAULT_HORIZONTAL_TOLERANCE,
        }
    }
}

/// Resolves every construction input, failing on the first unknown name.
pub fn resolve_constructions<L: ResourceLibrary + ?Sized>(
    inputs: &[ConstructionInput],
    library: &L,
) -> Result<Vec<Arc<OpaqueConstruction>>> {
    if inputs.is_empty() {
        return Err(Error::validation("at least one construction is required"));
    }
    inputs.iter().map(|input| input.resolve(library)).collect()
}

/// Assigns constructions to copies of `objects` with default options.
pub fn assign_constructions<L: ResourceLibrary + ?Sized>(
    objects: &[SpatialObject],
    constructions: &[ConstructionInput],
    library: &L,
) -> Result<Vec<SpatialObject>> {
    assign_constructions_with(objects, constructions, library, &AssignOptions::default())
}

pub fn assign_constructions_with<L: ResourceLibrary + ?Sized>(
    objects: &[SpatialObject],
    constructions: &[ConstructionInput],
    library: &L,
    options: &AssignOptions,
) -> Result<Vec<SpatialObject>> {
    let resolved = resolve_constructions(constructions, library)?;
    let mut outputs = objects.to_vec();
    apply(&mut outputs, &resolved, options)?;
    Ok(outputs)
}

/// Assigns constructions to untyped host values.
///
/// Constructions are resolved first, then every object is checked to be a
/// Face, Door or Room. Nothing is built unless all inputs are acceptable.
pub fn assign_constructions_from_values<L: ResourceLibrary + ?Sized>(
    objects: &[Value],
    constructions: &[Value],
    library: &L,
    options: &AssignOptions,
) -> Result<Vec<SpatialObject>> {
    let inputs = constructions
        .iter()
        .map(ConstructionInput::from_value)
        .collect::<Result<Vec<_>>>()?;
    let resolved = resolve_constructions(&inputs, library)?;

    for value in objects {
        SpatialObject::check_kind(value)?;
    }
    let mut outputs = objects
        .iter()
        .map(SpatialObject::from_value)
        .collect::<Result<Vec<_>>>()?;

    apply(&mut outputs, &resolved, options)?;
    Ok(outputs)
}

fn apply(
    objects: &mut [SpatialObject],
    constructions: &[Arc<OpaqueConstruction>],
    options: &AssignOptions,
) -> Result<()> {
    let mut assigned = 0usize;
    let mut skipped = 0usize;

    if let [construction] = constructions {
        for object in objects.iter_mut() {
            object.for_each_target(|target| {
                target.set_construction(construction.clone());
                assigned += 1;
            });
        }
    } else {
        let buckets = OrientationBuckets::new(constructions.len())?;
        for object in objects.iter_mut() {
            object.for_each_target(|target| {
                if assign_by_orientation(target, &buckets, constructions, options) {
                    assigned += 1;
                } else {
                    skipped += 1;
                }
            });
        }
    }

    tracing::info!(
        objects = objects.len(),
        constructions = constructions.len(),
        assigned,
        skipped,
        "Assigned opaque constructions"
    );
    Ok(())
}

fn assign_by_orientation(
    target: &mut dyn OpaqueAssignable,
    buckets: &OrientationBuckets,
    constructions: &[Arc<OpaqueConstruction>],
    options: &AssignOptions,
) -> bool {
    match buckets.classify_surface(&*target, options.horizontal_tolerance) {
        Some(index) => {
            let construction = &constructions[index];
            tracing::debug!(
                surface = target.identifier(),
                bucket = index,
                construction = %construction.identifier,
                "Assigned construction by orientation"
            );
            target.set_construction(construction.clone());
            true
        }
        None => {
            tracing::debug!(surface = target.identifier(), "Skipped horizontal surface");
            false
        }
    }
}
