// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use hb_lite_core::{Infiltration, ResourceLibrary, Result, ALWAYS_ON};
use uuid::Uuid;

use crate::inputs::ScheduleInput;

/// Builds an Infiltration load.
///
/// Without a name a unique `Infiltration_<uuid>` identifier is generated.
/// Without a schedule the library's `Always On` schedule is used.
pub fn infiltration<L: ResourceLibrary + ?Sized>(
    name: Option<&str>,
    flow_per_exterior_area: f64,
    schedule: Option<ScheduleInput>,
    library: &L,
) -> Result<Infiltration> {
    let name = match name {
        Some(name) => name.to_string(),
        None => format!("Infiltration_{}", Uuid::new_v4()),
    };
    let schedule = schedule
        .unwrap_or_else(|| ScheduleInput::from(ALWAYS_ON))
        .resolve(library)?;
    Infiltration::new(&name, flow_per_exterior_area, schedule)
}
