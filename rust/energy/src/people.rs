// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use hb_lite_core::{People, Result, Schedule};
use serde::Serialize;
use serde_json::Value;

use crate::host::expect_object;

/// The properties of a People load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeopleParts {
    pub identifier: String,
    pub people_per_area: f64,
    pub occupancy_schedule: Schedule,
    pub activity_schedule: Schedule,
}

impl From<People> for PeopleParts {
    fn from(people: People) -> Self {
        Self {
            identifier: people.identifier,
            people_per_area: people.people_per_area,
            occupancy_schedule: people.occupancy_schedule,
            activity_schedule: people.activity_schedule,
        }
    }
}

/// Splits a host value holding a People load into its properties.
pub fn deconstruct_people(value: &Value) -> Result<PeopleParts> {
    let people: People = expect_object(value, "People")?;
    Ok(people.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hb_lite_core::{Error, ScheduleTypeLimit};
    use serde_json::json;

    #[test]
    fn parts_of_people() {
        let occupancy = Schedule::constant("Busy", ScheduleTypeLimit::Fractional, 0.8).unwrap();
        let people = People::new("Office People", 0.06, occupancy.clone(), None).unwrap();
        let parts = deconstruct_people(&serde_json::to_value(&people).unwrap()).unwrap();

        assert_eq!(parts.identifier, "Office People");
        assert_eq!(parts.people_per_area, 0.06);
        assert_eq!(parts.occupancy_schedule, occupancy);
        assert_eq!(parts.activity_schedule.identifier, "Seated Adult Activity");
    }

    #[test]
    fn other_objects_rejected() {
        let err = deconstruct_people(&json!({"type": "Lighting", "identifier": "L"})).unwrap_err();
        match err {
            Error::UnsupportedObjectKind { expected, found } => {
                assert_eq!(expected, "People");
                assert_eq!(found, "Lighting");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(deconstruct_people(&json!("Office People")).is_err());
    }
}
