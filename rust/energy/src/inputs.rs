// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component inputs that accept either an object or a library name.

use std::sync::Arc;

use hb_lite_core::{Error, OpaqueConstruction, ProgramType, ResourceLibrary, Result, Schedule};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::host::value_kind;

/// A library resource that can be named in place of the object itself.
pub trait LibraryResource: Sized {
    /// `"type"` tag of the serialized object.
    const TAG: &'static str;

    /// Accepted input kinds, for error messages.
    const EXPECTED: &'static str;

    fn lookup<L: ResourceLibrary + ?Sized>(library: &L, name: &str) -> Result<Self>;

    fn from_tagged(value: &Value) -> Result<Self>;
}

fn deserialize<T: DeserializeOwned>(value: &Value) -> Result<T> {
    Ok(serde_json::from_value(value.clone())?)
}

impl LibraryResource for Arc<OpaqueConstruction> {
    const TAG: &'static str = "OpaqueConstruction";
    const EXPECTED: &'static str = "OpaqueConstruction or construction name";

    fn lookup<L: ResourceLibrary + ?Sized>(library: &L, name: &str) -> Result<Self> {
        library.opaque_construction_by_name(name)
    }

    fn from_tagged(value: &Value) -> Result<Self> {
        deserialize::<OpaqueConstruction>(value).map(Arc::new)
    }
}

impl LibraryResource for Schedule {
    const TAG: &'static str = "Schedule";
    const EXPECTED: &'static str = "Schedule or schedule name";

    fn lookup<L: ResourceLibrary + ?Sized>(library: &L, name: &str) -> Result<Self> {
        library.schedule_by_name(name)
    }

    fn from_tagged(value: &Value) -> Result<Self> {
        deserialize(value)
    }
}

impl LibraryResource for ProgramType {
    const TAG: &'static str = "ProgramType";
    const EXPECTED: &'static str = "ProgramType or program type name";

    fn lookup<L: ResourceLibrary + ?Sized>(library: &L, name: &str) -> Result<Self> {
        library.program_type_by_name(name)
    }

    fn from_tagged(value: &Value) -> Result<Self> {
        deserialize(value)
    }
}

/// An input holding either a resolved resource or its library name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Name(String),
    Resolved(T),
}

pub type ConstructionInput = Resource<Arc<OpaqueConstruction>>;
pub type ScheduleInput = Resource<Schedule>;
pub type ProgramTypeInput = Resource<ProgramType>;

impl<T: LibraryResource + Clone> Resource<T> {
    /// Reads a host value: text is a library name, a tagged object is used as is.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Resource::Name(name.clone())),
            Value::Object(_) if value_kind(value) == T::TAG => {
                T::from_tagged(value).map(Resource::Resolved)
            }
            _ => Err(Error::UnsupportedObjectKind {
                expected: T::EXPECTED,
                found: value_kind(value),
            }),
        }
    }

    /// Returns the resource, looking names up in `library`.
    pub fn resolve<L: ResourceLibrary + ?Sized>(&self, library: &L) -> Result<T> {
        match self {
            Resource::Name(name) => T::lookup(library, name),
            Resource::Resolved(resource) => Ok(resource.clone()),
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Resource::Name(_))
    }
}

impl<T> From<&str> for Resource<T> {
    fn from(name: &str) -> Self {
        Resource::Name(name.to_string())
    }
}

impl<T> From<String> for Resource<T> {
    fn from(name: String) -> Self {
        Resource::Name(name)
    }
}

impl From<Arc<OpaqueConstruction>> for ConstructionInput {
    fn from(construction: Arc<OpaqueConstruction>) -> Self {
        Resource::Resolved(construction)
    }
}

impl From<OpaqueConstruction> for ConstructionInput {
    fn from(construction: OpaqueConstruction) -> Self {
        Resource::Resolved(Arc::new(construction))
    }
}

impl From<Schedule> for ScheduleInput {
    fn from(schedule: Schedule) -> Self {
        Resource::Resolved(schedule)
    }
}

impl From<ProgramType> for ProgramTypeInput {
    fn from(program: ProgramType) -> Self {
        Resource::Resolved(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hb_lite_core::{Library, ScheduleTypeLimit, ALWAYS_ON};
    use serde_json::json;

    #[test]
    fn text_is_a_library_name() {
        let input = ConstructionInput::from_value(&json!("Generic Roof")).unwrap();
        assert!(input.is_name());
        let lib = Library::with_defaults();
        assert_eq!(input.resolve(&lib).unwrap().identifier, "Generic Roof");
    }

    #[test]
    fn unknown_name_is_lookup_error() {
        let lib = Library::with_defaults();
        let err = ScheduleInput::from("Weekend Only").resolve(&lib).unwrap_err();
        assert!(matches!(err, Error::Lookup { kind: "schedule", .. }));
    }

    #[test]
    fn tagged_object_is_resolved() {
        let schedule = Schedule::constant("Half", ScheduleTypeLimit::Fractional, 0.5).unwrap();
        let value = serde_json::to_value(&schedule).unwrap();
        let input = ScheduleInput::from_value(&value).unwrap();
        assert_eq!(input, Resource::Resolved(schedule.clone()));
        // Resolved inputs never touch the library
        assert_eq!(input.resolve(&Library::new()).unwrap(), schedule);
    }

    #[test]
    fn other_kinds_rejected() {
        let err = ScheduleInput::from_value(&json!(2)).unwrap_err();
        assert!(err.to_string().contains("integer"));

        let program = ProgramType::new("Plenum").unwrap();
        let err = ScheduleInput::from_value(&serde_json::to_value(&program).unwrap()).unwrap_err();
        match err {
            Error::UnsupportedObjectKind { expected, found } => {
                assert_eq!(expected, "Schedule or schedule name");
                assert_eq!(found, "ProgramType");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn always_on_is_available() {
        let lib = Library::with_defaults();
        assert!(ScheduleInput::from(ALWAYS_ON).resolve(&lib).is_ok());
    }
}
