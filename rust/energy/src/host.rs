// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Values arriving from the host application.
//!
//! The host passes component inputs as untyped JSON values. Model objects
//! carry a `"type"` tag; anything else is reported by its JSON kind.

use hb_lite_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Human-readable kind of a host value, used in error messages.
pub fn value_kind(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(map) => match map.get("type").and_then(Value::as_str) {
            Some(tag) => return tag.to_string(),
            None => "object",
        },
    };
    kind.to_string()
}

/// Deserializes `value` into `T` after checking its `"type"` tag is `tag`.
///
/// The result is a fresh owned copy; `value` is left untouched.
pub fn expect_object<T: DeserializeOwned>(value: &Value, tag: &'static str) -> Result<T> {
    let found = value_kind(value);
    if found != tag {
        return Err(Error::UnsupportedObjectKind {
            expected: tag,
            found,
        });
    }
    Ok(serde_json::from_value(value.clone())?)
}
