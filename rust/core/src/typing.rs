// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier validation and cleaning.
//!
//! Identifiers end up as object names in simulation input files, so they are
//! restricted to ASCII, may not contain the field/record separators of that
//! format, and are capped at 100 characters.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Maximum identifier length accepted by the simulation engine.
pub const MAX_IDENTIFIER_LENGTH: usize = 100;

const ILLEGAL_CHARS: [char; 5] = [',', ';', '!', '\n', '\t'];

/// Checks that `value` is a usable identifier and returns it owned.
///
/// `input_name` is only used to build the error message.
pub fn valid_ep_string(value: &str, input_name: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{input_name} must not be empty")));
    }
    if !value.is_ascii() {
        return Err(Error::validation(format!(
            "{input_name} \"{value}\" contains non-ASCII characters"
        )));
    }
    if let Some(c) = value.chars().find(|c| ILLEGAL_CHARS.contains(c)) {
        return Err(Error::validation(format!(
            "{input_name} \"{value}\" contains illegal character {c:?}"
        )));
    }
    if value.len() > MAX_IDENTIFIER_LENGTH {
        return Err(Error::validation(format!(
            "{input_name} is {} characters long; the limit is {MAX_IDENTIFIER_LENGTH}",
            value.len()
        )));
    }
    Ok(value.to_string())
}

/// Like [`valid_ep_string`], and also usable as a single folder name: no
/// path separators and not made only of periods.
pub fn valid_folder_name(value: &str, input_name: &str) -> Result<String> {
    let value = valid_ep_string(value, input_name)?;
    if value.contains(['/', '\\', ':']) || value.trim().chars().all(|c| c == '.') {
        return Err(Error::validation(format!(
            "{input_name} \"{value}\" cannot be used as a folder name"
        )));
    }
    Ok(value)
}

/// Strips characters that are not allowed in identifiers and truncates.
pub fn clean_ep_string(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii() && !ILLEGAL_CHARS.contains(c))
        .collect();
    let mut cleaned = cleaned.trim().to_string();
    cleaned.truncate(MAX_IDENTIFIER_LENGTH);
    cleaned
}

/// Cleans `value` and appends a short random suffix so the result is unique.
///
/// The result always fits within [`MAX_IDENTIFIER_LENGTH`].
pub fn clean_and_id_ep_string(value: &str) -> String {
    let mut base = clean_ep_string(value);
    if base.is_empty() {
        base.push_str("Unnamed");
    }
    // "_" plus 8 hex characters
    base.truncate(MAX_IDENTIFIER_LENGTH - 9);
    format!("{}_{}", base, short_id())
}

/// First 8 hex characters of a random v4 UUID.
pub fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifier_passes_through() {
        assert_eq!(
            valid_ep_string("Generic Exterior Wall", "identifier").unwrap(),
            "Generic Exterior Wall"
        );
    }

    #[test]
    fn illegal_characters_rejected() {
        let err = valid_ep_string("Wall;1", "identifier").unwrap_err();
        assert!(err.to_string().contains("illegal character"));
        assert!(valid_ep_string("Wall,1", "identifier").is_err());
        assert!(valid_ep_string("   ", "identifier").is_err());
        assert!(valid_ep_string("Wänd", "identifier").is_err());
    }

    #[test]
    fn long_identifier_rejected() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert!(valid_ep_string(&long, "identifier").is_err());
    }

    #[test]
    fn folder_names_stay_inside_root() {
        assert_eq!(valid_folder_name("Small_Office", "model identifier").unwrap(), "Small_Office");
        assert!(valid_folder_name("Office v1.2", "model identifier").is_ok());
        for bad in ["../../../etc", "..", ".", "a/b", "C:\\x"] {
            assert!(valid_folder_name(bad, "model identifier").is_err(), "{bad}");
        }
    }

    #[test]
    fn clean_removes_illegal_and_non_ascii() {
        assert_eq!(clean_ep_string(" Office; Open!Plan é "), "Office OpenPlan");
    }

    #[test]
    fn clean_and_id_appends_suffix() {
        let id = clean_and_id_ep_string("My Program");
        assert!(id.starts_with("My Program_"));
        assert_eq!(id.len(), "My Program_".len() + 8);
        assert!(valid_ep_string(&id, "identifier").is_ok());

        let long = clean_and_id_ep_string(&"x".repeat(300));
        assert_eq!(long.len(), MAX_IDENTIFIER_LENGTH);
    }

    #[test]
    fn clean_and_id_is_unique() {
        assert_ne!(clean_and_id_ep_string("A"), clean_and_id_ep_string("A"));
    }
}
