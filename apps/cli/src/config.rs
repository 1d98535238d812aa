// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use hb_lite_core::{Library, DEFAULT_HORIZONTAL_TOLERANCE};
use hb_lite_energy::AssignOptions;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Resource library merged over the built-in defaults.
    pub library_path: Option<PathBuf>,
    /// Root folder for simulation files.
    pub sim_folder: PathBuf,
    /// Horizontal normal tolerance for orientation checks.
    pub horizontal_tolerance: f64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            library_path: std::env::var_os("HB_LITE_LIBRARY").map(PathBuf::from),
            sim_folder: std::env::var_os("HB_LITE_SIM_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(default_sim_folder),
            horizontal_tolerance: std::env::var("HB_LITE_HORIZONTAL_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|t: &f64| *t >= 0.0)
                .unwrap_or(DEFAULT_HORIZONTAL_TOLERANCE),
        }
    }

    /// Built-in library, extended by the configured library file if any.
    pub fn library(&self) -> Result<Library> {
        let mut library = Library::with_defaults();
        if let Some(path) = &self.library_path {
            let extra = Library::load(path)
                .with_context(|| format!("failed to load library {}", path.display()))?;
            library.merge(extra);
        }
        Ok(library)
    }

    pub fn assign_options(&self) -> AssignOptions {
        AssignOptions {
            horizontal_tolerance: self.horizontal_tolerance,
        }
    }
}

/// `honeybee` in the user's home folder, or the working directory.
fn default_sim_folder() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("honeybee")
}
