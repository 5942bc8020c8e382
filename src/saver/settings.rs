/*
settings.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazesplit.

Mazesplit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazesplit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazesplit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Load the generator settings from a JSON file.
//!
//! The file is a serialization of the [`GeneratorSettings`] object. Missing fields get their
//! default value:
//!
//! ```json
//! {
//!     "max_split_attempts": 64,
//!     "loop_probability": 0.8
//! }
//! ```

use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::generator::settings::GeneratorSettings;

/// Object to load the settings.
pub struct SaverSettings {
    /// Path to the settings file.
    settings_file: PathBuf,
}

impl SaverSettings {
    /// Create a [`SaverSettings`] object.
    pub fn new(settings_file: PathBuf) -> Self {
        debug!("Settings file: {settings_file:?}");
        Self { settings_file }
    }

    /// Read and validate the settings.
    pub fn get_settings(&self) -> Result<GeneratorSettings, Box<dyn Error>> {
        let file: File = File::open(&self.settings_file)?;
        let reader: BufReader<File> = BufReader::new(file);
        let settings: GeneratorSettings = serde_json::from_reader(reader)?;
        settings.validate()?;
        debug!("Settings = {settings:?}");
        Ok(settings)
    }
}
