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

//! Tuning parameters for the maze generator.
//!
//! The loop injection parameters are aesthetic values: they control how many redundant
//! corridors are added along the internal walls.

use serde::{Deserialize, Serialize};

/// Generator parameters.
///
/// Missing fields take their default value when the object is deserialized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Number of split positions to try before giving up on a rectangle.
    pub max_split_attempts: usize,

    /// Probability of adding a loop in an eligible gap between two junctions.
    pub loop_probability: f64,

    /// Loops are added only while the number of junctions is below this ratio of the wall
    /// length.
    pub loop_density: f64,

    /// Minimum distance between two consecutive junctions for adding a loop between them.
    pub loop_min_gap: usize,

    /// Loops are added only when both sides of the rectangle are at least this long.
    pub loop_min_size: usize,

    /// Maximum depth of the partition tree, whatever the requested depth.
    pub max_recursion_depth: usize,

    /// Number of subtrees that can be built again with loops when the loops made a descendant
    /// impossible to split. Beyond that, such subtrees are built without loops.
    pub max_rebuilds: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_split_attempts: 256,
            loop_probability: 0.6,
            loop_density: 0.6,
            loop_min_gap: 4,
            loop_min_size: 4,
            max_recursion_depth: 256,
            max_rebuilds: 256,
        }
    }
}

impl GeneratorSettings {
    /// Return settings that never add loops.
    pub fn without_loops() -> Self {
        Self {
            loop_probability: 0.0,
            ..Self::default()
        }
    }

    /// Verify the parameters.
    ///
    /// # Errors
    ///
    /// The method returns an error message describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_split_attempts == 0 {
            return Err("max_split_attempts must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.loop_probability) {
            return Err(format!(
                "loop_probability must be between 0 and 1 (got {})",
                self.loop_probability
            ));
        }
        if !(0.0..=1.0).contains(&self.loop_density) {
            return Err(format!(
                "loop_density must be between 0 and 1 (got {})",
                self.loop_density
            ));
        }
        if self.loop_min_gap < 3 {
            return Err(format!(
                "loop_min_gap must be at least 3 (got {})",
                self.loop_min_gap
            ));
        }
        if self.max_recursion_depth == 0 {
            return Err("max_recursion_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GeneratorSettings::default().validate(), Ok(()));
        assert_eq!(GeneratorSettings::without_loops().loop_probability, 0.0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let settings: GeneratorSettings =
            serde_json::from_str(r#"{ "loop_probability": 0.25 }"#).unwrap();
        assert_eq!(settings.loop_probability, 0.25);
        assert_eq!(settings.max_split_attempts, 256);
        assert_eq!(settings.loop_min_gap, 4);
        assert_eq!(settings.max_rebuilds, 256);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut settings: GeneratorSettings = GeneratorSettings::default();
        settings.loop_probability = 1.5;
        assert!(settings.validate().is_err());

        let mut settings: GeneratorSettings = GeneratorSettings::default();
        settings.max_split_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings: GeneratorSettings = GeneratorSettings::default();
        settings.loop_min_gap = 2;
        assert!(settings.validate().is_err());
    }
}
