/*
mazes.rs

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

//! Export the generated partition trees.
//!
//! The saved object is a serialization of a list of [`SavedMaze`] objects in JSON format by
//! using [`serde`].
//! A drawing program can read the file and use the [`crate::generator::layout`] functions to
//! get the paths and the walls.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::generator::node::PartitionNode;

/// Maze and the seed that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedMaze {
    pub seed: u64,
    pub root: PartitionNode,
}

/// Object to save and restore mazes.
pub struct SaverMazes {
    /// Path to the export file.
    save_file: PathBuf,
}

impl SaverMazes {
    /// Create a [`SaverMazes`] object.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Maze file: {save_file:?}");
        Self { save_file }
    }

    /// Save the mazes.
    pub fn save_mazes(&self, mazes: &[SavedMaze]) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, mazes)?;
        writer.flush()?;
        Ok(())
    }

    /// Read the mazes back.
    pub fn get_mazes(&self) -> Result<Vec<SavedMaze>, Box<dyn Error>> {
        let file: File = File::open(&self.save_file)?;
        let reader: BufReader<File> = BufReader::new(file);
        let mazes: Vec<SavedMaze> = serde_json::from_reader(reader)?;
        Ok(mazes)
    }
}
