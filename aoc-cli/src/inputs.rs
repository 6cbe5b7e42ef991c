//! Puzzle inputs stored on disk

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Directory of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Get the input path for a specific year/day
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir.join(format!("{}_day{:02}.txt", year, day))
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the input with surrounding whitespace trimmed
    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content.trim().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(InputError::Missing { year, day, path })
            }
            Err(source) => Err(InputError::Io { path, source }),
        }
    }
}
