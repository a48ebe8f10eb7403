use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::input::{ButtonState, Key, KeyEvent};

/// Number of values kept in a save file.
pub const TOTAL_DATA: usize = 10;

const VALUE_SIZE: usize = std::mem::size_of::<i32>();

#[derive(Debug, Error)]
pub enum SaveDataError {
    #[error("unable to read save data from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write save data to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ten signed 32-bit values stored back to back, little-endian, in a small
/// binary file, plus which of them is selected for editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveData {
    path: PathBuf,
    values: [i32; TOTAL_DATA],
    selected: usize,
}

impl SaveData {
    /// Reads the values at `path`, creating the file filled with zeroes if it
    /// does not exist yet.
    ///
    /// A short file leaves the missing trailing values at zero; bytes past the
    /// last value are ignored.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SaveDataError> {
        let path = path.into();

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no save data, creating it");
                let data = Self::blank(path);
                data.save()?;
                return Ok(data);
            }
            Err(source) => return Err(SaveDataError::Read { path, source }),
        };

        let mut values = [0; TOTAL_DATA];
        for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(VALUE_SIZE)) {
            *value = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        if bytes.len() != TOTAL_DATA * VALUE_SIZE {
            tracing::warn!(
                path = %path.display(),
                len = bytes.len(),
                "save data has an unexpected length"
            );
        }

        tracing::debug!(path = %path.display(), "loaded save data");
        Ok(Self {
            path,
            values,
            selected: 0,
        })
    }

    fn blank(path: PathBuf) -> Self {
        Self {
            path,
            values: [0; TOTAL_DATA],
            selected: 0,
        }
    }

    /// Writes the values back to the file they were read from.
    pub fn save(&self) -> Result<(), SaveDataError> {
        let bytes: Vec<u8> = self.values.iter().flat_map(|v| v.to_le_bytes()).collect();

        std::fs::write(&self.path, bytes).map_err(|source| SaveDataError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "saved data");
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn values(&self) -> &[i32; TOTAL_DATA] {
        &self.values
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Up and down move the selection, wrapping at either end. Left and right
    /// decrement and increment the selected value. Held keys repeat.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if event.state == ButtonState::Released {
            return;
        }

        match event.key {
            Key::Up => self.selected = (self.selected + TOTAL_DATA - 1) % TOTAL_DATA,
            Key::Down => self.selected = (self.selected + 1) % TOTAL_DATA,
            Key::Left => {
                let value = &mut self.values[self.selected];
                *value = value.wrapping_sub(1);
            }
            Key::Right => {
                let value = &mut self.values[self.selected];
                *value = value.wrapping_add(1);
            }
            Key::Escape | Key::Other(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lessons-save-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("nums.bin")
    }

    #[test]
    fn created_when_missing() {
        let path = scratch_file("missing");
        let _ = std::fs::remove_file(&path);

        let data = SaveData::open(&path).unwrap();

        assert_eq!(data.values(), &[0; TOTAL_DATA]);
        assert_eq!(std::fs::read(&path).unwrap(), vec![0; 40]);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn edits_survive_a_reload() {
        let path = scratch_file("reload");
        let _ = std::fs::remove_file(&path);
        let mut data = SaveData::open(&path).unwrap();

        data.handle_key(KeyEvent::pressed(Key::Left));
        data.handle_key(KeyEvent::pressed(Key::Down));
        data.handle_key(KeyEvent::pressed(Key::Right));
        data.handle_key(KeyEvent::repeated(Key::Right, 1));
        data.handle_key(KeyEvent::released(Key::Right));
        data.save().unwrap();

        let reloaded = SaveData::open(&path).unwrap();
        assert_eq!(reloaded.values()[..3], [-1, 2, 0]);
        assert_eq!(reloaded.selected(), 0);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[..8], [0xFF, 0xFF, 0xFF, 0xFF, 2, 0, 0, 0]);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn selection_wraps() {
        let mut data = SaveData::blank(PathBuf::from("unused.bin"));

        data.handle_key(KeyEvent::pressed(Key::Up));
        assert_eq!(data.selected(), TOTAL_DATA - 1);

        data.handle_key(KeyEvent::pressed(Key::Down));
        assert_eq!(data.selected(), 0);

        data.handle_key(KeyEvent::pressed(Key::Escape));
        assert_eq!(data.selected(), 0);
        assert_eq!(data.values(), &[0; TOTAL_DATA]);
    }

    #[test]
    fn short_files_leave_zeroes() {
        let path = scratch_file("short");
        std::fs::write(&path, [7, 0, 0, 0, 9, 0]).unwrap();

        let data = SaveData::open(&path).unwrap();

        assert_eq!(data.values()[0], 7);
        assert_eq!(data.values()[1..], [0; TOTAL_DATA - 1]);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn unreadable_path() {
        let dir = scratch_file("unreadable");
        let dir = dir.parent().unwrap();

        // A directory exists at the path, so reading it fails with something
        // other than "not found".
        assert!(matches!(
            SaveData::open(dir),
            Err(SaveDataError::Read { .. })
        ));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
