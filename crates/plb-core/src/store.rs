use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::StoreError;

pub const DEFAULT_FILE_NAME: &str = "prompt_list.txt";
pub const EXTENSION: &str = ".txt";

const BOM: char = '\u{feff}';

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub name: String,
    pub path: PathBuf,
    pub message: String,
    /// Saved files after the write, for refreshing a selection list
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub content: String,
}

/// A saved file with the metadata shown next to it in the file list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Line lists stored as text files in one directory.
///
/// There is no locking: two saves to the same name race and the last
/// writer wins.
#[derive(Debug, Clone)]
pub struct LineStore {
    dir: PathBuf,
}

impl LineStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<&Path, StoreError> {
        fs::create_dir_all(&self.dir).map_err(StoreError::io(&self.dir))?;
        Ok(&self.dir)
    }

    /// Write `content` verbatim to the normalized `name`, replacing any
    /// existing file.
    pub fn save(&self, content: &str, name: &str) -> Result<SaveOutcome, StoreError> {
        let name = normalize_name(name)?;
        let path = self.ensure_dir()?.join(&name);

        fs::write(&path, content).map_err(StoreError::io(&path))?;
        info!("Saved {} lines to {}", content.lines().count(), path.display());

        // The file is on disk at this point, so a listing failure only
        // leaves the refreshed names empty
        let files = self.list().unwrap_or_else(|e| {
            warn!("Saved {} but could not list {}: {e}", name, self.dir.display());
            Vec::new()
        });

        Ok(SaveOutcome {
            message: format!("Saved: {}", path.display()),
            files,
            name,
            path,
        })
    }

    /// Read a saved file. A blank, invalid or missing name, and any read
    /// failure, yields `None` rather than an error.
    pub fn load(&self, name: &str) -> Option<LoadedFile> {
        if name.trim().is_empty() {
            return None;
        }

        let name = match normalize_name(name) {
            Ok(name) => name,
            Err(e) => {
                debug!("Not loading {name:?}: {e}");
                return None;
            }
        };

        let path = self.dir.join(&name);
        if !path.is_file() {
            debug!("Nothing to load at {}", path.display());
            return None;
        }

        match fs::read(&path) {
            Ok(bytes) => Some(LoadedFile {
                content: String::from_utf8_lossy(&bytes).into_owned(),
                name,
            }),
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                None
            }
        }
    }

    /// Names of saved files, sorted ascending
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries()?.into_iter().map(|f| f.name).collect())
    }

    /// Saved files with size and modification time, sorted by name
    pub fn entries(&self) -> Result<Vec<SavedFile>, StoreError> {
        let dir = self.ensure_dir()?;
        let mut files = Vec::new();

        for entry in fs::read_dir(dir).map_err(StoreError::io(dir))? {
            let entry = entry.map_err(StoreError::io(dir))?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !has_extension(&name) {
                continue;
            }

            // Follows symlinks, like `load`
            let Ok(meta) = fs::metadata(entry.path()) else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }

            files.push(SavedFile {
                name,
                size: meta.len(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Found {} saved line lists in {}", files.len(), dir.display());

        Ok(files)
    }

    /// Decode an uploaded file. Undecodable bytes are replaced and a
    /// leading byte order mark is dropped; this never fails.
    pub fn load_from_upload(bytes: &[u8]) -> String {
        let text = String::from_utf8_lossy(bytes);
        let text: &str = &text;
        text.strip_prefix(BOM).unwrap_or(text).to_string()
    }
}

/// Trim, default and add the extension to a requested file name.
pub fn normalize_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    let mut name = if name.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        name.to_string()
    };

    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(StoreError::InvalidName(name));
    }

    if !has_extension(&name) {
        name.push_str(EXTENSION);
    }

    Ok(name)
}

fn has_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(EXTENSION)
}
