// src/filesystem/listing.rs
use std::fs::{self, Metadata};
use std::path::{Path, MAIN_SEPARATOR_STR};

use log::{debug, warn};
use walkdir::WalkDir;

use super::{classify, Entry, PARENT_ENTRY};
use crate::error::{BrowseError, Result};

/// Entries of one directory: directories first, then files, each group
/// ordered by byte-wise name comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    path: String,
    entries: Vec<Entry>,
    dir_count: usize,
}

impl Listing {
    pub fn new(path: &str) -> Self {
        Listing {
            path: path.to_string(),
            entries: Vec::new(),
            dir_count: 0,
        }
    }

    /// Inserts into the entry's region (directories or files) before the
    /// first name that is not less than its own.
    pub fn insert(&mut self, entry: Entry) {
        let (start, end) = if entry.is_dir {
            (0, self.dir_count)
        } else {
            (self.dir_count, self.entries.len())
        };
        let pos = start + self.entries[start..end].partition_point(|e| e.name < entry.name);

        if entry.is_dir {
            self.dir_count += 1;
        }
        self.entries.insert(pos, entry);
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dir_count(&self) -> usize {
        self.dir_count
    }
}

/// The path actually handed to the OS; the empty path means the root.
pub fn lookup_path(path: &str) -> &str {
    if path.is_empty() {
        MAIN_SEPARATOR_STR
    } else {
        path
    }
}

#[cfg(unix)]
fn mode_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn mode_of(metadata: &Metadata) -> u32 {
    let mut mode = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    if metadata.is_dir() {
        mode |= 0o111;
    }
    mode
}

pub fn list_dir(path: &str) -> Result<Listing> {
    let lookup = lookup_path(path);

    let metadata = fs::metadata(lookup).map_err(|e| BrowseError::from_io(lookup, e))?;
    if !metadata.is_dir() {
        return Err(BrowseError::NotADirectory(lookup.to_string()));
    }

    let mut listing = Listing::new(path);

    // read_dir never yields "..", so the parent affordance is built by hand
    match fs::metadata(Path::new(lookup).join(PARENT_ENTRY)) {
        Ok(parent) => listing.insert(classify(PARENT_ENTRY, true, mode_of(&parent), parent.len())),
        Err(source) => warn!(
            "{}",
            BrowseError::MalformedEntry {
                dir: lookup.to_string(),
                name: PARENT_ENTRY.to_string(),
                source
            }
        ),
    }

    for entry in WalkDir::new(lookup).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(BrowseError::from_io(lookup, err.into()));
            }
            Err(err) => {
                let name = err
                    .path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                warn!(
                    "{}",
                    BrowseError::MalformedEntry { dir: lookup.to_string(), name, source: err.into() }
                );
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        let is_dir = entry.file_type().is_dir();

        match fs::metadata(entry.path()) {
            Ok(meta) => listing.insert(classify(&name, is_dir, mode_of(&meta), meta.len())),
            Err(source) => warn!(
                "{}",
                BrowseError::MalformedEntry { dir: lookup.to_string(), name, source }
            ),
        }
    }

    debug!("listed {} entries in {}", listing.len(), lookup);
    Ok(listing)
}
