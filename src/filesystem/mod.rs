// src/filesystem/mod.rs
pub mod dir;
pub mod listing;

pub use dir::{DirNavigator, PARENT_ENTRY};
pub use listing::{list_dir, Listing};

use crate::utils::{format_permissions, format_size};

const CODE_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "ts", "tsx", "jsx", "java", "c", "cpp", "h", "hpp", "go", "rb", "php",
    "swift", "kt", "scala", "cs", "hs", "clj", "ex", "exs", "erl", "lua", "pl", "sh", "bash",
    "zsh", "sql", "graphql", "svelte", "vue", "css", "scss", "sass", "less", "html", "htm",
];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "ico", "tiff", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "m4v", "mpg", "mpeg"];

const EXEC_BITS: u32 = 0o111;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    Executable,
    Image,
    Video,
    Code,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub extension: String,
    pub permissions: String,
    pub size_display: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_ENTRY
    }
}

/// Text after the last `.`, or empty when the name has none.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => "",
    }
}

/// Kind by priority: directory, any exec bit, then extension (case-sensitive).
pub fn kind_of(is_dir: bool, mode: u32, extension: &str) -> EntryKind {
    if is_dir {
        EntryKind::Directory
    } else if mode & EXEC_BITS != 0 {
        EntryKind::Executable
    } else if CODE_EXTENSIONS.contains(&extension) {
        EntryKind::Code
    } else if IMAGE_EXTENSIONS.contains(&extension) {
        EntryKind::Image
    } else if VIDEO_EXTENSIONS.contains(&extension) {
        EntryKind::Video
    } else {
        EntryKind::Other
    }
}

pub fn classify(name: &str, is_dir: bool, mode: u32, size: u64) -> Entry {
    let extension = extension_of(name).to_string();
    let kind = kind_of(is_dir, mode, &extension);

    Entry {
        name: name.to_string(),
        is_dir,
        permissions: format_permissions(is_dir, mode),
        size_display: format_size(size),
        extension,
        kind,
    }
}
