// src/lib.rs
pub mod browser;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod opener;
pub mod ui;
pub mod utils;
pub mod viewport;

pub use browser::{Activation, Browser};
pub use config::Config;
pub use error::{BrowseError, Result};
pub use filesystem::{classify, list_dir, DirNavigator, Entry, EntryKind, Listing};
pub use opener::{Opener, SystemOpener};
pub use viewport::{Point, Rect, Viewport, ViewportConfig, ViewportState};
