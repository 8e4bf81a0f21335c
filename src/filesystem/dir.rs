// src/filesystem/dir.rs
use std::path::MAIN_SEPARATOR;
use std::rc::Rc;

use log::{info, warn};

use super::{list_dir, Entry, Listing};
use crate::error::{BrowseError, Result};

pub const PARENT_ENTRY: &str = "..";
pub const SEPARATOR: char = MAIN_SEPARATOR;

/// Truncates at the last separator; no separator yields the root (`""`).
pub fn parent_path(path: &str) -> String {
    match path.rfind(SEPARATOR) {
        Some(pos) => path[..pos].to_string(),
        None => String::new(),
    }
}

pub fn child_path(path: &str, entry: &Entry) -> String {
    if entry.is_parent() {
        parent_path(path)
    } else {
        format!("{}{}{}", path, SEPARATOR, entry.name)
    }
}

/// Drops trailing separators so `/` and `/home/` become `` and `/home`.
pub fn normalize_path(path: &str) -> String {
    path.trim_end_matches(SEPARATOR).to_string()
}

/// Current location plus the listing read for it. The path string is the
/// only record of where we are; there is no history.
#[derive(Debug)]
pub struct DirNavigator {
    current_path: String,
    listing: Rc<Listing>,
}

impl DirNavigator {
    pub fn new(path: &str) -> Result<Self> {
        let current_path = normalize_path(path);
        let listing = Rc::new(list_dir(&current_path)?);
        Ok(DirNavigator { current_path, listing })
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn listing(&self) -> &Rc<Listing> {
        &self.listing
    }

    /// Lists `path` and switches to it. On failure nothing changes.
    pub fn navigate_to(&mut self, path: &str) -> Result<Rc<Listing>> {
        let path = normalize_path(path);
        match list_dir(&path) {
            Ok(listing) => {
                info!("navigated to {:?}", path);
                self.current_path = path;
                self.listing = Rc::new(listing);
                Ok(Rc::clone(&self.listing))
            }
            Err(err) => {
                warn!("navigation to {:?} rejected: {}", path, err);
                Err(err)
            }
        }
    }

    pub fn navigate_up(&mut self) -> Result<Rc<Listing>> {
        let parent = parent_path(&self.current_path);
        self.navigate_to(&parent)
    }

    pub fn enter(&mut self, entry: &Entry) -> Result<Rc<Listing>> {
        if !entry.is_dir {
            return Err(BrowseError::NotADirectory(child_path(&self.current_path, entry)));
        }
        let target = child_path(&self.current_path, entry);
        self.navigate_to(&target)
    }

    pub fn refresh(&mut self) -> Result<Rc<Listing>> {
        let path = self.current_path.clone();
        self.navigate_to(&path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::filesystem::classify;
    use std::fs::{create_dir, remove_dir, write};

    fn dir_entry(name: &str) -> Entry {
        classify(name, true, 0o755, 0)
    }

    #[test]
    fn test_path_arithmetic() {
        assert_eq!(parent_path("/home/user"), "/home");
        assert_eq!(parent_path("/home"), "");
        assert_eq!(parent_path(""), "");
        assert_eq!(child_path("/home", &dir_entry("user")), "/home/user");
        assert_eq!(child_path("", &dir_entry("etc")), "/etc");
        assert_eq!(child_path("/home/user", &dir_entry("..")), "/home");
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path("/tmp/"), "/tmp");
    }

    #[test]
    fn test_enter_then_up_returns_home() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        create_dir(tmp.path().join("inner")).expect("mkdir");
        let start = tmp.path().to_string_lossy().to_string();

        let mut nav = DirNavigator::new(&start).expect("open");
        let inner = nav
            .listing()
            .entries()
            .iter()
            .find(|e| e.name == "inner")
            .cloned()
            .expect("inner entry");

        nav.enter(&inner).expect("enter");
        assert_eq!(nav.current_path(), format!("{}/inner", start));
        assert_eq!(nav.listing().path(), nav.current_path());

        nav.navigate_up().expect("up");
        assert_eq!(nav.current_path(), start);

        nav.enter(&dir_entry("inner")).expect("enter");
        let parent = nav.listing().get(0).cloned().expect("parent entry");
        assert!(parent.is_parent());
        nav.enter(&parent).expect("enter ..");
        assert_eq!(nav.current_path(), start);
    }

    #[test]
    fn test_refresh_rereads_current_dir() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let start = tmp.path().to_string_lossy().to_string();

        let mut nav = DirNavigator::new(&start).expect("open");
        assert_eq!(nav.listing().len(), 1);

        write(tmp.path().join("late.txt"), b"x").expect("write");
        nav.refresh().expect("refresh");
        assert_eq!(nav.current_path(), start);
        assert!(nav.listing().entries().iter().any(|e| e.name == "late.txt"));

        drop(tmp);
        assert!(nav.refresh().is_err());
        assert_eq!(nav.current_path(), start);
        assert_eq!(nav.listing().len(), 2);
    }

    #[test]
    fn test_failed_navigation_keeps_state() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        create_dir(tmp.path().join("doomed")).expect("mkdir");
        write(tmp.path().join("file.txt"), b"x").expect("write");
        let start = tmp.path().to_string_lossy().to_string();

        let mut nav = DirNavigator::new(&start).expect("open");
        let before = Rc::clone(nav.listing());

        remove_dir(tmp.path().join("doomed")).expect("rmdir");
        let err = nav.enter(&dir_entry("doomed")).unwrap_err();
        assert!(matches!(err, BrowseError::PathNotFound(_)));
        assert_eq!(nav.current_path(), start);
        assert!(Rc::ptr_eq(nav.listing(), &before));

        let file = classify("file.txt", false, 0o644, 1);
        assert!(matches!(nav.enter(&file), Err(BrowseError::NotADirectory(_))));
        assert_eq!(nav.current_path(), start);
        assert_eq!(**nav.listing(), *before);
    }
}
