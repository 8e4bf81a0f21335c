// src/browser.rs
use std::path::PathBuf;
use std::rc::Rc;

use log::debug;

use crate::error::{BrowseError, Result};
use crate::filesystem::dir::child_path;
use crate::filesystem::{DirNavigator, Listing};
use crate::opener::Opener;
use crate::viewport::{Point, Rect, Viewport, ViewportConfig, ViewportState};

#[derive(Debug, Clone)]
pub enum Activation {
    Entered(Rc<Listing>),
    Opened(PathBuf),
}

/// What the event loop talks to: navigation, scrolling and pointer input
/// for one window.
pub struct Browser<O: Opener> {
    navigator: DirNavigator,
    viewport: Viewport,
    opener: O,
}

impl<O: Opener> Browser<O> {
    pub fn new(path: &str, config: ViewportConfig, page: Rect, opener: O) -> Result<Self> {
        let navigator = DirNavigator::new(path)?;
        let mut viewport = Viewport::new(config, page);
        viewport.recompute(navigator.listing().len());

        Ok(Browser { navigator, viewport, opener })
    }

    pub fn current_path(&self) -> &str {
        self.navigator.current_path()
    }

    pub fn listing(&self) -> &Rc<Listing> {
        self.navigator.listing()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn current_viewport(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn navigate(&mut self, path: &str) -> Result<Rc<Listing>> {
        let listing = self.navigator.navigate_to(path)?;
        self.listing_changed();
        Ok(listing)
    }

    pub fn go_up(&mut self) -> Result<Rc<Listing>> {
        let listing = self.navigator.navigate_up()?;
        self.listing_changed();
        Ok(listing)
    }

    pub fn refresh(&mut self) -> Result<Rc<Listing>> {
        let listing = self.navigator.refresh()?;
        self.listing_changed();
        Ok(listing)
    }

    /// Enters a directory row or hands a file row to the opener.
    pub fn activate(&mut self, index: usize) -> Result<Activation> {
        let entry = self
            .listing()
            .get(index)
            .cloned()
            .ok_or(BrowseError::NoSuchEntry(index))?;

        if entry.is_dir {
            let listing = self.navigator.enter(&entry)?;
            self.listing_changed();
            Ok(Activation::Entered(listing))
        } else {
            let path = PathBuf::from(child_path(self.current_path(), &entry));
            self.opener.open(&path);
            Ok(Activation::Opened(path))
        }
    }

    pub fn on_wheel(&mut self, delta: i32) {
        self.viewport.apply_wheel(delta);
    }

    /// A press on the scrollbar handle starts a drag, a press on a row activates it.
    pub fn on_pointer_down(&mut self, pos: Point) -> Result<Option<Activation>> {
        if self.viewport.begin_drag(pos) {
            debug!("scrollbar drag started at {:?}", pos);
            return Ok(None);
        }
        match self.viewport.row_at(pos) {
            Some(row) => self.activate(row).map(Some),
            None => Ok(None),
        }
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        if self.viewport.is_dragging() {
            self.viewport.drag_to(pos.y);
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.viewport.end_drag();
    }

    pub fn resize(&mut self, page: Rect) {
        self.viewport.set_page(page);
    }

    fn listing_changed(&mut self) {
        self.viewport.recompute(self.navigator.listing().len());
        self.viewport.reset();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs::{create_dir, remove_dir, write};
    use std::path::Path;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<PathBuf>>,
    }

    impl Opener for RecordingOpener {
        fn open(&self, path: &Path) {
            self.opened.borrow_mut().push(path.to_path_buf());
        }
    }

    fn config() -> ViewportConfig {
        ViewportConfig { row_height: 1, wheel_step: 1, wheel_limit: 5, scrollbar_width: 1 }
    }

    /// `..`, `sub`, then `f00.txt`..`f29.txt` in a 10 row page.
    fn fixture() -> (tempfile::TempDir, Browser<RecordingOpener>) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        create_dir(tmp.path().join("sub")).expect("mkdir");
        for i in 0..30 {
            write(tmp.path().join(format!("f{:02}.txt", i)), b"x").expect("write");
        }
        let path = tmp.path().to_string_lossy().to_string();
        let browser = Browser::new(&path, config(), Rect::new(0, 3, 40, 10), RecordingOpener::default())
            .expect("open browser");
        (tmp, browser)
    }

    #[test]
    fn test_initial_viewport() {
        let (_tmp, browser) = fixture();
        let state = browser.current_viewport();
        assert_eq!(state.content_height, 32);
        assert_eq!(state.page_height, 10);
        assert!(state.scrollbar_enabled);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_click_on_file_opens_it() {
        let (tmp, mut browser) = fixture();
        browser.on_wheel(-2);
        let before = browser.current_path().to_string();

        // row 0 of the page is listing index 2 after scrolling two rows
        let outcome = browser.on_pointer_down(Point::new(5, 3)).expect("click");
        assert!(matches!(outcome, Some(Activation::Opened(_))));
        assert_eq!(*browser.opener().opened.borrow(), vec![tmp.path().join("f00.txt")]);
        assert_eq!(browser.current_path(), before);
        assert_eq!(browser.current_viewport().scroll_offset, 2);
    }

    #[test]
    fn test_click_on_directory_navigates_and_resets_scroll() {
        let (tmp, mut browser) = fixture();
        browser.on_wheel(-1);
        browser.on_wheel(1);

        let outcome = browser.on_pointer_down(Point::new(5, 4)).expect("click");
        assert!(matches!(outcome, Some(Activation::Entered(_))));
        assert_eq!(browser.current_path(), tmp.path().join("sub").to_string_lossy());

        let state = browser.current_viewport();
        assert_eq!(state.scroll_offset, 0);
        assert_eq!(state.content_height, 1);
        assert!(!state.scrollbar_enabled);

        browser.go_up().expect("up");
        assert_eq!(browser.current_path(), tmp.path().to_string_lossy());
    }

    #[test]
    fn test_scrollbar_drag_through_pointer_events() {
        let (_tmp, mut browser) = fixture();
        let handle = browser.viewport().handle_rect();
        assert_eq!(handle, Rect::new(39, 3, 1, 3));

        let outcome = browser.on_pointer_down(Point::new(39, 4)).expect("press");
        assert!(outcome.is_none());
        assert!(browser.current_viewport().drag_active);

        browser.on_pointer_move(Point::new(39, 100));
        assert_eq!(browser.current_viewport().scroll_offset, 22);
        browser.on_pointer_up();
        assert!(!browser.current_viewport().drag_active);

        browser.on_pointer_move(Point::new(39, 4));
        assert_eq!(browser.current_viewport().scroll_offset, 22);
        assert!(browser.opener().opened.borrow().is_empty());
    }

    #[test]
    fn test_refresh_picks_up_new_entries() {
        let (tmp, mut browser) = fixture();
        browser.on_wheel(-3);
        let before = Rc::clone(browser.listing());

        write(tmp.path().join("g.txt"), b"x").expect("write");
        let listing = browser.refresh().expect("refresh");

        assert!(!Rc::ptr_eq(&listing, &before));
        assert_eq!(listing.len(), 33);
        assert_eq!(listing.get(32).map(|e| e.name.as_str()), Some("g.txt"));
        let state = browser.current_viewport();
        assert_eq!(state.scroll_offset, 0);
        assert_eq!(state.content_height, 33);
        assert_eq!(browser.current_path(), tmp.path().to_string_lossy());
    }

    #[test]
    fn test_failed_navigation_keeps_everything() {
        let (tmp, mut browser) = fixture();
        browser.on_wheel(-3);
        let path = browser.current_path().to_string();
        let listing = Rc::clone(browser.listing());

        remove_dir(tmp.path().join("sub")).expect("rmdir");
        let err = browser.activate(1).unwrap_err();
        assert!(matches!(err, BrowseError::PathNotFound(_)));

        assert_eq!(browser.current_path(), path);
        assert!(Rc::ptr_eq(browser.listing(), &listing));
        assert_eq!(browser.current_viewport().scroll_offset, 3);

        assert!(matches!(browser.activate(999), Err(BrowseError::NoSuchEntry(999))));
        assert!(browser.navigate(&tmp.path().join("gone").to_string_lossy()).is_err());
        assert_eq!(browser.current_path(), path);
    }
}
