// src/viewport/mod.rs
pub mod geometry;

pub use geometry::{Point, Rect};

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Named sizes and thresholds for the scroll model. Units are whatever the
/// front end draws in (terminal cells for the TUI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub row_height: i32,
    pub wheel_step: i32,
    /// Wheel deltas with a larger magnitude are ignored.
    pub wheel_limit: i32,
    pub scrollbar_width: i32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            row_height: 1,
            wheel_step: 3,
            wheel_limit: 5,
            scrollbar_width: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { grab: Point },
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub page_height: i32,
    pub content_height: i32,
    pub scroll_offset: i32,
    pub scrollbar_enabled: bool,
    pub scrollbar_ratio: f64,
    pub drag_active: bool,
    pub drag_grab_offset: Point,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewportConfig,
    page: Rect,
    content_height: i32,
    scroll_offset: i32,
    scrollbar_enabled: bool,
    scrollbar_ratio: f64,
    drag: DragState,
}

impl Viewport {
    pub fn new(config: ViewportConfig, page: Rect) -> Self {
        let config = ViewportConfig {
            row_height: config.row_height.max(1),
            wheel_step: config.wheel_step.max(1),
            wheel_limit: config.wheel_limit.max(1),
            scrollbar_width: config.scrollbar_width.max(0),
        };
        Viewport {
            config,
            page,
            content_height: 0,
            scroll_offset: 0,
            scrollbar_enabled: false,
            scrollbar_ratio: 1.0,
            drag: DragState::Idle,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn page(&self) -> Rect {
        self.page
    }

    pub fn page_height(&self) -> i32 {
        self.page.height.max(0)
    }

    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn scrollbar_enabled(&self) -> bool {
        self.scrollbar_enabled
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn max_offset(&self) -> i32 {
        (self.content_height - self.page_height()).max(0)
    }

    /// New content size. Leaves `scroll_offset` alone; see [`Viewport::reset`].
    pub fn recompute(&mut self, entry_count: usize) {
        let height = entry_count as i64 * self.config.row_height as i64;
        self.content_height = height.min(i32::MAX as i64) as i32;
        self.refresh_scrollbar();
    }

    /// Window resize: new page geometry, offset clamped into the new range.
    pub fn set_page(&mut self, page: Rect) {
        self.page = page;
        self.refresh_scrollbar();
        self.scroll_offset = self.scroll_offset.clamp(0, self.max_offset());
    }

    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.drag = DragState::Idle;
    }

    fn refresh_scrollbar(&mut self) {
        if self.content_height == 0 {
            self.scrollbar_ratio = 1.0;
            self.scrollbar_enabled = false;
        } else {
            self.scrollbar_ratio = (self.page_height() as f64 / self.content_height as f64).min(1.0);
            self.scrollbar_enabled = self.content_height > self.page_height();
        }
    }

    /// Positive deltas scroll towards the top.
    pub fn apply_wheel(&mut self, delta: i32) {
        if !self.scrollbar_enabled || delta == 0 || delta.unsigned_abs() > self.config.wheel_limit as u32 {
            return;
        }
        let moved = self.scroll_offset as i64 - delta as i64 * self.config.wheel_step as i64;
        self.scroll_offset = moved.clamp(0, self.max_offset() as i64) as i32;
    }

    pub fn track_rect(&self) -> Rect {
        let width = self.config.scrollbar_width.min(self.page.width.max(0));
        Rect::new(self.page.right() - width, self.page.y, width, self.page_height())
    }

    pub fn handle_rect(&self) -> Rect {
        let track = self.track_rect();
        let length = if track.height <= 0 {
            0
        } else {
            ((track.height as f64 * self.scrollbar_ratio).round() as i32).clamp(1, track.height)
        };
        let travel = (track.height - length) as i64;
        let top = track.y + (travel * self.scroll_offset as i64 / self.max_offset().max(1) as i64) as i32;
        Rect::new(track.x, top, track.width, length)
    }

    /// Starts a drag if `pos` is on the handle.
    pub fn begin_drag(&mut self, pos: Point) -> bool {
        if !self.scrollbar_enabled {
            return false;
        }
        let handle = self.handle_rect();
        if !handle.contains(pos) {
            return false;
        }
        self.drag = DragState::Dragging { grab: pos - handle.top_left() };
        true
    }

    pub fn drag_to(&mut self, cursor_y: i32) {
        let DragState::Dragging { grab } = self.drag else {
            return;
        };
        if !self.scrollbar_enabled {
            return;
        }

        let track = self.track_rect();
        let travel = track.height - self.handle_rect().height;
        if travel <= 0 {
            self.scroll_offset = 0;
            return;
        }

        let normalized = (cursor_y - grab.y - track.y).clamp(0, travel);
        let offset = normalized as i64 * self.max_offset() as i64 / travel as i64;
        self.scroll_offset = offset.clamp(0, self.max_offset() as i64) as i32;
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn entry_count(&self) -> usize {
        (self.content_height / self.config.row_height) as usize
    }

    /// Listing index under `pos`, ignoring the scrollbar track while it is shown.
    pub fn row_at(&self, pos: Point) -> Option<usize> {
        if !self.page.contains(pos) {
            return None;
        }
        if self.scrollbar_enabled && self.track_rect().contains(pos) {
            return None;
        }
        let row = ((pos.y - self.page.y) as i64 + self.scroll_offset as i64) / self.config.row_height as i64;
        let row = row as usize;
        (row < self.entry_count()).then_some(row)
    }

    /// Where row `index` is drawn after scrolling; may lie outside the page.
    pub fn row_top(&self, index: usize) -> i32 {
        let natural = index as i64 * self.config.row_height as i64;
        (self.page.y as i64 + natural - self.scroll_offset as i64) as i32
    }

    /// Rows that intersect the page.
    pub fn visible_rows(&self) -> Range<usize> {
        let row_height = self.config.row_height as i64;
        let offset = self.scroll_offset as i64;
        let first = offset / row_height;
        let last = (offset + self.page_height() as i64 + row_height - 1) / row_height;
        let count = self.entry_count();
        (first as usize).min(count)..(last as usize).min(count)
    }

    pub fn state(&self) -> ViewportState {
        let (drag_active, drag_grab_offset) = match self.drag {
            DragState::Idle => (false, Point::default()),
            DragState::Dragging { grab } => (true, grab),
        };
        ViewportState {
            page_height: self.page_height(),
            content_height: self.content_height,
            scroll_offset: self.scroll_offset,
            scrollbar_enabled: self.scrollbar_enabled,
            scrollbar_ratio: self.scrollbar_ratio,
            drag_active,
            drag_grab_offset,
        }
    }
}
