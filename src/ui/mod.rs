// src/ui/mod.rs
pub mod print;

use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::browser::Browser;
use crate::filesystem::{Entry, EntryKind, Listing};
use crate::opener::Opener;
use crate::viewport;

const HEADER_HEIGHT: u16 = 3;
const SIZE_WIDTH: usize = 10;

pub fn icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "▸",
        EntryKind::Executable => "*",
        EntryKind::Image => "▣",
        EntryKind::Video => "▶",
        EntryKind::Code => "≡",
        EntryKind::Other => "·",
    }
}

pub fn kind_color(kind: EntryKind) -> Color {
    match kind {
        EntryKind::Directory => Color::Blue,
        EntryKind::Executable => Color::Green,
        EntryKind::Image => Color::Magenta,
        EntryKind::Video => Color::Yellow,
        EntryKind::Code => Color::Cyan,
        EntryKind::Other => Color::Reset,
    }
}

/// Header bar and the scrolling row area.
pub fn layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn page_rect(area: Rect) -> viewport::Rect {
    let (_, list) = layout(area);
    viewport::Rect::new(list.x as i32, list.y as i32, list.width as i32, list.height as i32)
}

fn row_line(entry: &Entry) -> Line<'static> {
    let mut name_style = Style::default().fg(kind_color(entry.kind));
    if entry.is_dir {
        name_style = name_style.add_modifier(Modifier::BOLD);
    }

    Line::from(vec![
        Span::styled(format!("{} ", icon(entry.kind)), Style::default().fg(kind_color(entry.kind))),
        Span::styled(entry.permissions.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {:>width$}  ", entry.size_display, width = SIZE_WIDTH)),
        Span::styled(entry.name.clone(), name_style),
    ])
}

/// Row text for one listing, rebuilt only when a different listing is shown.
#[derive(Default)]
pub struct RowCache {
    listing: Option<Rc<Listing>>,
    rows: Vec<Line<'static>>,
}

impl RowCache {
    pub fn new() -> Self {
        RowCache::default()
    }

    pub fn rows_for(&mut self, listing: &Rc<Listing>) -> &[Line<'static>] {
        let fresh = self.listing.as_ref().map_or(false, |cached| Rc::ptr_eq(cached, listing));
        if !fresh {
            self.rows = listing.entries().iter().map(row_line).collect();
            self.listing = Some(Rc::clone(listing));
        }
        &self.rows
    }
}

#[derive(Default)]
pub struct View {
    rows: RowCache,
    /// Last navigation error, shown in the header until the next success.
    pub status: Option<String>,
}

impl View {
    pub fn new() -> Self {
        View::default()
    }

    pub fn render<O: Opener>(&mut self, f: &mut Frame, browser: &Browser<O>) {
        let (header, list) = layout(f.size());

        let path = match browser.current_path() {
            "" => "/",
            path => path,
        };
        let mut spans = vec![Span::styled(path.to_string(), Style::default().add_modifier(Modifier::BOLD))];
        if let Some(status) = &self.status {
            spans.push(Span::styled(format!("  {}", status), Style::default().fg(Color::Red)));
        }
        let title = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("dirview"));
        f.render_widget(title, header);

        let viewport = browser.viewport();
        let state = viewport.state();
        let row_height = viewport.config().row_height;
        let text_width = if state.scrollbar_enabled {
            list.width.saturating_sub(viewport.track_rect().width as u16)
        } else {
            list.width
        };

        let rows = self.rows.rows_for(browser.listing());
        for index in viewport.visible_rows() {
            let top = viewport.row_top(index);
            if top < list.y as i32 || top >= list.bottom() as i32 {
                continue;
            }
            let height = row_height.min(list.bottom() as i32 - top) as u16;
            let area = Rect::new(list.x, top as u16, text_width, height);
            if let Some(line) = rows.get(index) {
                f.render_widget(Paragraph::new(line.clone()), area);
            }
        }

        if state.scrollbar_enabled {
            draw_scrollbar(f, viewport.track_rect(), viewport.handle_rect());
        }
    }
}

fn draw_scrollbar(f: &mut Frame, track: viewport::Rect, handle: viewport::Rect) {
    let bounds = f.size();
    let buf = f.buffer_mut();

    for y in track.y..track.bottom() {
        for x in track.x..track.right() {
            if x < bounds.x as i32 || x >= bounds.right() as i32 || y < bounds.y as i32 || y >= bounds.bottom() as i32 {
                continue;
            }
            let on_handle = handle.contains(viewport::Point::new(x, y));
            let (symbol, color) = if on_handle { ("█", Color::Gray) } else { ("│", Color::DarkGray) };
            buf.get_mut(x as u16, y as u16)
                .set_symbol(symbol)
                .set_style(Style::default().fg(color));
        }
    }
}
