// src/main.rs
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::info;
use ratatui::prelude::*;

use dirview::ui::{self, print::print_listing, View};
use dirview::{list_dir, logging, Activation, Browser, Config, Point, SystemOpener};

#[derive(Debug, Parser)]
#[command(name = "dirview", about = "Minimal directory browser")]
struct Args {
    /// Directory to open; defaults to the configured start dir or $HOME
    path: Option<PathBuf>,

    /// Config file (JSON) instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the listing once and exit
    #[arg(long)]
    print: bool,
}

fn start_path(args: &Args, config: &Config) -> String {
    let path = args.path.clone().unwrap_or_else(|| config.start_dir());
    let path = std::fs::canonicalize(&path).unwrap_or(path);
    path.to_string_lossy().to_string()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print {
        logging::init_stderr().ok();
    } else {
        logging::init_file(&logging::default_log_path()).ok();
    }

    let config = Config::load(args.config.as_deref())?;
    let path = start_path(&args, &config);

    if args.print {
        let listing = list_dir(&path)?;
        print_listing(&listing, &mut io::stdout().lock())?;
        return Ok(());
    }

    run_tui(&path, &config)
}

fn run_tui(path: &str, config: &Config) -> anyhow::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let opener = SystemOpener::new(config.opener.clone());
    let mut browser = Browser::new(path, config.viewport, ui::page_rect(Rect::new(0, 0, width, height)), opener)
        .with_context(|| format!("cannot open {}", path))?;

    info!("starting in {}", path);

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = event_loop(&mut terminal, &mut browser);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, browser: &mut Browser<SystemOpener>) -> anyhow::Result<()> {
    let mut view = View::new();

    loop {
        terminal.draw(|f| view.render(f, browser))?;
        browser.opener().reap();

        let outcome = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Backspace => browser.go_up().map(|listing| Some(Activation::Entered(listing))),
                KeyCode::Char('r') | KeyCode::F(5) => browser.refresh().map(|listing| Some(Activation::Entered(listing))),
                KeyCode::Up => {
                    browser.on_wheel(1);
                    Ok(None)
                }
                KeyCode::Down => {
                    browser.on_wheel(-1);
                    Ok(None)
                }
                _ => Ok(None),
            },
            Event::Mouse(mouse) => handle_mouse(browser, mouse),
            Event::Resize(width, height) => {
                browser.resize(ui::page_rect(Rect::new(0, 0, width, height)));
                Ok(None)
            }
            _ => Ok(None),
        };

        match outcome {
            Ok(Some(Activation::Entered(_))) => view.status = None,
            Ok(Some(Activation::Opened(path))) => info!("opened {}", path.display()),
            Ok(None) => {}
            Err(err) => view.status = Some(err.to_string()),
        }
    }

    Ok(())
}

fn handle_mouse(browser: &mut Browser<SystemOpener>, mouse: MouseEvent) -> dirview::Result<Option<Activation>> {
    let pos = Point::new(mouse.column as i32, mouse.row as i32);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => browser.on_pointer_down(pos),
        MouseEventKind::Drag(MouseButton::Left) => {
            browser.on_pointer_move(pos);
            Ok(None)
        }
        MouseEventKind::Up(MouseButton::Left) => {
            browser.on_pointer_up();
            Ok(None)
        }
        MouseEventKind::ScrollUp => {
            browser.on_wheel(1);
            Ok(None)
        }
        MouseEventKind::ScrollDown => {
            browser.on_wheel(-1);
            Ok(None)
        }
        _ => Ok(None),
    }
}
