use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{catalog, constants::UI_SETTINGS, domain::ReadingTracker, storage};

mod catalog_state;
mod event_handlers;
mod progress_modal_view;
mod render_views;
mod stats_modal_view;
mod ui_helpers;
mod view_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiMode {
    Main,
    ProgressModal,
    StatsModal,
}

struct App {
    tracker: ReadingTracker,
    catalog_error: Option<String>,
    ui_mode: UiMode,
    selected_index: usize,
    search_query: String,
    search_active: bool,
    modal_chapter: u32,
    modal_completed: u32,
    modal_notes: String,
    stats_selected_index: usize,
    render_needed: bool,
}

impl App {
    fn new(tracker: ReadingTracker, catalog_error: Option<String>) -> Self {
        Self {
            tracker,
            catalog_error,
            ui_mode: UiMode::Main,
            selected_index: 0,
            search_query: String::new(),
            search_active: false,
            modal_chapter: 0,
            modal_completed: 0,
            modal_notes: String::new(),
            stats_selected_index: 0,
            render_needed: true,
        }
    }

    fn in_progress_modal(&self) -> bool {
        matches!(self.ui_mode, UiMode::ProgressModal)
    }

    fn in_stats_modal(&self) -> bool {
        matches!(self.ui_mode, UiMode::StatsModal)
    }

    fn open_stats_modal(&mut self) {
        self.ui_mode = UiMode::StatsModal;
        self.stats_selected_index = 0;
        self.render_needed = true;
    }

    fn close_stats_modal(&mut self) {
        self.ui_mode = UiMode::Main;
        self.stats_selected_index = 0;
        self.render_needed = true;
    }

    fn close_progress_modal(&mut self) {
        self.ui_mode = UiMode::Main;
        self.modal_notes = String::new();
        self.render_needed = true;
    }

    fn modal_rect(&self, terminal_size: Rect) -> Rect {
        self.modal_rect_ratio(terminal_size, 1, 2)
    }

    fn modal_rect_ratio(&self, terminal_size: Rect, numerator: u16, denominator: u16) -> Rect {
        let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
        let target_height = (terminal_size.height.saturating_mul(numerator) / denominator).max(12);

        let max_width = terminal_size.width.saturating_sub(2).max(1);
        let max_height = terminal_size.height.saturating_sub(2).max(1);

        let modal_width = target_width.clamp(1, max_width);
        let modal_height = target_height.clamp(1, max_height);

        let modal_x = (terminal_size.width.saturating_sub(modal_width)) / 2;
        let modal_y = (terminal_size.height.saturating_sub(modal_height)) / 2;

        Rect::new(modal_x, modal_y, modal_width, modal_height)
    }

    fn stats_modal_rect(&self, terminal_size: Rect, entry_count: usize) -> Rect {
        let compact = self.modal_rect(terminal_size);
        let stat_rows = 6usize;
        let visible_rows = compact.height.saturating_sub(2) as usize;

        if stat_rows + entry_count > visible_rows {
            self.modal_rect_ratio(terminal_size, 2, 3)
        } else {
            compact
        }
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    let (chapters, catalog_error) = match catalog::fetch_catalog() {
        Ok(chapters) => (chapters, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };
    let tracker = ReadingTracker::new(chapters, storage::get_progress_path());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(tracker, catalog_error);

    let render_rate = Duration::from_millis(1000 / UI_SETTINGS.target_fps);
    let mut last_render = Instant::now();

    loop {
        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(Duration::from_millis(UI_SETTINGS.poll_ms))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
