use crate::config::{self, Settings};
use crate::fetcher::{FetchTicket, GenreFetcher};
use crate::logging;
use crate::model::{Theme, TimeWindow};
use crate::source::{GenreDataSource, HttpGenreSource};
use crate::view::{GenreView, Resolution};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct AppStartupOptions {
    pub initial_window: TimeWindow,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Fetch(FetchTicket),
    Redraw,
    Ignore,
}

pub fn run_with_startup(options: AppStartupOptions) -> Result<()> {
    let settings = apply_cli_overrides(config::load_settings()?, &options);
    let log_path = logging::init(&settings.log_filter)?;
    info!(
        api = %settings.api_base_url,
        log = %log_path.display(),
        window = options.initial_window.query_value(),
        "starting tunestats"
    );

    let source = HttpGenreSource::new(
        &settings.api_base_url,
        settings.request_timeout(),
        settings.session_cookie.clone(),
    )?;
    run_with_source(Arc::new(source), options.initial_window, settings.theme)
}

pub fn apply_cli_overrides(mut settings: Settings, options: &AppStartupOptions) -> Settings {
    if let Some(url) = options
        .api_base_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    {
        settings.api_base_url = url.to_string();
    }
    settings
}

pub fn run_with_source(
    source: Arc<dyn GenreDataSource>,
    initial_window: TimeWindow,
    theme: Theme,
) -> Result<()> {
    let fetcher = GenreFetcher::new(source);
    let mut view = GenreView::new(initial_window);
    fetcher.dispatch(view.mount());

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result: Result<()> = loop {
        pump_completions(&mut view, &fetcher);

        if view.dirty {
            terminal.draw(|frame| crate::ui::draw(frame, &view, theme))?;
            view.dirty = false;
        }

        if !event::poll(Duration::from_millis(33))? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            Event::Resize(_, _) => {
                view.dirty = true;
                continue;
            }
            _ => continue,
        };

        match handle_key(&mut view, key) {
            KeyAction::Quit => break Ok(()),
            KeyAction::Fetch(ticket) => fetcher.dispatch(ticket),
            KeyAction::Redraw => view.dirty = true,
            KeyAction::Ignore => {}
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("tunestats exited");
    result
}

pub fn pump_completions(view: &mut GenreView, fetcher: &GenreFetcher) {
    while let Some(completion) = fetcher.try_recv() {
        if view.complete(completion) == Resolution::Ready {
            let status = format!("{}  (updated {})", view.status, clock_label());
            view.set_status(&status);
        }
    }
}

pub fn handle_key(view: &mut GenreView, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    let ticket = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Right | KeyCode::Char('l') => view.select_next_window(),
        KeyCode::Left | KeyCode::Char('h') => view.select_prev_window(),
        KeyCode::Char('1') => view.select_window(TimeWindow::Short),
        KeyCode::Char('2') => view.select_window(TimeWindow::Medium),
        KeyCode::Char('3') => view.select_window(TimeWindow::Long),
        KeyCode::Char('r') => Some(view.refresh()),
        KeyCode::Tab => {
            view.toggle_layout();
            return KeyAction::Redraw;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view.focus_next();
            return KeyAction::Redraw;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.focus_prev();
            return KeyAction::Redraw;
        }
        _ => return KeyAction::Ignore,
    };

    match ticket {
        Some(ticket) => KeyAction::Fetch(ticket),
        None => KeyAction::Ignore,
    }
}

fn clock_label() -> String {
    let now =
        time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
}
