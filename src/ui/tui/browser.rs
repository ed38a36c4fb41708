//! Interactive file browser: folder stack, key handling, render loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::ListState, Terminal};
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::common::config::AppConfig;
use crate::listing::{should_fetch_next, ListingEvent, ListingSession, ListingState, PageFetcher};
use crate::player;

use super::render;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// One folder screen: its listing session plus viewport state.
struct BrowseLevel {
    title: String,
    session: Arc<ListingSession>,
    list_state: ListState,
    last_error: Option<String>,
}

impl BrowseLevel {
    fn new(title: String, query: String) -> Self {
        Self {
            title,
            session: Arc::new(ListingSession::new(query)),
            list_state: ListState::default(),
            last_error: None,
        }
    }
}

pub struct FileBrowser {
    config: AppConfig,
    fetcher: PageFetcher,
    events: mpsc::UnboundedReceiver<ListingEvent>,
    levels: Vec<BrowseLevel>,
    is_scrolling: bool,
    viewport_rows: usize,
    status: Option<String>,
}

impl FileBrowser {
    pub fn new(
        config: AppConfig,
        fetcher: PageFetcher,
        events: mpsc::UnboundedReceiver<ListingEvent>,
        title: String,
        query: String,
    ) -> Self {
        Self {
            config,
            fetcher,
            events,
            levels: vec![BrowseLevel::new(title, query)],
            is_scrolling: false,
            viewport_rows: 20,
            status: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Throttle rendering to roughly 20 FPS
        let mut render_tick = interval(Duration::from_millis(50));
        render_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to initialize terminal")?;

        // First page for the root level
        if let Some(level) = self.levels.last() {
            self.spawn_fetch(level.session.clone());
        }

        let result = self.event_loop(&mut terminal, &mut render_tick).await;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui, render_tick: &mut Interval) -> Result<()> {
        loop {
            tokio::select! {
                _ = render_tick.tick() => {
                    self.draw(terminal)?;
                    // Non-blocking poll keeps input responsive inside async
                    if self.poll_keys()? {
                        break;
                    }
                }
                Some(event) = self.events.recv() => {
                    self.on_listing_event(event);
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        let show_sizes = self.config.tui.show_sizes;
        let status = self.status.clone();

        let Some(level) = self.levels.last_mut() else {
            return Ok(());
        };

        let entries = level.session.snapshot();
        let in_flight = level.session.in_flight();
        let view = render::classify_view(
            level.session.has_loaded_once(),
            level.session.has_failed(),
            in_flight,
            level.last_error.as_deref(),
            entries.len(),
        );
        let rows = render::build_file_rows(&entries, show_sizes);
        let title = level.title.clone();

        terminal.draw(|frame| {
            render::render_browser(
                frame,
                &title,
                &view,
                &rows,
                in_flight,
                &mut level.list_state,
                status.as_deref(),
            );
        })?;

        // Borders, plus the status bar when present
        let chrome = 2 + if status.is_some() { 3 } else { 0 };
        let size = terminal.size()?;
        self.viewport_rows = (size.height as usize).saturating_sub(chrome).max(1);

        Ok(())
    }

    fn poll_keys(&mut self) -> Result<bool> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                // Any keypress dismisses a transient status message
                self.status = None;

                match key.code {
                    KeyCode::Char('q') => return Ok(true),
                    KeyCode::Esc => {
                        if !self.pop_level() {
                            return Ok(true);
                        }
                    }
                    KeyCode::Up => self.move_selection(-1),
                    KeyCode::Down => self.move_selection(1),
                    KeyCode::PageUp => self.move_selection(-(self.viewport_rows as isize)),
                    KeyCode::PageDown => self.move_selection(self.viewport_rows as isize),
                    KeyCode::Home => self.jump_selection(0),
                    KeyCode::End => self.jump_to_end(),
                    KeyCode::Enter => self.open_selected(),
                    KeyCode::Backspace | KeyCode::Left => {
                        self.pop_level();
                    }
                    KeyCode::Char('r') => self.retry(),
                    _ => {}
                }
            }
        }
        Ok(false)
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(level) = self.levels.last_mut() else {
            return;
        };
        let total = level.session.len();
        if total == 0 {
            return;
        }

        let current = level.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, total as isize - 1) as usize;
        level.list_state.select(Some(next));

        // Key navigation is the drag gesture of a terminal list
        self.is_scrolling = true;
        self.maybe_fetch_next();
    }

    fn jump_selection(&mut self, index: usize) {
        let Some(level) = self.levels.last_mut() else {
            return;
        };
        let total = level.session.len();
        if total == 0 {
            return;
        }
        level.list_state.select(Some(index.min(total - 1)));

        self.is_scrolling = true;
        self.maybe_fetch_next();
    }

    fn jump_to_end(&mut self) {
        let total = self.levels.last().map(|l| l.session.len()).unwrap_or(0);
        if total > 0 {
            self.jump_selection(total - 1);
        }
    }

    /// Evaluates the infinite-scroll trigger against the current viewport.
    fn maybe_fetch_next(&mut self) {
        let Some(level) = self.levels.last() else {
            return;
        };
        let session = level.session.clone();
        let fire = should_fetch_next(
            level.list_state.offset(),
            self.viewport_rows,
            session.len(),
            self.is_scrolling,
            session.is_last_page(),
            session.in_flight(),
        );

        if fire {
            debug!("Paginating (query: '{}')", session.query());
            self.spawn_fetch(session);
            self.is_scrolling = false;
        }
    }

    fn spawn_fetch(&self, session: Arc<ListingSession>) {
        let fetcher = self.fetcher.clone();
        tokio::spawn(async move {
            fetcher.fetch(&session).await;
        });
    }

    fn open_selected(&mut self) {
        let Some(level) = self.levels.last() else {
            return;
        };
        let Some(selected) = level.list_state.selected() else {
            return;
        };
        // The trailing "Loading more..." row is not a real entry
        let Some(file) = level.session.entry(selected) else {
            return;
        };

        if file.is_folder() && !file.is_shortcut() {
            info!("Opening folder '{}'", file.name);
            let next = BrowseLevel::new(file.name.clone(), file.children_query());
            let session = next.session.clone();
            self.levels.push(next);
            self.spawn_fetch(session);
        } else if file.is_video_file() {
            match player::launch(&self.config, &file.id, &file.name) {
                Ok(_child) => {
                    self.status = Some(format!("Playing '{}'", file.name));
                }
                Err(err) => {
                    warn!("Playback handoff failed: {:#}", err);
                    self.status = Some(format!("{:#}", err));
                }
            }
        }
    }

    /// Pops the current folder. Returns false at the root.
    fn pop_level(&mut self) -> bool {
        if self.levels.len() <= 1 {
            return false;
        }
        // Dropping the level abandons its session; a late response only
        // ever mutates the dead session and its event id matches nothing.
        self.levels.pop();
        true
    }

    fn retry(&mut self) {
        let Some(level) = self.levels.last() else {
            return;
        };
        if level.session.has_failed() && !level.session.in_flight() {
            info!("Retrying fetch (query: '{}')", level.session.query());
            self.spawn_fetch(level.session.clone());
        }
    }

    fn on_listing_event(&mut self, event: ListingEvent) {
        let Some(level) = self
            .levels
            .iter_mut()
            .find(|level| level.session.id() == event.session)
        else {
            debug!("Dropping state for abandoned session {}", event.session);
            return;
        };

        let status = match event.state {
            ListingState::Loading => None,
            ListingState::Success(entries) => {
                level.last_error = None;
                if level.list_state.selected().is_none() && !entries.is_empty() {
                    level.list_state.select(Some(0));
                }
                None
            }
            ListingState::Error(message) => {
                level.last_error = Some(message.clone());
                Some(message)
            }
        };

        if let Some(message) = status {
            // Snackbar analog: the error also lands on the status line
            self.status = Some(message);
        }
    }
}
