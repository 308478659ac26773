//! TUI rendering and event handling (impure shell).
//!
//! [`TuiApp`] owns the terminal and the pagination controller. Fetches run on
//! a tokio runtime and report back through a channel that the event loop
//! drains every tick, so the UI never blocks on the network.

pub mod constants;
mod gallery;
mod help;
mod layout;
mod lightbox;
mod search_input;
mod status_bar;
mod styles;
mod toast;

pub use gallery::{Footer, GalleryView};
pub use layout::AppLayout;
pub use search_input::{SearchInput, SearchInputState};
pub use status_bar::StatusBar;

use crate::client::{ClientError, ImageSearchClient, PixabayClient};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::gallery::{Gallery, Lightbox, LightboxConfig};
use crate::model::{FetchResult, KeyAction, SearchFailed};
use crate::notify::ToastQueue;
use crate::pagination::{
    LoadMoreMode, LoadMoreTrigger, PaginationController, PendingFetch, RowSpan,
    VisibilityObserver, intersection_ratio,
};
use constants::MOUSE_SCROLL_ROWS;
use crossterm::{
    ExecutableCommand,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

/// Event poll timeout. Bounds how long a finished fetch or an expired toast
/// waits before the screen catches up.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The search client could not be created
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Gallery type driven by the terminal UI.
pub type TerminalGallery = Gallery<Lightbox>;

/// A finished fetch travelling back from the runtime.
type FetchOutcome = (PendingFetch, Result<FetchResult, SearchFailed>);

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// client so tests can script responses.
pub struct TuiApp<B, C>
where
    B: Backend,
    C: ImageSearchClient + 'static,
{
    terminal: Terminal<B>,
    controller: PaginationController<TerminalGallery, ToastQueue>,
    client: Arc<C>,
    runtime: Handle,
    completions_tx: UnboundedSender<FetchOutcome>,
    completions_rx: UnboundedReceiver<FetchOutcome>,
    toasts: ToastQueue,
    search: SearchInputState,
    key_bindings: KeyBindings,
    help_visible: bool,
    /// Rows of the gallery viewport at the last draw
    viewport_rows: usize,
    /// Screen area of the load-more control at the last draw (for clicks)
    last_trigger_area: Option<Rect>,
}

impl<C> TuiApp<CrosstermBackend<Stdout>, C>
where
    C: ImageSearchClient + 'static,
{
    /// Create the application on the real terminal
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        client: Arc<C>,
        runtime: Handle,
        config: &ResolvedConfig,
        toasts: ToastQueue,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let terminal = setup_or_restore(
            || {
                let mut stdout = io::stdout();
                stdout.execute(EnterAlternateScreen)?;
                stdout.execute(event::EnableMouseCapture)?;
                Ok(Terminal::new(CrosstermBackend::new(stdout))?)
            },
            restore_terminal,
        )?;

        Ok(Self::with_terminal(terminal, client, runtime, config, toasts))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        loop {
            self.drain_completions();
            self.draw()?;

            if !event::poll(TICK_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                // Layout is recomputed on every draw.
                _ => {}
            }
        }
    }
}

impl<B, C> TuiApp<B, C>
where
    B: Backend,
    C: ImageSearchClient + 'static,
{
    /// Create the application on an already initialized terminal
    pub fn with_terminal(
        terminal: Terminal<B>,
        client: Arc<C>,
        runtime: Handle,
        config: &ResolvedConfig,
        toasts: ToastQueue,
    ) -> Self {
        let trigger = match config.load_more {
            LoadMoreMode::Button => LoadMoreTrigger::Manual,
            LoadMoreMode::Auto => LoadMoreTrigger::Auto(VisibilityObserver::new(
                config.visibility_threshold,
                config.root_margin,
            )),
        };
        let lightbox = Lightbox::new(LightboxConfig {
            caption_delay: config.caption_delay,
            ..LightboxConfig::default()
        });
        let controller =
            PaginationController::new(Gallery::new(lightbox), toasts.clone(), config.page_size, trigger);
        let (completions_tx, completions_rx) = unbounded_channel();

        Self {
            terminal,
            controller,
            client,
            runtime,
            completions_tx,
            completions_rx,
            toasts,
            search: SearchInputState::default(),
            key_bindings: KeyBindings::default(),
            help_visible: false,
            viewport_rows: 0,
            last_trigger_area: None,
        }
    }

    /// The pagination controller driving the gallery.
    pub fn controller(&self) -> &PaginationController<TerminalGallery, ToastQueue> {
        &self.controller
    }

    /// Put `query` in the search box and submit it.
    pub fn submit_query(&mut self, query: &str) {
        self.search = SearchInputState::new(query);
        self.submit();
    }

    fn submit(&mut self) {
        let text = self.search.text().to_string();
        match self.controller.start_search(&text) {
            Some(fetch) => {
                self.search.blur();
                self.dispatch(fetch);
            }
            None => debug!("Empty query, keeping search box focused"),
        }
    }

    /// Run `fetch` on the runtime and post the outcome back to the loop.
    fn dispatch(&self, fetch: PendingFetch) {
        debug!(page = fetch.page(), query = %fetch.query(), "Dispatching fetch");
        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch.run(&*client).await;
            post_completion(&tx, (fetch, result));
        });
    }

    /// Apply every fetch that finished since the last tick.
    fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((fetch, result)) = self.completions_rx.try_recv() {
            self.controller.complete(&fetch, result);
            applied += 1;
        }
        applied
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.search.is_focused() {
            self.handle_search_key(key);
            return false;
        }

        if self.help_visible {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.help_visible = false;
            }
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        if self.controller.gallery().overlay().is_open() {
            return self.handle_overlay_action(action);
        }

        let page = self.viewport_rows.max(1);
        let gallery = self.controller.gallery_mut();
        match action {
            KeyAction::ScrollDown => gallery.scroll_down(1),
            KeyAction::ScrollUp => gallery.scroll_up(1),
            KeyAction::PageDown => gallery.scroll_down(page),
            KeyAction::PageUp => gallery.scroll_up(page),
            KeyAction::ScrollToTop => gallery.scroll_to_top(),
            KeyAction::ScrollToBottom => gallery.scroll_to_bottom(),
            KeyAction::OpenOverlay => {
                if let Some(index) = gallery.first_visible_entry() {
                    gallery.overlay_mut().open(index, Instant::now());
                }
            }
            KeyAction::LoadMore => self.activate_load_more(),
            KeyAction::FocusSearch => self.search.focus(),
            KeyAction::Help => self.help_visible = true,
            KeyAction::Quit => return true,
            KeyAction::CloseOverlay | KeyAction::NextImage | KeyAction::PrevImage => {}
        }
        false
    }

    fn handle_overlay_action(&mut self, action: KeyAction) -> bool {
        let overlay = self.controller.gallery_mut().overlay_mut();
        match action {
            KeyAction::CloseOverlay => overlay.close(),
            KeyAction::NextImage => overlay.next(Instant::now()),
            KeyAction::PrevImage => overlay.prev(Instant::now()),
            KeyAction::Quit => return true,
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.search.blur(),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.clear()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert(c)
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.controller.gallery_mut().scroll_down(MOUSE_SCROLL_ROWS),
            MouseEventKind::ScrollUp => self.controller.gallery_mut().scroll_up(MOUSE_SCROLL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(mouse.column, mouse.row);
                if self
                    .last_trigger_area
                    .is_some_and(|area| area.contains(position))
                {
                    self.activate_load_more();
                }
            }
            _ => {}
        }
    }

    fn activate_load_more(&mut self) {
        if let Some(fetch) = self.controller.activate_trigger() {
            self.dispatch(fetch);
        }
    }

    /// Render the current frame
    ///
    /// Resolves the pending gallery scroll against the current viewport and
    /// feeds the load-more control's visibility to the automatic trigger
    /// before drawing.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let layout = AppLayout::new(Rect::new(0, 0, size.width.max(1), size.height));
        let inner = layout.gallery_inner();
        let viewport_rows = usize::from(inner.height);
        self.viewport_rows = viewport_rows;

        let footer = self.footer();
        let footer_rows = Footer::rows(footer);
        let content_rows = self.controller.gallery().content_rows();
        let offset = self
            .controller
            .gallery_mut()
            .resolve_scroll(viewport_rows, content_rows + footer_rows);

        self.last_trigger_area = None;
        if footer_rows > 0 {
            let target = RowSpan::new(content_rows, footer_rows);
            let viewport = RowSpan::new(offset, viewport_rows);
            self.last_trigger_area = visible_rows_area(target, viewport, inner);
            self.sample_trigger(target, viewport);
        }

        let now = Instant::now();
        let toasts = self.toasts.visible(now);
        let controller = &self.controller;
        let search = &self.search;
        let help_visible = self.help_visible;
        // Sampling may have started a fetch; show the loading footer at once.
        let footer = Footer::from_state(
            controller.state(),
            controller.trigger_visible(),
            controller.trigger().mode(),
        );

        self.terminal.draw(|frame| {
            let gallery = controller.gallery();
            frame.render_widget(SearchInput::new(search), layout.search);
            frame.render_widget(
                GalleryView::new(gallery.entries(), offset, controller.state())
                    .footer(footer)
                    .selected(gallery.first_visible_entry()),
                layout.gallery,
            );
            frame.render_widget(
                StatusBar {
                    query: controller.query().map(|q| q.as_str()),
                    shown: gallery.len(),
                    total: controller.total_available(),
                    page: controller.current_page(),
                    state: controller.state(),
                    mode: controller.trigger().mode(),
                },
                layout.status,
            );
            lightbox::render_lightbox(frame, gallery.overlay(), now);
            if help_visible {
                help::render_help_overlay(frame);
            }
            toast::render_toasts(frame, layout.gallery, &toasts);
        })?;

        Ok(())
    }

    fn footer(&self) -> Option<Footer> {
        Footer::from_state(
            self.controller.state(),
            self.controller.trigger_visible(),
            self.controller.trigger().mode(),
        )
    }

    fn sample_trigger(&mut self, target: RowSpan, viewport: RowSpan) {
        let Some(margin) = self.controller.trigger().observer().map(|o| o.root_margin()) else {
            return;
        };
        let ratio = intersection_ratio(target, viewport, margin);
        if let Some(fetch) = self.controller.observe_trigger(ratio) {
            info!(ratio, "Load-more control scrolled into view");
            self.dispatch(fetch);
        }
    }
}

/// Send a finished fetch back to the event loop.
///
/// Returns false when the loop is gone, which only happens during shutdown.
fn post_completion(tx: &UnboundedSender<FetchOutcome>, outcome: FetchOutcome) -> bool {
    match tx.send(outcome) {
        Ok(()) => true,
        Err(returned) => {
            let (fetch, _) = returned.0;
            debug!(
                session = fetch.session().get(),
                page = fetch.page(),
                "Dropping fetch result after event loop exit"
            );
            false
        }
    }
}

/// Run terminal `setup`, calling `restore` if it fails part way.
///
/// Raw mode is already on when setup runs, so a failure must not leave the
/// terminal in it.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T, TuiError>,
    restore: impl FnOnce() -> Result<(), TuiError>,
) -> Result<T, TuiError> {
    setup().inspect_err(|err| {
        warn!(error = %err, "Terminal setup failed, restoring");
        if let Err(restore_err) = restore() {
            warn!(error = %restore_err, "Failed to restore terminal");
        }
    })
}

/// Screen rect of the part of `target` inside `viewport`, drawn in `inner`.
fn visible_rows_area(target: RowSpan, viewport: RowSpan, inner: Rect) -> Option<Rect> {
    let start = target.start.max(viewport.start);
    let end = target.end().min(viewport.end());
    if start >= end {
        return None;
    }
    let y = inner.y + u16::try_from(start - viewport.start).ok()?;
    let height = u16::try_from(end - start).ok()?;
    Some(Rect::new(inner.x, y, inner.width, height))
}

/// Initialize and run the TUI application
///
/// Builds the runtime and the HTTP client, runs the event loop and restores
/// the terminal on exit. Logging must be initialized by the caller.
pub fn run_with_config(
    config: &ResolvedConfig,
    initial_query: Option<String>,
) -> Result<(), TuiError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let toasts = ToastQueue::new(config.toast_timeout);
    let client = PixabayClient::new(
        &config.endpoint,
        config.api_key.clone().unwrap_or_default(),
        Arc::new(toasts.clone()),
    )?;

    let mut app = TuiApp::new(Arc::new(client), runtime.handle().clone(), config, toasts)?;
    if let Some(query) = initial_query {
        app.submit_query(&query);
    }

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    restore_terminal()?;

    drop(app);
    runtime.shutdown_background();
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
