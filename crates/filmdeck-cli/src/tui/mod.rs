//! Terminal movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Key presses, fetch results
//! and a redraw tick are multiplexed with `tokio::select!` on a single task.

mod debounce;
mod fetch;
/// Browser routes.
pub mod route;
/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use filmdeck_api::tmdb::TmdbApi;
use filmdeck_store::FavoritesStore;
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::fetch::{Fetcher, HomeRowKind, Requests, Slot};
use self::route::Route;
use self::state::{AppState, Effect, InputMode};
use crate::messages::Messages;

/// Redraw and debounce polling interval.
const TICK: Duration = Duration::from_millis(50);

/// Browser settings derived from config.
#[derive(Debug)]
pub struct BrowserSettings {
    /// TMDB response language.
    pub language: String,
    /// Region filter for list endpoints.
    pub region: Option<String>,
    /// Search debounce interval.
    pub debounce: Duration,
    /// Message table for the active locale.
    pub messages: &'static Messages,
}

/// Runs the browser TUI starting at `route`.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<C>(
    client: Arc<C>,
    favorites: FavoritesStore,
    settings: BrowserSettings,
    route: Route,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let requests = Requests::new(client, settings.language, settings.region);
    let mut state = AppState::new(route, favorites, settings.messages, settings.debounce);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &requests).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    requests: &Requests<C>,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let (mut fetcher, mut outcomes) = Fetcher::new();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    let initial = state.enter_route();
    run_effects(initial, requests, &mut fetcher);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        let effects = tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(state, key, Instant::now())
                }
                Some(Ok(_)) => Vec::new(),
                Some(Err(e)) => return Err(e).context("failed to read event"),
                None => return Ok(()),
            },
            Some(outcome) = outcomes.recv() => {
                if fetcher.accept(&outcome) {
                    state.apply(outcome);
                }
                Vec::new()
            }
            _ = ticker.tick() => state.tick(Instant::now()),
        };

        if run_effects(effects, requests, &mut fetcher) {
            return Ok(());
        }
    }
}

/// Executes effects. Returns `true` to exit.
fn run_effects<C>(effects: Vec<Effect>, requests: &Requests<C>, fetcher: &mut Fetcher) -> bool
where
    C: TmdbApi + Send + Sync + 'static,
{
    for effect in effects {
        match effect {
            Effect::LoadHome => {
                for kind in HomeRowKind::ALL {
                    fetcher.spawn(Slot::HomeRow(kind), requests.home_row(kind));
                }
            }
            Effect::LoadMovie(id) => {
                for slot in Slot::MOVIE {
                    fetcher.spawn(slot, requests.movie(slot, id));
                }
            }
            Effect::Search(query) => {
                fetcher.spawn(Slot::Search, requests.search(query));
            }
            Effect::CancelSearch => fetcher.cancel(Slot::Search),
            Effect::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%url, error = %e, "Failed to open browser");
                }
            }
            Effect::Quit => return true,
        }
    }
    false
}

/// Dispatches a key press to the handler for the current mode.
fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Vec<Effect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![Effect::Quit];
    }

    if state.favorites_view.confirm_clear {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => state.confirm_clear(true),
            _ => state.confirm_clear(false),
        }
        return Vec::new();
    }

    let on_favorites = matches!(state.route(), Route::Favorites);
    match state.input_mode {
        InputMode::Editing if on_favorites => {
            handle_filter_input(state, key.code);
            Vec::new()
        }
        InputMode::Editing => handle_search_input(state, key.code, now),
        InputMode::Normal => handle_normal_input(state, key.code),
    }
}

/// Handles key input in the search box.
fn handle_search_input(state: &mut AppState, key: KeyCode, now: Instant) -> Vec<Effect> {
    match key {
        KeyCode::Esc | KeyCode::Down => state.input_mode = InputMode::Normal,
        KeyCode::Enter => return state.search_submit(),
        KeyCode::Backspace => state.search_pop(now),
        KeyCode::Char(c) => state.search_push(c, now),
        _ => {}
    }
    Vec::new()
}

/// Handles key input in the favorites filter.
fn handle_filter_input(state: &mut AppState, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            state.filter_clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter | KeyCode::Down => state.input_mode = InputMode::Normal,
        KeyCode::Backspace => state.filter_pop(),
        KeyCode::Char(c) => state.filter_push(c),
        _ => {}
    }
}

/// Handles key input in normal mode.
fn handle_normal_input(state: &mut AppState, key: KeyCode) -> Vec<Effect> {
    match key {
        KeyCode::Char('q') => return vec![Effect::Quit],
        KeyCode::Esc | KeyCode::Backspace => return state.back(),
        KeyCode::Char('g') => return state.navigate(Route::Home),
        KeyCode::Char('v') => return state.navigate(Route::Favorites),
        KeyCode::Char('s') => {
            let route = Route::Search(state.search.query.clone());
            let effects = state.navigate(route);
            state.input_mode = InputMode::Editing;
            return effects;
        }
        KeyCode::Char('/') => {
            if matches!(state.route(), Route::Search(_) | Route::Favorites) {
                state.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('r') => return state.reload(),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Left | KeyCode::Char('h') => state.move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.move_right(),
        KeyCode::Enter => return state.open_selected(),
        KeyCode::Char('f') => state.toggle_selected_favorite(),
        KeyCode::Char('o') => {
            if let Some(url) = state.external_url() {
                return vec![Effect::OpenUrl(url)];
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => state.remove_selected_favorite(),
        KeyCode::Char('c') => {
            if matches!(state.route(), Route::Favorites) {
                state.request_clear();
            }
        }
        _ => {}
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::messages::Locale;

    fn make_state(route: Route) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::open(&dir.path().join("favorites.json")).unwrap();
        let state = AppState::new(
            route,
            store,
            Locale::En.messages(),
            Duration::from_millis(500),
        );
        (dir, state)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        let now = Instant::now();

        // Act & Assert
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('q')), now),
            vec![Effect::Quit]
        );
        assert_eq!(
            handle_key(
                &mut state,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                now
            ),
            vec![Effect::Quit]
        );
    }

    #[test]
    fn test_typing_q_in_search_box_does_not_quit() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Home);
        state.enter_route();
        let now = Instant::now();

        // Act
        handle_key(&mut state, press(KeyCode::Char('s')), now);
        let effects = handle_key(&mut state, press(KeyCode::Char('q')), now);

        // Assert
        assert!(effects.is_empty());
        assert_eq!(state.search.input, "q");
        assert_eq!(state.route(), &Route::Search(None));
    }

    #[test]
    fn test_search_enter_submits_immediately() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(None));
        state.enter_route();
        let now = Instant::now();
        for c in "alien".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)), now);
        }

        // Act
        let effects = handle_key(&mut state, press(KeyCode::Enter), now);

        // Assert
        assert_eq!(effects, vec![Effect::Search(String::from("alien"))]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.tick(now + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_back_navigation() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Home);
        state.enter_route();
        let now = Instant::now();

        // Act
        handle_key(&mut state, press(KeyCode::Char('v')), now);
        let on_favorites = state.route().clone();
        handle_key(&mut state, press(KeyCode::Esc), now);

        // Assert
        assert_eq!(on_favorites, Route::Favorites);
        assert_eq!(state.route(), &Route::Home);
    }

    #[test]
    fn test_clear_confirmation_flow() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        state
            .favorites
            .add(filmdeck_store::FavoriteEntry {
                id: 550,
                title: String::from("Fight Club"),
                poster_path: None,
                vote_average: 8.4,
                release_date: None,
            })
            .unwrap();
        state.enter_route();
        let now = Instant::now();

        // Act
        handle_key(&mut state, press(KeyCode::Char('c')), now);
        handle_key(&mut state, press(KeyCode::Char('n')), now);
        let kept = state.favorites.len();
        handle_key(&mut state, press(KeyCode::Char('c')), now);
        handle_key(&mut state, press(KeyCode::Char('y')), now);

        // Assert
        assert_eq!(kept, 1);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_filter_mode_captures_keys() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        state.enter_route();
        let now = Instant::now();

        // Act
        handle_key(&mut state, press(KeyCode::Char('/')), now);
        handle_key(&mut state, press(KeyCode::Char('g')), now);
        let mode = state.input_mode;
        handle_key(&mut state, press(KeyCode::Esc), now);

        // Assert
        assert_eq!(mode, InputMode::Editing);
        assert_eq!(state.route(), &Route::Favorites);
        assert!(state.favorites_view.filter.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }
}
