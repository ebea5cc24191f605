//! Browser TUI state management.

use std::time::{Duration, Instant};

use filmdeck_api::tmdb::{
    ImageSize, TmdbCredits, TmdbMovieDetails, TmdbMovieListResponse, TmdbMovieSummary,
    TmdbReviewsResponse, TmdbVideosResponse, image_url, youtube_url,
};
use filmdeck_store::{FavoriteEntry, FavoritesStore};
use ratatui::widgets::TableState;
use unicode_normalization::UnicodeNormalization;

use super::debounce::Debouncer;
use super::fetch::{FetchFailure, FetchOutcome, HomeRowKind, Payload, Slot};
use super::route::{Route, Router};
use crate::messages::Messages;
use crate::view::{entry_from_details, entry_from_summary};

/// Remote data as seen by a view.
#[derive(Debug)]
pub enum Loadable<T> {
    /// Not requested.
    Idle,
    /// Request in flight.
    Loading,
    /// Response received.
    Loaded(T),
    /// Request failed.
    Failed(FetchFailure),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Loadable<T> {
    /// Returns the loaded value, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` while the request is in flight.
    #[cfg(test)]
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn from_result<P>(
        result: Result<P, FetchFailure>,
        extract: impl FnOnce(P) -> Option<T>,
    ) -> Option<Self> {
        match result {
            Ok(payload) => extract(payload).map(Self::Loaded),
            Err(failure) => Some(Self::Failed(failure)),
        }
    }
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Typing into the search box or the favorites filter.
    Editing,
}

/// Side effects requested by state transitions, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch all home rows.
    LoadHome,
    /// Fetch details and extras for a movie.
    LoadMovie(u64),
    /// Fetch search results.
    Search(String),
    /// Abort the in-flight search.
    CancelSearch,
    /// Open a URL in the system browser.
    OpenUrl(String),
    /// Leave the browser.
    Quit,
}

/// One home row.
#[derive(Debug)]
pub struct HomeRow {
    /// Which list this row shows.
    pub kind: HomeRowKind,
    /// Row contents.
    pub movies: Loadable<Vec<TmdbMovieSummary>>,
    /// Selected card within the row.
    pub cursor: usize,
}

/// Home view state.
#[derive(Debug)]
pub struct HomeState {
    /// Rows in display order.
    pub rows: Vec<HomeRow>,
    /// Selected row.
    pub row_cursor: usize,
    requested: bool,
}

impl HomeState {
    fn new() -> Self {
        Self {
            rows: HomeRowKind::ALL
                .into_iter()
                .map(|kind| HomeRow {
                    kind,
                    movies: Loadable::Idle,
                    cursor: 0,
                })
                .collect(),
            row_cursor: 0,
            requested: false,
        }
    }

    /// Row of the given kind.
    #[must_use]
    pub fn row(&self, kind: HomeRowKind) -> Option<&HomeRow> {
        self.rows.iter().find(|r| r.kind == kind)
    }

    /// Currently selected movie.
    #[must_use]
    pub fn selected(&self) -> Option<&TmdbMovieSummary> {
        let row = self.rows.get(self.row_cursor)?;
        row.movies.loaded()?.get(row.cursor)
    }

    fn row_mut(&mut self, kind: HomeRowKind) -> Option<&mut HomeRow> {
        self.rows.iter_mut().find(|r| r.kind == kind)
    }
}

/// Search view state.
#[derive(Debug)]
pub struct SearchState {
    /// Text in the search box.
    pub input: String,
    /// Last query sent to the API.
    pub query: Option<String>,
    /// Results for `query`.
    pub results: Loadable<TmdbMovieListResponse>,
    /// Result list selection.
    pub table_state: TableState,
    debouncer: Debouncer,
}

impl SearchState {
    /// Currently selected result.
    #[must_use]
    pub fn selected(&self) -> Option<&TmdbMovieSummary> {
        let results = self.results.loaded()?;
        results.results.get(self.table_state.selected()?)
    }
}

/// Movie detail view state.
#[derive(Debug, Default)]
pub struct DetailState {
    /// Movie being shown.
    pub movie_id: Option<u64>,
    /// Core details.
    pub details: Loadable<Box<TmdbMovieDetails>>,
    /// Cast and crew.
    pub credits: Loadable<TmdbCredits>,
    /// Reviews.
    pub reviews: Loadable<TmdbReviewsResponse>,
    /// Similar movies.
    pub similar: Loadable<Vec<TmdbMovieSummary>>,
    /// Videos.
    pub videos: Loadable<TmdbVideosResponse>,
    /// Similar list selection.
    pub similar_state: TableState,
}

impl DetailState {
    fn loading(movie_id: u64) -> Self {
        Self {
            movie_id: Some(movie_id),
            details: Loadable::Loading,
            credits: Loadable::Loading,
            reviews: Loadable::Loading,
            similar: Loadable::Loading,
            videos: Loadable::Loading,
            similar_state: TableState::default(),
        }
    }

    /// Currently selected similar movie.
    #[must_use]
    pub fn selected_similar(&self) -> Option<&TmdbMovieSummary> {
        self.similar.loaded()?.get(self.similar_state.selected()?)
    }
}

/// Favorites view state.
#[derive(Debug, Default)]
pub struct FavoritesViewState {
    /// List selection (index into the filtered list).
    pub table_state: TableState,
    /// Filter text.
    pub filter: String,
    /// Waiting for clear-all confirmation.
    pub confirm_clear: bool,
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AppState {
    /// Route and history.
    pub router: Router,
    /// Message table for the active locale.
    pub messages: &'static Messages,
    /// Persistent favorites.
    pub favorites: FavoritesStore,
    /// Home view.
    pub home: HomeState,
    /// Search view.
    pub search: SearchState,
    /// Movie detail view.
    pub detail: DetailState,
    /// Favorites view.
    pub favorites_view: FavoritesViewState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// One-line status message.
    pub status: Option<String>,
}

impl AppState {
    /// Creates a new state positioned at `route`. Call [`Self::enter_route`]
    /// to obtain the initial effects.
    #[must_use]
    pub fn new(
        route: Route,
        favorites: FavoritesStore,
        messages: &'static Messages,
        debounce: Duration,
    ) -> Self {
        Self {
            router: Router::new(route),
            messages,
            favorites,
            home: HomeState::new(),
            search: SearchState {
                input: String::new(),
                query: None,
                results: Loadable::Idle,
                table_state: TableState::default(),
                debouncer: Debouncer::new(debounce),
            },
            detail: DetailState::default(),
            favorites_view: FavoritesViewState::default(),
            input_mode: InputMode::Normal,
            status: None,
        }
    }

    /// The current route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        self.router.current()
    }

    // ---- navigation ------------------------------------------------------

    /// Navigates to `route`, pushing the current route onto the back-stack.
    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        self.router.push(route);
        self.enter_route()
    }

    /// Goes back one route. Does nothing at the bottom of the stack.
    pub fn back(&mut self) -> Vec<Effect> {
        if self.router.back() {
            self.enter_route()
        } else {
            Vec::new()
        }
    }

    /// Prepares the view for the current route and returns the fetches it needs.
    pub fn enter_route(&mut self) -> Vec<Effect> {
        self.input_mode = InputMode::Normal;
        self.status = None;
        self.favorites_view.confirm_clear = false;

        let route = self.router.current().clone();
        if !matches!(route, Route::Search(_)) {
            self.search.debouncer.cancel();
        }

        match route {
            Route::Home => {
                if self.home.requested {
                    return Vec::new();
                }
                self.home.requested = true;
                for row in &mut self.home.rows {
                    row.movies = Loadable::Loading;
                    row.cursor = 0;
                }
                vec![Effect::LoadHome]
            }
            Route::Movie(id) => {
                let failed = matches!(self.detail.details, Loadable::Failed(_));
                if self.detail.movie_id == Some(id) && !failed {
                    return Vec::new();
                }
                self.detail = DetailState::loading(id);
                vec![Effect::LoadMovie(id)]
            }
            Route::Search(Some(query)) => {
                if self.search.query.as_deref() == Some(query.as_str()) {
                    return Vec::new();
                }
                self.search.input.clone_from(&query);
                self.search.debouncer.cancel();
                self.commit_search(query)
            }
            Route::Search(None) => {
                self.input_mode = InputMode::Editing;
                Vec::new()
            }
            Route::Favorites => {
                self.clamp_favorites_cursor();
                Vec::new()
            }
        }
    }

    /// Re-fetches the data behind the current route.
    pub fn reload(&mut self) -> Vec<Effect> {
        match self.router.current().clone() {
            Route::Home => {
                self.home.requested = false;
                self.enter_route()
            }
            Route::Movie(_) => {
                self.detail.movie_id = None;
                self.enter_route()
            }
            Route::Search(_) => match self.search.query.clone() {
                Some(query) => self.commit_search(query),
                None => Vec::new(),
            },
            Route::Favorites => Vec::new(),
        }
    }

    // ---- search ------------------------------------------------------------

    /// Appends a character to the search box.
    pub fn search_push(&mut self, ch: char, now: Instant) {
        self.search.input.push(ch);
        self.search.debouncer.input(self.search.input.clone(), now);
    }

    /// Removes the last character from the search box.
    pub fn search_pop(&mut self, now: Instant) {
        self.search.input.pop();
        self.search.debouncer.input(self.search.input.clone(), now);
    }

    /// Sends the search box contents immediately, skipping the debounce wait.
    pub fn search_submit(&mut self) -> Vec<Effect> {
        self.search.debouncer.cancel();
        self.input_mode = InputMode::Normal;
        let input = self.search.input.clone();
        self.commit_search(input)
    }

    /// Fires the debounced search once the input has settled.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        match self.search.debouncer.poll(now) {
            Some(value) => self.commit_search(value),
            None => Vec::new(),
        }
    }

    fn commit_search(&mut self, value: String) -> Vec<Effect> {
        let on_search = matches!(self.router.current(), Route::Search(_));
        let query = value.trim();

        if query.is_empty() {
            self.search.query = None;
            self.search.results = Loadable::Idle;
            self.search.table_state.select(None);
            if on_search {
                self.router.replace(Route::Search(None));
            }
            return vec![Effect::CancelSearch];
        }

        let query = String::from(query);
        self.search.query = Some(query.clone());
        self.search.results = Loadable::Loading;
        self.search.table_state.select(None);
        if on_search {
            self.router.replace(Route::Search(Some(query.clone())));
        }
        tracing::debug!(%query, "Search committed");
        vec![Effect::Search(query)]
    }

    // ---- fetch results -----------------------------------------------------

    /// Stores a fetch outcome already accepted by the fetcher.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        let FetchOutcome { slot, result, .. } = outcome;
        let applied = match slot {
            Slot::HomeRow(kind) => {
                Loadable::from_result(result, |p| match p {
                    Payload::MovieList(list) => Some(list.results),
                    _ => None,
                })
                .and_then(|movies| {
                    let row = self.home.row_mut(kind)?;
                    row.movies = movies;
                    row.cursor = 0;
                    Some(())
                })
            }
            Slot::Search => Loadable::from_result(result, |p| match p {
                Payload::MovieList(list) => Some(list),
                _ => None,
            })
            .map(|results| {
                let has_rows = results
                    .loaded()
                    .is_some_and(|r| !r.results.is_empty());
                self.search.results = results;
                self.search.table_state.select(has_rows.then_some(0));
            }),
            Slot::Details => Loadable::from_result(result, |p| match p {
                Payload::Details(details) => Some(details),
                _ => None,
            })
            .map(|details| self.detail.details = details),
            Slot::Credits => Loadable::from_result(result, |p| match p {
                Payload::Credits(credits) => Some(credits),
                _ => None,
            })
            .map(|credits| self.detail.credits = credits),
            Slot::Reviews => Loadable::from_result(result, |p| match p {
                Payload::Reviews(reviews) => Some(reviews),
                _ => None,
            })
            .map(|reviews| self.detail.reviews = reviews),
            Slot::Similar => Loadable::from_result(result, |p| match p {
                Payload::MovieList(list) => Some(list.results),
                _ => None,
            })
            .map(|similar| {
                let has_rows = similar.loaded().is_some_and(|s| !s.is_empty());
                self.detail.similar = similar;
                self.detail.similar_state.select(has_rows.then_some(0));
            }),
            Slot::Videos => Loadable::from_result(result, |p| match p {
                Payload::Videos(videos) => Some(videos),
                _ => None,
            })
            .map(|videos| self.detail.videos = videos),
        };

        if applied.is_none() {
            tracing::warn!(?slot, "Ignored fetch result with unexpected payload");
        }
    }

    // ---- movement ------------------------------------------------------------

    /// Moves the selection up.
    pub fn move_up(&mut self) {
        match self.router.current() {
            Route::Home => {
                self.home.row_cursor = self.home.row_cursor.saturating_sub(1);
            }
            Route::Search(_) => select_prev(&mut self.search.table_state),
            Route::Movie(_) => select_prev(&mut self.detail.similar_state),
            Route::Favorites => select_prev(&mut self.favorites_view.table_state),
        }
    }

    /// Moves the selection down.
    pub fn move_down(&mut self) {
        match self.router.current() {
            Route::Home => {
                let last = self.home.rows.len().saturating_sub(1);
                self.home.row_cursor = self.home.row_cursor.saturating_add(1).min(last);
            }
            Route::Search(_) => {
                let len = self
                    .search
                    .results
                    .loaded()
                    .map_or(0, |r| r.results.len());
                select_next(&mut self.search.table_state, len);
            }
            Route::Movie(_) => {
                let len = self.detail.similar.loaded().map_or(0, Vec::len);
                select_next(&mut self.detail.similar_state, len);
            }
            Route::Favorites => {
                let len = self.visible_favorites().len();
                select_next(&mut self.favorites_view.table_state, len);
            }
        }
    }

    /// Moves left within the selected home row.
    pub fn move_left(&mut self) {
        if *self.router.current() == Route::Home
            && let Some(row) = self.home.rows.get_mut(self.home.row_cursor)
        {
            row.cursor = row.cursor.saturating_sub(1);
        }
    }

    /// Moves right within the selected home row.
    pub fn move_right(&mut self) {
        if *self.router.current() == Route::Home
            && let Some(row) = self.home.rows.get_mut(self.home.row_cursor)
        {
            let len = row.movies.loaded().map_or(0, Vec::len);
            if row.cursor.saturating_add(1) < len {
                row.cursor = row.cursor.saturating_add(1);
            }
        }
    }

    // ---- actions -------------------------------------------------------------

    /// Opens whatever is selected in the current view.
    pub fn open_selected(&mut self) -> Vec<Effect> {
        let target = match self.router.current() {
            Route::Home => self.home.selected().map(|m| Route::Movie(m.id)),
            Route::Search(_) => self.search.selected().map(|m| Route::Movie(m.id)),
            Route::Movie(_) => match self.detail.details {
                Loadable::Failed(_) => Some(Route::Home),
                _ => self.detail.selected_similar().map(|m| Route::Movie(m.id)),
            },
            Route::Favorites => {
                if self.favorites.is_empty() {
                    Some(Route::Home)
                } else {
                    self.selected_favorite().map(|e| Route::Movie(e.id))
                }
            }
        };
        target.map_or_else(Vec::new, |route| self.navigate(route))
    }

    /// Opens the trailer (detail view) or poster of the selected movie.
    #[must_use]
    pub fn external_url(&self) -> Option<String> {
        match self.router.current() {
            Route::Movie(_) => {
                let trailer = self
                    .detail
                    .videos
                    .loaded()
                    .and_then(TmdbVideosResponse::trailer)
                    .map(|v| youtube_url(&v.key));
                trailer.or_else(|| {
                    let details = self.detail.details.loaded()?;
                    image_url(details.poster_path.as_deref(), ImageSize::Poster)
                })
            }
            Route::Home | Route::Search(_) | Route::Favorites => {
                let entry = self.selected_entry()?;
                image_url(entry.poster_path.as_deref(), ImageSize::Poster)
            }
        }
    }

    /// Favorites entry for the movie under the cursor.
    #[must_use]
    pub fn selected_entry(&self) -> Option<FavoriteEntry> {
        match self.router.current() {
            Route::Home => self.home.selected().map(entry_from_summary),
            Route::Search(_) => self.search.selected().map(entry_from_summary),
            Route::Movie(_) => self
                .detail
                .details
                .loaded()
                .map(|d| entry_from_details(d)),
            Route::Favorites => self.selected_favorite().cloned(),
        }
    }

    /// Adds or removes the movie under the cursor.
    pub fn toggle_selected_favorite(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        match self.favorites.toggle(entry) {
            Ok(true) => self.status = Some(String::from(self.messages.favorite_added)),
            Ok(false) => self.status = Some(String::from(self.messages.favorite_removed)),
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Failed to save favorites");
                self.status = Some(String::from(self.messages.favorites_save_failed));
            }
        }
        self.clamp_favorites_cursor();
    }

    // ---- favorites view ------------------------------------------------------

    /// Favorites matching the filter, in insertion order.
    #[must_use]
    pub fn visible_favorites(&self) -> Vec<&FavoriteEntry> {
        let needle = normalize(&self.favorites_view.filter);
        self.favorites
            .entries()
            .iter()
            .filter(|e| needle.is_empty() || normalize(&e.title).contains(&needle))
            .collect()
    }

    /// Favorite under the cursor.
    #[must_use]
    pub fn selected_favorite(&self) -> Option<&FavoriteEntry> {
        let idx = self.favorites_view.table_state.selected()?;
        self.visible_favorites().get(idx).copied()
    }

    /// Appends a character to the favorites filter.
    pub fn filter_push(&mut self, ch: char) {
        self.favorites_view.filter.push(ch);
        self.favorites_view.table_state.select(Some(0));
        self.clamp_favorites_cursor();
    }

    /// Removes the last character from the favorites filter.
    pub fn filter_pop(&mut self) {
        self.favorites_view.filter.pop();
        self.favorites_view.table_state.select(Some(0));
        self.clamp_favorites_cursor();
    }

    /// Clears the favorites filter.
    pub fn filter_clear(&mut self) {
        self.favorites_view.filter.clear();
        self.clamp_favorites_cursor();
    }

    /// Removes the favorite under the cursor.
    pub fn remove_selected_favorite(&mut self) {
        if matches!(self.router.current(), Route::Favorites) {
            self.toggle_selected_favorite();
        }
    }

    /// Asks for confirmation before clearing the list.
    pub fn request_clear(&mut self) {
        if !self.favorites.is_empty() {
            self.favorites_view.confirm_clear = true;
        }
    }

    /// Resolves a pending clear-all confirmation.
    pub fn confirm_clear(&mut self, confirmed: bool) {
        if !self.favorites_view.confirm_clear {
            return;
        }
        self.favorites_view.confirm_clear = false;
        if !confirmed {
            return;
        }
        if let Err(e) = self.favorites.clear() {
            tracing::error!(error = %format!("{e:#}"), "Failed to clear favorites");
            self.status = Some(String::from(self.messages.favorites_save_failed));
        }
        self.clamp_favorites_cursor();
    }

    fn clamp_favorites_cursor(&mut self) {
        let len = self.visible_favorites().len();
        let state = &mut self.favorites_view.table_state;
        if len == 0 {
            state.select(None);
        } else {
            let idx = state.selected().unwrap_or(0).min(len.saturating_sub(1));
            state.select(Some(idx));
        }
    }
}

/// Unicode-normalized, case-folded form used for filter matching.
fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

fn select_prev(state: &mut TableState) {
    if let Some(idx) = state.selected() {
        state.select(Some(idx.saturating_sub(1)));
    }
}

fn select_next(state: &mut TableState, len: usize) {
    if len == 0 {
        return;
    }
    let next = state
        .selected()
        .map_or(0, |idx| idx.saturating_add(1).min(len.saturating_sub(1)));
    state.select(Some(next));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::messages::Locale;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn popular() -> TmdbMovieListResponse {
        serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/movie_list_popular.json"
        ))
        .unwrap()
    }

    fn make_state(route: Route) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::open(&dir.path().join("favorites.json")).unwrap();
        let state = AppState::new(route, store, Locale::En.messages(), DEBOUNCE);
        (dir, state)
    }

    fn outcome(slot: Slot, result: Result<Payload, FetchFailure>) -> FetchOutcome {
        FetchOutcome {
            slot,
            generation: 1,
            result,
        }
    }

    fn entry(id: u64, title: &str) -> FavoriteEntry {
        FavoriteEntry {
            id,
            title: String::from(title),
            poster_path: None,
            vote_average: 7.0,
            release_date: None,
        }
    }

    #[test]
    fn test_home_loads_once() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Home);

        // Act
        let first = state.enter_route();
        state.navigate(Route::Favorites);
        let again = state.back();

        // Assert
        assert_eq!(first, vec![Effect::LoadHome]);
        assert!(again.is_empty());
        assert!(state.home.rows.iter().all(|r| r.movies.is_loading()));
    }

    #[test]
    fn test_home_row_result_and_hero() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Home);
        state.enter_route();

        // Act
        state.apply(outcome(
            Slot::HomeRow(HomeRowKind::Trending),
            Ok(Payload::MovieList(popular())),
        ));
        state.apply(outcome(
            Slot::HomeRow(HomeRowKind::Popular),
            Err(FetchFailure::Failed(String::from("boom"))),
        ));

        // Assert
        let trending = state.home.row(HomeRowKind::Trending).unwrap();
        assert_eq!(trending.movies.loaded().unwrap().first().unwrap().id, 550);
        assert!(matches!(state.home.rows[2].movies, Loadable::Failed(_)));
        assert!(state.home.rows[1].movies.is_loading());
    }

    #[test]
    fn test_home_movement_and_open() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Home);
        state.enter_route();
        state.apply(outcome(
            Slot::HomeRow(HomeRowKind::Trending),
            Ok(Payload::MovieList(popular())),
        ));

        // Act
        state.move_right();
        state.move_right();
        let effects = state.open_selected();

        // Assert
        assert_eq!(effects, vec![Effect::LoadMovie(680)]);
        assert_eq!(state.route(), &Route::Movie(680));
        assert_eq!(state.router.depth(), 1);
    }

    #[test]
    fn test_search_waits_for_debounce() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(None));
        state.enter_route();
        let t0 = Instant::now();

        // Act
        for ch in "dune".chars() {
            state.search_push(ch, t0);
        }
        let early = state.tick(t0 + Duration::from_millis(100));
        let late = state.tick(t0 + DEBOUNCE);

        // Assert
        assert!(early.is_empty());
        assert_eq!(late, vec![Effect::Search(String::from("dune"))]);
        assert_eq!(state.route(), &Route::Search(Some(String::from("dune"))));
        assert!(state.search.results.is_loading());
    }

    #[test]
    fn test_leaving_search_drops_pending_query() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(None));
        state.enter_route();
        let t0 = Instant::now();
        state.search_push('d', t0);
        state.search_push('u', t0);

        // Act
        state.navigate(Route::Home);
        let fired = state.tick(t0 + DEBOUNCE);
        state.back();

        // Assert
        assert!(fired.is_empty());
        assert_eq!(state.search.query, None);
        assert_eq!(state.route(), &Route::Search(None));
        assert!(matches!(state.search.results, Loadable::Idle));
    }

    #[test]
    fn test_blank_search_clears_without_request() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(Some(String::from("x"))));
        state.enter_route();
        let t0 = Instant::now();

        // Act
        state.search_pop(t0);
        state.search_push(' ', t0);
        let effects = state.tick(t0 + DEBOUNCE);

        // Assert
        assert_eq!(effects, vec![Effect::CancelSearch]);
        assert!(matches!(state.search.results, Loadable::Idle));
        assert_eq!(state.route(), &Route::Search(None));
    }

    #[test]
    fn test_search_route_with_query_fetches_immediately() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(Some(String::from("fight club"))));

        // Act
        let effects = state.enter_route();

        // Assert
        assert_eq!(effects, vec![Effect::Search(String::from("fight club"))]);
        assert_eq!(state.search.input, "fight club");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_search_results_select_first() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(Some(String::from("fight"))));
        state.enter_route();

        // Act
        state.apply(outcome(Slot::Search, Ok(Payload::MovieList(popular()))));
        state.move_down();

        // Assert
        assert_eq!(state.search.selected().unwrap().id, 680);
        state.move_down();
        assert_eq!(state.search.table_state.selected(), Some(1));
    }

    #[test]
    fn test_detail_not_found_falls_back_home() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Movie(999_999));
        let effects = state.enter_route();

        // Act
        state.apply(outcome(Slot::Details, Err(FetchFailure::NotFound)));
        let back_home = state.open_selected();

        // Assert
        assert_eq!(effects, vec![Effect::LoadMovie(999_999)]);
        assert_eq!(state.route(), &Route::Home);
        assert_eq!(back_home, vec![Effect::LoadHome]);
    }

    #[test]
    fn test_reload_refetches_movie() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Movie(550));
        state.enter_route();
        state.apply(outcome(
            Slot::Details,
            Err(FetchFailure::Failed(String::from("timeout"))),
        ));

        // Act
        let effects = state.reload();

        // Assert
        assert_eq!(effects, vec![Effect::LoadMovie(550)]);
        assert!(state.detail.details.is_loading());
    }

    #[test]
    fn test_revisiting_failed_movie_refetches() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Movie(550));
        state.enter_route();
        state.apply(outcome(
            Slot::Details,
            Err(FetchFailure::Failed(String::from("timeout"))),
        ));
        state.navigate(Route::Favorites);

        // Act
        let effects = state.back();

        // Assert
        assert_eq!(effects, vec![Effect::LoadMovie(550)]);
        assert!(state.detail.details.is_loading());
    }

    #[test]
    fn test_revisiting_loaded_movie_keeps_details() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Movie(550));
        state.enter_route();
        state.navigate(Route::Favorites);

        // Act
        let effects = state.back();

        // Assert
        assert!(effects.is_empty());
    }

    #[test]
    fn test_toggle_favorite_twice_restores_list() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Search(Some(String::from("fight"))));
        state.enter_route();
        state.apply(outcome(Slot::Search, Ok(Payload::MovieList(popular()))));
        state.favorites.add(entry(13, "Forrest Gump")).unwrap();
        let before = state.favorites.entries().to_vec();

        // Act
        state.toggle_selected_favorite();
        let added = state.favorites.is_favorite(550);
        state.toggle_selected_favorite();

        // Assert
        assert!(added);
        assert_eq!(state.favorites.entries(), before.as_slice());
        assert_eq!(state.status.as_deref(), Some("Removed from My List"));
    }

    #[test]
    fn test_favorites_filter_normalizes() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        state.favorites.add(entry(550, "Fight Club")).unwrap();
        state.favorites.add(entry(194, "Amélie")).unwrap();
        state.enter_route();

        // Act
        for ch in "ＦＩＧＨＴ".chars() {
            state.filter_push(ch);
        }

        // Assert
        let visible: Vec<u64> = state.visible_favorites().iter().map(|e| e.id).collect();
        assert_eq!(visible, vec![550]);
        assert_eq!(state.selected_favorite().unwrap().id, 550);

        state.filter_clear();
        state.filter_push('É');
        let visible: Vec<u64> = state.visible_favorites().iter().map(|e| e.id).collect();
        assert_eq!(visible, vec![194]);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        state.favorites.add(entry(550, "Fight Club")).unwrap();
        state.enter_route();

        // Act
        state.request_clear();
        state.confirm_clear(false);
        let kept = state.favorites.len();
        state.request_clear();
        state.confirm_clear(true);

        // Assert
        assert_eq!(kept, 1);
        assert!(state.favorites.is_empty());
        assert!(!state.favorites_view.confirm_clear);
        assert_eq!(state.favorites_view.table_state.selected(), None);
    }

    #[test]
    fn test_remove_selected_favorite() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        state.favorites.add(entry(550, "Fight Club")).unwrap();
        state.favorites.add(entry(680, "Pulp Fiction")).unwrap();
        state.enter_route();
        state.move_down();

        // Act
        state.remove_selected_favorite();

        // Assert
        assert!(!state.favorites.is_favorite(680));
        assert_eq!(state.selected_favorite().unwrap().id, 550);
    }

    #[test]
    fn test_empty_favorites_open_goes_home() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Favorites);
        state.enter_route();

        // Act
        let effects = state.open_selected();

        // Assert
        assert_eq!(state.route(), &Route::Home);
        assert_eq!(effects, vec![Effect::LoadHome]);
    }

    #[test]
    fn test_external_url_prefers_trailer() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Movie(550));
        state.enter_route();
        let details: TmdbMovieDetails = serde_json::from_str(include_str!(
            "../../../../fixtures/tmdb/movie_details_550.json"
        ))
        .unwrap();
        state.apply(outcome(
            Slot::Details,
            Ok(Payload::Details(Box::new(details))),
        ));
        let poster = state.external_url().unwrap();

        // Act
        let videos: TmdbVideosResponse =
            serde_json::from_str(include_str!("../../../../fixtures/tmdb/videos_550.json"))
                .unwrap();
        state.apply(outcome(Slot::Videos, Ok(Payload::Videos(videos))));

        // Assert
        assert!(poster.contains("/w500/"));
        assert_eq!(
            state.external_url().as_deref(),
            Some("https://www.youtube.com/watch?v=qtRKdVHc-cE")
        );
    }

    #[test]
    fn test_mismatched_payload_is_ignored() {
        // Arrange
        let (_dir, mut state) = make_state(Route::Movie(550));
        state.enter_route();

        // Act
        state.apply(outcome(Slot::Details, Ok(Payload::MovieList(popular()))));

        // Assert
        assert!(state.detail.details.is_loading());
    }
}
