//! Background fetches with per-slot cancellation.
//!
//! Every request runs on its own spawned task and reports back over an
//! unbounded channel, tagged with the slot it fills and a generation number.
//! Spawning into a busy slot aborts the older task; outcomes whose generation
//! no longer matches the slot are rejected by [`Fetcher::accept`].

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use filmdeck_api::tmdb::{
    ApiError, ListParams, SearchMovieParams, TmdbApi, TmdbCredits, TmdbMovieDetails,
    TmdbMovieListResponse, TmdbReviewsResponse, TmdbVideosResponse, TrendingWindow,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::AbortHandle;

/// The five home rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeRowKind {
    /// Weekly trending.
    Trending,
    /// In theatres.
    NowPlaying,
    /// Popular.
    Popular,
    /// Top rated.
    TopRated,
    /// Upcoming releases.
    Upcoming,
}

impl HomeRowKind {
    /// All rows in display order.
    pub const ALL: [Self; 5] = [
        Self::Trending,
        Self::NowPlaying,
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
    ];
}

/// A piece of UI state that one request fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// One of the home rows.
    HomeRow(HomeRowKind),
    /// Search results.
    Search,
    /// Movie details.
    Details,
    /// Movie credits.
    Credits,
    /// Movie reviews.
    Reviews,
    /// Similar movies.
    Similar,
    /// Movie videos.
    Videos,
}

impl Slot {
    /// Slots filled when a movie detail page opens.
    pub const MOVIE: [Self; 5] = [
        Self::Details,
        Self::Credits,
        Self::Reviews,
        Self::Similar,
        Self::Videos,
    ];
}

/// Decoded response body.
#[derive(Debug)]
pub enum Payload {
    /// Any paginated movie list.
    MovieList(TmdbMovieListResponse),
    /// Full details.
    Details(Box<TmdbMovieDetails>),
    /// Cast and crew.
    Credits(TmdbCredits),
    /// Reviews page.
    Reviews(TmdbReviewsResponse),
    /// Videos.
    Videos(TmdbVideosResponse),
}

/// Why a fetch produced no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The resource does not exist.
    NotFound,
    /// Network, HTTP or decode failure.
    Failed(String),
}

impl FetchFailure {
    /// Classifies an error from the API client.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        if ApiError::is_not_found(err) {
            Self::NotFound
        } else {
            Self::Failed(format!("{err:#}"))
        }
    }
}

/// A finished fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Slot the request was made for.
    pub slot: Slot,
    /// Generation at spawn time.
    pub generation: u64,
    /// Payload or failure.
    pub result: Result<Payload, FetchFailure>,
}

/// Spawns fetch tasks and tracks the live generation per slot.
#[derive(Debug)]
pub struct Fetcher {
    tx: UnboundedSender<FetchOutcome>,
    inflight: HashMap<Slot, (u64, AbortHandle)>,
    next_generation: u64,
}

impl Fetcher {
    /// Creates a fetcher and the receiver its outcomes arrive on.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                tx,
                inflight: HashMap::new(),
                next_generation: 0,
            },
            rx,
        )
    }

    /// Runs `request` for `slot`, aborting whatever was in flight there.
    /// Returns the generation assigned to the new request.
    pub fn spawn(&mut self, slot: Slot, request: BoxFuture<'static, Result<Payload>>) -> u64 {
        self.cancel(slot);
        self.next_generation = self.next_generation.wrapping_add(1);
        let generation = self.next_generation;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let result = request.await.map_err(|e| {
                tracing::warn!(?slot, error = %format!("{e:#}"), "Fetch failed");
                FetchFailure::from_error(&e)
            });
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(FetchOutcome {
                slot,
                generation,
                result,
            });
        });

        self.inflight
            .insert(slot, (generation, handle.abort_handle()));
        tracing::debug!(?slot, generation, "Fetch spawned");
        generation
    }

    /// Aborts the in-flight request for `slot`, if any.
    pub fn cancel(&mut self, slot: Slot) {
        if let Some((generation, handle)) = self.inflight.remove(&slot) {
            handle.abort();
            tracing::debug!(?slot, generation, "Fetch cancelled");
        }
    }

    /// Returns `true` if `outcome` belongs to the live request of its slot,
    /// and retires that request.
    pub fn accept(&mut self, outcome: &FetchOutcome) -> bool {
        match self.inflight.get(&outcome.slot) {
            Some((generation, _)) if *generation == outcome.generation => {
                self.inflight.remove(&outcome.slot);
                true
            }
            _ => {
                tracing::debug!(
                    slot = ?outcome.slot,
                    generation = outcome.generation,
                    "Discarded stale fetch result"
                );
                false
            }
        }
    }

    /// Returns `true` if a request for `slot` is still running.
    #[cfg(test)]
    #[must_use]
    pub fn is_inflight(&self, slot: Slot) -> bool {
        self.inflight.contains_key(&slot)
    }
}

/// Builds request futures against a shared client.
#[derive(Debug)]
pub struct Requests<C> {
    client: Arc<C>,
    language: String,
    region: Option<String>,
}

impl<C> Clone for Requests<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            language: self.language.clone(),
            region: self.region.clone(),
        }
    }
}

impl<C> Requests<C>
where
    C: TmdbApi + Send + Sync + 'static,
{
    /// Creates a request builder for the given language and region.
    pub fn new(client: Arc<C>, language: impl Into<String>, region: Option<String>) -> Self {
        Self {
            client,
            language: language.into(),
            region,
        }
    }

    fn list_params(&self) -> ListParams {
        let params = ListParams::new(self.language.clone());
        match self.region {
            Some(ref region) => params.region(region.clone()),
            None => params,
        }
    }

    /// Request for one home row.
    pub fn home_row(&self, kind: HomeRowKind) -> BoxFuture<'static, Result<Payload>> {
        let client = Arc::clone(&self.client);
        let params = self.list_params();
        async move {
            let response = match kind {
                HomeRowKind::Trending => {
                    client
                        .trending(TrendingWindow::Week, &params.language)
                        .await?
                }
                HomeRowKind::NowPlaying => client.now_playing(&params).await?,
                HomeRowKind::Popular => client.popular(&params).await?,
                HomeRowKind::TopRated => client.top_rated(&params).await?,
                HomeRowKind::Upcoming => client.upcoming(&params).await?,
            };
            Ok(Payload::MovieList(response))
        }
        .boxed()
    }

    /// Request for first-page search results.
    pub fn search(&self, query: String) -> BoxFuture<'static, Result<Payload>> {
        let client = Arc::clone(&self.client);
        let mut params = SearchMovieParams::new(query).language(self.language.clone());
        if let Some(ref region) = self.region {
            params = params.region(region.clone());
        }
        async move { Ok(Payload::MovieList(client.search_movie(&params).await?)) }.boxed()
    }

    /// Request filling one of the movie detail slots.
    pub fn movie(&self, slot: Slot, movie_id: u64) -> BoxFuture<'static, Result<Payload>> {
        let client = Arc::clone(&self.client);
        let language = self.language.clone();
        let params = self.list_params();
        async move {
            let payload = match slot {
                Slot::Credits => Payload::Credits(client.movie_credits(movie_id, &language).await?),
                Slot::Reviews => Payload::Reviews(client.movie_reviews(movie_id, &params).await?),
                Slot::Similar => {
                    Payload::MovieList(client.similar_movies(movie_id, &params).await?)
                }
                Slot::Videos => Payload::Videos(client.movie_videos(movie_id, &language).await?),
                Slot::Details | Slot::HomeRow(_) | Slot::Search => Payload::Details(Box::new(
                    client.movie_details(movie_id, &language).await?,
                )),
            };
            Ok(payload)
        }
        .boxed()
    }
}
