//! One-shot subcommands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use filmdeck_api::tmdb::{
    ApiError, ImageSize, ListParams, SearchMovieParams, TmdbApi, TmdbCastMember, TmdbClient,
    TmdbCredits, TmdbMovieDetails, TmdbMovieListResponse, TmdbMovieSummary, TmdbReviewsResponse,
    TrendingWindow, image_url, youtube_url,
};
use filmdeck_store::{FavoritesStore, resolve_favorites_path};
use tracing::instrument;

use crate::config::{AppConfig, resolve_config_path};
use crate::messages::Messages;
use crate::tui::route::Route;
use crate::tui::{BrowserSettings, run_browser};
use crate::view::{
    MovieDetailView, card_label, entry_from_details, format_rating, release_year, truncate_chars,
};

/// Number of cast members printed.
const MAX_CAST: usize = 10;
/// Number of reviews printed.
const MAX_REVIEWS: usize = 3;
/// Review excerpt length in characters.
const REVIEW_EXCERPT: usize = 300;

/// Arguments for `browse`.
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Start route: `/`, `/movie/<id>`, `/search?query=<q>` or `/favorites`.
    #[arg(default_value = "/")]
    pub route: String,
}

/// Arguments for `home`.
#[derive(Args, Debug)]
pub struct HomeArgs {
    /// Trending time window.
    #[arg(long, value_enum, default_value_t = WindowArg::Week)]
    pub window: WindowArg,

    /// Page of the list rows (trending is always page 1).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub page: u32,
}

/// `--window` values for `home`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowArg {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    Week,
}

impl From<WindowArg> for TrendingWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Day => Self::Day,
            WindowArg::Week => Self::Week,
        }
    }
}

/// Arguments for `search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Movie title to search for.
    #[arg(long)]
    pub query: String,

    /// Result page.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Filter by primary release year.
    #[arg(long)]
    pub year: Option<u32>,
}

/// Arguments for `movie`.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long)]
    pub id: u64,

    /// Include the top-billed cast.
    #[arg(long)]
    pub credits: bool,

    /// Include reviews.
    #[arg(long)]
    pub reviews: bool,

    /// Include similar movies.
    #[arg(long)]
    pub similar: bool,

    /// Include the trailer link.
    #[arg(long)]
    pub videos: bool,
}

/// `favorites` subcommands.
#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List saved favorites.
    List,
    /// Add a movie by TMDB ID.
    Add(IdArgs),
    /// Remove a movie by TMDB ID.
    Remove(IdArgs),
    /// Add the movie if absent, remove it otherwise.
    Toggle(IdArgs),
    /// Remove every favorite.
    Clear {
        /// Confirm clearing without a prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// A single movie ID argument.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// TMDB movie ID.
    #[arg(long)]
    pub id: u64,
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the config file location.
    Path,
    /// Print the effective config as TOML.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Settings shared by every subcommand.
#[derive(Debug)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// `--dir` override for config and data.
    pub dir: Option<PathBuf>,
}

impl AppContext {
    /// Loads config from `dir` (or the default location).
    ///
    /// # Errors
    ///
    /// Returns an error if the config path cannot be resolved or parsed.
    pub fn load(dir: Option<PathBuf>) -> Result<Self> {
        let path = resolve_config_path(dir.as_deref())?;
        let config = AppConfig::load(&path)?;
        Ok(Self { config, dir })
    }

    fn messages(&self) -> &'static Messages {
        self.config.ui.locale.messages()
    }

    fn list_params(&self) -> ListParams {
        let params = ListParams::new(self.config.tmdb.language.clone());
        match self.config.tmdb.region {
            Some(ref region) => params.region(region.clone()),
            None => params,
        }
    }

    fn open_favorites(&self) -> Result<FavoritesStore> {
        let path = resolve_favorites_path(self.dir.as_deref())?;
        FavoritesStore::open(&path)
    }
}

/// Builds a `TmdbClient` from `TMDB_API_TOKEN` or the config file.
///
/// # Errors
///
/// Returns an error if no token is configured or the client fails to build.
#[instrument(skip_all)]
pub fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = config
        .api_token(std::env::var("TMDB_API_TOKEN").ok())
        .context("TMDB_API_TOKEN environment variable (or tmdb.api_token in config) is required")?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the route is invalid, the client or favorites cannot
/// be set up, or the TUI fails.
#[instrument(skip_all)]
pub async fn run_browse(args: &BrowseArgs, ctx: &AppContext) -> Result<()> {
    let route: Route = args.route.parse()?;
    let client = build_tmdb_client(&ctx.config)?;
    let favorites = ctx.open_favorites()?;

    tracing::info!(%route, "Starting browser");
    let settings = BrowserSettings {
        language: ctx.config.tmdb.language.clone(),
        region: ctx.config.tmdb.region.clone(),
        debounce: ctx.config.search.debounce(),
        messages: ctx.messages(),
    };
    run_browser(Arc::new(client), favorites, settings, route).await
}

/// Logs one movie list line.
fn log_movie(movie: &TmdbMovieSummary, m: &Messages) {
    tracing::info!(
        "  {}\t{}",
        movie.id,
        card_label(
            &movie.title,
            movie.vote_average,
            movie.release_date.as_deref(),
            m
        )
    );
}

/// Runs the `home` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build.
#[instrument(skip_all)]
pub async fn run_home(args: &HomeArgs, ctx: &AppContext) -> Result<()> {
    let client = build_tmdb_client(&ctx.config)?;
    let m = ctx.messages();
    let params = ctx.list_params().page(args.page);

    let (trending, now_playing, popular, top_rated, upcoming) = futures::join!(
        client.trending(args.window.into(), &params.language),
        client.now_playing(&params),
        client.popular(&params),
        client.top_rated(&params),
        client.upcoming(&params),
    );

    if let Ok(ref list) = trending
        && let Some(hero) = list.results.first()
    {
        tracing::info!("{}", hero.title);
        tracing::info!(
            "\u{2605} {}  {}",
            format_rating(hero.vote_average, m),
            release_year(hero.release_date.as_deref())
                .map_or_else(String::new, |y| y.to_string())
        );
        if let Some(ref overview) = hero.overview {
            tracing::info!("{}", truncate_chars(overview, 200));
        }
    }

    let rows: [(&str, Result<TmdbMovieListResponse>); 5] = [
        (m.row_trending, trending),
        (m.row_now_playing, now_playing),
        (m.row_popular, popular),
        (m.row_top_rated, top_rated),
        (m.row_upcoming, upcoming),
    ];
    for (title, result) in rows {
        tracing::info!("== {title} ==");
        match result {
            Ok(list) => {
                for movie in &list.results {
                    log_movie(movie, m);
                }
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "{}", m.list_load_failed);
            }
        }
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// A blank query prints the start hint without contacting the API.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
pub async fn run_search(args: &SearchArgs, ctx: &AppContext) -> Result<()> {
    let m = ctx.messages();
    let query = args.query.trim();
    if query.is_empty() {
        tracing::info!("{}", m.search_start_hint);
        return Ok(());
    }

    let client = build_tmdb_client(&ctx.config)?;
    let mut params = SearchMovieParams::new(query)
        .language(ctx.config.tmdb.language.clone())
        .page(args.page);
    if let Some(year) = args.year {
        params = params.year(year);
    }
    if let Some(ref region) = ctx.config.tmdb.region {
        params = params.region(region.clone());
    }

    let response = client
        .search_movie(&params)
        .await
        .context(m.search_failed)?;

    if response.results.is_empty() {
        tracing::info!("{}", m.no_results);
        tracing::info!("{}", m.no_results_hint);
        return Ok(());
    }

    tracing::info!(
        "{} ({} {}/{})",
        m.results_found(response.total_results),
        m.page_label,
        response.page,
        response.total_pages
    );
    for movie in &response.results {
        log_movie(movie, m);
    }

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the movie does not exist or any requested section
/// fails to load.
#[instrument(skip_all, fields(movie_id = args.id))]
pub async fn run_movie(args: &MovieArgs, ctx: &AppContext) -> Result<()> {
    let client = build_tmdb_client(&ctx.config)?;
    let m = ctx.messages();
    let language = ctx.config.tmdb.language.as_str();
    let params = ctx.list_params();

    let details = fetch_details(&client, args.id, ctx).await?;
    log_details(&MovieDetailView::new(&details, m), m);

    if args.credits {
        let credits = client
            .movie_credits(args.id, language)
            .await
            .context("TMDB movie credits request failed")?;
        log_credits(&credits, m);
    }
    if args.videos {
        let videos = client
            .movie_videos(args.id, language)
            .await
            .context("TMDB movie videos request failed")?;
        tracing::info!("== {} ==", m.trailer_heading);
        match videos.trailer() {
            Some(trailer) => tracing::info!("  {}\t{}", trailer.name, youtube_url(&trailer.key)),
            None => tracing::info!("  {}", m.no_trailer),
        }
    }
    if args.reviews {
        let reviews = client
            .movie_reviews(args.id, &params)
            .await
            .context("TMDB movie reviews request failed")?;
        log_reviews(&reviews, m);
    }
    if args.similar {
        let similar = client
            .similar_movies(args.id, &params)
            .await
            .context("TMDB similar movies request failed")?;
        tracing::info!("== {} ==", m.similar_heading);
        for movie in &similar.results {
            log_movie(movie, m);
        }
    }

    Ok(())
}

fn log_details(view: &MovieDetailView, m: &Messages) {
    tracing::info!("{} ({})", view.title, view.id);
    tracing::info!("{}", view.quick_info());
    if let Some(ref tagline) = view.tagline {
        tracing::info!("\"{tagline}\"");
    }
    if !view.genres.is_empty() {
        tracing::info!("{}: {}", m.genres_heading, view.genres.join(", "));
    }
    tracing::info!("{}: {}", m.overview_heading, view.overview);
    if let Some(ref original) = view.original_title {
        tracing::info!("{}: {original}", m.original_title);
    }
    if let Some(ref status) = view.status {
        tracing::info!("{}: {status}", m.status);
    }
    if let Some(ref lang) = view.original_language {
        tracing::info!("{}: {lang}", m.original_language);
    }
    if !view.companies.is_empty() {
        tracing::info!("{}: {}", m.production_companies, view.companies.join(", "));
    }
    if let Some(ref poster) = view.poster_url {
        tracing::info!("{}: {poster}", m.poster_label);
    }
    if let Some(ref backdrop) = view.backdrop_url {
        tracing::info!("{}: {backdrop}", m.backdrop_label);
    }
}

fn log_credits(credits: &TmdbCredits, m: &Messages) {
    tracing::info!("== {} ==", m.cast_heading);
    for member in credits.cast.iter().take(MAX_CAST) {
        tracing::info!("  {}", cast_line(member));
    }
    let directors = credits.directors();
    if !directors.is_empty() {
        tracing::info!("  {}: {}", m.director, directors.join(", "));
    }
}

/// Name, character and profile image URL of one cast member.
fn cast_line(member: &TmdbCastMember) -> String {
    let character = member.character.as_deref().unwrap_or("-");
    match image_url(member.profile_path.as_deref(), ImageSize::Profile) {
        Some(url) => format!("{}\t{character}\t{url}", member.name),
        None => format!("{}\t{character}", member.name),
    }
}

fn log_reviews(reviews: &TmdbReviewsResponse, m: &Messages) {
    tracing::info!("== {} ==", m.reviews_heading);
    if reviews.results.is_empty() {
        tracing::info!("  {}", m.no_reviews);
    }
    for review in reviews.results.iter().take(MAX_REVIEWS) {
        let rating = review
            .rating()
            .map_or_else(String::new, |r| format!(" \u{2605} {r:.1}"));
        tracing::info!("  {}{rating}", review.author);
        tracing::info!(
            "    {}",
            truncate_chars(review.content.trim(), REVIEW_EXCERPT)
        );
    }
}

/// Runs a `favorites` subcommand.
///
/// # Errors
///
/// Returns an error if the favorites file cannot be read or written, or a
/// movie lookup fails.
#[instrument(skip_all)]
pub async fn run_favorites(cmd: &FavoritesCommand, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.open_favorites()?;
    let m = ctx.messages();

    match *cmd {
        FavoritesCommand::List => {
            if store.is_empty() {
                tracing::info!("{}", m.favorites_empty_title);
                tracing::info!("{}", m.favorites_empty_hint);
                return Ok(());
            }
            tracing::info!("{}", m.favorites_count(store.len()));
            for entry in store.entries() {
                tracing::info!(
                    "  {}\t{}",
                    entry.id,
                    card_label(
                        &entry.title,
                        entry.vote_average,
                        entry.release_date.as_deref(),
                        m
                    )
                );
            }
        }
        FavoritesCommand::Add(ref args) => {
            if store.is_favorite(args.id) {
                tracing::info!(id = args.id, "{}", m.in_list);
                return Ok(());
            }
            let client = build_tmdb_client(&ctx.config)?;
            let details = fetch_details(&client, args.id, ctx).await?;
            store.add(entry_from_details(&details))?;
            tracing::info!("{}: {}", m.favorite_added, details.title);
        }
        FavoritesCommand::Remove(ref args) => {
            let title = store.get(args.id).map(|e| e.title.clone());
            if store.remove(args.id)? {
                tracing::info!(
                    "{}: {}",
                    m.favorite_removed,
                    title.unwrap_or_else(|| args.id.to_string())
                );
            } else {
                tracing::warn!(id = args.id, "{}", m.not_in_list);
            }
        }
        FavoritesCommand::Toggle(ref args) => {
            if let Some(entry) = store.get(args.id).cloned() {
                store.toggle(entry.clone())?;
                tracing::info!("{}: {}", m.favorite_removed, entry.title);
            } else {
                let client = build_tmdb_client(&ctx.config)?;
                let details = fetch_details(&client, args.id, ctx).await?;
                store.toggle(entry_from_details(&details))?;
                tracing::info!("{}: {}", m.favorite_added, details.title);
            }
        }
        FavoritesCommand::Clear { yes } => {
            let count = store.len();
            if count > 0 && !yes {
                bail!("refusing to clear {count} favorites without --yes");
            }
            store.clear()?;
            tracing::info!(removed = count, "{}", m.favorites_empty_title);
        }
    }

    Ok(())
}

/// Fetches details, mapping "not found" to a localized error.
async fn fetch_details(
    client: &TmdbClient,
    id: u64,
    ctx: &AppContext,
) -> Result<TmdbMovieDetails> {
    let m = ctx.messages();
    match client.movie_details(id, &ctx.config.tmdb.language).await {
        Ok(details) => Ok(details),
        Err(e) if ApiError::is_not_found(&e) => bail!("{}: {id}", m.movie_not_found),
        Err(e) => Err(e).context(m.detail_load_failed),
    }
}

/// Runs a `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or written.
#[instrument(skip_all)]
pub fn run_config(cmd: &ConfigCommand, ctx: &AppContext) -> Result<()> {
    let path = resolve_config_path(ctx.dir.as_deref())?;
    match *cmd {
        ConfigCommand::Path => tracing::info!("{}", path.display()),
        ConfigCommand::Show => {
            let rendered = ctx.config.to_redacted_toml()?;
            for line in rendered.lines() {
                tracing::info!("{line}");
            }
        }
        ConfigCommand::Init { force } => write_default_config(&path, force)?,
    }
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(path)?;
    tracing::info!(path = %path.display(), "Config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::messages::Locale;

    fn ctx_in(dir: &Path) -> AppContext {
        AppContext::load(Some(dir.to_path_buf())).unwrap()
    }

    #[test]
    fn test_context_defaults_without_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let ctx = ctx_in(dir.path());

        // Assert
        assert_eq!(ctx.config, AppConfig::default());
        assert_eq!(ctx.messages().nav_home, "Home");
        assert_eq!(ctx.list_params().region, None);
    }

    #[test]
    fn test_context_reads_locale_and_region() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[tmdb]\nlanguage = \"tr-TR\"\nregion = \"TR\"\n\n[ui]\nlocale = \"tr\"\n",
        )
        .unwrap();

        // Act
        let ctx = ctx_in(dir.path());

        // Assert
        assert_eq!(ctx.config.ui.locale, Locale::Tr);
        assert_eq!(ctx.list_params().language, "tr-TR");
        assert_eq!(ctx.list_params().region.as_deref(), Some("TR"));
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_default_config(&path, false).unwrap();

        // Act
        let again = write_default_config(&path, false);
        let forced = write_default_config(&path, true);

        // Assert
        assert!(again.unwrap_err().to_string().contains("already exists"));
        assert!(forced.is_ok());
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[tokio::test]
    async fn test_clear_requires_yes() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let mut store = ctx.open_favorites().unwrap();
        store
            .add(filmdeck_store::FavoriteEntry {
                id: 550,
                title: String::from("Fight Club"),
                poster_path: None,
                vote_average: 8.4,
                release_date: None,
            })
            .unwrap();

        // Act
        let refused = run_favorites(&FavoritesCommand::Clear { yes: false }, &ctx).await;
        let cleared = run_favorites(&FavoritesCommand::Clear { yes: true }, &ctx).await;

        // Assert
        assert!(refused.unwrap_err().to_string().contains("--yes"));
        assert!(cleared.is_ok());
        assert!(ctx.open_favorites().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_existing_favorite() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let mut store = ctx.open_favorites().unwrap();
        store
            .add(filmdeck_store::FavoriteEntry {
                id: 680,
                title: String::from("Pulp Fiction"),
                poster_path: None,
                vote_average: 8.5,
                release_date: None,
            })
            .unwrap();

        // Act
        run_favorites(&FavoritesCommand::Remove(IdArgs { id: 680 }), &ctx)
            .await
            .unwrap();

        // Assert
        assert!(ctx.open_favorites().unwrap().is_empty());
    }

    #[test]
    fn test_cast_line_links_profile_image() {
        // Arrange
        let credits: TmdbCredits = serde_json::from_value(serde_json::json!({
            "id": 550,
            "cast": [
                {"id": 819, "name": "Edward Norton", "character": "The Narrator",
                 "profile_path": "/8nytsqL59SFJTVYVrN72k6qkGgJ.jpg"},
                {"id": 287, "name": "Brad Pitt", "character": null, "profile_path": null}
            ],
            "crew": []
        }))
        .unwrap();

        // Act
        let lines: Vec<String> = credits.cast.iter().map(cast_line).collect();

        // Assert
        assert_eq!(
            lines,
            vec![
                String::from(
                    "Edward Norton\tThe Narrator\thttps://image.tmdb.org/t/p/w185/8nytsqL59SFJTVYVrN72k6qkGgJ.jpg"
                ),
                String::from("Brad Pitt\t-"),
            ]
        );
    }

    #[test]
    fn test_window_arg_maps_to_trending_window() {
        assert_eq!(TrendingWindow::from(WindowArg::Day), TrendingWindow::Day);
        assert_eq!(TrendingWindow::from(WindowArg::Week), TrendingWindow::Week);
    }

    #[test]
    fn test_home_page_applies_to_list_rows() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let args = HomeArgs {
            window: WindowArg::Day,
            page: 3,
        };

        // Act
        let params = ctx.list_params().page(args.page);

        // Assert
        assert_eq!(params.page, 3);
        assert_eq!(params.language, "en-US");
    }

    #[tokio::test]
    async fn test_blank_search_skips_api() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let args = SearchArgs {
            query: String::from("   "),
            page: 1,
            year: None,
        };

        // Act
        let result = run_search(&args, &ctx).await;

        // Assert
        assert!(result.is_ok());
    }
}
