//! TUI rendering logic for the browser.

use filmdeck_api::tmdb::{TmdbMovieSummary, youtube_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Wrap};

use super::fetch::{FetchFailure, HomeRowKind};
use super::route::Route;
use super::state::{AppState, DetailState, HomeRow, InputMode, Loadable};
use crate::messages::Messages;
use crate::view::{MovieDetailView, card_label, format_rating, release_year, truncate_chars};

/// Number of cast members shown.
const MAX_CAST: usize = 10;
/// Number of reviews shown.
const MAX_REVIEWS: usize = 3;
/// Review excerpt length in characters.
const REVIEW_EXCERPT: usize = 300;
/// Hero overview length in characters.
const HERO_OVERVIEW: usize = 200;

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // view
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    match state.route().clone() {
        Route::Home => draw_home(frame, chunks[1], state),
        Route::Search(_) => draw_search(frame, chunks[1], state),
        Route::Movie(_) => draw_detail(frame, chunks[1], state),
        Route::Favorites => draw_favorites(frame, chunks[1], state),
    }

    draw_footer(frame, chunks[2], state);
}

fn heading_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

/// Message paragraph used for loading, error and empty states.
fn notice<'a>(lines: Vec<Line<'a>>, title: &'a str) -> Paragraph<'a> {
    Paragraph::new(lines)
        .block(titled_block(title))
        .wrap(Wrap { trim: true })
}

fn failure_line(failure: &FetchFailure, fallback: &'static str, m: &Messages) -> Line<'static> {
    let text = match failure {
        FetchFailure::NotFound => m.movie_not_found,
        FetchFailure::Failed(_) => fallback,
    };
    Line::from(Span::styled(text, Style::default().fg(Color::Red)))
}

/// Draws the navigation tabs and the current route.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let m = state.messages;
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let route = state.route();
    let tabs = [
        (m.nav_home, matches!(route, Route::Home)),
        (m.nav_search, matches!(route, Route::Search(_))),
        (m.nav_favorites, matches!(route, Route::Favorites)),
    ];
    let mut spans = Vec::new();
    for (label, active) in tabs {
        let style = if active {
            highlight_style()
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();
    spans.push(Span::styled(
        format!("  \u{2665} {}", state.favorites.len()),
        Style::default().fg(Color::Red),
    ));

    let nav = Paragraph::new(Line::from(spans)).block(titled_block("filmdeck"));
    frame.render_widget(nav, header_chunks[0]);

    let location = Paragraph::new(route.to_string()).block(titled_block(m.route_label));
    frame.render_widget(location, header_chunks[1]);
}

// ---- home ----------------------------------------------------------------------

fn row_title(kind: HomeRowKind, m: &Messages) -> &'static str {
    match kind {
        HomeRowKind::Trending => m.row_trending,
        HomeRowKind::NowPlaying => m.row_now_playing,
        HomeRowKind::Popular => m.row_popular,
        HomeRowKind::TopRated => m.row_top_rated,
        HomeRowKind::Upcoming => m.row_upcoming,
    }
}

/// Draws the hero banner and the five movie rows.
fn draw_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let m = state.messages;
    let mut constraints = vec![Constraint::Length(6)];
    constraints.extend(state.home.rows.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut areas = chunks.iter().copied();
    if let Some(hero_area) = areas.next() {
        draw_hero(frame, hero_area, state.home.row(HomeRowKind::Trending), m);
    }

    for (idx, (row, row_area)) in state.home.rows.iter().zip(areas).enumerate() {
        let active = idx == state.home.row_cursor;
        draw_home_row(frame, row_area, row, active, m);
    }
}

fn draw_hero(frame: &mut Frame, area: Rect, trending: Option<&HomeRow>, m: &Messages) {
    let lines = match trending.map(|row| &row.movies) {
        None | Some(Loadable::Idle | Loadable::Loading) => vec![Line::from(m.loading)],
        Some(Loadable::Failed(failure)) => vec![failure_line(failure, m.list_load_failed, m)],
        Some(Loadable::Loaded(movies)) => match movies.first() {
            None => vec![Line::from(m.row_empty)],
            Some(movie) => {
                let mut quick = format!("\u{2605} {}", format_rating(movie.vote_average, m));
                if let Some(year) = release_year(movie.release_date.as_deref()) {
                    quick.push_str(&format!("  {year}"));
                }
                let overview = movie
                    .overview
                    .as_deref()
                    .filter(|o| !o.trim().is_empty())
                    .unwrap_or(m.no_overview);
                vec![
                    Line::from(Span::styled(movie.title.clone(), heading_style())),
                    Line::from(quick),
                    Line::from(truncate_chars(overview, HERO_OVERVIEW)),
                ]
            }
        },
    };
    let hero_widget = Paragraph::new(lines)
        .block(titled_block(m.row_trending))
        .wrap(Wrap { trim: true });
    frame.render_widget(hero_widget, area);
}

fn draw_home_row(frame: &mut Frame, area: Rect, row: &HomeRow, active: bool, m: &Messages) {
    let line = match row.movies {
        Loadable::Idle | Loadable::Loading => Line::from(Span::styled(
            "\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}  \u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}  \u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}",
            Style::default().fg(Color::DarkGray),
        )),
        Loadable::Failed(ref failure) => failure_line(failure, m.list_load_failed, m),
        Loadable::Loaded(ref movies) if movies.is_empty() => Line::from(m.row_empty),
        Loadable::Loaded(ref movies) => {
            // Keep the selected card on screen by starting two cards before it.
            let start = row.cursor.saturating_sub(2);
            let mut spans = Vec::new();
            for (idx, movie) in movies.iter().enumerate().skip(start) {
                let label = card_label(
                    &movie.title,
                    movie.vote_average,
                    movie.release_date.as_deref(),
                    m,
                );
                let style = if active && idx == row.cursor {
                    highlight_style().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {label} "), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        }
    };

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let widget = Paragraph::new(line).block(
        titled_block(row_title(row.kind, m)).border_style(border_style),
    );
    frame.render_widget(widget, area);
}

// ---- search --------------------------------------------------------------------

fn movie_row(movie: &TmdbMovieSummary, favorite: bool, m: &Messages) -> Row<'static> {
    Row::new(vec![
        if favorite {
            String::from("\u{2665}")
        } else {
            String::new()
        },
        movie.title.clone(),
        release_year(movie.release_date.as_deref())
            .map_or_else(|| String::from("--"), |y| y.to_string()),
        format_rating(movie.vote_average, m),
    ])
}

const MOVIE_WIDTHS: [Constraint; 4] = [
    Constraint::Length(2),
    Constraint::Min(20),
    Constraint::Length(6),
    Constraint::Length(5),
];

/// Draws the search box and the result list.
#[allow(clippy::indexing_slicing)]
fn draw_search(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let m = state.messages;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    let input = if state.search.input.is_empty() && !editing {
        Paragraph::new(Span::styled(
            m.search_placeholder,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let cursor = if editing { "_" } else { "" };
        Paragraph::new(format!("{}{cursor}", state.search.input))
    };
    let input_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    frame.render_widget(
        input
            .style(input_style)
            .block(titled_block(m.search_title)),
        chunks[0],
    );

    let results_area = chunks[1];
    match state.search.results {
        Loadable::Idle => {
            let widget = notice(
                vec![
                    Line::from(Span::styled(m.search_start_title, heading_style())),
                    Line::from(m.search_start_hint),
                ],
                m.nav_search,
            );
            frame.render_widget(widget, results_area);
        }
        Loadable::Loading => {
            frame.render_widget(notice(vec![Line::from(m.loading)], m.nav_search), results_area);
        }
        Loadable::Failed(ref failure) => {
            let widget = notice(vec![failure_line(failure, m.search_failed, m)], m.nav_search);
            frame.render_widget(widget, results_area);
        }
        Loadable::Loaded(ref results) if results.results.is_empty() => {
            let widget = notice(
                vec![
                    Line::from(Span::styled(m.no_results, heading_style())),
                    Line::from(m.no_results_hint),
                ],
                m.nav_search,
            );
            frame.render_widget(widget, results_area);
        }
        Loadable::Loaded(ref results) => {
            let rows: Vec<Row> = results
                .results
                .iter()
                .map(|movie| movie_row(movie, state.favorites.is_favorite(movie.id), m))
                .collect();
            let title = m.results_found(results.total_results);
            let table = Table::new(rows, MOVIE_WIDTHS)
                .block(titled_block(&title))
                .row_highlight_style(highlight_style());
            frame.render_stateful_widget(table, results_area, &mut state.search.table_state);
        }
    }
}

// ---- movie detail --------------------------------------------------------------

/// Draws the movie detail page.
#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let m = state.messages;
    let details = match state.detail.details {
        Loadable::Idle | Loadable::Loading => {
            frame.render_widget(notice(vec![Line::from(m.loading)], m.info_heading), area);
            return;
        }
        Loadable::Failed(ref failure) => {
            let widget = notice(
                vec![
                    failure_line(failure, m.detail_load_failed, m),
                    Line::from(""),
                    Line::from(format!("{} (Enter)", m.back_to_home)),
                ],
                m.info_heading,
            );
            frame.render_widget(widget, area);
            return;
        }
        Loadable::Loaded(ref details) => details,
    };

    let view = MovieDetailView::new(details, m);
    let favorite = state.favorites.is_favorite(view.id);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    draw_detail_header(frame, rows[0], &view, favorite, m);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(4),
        ])
        .split(columns[0]);
    let overview = Paragraph::new(view.overview.clone())
        .block(titled_block(m.overview_heading))
        .wrap(Wrap { trim: true });
    frame.render_widget(overview, left[0]);
    draw_cast(frame, left[1], &state.detail, m);
    draw_reviews(frame, left[2], &state.detail, m);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(columns[1]);
    draw_info(frame, right[0], &view, m);
    draw_trailer(frame, right[1], &state.detail, m);
    draw_similar(frame, right[2], state);
}

fn draw_detail_header(
    frame: &mut Frame,
    area: Rect,
    view: &MovieDetailView,
    favorite: bool,
    m: &Messages,
) {
    let mut lines = vec![
        Line::from(Span::styled(view.title.clone(), heading_style())),
        Line::from(view.quick_info()),
    ];
    if let Some(ref tagline) = view.tagline {
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    if !view.genres.is_empty() {
        lines.push(Line::from(format!(
            "{}: {}",
            m.genres_heading,
            view.genres.join(", ")
        )));
    }
    let (marker, label, color) = if favorite {
        ("\u{2665}", m.in_list, Color::Red)
    } else {
        ("\u{2661}", m.add_to_list, Color::Gray)
    };
    lines.push(Line::from(Span::styled(
        format!("{marker} {label} (f)"),
        Style::default().fg(color),
    )));

    let header = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_info(frame: &mut Frame, area: Rect, view: &MovieDetailView, m: &Messages) {
    let mut lines = Vec::new();
    let mut push = |label: &str, value: String| {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
            Span::raw(value),
        ]));
    };
    if let Some(ref original) = view.original_title {
        push(m.original_title, original.clone());
    }
    if let Some(ref status) = view.status {
        push(m.status, status.clone());
    }
    if let Some(ref language) = view.original_language {
        push(m.original_language, language.clone());
    }
    if !view.companies.is_empty() {
        push(m.production_companies, view.companies.join(", "));
    }
    let info = Paragraph::new(lines)
        .block(titled_block(m.info_heading))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, area);
}

fn draw_cast(frame: &mut Frame, area: Rect, detail: &DetailState, m: &Messages) {
    let lines = match detail.credits {
        Loadable::Idle | Loadable::Loading => vec![Line::from(m.loading)],
        Loadable::Failed(_) => vec![Line::from(m.not_available)],
        Loadable::Loaded(ref credits) => {
            let cast: Vec<String> = credits
                .cast
                .iter()
                .take(MAX_CAST)
                .map(|c| match c.character.as_deref().filter(|ch| !ch.is_empty()) {
                    Some(character) => format!("{} ({character})", c.name),
                    None => c.name.clone(),
                })
                .collect();
            let mut lines = vec![Line::from(cast.join(", "))];
            let directors = credits.directors();
            if !directors.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("{}: {}", m.director, directors.join(", ")),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines
        }
    };
    let widget = Paragraph::new(lines)
        .block(titled_block(m.cast_heading))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn draw_reviews(frame: &mut Frame, area: Rect, detail: &DetailState, m: &Messages) {
    let lines = match detail.reviews {
        Loadable::Idle | Loadable::Loading => vec![Line::from(m.loading)],
        Loadable::Failed(_) => vec![Line::from(m.not_available)],
        Loadable::Loaded(ref reviews) if reviews.results.is_empty() => {
            vec![Line::from(m.no_reviews)]
        }
        Loadable::Loaded(ref reviews) => {
            let mut lines = Vec::new();
            for review in reviews.results.iter().take(MAX_REVIEWS) {
                let rating = review
                    .rating()
                    .map_or_else(String::new, |r| format!("  \u{2605} {r:.1}"));
                lines.push(Line::from(Span::styled(
                    format!("{}{rating}", review.author),
                    heading_style(),
                )));
                lines.push(Line::from(truncate_chars(
                    review.content.trim(),
                    REVIEW_EXCERPT,
                )));
                lines.push(Line::from(""));
            }
            lines
        }
    };
    let widget = Paragraph::new(lines)
        .block(titled_block(m.reviews_heading))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn draw_trailer(frame: &mut Frame, area: Rect, detail: &DetailState, m: &Messages) {
    let line = match detail.videos {
        Loadable::Idle | Loadable::Loading => Line::from(m.loading),
        Loadable::Failed(_) => Line::from(m.no_trailer),
        Loadable::Loaded(ref videos) => videos.trailer().map_or_else(
            || Line::from(m.no_trailer),
            |video| {
                Line::from(vec![
                    Span::styled(
                        format!("(o) {}", youtube_url(&video.key)),
                        Style::default().fg(Color::Blue),
                    ),
                    Span::raw(format!("  {}", video.name)),
                ])
            },
        ),
    };
    let widget = Paragraph::new(line).block(titled_block(m.trailer_heading));
    frame.render_widget(widget, area);
}

fn draw_similar(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let m = state.messages;
    match state.detail.similar {
        Loadable::Loaded(ref movies) if !movies.is_empty() => {
            let rows: Vec<Row> = movies
                .iter()
                .map(|movie| movie_row(movie, state.favorites.is_favorite(movie.id), m))
                .collect();
            let table = Table::new(rows, MOVIE_WIDTHS)
                .block(titled_block(m.similar_heading))
                .row_highlight_style(highlight_style());
            frame.render_stateful_widget(table, area, &mut state.detail.similar_state);
        }
        Loadable::Idle | Loadable::Loading => {
            frame.render_widget(notice(vec![Line::from(m.loading)], m.similar_heading), area);
        }
        Loadable::Loaded(_) | Loadable::Failed(_) => {
            frame.render_widget(
                notice(vec![Line::from(m.not_available)], m.similar_heading),
                area,
            );
        }
    }
}

// ---- favorites -----------------------------------------------------------------

/// Draws the favorites list.
#[allow(clippy::indexing_slicing)]
fn draw_favorites(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let m = state.messages;

    if state.favorites.is_empty() {
        let widget = notice(
            vec![
                Line::from(Span::styled(m.favorites_empty_title, heading_style())),
                Line::from(m.favorites_empty_hint),
                Line::from(""),
                Line::from(format!("{} (Enter)", m.discover_movies)),
            ],
            m.favorites_title,
        );
        frame.render_widget(widget, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let filter_style = if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let filter = Paragraph::new(state.favorites_view.filter.clone())
        .style(filter_style)
        .block(titled_block(m.filter_label));
    frame.render_widget(filter, chunks[0]);

    let rows: Vec<Row> = state
        .visible_favorites()
        .iter()
        .map(|entry| {
            Row::new(vec![
                String::from("\u{2665}"),
                entry.title.clone(),
                release_year(entry.release_date.as_deref())
                    .map_or_else(|| String::from("--"), |y| y.to_string()),
                format_rating(entry.vote_average, m),
            ])
        })
        .collect();
    let title = format!(
        "{} - {}",
        m.favorites_title,
        m.favorites_count(state.favorites.len())
    );
    let table = Table::new(rows, MOVIE_WIDTHS)
        .block(titled_block(&title))
        .row_highlight_style(highlight_style());
    frame.render_stateful_widget(table, chunks[1], &mut state.favorites_view.table_state);

    let tip = Paragraph::new(Span::styled(
        m.favorites_tip,
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(tip, chunks[2]);
}

// ---- footer --------------------------------------------------------------------

/// Draws the key hints, the status message or a confirmation prompt.
fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let m = state.messages;
    let line = if state.favorites_view.confirm_clear {
        Line::from(Span::styled(
            format!("{}: {}", m.clear_all, m.confirm_clear),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(ref status) = state.status {
        Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green)))
    } else {
        Line::from(key_hints(state))
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn key_hints(state: &AppState) -> &'static str {
    let m = state.messages;
    if state.input_mode == InputMode::Editing {
        return match state.route() {
            Route::Favorites => m.hints_filter_editing,
            _ => m.hints_search_editing,
        };
    }
    match state.route() {
        Route::Home => m.hints_home,
        Route::Search(_) => m.hints_search,
        Route::Movie(_) => m.hints_detail,
        Route::Favorites => m.hints_favorites,
    }
}
