//! Local persistence for filmdeck.
//!
//! Keeps the user's favorite movies in a JSON text file, the terminal
//! counterpart of browser local storage.

/// Favorites list with immediate persistence.
pub mod favorites;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use favorites::{FavoriteEntry, FavoritesStore};
pub use paths::{resolve_data_dir, resolve_favorites_path};
