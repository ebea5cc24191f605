//! Favorites list persisted as JSON text.
//!
//! The whole list is rewritten on every mutation. Writes go to a sibling
//! temporary file that is then renamed over the target, so a crash never
//! leaves a half-written list behind.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A favorited movie: the subset of movie metadata needed to render a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// TMDB movie ID (unique within the list).
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Ordered favorites list keyed by movie id.
///
/// Invariant: no two entries share an id.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FavoritesStore {
    /// Backing file.
    path: PathBuf,
    /// Entries in insertion order.
    entries: Vec<FavoriteEntry>,
}

impl FavoritesStore {
    /// Opens the store at `path`.
    ///
    /// A missing or empty file yields an empty list. Duplicate ids in the
    /// file are dropped (first occurrence wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                let raw: Vec<FavoriteEntry> = serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                dedup_by_id(raw)
            }
        } else {
            Vec::new()
        };

        tracing::debug!(path = %path.display(), count = entries.len(), "Favorites loaded");

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the movie is in the list.
    #[must_use]
    pub fn is_favorite(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&FavoriteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Adds an entry. Returns `false` (and leaves the list untouched) if the
    /// id is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the list fails. The in-memory list is
    /// unchanged in that case.
    pub fn add(&mut self, entry: FavoriteEntry) -> Result<bool> {
        if self.is_favorite(entry.id) {
            return Ok(false);
        }
        let (id, title) = (entry.id, entry.title.clone());
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;
        tracing::info!(id, %title, "Added to favorites");
        Ok(true)
    }

    /// Removes an entry by id. Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the list fails. The in-memory list is
    /// unchanged in that case.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        if !self.is_favorite(id) {
            return Ok(false);
        }
        let next: Vec<FavoriteEntry> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        tracing::info!(id, "Removed from favorites");
        Ok(true)
    }

    /// Removes the entry if present, otherwise adds it.
    /// Returns the new membership state.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the list fails.
    pub fn toggle(&mut self, entry: FavoriteEntry) -> Result<bool> {
        if self.remove(entry.id)? {
            Ok(false)
        } else {
            self.add(entry)
        }
    }

    /// Removes every entry and persists the empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the list fails. The in-memory list is
    /// unchanged in that case.
    pub fn clear(&mut self) -> Result<()> {
        let removed = self.entries.len();
        self.commit(Vec::new())?;
        tracing::info!(removed, "Favorites cleared");
        Ok(())
    }

    /// Persists `next` and only then replaces the in-memory list.
    fn commit(&mut self, next: Vec<FavoriteEntry>) -> Result<()> {
        write_entries(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }
}

/// Writes `entries` to `path` through a sibling temp file, creating parent
/// directories if needed.
fn write_entries(path: &Path, entries: &[FavoriteEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(entries).context("failed to serialize favorites")?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, content)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("failed to replace {}", path.display()));
    }
    Ok(())
}

/// Drops entries whose id already appeared earlier in the list.
fn dedup_by_id(entries: Vec<FavoriteEntry>) -> Vec<FavoriteEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    let total = entries.len();
    let unique: Vec<FavoriteEntry> = entries.into_iter().filter(|e| seen.insert(e.id)).collect();
    if unique.len() != total {
        tracing::warn!(
            dropped = total.saturating_sub(unique.len()),
            "Dropped duplicate favorites while loading"
        );
    }
    unique
}
