//! Browser-style routes and back-stack history.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use url::Url;
use url::form_urlencoded;

/// Base used to resolve relative route strings.
const ROUTE_BASE: &str = "filmdeck://app/";

/// A navigable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/movie/:id`
    Movie(u64),
    /// `/search?query=`
    Search(Option<String>),
    /// `/favorites`
    Favorites,
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let base = Url::parse(ROUTE_BASE).context("invalid route base")?;
        let url = base
            .join(s.trim())
            .with_context(|| format!("invalid route: {s}"))?;

        let path = url.path().trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["favorites"] => Ok(Self::Favorites),
            ["search"] => {
                let query = url
                    .query_pairs()
                    .find(|(k, _)| k == "query")
                    .map(|(_, v)| v.into_owned())
                    .filter(|q| !q.trim().is_empty());
                Ok(Self::Search(query))
            }
            ["movie", id] => {
                let id: u64 = id
                    .parse()
                    .with_context(|| format!("invalid movie id in route: {id}"))?;
                Ok(Self::Movie(id))
            }
            _ => bail!("unknown route: {s}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Movie(id) => write!(f, "/movie/{id}"),
            Self::Search(None) => f.write_str("/search"),
            Self::Search(Some(query)) => {
                let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
                write!(f, "/search?query={encoded}")
            }
            Self::Favorites => f.write_str("/favorites"),
        }
    }
}

/// Current route plus the back-stack.
#[derive(Debug)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    /// Starts at `route` with an empty history.
    #[must_use]
    pub const fn new(route: Route) -> Self {
        Self {
            current: route,
            history: Vec::new(),
        }
    }

    /// The current route.
    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    /// Navigates to `route`, pushing the current one onto the back-stack.
    /// Navigating to the current route is a no-op.
    pub fn push(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    /// Replaces the current route without touching the back-stack.
    pub fn replace(&mut self, route: Route) {
        self.current = route;
    }

    /// Goes back one entry. Returns `false` when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Depth of the back-stack.
    #[cfg(test)]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
