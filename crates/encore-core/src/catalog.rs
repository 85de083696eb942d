// Event catalog filtering
//
// The catalog loads the full event list once and filters it in memory on
// every request: case-insensitive substring search over title and artist,
// plus an exact genre match with an "all" sentinel.

use serde::{Deserialize, Serialize};

use crate::event::Event;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Genres offered by the catalog filter
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    All,
    Rock,
    Pop,
    Jazz,
    Classical,
    Hiphop,
    Electronic,
}

impl Genre {
    /// Every selectable genre, in display order
    pub const ALL_GENRES: [Genre; 7] = [
        Genre::All,
        Genre::Rock,
        Genre::Pop,
        Genre::Jazz,
        Genre::Classical,
        Genre::Hiphop,
        Genre::Electronic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::All => "all",
            Genre::Rock => "rock",
            Genre::Pop => "pop",
            Genre::Jazz => "jazz",
            Genre::Classical => "classical",
            Genre::Hiphop => "hiphop",
            Genre::Electronic => "electronic",
        }
    }

    /// Human label for the genre selector
    pub fn label(&self) -> &'static str {
        match self {
            Genre::All => "All genres",
            Genre::Rock => "Rock",
            Genre::Pop => "Pop",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::Hiphop => "Hiphop",
            Genre::Electronic => "Electronic",
        }
    }

    /// Exact match against an event's genre; `All` matches everything
    pub fn matches(&self, genre: &str) -> bool {
        match self {
            Genre::All => true,
            other => other.as_str() == genre,
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search term and genre selection applied to a fetched event list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    search: String,
    genre: Genre,
}

impl CatalogFilter {
    pub fn new(search: impl Into<String>, genre: Genre) -> Self {
        Self {
            search: search.into().to_lowercase(),
            genre,
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        let matches_search = event.title.to_lowercase().contains(&self.search)
            || event.artist.to_lowercase().contains(&self.search);
        matches_search && self.genre.matches(&event.genre)
    }

    /// Filter events, preserving their order
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
