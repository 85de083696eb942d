// View models for the catalog and detail pages

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogFilter, Genre};
use crate::event::Event;
use crate::review::{ReviewSort, ReviewView};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Entry of the genre selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GenreOption {
    pub value: Genre,
    pub label: String,
    pub selected: bool,
}

/// Filtered event list with the active filter state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CatalogView {
    pub search: String,
    pub genre: Genre,
    pub genres: Vec<GenreOption>,
    pub events: Vec<Event>,
}

impl CatalogView {
    /// Filter an already fetched list
    pub fn build(events: &[Event], search: &str, genre: Genre) -> Self {
        let filter = CatalogFilter::new(search, genre);
        Self {
            search: search.to_string(),
            genre,
            genres: genre_options(genre),
            events: filter.apply(events),
        }
    }
}

fn genre_options(selected: Genre) -> Vec<GenreOption> {
    Genre::ALL_GENRES
        .iter()
        .map(|g| GenreOption {
            value: *g,
            label: g.label().to_string(),
            selected: *g == selected,
        })
        .collect()
}

/// Schedule, venue and ticketing box of the detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventInfo {
    pub start_date: String,
    pub end_date: String,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    /// Present only when both coordinates are known
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<f64>>))]
    pub coordinates: Option<(f64, f64)>,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_limit: Option<String>,
}

impl From<&Event> for EventInfo {
    fn from(event: &Event) -> Self {
        Self {
            start_date: event.start_date.clone(),
            end_date: event.end_date.clone(),
            venue: event.venue.clone(),
            venue_address: event.venue_address.clone(),
            coordinates: event.venue_lat.zip(event.venue_lng),
            genre: event.genre.clone(),
            price_range: event.price_range.clone(),
            ticket_url: event.ticket_url.clone(),
            ticket_open_time: event.ticket_open_time.clone(),
            age_limit: event.age_limit.clone(),
        }
    }
}

/// Single event with its info box and reviews
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventDetail {
    pub event: Event,
    pub info: EventInfo,
    pub sort: ReviewSort,
    pub reviews: Vec<ReviewView>,
}
