// Event service: catalog and detail views
//
// Read failures never surface to the viewer: a failed list renders an empty
// catalog, a failed lookup renders not-found, and failed reviews render an
// empty reviews list. Each failure is logged.

use encore_core::{CatalogView, EventDetail, EventInfo, EventSource, Genre, ReviewSort};
use std::sync::Arc;
use uuid::Uuid;

use super::ReviewService;

pub struct EventService {
    source: Arc<dyn EventSource>,
    reviews: Arc<ReviewService>,
}

impl EventService {
    pub fn new(source: Arc<dyn EventSource>, reviews: Arc<ReviewService>) -> Self {
        Self { source, reviews }
    }

    /// Fetch the whole list once and filter it in memory
    pub async fn catalog(&self, search: &str, genre: Genre) -> CatalogView {
        let events = match self.source.fetch_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(source = self.source.kind(), "Failed to fetch events: {}", e);
                Vec::new()
            }
        };

        CatalogView::build(&events, search, genre)
    }

    /// One event with its info box and reviews, or None when not found
    pub async fn detail(
        &self,
        event_id: &str,
        sort: ReviewSort,
        viewer: Option<Uuid>,
    ) -> Option<EventDetail> {
        let event = match self.source.fetch_event_by_id(event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(event_id = %event_id, "Failed to fetch event: {}", e);
                return None;
            }
        };

        let reviews = self
            .reviews
            .list_for_viewer(event_id, sort, viewer)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(event_id = %event_id, "Failed to fetch reviews: {}", e);
                Vec::new()
            });

        Some(EventDetail {
            info: EventInfo::from(&event),
            event,
            sort,
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::memory::InMemoryEventSource;
    use encore_core::{Event, NewReview};
    use encore_storage::StorageBackend;

    fn event(id: &str, title: &str, genre: &str, start: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Band".to_string(),
            genre: genre.to_string(),
            start_date: start.to_string(),
            ..Default::default()
        }
    }

    fn service(source: InMemoryEventSource) -> (EventService, Arc<ReviewService>) {
        let reviews = Arc::new(ReviewService::new(StorageBackend::in_memory()));
        (EventService::new(Arc::new(source), reviews.clone()), reviews)
    }

    #[tokio::test]
    async fn test_catalog_filters_fetched_events() {
        let (service, _) = service(InMemoryEventSource::new(vec![
            event("1", "Summer Jazz", "jazz", "2025-06-01"),
            event("2", "Rock Night", "rock", "2025-05-01"),
        ]));

        let all = service.catalog("", Genre::All).await;
        assert_eq!(all.events.len(), 2);
        assert_eq!(all.events[0].id, "2");

        let jazz = service.catalog("", Genre::Jazz).await;
        assert_eq!(jazz.events.len(), 1);

        let search = service.catalog("NIGHT", Genre::All).await;
        assert_eq!(search.events[0].title, "Rock Night");
    }

    #[tokio::test]
    async fn test_catalog_failure_renders_empty() {
        let source = InMemoryEventSource::new(vec![event("1", "Show", "pop", "2025-06-01")]);
        source.set_failing(true).await;
        let (service, _) = service(source);

        let view = service.catalog("", Genre::All).await;
        assert!(view.events.is_empty());
        assert_eq!(view.genres.len(), Genre::ALL_GENRES.len());
    }

    #[tokio::test]
    async fn test_detail_with_reviews() {
        let id = Uuid::now_v7().to_string();
        let (service, reviews) =
            service(InMemoryEventSource::new(vec![event(&id, "Show", "pop", "2025-06-01")]));
        let viewer = Uuid::now_v7();
        reviews
            .create(
                &id,
                viewer,
                NewReview {
                    rating: 5,
                    content: "great".to_string(),
                },
            )
            .await
            .unwrap();

        let detail = service
            .detail(&id, ReviewSort::Rating, Some(viewer))
            .await
            .unwrap();
        assert_eq!(detail.event.title, "Show");
        assert_eq!(detail.info.genre, "pop");
        assert_eq!(detail.reviews.len(), 1);
        assert!(detail.reviews[0].can_delete);
    }

    #[tokio::test]
    async fn test_detail_missing_or_failing_is_none() {
        let source = InMemoryEventSource::new(vec![event("1", "Show", "pop", "2025-06-01")]);
        let (service, _) = service(source.clone());
        assert!(service.detail("2", ReviewSort::Latest, None).await.is_none());

        source.set_failing(true).await;
        assert!(service.detail("1", ReviewSort::Latest, None).await.is_none());
    }
}
