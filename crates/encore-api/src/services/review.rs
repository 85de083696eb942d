// Review service

use encore_core::{review_views, EncoreError, NewReview, Result, Review, ReviewSort, ReviewView};
use encore_storage::{CreateReviewRow, ReviewRow, StorageBackend};
use uuid::Uuid;

pub struct ReviewService {
    db: StorageBackend,
}

impl ReviewService {
    pub fn new(db: StorageBackend) -> Self {
        Self { db }
    }

    /// Reviews of an event, newest first
    pub async fn list(&self, event_id: &str) -> Result<Vec<Review>> {
        let rows = self
            .db
            .list_reviews(event_id)
            .await
            .map_err(EncoreError::store)?;

        Ok(rows.into_iter().map(Self::row_to_review).collect())
    }

    /// Reviews of an event in the requested order, flagged for the viewer
    pub async fn list_for_viewer(
        &self,
        event_id: &str,
        sort: ReviewSort,
        viewer: Option<Uuid>,
    ) -> Result<Vec<ReviewView>> {
        let reviews = self.list(event_id).await?;
        Ok(review_views(reviews, sort, viewer))
    }

    pub async fn create(&self, event_id: &str, user_id: Uuid, req: NewReview) -> Result<Review> {
        req.validate()?;

        let row = self
            .db
            .create_review(CreateReviewRow {
                event_id: event_id.to_string(),
                user_id,
                rating: req.rating,
                content: req.content,
            })
            .await
            .map_err(EncoreError::store)?;

        tracing::info!(review_id = %row.id, event_id = %row.event_id, "Review created");
        Ok(Self::row_to_review(row))
    }

    /// Delete a review; only its author may
    pub async fn delete(&self, review_id: Uuid, user_id: Uuid) -> Result<()> {
        let review = self
            .db
            .get_review(review_id)
            .await
            .map_err(EncoreError::store)?
            .ok_or_else(|| EncoreError::not_found(format!("review {}", review_id)))?;

        if review.user_id != user_id {
            return Err(EncoreError::forbidden("only the author can delete a review"));
        }

        let deleted = self
            .db
            .delete_review(review_id, user_id)
            .await
            .map_err(EncoreError::store)?;
        if !deleted {
            return Err(EncoreError::not_found(format!("review {}", review_id)));
        }

        tracing::info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    fn row_to_review(row: ReviewRow) -> Review {
        Review {
            id: row.id,
            event_id: row.event_id,
            user_id: row.user_id,
            rating: row.rating,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
