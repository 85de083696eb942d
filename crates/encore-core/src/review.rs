// Review domain types
//
// Reviews are fetched newest first and re-sorted in memory; they are never
// re-queried for a different order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EncoreError, Result};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// A user-authored rating and comment attached to one event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Review {
    pub id: Uuid,
    pub event_id: String,
    pub user_id: Uuid,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review as rendered for a particular viewer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    /// Whether the delete action is offered to the viewer
    pub can_delete: bool,
}

/// Review ordering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ReviewSort {
    /// Creation time, newest first
    #[default]
    Latest,
    /// Rating, highest first
    Rating,
}

/// Re-sort an already fetched review list (stable)
pub fn sort_reviews(reviews: &mut [Review], sort: ReviewSort) {
    match sort {
        ReviewSort::Latest => reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ReviewSort::Rating => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
}

/// Whether `viewer` owns the review and may delete it
pub fn can_delete(review: &Review, viewer: Option<Uuid>) -> bool {
    viewer == Some(review.user_id)
}

/// Sort reviews and attach the viewer's permitted actions
pub fn review_views(
    mut reviews: Vec<Review>,
    sort: ReviewSort,
    viewer: Option<Uuid>,
) -> Vec<ReviewView> {
    sort_reviews(&mut reviews, sort);
    reviews
        .into_iter()
        .map(|review| {
            let can_delete = can_delete(&review, viewer);
            ReviewView { review, can_delete }
        })
        .collect()
}

/// Review submission from a signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NewReview {
    #[cfg_attr(feature = "openapi", schema(example = 5))]
    pub rating: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Great setlist, terrible sound."))]
    pub content: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(EncoreError::validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        if self.content.trim().is_empty() {
            return Err(EncoreError::validation("content is required"));
        }
        Ok(())
    }
}
