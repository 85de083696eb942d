// Repository layer for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::*;

const EVENT_COLUMNS: &str = "id, title, artist, description, start_date, end_date, venue, \
     venue_address, venue_lat, venue_lng, genre, image_url, price_range, ticket_url, \
     ticket_open_time, age_limit, artist_profile, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let sql = format!(
            r#"
            INSERT INTO events (
                title, artist, description, start_date, end_date, venue, venue_address,
                venue_lat, venue_lng, genre, image_url, price_range, ticket_url,
                ticket_open_time, age_limit, artist_profile
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.venue)
            .bind(&input.venue_address)
            .bind(input.venue_lat)
            .bind(input.venue_lng)
            .bind(&input.genre)
            .bind(&input.image_url)
            .bind(&input.price_range)
            .bind(&input.ticket_url)
            .bind(input.ticket_open_time)
            .bind(&input.age_limit)
            .bind(&input.artist_profile)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let sql = format!(
            "SELECT {} FROM events ORDER BY start_date ASC, created_at ASC",
            EVENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // ============================================
    // Reviews
    // ============================================

    pub async fn create_review(&self, input: CreateReviewRow) -> Result<ReviewRow> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (event_id, user_id, rating, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, user_id, rating, content, created_at, updated_at
            "#,
        )
        .bind(&input.event_id)
        .bind(input.user_id)
        .bind(input.rating)
        .bind(&input.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<ReviewRow>> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, event_id, user_id, rating, content, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Reviews of one event, newest first
    pub async fn list_reviews(&self, event_id: &str) -> Result<Vec<ReviewRow>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, event_id, user_id, rating, content, created_at, updated_at
            FROM reviews
            WHERE event_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete a review owned by `user_id`; returns false when nothing matched
    pub async fn delete_review(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Notifications
    // ============================================

    pub async fn create_notification(
        &self,
        input: CreateNotificationRow,
    ) -> Result<NotificationRow> {
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            INSERT INTO notifications (user_id, event_id, type, notification_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, type, notification_date, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.event_id)
        .bind(&input.kind)
        .bind(input.notification_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, user_id, event_id, type, notification_date, created_at, updated_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Subscriptions of one user with their event, newest first
    pub async fn list_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationWithEventRow>> {
        let rows = sqlx::query_as::<_, NotificationWithEventRow>(
            r#"
            SELECT
                n.id, n.user_id, n.event_id, n.type, n.notification_date,
                n.created_at, n.updated_at,
                e.title AS event_title,
                e.venue AS event_venue,
                e.start_date AS event_start_date
            FROM notifications n
            LEFT JOIN events e ON e.id::text = n.event_id
            WHERE n.user_id = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_notification_date(
        &self,
        id: Uuid,
        user_id: Uuid,
        notification_date: DateTime<Utc>,
    ) -> Result<Option<NotificationRow>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            UPDATE notifications
            SET notification_date = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, event_id, type, notification_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(notification_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_notification(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Notification history
    // ============================================

    /// Delivery history of one user with the event title, most recently sent first
    pub async fn list_notification_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationHistoryRow>> {
        let rows = sqlx::query_as::<_, NotificationHistoryRow>(
            r#"
            SELECT
                h.id, h.notification_id, h.user_id, h.sent_at, h.status,
                h.created_at, h.updated_at,
                e.title AS event_title
            FROM notification_history h
            LEFT JOIN notifications n ON n.id = h.notification_id
            LEFT JOIN events e ON e.id::text = n.event_id
            WHERE h.user_id = $1
            ORDER BY h.sent_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
