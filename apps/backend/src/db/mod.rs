//! PostgreSQL database operations

use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

use vocab_core::{Quality, RepetitionState, Sm2};

use crate::error::{ApiError, Result};
use crate::models::{DbCard, DbRepetition, Learner};

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Flattened card + repetition join row
#[derive(FromRow)]
struct CardWithRepetitionRow {
    id: i64,
    owner_id: Uuid,
    front_text: String,
    back_text: String,
    source_script: String,
    difficulty: String,
    created_at: chrono::DateTime<Utc>,
    next_review: chrono::DateTime<Utc>,
    interval_days: i32,
    easiness: f64,
    repetition_streak: i32,
    review_count: i32,
    last_result: bool,
    updated_at: chrono::DateTime<Utc>,
}

impl CardWithRepetitionRow {
    fn split(self) -> (DbCard, DbRepetition) {
        let card = DbCard {
            id: self.id,
            owner_id: self.owner_id,
            front_text: self.front_text,
            back_text: self.back_text,
            source_script: self.source_script,
            difficulty: self.difficulty,
            created_at: self.created_at,
        };
        let repetition = DbRepetition {
            card_id: card.id,
            next_review: self.next_review,
            interval_days: self.interval_days,
            easiness: self.easiness,
            repetition_streak: self.repetition_streak,
            review_count: self.review_count,
            last_result: self.last_result,
            updated_at: self.updated_at,
        };
        (card, repetition)
    }
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Learner Repository ===

    /// Get or create a learner keyed by Telegram ID.
    ///
    /// Returns the learner and whether it was newly created. A provided
    /// username refreshes the stored one on repeat registration.
    pub async fn register_learner(
        &self,
        telegram_id: i64,
        username: Option<&str>,
    ) -> Result<(Learner, bool)> {
        if let Some(existing) = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, telegram_id, username, token, created_at, last_seen_at
            FROM learners
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?
        {
            if let Some(name) = username {
                sqlx::query("UPDATE learners SET username = $1 WHERE id = $2")
                    .bind(name)
                    .bind(existing.id)
                    .execute(&self.pool)
                    .await?;
            }
            return Ok((existing, false));
        }

        let learner = sqlx::query_as::<_, Learner>(
            r#"
            INSERT INTO learners (id, telegram_id, username, token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, telegram_id, username, token, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(telegram_id)
        .bind(username)
        .bind(Uuid::new_v4().to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok((learner, true))
    }

    /// Get learner by token
    pub async fn get_learner_by_token(&self, token: &str) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, telegram_id, username, token, created_at, last_seen_at
            FROM learners
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Update learner last_seen_at timestamp
    pub async fn update_last_seen(&self, learner_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE learners
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Card Repository ===

    /// Insert a card together with its initial repetition record.
    ///
    /// The two rows are created in one transaction so a card can never
    /// exist without scheduling state.
    pub async fn insert_card(
        &self,
        owner_id: Uuid,
        front_text: &str,
        back_text: &str,
        source_script: &str,
        difficulty: &str,
        scheduler: &Sm2,
    ) -> Result<(DbCard, DbRepetition)> {
        let mut tx = self.pool.begin().await?;

        let card = sqlx::query_as::<_, DbCard>(
            r#"
            INSERT INTO cards (owner_id, front_text, back_text, source_script, difficulty)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, front_text, back_text, source_script, difficulty, created_at
            "#,
        )
        .bind(owner_id)
        .bind(front_text)
        .bind(back_text)
        .bind(source_script)
        .bind(difficulty)
        .fetch_one(&mut *tx)
        .await?;

        let initial = scheduler.initial_state(Utc::now());
        let repetition = DbRepetition::from_core_state(card.id, &initial);
        sqlx::query(
            r#"
            INSERT INTO repetitions (card_id, next_review, interval_days, easiness,
                                     repetition_streak, review_count, last_result)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(repetition.card_id)
        .bind(repetition.next_review)
        .bind(repetition.interval_days)
        .bind(repetition.easiness)
        .bind(repetition.repetition_streak)
        .bind(repetition.review_count)
        .bind(repetition.last_result)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((card, repetition))
    }

    /// Get a card by ID, scoped to its owner
    pub async fn get_card(&self, card_id: i64, owner_id: Uuid) -> Result<Option<DbCard>> {
        let card = sqlx::query_as::<_, DbCard>(
            r#"
            SELECT id, owner_id, front_text, back_text, source_script, difficulty, created_at
            FROM cards
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(card_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// All of a learner's cards with their repetition state
    pub async fn get_cards_with_state(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<(DbCard, DbRepetition)>> {
        let rows = sqlx::query_as::<_, CardWithRepetitionRow>(
            r#"
            SELECT c.id, c.owner_id, c.front_text, c.back_text, c.source_script,
                   c.difficulty, c.created_at,
                   r.next_review, r.interval_days, r.easiness, r.repetition_streak,
                   r.review_count, r.last_result, r.updated_at
            FROM cards c
            JOIN repetitions r ON r.card_id = c.id
            WHERE c.owner_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CardWithRepetitionRow::split).collect())
    }

    /// Correct the translation on a card
    pub async fn update_back_text(
        &self,
        card_id: i64,
        owner_id: Uuid,
        back_text: &str,
    ) -> Result<Option<DbCard>> {
        let card = sqlx::query_as::<_, DbCard>(
            r#"
            UPDATE cards
            SET back_text = $3
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, front_text, back_text, source_script, difficulty, created_at
            "#,
        )
        .bind(card_id)
        .bind(owner_id)
        .bind(back_text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// Delete a card; the repetition row goes with it (ON DELETE CASCADE)
    pub async fn delete_card(&self, card_id: i64, owner_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM cards
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(card_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Repetition Repository ===

    /// Get the repetition record for a card, scoped to its owner
    pub async fn get_repetition(
        &self,
        card_id: i64,
        owner_id: Uuid,
    ) -> Result<Option<DbRepetition>> {
        let repetition = sqlx::query_as::<_, DbRepetition>(
            r#"
            SELECT r.card_id, r.next_review, r.interval_days, r.easiness,
                   r.repetition_streak, r.review_count, r.last_result, r.updated_at
            FROM repetitions r
            JOIN cards c ON c.id = r.card_id
            WHERE r.card_id = $1 AND c.owner_id = $2
            "#,
        )
        .bind(card_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(repetition)
    }

    /// Apply one graded answer to a card's schedule.
    ///
    /// The read-modify-write runs inside a transaction holding a row lock
    /// (`FOR UPDATE`), so two concurrent answers to the same card cannot
    /// apply a stale base interval. Cards of other learners are untouched;
    /// no cross-card ordering is imposed.
    pub async fn review_card(
        &self,
        card_id: i64,
        owner_id: Uuid,
        quality: Quality,
        scheduler: &Sm2,
    ) -> Result<RepetitionState> {
        let mut tx = self.pool.begin().await?;

        let repetition = sqlx::query_as::<_, DbRepetition>(
            r#"
            SELECT r.card_id, r.next_review, r.interval_days, r.easiness,
                   r.repetition_streak, r.review_count, r.last_result, r.updated_at
            FROM repetitions r
            JOIN cards c ON c.id = r.card_id
            WHERE r.card_id = $1 AND c.owner_id = $2
            FOR UPDATE OF r
            "#,
        )
        .bind(card_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Repetition state for card {}", card_id)))?;

        let updated = scheduler.schedule(&repetition.to_core_state(), quality, Utc::now());

        sqlx::query(
            r#"
            UPDATE repetitions
            SET next_review = $2,
                interval_days = $3,
                easiness = $4,
                repetition_streak = $5,
                review_count = $6,
                last_result = $7,
                updated_at = NOW()
            WHERE card_id = $1
            "#,
        )
        .bind(card_id)
        .bind(updated.next_review)
        .bind(updated.interval as i32)
        .bind(updated.easiness)
        .bind(updated.repetition_streak as i32)
        .bind(updated.review_count as i32)
        .bind(updated.last_result)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
