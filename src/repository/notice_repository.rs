use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{NewNotice, Notice, NoticeChanges, NoticeTag},
    error::{AppError, Result},
    repository::NoticeRepository,
};

#[derive(FromRow)]
struct NoticeRow {
    id: String,
    topic: String,
    body: String,
    tag: String,
    link: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteNoticeRepository {
    pool: SqlitePool,
}

impl SqliteNoticeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_notice(row: NoticeRow) -> Result<Notice> {
        Ok(Notice {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            topic: row.topic,
            body: row.body,
            tag: NoticeTag::from_str(&row.tag)
                .ok_or_else(|| AppError::Database(format!("Invalid notice tag: {}", row.tag)))?,
            link: row.link,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    /// CHECK constraints are the store-level schema validators; a violation is
    /// the caller's fault, everything else is a store failure.
    fn map_write_error(err: sqlx::Error) -> AppError {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                AppError::Validation(format!("Notice validation failed: {}", db_err.message()))
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

#[async_trait]
impl NoticeRepository for SqliteNoticeRepository {
    async fn create(&self, notice: NewNotice) -> Result<Notice> {
        let id = Uuid::new_v4();
        let now = Utc::now().naive_utc();

        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            INSERT INTO notices (id, topic, body, tag, link, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, topic, body, tag, link, created_at, updated_at
            "#,
        )
        .bind(id.to_string())
        .bind(&notice.topic)
        .bind(&notice.body)
        .bind(notice.tag.as_str())
        .bind(&notice.link)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_write_error)?;

        Self::row_to_notice(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>> {
        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            SELECT id, topic, body, tag, link, created_at, updated_at
            FROM notices
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_notice).transpose()
    }

    async fn list(&self) -> Result<Vec<Notice>> {
        let rows = sqlx::query_as::<_, NoticeRow>(
            r#"
            SELECT id, topic, body, tag, link, created_at, updated_at
            FROM notices
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_notice).collect()
    }

    async fn update(&self, id: Uuid, changes: NoticeChanges) -> Result<Option<Notice>> {
        let now = Utc::now().naive_utc();

        // Single statement: absent fields fall back to the stored column.
        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            UPDATE notices
            SET topic = COALESCE(?, topic),
                body = COALESCE(?, body),
                tag = COALESCE(?, tag),
                link = COALESCE(?, link),
                updated_at = ?
            WHERE id = ?
            RETURNING id, topic, body, tag, link, created_at, updated_at
            "#,
        )
        .bind(changes.topic)
        .bind(changes.body)
        .bind(changes.tag.map(|tag| tag.as_str()))
        .bind(changes.link)
        .bind(now)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::map_write_error)?;

        row.map(Self::row_to_notice).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Notice>> {
        let row = sqlx::query_as::<_, NoticeRow>(
            r#"
            DELETE FROM notices
            WHERE id = ?
            RETURNING id, topic, body, tag, link, created_at, updated_at
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        row.map(Self::row_to_notice).transpose()
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notices")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }
}
