use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod notice_repository;

pub use notice_repository::SqliteNoticeRepository;

/// Persistence for notices. Every method is a single store statement.
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    async fn create(&self, notice: NewNotice) -> Result<Notice>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notice>>;
    /// All notices, newest first.
    async fn list(&self) -> Result<Vec<Notice>>;
    /// Overwrites the supplied fields; `None` when no notice has this id.
    async fn update(&self, id: Uuid, changes: NoticeChanges) -> Result<Option<Notice>>;
    /// Removes the notice and hands back what was stored.
    async fn delete(&self, id: Uuid) -> Result<Option<Notice>>;
    async fn count(&self) -> Result<i64>;
}
