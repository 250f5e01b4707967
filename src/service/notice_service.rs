use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{CreateNoticeRequest, Notice, UpdateNoticeRequest},
    error::{AppError, Result},
    repository::NoticeRepository,
};

/// Ids are validated here so that a malformed one never reaches the store.
pub fn parse_notice_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidId)
}

pub struct NoticeService {
    repo: Arc<dyn NoticeRepository>,
}

impl NoticeService {
    pub fn new(repo: Arc<dyn NoticeRepository>) -> Self {
        Self { repo }
    }

    /// List every notice, newest first
    pub async fn list(&self) -> Result<Vec<Notice>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: &str) -> Result<Notice> {
        let id = parse_notice_id(id)?;

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No such notice found.".to_string()))
    }

    pub async fn create(&self, request: CreateNoticeRequest) -> Result<Notice> {
        let new_notice = request.into_new_notice()?;
        let notice = self.repo.create(new_notice).await?;

        tracing::info!(notice_id = %notice.id, tag = notice.tag.as_str(), "Notice created");
        Ok(notice)
    }

    /// Merge the supplied fields into the stored notice
    pub async fn update(&self, id: &str, request: UpdateNoticeRequest) -> Result<Notice> {
        let id = parse_notice_id(id)?;
        let changes = request.into_changes()?;

        let notice = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("No such notice found to update.".to_string()))?;

        tracing::info!(notice_id = %notice.id, "Notice updated");
        Ok(notice)
    }

    pub async fn delete(&self, id: &str) -> Result<Notice> {
        let id = parse_notice_id(id)?;

        let notice = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No such notice found to delete.".to_string()))?;

        tracing::info!(notice_id = %notice.id, "Notice deleted");
        Ok(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::domain::{NewNotice, NoticeChanges};

    /// Fails the test if any store call is made.
    struct UnreachableRepository;

    #[async_trait]
    impl NoticeRepository for UnreachableRepository {
        async fn create(&self, _notice: NewNotice) -> Result<Notice> {
            panic!("store must not be reached")
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Notice>> {
            panic!("store must not be reached")
        }
        async fn list(&self) -> Result<Vec<Notice>> {
            panic!("store must not be reached")
        }
        async fn update(&self, _id: Uuid, _changes: NoticeChanges) -> Result<Option<Notice>> {
            panic!("store must not be reached")
        }
        async fn delete(&self, _id: Uuid) -> Result<Option<Notice>> {
            panic!("store must not be reached")
        }
        async fn count(&self) -> Result<i64> {
            panic!("store must not be reached")
        }
    }

    fn service() -> NoticeService {
        NoticeService::new(Arc::new(UnreachableRepository))
    }

    #[test]
    fn test_parse_notice_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_notice_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_notice_id("507f1f77bcf86cd799439011"), Err(AppError::InvalidId)));
        assert!(matches!(parse_notice_id(""), Err(AppError::InvalidId)));
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let service = service();

        assert!(matches!(service.get("not-an-id").await, Err(AppError::InvalidId)));
        assert!(matches!(
            service.update("not-an-id", UpdateNoticeRequest::default()).await,
            Err(AppError::InvalidId)
        ));
        assert!(matches!(service.delete("not-an-id").await, Err(AppError::InvalidId)));
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let result = service()
            .create(CreateNoticeRequest {
                topic: Some("Sports day".to_string()),
                body: Some("Bring water".to_string()),
                tag: Some("sports".to_string()),
                link: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_update_never_reaches_store() {
        let id = Uuid::new_v4().to_string();
        let result = service()
            .update(
                &id,
                UpdateNoticeRequest {
                    body: Some("\t".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
