use std::sync::Arc;
use crate::service::NoticeService;

#[derive(Clone)]
pub struct AppState {
    pub notice_service: Arc<NoticeService>,
}

impl AppState {
    pub fn new(notice_service: Arc<NoticeService>) -> Self {
        Self { notice_service }
    }
}
