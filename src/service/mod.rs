pub mod notice_service;

pub use notice_service::{parse_notice_id, NoticeService};
