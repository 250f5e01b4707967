use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};

pub const MAX_TOPIC_LEN: u64 = 200;
pub const MAX_BODY_LEN: u64 = 10_000;
pub const MAX_LINK_LEN: u64 = 2_048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub topic: String,
    pub body: String,
    pub tag: NoticeTag,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeTag {
    Urgent,
    New,
    Academic,
    General,
    Event,
}

impl NoticeTag {
    pub const ALL: [NoticeTag; 5] = [
        NoticeTag::Urgent,
        NoticeTag::New,
        NoticeTag::Academic,
        NoticeTag::General,
        NoticeTag::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeTag::Urgent => "urgent",
            NoticeTag::New => "new",
            NoticeTag::Academic => "academic",
            NoticeTag::General => "general",
            NoticeTag::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }

    /// Parses caller input, trimming surrounding whitespace first.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        Self::from_str(trimmed).ok_or_else(|| {
            let allowed: Vec<&str> = Self::ALL.iter().map(NoticeTag::as_str).collect();
            AppError::Validation(format!(
                "`{}` is not a valid tag. Expected one of: {}.",
                trimmed,
                allowed.join(", ")
            ))
        })
    }
}

/// Body of `POST /notices`. Everything is optional at the wire level so that a
/// missing field yields a readable validation message instead of a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoticeRequest {
    pub topic: Option<String>,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub link: Option<String>,
}

/// Body of `PUT /notices/{id}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoticeRequest {
    pub topic: Option<String>,
    pub body: Option<String>,
    pub tag: Option<String>,
    pub link: Option<String>,
}

/// A fully normalized notice ready to be inserted.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewNotice {
    #[validate(length(max = MAX_TOPIC_LEN, message = "Topic must be at most 200 characters."))]
    pub topic: String,
    #[validate(length(max = MAX_BODY_LEN, message = "Body must be at most 10000 characters."))]
    pub body: String,
    pub tag: NoticeTag,
    #[validate(length(max = MAX_LINK_LEN, message = "Link must be at most 2048 characters."))]
    pub link: String,
}

/// Normalized field overwrites for an update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct NoticeChanges {
    #[validate(length(max = MAX_TOPIC_LEN, message = "Topic must be at most 200 characters."))]
    pub topic: Option<String>,
    #[validate(length(max = MAX_BODY_LEN, message = "Body must be at most 10000 characters."))]
    pub body: Option<String>,
    pub tag: Option<NoticeTag>,
    #[validate(length(max = MAX_LINK_LEN, message = "Link must be at most 2048 characters."))]
    pub link: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn required(value: Option<String>, message: &str, missing: &mut Vec<String>) -> String {
    match trimmed(value) {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(message.to_string());
            String::new()
        }
    }
}

impl CreateNoticeRequest {
    pub fn into_new_notice(self) -> Result<NewNotice> {
        let mut missing = Vec::new();
        let topic = required(self.topic, "Topic is required.", &mut missing);
        let body = required(self.body, "Body is required.", &mut missing);
        let tag = required(self.tag, "Tag is required.", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::Validation(missing.join(" ")));
        }

        let notice = NewNotice {
            topic,
            body,
            tag: NoticeTag::parse(&tag)?,
            link: trimmed(self.link).unwrap_or_default(),
        };
        notice.validate()?;

        Ok(notice)
    }
}

impl UpdateNoticeRequest {
    pub fn into_changes(self) -> Result<NoticeChanges> {
        let topic = trimmed(self.topic);
        let body = trimmed(self.body);

        if topic.as_deref() == Some("") {
            return Err(AppError::Validation("Topic cannot be empty.".to_string()));
        }
        if body.as_deref() == Some("") {
            return Err(AppError::Validation("Body cannot be empty.".to_string()));
        }

        let changes = NoticeChanges {
            topic,
            body,
            tag: self.tag.as_deref().map(NoticeTag::parse).transpose()?,
            link: trimmed(self.link),
        };
        changes.validate()?;

        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(topic: &str, body: &str, tag: &str) -> CreateNoticeRequest {
        CreateNoticeRequest {
            topic: Some(topic.to_string()),
            body: Some(body.to_string()),
            tag: Some(tag.to_string()),
            link: None,
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in NoticeTag::ALL {
            assert_eq!(NoticeTag::from_str(tag.as_str()), Some(tag));
        }
        assert_eq!(NoticeTag::from_str("Urgent"), None);
        assert_eq!(NoticeTag::parse("  event ").unwrap(), NoticeTag::Event);
    }

    #[test]
    fn test_tag_outside_enumeration() {
        let err = NoticeTag::parse("sports").unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("`sports`")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_trims_and_defaults_link() {
        let notice = request("  Exam Schedule ", "Midterms start Monday\n", "academic")
            .into_new_notice()
            .unwrap();
        assert_eq!(notice.topic, "Exam Schedule");
        assert_eq!(notice.body, "Midterms start Monday");
        assert_eq!(notice.tag, NoticeTag::Academic);
        assert_eq!(notice.link, "");
    }

    #[test]
    fn test_create_requires_topic_and_body() {
        let err = CreateNoticeRequest {
            topic: Some("   ".to_string()),
            body: None,
            tag: Some("new".to_string()),
            link: None,
        }
        .into_new_notice()
        .unwrap_err();

        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("Topic is required."));
                assert!(msg.contains("Body is required."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_tag() {
        let mut req = request("Topic", "Body", "new");
        req.tag = None;
        assert!(matches!(req.into_new_notice(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_long_topic() {
        let long = "x".repeat(MAX_TOPIC_LEN as usize + 1);
        let err = request(&long, "Body", "general").into_new_notice().unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("Topic must be at most")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_update_keeps_absent_fields_absent() {
        let changes = UpdateNoticeRequest {
            tag: Some("urgent".to_string()),
            ..Default::default()
        }
        .into_changes()
        .unwrap();

        assert_eq!(changes.tag, Some(NoticeTag::Urgent));
        assert!(changes.topic.is_none());
        assert!(changes.body.is_none());
        assert!(changes.link.is_none());
    }

    #[test]
    fn test_update_rejects_blank_topic() {
        let result = UpdateNoticeRequest {
            topic: Some(" ".to_string()),
            ..Default::default()
        }
        .into_changes();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_allows_clearing_link() {
        let changes = UpdateNoticeRequest {
            link: Some("".to_string()),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.link.as_deref(), Some(""));
    }
}
