//! Event form drafts and the checks they pass before submission.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::event::{Event, NewEvent, User};
use crate::ids::Id;

pub const MAX_TITLE_CHARS: usize = 100;

/// Words shown in a description preview before it is cut.
pub const DESCRIPTION_WORD_LIMIT: usize = 200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Please keep the title under {MAX_TITLE_CHARS} characters.")]
    TitleTooLong { chars: usize },
}

/// Values used when the form leaves attribution fields empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub fallback_category_id: Id,
    pub fallback_creator_id: Id,
}

/// The user-editable part of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub category_ids: Vec<Id>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        EventDraft {
            title: title.into(),
            description: None,
            location: None,
            image: None,
            start_time,
            end_time,
            category_ids: Vec::new(),
        }
    }

    /// Pre-fill a draft from an existing event (edit mode).
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            image: event.image.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            category_ids: event.category_ids.clone(),
        }
    }

    pub fn toggle_category(&mut self, id: Id, selected: bool) {
        let present = self.category_ids.contains(&id);
        if selected && !present {
            self.category_ids.push(id);
        } else if !selected && present {
            self.category_ids.retain(|c| c != &id);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::EndNotAfterStart);
        }

        let chars = self.title.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong { chars });
        }

        Ok(())
    }

    /// Validate and fill in defaults, producing the request body.
    pub fn submit(
        self,
        current_user: Option<&User>,
        defaults: &FormDefaults,
    ) -> Result<NewEvent, ValidationError> {
        self.validate()?;

        let category_ids = if self.category_ids.is_empty() {
            vec![defaults.fallback_category_id.clone()]
        } else {
            self.category_ids
        };

        let created_by = current_user
            .map(|u| u.id.clone())
            .unwrap_or_else(|| defaults.fallback_creator_id.clone());

        Ok(NewEvent {
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            category_ids,
            image: self.image,
            created_by: Some(created_by),
        })
    }
}

/// Cut a description to `limit` whitespace-separated words, appending `...`
/// when anything was dropped.
pub fn truncate_description(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return text.to_string();
    }
    format!("{}...", words[..limit].join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Role, timestamp};

    fn defaults() -> FormDefaults {
        FormDefaults {
            fallback_category_id: Id::from(4),
            fallback_creator_id: Id::from(1),
        }
    }

    fn draft(start: &str, end: &str) -> EventDraft {
        EventDraft::new(
            "Picnic",
            timestamp::parse(start).unwrap(),
            timestamp::parse(end).unwrap(),
        )
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = draft("2024-05-01T12:00", "2024-05-01T10:00")
            .submit(None, &defaults())
            .unwrap_err();
        assert_eq!(err, ValidationError::EndNotAfterStart);
        assert_eq!(err.to_string(), "End time must be after start time");
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let result = draft("2024-05-01T12:00", "2024-05-01T12:00").validate();
        assert_eq!(result, Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn title_limit_counts_characters() {
        let mut d = draft("2024-05-01T10:00", "2024-05-01T12:00");
        d.title = "é".repeat(MAX_TITLE_CHARS);
        assert!(d.validate().is_ok());

        d.title.push('x');
        assert_eq!(
            d.validate(),
            Err(ValidationError::TitleTooLong { chars: 101 })
        );
    }

    #[test]
    fn empty_categories_and_creator_get_fallbacks() {
        let event = draft("2024-05-01T10:00", "2024-05-01T12:00")
            .submit(None, &defaults())
            .unwrap();
        assert_eq!(event.category_ids, vec![Id::from(4)]);
        assert_eq!(event.created_by, Some(Id::from(1)));
    }

    #[test]
    fn session_user_becomes_creator() {
        let user = User {
            id: Id::from(7),
            name: "Ann".into(),
            role: Role::Admin,
            image: None,
        };
        let mut d = draft("2024-05-01T10:00", "2024-05-01T12:00");
        d.toggle_category(Id::from(2), true);

        let event = d.submit(Some(&user), &defaults()).unwrap();
        assert_eq!(event.created_by, Some(Id::from(7)));
        assert_eq!(event.category_ids, vec![Id::from(2)]);
    }

    #[test]
    fn draft_toggle_category_ignores_duplicates() {
        let mut d = draft("2024-05-01T10:00", "2024-05-01T12:00");
        d.toggle_category(Id::from(1), true);
        d.toggle_category(Id::from(1), true);
        d.toggle_category(Id::from(3), false);
        assert_eq!(d.category_ids, vec![Id::from(1)]);
    }

    #[test]
    fn long_descriptions_are_truncated_by_words() {
        assert_eq!(truncate_description("a b c", 5), "a b c");
        assert_eq!(truncate_description("a b  c d", 2), "a b...");
    }
}
