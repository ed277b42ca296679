//! Event, category and user records as exchanged with the REST backend.
//!
//! Field names follow the backend's camelCase JSON. Optional text fields are
//! tolerated as missing; the form layer decides what a new event must carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::Id;

/// A calendar item with a time range, location, categories and an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Id,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub category_ids: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Id>,
}

/// An event without its server-assigned id: the body of create requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub category_ids: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Id>,
}

impl NewEvent {
    /// Attach an id, producing the full record sent on update.
    pub fn with_id(self, id: Id) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            category_ids: self.category_ids,
            image: self.image,
            created_by: self.created_by,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A read-only tag attached to events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
}

impl Category {
    /// Name with its first letter upper-cased, the way categories are shown.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// A selectable identity used for attribution. Not an authenticated principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Serde adapter for event timestamps.
///
/// Reads RFC 3339, offset-less `datetime-local` values (taken as UTC) and
/// bare dates (midnight UTC). Writes RFC 3339 with millisecond precision.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(dt.and_utc());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }

        Err(format!(
            "Invalid timestamp '{}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339",
            s
        ))
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(de)?;
        parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_backend_event() {
        let json = r#"{
            "id": 3,
            "createdBy": "2",
            "title": "Beach Party",
            "description": "Sun and music",
            "image": "https://example.com/beach.jpg",
            "categoryIds": [1, "2"],
            "location": "Scheveningen",
            "startTime": "2023-03-10T18:00:00.000Z",
            "endTime": "2023-03-10T23:00"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, Id::from(3));
        assert_eq!(event.created_by, Some(Id::from(2)));
        assert_eq!(event.category_ids, vec![Id::from(1), Id::from(2)]);
        assert_eq!(
            event.start_time,
            Utc.with_ymd_and_hms(2023, 3, 10, 18, 0, 0).unwrap()
        );
        assert_eq!(
            event.end_time,
            Utc.with_ymd_and_hms(2023, 3, 10, 23, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id":"x","title":"T","startTime":"2024-01-01","endTime":"2024-01-02"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.description.is_none());
        assert!(event.location.is_none());
        assert!(event.category_ids.is_empty());
        assert!(event.created_by.is_none());
    }

    #[test]
    fn writes_camel_case_and_iso_timestamps() {
        let event = NewEvent {
            title: "T".into(),
            description: None,
            location: None,
            start_time: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap(),
            category_ids: vec![Id::from(4)],
            image: None,
            created_by: Some(Id::from(1)),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["startTime"], "2024-01-01T10:00:00.000Z");
        assert_eq!(value["categoryIds"], serde_json::json!([4]));
        assert_eq!(value["createdBy"], 1);
        assert!(value.get("description").is_none());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(timestamp::parse("next tuesday").is_err());
    }

    #[test]
    fn category_display_name_is_capitalized() {
        let category = Category {
            id: Id::from(1),
            name: "sports".into(),
        };
        assert_eq!(category.display_name(), "Sports");
    }

    #[test]
    fn user_role_defaults_to_user() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"Ann"}"#).unwrap();
        assert_eq!(user.role, Role::User);
    }
}
