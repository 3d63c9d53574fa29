//! Event and resource documents read from the content store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Kind of event, as stored in the `eventType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Workshop,
    OfficeHours,
    Networking,
    HackNight,
    Speaker,
    Meetup,
}

impl EventType {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "workshop" => Some(Self::Workshop),
            "office-hours" => Some(Self::OfficeHours),
            "networking" => Some(Self::Networking),
            "hack-night" => Some(Self::HackNight),
            "speaker" => Some(Self::Speaker),
            "meetup" => Some(Self::Meetup),
            _ => None,
        }
    }

    /// Emoji prefix used in announcements.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Workshop => "🎓",
            Self::OfficeHours => "💼",
            Self::Networking => "🤝",
            Self::HackNight => "🔨",
            Self::Speaker => "🎤",
            Self::Meetup => "👥",
        }
    }
}

/// A speaker or host referenced by an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A Job Club event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub zoom_link: Option<String>,
    #[serde(default)]
    pub capacity: Option<Number>,
    #[serde(default)]
    pub registration_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speakers: Vec<Speaker>,
}

impl Event {
    pub fn kind(&self) -> Option<EventType> {
        self.event_type.as_deref().and_then(EventType::from_value)
    }
}

/// A URL slug object (`{ "current": "..." }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// A career resource or guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Minutes; editors may enter fractions
    #[serde(default)]
    pub time_to_read: Option<Number>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

// Projections return `null` for arrays the document never set.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_projected_event() {
        let event: Event = serde_json::from_str(
            r#"{
                "_id": "evt-1",
                "title": "Resume Workshop",
                "eventType": "workshop",
                "date": "2026-11-01T18:00:00Z",
                "tags": null,
                "speakers": [{"_id": "sp-1", "name": "Ada", "title": null, "company": "Acme", "bio": null}]
            }"#,
        )
        .unwrap();

        assert_eq!(event.kind(), Some(EventType::Workshop));
        assert!(event.tags.is_empty());
        assert_eq!(event.speakers[0].company.as_deref(), Some("Acme"));
    }

    #[test]
    fn unknown_event_type_has_no_kind() {
        let event: Event =
            serde_json::from_str(r#"{"_id": "e", "title": "t", "eventType": "party"}"#).unwrap();

        assert_eq!(event.kind(), None);
    }

    #[test]
    fn reads_resource_with_slug() {
        let resource: Resource = serde_json::from_str(
            r#"{"_id": "r1", "title": "LinkedIn 101", "slug": {"current": "linkedin-101"},
                "category": "linkedin", "timeToRead": 5, "publishedAt": "2025-05-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(resource.slug.unwrap().current, "linkedin-101");
        assert_eq!(resource.time_to_read, Some(Number::from(5)));
    }

    #[test]
    fn keeps_numbers_the_editor_entered() {
        let resources: Vec<Resource> = serde_json::from_str(
            r#"[{"_id": "r1", "title": "a", "timeToRead": 5},
                {"_id": "r2", "title": "b", "timeToRead": 2.5}]"#,
        )
        .unwrap();
        let event: Event =
            serde_json::from_str(r#"{"_id": "e", "title": "t", "capacity": -1}"#).unwrap();

        assert_eq!(resources[1].time_to_read.as_ref().and_then(Number::as_f64), Some(2.5));
        assert_eq!(
            serde_json::to_value(&resources[1]).unwrap()["timeToRead"],
            serde_json::json!(2.5)
        );
        assert_eq!(event.capacity, Some(Number::from(-1)));
    }
}
