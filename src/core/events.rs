use std::collections::HashMap;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// DomainEventType defines type of event for domain changes. Borrow records are never
// deleted, so there is no deletion event.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum DomainEventType {
    Added,
    Updated,
}

// DomainEvent abstracts domain event for circulation and payment changes
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub group: String,
    pub key: String,
    pub kind: DomainEventType,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn added<T: Serialize>(name: &str, group: &str, key: &str, branch_id: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Added, branch_id, data)
    }

    pub fn updated<T: Serialize>(name: &str, group: &str, key: &str, branch_id: &str, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Updated, branch_id, data)
    }

    fn build<T: Serialize>(name: &str, group: &str, key: &str, kind: DomainEventType,
                           branch_id: &str, data: &T) -> serde_json::Result<Self> {
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            kind,
            metadata: HashMap::from([("branch_id".to_string(), branch_id.to_string())]),
            json_data: serde_json::to_string(data)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};

    #[tokio::test]
    async fn test_should_build_added() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::added("book_borrowed", "borrowing", "key", "dev", &data).expect("build event");
        assert_eq!("book_borrowed", event.name.as_str());
        assert_eq!("key", event.key.as_str());
        assert_eq!(DomainEventType::Added, event.kind);
        assert_eq!(Some(&"dev".to_string()), event.metadata.get("branch_id"));
    }

    #[tokio::test]
    async fn test_should_build_updated() {
        let data = HashMap::from([("a", 1)]);
        let event = DomainEvent::updated("book_returned", "borrowing", "key", "dev", &data).expect("build event");
        assert_eq!(DomainEventType::Updated, event.kind);
        assert_eq!("{\"a\":1}", event.json_data.as_str());
    }

    #[tokio::test]
    async fn test_should_serialize_event() {
        let event = DomainEvent::added("book_added", "catalog", "1", "dev", &"x").expect("build event");
        let json = serde_json::to_string(&event).expect("serialize");
        let parsed: DomainEvent = serde_json::from_str(json.as_str()).expect("deserialize");
        assert_eq!(event.event_id, parsed.event_id);
        assert_eq!(event.kind, parsed.kind);
    }
}
