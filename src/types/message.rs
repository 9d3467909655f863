use serde::{Deserialize, Serialize};

use crate::types::constants::WILDCARD_EVENT;

/// Envelope for an inbound realtime frame.
///
/// The backend tags messages with an optional top-level `type` field that
/// selects dispatch routing; every other field is carried through opaquely so
/// the client stays decoupled from application-specific message shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealtimeMessage {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl RealtimeMessage {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            payload: serde_json::Map::new(),
        }
    }

    /// Dispatch category for this message. Untyped messages fall into the
    /// wildcard category.
    pub fn event(&self) -> &str {
        self.kind.as_deref().unwrap_or(WILDCARD_EVENT)
    }

    /// Looks up a payload field by key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.payload.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_message_event() {
        let msg: RealtimeMessage =
            serde_json::from_str(r#"{"type":"taskUpdate","task_id":42}"#).unwrap();
        assert_eq!(msg.event(), "taskUpdate");
        assert_eq!(msg.get("task_id"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_untyped_message_defaults_to_wildcard() {
        let msg: RealtimeMessage = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(msg.kind, None);
        assert_eq!(msg.event(), WILDCARD_EVENT);
    }

    #[test]
    fn test_payload_passes_through_round_trip() {
        let raw = r#"{"type":"sourceFound","ra":150.2,"dec":-31.5,"flux":{"peak":0.8}}"#;
        let msg: RealtimeMessage = serde_json::from_str(raw).unwrap();
        let back = serde_json::to_value(&msg).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(raw).unwrap());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(serde_json::from_str::<RealtimeMessage>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<RealtimeMessage>("not json").is_err());
    }
}
