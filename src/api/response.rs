//! Response bodies

use serde::{Deserialize, Serialize};

use crate::store::RecordId;

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Delete response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: RecordId,
}

impl DeletedResponse {
    pub fn new(id: RecordId) -> Self {
        Self { deleted: id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_serialization() {
        let json = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_deleted_serialization() {
        let json = serde_json::to_value(DeletedResponse::new(12)).unwrap();
        assert_eq!(json, serde_json::json!({ "deleted": 12 }));
    }

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(MessageBody::new("Not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Not found" }));
    }
}
