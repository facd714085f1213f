//! Typed mutation payloads.
//!
//! Each create/update/transition carries an explicit request structure
//! instead of an ad hoc parameter bag, so the wire contract per form is
//! stable and serializable.

use serde::{Deserialize, Serialize};

use crate::entity::TerritoryStatus;

/// Insert payload for the `territories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTerritory {
    pub name: String,
    pub kdl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmaps_link: Option<String>,
    pub status: TerritoryStatus,
}

impl NewTerritory {
    /// New territories start out available.
    pub fn new(name: impl Into<String>, kdl: impl Into<String>, gmaps_link: Option<String>) -> Self {
        Self {
            name: name.into(),
            kdl: kdl.into(),
            gmaps_link,
            status: TerritoryStatus::Available,
        }
    }
}

/// Editable fields of a territory; applied by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryPatch {
    pub name: String,
    pub kdl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmaps_link: Option<String>,
}

/// Insert payload for the `publishers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPublisher {
    pub name: String,
    pub group: String,
}

/// Editable fields of a publisher; applied by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherPatch {
    pub name: String,
    pub group: String,
}

/// Insert payload for the `assignments` table (opens an assignment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub territory_id: i64,
    pub publisher_id: i64,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update payload closing an assignment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCompletion {
    pub completion_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The "assign publisher" transition (Available -> InProgress).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRequest {
    pub territory_id: i64,
    pub publisher_id: i64,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The "complete" transition (InProgress -> Completed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub territory_id: i64,
    pub completion_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_territory_defaults_to_available() {
        let request = NewTerritory::new("Daerah F-01", "Wangurer", None);
        assert_eq!(request.status, TerritoryStatus::Available);
        let json = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(json["status"], "Tersedia");
        assert!(json.get("gmaps_link").is_none());
    }

    #[test]
    fn assign_request_round_trips() {
        let request = AssignRequest {
            territory_id: 103,
            publisher_id: 2,
            start_date: "2024-01-10".to_string(),
            notes: Some("mulai dari utara".to_string()),
        };
        let json = serde_json::to_string(&request).expect("serialize request");
        let round: AssignRequest = serde_json::from_str(&json).expect("deserialize request");
        assert_eq!(round, request);
    }
}
