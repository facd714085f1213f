//! Derived "with details" view models.
//!
//! These combine a base entity with its resolved current assignment and
//! ordered history. They are computed on demand by `bitimaps-core` and never
//! persisted; dates are already formatted for display.

use serde::{Deserialize, Serialize};

use crate::entity::{Publisher, Territory};

/// The open assignment on a territory, from the territory's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssignment {
    pub publisher_name: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One closed assignment in a territory's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub publisher_name: String,
    pub start_date: String,
    pub completion_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A territory enriched with its current assignment and completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryDetails {
    #[serde(flatten)]
    pub territory: Territory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentAssignment>,
    /// Most-recent completion first.
    pub history: Vec<HistoryEntry>,
}

/// The open assignment on a publisher, enriched with the territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherAssignment {
    pub territory_name: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmaps_link: Option<String>,
}

/// One closed assignment in a publisher's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherHistoryEntry {
    pub territory_name: String,
    pub start_date: String,
    pub completion_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A publisher enriched with current assignment and completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherDetails {
    #[serde(flatten)]
    pub publisher: Publisher,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PublisherAssignment>,
    /// Most-recent completion first.
    pub history: Vec<PublisherHistoryEntry>,
}
