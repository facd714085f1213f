use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a territory.
///
/// The hosted tables store the Indonesian display values, so those are the
/// wire spellings. Status is a stored cache of what is otherwise derivable
/// from the assignment rows; `bitimaps-core` owns the derivation and the
/// drift repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerritoryStatus {
    /// No open assignment and no meaningful completion: `"Tersedia"`.
    #[serde(rename = "Tersedia")]
    Available,
    /// An open assignment row exists: `"Dikerjakan"`.
    #[serde(rename = "Dikerjakan")]
    InProgress,
    /// The most recent assignment row is closed: `"Selesai"`.
    #[serde(rename = "Selesai")]
    Completed,
}

impl TerritoryStatus {
    /// All statuses, in display order.
    pub const ALL: [TerritoryStatus; 3] = [Self::Available, Self::InProgress, Self::Completed];

    /// The wire value as stored in the `territories` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Tersedia",
            Self::InProgress => "Dikerjakan",
            Self::Completed => "Selesai",
        }
    }

    /// English label for logs and CLI help text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TerritoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerritoryStatus {
    type Err = String;

    /// Parse either the wire spelling or the English name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "TERSEDIA" | "AVAILABLE" => Ok(Self::Available),
            "DIKERJAKAN" | "IN-PROGRESS" | "IN PROGRESS" | "INPROGRESS" => Ok(Self::InProgress),
            "SELESAI" | "COMPLETED" | "DONE" => Ok(Self::Completed),
            _ => Err(format!("unknown territory status: {s}")),
        }
    }
}

/// A named work area, grouped by KDL label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: i64,
    pub name: String,
    /// Group label; treated as an opaque string.
    pub kdl: String,
    /// Optional external map link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmaps_link: Option<String>,
    pub status: TerritoryStatus,
}

/// A field worker who can be assigned to a territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
    /// KDL group label (wire field is `group`).
    pub group: String,
}

/// A time-bounded link between one territory and one publisher.
///
/// Rows are created on assign, closed on complete, and never deleted; closed
/// rows accumulate as history. Dates are carried as the wire strings and
/// parsed on demand by `bitimaps-core`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub territory_id: i64,
    pub publisher_id: Option<i64>,
    pub start_date: String,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Assignment {
    /// An assignment with no completion date is open (current).
    pub fn is_open(&self) -> bool {
        self.completion_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_round_trip() {
        for status in TerritoryStatus::ALL {
            let json = serde_json::to_string(&status).expect("serialize status");
            let round: TerritoryStatus = serde_json::from_str(&json).expect("deserialize status");
            assert_eq!(round, status);
        }
        assert_eq!(
            serde_json::to_string(&TerritoryStatus::InProgress).unwrap(),
            "\"Dikerjakan\""
        );
    }

    #[test]
    fn status_parses_both_spellings() {
        assert_eq!(
            "tersedia".parse::<TerritoryStatus>().unwrap(),
            TerritoryStatus::Available
        );
        assert_eq!(
            "Completed".parse::<TerritoryStatus>().unwrap(),
            TerritoryStatus::Completed
        );
        assert!("belum".parse::<TerritoryStatus>().is_err());
    }

    #[test]
    fn assignment_openness() {
        let open = Assignment {
            id: 1,
            territory_id: 101,
            publisher_id: Some(1),
            start_date: "2024-01-01".to_string(),
            completion_date: None,
            notes: None,
        };
        assert!(open.is_open());
        let closed = Assignment {
            completion_date: Some("2024-02-01".to_string()),
            ..open
        };
        assert!(!closed.is_open());
    }

    #[test]
    fn territory_deserializes_without_optional_link() {
        let territory: Territory = serde_json::from_str(
            r#"{"id":103,"name":"Daerah B-01","kdl":"Madidir","status":"Tersedia"}"#,
        )
        .expect("deserialize territory");
        assert_eq!(territory.gmaps_link, None);
        assert_eq!(territory.status, TerritoryStatus::Available);
    }
}
