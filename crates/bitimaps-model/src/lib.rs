pub mod details;
pub mod entity;
pub mod error;
pub mod request;

pub use details::{
    CurrentAssignment, HistoryEntry, PublisherAssignment, PublisherDetails, PublisherHistoryEntry,
    TerritoryDetails,
};
pub use entity::{Assignment, Publisher, Territory, TerritoryStatus};
pub use error::{Result, StoreError};
pub use request::{
    AssignRequest, AssignmentCompletion, CompleteRequest, NewAssignment, NewPublisher,
    NewTerritory, PublisherPatch, TerritoryPatch,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn territory_details_serializes_flat() {
        let details = TerritoryDetails {
            territory: Territory {
                id: 101,
                name: "Daerah A-01".to_string(),
                kdl: "Wangurer".to_string(),
                gmaps_link: Some("https://maps.google.com".to_string()),
                status: TerritoryStatus::Completed,
            },
            current: None,
            history: vec![HistoryEntry {
                publisher_name: "Budi Santoso".to_string(),
                start_date: "10 Jan 2024".to_string(),
                completion_date: "5 Mar 2024".to_string(),
                notes: None,
            }],
        };
        let json = serde_json::to_value(&details).expect("serialize details");
        assert_eq!(json["name"], "Daerah A-01");
        assert_eq!(json["history"][0]["publisher_name"], "Budi Santoso");
        let round: TerritoryDetails = serde_json::from_value(json).expect("deserialize details");
        assert_eq!(round, details);
    }
}
