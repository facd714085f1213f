//! The ongoing-work report.
//!
//! Lists every open assignment that has a publisher, with names resolved,
//! sorted by publisher name. Unlike the detail views, a dangling reference
//! is kept and shown as "Unknown"; only rows with no publisher at all are
//! skipped.

use bitimaps_model::{Assignment, Publisher, Territory};

use crate::datetime::format_long;
use crate::query::collate;

/// One open assignment, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OngoingAssignment {
    pub id: i64,
    pub publisher_name: String,
    pub territory_name: String,
    /// Long display form, "5 Maret 2024".
    pub start_date: String,
}

/// Build the report rows from one snapshot.
pub fn ongoing_assignments(
    territories: &[Territory],
    publishers: &[Publisher],
    assignments: &[Assignment],
) -> Vec<OngoingAssignment> {
    let mut rows: Vec<OngoingAssignment> = assignments
        .iter()
        .filter(|a| a.is_open() && a.publisher_id.is_some())
        .map(|a| OngoingAssignment {
            id: a.id,
            publisher_name: a
                .publisher_id
                .and_then(|id| publishers.iter().find(|p| p.id == id))
                .map_or_else(|| "Unknown".to_string(), |p| p.name.clone()),
            territory_name: territories
                .iter()
                .find(|t| t.id == a.territory_id)
                .map_or_else(|| "Unknown".to_string(), |t| t.name.clone()),
            start_date: format_long(&a.start_date),
        })
        .collect();
    rows.sort_by(|a, b| {
        collate(&a.publisher_name)
            .cmp(&collate(&b.publisher_name))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}
