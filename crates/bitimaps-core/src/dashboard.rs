//! Dashboard aggregates: status counts, KDL distribution, recent activity.

use std::collections::BTreeMap;

use bitimaps_model::{Assignment, Publisher, Territory, TerritoryStatus};

use crate::datetime::{date_key, format_long};

/// What the activity row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Started,
    Completed,
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub publisher_name: String,
    pub territory_name: String,
    /// Long display form, "5 Maret 2024".
    pub date: String,
}

/// The aggregates the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    pub total_territories: usize,
    /// Count per status, every status present even when zero.
    pub status_counts: BTreeMap<TerritoryStatus, usize>,
    /// Territory count per KDL region, sorted by region name.
    pub kdl_distribution: BTreeMap<String, usize>,
    /// Five most recent start/completion events, newest first.
    pub recent_activity: Vec<Activity>,
}

const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Compute all dashboard aggregates from one snapshot.
pub fn dashboard(
    territories: &[Territory],
    publishers: &[Publisher],
    assignments: &[Assignment],
) -> Dashboard {
    let mut status_counts: BTreeMap<TerritoryStatus, usize> =
        TerritoryStatus::ALL.iter().map(|s| (*s, 0)).collect();
    let mut kdl_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for territory in territories {
        if let Some(count) = status_counts.get_mut(&territory.status) {
            *count += 1;
        }
        *kdl_distribution.entry(territory.kdl.clone()).or_insert(0) += 1;
    }

    Dashboard {
        total_territories: territories.len(),
        status_counts,
        kdl_distribution,
        recent_activity: recent_activity(territories, publishers, assignments),
    }
}

fn recent_activity(
    territories: &[Territory],
    publishers: &[Publisher],
    assignments: &[Assignment],
) -> Vec<Activity> {
    // Only a null publisher falls back to "Unknown"; a dangling reference
    // drops the row.
    let publisher_name = |id: Option<i64>| -> Option<String> {
        match id {
            None => Some("Unknown".to_string()),
            Some(id) => publishers.iter().find(|p| p.id == id).map(|p| p.name.clone()),
        }
    };
    let territory_name = |id: i64| -> Option<String> {
        territories.iter().find(|t| t.id == id).map(|t| t.name.clone())
    };

    // One event per assignment: its completion when closed, else its start.
    let mut events: Vec<(chrono::NaiveDate, i64, Activity)> = Vec::new();
    for assignment in assignments {
        let Some(territory) = territory_name(assignment.territory_id) else {
            continue;
        };
        let Some(publisher) = publisher_name(assignment.publisher_id) else {
            continue;
        };
        let (kind, date) = match assignment.completion_date.as_deref() {
            Some(completed) => (ActivityKind::Completed, completed),
            None => (ActivityKind::Started, assignment.start_date.as_str()),
        };
        events.push((
            date_key(date),
            assignment.id,
            Activity {
                kind,
                publisher_name: publisher,
                territory_name: territory,
                date: format_long(date),
            },
        ));
    }
    events.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
    events
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|(_, _, activity)| activity)
        .collect()
}
