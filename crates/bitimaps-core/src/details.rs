//! The data join layer.
//!
//! Joins the three flat table snapshots in memory into enriched view models:
//! the open assignment (if any) plus the ordered completion history, with
//! referenced names resolved. Rows whose publisher or territory reference
//! cannot be resolved are filtered out, never raised. History is sorted here,
//! most-recent completion first, so every caller renders the same order.

use std::collections::HashMap;

use bitimaps_model::{
    Assignment, CurrentAssignment, HistoryEntry, Publisher, PublisherAssignment, PublisherDetails,
    PublisherHistoryEntry, Territory, TerritoryDetails,
};

use crate::datetime::{date_key, format_short};

/// Pick the open row for display when more than one exists: latest start
/// date wins, highest id as tie-break. Duplicates cannot be created through
/// this client (assign rejects them) but another client may have raced.
fn pick_open<'a, I>(rows: I) -> Option<&'a Assignment>
where
    I: Iterator<Item = &'a Assignment>,
{
    rows.max_by_key(|a| (date_key(&a.start_date), a.id))
}

fn sort_history_desc(entries: &mut [&Assignment]) {
    entries.sort_by(|a, b| {
        let left = (
            date_key(b.completion_date.as_deref().unwrap_or_default()),
            b.id,
        );
        let right = (
            date_key(a.completion_date.as_deref().unwrap_or_default()),
            a.id,
        );
        left.cmp(&right)
    });
}

/// Enrich one territory against the full publisher and assignment snapshots.
pub fn territory_details_for(
    territory: &Territory,
    publishers: &[Publisher],
    assignments: &[Assignment],
) -> TerritoryDetails {
    let publisher_names: HashMap<i64, &str> = publishers
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();
    build_territory_details(territory, &publisher_names, assignments)
}

/// Enrich every territory.
pub fn territory_details(
    territories: &[Territory],
    publishers: &[Publisher],
    assignments: &[Assignment],
) -> Vec<TerritoryDetails> {
    let publisher_names: HashMap<i64, &str> = publishers
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();
    territories
        .iter()
        .map(|territory| build_territory_details(territory, &publisher_names, assignments))
        .collect()
}

fn build_territory_details(
    territory: &Territory,
    publisher_names: &HashMap<i64, &str>,
    assignments: &[Assignment],
) -> TerritoryDetails {
    // Only rows whose publisher reference resolves take part.
    let resolved = |a: &&Assignment| {
        a.publisher_id
            .is_some_and(|id| publisher_names.contains_key(&id))
    };
    let rows = assignments
        .iter()
        .filter(|a| a.territory_id == territory.id);

    let current = pick_open(rows.clone().filter(|a| a.is_open()).filter(resolved)).map(|a| {
        let publisher_id = a.publisher_id.unwrap_or_default();
        CurrentAssignment {
            publisher_name: publisher_names
                .get(&publisher_id)
                .map_or_else(|| "Unknown".to_string(), |name| (*name).to_string()),
            start_date: format_short(&a.start_date),
            notes: a.notes.clone(),
        }
    });

    let mut closed: Vec<&Assignment> = rows.filter(|a| !a.is_open()).filter(resolved).collect();
    sort_history_desc(&mut closed);
    let history = closed
        .into_iter()
        .map(|a| {
            let publisher_id = a.publisher_id.unwrap_or_default();
            HistoryEntry {
                publisher_name: publisher_names
                    .get(&publisher_id)
                    .map_or_else(|| "Unknown".to_string(), |name| (*name).to_string()),
                start_date: format_short(&a.start_date),
                completion_date: format_short(a.completion_date.as_deref().unwrap_or_default()),
                notes: a.notes.clone(),
            }
        })
        .collect();

    TerritoryDetails {
        territory: territory.clone(),
        current,
        history,
    }
}

/// Enrich every publisher with territory names and map links.
pub fn publisher_details(
    publishers: &[Publisher],
    territories: &[Territory],
    assignments: &[Assignment],
) -> Vec<PublisherDetails> {
    let territory_map: HashMap<i64, &Territory> =
        territories.iter().map(|t| (t.id, t)).collect();
    publishers
        .iter()
        .map(|publisher| build_publisher_details(publisher, &territory_map, assignments))
        .collect()
}

fn build_publisher_details(
    publisher: &Publisher,
    territory_map: &HashMap<i64, &Territory>,
    assignments: &[Assignment],
) -> PublisherDetails {
    let rows = assignments
        .iter()
        .filter(|a| a.publisher_id == Some(publisher.id));

    let current = pick_open(
        rows.clone()
            .filter(|a| a.is_open())
            .filter(|a| territory_map.contains_key(&a.territory_id)),
    )
    .and_then(|a| {
        territory_map.get(&a.territory_id).map(|territory| PublisherAssignment {
            territory_name: territory.name.clone(),
            start_date: format_short(&a.start_date),
            notes: a.notes.clone(),
            gmaps_link: territory.gmaps_link.clone(),
        })
    });

    let mut closed: Vec<&Assignment> = rows
        .filter(|a| !a.is_open())
        .filter(|a| territory_map.contains_key(&a.territory_id))
        .collect();
    sort_history_desc(&mut closed);
    let history = closed
        .into_iter()
        .filter_map(|a| {
            territory_map.get(&a.territory_id).map(|territory| PublisherHistoryEntry {
                territory_name: territory.name.clone(),
                start_date: format_short(&a.start_date),
                completion_date: format_short(a.completion_date.as_deref().unwrap_or_default()),
                notes: a.notes.clone(),
            })
        })
        .collect();

    PublisherDetails {
        publisher: publisher.clone(),
        current,
        history,
    }
}
