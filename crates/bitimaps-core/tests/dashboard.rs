use bitimaps_core::{ActivityKind, dashboard, ongoing_assignments};
use bitimaps_model::{Assignment, Publisher, Territory, TerritoryStatus};

fn make_territory(id: i64, name: &str, kdl: &str, status: TerritoryStatus) -> Territory {
    Territory {
        id,
        name: name.to_string(),
        kdl: kdl.to_string(),
        gmaps_link: None,
        status,
    }
}

fn make_publisher(id: i64, name: &str, group: &str) -> Publisher {
    Publisher {
        id,
        name: name.to_string(),
        group: group.to_string(),
    }
}

fn make_assignment(
    id: i64,
    territory_id: i64,
    publisher_id: Option<i64>,
    start_date: &str,
    completion_date: Option<&str>,
) -> Assignment {
    Assignment {
        id,
        territory_id,
        publisher_id,
        start_date: start_date.to_string(),
        completion_date: completion_date.map(str::to_string),
        notes: None,
    }
}

fn sample() -> (Vec<Territory>, Vec<Publisher>, Vec<Assignment>) {
    let territories = vec![
        make_territory(101, "Daerah A-01", "Wangurer", TerritoryStatus::InProgress),
        make_territory(102, "Daerah A-02", "Madidir", TerritoryStatus::Completed),
        make_territory(103, "Daerah B-01", "Madidir", TerritoryStatus::Available),
    ];
    let publishers = vec![
        make_publisher(1, "Budi Santoso", "Wangurer"),
        make_publisher(2, "Citra Lestari", "Madidir"),
    ];
    let assignments = vec![
        make_assignment(11, 101, Some(1), "2024-04-02", None),
        make_assignment(12, 102, Some(2), "2024-01-05", Some("2024-02-09")),
        make_assignment(13, 101, Some(2), "2023-11-01", Some("2023-12-20")),
    ];
    (territories, publishers, assignments)
}

#[test]
fn status_counts_cover_every_status() {
    let (territories, publishers, assignments) = sample();
    let board = dashboard(&territories, &publishers, &assignments);
    assert_eq!(board.total_territories, 3);
    assert_eq!(board.status_counts[&TerritoryStatus::Available], 1);
    assert_eq!(board.status_counts[&TerritoryStatus::InProgress], 1);
    assert_eq!(board.status_counts[&TerritoryStatus::Completed], 1);

    let empty = dashboard(&[], &publishers, &[]);
    assert_eq!(empty.status_counts.len(), 3);
    assert!(empty.status_counts.values().all(|count| *count == 0));
}

#[test]
fn kdl_distribution_counts_per_region() {
    let (territories, publishers, assignments) = sample();
    let board = dashboard(&territories, &publishers, &assignments);
    assert_eq!(board.kdl_distribution["Madidir"], 2);
    assert_eq!(board.kdl_distribution["Wangurer"], 1);
}

#[test]
fn recent_activity_is_newest_first_and_capped() {
    let (territories, publishers, mut assignments) = sample();
    for i in 0..6 {
        assignments.push(make_assignment(
            20 + i,
            103,
            Some(1),
            &format!("2024-05-{:02}", i + 1),
            None,
        ));
    }
    let board = dashboard(&territories, &publishers, &assignments);
    assert_eq!(board.recent_activity.len(), 5);
    assert_eq!(board.recent_activity[0].date, "6 Mei 2024");
    assert_eq!(board.recent_activity[0].kind, ActivityKind::Started);
}

#[test]
fn closed_rows_yield_a_single_completed_event() {
    let territories = vec![make_territory(
        101,
        "Daerah A-01",
        "Wangurer",
        TerritoryStatus::Completed,
    )];
    let publishers = vec![make_publisher(1, "Budi Santoso", "Wangurer")];
    let assignments = vec![make_assignment(
        11,
        101,
        Some(1),
        "2024-01-10",
        Some("2024-03-05"),
    )];
    let board = dashboard(&territories, &publishers, &assignments);
    assert_eq!(board.recent_activity.len(), 1);
    assert_eq!(board.recent_activity[0].kind, ActivityKind::Completed);
    assert_eq!(board.recent_activity[0].date, "5 Maret 2024");
}

#[test]
fn dangling_publisher_rows_are_dropped_from_activity() {
    let territories = vec![make_territory(
        101,
        "Daerah A-01",
        "Wangurer",
        TerritoryStatus::InProgress,
    )];
    let assignments = vec![make_assignment(11, 101, Some(99), "2024-04-02", None)];
    let board = dashboard(&territories, &[], &assignments);
    assert!(board.recent_activity.is_empty());
}

#[test]
fn null_publisher_shows_as_unknown_in_activity() {
    let territories = vec![make_territory(
        101,
        "Daerah A-01",
        "Wangurer",
        TerritoryStatus::InProgress,
    )];
    let assignments = vec![make_assignment(11, 101, None, "2024-04-02", None)];
    let board = dashboard(&territories, &[], &assignments);
    assert_eq!(board.recent_activity[0].publisher_name, "Unknown");
    assert_eq!(board.recent_activity[0].date, "2 April 2024");
}

#[test]
fn report_lists_open_rows_sorted_by_publisher() {
    let (territories, publishers, mut assignments) = sample();
    assignments.push(make_assignment(14, 103, Some(2), "2024-04-10", None));
    let rows = ongoing_assignments(&territories, &publishers, &assignments);
    let names: Vec<&str> = rows.iter().map(|r| r.publisher_name.as_str()).collect();
    assert_eq!(names, vec!["Budi Santoso", "Citra Lestari"]);
    assert_eq!(rows[0].territory_name, "Daerah A-01");
    assert_eq!(rows[0].start_date, "2 April 2024");
}

#[test]
fn report_skips_rows_without_a_publisher() {
    let (territories, publishers, mut assignments) = sample();
    assignments.push(make_assignment(15, 103, None, "2024-04-10", None));
    let rows = ongoing_assignments(&territories, &publishers, &assignments);
    assert!(rows.iter().all(|r| r.id != 15));
}

#[test]
fn report_keeps_dangling_references_as_unknown() {
    let (territories, publishers, mut assignments) = sample();
    assignments.push(make_assignment(16, 999, Some(99), "2024-04-10", None));
    let rows = ongoing_assignments(&territories, &publishers, &assignments);
    assert!(
        rows.iter()
            .any(|r| r.publisher_name == "Unknown" && r.territory_name == "Unknown")
    );
}
