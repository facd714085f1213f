use bitimaps_core::{publisher_details, territory_details, territory_details_for};
use bitimaps_model::{Assignment, Publisher, Territory, TerritoryStatus};
use proptest::prelude::*;

fn make_territory(id: i64, name: &str, kdl: &str, status: TerritoryStatus) -> Territory {
    Territory {
        id,
        name: name.to_string(),
        kdl: kdl.to_string(),
        gmaps_link: Some(format!("https://maps.google.com/?q=daerah-{id}")),
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
    ];
    let publishers = vec![
        make_publisher(1, "Budi Santoso", "Wangurer"),
        make_publisher(2, "Citra Lestari", "Madidir"),
    ];
    let assignments = vec![
        make_assignment(11, 101, Some(2), "2023-11-01", Some("2023-12-20")),
        make_assignment(12, 101, Some(1), "2023-12-28", Some("2024-01-10")),
        make_assignment(13, 101, Some(2), "2024-02-14", Some("2024-03-05")),
        make_assignment(14, 101, Some(1), "2024-04-02", None),
        make_assignment(15, 102, Some(2), "2024-01-05", Some("2024-02-09")),
    ];
    (territories, publishers, assignments)
}

#[test]
fn current_assignment_is_the_open_row() {
    let (territories, publishers, assignments) = sample();
    let details = territory_details_for(&territories[0], &publishers, &assignments);
    let current = details.current.expect("open assignment");
    assert_eq!(current.publisher_name, "Budi Santoso");
    assert_eq!(current.start_date, "2 Apr 2024");
}

#[test]
fn history_holds_exactly_the_closed_rows() {
    let (territories, publishers, assignments) = sample();
    let details = territory_details_for(&territories[0], &publishers, &assignments);
    assert_eq!(details.history.len(), 3);
    assert!(details.history.iter().all(|h| !h.completion_date.is_empty()));
}

#[test]
fn history_is_sorted_by_completion_descending() {
    let (territories, publishers, assignments) = sample();
    let details = territory_details_for(&territories[0], &publishers, &assignments);
    let completions: Vec<&str> = details
        .history
        .iter()
        .map(|h| h.completion_date.as_str())
        .collect();
    assert_eq!(completions, vec!["5 Mar 2024", "10 Jan 2024", "20 Des 2023"]);
}

#[test]
fn duplicate_open_rows_pick_the_latest_start() {
    let (territories, publishers, mut assignments) = sample();
    // A raced second open row with an earlier start must lose.
    assignments.push(make_assignment(16, 101, Some(2), "2024-03-20", None));
    let details = territory_details_for(&territories[0], &publishers, &assignments);
    assert_eq!(details.current.expect("open").publisher_name, "Budi Santoso");
}

#[test]
fn unresolvable_publisher_rows_are_dropped() {
    let (territories, publishers, mut assignments) = sample();
    assignments.push(make_assignment(17, 101, Some(99), "2024-01-02", Some("2024-01-03")));
    assignments.push(make_assignment(18, 101, None, "2024-01-04", Some("2024-01-05")));
    let details = territory_details_for(&territories[0], &publishers, &assignments);
    assert_eq!(details.history.len(), 3);
    assert!(
        details
            .history
            .iter()
            .all(|h| h.publisher_name != "Unknown")
    );
}

#[test]
fn territory_without_rows_has_empty_details() {
    let publishers = vec![make_publisher(1, "Budi Santoso", "Wangurer")];
    let territory = make_territory(103, "Daerah B-01", "Paceda", TerritoryStatus::Available);
    let details = territory_details_for(&territory, &publishers, &[]);
    assert!(details.current.is_none());
    assert!(details.history.is_empty());
}

#[test]
fn publisher_side_carries_the_map_link() {
    let (territories, publishers, assignments) = sample();
    let details = publisher_details(&publishers, &territories, &assignments);
    let budi = details
        .iter()
        .find(|d| d.publisher.id == 1)
        .expect("publisher");
    let current = budi.current.as_ref().expect("open assignment");
    assert_eq!(current.territory_name, "Daerah A-01");
    assert_eq!(
        current.gmaps_link.as_deref(),
        Some("https://maps.google.com/?q=daerah-101")
    );
}

#[test]
fn publisher_history_requires_a_resolvable_territory() {
    let (territories, publishers, mut assignments) = sample();
    assignments.push(make_assignment(19, 999, Some(2), "2024-01-02", Some("2024-01-03")));
    let details = publisher_details(&publishers, &territories, &assignments);
    let citra = details
        .iter()
        .find(|d| d.publisher.id == 2)
        .expect("publisher");
    assert_eq!(citra.history.len(), 3);
}

proptest! {
    /// The join is total: every territory yields one detail row, and each
    /// history length is bounded by the closed rows pointing at it.
    #[test]
    fn join_is_total_over_arbitrary_rows(
        territory_count in 1usize..6,
        rows in prop::collection::vec(
            (0i64..8, prop::option::of(0i64..4), 0u32..28, prop::bool::ANY),
            0..24,
        ),
    ) {
        let territories: Vec<Territory> = (0..territory_count as i64)
            .map(|id| make_territory(id, &format!("Daerah {id}"), "Wangurer", TerritoryStatus::Available))
            .collect();
        let publishers = vec![
            make_publisher(0, "Budi Santoso", "Wangurer"),
            make_publisher(1, "Citra Lestari", "Madidir"),
        ];
        let assignments: Vec<Assignment> = rows
            .iter()
            .enumerate()
            .map(|(i, (territory_id, publisher_id, day, closed))| {
                let start = format!("2024-01-{:02}", day + 1);
                let end = closed.then(|| format!("2024-02-{:02}", day + 1));
                make_assignment(100 + i as i64, *territory_id, *publisher_id, &start, end.as_deref())
            })
            .collect();

        let details = territory_details(&territories, &publishers, &assignments);
        prop_assert_eq!(details.len(), territories.len());
        for detail in &details {
            let closed = assignments
                .iter()
                .filter(|a| a.territory_id == detail.territory.id && !a.is_open())
                .count();
            prop_assert!(detail.history.len() <= closed);
        }
    }
}
