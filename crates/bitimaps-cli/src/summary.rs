//! Table rendering for the CLI views.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bitimaps_core::{ActivityKind, Dashboard, OngoingAssignment};
use bitimaps_model::{Publisher, PublisherDetails, Territory, TerritoryDetails, TerritoryStatus};

pub fn print_dashboard(board: &Dashboard) {
    println!("Territories: {}", board.total_territories);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (status, count) in &board.status_counts {
        table.add_row(vec![status_cell(*status), Cell::new(count)]);
    }
    println!("{table}");

    if !board.kdl_distribution.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("KDL"), header_cell("Territories")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for (kdl, count) in &board.kdl_distribution {
            table.add_row(vec![Cell::new(kdl), Cell::new(count)]);
        }
        println!("{table}");
    }

    if board.recent_activity.is_empty() {
        return;
    }
    println!();
    println!("Recent activity:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Event"),
        header_cell("Publisher"),
        header_cell("Territory"),
        header_cell("Date"),
    ]);
    apply_table_style(&mut table);
    for activity in &board.recent_activity {
        let event = match activity.kind {
            ActivityKind::Started => Cell::new("Mulai").fg(Color::Yellow),
            ActivityKind::Completed => Cell::new("Selesai").fg(Color::Green),
        };
        table.add_row(vec![
            event,
            Cell::new(&activity.publisher_name),
            Cell::new(&activity.territory_name),
            Cell::new(&activity.date),
        ]);
    }
    println!("{table}");
}

pub fn print_territories(territories: &[Territory]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("KDL"),
        header_cell("Status"),
        header_cell("Map"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for territory in territories {
        table.add_row(vec![
            Cell::new(territory.id),
            Cell::new(&territory.name),
            Cell::new(&territory.kdl),
            status_cell(territory.status),
            link_cell(territory.gmaps_link.as_deref()),
        ]);
    }
    println!("{table}");
    println!("{} territory(ies)", territories.len());
}

pub fn print_publishers(publishers: &[Publisher]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Group"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for publisher in publishers {
        table.add_row(vec![
            Cell::new(publisher.id),
            Cell::new(&publisher.name),
            Cell::new(&publisher.group),
        ]);
    }
    println!("{table}");
    println!("{} publisher(s)", publishers.len());
}

pub fn print_territory_details(details: &TerritoryDetails) {
    let territory = &details.territory;
    println!("Territory: {} ({})", territory.name, territory.kdl);
    println!("Status: {}", territory.status);
    if let Some(link) = &territory.gmaps_link {
        println!("Map: {link}");
    }
    match &details.current {
        Some(current) => {
            println!(
                "Currently worked by {} since {}",
                current.publisher_name, current.start_date
            );
            if let Some(notes) = &current.notes {
                println!("Notes: {notes}");
            }
        }
        None => println!("No open assignment."),
    }
    if details.history.is_empty() {
        println!("No completed assignments.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Publisher"),
        header_cell("Started"),
        header_cell("Completed"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    for entry in &details.history {
        table.add_row(vec![
            Cell::new(&entry.publisher_name),
            Cell::new(&entry.start_date),
            Cell::new(&entry.completion_date),
            notes_cell(entry.notes.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_publisher_details(details: &PublisherDetails) {
    let publisher = &details.publisher;
    println!("Publisher: {} ({})", publisher.name, publisher.group);
    match &details.current {
        Some(current) => {
            println!(
                "Currently working {} since {}",
                current.territory_name, current.start_date
            );
            if let Some(link) = &current.gmaps_link {
                println!("Map: {link}");
            }
            if let Some(notes) = &current.notes {
                println!("Notes: {notes}");
            }
        }
        None => println!("No open assignment."),
    }
    if details.history.is_empty() {
        println!("No completed assignments.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Territory"),
        header_cell("Started"),
        header_cell("Completed"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    for entry in &details.history {
        table.add_row(vec![
            Cell::new(&entry.territory_name),
            Cell::new(&entry.start_date),
            Cell::new(&entry.completion_date),
            notes_cell(entry.notes.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_report(rows: &[OngoingAssignment], form_link: &str) {
    println!("Laporan daerah yang sedang dikerjakan");
    if rows.is_empty() {
        println!("No ongoing assignments.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Publisher"),
            header_cell("Territory"),
            header_cell("Since"),
        ]);
        apply_table_style(&mut table);
        for row in rows {
            table.add_row(vec![
                Cell::new(&row.publisher_name),
                Cell::new(&row.territory_name),
                Cell::new(&row.start_date),
            ]);
        }
        println!("{table}");
        println!("{} ongoing assignment(s)", rows.len());
    }
    println!("Formulir S-13: {form_link}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: TerritoryStatus) -> Cell {
    match status {
        TerritoryStatus::Available => Cell::new(status.as_str()).fg(Color::Green),
        TerritoryStatus::InProgress => Cell::new(status.as_str()).fg(Color::Yellow),
        TerritoryStatus::Completed => Cell::new(status.as_str()).fg(Color::Blue),
    }
}

fn link_cell(link: Option<&str>) -> Cell {
    match link {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn notes_cell(notes: Option<&str>) -> Cell {
    match notes {
        Some(notes) => Cell::new(notes),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
