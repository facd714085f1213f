//! List-view queries: filter, search, and sort over a snapshot.
//!
//! Filters narrow first, then the case-insensitive name search, then the
//! sort. Sort state is a (key, direction) pair; toggling the active key
//! flips direction, switching keys resets to ascending.

use bitimaps_model::{Publisher, Territory, TerritoryStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sortable columns of the territory list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerritorySortKey {
    #[default]
    Name,
    Status,
    Kdl,
}

/// Sortable columns of the publisher list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublisherSortKey {
    #[default]
    Name,
    Group,
}

/// Current sort state of a list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: PartialEq> SortConfig<K> {
    /// Click behavior: same column flips direction, a new column sorts
    /// ascending.
    pub fn toggle(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flip();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Case-folded collation key for name sorting and search.
pub(crate) fn collate(value: &str) -> String {
    value.to_lowercase()
}

fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || collate(name).contains(&collate(search))
}

/// Territory list query: status filter, KDL filter, search, sort.
///
/// Both filters are multi-select; an empty selection matches all. Search
/// matches the name or the KDL label.
#[derive(Debug, Clone, Default)]
pub struct TerritoryQuery {
    pub statuses: Vec<TerritoryStatus>,
    pub kdls: Vec<String>,
    pub search: String,
    pub sort: SortConfig<TerritorySortKey>,
}

impl TerritoryQuery {
    pub fn apply(&self, territories: &[Territory]) -> Vec<Territory> {
        let mut rows: Vec<Territory> = territories
            .iter()
            .filter(|t| self.statuses.is_empty() || self.statuses.contains(&t.status))
            .filter(|t| self.kdls.is_empty() || self.kdls.contains(&t.kdl))
            .filter(|t| matches_search(&t.name, &self.search) || matches_search(&t.kdl, &self.search))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let ordering = match self.sort.key {
                TerritorySortKey::Name => collate(&a.name).cmp(&collate(&b.name)),
                // Status sorts by wire spelling, matching the stored values.
                TerritorySortKey::Status => a.status.as_str().cmp(b.status.as_str()),
                TerritorySortKey::Kdl => collate(&a.kdl).cmp(&collate(&b.kdl)),
            };
            let ordering = ordering.then_with(|| a.id.cmp(&b.id));
            match self.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }
}

/// Publisher list query: group filter, name search, sort.
///
/// The group filter is multi-select; an empty selection matches all.
#[derive(Debug, Clone, Default)]
pub struct PublisherQuery {
    pub groups: Vec<String>,
    pub search: String,
    pub sort: SortConfig<PublisherSortKey>,
}

impl PublisherQuery {
    pub fn apply(&self, publishers: &[Publisher]) -> Vec<Publisher> {
        let mut rows: Vec<Publisher> = publishers
            .iter()
            .filter(|p| self.groups.is_empty() || self.groups.contains(&p.group))
            .filter(|p| matches_search(&p.name, &self.search))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let ordering = match self.sort.key {
                PublisherSortKey::Name => collate(&a.name).cmp(&collate(&b.name)),
                PublisherSortKey::Group => collate(&a.group).cmp(&collate(&b.group)),
            };
            let ordering = ordering.then_with(|| a.id.cmp(&b.id));
            match self.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }
}

/// Distinct KDL labels for the filter dropdown, sorted.
pub fn kdl_options(territories: &[Territory]) -> Vec<String> {
    let mut options: Vec<String> = territories.iter().map(|t| t.kdl.clone()).collect();
    options.sort();
    options.dedup();
    options
}

/// Distinct publisher group labels, sorted.
pub fn group_options(publishers: &[Publisher]) -> Vec<String> {
    let mut options: Vec<String> = publishers.iter().map(|p| p.group.clone()).collect();
    options.sort();
    options.dedup();
    options
}
