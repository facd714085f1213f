//! Full-collection snapshot of the three tables.
//!
//! There is no incremental sync: the presentation layer re-fetches everything
//! on load, on refresh, and after every successful mutation, and the join
//! layer recomputes its view models from the fresh snapshot.

use tracing::info;

use bitimaps_model::{Assignment, Publisher, Result, Territory};

use crate::store::DataStore;

/// One fetch of all three tables.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub territories: Vec<Territory>,
    pub publishers: Vec<Publisher>,
    pub assignments: Vec<Assignment>,
}

impl Snapshot {
    /// Fetch all three tables. Fails on the first table that cannot be read;
    /// callers that prefer stale-or-empty data catch and log.
    pub fn fetch(store: &dyn DataStore) -> Result<Self> {
        let territories = store.territories()?;
        let assignments = store.assignments()?;
        let publishers = store.publishers()?;
        info!(
            territories = territories.len(),
            publishers = publishers.len(),
            assignments = assignments.len(),
            "snapshot fetched"
        );
        Ok(Self {
            territories,
            publishers,
            assignments,
        })
    }
}
