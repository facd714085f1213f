//! In-memory `DataStore` with the same predicate semantics as the REST
//! surface. Backs the test suites and offline inspection.

use std::sync::Mutex;

use bitimaps_model::{
    Assignment, AssignmentCompletion, NewAssignment, NewPublisher, NewTerritory, Publisher,
    PublisherPatch, Result, StoreError, Territory, TerritoryPatch, TerritoryStatus,
};

use crate::store::DataStore;

#[derive(Debug, Default)]
struct Inner {
    territories: Vec<Territory>,
    publishers: Vec<Publisher>,
    assignments: Vec<Assignment>,
    next_id: i64,
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory table store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing rows; the id counter resumes past the maximum seen.
    pub fn with_data(
        territories: Vec<Territory>,
        publishers: Vec<Publisher>,
        assignments: Vec<Assignment>,
    ) -> Self {
        let max_id = territories
            .iter()
            .map(|t| t.id)
            .chain(publishers.iter().map(|p| p.id))
            .chain(assignments.iter().map(|a| a.id))
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                territories,
                publishers,
                assignments,
                next_id: max_id,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Mutex poisoning only happens when a test panics mid-write.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl DataStore for MemoryStore {
    fn territories(&self) -> Result<Vec<Territory>> {
        Ok(self.lock().territories.clone())
    }

    fn publishers(&self) -> Result<Vec<Publisher>> {
        Ok(self.lock().publishers.clone())
    }

    fn assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.lock().assignments.clone())
    }

    fn insert_territory(&self, row: &NewTerritory) -> Result<Territory> {
        let mut inner = self.lock();
        let territory = Territory {
            id: inner.allocate_id(),
            name: row.name.clone(),
            kdl: row.kdl.clone(),
            gmaps_link: row.gmaps_link.clone(),
            status: row.status,
        };
        inner.territories.push(territory.clone());
        Ok(territory)
    }

    fn update_territory(&self, id: i64, patch: &TerritoryPatch) -> Result<()> {
        let mut inner = self.lock();
        let territory = inner
            .territories
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                entity: "territory",
                id,
            })?;
        territory.name = patch.name.clone();
        territory.kdl = patch.kdl.clone();
        territory.gmaps_link = patch.gmaps_link.clone();
        Ok(())
    }

    fn set_territory_status(&self, id: i64, status: TerritoryStatus) -> Result<()> {
        let mut inner = self.lock();
        let territory = inner
            .territories
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                entity: "territory",
                id,
            })?;
        territory.status = status;
        Ok(())
    }

    fn delete_territory(&self, id: i64) -> Result<()> {
        let mut inner = self.lock();
        let before = inner.territories.len();
        inner.territories.retain(|t| t.id != id);
        if inner.territories.len() == before {
            return Err(StoreError::NotFound {
                entity: "territory",
                id,
            });
        }
        Ok(())
    }

    fn insert_publisher(&self, row: &NewPublisher) -> Result<Publisher> {
        let mut inner = self.lock();
        let publisher = Publisher {
            id: inner.allocate_id(),
            name: row.name.clone(),
            group: row.group.clone(),
        };
        inner.publishers.push(publisher.clone());
        Ok(publisher)
    }

    fn update_publisher(&self, id: i64, patch: &PublisherPatch) -> Result<()> {
        let mut inner = self.lock();
        let publisher = inner
            .publishers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound {
                entity: "publisher",
                id,
            })?;
        publisher.name = patch.name.clone();
        publisher.group = patch.group.clone();
        Ok(())
    }

    fn delete_publisher(&self, id: i64) -> Result<()> {
        let mut inner = self.lock();
        let before = inner.publishers.len();
        inner.publishers.retain(|p| p.id != id);
        if inner.publishers.len() == before {
            return Err(StoreError::NotFound {
                entity: "publisher",
                id,
            });
        }
        Ok(())
    }

    fn insert_assignment(&self, row: &NewAssignment) -> Result<Assignment> {
        let mut inner = self.lock();
        let assignment = Assignment {
            id: inner.allocate_id(),
            territory_id: row.territory_id,
            publisher_id: Some(row.publisher_id),
            start_date: row.start_date.clone(),
            completion_date: None,
            notes: row.notes.clone(),
        };
        inner.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn complete_assignment(&self, id: i64, completion: &AssignmentCompletion) -> Result<()> {
        let mut inner = self.lock();
        let assignment = inner
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound {
                entity: "assignment",
                id,
            })?;
        assignment.completion_date = Some(completion.completion_date.clone());
        assignment.notes = completion.notes.clone();
        Ok(())
    }

    fn find_open_assignment(&self, territory_id: i64) -> Result<Option<Assignment>> {
        let inner = self.lock();
        let mut open: Vec<&Assignment> = inner
            .assignments
            .iter()
            .filter(|a| a.territory_id == territory_id && a.is_open())
            .collect();
        open.sort_by(|a, b| (a.start_date.as_str(), a.id).cmp(&(b.start_date.as_str(), b.id)));
        Ok(open.pop().cloned())
    }
}
