//! The seam between derivations and the hosted backend.

use bitimaps_model::{
    Assignment, AssignmentCompletion, NewAssignment, NewPublisher, NewTerritory, Publisher,
    PublisherPatch, Result, Territory, TerritoryPatch, TerritoryStatus,
};

/// Request/response access to the three hosted tables.
///
/// The backend offers no pagination and no server-side joins; reads are
/// full-table snapshots and writes are single-row inserts/updates/deletes.
/// Assignment rows are never deleted; they are closed and retained.
pub trait DataStore {
    fn territories(&self) -> Result<Vec<Territory>>;
    fn publishers(&self) -> Result<Vec<Publisher>>;
    fn assignments(&self) -> Result<Vec<Assignment>>;

    fn insert_territory(&self, row: &NewTerritory) -> Result<Territory>;
    fn update_territory(&self, id: i64, patch: &TerritoryPatch) -> Result<()>;
    fn set_territory_status(&self, id: i64, status: TerritoryStatus) -> Result<()>;
    fn delete_territory(&self, id: i64) -> Result<()>;

    fn insert_publisher(&self, row: &NewPublisher) -> Result<Publisher>;
    fn update_publisher(&self, id: i64, patch: &PublisherPatch) -> Result<()>;
    fn delete_publisher(&self, id: i64) -> Result<()>;

    fn insert_assignment(&self, row: &NewAssignment) -> Result<Assignment>;
    fn complete_assignment(&self, id: i64, completion: &AssignmentCompletion) -> Result<()>;

    /// The single-row `completion_date is null` lookup for a territory.
    ///
    /// If more than one open row exists the pick is deterministic: latest
    /// start date, highest id as tie-break.
    fn find_open_assignment(&self, territory_id: i64) -> Result<Option<Assignment>>;
}

/// The shared-secret login check.
pub trait PasswordGate {
    /// Ok on success; `WrongPassword` or `ServerConfig` on failure.
    fn verify_password(&self, password: &str) -> Result<()>;
}
