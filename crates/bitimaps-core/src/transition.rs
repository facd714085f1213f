//! The assignment state machine.
//!
//! Assign and complete are each two writes against a backend with no
//! transactions: an assignment-row write followed by a territory-status
//! write. The first write is authoritative; if the status write fails the
//! transition is reported as partial and [`reconcile`] repairs the drift on
//! the next run.

use tracing::{info, warn};

use bitimaps_model::{
    Assignment, AssignRequest, AssignmentCompletion, CompleteRequest, NewAssignment, Result,
    StoreError, Territory, TerritoryStatus,
};
use bitimaps_store::DataStore;

/// Open an assignment: insert the row, then mark the territory in progress.
///
/// Rejected with `Conflict` when the territory already has an open row.
pub fn assign(store: &dyn DataStore, request: &AssignRequest) -> Result<Assignment> {
    if let Some(open) = store.find_open_assignment(request.territory_id)? {
        warn!(
            territory_id = request.territory_id,
            open_assignment_id = open.id,
            "assign rejected, territory already has an open assignment"
        );
        return Err(StoreError::Conflict(request.territory_id));
    }
    let row = store.insert_assignment(&NewAssignment {
        territory_id: request.territory_id,
        publisher_id: request.publisher_id,
        start_date: request.start_date.clone(),
        notes: request.notes.clone(),
    })?;
    info!(
        assignment_id = row.id,
        territory_id = request.territory_id,
        publisher_id = request.publisher_id,
        "assignment opened"
    );
    set_status_with_retry(store, request.territory_id, TerritoryStatus::InProgress)?;
    Ok(row)
}

/// Close the open assignment: patch the row, then mark the territory done.
///
/// Fails with `NoOpenAssignment` when there is nothing to close.
pub fn complete(store: &dyn DataStore, request: &CompleteRequest) -> Result<Assignment> {
    let Some(open) = store.find_open_assignment(request.territory_id)? else {
        return Err(StoreError::NoOpenAssignment(request.territory_id));
    };
    store.complete_assignment(
        open.id,
        &AssignmentCompletion {
            completion_date: request.completion_date.clone(),
            notes: request.notes.clone(),
        },
    )?;
    info!(
        assignment_id = open.id,
        territory_id = request.territory_id,
        "assignment completed"
    );
    set_status_with_retry(store, request.territory_id, TerritoryStatus::Completed)?;
    // Mirrors the stored row: the completion patch overwrites notes.
    Ok(Assignment {
        completion_date: Some(request.completion_date.clone()),
        notes: request.notes.clone(),
        ..open
    })
}

/// The second write of a transition, with one retry on transient failure.
///
/// The assignment row is already committed by the time this runs, so a
/// final failure surfaces as `PartialTransition` rather than the raw error.
fn set_status_with_retry(
    store: &dyn DataStore,
    territory_id: i64,
    status: TerritoryStatus,
) -> Result<()> {
    match store.set_territory_status(territory_id, status) {
        Ok(()) => Ok(()),
        Err(first) if first.is_retryable() => {
            warn!(
                territory_id,
                status = status.as_str(),
                error = %first,
                "status write failed, retrying once"
            );
            store.set_territory_status(territory_id, status).map_err(|second| {
                warn!(territory_id, error = %second, "status write retry failed");
                StoreError::PartialTransition(territory_id)
            })
        }
        Err(error) => {
            warn!(territory_id, error = %error, "status write failed");
            Err(StoreError::PartialTransition(territory_id))
        }
    }
}

/// What the stored status of a territory should be, given its rows.
pub fn derived_status(territory_id: i64, assignments: &[Assignment]) -> TerritoryStatus {
    let mut any_closed = false;
    for assignment in assignments.iter().filter(|a| a.territory_id == territory_id) {
        if assignment.is_open() {
            return TerritoryStatus::InProgress;
        }
        any_closed = true;
    }
    if any_closed {
        TerritoryStatus::Completed
    } else {
        TerritoryStatus::Available
    }
}

/// Repair stored statuses that drifted from the assignment rows.
///
/// Run after a `PartialTransition` (or on startup); returns how many
/// territories were patched.
pub fn reconcile(store: &dyn DataStore) -> Result<usize> {
    let territories = store.territories()?;
    let assignments = store.assignments()?;
    let mut repaired = 0;
    for territory in &territories {
        let expected = derived_status(territory.id, &assignments);
        if territory.status != expected {
            info!(
                territory_id = territory.id,
                stored = territory.status.as_str(),
                expected = expected.as_str(),
                "repairing drifted territory status"
            );
            store.set_territory_status(territory.id, expected)?;
            repaired += 1;
        }
    }
    Ok(repaired)
}

/// Whether a territory's stored status agrees with its rows.
pub fn status_consistent(territory: &Territory, assignments: &[Assignment]) -> bool {
    territory.status == derived_status(territory.id, assignments)
}
