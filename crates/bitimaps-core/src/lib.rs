//! Derived views and the assignment state machine.
//!
//! Everything in this crate is a pure (or store-mediated) function over the
//! snapshot the store crate fetches: the join layer, dashboard aggregates,
//! list queries, the ongoing-work report, and the assign/complete
//! transitions with their drift repair.

pub mod dashboard;
pub mod datetime;
pub mod details;
pub mod query;
pub mod report;
pub mod transition;

pub use dashboard::{Activity, ActivityKind, Dashboard, dashboard};
pub use details::{publisher_details, territory_details, territory_details_for};
pub use query::{
    PublisherQuery, PublisherSortKey, SortConfig, SortDirection, TerritoryQuery, TerritorySortKey,
    group_options, kdl_options,
};
pub use report::{OngoingAssignment, ongoing_assignments};
pub use transition::{assign, complete, derived_status, reconcile, status_consistent};
