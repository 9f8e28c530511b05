//! CDM Rows - generic row reconciliation
//!
//! Table-shaped projections of domain objects, kept in sync with add/
//! update/delete notifications:
//! - [`Row`]: the projection contract, with one explicit factory per type
//! - [`RowTable`]: ordered, identity-keyed reconciliation
//! - [`DeprecatableRowTable`]: adds the async deprecation toggle for
//!   library items
//!
//! Reconciliation never reloads: each change batch mutates exactly the rows
//! it names, in the canonical order update → add → remove.

// Core modules
pub mod deprecatable;
pub mod row;
pub mod table;

// Re-exports for convenience
pub use deprecatable::DeprecatableRowTable;
pub use row::{DataItemRow, Row};
pub use table::RowTable;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
