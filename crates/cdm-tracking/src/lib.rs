//! CDM Tracking - subscription change tracking core
//!
//! Keeps per-iteration snapshots of subscribed-parameter revisions, diffs
//! them on every session refresh, and drives the aggregate unseen-update
//! count:
//! - [`RevisionSnapshot`] / [`TrackedParameterSubscription`]: pure
//!   point-in-time revision records and their diff
//! - [`SubscriptionService`]: per-session tracking authority reacting to
//!   session events
//! - [`IterationService`]: domain-scoped queries with acknowledgment
//!   suppression
//!
//! # Example
//!
//! ```rust,ignore
//! use cdm_session::{InMemorySession, NotificationHub, SessionConfig};
//! use cdm_tracking::SubscriptionService;
//! use std::sync::Arc;
//!
//! let session = Arc::new(InMemorySession::new(&SessionConfig::new()));
//! let hub = Arc::new(NotificationHub::new());
//! let service = Arc::new(SubscriptionService::new(session.clone(), hub.clone()));
//! let _worker = Arc::clone(&service).spawn(session.bus());
//! ```

// Core modules
pub mod iteration_service;
pub mod snapshot;
pub mod subscription_service;

// Re-exports for convenience
pub use iteration_service::{AcknowledgedRevision, IterationService};
pub use snapshot::{RevisionSnapshot, TrackedParameterSubscription};
pub use subscription_service::SubscriptionService;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
