//! CDM Session - collaborator seams for the tracking core
//!
//! The change-tracking core consumes three external collaborators:
//! - a **session** exposing open iterations, domain lookups, permissions and
//!   async write/refresh ([`SessionAccess`])
//! - a **message bus** delivering session lifecycle events and per-type
//!   object change batches ([`EventBus`])
//! - a **notification badge** absorbing aggregate unseen-update counts
//!   ([`Notifier`])
//!
//! All three are passed explicitly to consumers; nothing in this workspace
//! reaches for ambient global state. [`InMemorySession`] is a reference
//! implementation wired to the same events a remote session would publish.

// Core modules
pub mod bus;
pub mod config;
pub mod error;
pub mod events;
pub mod memory;
pub mod notification;
pub mod observable;
pub mod session;

// Re-exports for convenience
pub use bus::{BusEvent, EventBus};
pub use config::SessionConfig;
pub use error::SessionError;
pub use events::{SessionEvent, ThingChangeSet};
pub use memory::InMemorySession;
pub use notification::{NotificationHub, Notifier};
pub use observable::ObservableValue;
pub use session::{PermissionPolicy, SessionAccess, Transaction};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
