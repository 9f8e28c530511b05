//! Session configuration

use cdm_model::ClassKind;
use serde::{Deserialize, Serialize};

/// Configuration for a session and its bus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Buffer capacity of each bus channel
    pub bus_capacity: usize,
    /// Thing kinds the current user may write
    pub writable_kinds: Vec<ClassKind>,
}

impl SessionConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a bus channel capacity
    #[inline]
    #[must_use]
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }

    /// With write permission for `kind`
    #[inline]
    #[must_use]
    pub fn with_writable(mut self, kind: ClassKind) -> Self {
        self.writable_kinds.push(kind);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bus_capacity: 64,
            writable_kinds: Vec::new(),
        }
    }
}
