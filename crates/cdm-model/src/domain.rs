//! Domains of expertise
//!
//! Ownership tags on parameters and subscriptions. Subscriptions are scoped
//! per domain: a domain "watches" values owned by other domains.

use crate::ids::DomainId;
use crate::thing::{ClassKind, Thing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organizational domain of expertise (e.g. Thermal, Power, AOCS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainOfExpertise {
    /// Identifier
    pub iid: DomainId,
    /// Full name
    pub name: String,
    /// Short name / acronym
    pub short_name: String,
    /// Last modification stamp
    pub modified_on: DateTime<Utc>,
}

impl DomainOfExpertise {
    /// Create a domain with a fresh identifier
    #[must_use]
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            iid: DomainId::new(),
            name: name.into(),
            short_name: short_name.into(),
            modified_on: Utc::now(),
        }
    }
}

impl Thing for DomainOfExpertise {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::DomainOfExpertise
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}
