//! Reference data libraries and their deprecatable contents

use crate::ids::{LibraryId, UnitId};
use crate::thing::{ClassKind, Deprecatable, Thing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference data library containing reusable definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLibrary {
    /// Identifier
    pub iid: LibraryId,
    /// Full name
    pub name: String,
    /// Short name
    pub short_name: String,
}

impl ReferenceLibrary {
    /// Create a library with a fresh identifier
    #[must_use]
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            iid: LibraryId::new(),
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

impl Thing for ReferenceLibrary {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::ReferenceLibrary
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}

/// A measurement unit from a reference library
///
/// Units are deprecated rather than deleted once referenced by design data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementUnit {
    /// Identifier
    pub iid: UnitId,
    /// Full name
    pub name: String,
    /// Short name / symbol
    pub short_name: String,
    /// The containing library
    pub container: LibraryId,
    /// Deprecation marker
    pub is_deprecated: bool,
    /// Last modification stamp
    pub modified_on: DateTime<Utc>,
}

impl MeasurementUnit {
    /// Create a unit contained by `container`
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        container: LibraryId,
    ) -> Self {
        Self {
            iid: UnitId::new(),
            name: name.into(),
            short_name: short_name.into(),
            container,
            is_deprecated: false,
            modified_on: Utc::now(),
        }
    }
}

impl Thing for MeasurementUnit {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::MeasurementUnit
    }

    fn container(&self) -> Option<Uuid> {
        Some(self.container.as_uuid())
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}

impl Deprecatable for MeasurementUnit {
    fn is_deprecated(&self) -> bool {
        self.is_deprecated
    }

    fn set_deprecated(&mut self, deprecated: bool) {
        self.is_deprecated = deprecated;
        self.modified_on = Utc::now();
    }
}
