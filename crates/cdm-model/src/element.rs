//! Element definitions and usages
//!
//! An element definition owns parameters and contains usages of other
//! definitions; a usage references its definition by id (resolved through
//! the owning iteration) and may override some of its parameters.

use crate::ids::{DomainId, ElementId, ParameterId, UsageId};
use crate::parameter::{Parameter, ParameterOverride};
use crate::thing::{ClassKind, Thing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable element of the design (e.g. a battery, a reaction wheel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Identifier
    pub iid: ElementId,
    /// Full name
    pub name: String,
    /// The owning domain of expertise
    pub owner: DomainId,
    /// Parameters of this definition
    pub parameters: Vec<Parameter>,
    /// Usages of other definitions contained by this one
    pub contained_usages: Vec<ElementUsage>,
    /// Last modification stamp
    pub modified_on: DateTime<Utc>,
}

impl ElementDefinition {
    /// Create a definition without parameters or usages
    #[must_use]
    pub fn new(name: impl Into<String>, owner: DomainId) -> Self {
        Self {
            iid: ElementId::new(),
            name: name.into(),
            owner,
            parameters: Vec::new(),
            contained_usages: Vec::new(),
            modified_on: Utc::now(),
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a contained usage
    #[must_use]
    pub fn with_usage(mut self, usage: ElementUsage) -> Self {
        self.contained_usages.push(usage);
        self
    }

    /// Look up a parameter by id
    #[must_use]
    pub fn parameter(&self, id: ParameterId) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.iid == id)
    }
}

impl Thing for ElementDefinition {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::ElementDefinition
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}

/// One occurrence of an element definition inside another definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementUsage {
    /// Identifier
    pub iid: UsageId,
    /// Full name of this occurrence
    pub name: String,
    /// The owning domain of expertise
    pub owner: DomainId,
    /// The used definition, resolved through the iteration
    pub definition: ElementId,
    /// Parameter overrides local to this usage
    pub overrides: Vec<ParameterOverride>,
}

impl ElementUsage {
    /// Create a usage of `definition`
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner: DomainId,
        definition: &ElementDefinition,
    ) -> Self {
        Self {
            iid: UsageId::new(),
            name: name.into(),
            owner,
            definition: definition.iid,
            overrides: Vec::new(),
        }
    }

    /// Append a parameter override
    #[must_use]
    pub fn with_override(mut self, parameter_override: ParameterOverride) -> Self {
        self.overrides.push(parameter_override);
        self
    }
}

impl Thing for ElementUsage {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::ElementUsage
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}

/// A definition or a usage, matched exhaustively
///
/// Replaces runtime type tests over the two element kinds; the compiler
/// enforces that every consumer handles both.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    /// An element definition
    Definition(&'a ElementDefinition),
    /// An element usage
    Usage(&'a ElementUsage),
}

impl ElementRef<'_> {
    /// The wire identifier of the referenced element
    #[must_use]
    pub fn iid(&self) -> Uuid {
        match self {
            Self::Definition(def) => def.iid(),
            Self::Usage(usage) => usage.iid(),
        }
    }

    /// Human-readable name of the referenced element
    #[must_use]
    pub fn user_friendly_name(&self) -> &str {
        match self {
            Self::Definition(def) => def.user_friendly_name(),
            Self::Usage(usage) => usage.user_friendly_name(),
        }
    }
}
