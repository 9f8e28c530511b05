//! Parameters, overrides and parameter types

use crate::ids::{DomainId, OverrideId, ParameterId, ParameterTypeId};
use crate::subscription::ParameterSubscription;
use crate::thing::{ClassKind, Thing};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The type of a parameter (mass, power, temperature, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterType {
    /// Identifier
    pub iid: ParameterTypeId,
    /// Full name
    pub name: String,
    /// Short name
    pub short_name: String,
}

impl ParameterType {
    /// Create a parameter type with a fresh identifier
    #[must_use]
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            iid: ParameterTypeId::new(),
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

impl Thing for ParameterType {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::ParameterType
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}

/// A parameter of an element definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Identifier
    pub iid: ParameterId,
    /// The type of this parameter
    pub parameter_type: ParameterType,
    /// The owning domain of expertise
    pub owner: DomainId,
    /// Subscriptions other domains hold on this parameter
    pub subscriptions: Vec<ParameterSubscription>,
}

impl Parameter {
    /// Create a parameter without subscriptions
    #[must_use]
    pub fn new(parameter_type: ParameterType, owner: DomainId) -> Self {
        Self {
            iid: ParameterId::new(),
            parameter_type,
            owner,
            subscriptions: Vec::new(),
        }
    }

    /// Append a subscription
    #[must_use]
    pub fn with_subscription(mut self, subscription: ParameterSubscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }
}

impl Thing for Parameter {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::Parameter
    }

    fn user_friendly_name(&self) -> &str {
        &self.parameter_type.name
    }
}

/// A parameter override on an element usage
///
/// Shadows one definition parameter on a specific usage; carries its own
/// subscriptions, distinct from the overridden parameter's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverride {
    /// Identifier
    pub iid: OverrideId,
    /// The overridden definition parameter
    pub parameter: ParameterId,
    /// The type of the overridden parameter
    pub parameter_type: ParameterType,
    /// The owning domain of expertise
    pub owner: DomainId,
    /// Subscriptions held on this override
    pub subscriptions: Vec<ParameterSubscription>,
}

impl ParameterOverride {
    /// Create an override shadowing `parameter`
    #[must_use]
    pub fn new(parameter: &Parameter) -> Self {
        Self {
            iid: OverrideId::new(),
            parameter: parameter.iid,
            parameter_type: parameter.parameter_type.clone(),
            owner: parameter.owner,
            subscriptions: Vec::new(),
        }
    }

    /// Append a subscription
    #[must_use]
    pub fn with_subscription(mut self, subscription: ParameterSubscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }
}

impl Thing for ParameterOverride {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::ParameterOverride
    }

    fn user_friendly_name(&self) -> &str {
        &self.parameter_type.name
    }
}
