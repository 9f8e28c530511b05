//! Parameter subscriptions
//!
//! A subscription is one domain's watch on a parameter (or override) owned
//! by another domain. It holds one subscription-side value set per
//! option/state combination of the watched parameter.

use crate::ids::{DomainId, SubscriptionId};
use crate::thing::{ClassKind, Thing};
use crate::value_set::ParameterSubscriptionValueSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A domain-scoped watch on another domain's parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSubscription {
    /// Identifier
    pub iid: SubscriptionId,
    /// The subscribing domain
    pub owner: DomainId,
    /// Subscription-side value sets
    pub value_sets: Vec<ParameterSubscriptionValueSet>,
}

impl ParameterSubscription {
    /// Create an empty subscription for `owner`
    #[must_use]
    pub fn new(owner: DomainId) -> Self {
        Self {
            iid: SubscriptionId::new(),
            owner,
            value_sets: Vec::new(),
        }
    }

    /// Append a value set
    #[must_use]
    pub fn with_value_set(mut self, value_set: ParameterSubscriptionValueSet) -> Self {
        self.value_sets.push(value_set);
        self
    }
}

impl Thing for ParameterSubscription {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::ParameterSubscription
    }

    fn user_friendly_name(&self) -> &str {
        "ParameterSubscription"
    }
}
