//! Versioned value containers
//!
//! A [`ParameterValueSet`] is the source-side container a subscription
//! watches: it carries a monotonically increasing revision number and the
//! history of previously recorded revisions. A
//! [`ParameterSubscriptionValueSet`] is the subscription-side counterpart
//! holding the subscriber's manual values next to the subscribed source.

use crate::ids::ValueSetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered list of raw string values
///
/// Value sets are string arrays on the wire; interpretation (scalar,
/// compound, array) is a parameter-type concern outside this core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueArray(pub Vec<String>);

impl ValueArray {
    /// Create a value array from anything yielding string-likes
    #[must_use]
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Number of values
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the array holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValueArray {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The subscribed (source) value set of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValueSet {
    /// Identifier
    pub iid: ValueSetId,
    /// Current revision number; increases on every published change
    pub revision_number: u32,
    /// Currently published values
    pub published: ValueArray,
    /// Recorded revision history, keyed by revision number
    pub revisions: BTreeMap<u32, ValueArray>,
}

impl ParameterValueSet {
    /// Create a value set at revision zero with no history
    #[must_use]
    pub fn new(published: ValueArray) -> Self {
        Self {
            iid: ValueSetId::new(),
            revision_number: 0,
            published,
            revisions: BTreeMap::new(),
        }
    }

    /// Record the current values into the history and bump the revision
    pub fn publish(&mut self, values: ValueArray) {
        self.revisions
            .insert(self.revision_number, self.published.clone());
        self.revision_number += 1;
        self.published = values;
    }

    /// The highest revision number present in the history, if any
    #[must_use]
    pub fn latest_recorded_revision(&self) -> Option<u32> {
        self.revisions.keys().next_back().copied()
    }
}

/// A subscription-side value set
///
/// Pairs the subscriber's own values with the subscribed source container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSubscriptionValueSet {
    /// Identifier
    pub iid: ValueSetId,
    /// Revision number of the subscription-side value set itself
    pub revision_number: u32,
    /// Values entered manually by the subscribing domain
    pub manual: ValueArray,
    /// The watched source value set
    pub subscribed: ParameterValueSet,
}

impl ParameterSubscriptionValueSet {
    /// Create a subscription-side value set around a source container
    #[must_use]
    pub fn new(subscribed: ParameterValueSet) -> Self {
        Self {
            iid: ValueSetId::new(),
            revision_number: 0,
            manual: ValueArray::default(),
            subscribed,
        }
    }

    /// Set the manual values
    #[must_use]
    pub fn with_manual(mut self, manual: ValueArray) -> Self {
        self.manual = manual;
        self
    }
}
