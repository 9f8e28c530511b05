//! Iteration-scoped queries
//!
//! [`IterationService`] answers "how many subscribed value sets changed since
//! the user last acknowledged them" for one iteration/domain pair, flattens
//! subscriptions per element, and lists the parameter types in use. Missing
//! data (no iteration, no domain, unresolved definition) yields zero/empty
//! results, never an error.

use cdm_model::{
    DomainId, ElementDefinition, ElementId, ElementRef, ElementUsage, Iteration, ParameterId,
    ParameterSubscription, ParameterSubscriptionValueSet, ParameterType, ValueSetId,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

/// Revision recorded when the user acknowledged a value-set update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcknowledgedRevision {
    /// The subscribed revision observed at acknowledgment time
    pub revision_number: u32,
    /// When the acknowledgment happened
    pub acknowledged_on: DateTime<Utc>,
}

/// Read-mostly query helper over iterations
///
/// The only state is the per-domain acknowledgment register used to suppress
/// already-seen updates.
#[derive(Debug, Default)]
pub struct IterationService {
    validated: DashMap<DomainId, HashMap<ValueSetId, AcknowledgedRevision>>,
}

impl IterationService {
    /// Create a service with an empty acknowledgment register
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscriptions of `domain` on an element, ordered by parameter-type name
    ///
    /// - a definition contributes its parameters' subscriptions;
    /// - a usage without overrides delegates to its definition;
    /// - a usage with overrides contributes the override subscriptions plus
    ///   the definition-parameter subscriptions for parameters *not* covered
    ///   by an override, so nothing is counted twice.
    #[must_use]
    pub fn subscriptions_by_element<'a>(
        &self,
        iteration: &'a Iteration,
        element: ElementRef<'a>,
        domain: DomainId,
    ) -> Vec<&'a ParameterSubscription> {
        let mut found: Vec<(&'a str, &'a ParameterSubscription)> = Vec::new();
        match element {
            ElementRef::Definition(definition) => {
                collect_definition(definition, domain, &mut found);
            }
            ElementRef::Usage(usage) => {
                let Some(definition) = iteration.element(usage.definition) else {
                    return Vec::new();
                };
                if usage.overrides.is_empty() {
                    collect_definition(definition, domain, &mut found);
                } else {
                    let overridden: HashSet<ParameterId> =
                        usage.overrides.iter().map(|o| o.parameter).collect();
                    for parameter_override in &usage.overrides {
                        for subscription in &parameter_override.subscriptions {
                            if subscription.owner == domain {
                                found.push((
                                    parameter_override.parameter_type.name.as_str(),
                                    subscription,
                                ));
                            }
                        }
                    }
                    for parameter in definition
                        .parameters
                        .iter()
                        .filter(|p| !overridden.contains(&p.iid))
                    {
                        for subscription in &parameter.subscriptions {
                            if subscription.owner == domain {
                                found.push((parameter.parameter_type.name.as_str(), subscription));
                            }
                        }
                    }
                }
            }
        }
        found.sort_by(|a, b| a.0.cmp(b.0));
        found.into_iter().map(|(_, s)| s).collect()
    }

    /// Count value sets of `domain` still considered updated
    ///
    /// Walks the top element and every nested usage occurrence. A value set
    /// is raw-updated when its subscribed source has recorded history and
    /// the source's current revision differs from the latest recorded one;
    /// the raw signal is suppressed when an acknowledgment for this domain
    /// matches either the value set's own revision or the subscribed
    /// revision.
    #[must_use]
    pub fn number_of_updates(&self, iteration: Option<&Iteration>, domain: DomainId) -> usize {
        let Some(iteration) = iteration else { return 0 };
        let Some(top_id) = iteration.top_element else {
            return 0;
        };
        let Some(top) = iteration.element(top_id) else {
            return 0;
        };

        let mut count = self.count_updated(
            &self.subscriptions_by_element(iteration, ElementRef::Definition(top), domain),
            domain,
        );
        let mut path: Vec<ElementId> = vec![top.iid];
        for usage in &top.contained_usages {
            self.visit_usage(iteration, usage, domain, &mut path, &mut count);
        }
        count
    }

    /// Parameter types used by elements directly in the iteration
    ///
    /// Deduplicated by identity, first occurrence wins; not recursive into
    /// usages.
    #[must_use]
    pub fn parameter_types<'a>(&self, iteration: Option<&'a Iteration>) -> Vec<&'a ParameterType> {
        let Some(iteration) = iteration else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut types = Vec::new();
        for definition in &iteration.elements {
            for parameter in &definition.parameters {
                if seen.insert(parameter.parameter_type.iid) {
                    types.push(&parameter.parameter_type);
                }
            }
        }
        types
    }

    /// Record that `domain` has seen the current state of the given value sets
    pub fn acknowledge<'a, I>(&self, domain: DomainId, value_sets: I)
    where
        I: IntoIterator<Item = &'a ParameterSubscriptionValueSet>,
    {
        let now = Utc::now();
        let mut register = self.validated.entry(domain).or_default();
        for value_set in value_sets {
            register.insert(
                value_set.iid,
                AcknowledgedRevision {
                    revision_number: value_set.subscribed.revision_number,
                    acknowledged_on: now,
                },
            );
        }
        tracing::debug!(%domain, "value-set updates acknowledged");
    }

    /// Drop all acknowledgments recorded for `domain`
    pub fn clear_acknowledgments(&self, domain: DomainId) {
        self.validated.remove(&domain);
    }

    fn visit_usage(
        &self,
        iteration: &Iteration,
        usage: &ElementUsage,
        domain: DomainId,
        path: &mut Vec<ElementId>,
        count: &mut usize,
    ) {
        *count += self.count_updated(
            &self.subscriptions_by_element(iteration, ElementRef::Usage(usage), domain),
            domain,
        );
        if path.contains(&usage.definition) {
            // containment cycle; do not expand this definition again
            return;
        }
        let Some(definition) = iteration.element(usage.definition) else {
            return;
        };
        path.push(definition.iid);
        for nested in &definition.contained_usages {
            self.visit_usage(iteration, nested, domain, path, count);
        }
        path.pop();
    }

    fn count_updated(&self, subscriptions: &[&ParameterSubscription], domain: DomainId) -> usize {
        let register = self.validated.get(&domain);
        let mut count = 0;
        for subscription in subscriptions {
            for value_set in &subscription.value_sets {
                let updated = !value_set.subscribed.revisions.is_empty()
                    && value_set.subscribed.latest_recorded_revision()
                        != Some(value_set.subscribed.revision_number);
                let suppressed = register
                    .as_ref()
                    .and_then(|entry| entry.value().get(&value_set.iid))
                    .is_some_and(|ack| {
                        ack.revision_number == value_set.revision_number
                            || ack.revision_number == value_set.subscribed.revision_number
                    });
                if updated && !suppressed {
                    count += 1;
                }
            }
        }
        count
    }
}

fn collect_definition<'a>(
    definition: &'a ElementDefinition,
    domain: DomainId,
    found: &mut Vec<(&'a str, &'a ParameterSubscription)>,
) {
    for parameter in &definition.parameters {
        for subscription in &parameter.subscriptions {
            if subscription.owner == domain {
                found.push((parameter.parameter_type.name.as_str(), subscription));
            }
        }
    }
}
