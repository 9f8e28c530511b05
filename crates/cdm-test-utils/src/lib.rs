//! Testing utilities for the CDM workspace
//!
//! Shared fixtures for the domain graph and session collaborators.

#![allow(missing_docs)]

use cdm_model::{
    ClassKind, DomainId, ElementDefinition, Iteration, Parameter, ParameterSubscription,
    ParameterSubscriptionValueSet, ParameterType, ParameterValueSet, ValueArray,
};
use cdm_session::{InMemorySession, SessionConfig};
use std::sync::Arc;

/// Initialize test logging once; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// A subscription-side value set whose source has no recorded history.
pub fn fresh_value_set() -> ParameterSubscriptionValueSet {
    ParameterSubscriptionValueSet::new(ParameterValueSet::new(ValueArray::new(["0"])))
}

/// A subscription-side value set whose source published `bumps` times.
pub fn bumped_value_set(bumps: u32) -> ParameterSubscriptionValueSet {
    let mut source = ParameterValueSet::new(ValueArray::new(["0"]));
    for bump in 0..bumps {
        source.publish(ValueArray::new([format!("{}", bump + 1)]));
    }
    ParameterSubscriptionValueSet::new(source)
}

/// A subscription of `owner` holding `value_sets` fresh value sets.
pub fn subscription(owner: DomainId, value_sets: usize) -> ParameterSubscription {
    let mut built = ParameterSubscription::new(owner);
    for _ in 0..value_sets {
        built = built.with_value_set(fresh_value_set());
    }
    built
}

/// A parameter owned by `owner` with one fresh subscription of `watcher`.
pub fn watched_parameter(type_name: &str, owner: DomainId, watcher: DomainId) -> Parameter {
    Parameter::new(ParameterType::new(type_name, type_name), owner)
        .with_subscription(subscription(watcher, 1))
}

/// An iteration with one top element carrying one watched parameter.
pub fn iteration_with_watched_parameter(owner: DomainId, watcher: DomainId) -> Iteration {
    let top = ElementDefinition::new("Satellite", owner)
        .with_parameter(watched_parameter("mass", owner, watcher));
    Iteration::new(1).with_top_element(top)
}

/// Publish a new value on every subscribed source value set of the iteration.
pub fn bump_all_subscribed(iteration: &mut Iteration) {
    for element in &mut iteration.elements {
        for parameter in &mut element.parameters {
            for sub in &mut parameter.subscriptions {
                for value_set in &mut sub.value_sets {
                    value_set.subscribed.publish(ValueArray::new(["bumped"]));
                }
            }
        }
        for usage in &mut element.contained_usages {
            for shadow in &mut usage.overrides {
                for sub in &mut shadow.subscriptions {
                    for value_set in &mut sub.value_sets {
                        value_set.subscribed.publish(ValueArray::new(["bumped"]));
                    }
                }
            }
        }
    }
}

/// An in-memory session granting write permission for the given kinds.
pub fn test_session(writable: &[ClassKind]) -> Arc<InMemorySession> {
    let mut config = SessionConfig::new();
    for kind in writable {
        config = config.with_writable(*kind);
    }
    Arc::new(InMemorySession::new(&config))
}
