//! CDM Model - concurrent-design domain object graph
//!
//! The typed "thing" model the tracking and reconciliation layers work on:
//! - Typed identifiers and the [`Thing`] / [`Deprecatable`] traits
//! - Iterations, element definitions/usages and design options
//! - Parameters, overrides, parameter types
//! - Parameter subscriptions and their versioned value sets
//!
//! The model is deliberately value-based: things are plain cloneable data,
//! references between them are typed ids resolved through the owning
//! [`Iteration`]. The remote store that produces these values is outside
//! this workspace.

// Core modules
pub mod domain;
pub mod element;
pub mod ids;
pub mod iteration;
pub mod library;
pub mod parameter;
pub mod subscription;
pub mod thing;
pub mod value_set;

// Re-exports for convenience
pub use domain::DomainOfExpertise;
pub use element::{ElementDefinition, ElementRef, ElementUsage};
pub use ids::{
    DomainId, ElementId, IterationId, LibraryId, OptionId, OverrideId, ParameterId,
    ParameterTypeId, SubscriptionId, UnitId, UsageId, ValueSetId,
};
pub use iteration::{DesignOption, Iteration};
pub use library::{MeasurementUnit, ReferenceLibrary};
pub use parameter::{Parameter, ParameterOverride, ParameterType};
pub use subscription::ParameterSubscription;
pub use thing::{AnyThing, ClassKind, Deprecatable, Thing};
pub use value_set::{ParameterSubscriptionValueSet, ParameterValueSet, ValueArray};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
