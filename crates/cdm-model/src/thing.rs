//! The `Thing` abstraction
//!
//! Everything the remote store identifies is a "thing": it has a UUID `iid`,
//! a concrete class kind, and usually a container. The [`Thing`] trait is the
//! seam the row-reconciliation and permission layers work against;
//! [`AnyThing`] is the tagged union used for transaction payloads instead of
//! runtime reflection.

use crate::domain::DomainOfExpertise;
use crate::element::ElementDefinition;
use crate::iteration::DesignOption;
use crate::library::MeasurementUnit;
use crate::subscription::ParameterSubscription;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Concrete class of a thing
///
/// Used by the permission policy (`can_write` is granted per kind) and for
/// diagnostics. One variant per concrete model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// A domain of expertise
    DomainOfExpertise,
    /// An element definition
    ElementDefinition,
    /// An element usage
    ElementUsage,
    /// A parameter of an element definition
    Parameter,
    /// A parameter override on an element usage
    ParameterOverride,
    /// A parameter subscription
    ParameterSubscription,
    /// A subscription-side value set
    ParameterSubscriptionValueSet,
    /// A subscribed (source) value set
    ParameterValueSet,
    /// A parameter type
    ParameterType,
    /// An open iteration
    Iteration,
    /// A design option of an iteration
    DesignOption,
    /// A measurement unit from a reference library
    MeasurementUnit,
    /// A reference data library
    ReferenceLibrary,
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An identified domain object
pub trait Thing {
    /// The wire identifier of this thing
    fn iid(&self) -> Uuid;

    /// The concrete class of this thing
    fn class_kind(&self) -> ClassKind;

    /// The `iid` of the direct container, if any
    fn container(&self) -> Option<Uuid> {
        None
    }

    /// Human-readable name used for display and ordering
    fn user_friendly_name(&self) -> &str;
}

/// A thing that can be marked deprecated instead of deleted
pub trait Deprecatable: Thing {
    /// Whether this thing is currently deprecated
    fn is_deprecated(&self) -> bool;

    /// Set the deprecation state
    fn set_deprecated(&mut self, deprecated: bool);
}

/// Tagged union over the writable thing kinds
///
/// Transaction payloads carry `AnyThing` values; consumers match exhaustively
/// instead of downcasting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnyThing {
    /// A domain of expertise
    DomainOfExpertise(DomainOfExpertise),
    /// An element definition
    ElementDefinition(ElementDefinition),
    /// A parameter subscription
    ParameterSubscription(ParameterSubscription),
    /// A design option
    DesignOption(DesignOption),
    /// A measurement unit
    MeasurementUnit(MeasurementUnit),
}

impl AnyThing {
    /// The wire identifier of the wrapped thing
    #[must_use]
    pub fn iid(&self) -> Uuid {
        match self {
            Self::DomainOfExpertise(d) => d.iid(),
            Self::ElementDefinition(e) => e.iid(),
            Self::ParameterSubscription(s) => s.iid(),
            Self::DesignOption(o) => o.iid(),
            Self::MeasurementUnit(u) => u.iid(),
        }
    }

    /// The concrete class of the wrapped thing
    #[must_use]
    pub fn class_kind(&self) -> ClassKind {
        match self {
            Self::DomainOfExpertise(_) => ClassKind::DomainOfExpertise,
            Self::ElementDefinition(_) => ClassKind::ElementDefinition,
            Self::ParameterSubscription(_) => ClassKind::ParameterSubscription,
            Self::DesignOption(_) => ClassKind::DesignOption,
            Self::MeasurementUnit(_) => ClassKind::MeasurementUnit,
        }
    }

    /// Human-readable name of the wrapped thing
    #[must_use]
    pub fn user_friendly_name(&self) -> &str {
        match self {
            Self::DomainOfExpertise(d) => d.user_friendly_name(),
            Self::ElementDefinition(e) => e.user_friendly_name(),
            Self::ParameterSubscription(s) => s.user_friendly_name(),
            Self::DesignOption(o) => o.user_friendly_name(),
            Self::MeasurementUnit(u) => u.user_friendly_name(),
        }
    }
}

impl From<DomainOfExpertise> for AnyThing {
    fn from(value: DomainOfExpertise) -> Self {
        Self::DomainOfExpertise(value)
    }
}

impl From<ElementDefinition> for AnyThing {
    fn from(value: ElementDefinition) -> Self {
        Self::ElementDefinition(value)
    }
}

impl From<ParameterSubscription> for AnyThing {
    fn from(value: ParameterSubscription) -> Self {
        Self::ParameterSubscription(value)
    }
}

impl From<DesignOption> for AnyThing {
    fn from(value: DesignOption) -> Self {
        Self::DesignOption(value)
    }
}

impl From<MeasurementUnit> for AnyThing {
    fn from(value: MeasurementUnit) -> Self {
        Self::MeasurementUnit(value)
    }
}

macro_rules! try_from_any {
    ($variant:ident => $ty:ty) => {
        impl TryFrom<AnyThing> for $ty {
            type Error = AnyThing;

            fn try_from(value: AnyThing) -> Result<Self, Self::Error> {
                match value {
                    AnyThing::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

try_from_any!(DomainOfExpertise => DomainOfExpertise);
try_from_any!(ElementDefinition => ElementDefinition);
try_from_any!(ParameterSubscription => ParameterSubscription);
try_from_any!(DesignOption => DesignOption);
try_from_any!(MeasurementUnit => MeasurementUnit);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_thing_delegates_identity() {
        let domain = DomainOfExpertise::new("Thermal", "THE");
        let iid = domain.iid();
        let any: AnyThing = domain.into();

        assert_eq!(any.iid(), iid);
        assert_eq!(any.class_kind(), ClassKind::DomainOfExpertise);
        assert_eq!(any.user_friendly_name(), "Thermal");
    }

    #[test]
    fn class_kind_display() {
        assert_eq!(ClassKind::DesignOption.to_string(), "DesignOption");
    }
}
