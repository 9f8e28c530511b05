//! Typed identifiers for domain objects
//!
//! Every identified thing carries a UUID `iid` (the wire identifier used by
//! the remote data store). The newtypes below keep the different id spaces
//! from being mixed up at compile time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            #[inline]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID
            #[inline]
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of an open iteration
    IterationId
);
define_id!(
    /// Identifier of a domain of expertise
    DomainId
);
define_id!(
    /// Identifier of an element definition
    ElementId
);
define_id!(
    /// Identifier of an element usage
    UsageId
);
define_id!(
    /// Identifier of a parameter
    ParameterId
);
define_id!(
    /// Identifier of a parameter override
    OverrideId
);
define_id!(
    /// Identifier of a parameter subscription
    SubscriptionId
);
define_id!(
    /// Identifier of a value set (subscription-side or subscribed-side)
    ValueSetId
);
define_id!(
    /// Identifier of a parameter type
    ParameterTypeId
);
define_id!(
    /// Identifier of a design option
    OptionId
);
define_id!(
    /// Identifier of a measurement unit
    UnitId
);
define_id!(
    /// Identifier of a reference data library
    LibraryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct() {
        let a = IterationId::new();
        let b = IterationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        let id = DomainId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = ValueSetId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: ValueSetId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
