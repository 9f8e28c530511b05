//! Iterations and design options
//!
//! An iteration is one opened unit of design data: the element definitions
//! of the model, the option tree, and a designated top element. Multiple
//! iterations can be open concurrently in a session.

use crate::element::ElementDefinition;
use crate::ids::{ElementId, IterationId, OptionId};
use crate::subscription::ParameterSubscription;
use crate::thing::{ClassKind, Thing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One opened unit of design data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    /// Identifier
    pub iid: IterationId,
    /// Sequential iteration number within the engineering model
    pub number: u32,
    /// The root of the element tree, if assigned
    pub top_element: Option<ElementId>,
    /// All element definitions of this iteration
    pub elements: Vec<ElementDefinition>,
    /// Design options of this iteration
    pub options: Vec<DesignOption>,
}

impl Iteration {
    /// Create an empty iteration
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            iid: IterationId::new(),
            number,
            top_element: None,
            elements: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Append an element definition
    #[must_use]
    pub fn with_element(mut self, element: ElementDefinition) -> Self {
        self.elements.push(element);
        self
    }

    /// Append an element definition and make it the top element
    #[must_use]
    pub fn with_top_element(mut self, element: ElementDefinition) -> Self {
        self.top_element = Some(element.iid);
        self.elements.push(element);
        self
    }

    /// Append a design option
    #[must_use]
    pub fn with_option(mut self, option: DesignOption) -> Self {
        self.options.push(option);
        self
    }

    /// Resolve an element definition by id
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&ElementDefinition> {
        self.elements.iter().find(|e| e.iid == id)
    }

    /// All parameter subscriptions of this iteration
    ///
    /// Yields definition-parameter subscriptions followed by usage-override
    /// subscriptions; overrides carry their own subscription objects, so no
    /// subscription is yielded twice.
    pub fn parameter_subscriptions(&self) -> impl Iterator<Item = &ParameterSubscription> + '_ {
        let on_parameters = self
            .elements
            .iter()
            .flat_map(|e| &e.parameters)
            .flat_map(|p| &p.subscriptions);
        let on_overrides = self
            .elements
            .iter()
            .flat_map(|e| &e.contained_usages)
            .flat_map(|u| &u.overrides)
            .flat_map(|o| &o.subscriptions);
        on_parameters.chain(on_overrides)
    }
}

impl Thing for Iteration {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::Iteration
    }

    fn user_friendly_name(&self) -> &str {
        "Iteration"
    }
}

/// A design option of an iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOption {
    /// Identifier
    pub iid: OptionId,
    /// Full name
    pub name: String,
    /// The containing iteration
    pub container: IterationId,
    /// Last modification stamp
    pub modified_on: DateTime<Utc>,
}

impl DesignOption {
    /// Create an option contained by `container`
    #[must_use]
    pub fn new(name: impl Into<String>, container: IterationId) -> Self {
        Self {
            iid: OptionId::new(),
            name: name.into(),
            container,
            modified_on: Utc::now(),
        }
    }
}

impl Thing for DesignOption {
    fn iid(&self) -> Uuid {
        self.iid.as_uuid()
    }

    fn class_kind(&self) -> ClassKind {
        ClassKind::DesignOption
    }

    fn container(&self) -> Option<Uuid> {
        Some(self.container.as_uuid())
    }

    fn user_friendly_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::DomainId;
    use crate::parameter::{Parameter, ParameterOverride, ParameterType};
    use crate::subscription::ParameterSubscription;
    use crate::element::ElementUsage;

    #[test]
    fn iteration_resolves_elements() {
        let domain = DomainId::new();
        let battery = ElementDefinition::new("Battery", domain);
        let battery_id = battery.iid;
        let iteration = Iteration::new(1).with_top_element(battery);

        assert_eq!(iteration.top_element, Some(battery_id));
        assert!(iteration.element(battery_id).is_some());
        assert!(iteration.element(ElementId::new()).is_none());
    }

    #[test]
    fn subscriptions_cover_parameters_and_overrides() {
        let owner = DomainId::new();
        let watcher = DomainId::new();
        let parameter = Parameter::new(ParameterType::new("mass", "m"), owner)
            .with_subscription(ParameterSubscription::new(watcher));
        let shadow = ParameterOverride::new(&parameter)
            .with_subscription(ParameterSubscription::new(watcher));

        let inner = ElementDefinition::new("Battery", owner).with_parameter(parameter);
        let usage = ElementUsage::new("Battery 1", owner, &inner).with_override(shadow);
        let top = ElementDefinition::new("Satellite", owner).with_usage(usage);

        let iteration = Iteration::new(1).with_top_element(top).with_element(inner);
        assert_eq!(iteration.parameter_subscriptions().count(), 2);
    }
}
