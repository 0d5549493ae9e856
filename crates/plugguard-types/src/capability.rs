use crate::contracts;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declared API generation of a plugin; selects which capability contracts
/// apply to its implementation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApiGeneration {
    V1,
    V2,
}

/// Structural role of the element declaring an implementation type.
///
/// Generation 2 requires different contracts depending on whether the type
/// backs a service task or a user task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    ServiceTask,
    UserTask,
}

/// One acceptable supertype/interface a named type may satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Fully qualified name of the contract type.
    pub type_name: String,
    /// When set, the contract requires a *proper* subtype: the contract
    /// type itself does not satisfy the capability.
    pub proper_subtype_only: bool,
}

impl Capability {
    pub fn implements(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            proper_subtype_only: false,
        }
    }

    pub fn extends(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            proper_subtype_only: true,
        }
    }
}

/// Ordered list of acceptable capabilities for one verification; evaluated
/// in declaration order, first match wins for diagnostic purposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub capabilities: Vec<Capability>,
}

impl CapabilitySet {
    /// Generation-1 contract: one fixed legacy interface.
    pub fn for_v1() -> Self {
        Self {
            capabilities: vec![Capability::implements(
                contracts::V1_PROCESS_PLUGIN_DEFINITION,
            )],
        }
    }

    /// Generation-2 contracts for the given structural role.
    pub fn for_v2(role: ElementRole) -> Self {
        let capabilities = match role {
            ElementRole::ServiceTask => {
                vec![Capability::implements(contracts::V2_SERVICE_TASK_DELEGATE)]
            }
            ElementRole::UserTask => vec![
                Capability::extends(contracts::V2_DEFAULT_USER_TASK_LISTENER),
                Capability::implements(contracts::V2_USER_TASK_LISTENER),
            ],
        };
        Self { capabilities }
    }

    pub fn for_generation(generation: ApiGeneration, role: ElementRole) -> Self {
        match generation {
            ApiGeneration::V1 => Self::for_v1(),
            ApiGeneration::V2 => Self::for_v2(role),
        }
    }
}

/// Outcome of checking one type name against a capability set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerificationResult {
    /// The type satisfies the named capability (first match in declaration
    /// order).
    Satisfied { capability: String },
    /// The name is blank or no type with this name could be resolved.
    TypeNotFound,
    /// The type exists but satisfies none of the required capabilities.
    Unsatisfied,
}

impl VerificationResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, VerificationResult::Satisfied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_set_is_the_single_legacy_contract() {
        let set = CapabilitySet::for_v1();
        assert_eq!(set.capabilities.len(), 1);
        assert_eq!(
            set.capabilities[0].type_name,
            contracts::V1_PROCESS_PLUGIN_DEFINITION
        );
        assert!(!set.capabilities[0].proper_subtype_only);
    }

    #[test]
    fn v2_user_task_set_marks_base_class_as_proper_subtype_only() {
        let set = CapabilitySet::for_v2(ElementRole::UserTask);
        assert_eq!(set.capabilities.len(), 2);
        assert_eq!(
            set.capabilities[0].type_name,
            contracts::V2_DEFAULT_USER_TASK_LISTENER
        );
        assert!(set.capabilities[0].proper_subtype_only);
        assert_eq!(
            set.capabilities[1].type_name,
            contracts::V2_USER_TASK_LISTENER
        );
        assert!(!set.capabilities[1].proper_subtype_only);
    }

    #[test]
    fn generation_selector_routes_by_generation() {
        let v1 = CapabilitySet::for_generation(ApiGeneration::V1, ElementRole::ServiceTask);
        assert_eq!(v1, CapabilitySet::for_v1());
        let v2 = CapabilitySet::for_generation(ApiGeneration::V2, ElementRole::ServiceTask);
        assert_eq!(v2, CapabilitySet::for_v2(ElementRole::ServiceTask));
    }
}
