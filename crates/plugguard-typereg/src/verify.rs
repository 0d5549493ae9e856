//! Capability verification against a type registry.

use plugguard_types::capability::{CapabilitySet, VerificationResult};

use crate::registry::TypeRegistry;

/// Check whether `type_name` satisfies any capability in `capabilities`,
/// in declaration order. The first capability whose relation holds wins;
/// a blank name or a name the registry has never heard of short-circuits
/// to [`VerificationResult::TypeNotFound`].
pub fn verify(
    type_name: &str,
    capabilities: &CapabilitySet,
    registry: &TypeRegistry,
) -> VerificationResult {
    let type_name = type_name.trim();
    if type_name.is_empty() || !registry.exists(type_name) {
        return VerificationResult::TypeNotFound;
    }

    for cap in &capabilities.capabilities {
        let satisfied = if cap.proper_subtype_only {
            registry.is_proper_subtype_of(type_name, &cap.type_name)
        } else {
            registry.is_subtype_of(type_name, &cap.type_name)
        };
        if satisfied {
            return VerificationResult::Satisfied {
                capability: cap.type_name.clone(),
            };
        }
    }

    VerificationResult::Unsatisfied
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use plugguard_settings::Conventions;
    use plugguard_test_util::class_bytes;
    use plugguard_types::capability::{ApiGeneration, ElementRole};
    use plugguard_types::contracts;

    fn registry_with(classes: &[(&str, Option<&str>, &[&str])]) -> TypeRegistry {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let project =
            Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        for (name, super_name, interfaces) in classes {
            let rel = crate::classfile::artifact_rel_path(name);
            let path = project.join("target/classes").join(rel);
            std::fs::create_dir_all(path.parent().expect("parent").as_std_path())
                .expect("create class dir");
            std::fs::write(
                path.as_std_path(),
                class_bytes(name, *super_name, interfaces),
            )
            .expect("write class");
        }
        // The registry reads everything eagerly; the temp dir can go away
        // afterwards.
        TypeRegistry::build(&project, &Conventions::default(), false)
    }

    #[test]
    fn unknown_type_reports_not_found() {
        let registry = registry_with(&[]);
        let caps = CapabilitySet::for_v1();
        assert_eq!(
            verify("com.example.Missing", &caps, &registry),
            VerificationResult::TypeNotFound
        );
    }

    #[test]
    fn blank_name_reports_not_found() {
        let registry = registry_with(&[]);
        let caps = CapabilitySet::for_v1();
        assert_eq!(verify("   ", &caps, &registry), VerificationResult::TypeNotFound);
    }

    #[test]
    fn direct_implementor_satisfies_v1() {
        let registry = registry_with(&[(
            "com.example.Definition",
            Some(contracts::OBJECT),
            &[contracts::V1_PROCESS_PLUGIN_DEFINITION],
        )]);
        let caps = CapabilitySet::for_v1();
        assert_eq!(
            verify("com.example.Definition", &caps, &registry),
            VerificationResult::Satisfied {
                capability: contracts::V1_PROCESS_PLUGIN_DEFINITION.to_string(),
            }
        );
    }

    #[test]
    fn default_listener_descendant_matches_base_capability() {
        let registry = registry_with(&[(
            "com.example.Listener",
            Some(contracts::V2_DEFAULT_USER_TASK_LISTENER),
            &[],
        )]);
        let caps = CapabilitySet::for_generation(ApiGeneration::V2, ElementRole::UserTask);
        // The base-type capability is declared first; a descendant matches
        // it rather than the listener interface.
        assert_eq!(
            verify("com.example.Listener", &caps, &registry),
            VerificationResult::Satisfied {
                capability: contracts::V2_DEFAULT_USER_TASK_LISTENER.to_string(),
            }
        );
    }

    #[test]
    fn default_listener_itself_falls_through_to_the_interface_capability() {
        let registry = registry_with(&[]);
        let caps = CapabilitySet::for_generation(ApiGeneration::V2, ElementRole::UserTask);
        // The base type is not a proper subtype of itself, but implements
        // the listener interface, which is the second capability.
        assert_eq!(
            verify(contracts::V2_DEFAULT_USER_TASK_LISTENER, &caps, &registry),
            VerificationResult::Satisfied {
                capability: contracts::V2_USER_TASK_LISTENER.to_string(),
            }
        );
    }

    #[test]
    fn existing_but_unrelated_type_is_unsatisfied() {
        let registry = registry_with(&[("com.example.Plain", Some(contracts::OBJECT), &[])]);
        let caps = CapabilitySet::for_generation(ApiGeneration::V2, ElementRole::ServiceTask);
        assert_eq!(
            verify("com.example.Plain", &caps, &registry),
            VerificationResult::Unsatisfied
        );
    }

    #[test]
    fn transitive_implementor_satisfies_service_task() {
        let registry = registry_with(&[
            (
                "com.example.AbstractDelegate",
                Some(contracts::OBJECT),
                &[contracts::V2_SERVICE_TASK_DELEGATE],
            ),
            (
                "com.example.ConcreteDelegate",
                Some("com.example.AbstractDelegate"),
                &[],
            ),
        ]);
        let caps = CapabilitySet::for_generation(ApiGeneration::V2, ElementRole::ServiceTask);
        assert_eq!(
            verify("com.example.ConcreteDelegate", &caps, &registry),
            VerificationResult::Satisfied {
                capability: contracts::V2_SERVICE_TASK_DELEGATE.to_string(),
            }
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_lookup() {
        let registry = registry_with(&[(
            "com.example.Definition",
            Some(contracts::OBJECT),
            &[contracts::V1_PROCESS_PLUGIN_DEFINITION],
        )]);
        let caps = CapabilitySet::for_v1();
        assert!(verify("  com.example.Definition \t", &caps, &registry).is_pass());
    }
}
