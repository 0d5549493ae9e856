//! Ambient platform type table.
//!
//! The verifier ships structural knowledge of the platform API types the
//! capability contracts are defined against, the way the original tool saw
//! them on its own execution classpath. This tier is consulted before any
//! project-scoped lookup so platform types resolve even for projects that
//! do not bundle the API.

use std::collections::HashMap;
use std::sync::OnceLock;

use plugguard_types::contracts;

use crate::classfile::{TypeDescriptor, TypeKind};

pub(crate) fn lookup(name: &str) -> Option<&'static TypeDescriptor> {
    table().get(name)
}

fn table() -> &'static HashMap<&'static str, TypeDescriptor> {
    static TABLE: OnceLock<HashMap<&'static str, TypeDescriptor>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert(
            contracts::OBJECT,
            TypeDescriptor {
                name: contracts::OBJECT.to_string(),
                super_name: None,
                interfaces: Vec::new(),
                kind: TypeKind::Class,
            },
        );
        map.insert(
            contracts::V1_PROCESS_PLUGIN_DEFINITION,
            interface(contracts::V1_PROCESS_PLUGIN_DEFINITION, &[]),
        );
        map.insert(
            contracts::V2_SERVICE_TASK_DELEGATE,
            interface(contracts::V2_SERVICE_TASK_DELEGATE, &[]),
        );
        map.insert(
            contracts::V2_USER_TASK_LISTENER,
            interface(contracts::V2_USER_TASK_LISTENER, &[]),
        );
        map.insert(
            contracts::V2_DEFAULT_USER_TASK_LISTENER,
            TypeDescriptor {
                name: contracts::V2_DEFAULT_USER_TASK_LISTENER.to_string(),
                super_name: Some(contracts::OBJECT.to_string()),
                interfaces: vec![contracts::V2_USER_TASK_LISTENER.to_string()],
                kind: TypeKind::Class,
            },
        );
        map
    })
}

fn interface(name: &str, interfaces: &[&str]) -> TypeDescriptor {
    TypeDescriptor {
        name: name.to_string(),
        super_name: Some(contracts::OBJECT.to_string()),
        interfaces: interfaces.iter().map(|i| i.to_string()).collect(),
        kind: TypeKind::Interface,
    }
}
