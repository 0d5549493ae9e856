use crate::capability::ApiGeneration;
use serde::{Deserialize, Serialize};

/// Metadata a plugin declares ahead of deployment.
///
/// Descriptor *discovery* is an outer concern; the engine only consumes
/// references and type names a descriptor has already produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: String,
    /// Module subdirectory for multi-plugin projects, when the descriptor
    /// carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub api_generation: ApiGeneration,
    /// Raw declared resource references, in declaration order.
    #[serde(default)]
    pub resource_references: Vec<String>,
    /// Fully qualified implementation-type names, in declaration order.
    #[serde(default)]
    pub implementation_types: Vec<String>,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<String>, api_generation: ApiGeneration) -> Self {
        Self {
            id: id.into(),
            module: None,
            api_generation,
            resource_references: Vec::new(),
            implementation_types: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}
