//! Platform capability contract type names.
//!
//! These are the supertypes/interfaces a declared implementation type must
//! satisfy for a given API generation. Static configuration, not runtime
//! state; the ambient type table in the registry ships the same names.

/// Generation-1 legacy contract: every implementation type must implement
/// this single interface.
pub const V1_PROCESS_PLUGIN_DEFINITION: &str = "io.procflow.api.v1.ProcessPluginDefinition";

/// Generation-2 service-task contract.
pub const V2_SERVICE_TASK_DELEGATE: &str = "io.procflow.api.v2.ServiceTaskDelegate";

/// Generation-2 user-task listener interface.
pub const V2_USER_TASK_LISTENER: &str = "io.procflow.api.v2.UserTaskListener";

/// Generation-2 default user-task listener base class. Satisfied only by
/// proper subtypes: the base class itself must not pass its own contract.
pub const V2_DEFAULT_USER_TASK_LISTENER: &str = "io.procflow.api.v2.DefaultUserTaskListener";

/// Root of every class hierarchy in the inspected artifact format.
pub const OBJECT: &str = "java.lang.Object";
