//! Stable value types shared across the plugguard workspace.
//!
//! This crate is intentionally boring:
//! - normalized project-relative path handling
//! - classified resolution and verification results
//! - capability contract definitions per API generation
//! - the plugin descriptor shape the engine consumes

#![forbid(unsafe_code)]

pub mod capability;
pub mod contracts;
pub mod descriptor;
pub mod path;
pub mod resolution;

pub use capability::{ApiGeneration, Capability, CapabilitySet, ElementRole, VerificationResult};
pub use descriptor::PluginDescriptor;
pub use path::NormalizedPath;
pub use resolution::{ResolutionResult, ResourceRoot, RootLayout};
