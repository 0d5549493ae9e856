//! Static verification for process-automation plugin artifacts.
//!
//! The facade exposes one entry point, [`LintSession`], which owns the
//! per-session caches (resolved resource roots, archive indexes,
//! materialized dependency entries, type registries) and wires the
//! resolution and verification crates together. Everything a session
//! materializes on disk is cleaned up when it is dropped.

#![forbid(unsafe_code)]

mod session;

pub use plugguard_settings::{Conventions, Overrides, parse_config_toml, resolve_conventions};
pub use plugguard_types::{
    ApiGeneration, Capability, CapabilitySet, ElementRole, NormalizedPath, PluginDescriptor,
    ResolutionResult, ResourceRoot, RootLayout, VerificationResult, contracts,
};
pub use plugguard_typereg::{TypeDescriptor, TypeKind, TypeRegistry};
pub use session::LintSession;
