//! Type registry and capability verification.
//!
//! A `TypeRegistry` answers "does a type with this name exist, and what is
//! its shape" for one project, assembled from the project's build output
//! and visible dependency archives, layered on top of an ambient table of
//! platform API types. Registries are cached per canonical project path;
//! construction is the expensive step the cache amortizes.

#![forbid(unsafe_code)]

mod ambient;
mod classfile;
mod registry;
mod verify;

pub use classfile::{ClassFileError, TypeDescriptor, TypeKind, parse_class};
pub use registry::{RegistryCache, TypeRegistry};
pub use verify::verify;
