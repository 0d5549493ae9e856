//! Config parsing and layout-convention resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration
//! provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::PlugguardConfigV1;
pub use resolve::{Conventions, Overrides};

/// Parse `plugguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PlugguardConfigV1> {
    let cfg: PlugguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective layout conventions used by the engine
/// (defaults + config + overrides).
pub fn resolve_conventions(cfg: PlugguardConfigV1, overrides: Overrides) -> Conventions {
    resolve::resolve_conventions(cfg, overrides)
}
