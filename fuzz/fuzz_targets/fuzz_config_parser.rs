//! Fuzz target for configuration parsing.
//!
//! Goal: Config parsing and convention resolution should **never panic**
//! on any input. Errors for invalid TOML are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use plugguard_settings::Overrides;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = plugguard_settings::parse_config_toml(text) {
            // Resolving conventions from any parsed config must not panic.
            let _ = plugguard_settings::resolve_conventions(cfg, Overrides::default());
        }
    }
});
