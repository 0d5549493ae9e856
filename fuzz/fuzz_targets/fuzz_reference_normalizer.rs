//! Fuzz target for resource reference normalization.
//!
//! Goal: Normalization should **never panic** on any input.
//! It may return `None` for blank references, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_reference_normalizer
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use plugguard_settings::Conventions;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let conventions = Conventions::default();
        // Should never panic; any produced path must be in canonical form.
        if let Some(normalized) = plugguard_resolve::normalize_reference(text, &conventions) {
            let s = normalized.as_str();
            assert!(!s.is_empty());
            assert!(!s.starts_with('/'));
            assert!(!s.contains('\\'));
        }
    }
});
