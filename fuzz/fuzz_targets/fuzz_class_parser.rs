//! Fuzz target for class artifact shape parsing.
//!
//! Goal: The parser should **never panic** on any input.
//! It may return errors for malformed artifacts, but panics are
//! unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_class_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Should never panic - errors are fine
    let _ = plugguard_typereg::parse_class(data);
});
