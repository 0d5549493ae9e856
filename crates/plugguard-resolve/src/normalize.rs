//! Reference normalization: raw declared reference -> project-relative path.
//!
//! Pure and deterministic; the only "failure" is the blank sentinel
//! (`None`).

use plugguard_settings::Conventions;
use plugguard_types::NormalizedPath;

/// Canonicalize a raw declared resource reference.
///
/// Rules, in order: trim; strip a leading scheme-style prefix
/// (`classpath:`, `file:`, ...); strip the conventional source-resource
/// root prefix; strip leading separators; canonicalize all separators to
/// `/`. Returns `None` for blank input.
pub fn normalize_reference(raw: &str, conventions: &Conventions) -> Option<NormalizedPath> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let body = strip_scheme(trimmed).replace('\\', "/");
    let body = body.trim_start_matches('/');

    let source_root = conventions.source_resource_root.trim_matches('/');
    let body = match body.strip_prefix(source_root) {
        Some(rest) if rest.starts_with('/') => rest,
        _ => body,
    };

    NormalizedPath::new(body)
}

/// Strip a `scheme:` prefix. A scheme is at least two characters, starts
/// alphabetic, and continues with `[A-Za-z0-9+.-]`; the two-character
/// minimum keeps Windows drive prefixes (`C:`) intact.
fn strip_scheme(s: &str) -> &str {
    let Some(colon) = s.find(':') else {
        return s;
    };
    if colon < 2 {
        return s;
    }
    let scheme = &s[..colon];
    let mut chars = scheme.chars();
    let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    if head_ok && tail_ok {
        &s[colon + 1..]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn conv() -> Conventions {
        Conventions::default()
    }

    #[test]
    fn blank_input_is_the_empty_sentinel() {
        assert_eq!(normalize_reference("", &conv()), None);
        assert_eq!(normalize_reference("   \t ", &conv()), None);
    }

    #[test]
    fn plain_reference_passes_through() {
        let p = normalize_reference("fhir/ActivityDefinition/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/ActivityDefinition/x.xml");
    }

    #[test]
    fn scheme_prefix_is_stripped() {
        let p = normalize_reference("classpath:fhir/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/x.xml");
        let p = normalize_reference("classpath:/fhir/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/x.xml");
    }

    #[test]
    fn windows_drive_is_not_a_scheme() {
        let p = normalize_reference(r"C:\work\fhir\x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "C:/work/fhir/x.xml");
    }

    #[test]
    fn source_resource_root_prefix_is_stripped() {
        let p = normalize_reference("src/main/resources/fhir/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/x.xml");
        // Prefix only counts on a segment boundary.
        let p = normalize_reference("src/main/resourcesx/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "src/main/resourcesx/x.xml");
    }

    #[test]
    fn leading_separators_are_stripped() {
        let p = normalize_reference("///fhir/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/x.xml");
        let p = normalize_reference("/src/main/resources/fhir/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/x.xml");
    }

    #[test]
    fn scheme_and_prefix_combine() {
        let p =
            normalize_reference("classpath:/src/main/resources/fhir/x.xml", &conv()).expect("some");
        assert_eq!(p.as_str(), "fhir/x.xml");
    }

    proptest! {
        #[test]
        fn never_panics_and_output_is_canonical(raw in ".{0,128}") {
            if let Some(p) = normalize_reference(&raw, &conv()) {
                prop_assert!(!p.as_str().is_empty());
                prop_assert!(!p.as_str().starts_with('/'));
                prop_assert!(!p.as_str().contains('\\'));
            }
        }

        #[test]
        fn surrounding_whitespace_is_irrelevant(raw in "[a-z/.]{1,32}") {
            let padded = format!("  {raw}\t");
            prop_assert_eq!(
                normalize_reference(&padded, &conv()),
                normalize_reference(&raw, &conv())
            );
        }
    }
}
