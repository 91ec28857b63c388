//! Content-type resolution for stored entries.

/// Content type used for collection index documents.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Decide which content type to store alongside a request body.
///
/// Precedence, highest first:
/// 1. a non-empty configured `override_type`, regardless of the request
/// 2. the request's own `Content-Type` header, if non-empty
/// 3. the configured `default_type`
///
/// The result is empty only when all three inputs are empty.
///
/// # Examples
///
/// ```
/// use apimock_store::resolve_content_type;
///
/// assert_eq!(resolve_content_type("text/plain", "", "application/json"), "text/plain");
/// assert_eq!(resolve_content_type("", "", "application/json"), "application/json");
/// assert_eq!(resolve_content_type("text/plain", "text/csv", ""), "text/csv");
/// ```
pub fn resolve_content_type(request_type: &str, override_type: &str, default_type: &str) -> String {
    if !override_type.is_empty() {
        return override_type.to_string();
    }
    if !request_type.is_empty() {
        return request_type.to_string();
    }
    default_type.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn precedence_table() {
        // (request, override, default, expected)
        let cases = [
            ("whatever", "", "", "whatever"),
            ("whatever", "", "content/default", "whatever"),
            ("", "", "content/default", "content/default"),
            ("", "the/override", "", "the/override"),
            ("ignore/this", "the/override", "", "the/override"),
            ("", "the/override", "content/default", "the/override"),
            ("ignore/this", "the/override", "content/default", "the/override"),
            ("", "", "", ""),
        ];
        for (request, override_type, default_type, expected) in cases {
            assert_eq!(
                resolve_content_type(request, override_type, default_type),
                expected,
                "request={request:?} override={override_type:?} default={default_type:?}"
            );
        }
    }

    proptest! {
        #[test]
        fn override_always_wins(req in ".*", ovr in ".+", def in ".*") {
            prop_assert_eq!(resolve_content_type(&req, &ovr, &def), ovr);
        }

        #[test]
        fn request_beats_default(req in ".+", def in ".*") {
            prop_assert_eq!(resolve_content_type(&req, "", &def), req);
        }

        #[test]
        fn default_when_nothing_else(def in ".*") {
            prop_assert_eq!(resolve_content_type("", "", &def), def);
        }
    }
}
