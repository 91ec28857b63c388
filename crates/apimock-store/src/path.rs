//! Resource path helpers.
//!
//! Paths are URL paths such as `/users/0`. A single trailing `/` is not
//! significant for lookups: `/users/` and `/users` address the same entry.
//! Only one slash is trimmed, so `/users//` normalizes to `/users/`.

/// Path segment separator.
pub const SEPARATOR: char = '/';

/// Strip exactly one trailing separator. The root path `/` is kept as is.
pub fn normalize(path: &str) -> &str {
    match path.strip_suffix(SEPARATOR) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Returns `true` if the path ends with the separator, i.e. it is written in
/// the explicit collection form.
pub fn has_trailing_separator(path: &str) -> bool {
    path.ends_with(SEPARATOR)
}

/// Split a normalized path into its parent and final segment.
///
/// Returns `None` for top-level paths such as `/users`, which have no parent
/// collection.
pub fn split_child(path: &str) -> Option<(&str, &str)> {
    let idx = path.rfind(SEPARATOR)?;
    if idx == 0 {
        return None;
    }
    Some((&path[..idx], &path[idx + 1..]))
}

/// Build the path of child `id` under `collection`.
pub fn child_path(collection: &str, id: u64) -> String {
    format!("{collection}{SEPARATOR}{id}")
}

/// Parse a child ID segment.
///
/// Only the canonical decimal form is accepted: `"7"` parses, `"07"`, `"+7"`
/// and `"seven"` do not, so every ID maps to exactly one path.
pub fn parse_child_id(segment: &str) -> Option<u64> {
    let id: u64 = segment.parse().ok()?;
    (id.to_string() == segment).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_one_slash() {
        assert_eq!(normalize("/users/"), "/users");
        assert_eq!(normalize("/users"), "/users");
        assert_eq!(normalize("/users//"), "/users/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn trailing_separator() {
        assert!(has_trailing_separator("/x/"));
        assert!(has_trailing_separator("/"));
        assert!(!has_trailing_separator("/x"));
    }

    #[test]
    fn split_child_paths() {
        assert_eq!(split_child("/x/0"), Some(("/x", "0")));
        assert_eq!(split_child("/a/b/c"), Some(("/a/b", "c")));
        assert_eq!(split_child("/x"), None);
        assert_eq!(split_child("x"), None);
    }

    #[test]
    fn child_path_format() {
        assert_eq!(child_path("/x", 0), "/x/0");
        assert_eq!(child_path("/a/b", 12), "/a/b/12");
    }

    #[test]
    fn child_ids_must_be_canonical() {
        assert_eq!(parse_child_id("0"), Some(0));
        assert_eq!(parse_child_id("42"), Some(42));
        assert_eq!(parse_child_id("042"), None);
        assert_eq!(parse_child_id("+1"), None);
        assert_eq!(parse_child_id("-1"), None);
        assert_eq!(parse_child_id("abc"), None);
        assert_eq!(parse_child_id(""), None);
    }
}
