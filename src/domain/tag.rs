use crate::domain::branch::normalize_prefix;

/// Derive a tag name from a tag-candidate branch name.
///
/// Removes the normalized `tags_prefix` from the front of `candidate`, then
/// `strip` if the remainder starts with it. Both removals are anchored at the
/// start and happen at most once. The result may be empty.
///
/// Example: ("tags/release-1.2.3", "tags/", Some("release-")) -> "1.2.3"
pub fn strip_tag_prefix(candidate: &str, tags_prefix: &str, strip: Option<&str>) -> String {
    let prefix = normalize_prefix(tags_prefix);
    let candidate = candidate.trim();
    let name = candidate.strip_prefix(prefix.as_str()).unwrap_or(candidate);

    let name = match strip {
        Some(strip) if !strip.is_empty() => name.strip_prefix(strip).unwrap_or(name),
        _ => name,
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_prefix_only() {
        assert_eq!(strip_tag_prefix("tags/1.0", "tags/", None), "1.0");
        assert_eq!(strip_tag_prefix("tags/1.0", "tags", None), "1.0");
    }

    #[test]
    fn test_strip_configured_prefix() {
        assert_eq!(
            strip_tag_prefix("tags/release-1.2.3", "tags/", Some("release-")),
            "1.2.3"
        );
    }

    #[test]
    fn test_strip_is_anchored_at_start() {
        assert_eq!(
            strip_tag_prefix("tags/v1-release-2", "tags/", Some("release-")),
            "v1-release-2"
        );
    }

    #[test]
    fn test_strip_removes_only_once() {
        assert_eq!(
            strip_tag_prefix("tags/vv1.0", "tags/", Some("v")),
            "v1.0"
        );
    }

    #[test]
    fn test_empty_strip_is_ignored() {
        assert_eq!(strip_tag_prefix("tags/1.0", "tags/", Some("")), "1.0");
    }

    #[test]
    fn test_degenerate_names_are_empty() {
        assert_eq!(strip_tag_prefix("tags/", "tags/", None), "");
        assert_eq!(
            strip_tag_prefix("tags/release-", "tags/", Some("release-")),
            ""
        );
    }
}
