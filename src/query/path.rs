//! Relation paths - dot-chained relation names for existence rewrites

use std::collections::VecDeque;

/// An ordered sequence of relation-name segments.
///
/// Built either from a dot-delimited string (`"post.author"`) or from an
/// already-split list of names; both forms behave identically.
#[derive(Debug, Clone, Default)]
pub struct RelationPath {
    pub(crate) segments: VecDeque<String>,
}

impl RelationPath {
    pub(crate) fn from_segments(segments: VecDeque<String>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for RelationPath {
    fn from(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }
}

impl From<String> for RelationPath {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

impl From<Vec<String>> for RelationPath {
    fn from(segments: Vec<String>) -> Self {
        Self {
            segments: segments.into(),
        }
    }
}

impl From<Vec<&str>> for RelationPath {
    fn from(segments: Vec<&str>) -> Self {
        Self {
            segments: segments.into_iter().map(str::to_string).collect(),
        }
    }
}

impl From<&[&str]> for RelationPath {
    fn from(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Whether a path segment carries a table alias directive:
/// whitespace, `as`, whitespace (ASCII case-insensitive).
///
/// Relation and table names are globally unique within one query tree, so
/// aliasing is rejected rather than worked around.
pub(crate) fn contains_alias_directive(segment: &str) -> bool {
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j + 2 < chars.len()
                && chars[j].eq_ignore_ascii_case(&'a')
                && chars[j + 1].eq_ignore_ascii_case(&'s')
                && chars[j + 2].is_whitespace()
            {
                return true;
            }
            i = j.max(i + 1);
        } else {
            i += 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_dot_chained_string() {
        let path = RelationPath::from("post.author");
        assert_eq!(path.segments, VecDeque::from(vec!["post".to_string(), "author".to_string()]));
    }

    #[test]
    fn test_empty_string_yields_one_empty_segment() {
        let path = RelationPath::from("");
        assert_eq!(path.segments, VecDeque::from(vec![String::new()]));
    }

    #[test]
    fn test_list_form_is_taken_as_is() {
        let path = RelationPath::from(vec!["post", "author"]);
        assert_eq!(path.segments, VecDeque::from(vec!["post".to_string(), "author".to_string()]));
    }

    #[test]
    fn test_alias_directive_detection() {
        assert!(contains_alias_directive("posts as p"));
        assert!(contains_alias_directive("posts AS p"));
        assert!(contains_alias_directive("posts  aS  p"));
        assert!(!contains_alias_directive("posts"));
        assert!(!contains_alias_directive("as p"));
        assert!(!contains_alias_directive("posts asp"));
        assert!(!contains_alias_directive("posts as"));
        assert!(!contains_alias_directive("aspects"));
    }
}
