//! Structural scene paths.
//!
//! A [`ScenePath`] addresses a prim in the scene hierarchy: an ordered
//! sequence of name elements, either rooted at the absolute root (`/`) or
//! relative. All prefix algebra works on the element sequence directly;
//! nothing on the query or notification paths parses strings.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::util::{Error, Result};

/// A name element in a scene path.
pub type PathElement = String;

/// An absolute or relative path into the scene hierarchy.
///
/// Paths are small value types; cloning copies the element sequence.
/// Ordering and hashing follow the element sequence, so paths can key
/// ordered maps with parents sorting before their children.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenePath {
    absolute: bool,
    elements: SmallVec<[PathElement; 6]>,
}

impl ScenePath {
    /// The absolute root path, `/`.
    pub fn absolute_root() -> Self {
        Self { absolute: true, elements: SmallVec::new() }
    }

    /// The empty path. Not a valid prim address; used as the "no value"
    /// result of typed path accessors over missing sources.
    pub fn empty() -> Self {
        Self { absolute: false, elements: SmallVec::new() }
    }

    /// Build an absolute path from name elements.
    pub fn absolute<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathElement>,
    {
        Self {
            absolute: true,
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a relative path from name elements.
    pub fn relative<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathElement>,
    {
        Self {
            absolute: false,
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this path is absolute (rooted at `/`).
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Check if this is the empty path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.elements.is_empty()
    }

    /// Check if this is the absolute root path `/`.
    #[inline]
    pub fn is_absolute_root(&self) -> bool {
        self.absolute && self.elements.is_empty()
    }

    /// Number of name elements (0 for the root and the empty path).
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Name element at the given depth, if any.
    pub fn element(&self, depth: usize) -> Option<&str> {
        self.elements.get(depth).map(String::as_str)
    }

    /// The last name element, or `""` for the root and the empty path.
    pub fn name(&self) -> &str {
        self.elements.last().map(String::as_str).unwrap_or("")
    }

    /// The parent path, or `None` for the root and the empty path.
    pub fn parent(&self) -> Option<ScenePath> {
        if self.elements.is_empty() {
            return None;
        }
        let mut elements = self.elements.clone();
        elements.pop();
        Some(Self { absolute: self.absolute, elements })
    }

    /// Check whether `prefix` is a (non-strict) prefix of this path.
    ///
    /// Both paths must share rootedness; the absolute root is a prefix of
    /// every absolute path, including itself.
    pub fn has_prefix(&self, prefix: &ScenePath) -> bool {
        self.absolute == prefix.absolute && self.elements.starts_with(&prefix.elements)
    }

    /// Replace a leading `old` prefix with `new`.
    ///
    /// Returns the path unchanged when `old` is not a prefix of it, so
    /// relative values flow through prefix rewrites untouched.
    pub fn replace_prefix(&self, old: &ScenePath, new: &ScenePath) -> ScenePath {
        if !self.has_prefix(old) {
            return self.clone();
        }
        let mut elements = new.elements.clone();
        elements.extend(self.elements[old.element_count()..].iter().cloned());
        Self { absolute: new.absolute, elements }
    }

    /// The path formed by the first `count` elements, same rootedness.
    ///
    /// `count` past the end yields the whole path.
    pub fn truncated(&self, count: usize) -> ScenePath {
        Self {
            absolute: self.absolute,
            elements: self.elements[..count.min(self.elements.len())].iter().cloned().collect(),
        }
    }

    /// Append a relative tail to this path.
    pub fn append_path(&self, tail: &ScenePath) -> Result<ScenePath> {
        if tail.absolute {
            return Err(Error::ExpectedRelativePath(tail.to_string()));
        }
        let mut elements = self.elements.clone();
        elements.extend(tail.elements.iter().cloned());
        Ok(Self { absolute: self.absolute, elements })
    }

    /// Append a single name element.
    pub fn append_element(&self, name: impl Into<PathElement>) -> ScenePath {
        let mut elements = self.elements.clone();
        elements.push(name.into());
        Self { absolute: self.absolute, elements }
    }

    /// The same element sequence as a relative path.
    pub fn as_relative(&self) -> ScenePath {
        Self { absolute: false, elements: self.elements.clone() }
    }

    /// Parse a path from its text form: `/a/b` absolute, `a/b` relative,
    /// `/` for the root, `""` for the empty path.
    pub fn parse(text: &str) -> Result<ScenePath> {
        if text.is_empty() {
            return Ok(Self::empty());
        }
        let (absolute, body) = match text.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let mut elements = SmallVec::new();
        if !body.is_empty() {
            for part in body.split('/') {
                if part.is_empty() {
                    return Err(Error::invalid_path(format!("empty element in \"{text}\"")));
                }
                elements.push(part.to_string());
            }
        }
        Ok(Self { absolute, elements })
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            if self.elements.is_empty() {
                return f.write_str("/");
            }
            for element in &self.elements {
                write!(f, "/{element}")?;
            }
            Ok(())
        } else {
            f.write_str(&self.elements.join("/"))
        }
    }
}

impl FromStr for ScenePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> ScenePath {
        ScenePath::parse(text).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(p("/").to_string(), "/");
        assert_eq!(p("/A/B").to_string(), "/A/B");
        assert_eq!(p("a/b").to_string(), "a/b");
        assert_eq!(p("").to_string(), "");
        assert!(ScenePath::parse("/A//B").is_err());

        assert!(p("/").is_absolute_root());
        assert!(p("").is_empty());
        assert!(p("/A/B").is_absolute());
        assert!(!p("a/b").is_absolute());
    }

    #[test]
    fn test_elements() {
        let path = p("/A/B/C");
        assert_eq!(path.element_count(), 3);
        assert_eq!(path.element(1), Some("B"));
        assert_eq!(path.element(3), None);
        assert_eq!(path.name(), "C");
        assert_eq!(path.parent(), Some(p("/A/B")));
        assert_eq!(p("/").parent(), None);
    }

    #[test]
    fn test_has_prefix() {
        assert!(p("/A/B/C").has_prefix(&p("/A/B")));
        assert!(p("/A/B").has_prefix(&p("/A/B")));
        assert!(p("/A/B").has_prefix(&p("/")));
        assert!(!p("/A/B").has_prefix(&p("/A/C")));
        assert!(!p("/A").has_prefix(&p("/A/B")));
        // Rootedness must match.
        assert!(!p("a/b").has_prefix(&p("/")));
        assert!(!p("").has_prefix(&p("/")));
    }

    #[test]
    fn test_replace_prefix() {
        let root = ScenePath::absolute_root();
        let prefix = p("/Mount/Here");

        assert_eq!(p("/x/y").replace_prefix(&root, &prefix), p("/Mount/Here/x/y"));
        assert_eq!(p("/Mount/Here/x").replace_prefix(&prefix, &root), p("/x"));
        // Non-matching prefix leaves the path unchanged.
        assert_eq!(p("rel/path").replace_prefix(&root, &prefix), p("rel/path"));
        assert_eq!(p("/Other").replace_prefix(&prefix, &root), p("/Other"));
        // Root prefix onto root prefix is the identity.
        assert_eq!(p("/x").replace_prefix(&root, &root), p("/x"));
    }

    #[test]
    fn test_truncated() {
        let path = p("/A/B/C/D");
        assert_eq!(path.truncated(0), p("/"));
        assert_eq!(path.truncated(3), p("/A/B/C"));
        assert_eq!(path.truncated(9), path);
    }

    #[test]
    fn test_append() {
        assert_eq!(p("/A").append_path(&p("b/c")).unwrap(), p("/A/b/c"));
        assert!(p("/A").append_path(&p("/b")).is_err());
        assert_eq!(p("/A").append_element("b"), p("/A/b"));
        assert_eq!(p("/A/B").as_relative(), p("A/B"));
    }

    #[test]
    fn test_ordering_groups_children() {
        let mut paths = vec![p("/B"), p("/A/x"), p("/A"), p("/A/x/y")];
        paths.sort();
        assert_eq!(paths, vec![p("/A"), p("/A/x"), p("/A/x/y"), p("/B")]);
    }
}
