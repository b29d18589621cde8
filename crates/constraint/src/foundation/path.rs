//! Structural paths from the root of a validated value.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// PATH SEGMENT
// ============================================================================

/// One step into a value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array position.
    Index(usize),
    /// Object field name.
    Key(String),
}

impl PathSegment {
    /// Returns the key if this segment names an object field.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the index if this segment addresses an array element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// ============================================================================
// PATH
// ============================================================================

/// Ordered sequence of segments locating a value inside the validated root.
///
/// Most constraint trees are shallow, so the first four segments live
/// inline without a heap allocation.
///
/// # Examples
///
/// ```
/// use nebula_constraint::foundation::Path;
///
/// let path = Path::root().child("items").child(0).child("name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "items[0].name");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(SmallVec<[PathSegment; 4]>);

impl Path {
    /// The empty path, addressing the root value.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut next = self.clone();
        next.0.push(segment.into());
        next
    }

    /// Number of segments (structural depth).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments in root-to-leaf order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Iterates over the segments in root-to-leaf order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.0.iter()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }

        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i > 0 => write!(f, ".{key}")?,
                other => write!(f, "{other}")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn child_does_not_touch_parent() {
        let parent = Path::root().child("form");
        let child = parent.child("nickname");

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(child.last(), Some(&PathSegment::from("nickname")));
    }

    #[test]
    fn display_mixes_keys_and_indices() {
        let path: Path = [
            PathSegment::from(0),
            PathSegment::from("items"),
            PathSegment::from(2),
        ]
        .into_iter()
        .collect();

        assert_eq!(path.to_string(), "[0].items[2]");
        assert_eq!(Path::root().to_string(), "$");
    }

    #[test]
    fn serializes_as_plain_array() {
        let path = Path::root().child("form").child(1);
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["form", 1]));

        let back: Path = serde_json::from_value(json!(["form", 1])).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn segment_accessors() {
        assert_eq!(PathSegment::from("a").as_key(), Some("a"));
        assert_eq!(PathSegment::from(3).as_index(), Some(3));
        assert_eq!(PathSegment::from(3).as_key(), None);
    }
}
