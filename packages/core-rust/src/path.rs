//! Positional addressing of fields within a schema tree.
//!
//! A [`FieldPath`] is an ordered sequence of sibling indices. The first
//! index selects a root field; every following index descends into the
//! previous field's children and selects a sibling there. The empty path
//! addresses the root sequence itself.
//!
//! Paths are positional, not identity-based: they are recomputed from
//! index positions and stay valid only until the next structural mutation.
//!
//! # Wire format
//!
//! Paths render as dot-joined indices (`"2.0.1"`), the same shape the
//! editor's command language uses. The empty path renders as `"."`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An ordered sequence of sibling indices addressing a field.
///
/// # Examples
///
/// ```
/// use fieldcraft_core::path::FieldPath;
///
/// let path: FieldPath = "2.0.1".parse().unwrap();
/// assert_eq!(path.segments(), &[2, 0, 1]);
/// assert_eq!(path.to_string(), "2.0.1");
/// assert!(FieldPath::root().is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<usize>,
}

impl FieldPath {
    /// The empty path, addressing the root sequence.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from explicit sibling indices.
    #[must_use]
    pub fn new(segments: Vec<usize>) -> Self {
        Self { segments }
    }

    /// The sibling indices, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[usize] {
        &self.segments
    }

    /// Whether this is the empty path addressing the root sequence.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of navigation steps.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns a new path descending into child `index` of this path's field.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index);
        Self { segments }
    }

    /// Splits into (parent segments, final sibling index).
    /// `None` for the root path, which has no parent.
    #[must_use]
    pub fn split_last(&self) -> Option<(&[usize], usize)> {
        let (&last, init) = self.segments.split_last()?;
        Some((init, last))
    }
}

impl From<Vec<usize>> for FieldPath {
    fn from(segments: Vec<usize>) -> Self {
        Self::new(segments)
    }
}

impl<const N: usize> From<[usize; N]> for FieldPath {
    fn from(segments: [usize; N]) -> Self {
        Self::new(segments.to_vec())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(".");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`FieldPath`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid path segment {segment:?} in {input:?} (expected dot-joined indices, e.g. \"2.0.1\")")]
pub struct ParsePathError {
    /// The full text being parsed.
    pub input: String,
    /// The segment that failed to parse as an index.
    pub segment: String,
}

impl FromStr for FieldPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." || s.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for part in s.split('.') {
            let index = part.parse::<usize>().map_err(|_| ParsePathError {
                input: s.to_string(),
                segment: part.to_string(),
            })?;
            segments.push(index);
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_empty_and_displays_as_dot() {
        let root = FieldPath::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.to_string(), ".");
        assert_eq!(root.split_last(), None);
    }

    #[test]
    fn child_appends_a_segment() {
        let path = FieldPath::root().child(2).child(0);
        assert_eq!(path.segments(), &[2, 0]);
        assert_eq!(path.to_string(), "2.0");
    }

    #[test]
    fn split_last_separates_parent_from_index() {
        let path = FieldPath::from([2, 0, 1]);
        assert_eq!(path.split_last(), Some((&[2, 0][..], 1)));
    }

    #[test]
    fn parse_accepts_dot_joined_indices() {
        assert_eq!("0".parse::<FieldPath>().unwrap(), FieldPath::from([0]));
        assert_eq!(
            "2.0.1".parse::<FieldPath>().unwrap(),
            FieldPath::from([2, 0, 1])
        );
        assert_eq!(".".parse::<FieldPath>().unwrap(), FieldPath::root());
        assert_eq!("".parse::<FieldPath>().unwrap(), FieldPath::root());
    }

    #[test]
    fn parse_rejects_non_numeric_segments() {
        let err = "2.x.1".parse::<FieldPath>().unwrap_err();
        assert_eq!(err.segment, "x");
        assert!("2..1".parse::<FieldPath>().is_err());
        assert!("-1".parse::<FieldPath>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for segments in [vec![], vec![0], vec![5, 3], vec![2, 0, 1, 7]] {
            let path = FieldPath::new(segments);
            assert_eq!(path.to_string().parse::<FieldPath>().unwrap(), path);
        }
    }
}
