//! Facilities for working with paths within validated instances.
use crate::pointer::{escape, Pointer};
use std::fmt::{self, Write};

/// A single step of an instance path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PathChunk<'a> {
    Name(&'a str),
    Index(usize),
}

/// Path to the currently validated value, as a chain of borrowed parents.
///
/// Nothing is allocated while descending; the path is rendered only when an error is recorded.
#[derive(Debug)]
pub(crate) struct InstancePath<'a> {
    chunk: Option<PathChunk<'a>>,
    parent: Option<&'a InstancePath<'a>>,
    positioned: bool,
}

impl<'a> InstancePath<'a> {
    /// The document root, rendered as `/`.
    pub(crate) fn new() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
            positioned: true,
        }
    }

    /// A root that has no position in the document, rendered as an empty string.
    /// Used for values that are not members of the instance, like property names.
    pub(crate) fn unpositioned() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
            positioned: false,
        }
    }

    pub(crate) fn push(&'a self, chunk: impl Into<PathChunk<'a>>) -> Self {
        InstancePath {
            chunk: Some(chunk.into()),
            parent: Some(self),
            positioned: true,
        }
    }

    pub(crate) fn to_vec(&'a self) -> Vec<PathChunk<'a>> {
        // The path capacity should be the average depth so we avoid extra allocations
        let mut result = Vec::with_capacity(6);
        let mut current = self;
        if let Some(chunk) = current.chunk {
            result.push(chunk)
        }
        while let Some(next) = current.parent {
            current = next;
            if let Some(chunk) = current.chunk {
                result.push(chunk)
            }
        }
        result.reverse();
        result
    }

    /// The location as a JSON Pointer, e.g. to write into the instance.
    pub(crate) fn to_pointer(&'a self) -> Pointer {
        self.to_vec()
            .into_iter()
            .map(|chunk| match chunk {
                PathChunk::Name(name) => name.to_string(),
                PathChunk::Index(idx) => itoa::Buffer::new().format(idx).to_string(),
            })
            .collect()
    }
}

impl fmt::Display for InstancePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chunks = self.to_vec();
        if chunks.is_empty() {
            if self.positioned {
                f.write_char('/')?;
            }
            return Ok(());
        }
        let mut buffer = itoa::Buffer::new();
        for chunk in chunks {
            f.write_char('/')?;
            match chunk {
                PathChunk::Name(name) => f.write_str(&escape(name))?,
                PathChunk::Index(idx) => f.write_str(buffer.format(idx))?,
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a str> for PathChunk<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        PathChunk::Name(value)
    }
}
impl<'a> From<&'a String> for PathChunk<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        PathChunk::Name(value.as_str())
    }
}
impl From<usize> for PathChunk<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

#[cfg(test)]
mod tests {
    use super::InstancePath;

    #[test]
    fn root_is_slash() {
        assert_eq!(InstancePath::new().to_string(), "/");
        assert_eq!(InstancePath::unpositioned().to_string(), "");
    }

    #[test]
    fn nested() {
        let root = InstancePath::new();
        let name = "a/b";
        let member = root.push(name);
        let item = member.push(3);
        assert_eq!(item.to_string(), "/a~1b/3");
        assert_eq!(item.to_pointer().tokens(), &["a/b", "3"]);
        assert!(root.to_pointer().is_empty());
    }
}
