use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Shared, immutable source code buffer. Cheap to clone; every token holds a
/// range into one of these.
#[derive(Clone)]
pub struct Source(Arc<Vec<u8>>);

impl Source {
    pub fn new(code: Vec<u8>) -> Source {
        Source(Arc::new(code))
    }

    pub fn code(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("<source: {} bytes>", self.0.len()))
    }
}

/// A string backed by a source. Treated as a string: two ranges compare equal
/// if their contents are equal, even across different positions or sources.
#[derive(Clone)]
pub struct SourceRange {
    pub source: Source,
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn as_slice(&self) -> &[u8] {
        &self.source.code()[self.start..self.end]
    }

    pub fn as_str(&self) -> &str {
        // The lexer only produces ranges on token boundaries, which never
        // split a UTF-8 sequence.
        unsafe { std::str::from_utf8_unchecked(self.as_slice()) }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl Debug for SourceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for SourceRange {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SourceRange {}

impl PartialEq<str> for SourceRange {
    fn eq(&self, other: &str) -> bool {
        self.as_slice() == other.as_bytes()
    }
}
