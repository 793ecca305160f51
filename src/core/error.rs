use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::core::display;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Usage,
    MalformedToken,
    MalformedEscape,
    UnterminatedString,
    ExpectedSpace,
    TrailingData,
    UnknownRelation,
    Schema,
    Decode,
    InvalidUtf8,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    line: Option<String>,
    offset: Option<usize>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            line: None,
            offset: None,
            path: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the offending line, rendered readably even when the raw
    /// bytes are not valid UTF-8.
    pub fn with_line(mut self, line: &[u8]) -> Self {
        self.line = Some(display::render_lossy(line));
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (byte {offset})")?;
        }
        if let Some(line) = &self.line {
            write!(f, " (line: \"{line}\")")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage => 2,
        ErrorKind::MalformedToken => 3,
        ErrorKind::MalformedEscape => 4,
        ErrorKind::UnterminatedString => 5,
        ErrorKind::ExpectedSpace => 6,
        ErrorKind::TrailingData => 7,
        ErrorKind::UnknownRelation => 8,
        ErrorKind::Schema => 9,
        ErrorKind::Decode => 10,
        ErrorKind::InvalidUtf8 => 11,
        ErrorKind::Io => 12,
    }
}
