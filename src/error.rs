//! Error types for decoding, building and transferring mouse mappings

use std::fmt;
use thiserror::Error;

/// One step of the path from the top of a mapping down to a nested field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

/// Location of a field inside a nested value, outermost segment first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Structural failure while reading bytes into a field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The byte source ran out before the field was complete
    #[error("{path}: insufficient bytes for {field} (needed {needed} more at offset {offset})")]
    InsufficientBytes {
        path: FieldPath,
        field: &'static str,
        offset: usize,
        needed: usize,
    },

    /// Bytes were left over after the whole record was read
    #[error("{count} trailing bytes after a {expected}-byte record")]
    TrailingBytes { expected: usize, count: usize },

    /// Wrong number of per-mode buffers
    #[error("expected {expected} mode buffers, got {actual}")]
    ModeCount { expected: usize, actual: usize },

    /// A mode buffer did not even hold its report id
    #[error("mode buffer {index} is empty")]
    EmptyModeBuffer { index: usize },
}

impl DecodeError {
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        if let DecodeError::InsufficientBytes { path, .. } = &mut self {
            path.prepend(segment);
        }
        self
    }
}

/// What went wrong converting a value into bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildErrorKind {
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("byte must be in range(0, 256), got {0}")]
    ByteOutOfRange(i64),

    #[error("{table}: unable to convert representation of {name:?}")]
    UnknownName { table: &'static str, name: String },

    #[error("{0:?} does not name a byte in range(0, 256)")]
    UndefinedOutOfRange(String),

    #[error("unknown keyboard modifier {0:?}")]
    UnknownModifier(String),

    #[error("poll rate must be positive, got {0}")]
    NonPositivePollRate(i64),

    #[error("dpi must not be negative, got {0}")]
    NegativeDpi(i64),

    #[error("array length mismatch: expected {expected} elements, saw {actual} elements")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("missing fields: {missing:?}, extra fields: {extra:?}")]
    FieldMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },
}

/// Value conversion failure, with the path to the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {kind}")]
pub struct BuildError {
    pub path: FieldPath,
    pub kind: BuildErrorKind,
}

impl BuildError {
    pub fn new(kind: BuildErrorKind) -> Self {
        Self {
            path: FieldPath::default(),
            kind,
        }
    }

    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }
}

impl From<BuildErrorKind> for BuildError {
    fn from(kind: BuildErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Problems with the textual document itself
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to parse config document: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("config document must be an object")]
    NotAnObject,

    #[error("missing configFormat!")]
    MissingFormat,

    #[error("configFormat must be a string")]
    FormatNotText,

    #[error("Undefined configFormat >>{0}<<")]
    UnknownFormat(String),
}

/// Failure loading a mapping from its textual form
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unable to build mapping: {0}")]
    Build(#[from] BuildError),
}

/// Errors from the USB side of a read or write session
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("No G600 control interface found")]
    NotFound,

    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),

    #[error("control interface is not claimed")]
    NotClaimed,

    #[error("report {report_id:#04x}: read {actual} bytes, expected {expected}")]
    ShortRead {
        report_id: u8,
        expected: usize,
        actual: usize,
    },

    #[error("report {report_id:#04x}: wrote {actual} bytes, expected {expected}")]
    ShortWrite {
        report_id: u8,
        expected: usize,
        actual: usize,
    },
}
