//! Error types for the Tessera engine
//!
//! This module defines the error type used throughout the engine: geometry
//! import, glyph atlas construction, and GPU resource management.

use std::fmt;

/// Result type for Tessera engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a line of the mesh text format was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A token that should be a number is not one
    InvalidNumber(String),

    /// The line does not carry enough tokens for its prefix
    MissingToken { expected: usize, found: usize },

    /// A face corner reference (`p/t/n`) is malformed
    InvalidFace(String),

    /// A face corner references an attribute that was never declared
    IndexOutOfRange { attribute: &'static str, index: usize, len: usize },

    /// Strict reconciliation only: a position slot is reached with two different
    /// UV or normal values
    ConflictingAttributes { position: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::InvalidNumber(token) => write!(f, "invalid number '{}'", token),
            ParseErrorKind::MissingToken { expected, found } => {
                write!(f, "expected {} tokens, found {}", expected, found)
            }
            ParseErrorKind::InvalidFace(token) => write!(f, "invalid face corner '{}'", token),
            ParseErrorKind::IndexOutOfRange { attribute, index, len } => write!(
                f, "{} index {} out of range ({} declared)", attribute, index + 1, len
            ),
            ParseErrorKind::ConflictingAttributes { position } => write!(
                f, "position {} is shared by corners with different attributes", position + 1
            ),
        }
    }
}

/// Tessera engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, wgpu, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, mesh data, etc.)
    InvalidResource(String),

    /// A caller-supplied argument is outside its valid range
    InvalidArgument(String),

    /// Malformed line in the mesh text format (1-based line number)
    Parse { line: usize, kind: ParseErrorKind },

    /// Character outside the glyph atlas character set
    GlyphNotFound(char),

    /// File could not be read
    Io(String),

    /// Image could not be decoded
    Image(String),

    /// Structured scene could not be read or is malformed
    SceneFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Parse { line, kind } => write!(f, "Parse error at line {}: {}", line, kind),
            Error::GlyphNotFound(c) => write!(f, "Glyph not found: {:?} (U+{:04X})", c, *c as u32),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Image(msg) => write!(f, "Image error: {}", msg),
            Error::SceneFormat(msg) => write!(f, "Scene format error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<gltf::Error> for Error {
    fn from(err: gltf::Error) -> Self {
        Error::SceneFormat(err.to_string())
    }
}

// ===== ERROR MACROS =====

/// Build an error and log it with file:line information
///
/// With a format string, produces `Error::BackendError`. With an `Error`
/// expression, logs and returns that error unchanged.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("tessera::Mesh", "Buffer size {} is zero", size);
/// let err = engine_err!("tessera::import", Error::InvalidArgument("capacity".into()));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        let message = format!($fmt $(, $arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::error::Error::BackendError(message)
    }};
    ($source:expr, $err:expr) => {{
        let err: $crate::error::Error = $err;
        $crate::engine_error!($source, "{}", err);
        err
    }};
}

/// Log an error and return it from the enclosing function
///
/// Accepts the same forms as `engine_err!`.
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
