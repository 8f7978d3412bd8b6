//! Error types for the Prism engine
//!
//! This module defines the error type used throughout the engine,
//! including device initialization, resource management and file loading.

use std::fmt;

/// Result type for Prism engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, windowing, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, shader, material, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, device, window, subsystems)
    InitializationFailed(String),

    /// A named resource is missing from its stock
    ResourceNotFound(String),

    /// Shader source failed to compile or link
    ShaderCompilation(String),

    /// File system or decoding error
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::ResourceNotFound(name) => write!(f, "Resource not found: {}", name),
            Error::ShaderCompilation(msg) => write!(f, "Shader compilation failed: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
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
        Error::Io(err.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::InvalidResource` with the same text
///
/// # Example
///
/// ```no_run
/// # use prism_engine::engine_err;
/// let err = engine_err!("prism::Material", "Slot {} out of range", 9);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism::Error::InvalidResource(message)
    }};
}

/// Log an ERROR message and return early with `Error::InvalidResource`
///
/// # Example
///
/// ```no_run
/// # use prism_engine::engine_bail;
/// # fn check(n: usize) -> prism_engine::prism::Result<()> {
/// if n > 8 {
///     engine_bail!("prism::Material", "Too many texture slots: {}", n);
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
