//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for azprov operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AzError {
    /// Credentials Error - missing or incomplete login material
    #[error("Credentials error: {message}")]
    Credentials { message: String },

    /// Command Error - an Azure CLI invocation failed
    #[error("Command error: {message}")]
    Command { message: String },

    /// Verification Error - CLI output did not contain what an operation requires
    #[error("Verification error: {message}")]
    Verification { message: String },

    /// Parse Error - scraping an identifier out of CLI output failed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Template Error - parameter-file rendering failed
    #[error("Template error: {message}")]
    Template { message: String },

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl AzError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Credentials { .. } => 1,
            Self::Command { .. } => 2,
            Self::Verification { .. } => 3,
            Self::Parse { .. } => 4,
            Self::Template { .. } => 5,
            Self::Filesystem { .. } => 6,
        }
    }

    /// Create a credentials error
    #[inline]
    pub fn credentials<S: Into<String>>(message: S) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Create a command error
    #[inline]
    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Create a verification error
    #[inline]
    pub fn verification<S: Into<String>>(message: S) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }

    /// Create a parse error
    #[inline]
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a template error
    #[inline]
    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}
