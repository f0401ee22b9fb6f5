//! System abstraction for shell execution and filesystem operations
//!
//! Every Azure CLI invocation and every file the renderer touches goes
//! through this trait, allowing tests to run against an in-memory mock
//! with scripted command responses.

use std::env::VarError;
use std::io;
use std::path::Path;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Captured result of a shell command
#[derive(Debug, Clone)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ShellOutput {
    /// Whether the command exited with status zero
    #[must_use]
    #[inline]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Unified trait for system operations (shell + environment + filesystem)
///
/// # Implementations
/// - `RealSystem`: production implementation using `std::process`, `std::env`
///   and `std::fs`
/// - `MockSystem`: test implementation with scripted command responses and an
///   in-memory filesystem
pub trait System: Send + Sync {
    // ==================== Shell Operations ====================

    /// Run a command line through the platform shell, blocking until it
    /// exits, and capture its output
    fn run_shell(&self, command: &str) -> io::Result<ShellOutput>;

    /// Check whether a binary is reachable on the PATH
    fn command_exists(&self, name: &str) -> bool;

    // ==================== Environment Operations ====================

    /// Get an environment variable
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating it if it doesn't exist
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;
}
