//! Real system implementation using `std::process`, `std::env` and `std::fs`

use super::{ShellOutput, System};
use std::env::VarError;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Production implementation of System trait
///
/// Shell commands run synchronously through `sh -c` (or `cmd /C` on
/// Windows) with captured stdio, matching how the Azure CLI expects to
/// be driven from scripts.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the appropriate shell command for the current platform
fn get_shell_command() -> (String, Vec<String>) {
    if cfg!(target_os = "windows") {
        ("cmd".to_owned(), vec!["/C".to_owned()])
    } else {
        ("sh".to_owned(), vec!["-c".to_owned()])
    }
}

impl System for RealSystem {
    fn run_shell(&self, command: &str) -> io::Result<ShellOutput> {
        let (shell, shell_args) = get_shell_command();
        let mut cmd_args = shell_args;
        cmd_args.push(command.to_owned());

        let output = Command::new(&shell)
            .args(&cmd_args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ShellOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    fn command_exists(&self, name: &str) -> bool {
        let probe = if cfg!(target_os = "windows") {
            format!("where {name}")
        } else {
            format!("which {name}")
        };
        self.run_shell(&probe)
            .map(|out| out.success())
            .unwrap_or(false)
    }

    fn env_var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
