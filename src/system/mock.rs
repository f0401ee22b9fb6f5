//! Mock system implementation for testing

use super::{ShellOutput, System};
use std::collections::HashMap;
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// In-memory implementation of System trait for testing
///
/// `MockSystem` provides scripted shell responses, an in-memory filesystem
/// and environment, and a log of every command line issued, so tests can
/// assert on the exact `az` invocations without touching the network.
///
/// Responses are registered against command prefixes; the longest matching
/// prefix wins. Unmatched commands succeed with empty output.
///
/// # Example
/// ```
/// use azprov::system::{MockSystem, System as _};
///
/// let system = MockSystem::new()
///     .with_response("az group list", "Name    Location\nrg1     eastus\n");
///
/// let out = system.run_shell("az group list -o table").unwrap();
/// assert!(out.stdout.contains("rg1"));
/// assert_eq!(system.commands(), vec!["az group list -o table"]);
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
    command_log: Arc<Mutex<Vec<String>>>,
}

struct MockSystemState {
    env_vars: HashMap<String, String>,
    files: HashMap<PathBuf, Vec<u8>>,
    responses: Vec<(String, ShellOutput)>,
    known_commands: Vec<String>,
}

impl MockSystem {
    /// Create a new `MockSystem` with default state
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MockSystemState {
                env_vars: HashMap::new(),
                files: HashMap::new(),
                responses: Vec::new(),
                known_commands: vec!["az".to_owned(), "sh".to_owned()],
            })),
            command_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set an environment variable (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_env(self, key: &str, value: &str) -> Self {
        {
            let mut state = self.state.write().expect("mock state poisoned");
            state.env_vars.insert(key.to_owned(), value.to_owned());
        }
        self
    }

    /// Add a file with contents (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> Self {
        {
            let mut state = self.state.write().expect("mock state poisoned");
            state
                .files
                .insert(path.as_ref().to_path_buf(), contents.to_vec());
        }
        self
    }

    /// Script a successful response for any command starting with `prefix`
    /// (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_response(self, prefix: &str, stdout: &str) -> Self {
        self.with_shell_output(
            prefix,
            ShellOutput {
                stdout: stdout.to_owned(),
                stderr: String::new(),
                exit_code: 0,
            },
        )
    }

    /// Script a failing response for any command starting with `prefix`
    /// (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_failure(self, prefix: &str, stderr: &str, exit_code: i32) -> Self {
        self.with_shell_output(
            prefix,
            ShellOutput {
                stdout: String::new(),
                stderr: stderr.to_owned(),
                exit_code,
            },
        )
    }

    /// Script a full `ShellOutput` for any command starting with `prefix`
    /// (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_shell_output(self, prefix: &str, output: ShellOutput) -> Self {
        {
            let mut state = self.state.write().expect("mock state poisoned");
            state.responses.push((prefix.to_owned(), output));
        }
        self
    }

    /// Declare which binaries `command_exists` reports as installed
    /// (builder pattern). Defaults to `az` and `sh`.
    #[must_use]
    #[inline]
    pub fn with_known_commands(self, names: &[&str]) -> Self {
        {
            let mut state = self.state.write().expect("mock state poisoned");
            state.known_commands = names.iter().map(|n| (*n).to_owned()).collect();
        }
        self
    }

    /// Every command line issued through `run_shell`, in order
    #[must_use]
    #[inline]
    pub fn commands(&self) -> Vec<String> {
        self.command_log.lock().expect("command log poisoned").clone()
    }

    /// Contents of an in-memory file written by the code under test
    #[must_use]
    #[inline]
    pub fn file_contents<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        let state = self.state.read().expect("mock state poisoned");
        state
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Default for MockSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    fn run_shell(&self, command: &str) -> io::Result<ShellOutput> {
        self.command_log
            .lock()
            .expect("command log poisoned")
            .push(command.to_owned());

        let state = self.state.read().expect("mock state poisoned");

        // Longest matching prefix wins so tests can layer a specific
        // response over a broad one.
        let best = state
            .responses
            .iter()
            .filter(|(prefix, _)| command.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());

        Ok(best.map_or_else(
            || ShellOutput {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: 0,
            },
            |(_, output)| output.clone(),
        ))
    }

    fn command_exists(&self, name: &str) -> bool {
        let state = self.state.read().expect("mock state poisoned");
        state.known_commands.iter().any(|known| known == name)
    }

    fn env_var(&self, key: &str) -> Result<String, VarError> {
        let state = self.state.read().expect("mock state poisoned");
        state.env_vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self.state.read().expect("mock state poisoned");
        let bytes = state.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            )
        })?;
        String::from_utf8(bytes.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state.write().expect("mock state poisoned");
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.read().expect("mock state poisoned");
        state.files.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.exists(path)
    }
}
