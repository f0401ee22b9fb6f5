//! Azure CLI facade
//!
//! `AzureCli` wraps the external `az` binary: one method per
//! resource-management operation, each of which formats a command line,
//! runs it synchronously through the [`System`] seam, and either checks
//! the output or propagates the failure. There is no state here beyond
//! the credentials and a logged-in flag.

use crate::error::AzError;
use crate::system::System;
use anyhow::{Context as _, Result};
use tracing::{error, info};

pub mod deploy;
pub mod disk;
pub mod group;
pub mod netif;
pub mod route;
pub mod storage;
pub mod vm;
pub mod vnet;

/// Login material for the Azure CLI
///
/// Either an application service principal (application id, directory id
/// and auth key) or a plain username/password pair. All fields of the
/// chosen method must be present.
#[derive(Debug, Clone)]
pub enum Credentials {
    ServicePrincipal {
        app_id: String,
        dir_id: String,
        key: String,
    },
    UserPassword {
        username: String,
        password: String,
    },
}

impl Credentials {
    /// Build credentials from loose optional parts
    ///
    /// Prefers the service-principal triple when complete, falls back to
    /// username/password, and fails when neither set is complete.
    pub fn from_parts(
        app_id: Option<String>,
        dir_id: Option<String>,
        key: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self> {
        if let (Some(app_id), Some(dir_id), Some(key)) = (app_id, dir_id, key) {
            return Ok(Self::ServicePrincipal {
                app_id,
                dir_id,
                key,
            });
        }
        if let (Some(username), Some(password)) = (username, password) {
            return Ok(Self::UserPassword { username, password });
        }
        Err(AzError::credentials(
            "Either use Application-ID, Directory-ID and Auth-Key or Username and Password \
             to login, make sure to provide all parameters of your chosen method",
        )
        .into())
    }
}

/// Output shape for list/show operations
///
/// `Table` appends `-o table` to the command; `Json` leaves the CLI on its
/// default JSON output. Raw decoded text is returned either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Command-line suffix selecting this format
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Table => " -o table",
            Self::Json => "",
        }
    }
}

/// Stateless facade over the `az` binary
pub struct AzureCli<'a> {
    system: &'a dyn System,
    credentials: Credentials,
    logged_in: bool,
}

impl<'a> AzureCli<'a> {
    /// Create a facade over the given system with the given credentials
    #[must_use]
    pub const fn new(system: &'a dyn System, credentials: Credentials) -> Self {
        Self {
            system,
            credentials,
            logged_in: false,
        }
    }

    /// Whether a login has succeeded on this instance
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Log in to the Azure CLI
    ///
    /// Checks that `az` is installed first; if it is missing, attempts a
    /// one-shot `pip install azure-cli` (only works with sufficient
    /// permissions) before logging in with whichever credential method
    /// this instance was built with.
    pub fn login(&mut self) -> Result<()> {
        if !self.system.command_exists("az") {
            info!("Azure CLI not installed on this machine");
            info!("Attempting to install Azure CLI, can take a few minutes");
            self.run("pip install azure-cli")
                .context("Unable to install Azure CLI")?;
            info!("Azure CLI installed");
        }

        let command = match self.credentials {
            Credentials::ServicePrincipal {
                ref app_id,
                ref dir_id,
                ref key,
            } => format!("az login -u {app_id} --service-principal --tenant {dir_id} -p {key}"),
            Credentials::UserPassword {
                ref username,
                ref password,
            } => format!("az login -u {username} -p {password}"),
        };

        self.run(&command).context("Unable to log on to Azure")?;

        info!("Logged into Azure");
        self.logged_in = true;
        Ok(())
    }

    /// Log out of the Azure CLI
    ///
    /// Failure to log out is logged but never propagated.
    pub fn logout(&mut self) {
        if let Err(err) = self.run("az logout") {
            error!("Unable to logout: {err}");
        }
        self.logged_in = false;
    }

    /// Run a command line, propagating spawn failures and non-zero exits
    ///
    /// Returns the decoded stdout on success.
    pub(crate) fn run(&self, command: &str) -> Result<String> {
        let output = self
            .system
            .run_shell(command)
            .with_context(|| format!("Failed to execute command: {command}"))?;

        if !output.success() {
            let mut message = format!(
                "Command failed with exit code {}: {command}",
                output.exit_code
            );
            if !output.stderr.trim().is_empty() {
                message.push_str(&format!("\nError output:\n{}", output.stderr.trim()));
            }
            error!("{message}");
            return Err(AzError::command(message).into());
        }

        Ok(output.stdout)
    }

    /// Run a list/show command in the requested format and require
    /// non-blank output
    pub(crate) fn run_listing(
        &self,
        command: &str,
        format: OutputFormat,
        empty_message: &str,
    ) -> Result<String> {
        let full = format!("{command}{}", format.suffix());
        let out = self.run(&full)?;
        if out.trim().is_empty() {
            return Err(AzError::verification(empty_message).into());
        }
        Ok(out)
    }
}
