//! # azprov
//!
//! `azprov` drives the Azure CLI (`az`) to provision and tear down the
//! cloud resources a testbed deployment needs, and renders deployment
//! parameter files from YAML testbed descriptions.
//!
//! ## Usage
//!
//! **Provision a group and a VM:**
//! ```sh
//! azprov group create my-rg
//! azprov vm deploy-linux vm1 --resource-group my-rg --vnet-name net1 --subnet-name sub1
//! ```
//!
//! **Render a parameter file:**
//! ```sh
//! azprov render-params --template azure.json --testbed testbed.yaml --output params.json
//! ```
//!
//! Credentials come from flags or the `AZ_APP_ID`/`AZ_DIR_ID`/`AZ_KEY`
//! (service principal) or `AZ_USERNAME`/`AZ_PASSWORD` environment
//! variables. See `azprov --help` for the full command set.

use anyhow::Result;
use azprov::cli::Args;
use azprov::error::AzError;
use clap::Parser as _;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match azprov::run(args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(
                err.downcast_ref::<AzError>()
                    .map_or(1, AzError::exit_code),
            );
        }
    }
}
