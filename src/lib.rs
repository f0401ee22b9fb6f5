//! `azprov` - provisioning and tearing down Azure testbed resources via
//! the Azure CLI
//!
//! This library wraps the external `az` binary with one method per
//! resource-management operation (resource groups, VNets, subnets, VMs,
//! disks, NICs, NSGs, public IPs, route tables and storage), plus a
//! renderer that fills deployment parameter templates from a YAML
//! testbed. Everything is synchronous: each call formats a command
//! line, blocks on the external process, and scrapes the output where
//! the CLI gives no structured answer.

pub mod azure;
pub mod cli;
pub mod error;
pub mod params;
pub mod system;

use anyhow::Result;
use cli::Args;
use system::RealSystem;

/// Main entry point for the azprov library
pub fn run(args: Args) -> Result<()> {
    let system = RealSystem::new();
    cli::commands::execute(args, &system)
}
