//! VM deployment, teardown and listing

use super::{AzureCli, OutputFormat};
use crate::error::AzError;
use anyhow::{Context as _, Result};
use tracing::info;

/// Default admin username for basic Linux VMs
pub const DEFAULT_ADMIN_USERNAME: &str = "automation-admin";

/// Default admin password for basic Linux VMs
pub const DEFAULT_ADMIN_PASSWORD: &str = "Cisco-123123";

impl AzureCli<'_> {
    /// Create a basic Linux VM (UbuntuLTS image) on an existing subnet
    ///
    /// Returns the raw deployment output, which includes the public and
    /// private IP addresses. The output must contain `VM running`.
    pub fn deploy_linux(
        &self,
        name: &str,
        rg_name: &str,
        vnet_name: &str,
        subnet_name: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        let out = self
            .run(&format!(
                "az vm create -n {name} -g {rg_name} --admin-username {username} \
                 --admin-password {password} --image UbuntuLTS --vnet-name {vnet_name} \
                 --subnet {subnet_name}"
            ))
            .context("Unable to deploy Linux")?;

        if !out.contains("VM running") {
            return Err(
                AzError::verification(format!("Linux Deployment not successful: {out}")).into(),
            );
        }
        Ok(out)
    }

    /// Delete a Linux VM and everything Azure created alongside it
    ///
    /// Deletes the VM itself, then its OS disk, NIC, NSG and public IP
    /// using the default naming convention, and finally verifies no
    /// resource carrying the VM name remains in the group.
    pub fn delete_linux(&self, name: &str, rg_name: &str) -> Result<()> {
        info!("Deleting Linux VM {name}");
        self.run(&format!("az vm delete -n {name} -g {rg_name} --yes"))
            .context("Unable to delete Linux")?;

        info!("Trying to delete remaining resources associated with linux {name}");
        self.delete_disk(rg_name, name, None)
            .with_context(|| format!("Unable to delete all resources associated with Linux {name}"))?;
        info!("Deleted disk");

        self.delete_nic(rg_name, name, None)
            .with_context(|| format!("Unable to delete all resources associated with Linux {name}"))?;
        info!("Deleted network interface");

        self.delete_nsg(rg_name, name, None)
            .with_context(|| format!("Unable to delete all resources associated with Linux {name}"))?;
        info!("Deleted network security group");

        self.delete_public_ip(rg_name, name, None)
            .with_context(|| format!("Unable to delete all resources associated with Linux {name}"))?;
        info!("Deleted public IP");

        let output = self.list_resources(rg_name, OutputFormat::Table)?;
        if output.contains(name) {
            return Err(AzError::verification(format!(
                "Some resources with name {name} remaining: {output}"
            ))
            .into());
        }
        info!("All additional resources successfully deleted");
        Ok(())
    }

    /// List VMs in a resource group
    pub fn list_vms(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az vm list -g {rg_name}"),
            format,
            "Unable to list VMs",
        )
    }

    /// List every resource in a resource group
    pub fn list_resources(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az resource list -g {rg_name}"),
            format,
            &format!("Unable to list Resources associated with resource group {rg_name}"),
        )
    }

    /// Verify a VM no longer shows up in the VM listing
    ///
    /// Shared guard for the sub-resource deletion helpers: disks, NICs,
    /// NSGs and public IPs must never be deleted under a live VM.
    pub(crate) fn ensure_vm_absent(&self, rg_name: &str, vm_name: &str, resource: &str) -> Result<()> {
        let vms = self.list_vms(rg_name, OutputFormat::Table)?;
        if vms.contains(vm_name) {
            return Err(AzError::verification(format!(
                "VM is still present, delete before deleting {resource}"
            ))
            .into());
        }
        Ok(())
    }
}
