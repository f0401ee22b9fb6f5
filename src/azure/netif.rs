//! NIC, NSG and public IP operations
//!
//! The deletion helpers cover the sub-resources Azure creates implicitly
//! alongside a VM. When no explicit name is given they fall back to the
//! generated naming convention: `<vm>VMNic`, `<vm>NSG`, `<vm>PublicIP`.

use super::{AzureCli, OutputFormat};
use crate::error::AzError;
use anyhow::{Context as _, Result};
use regex::Regex;

impl AzureCli<'_> {
    /// Delete a public IP left behind by a deleted VM
    ///
    /// The VM must already be gone from the VM listing.
    pub fn delete_public_ip(
        &self,
        rg_name: &str,
        vm_name: &str,
        pip_name: Option<&str>,
    ) -> Result<()> {
        self.ensure_vm_absent(rg_name, vm_name, "Public IP")?;

        let pip_name = match pip_name {
            Some(name) => name.to_owned(),
            None => format!("{vm_name}PublicIP"),
        };

        self.run(&format!(
            "az network public-ip delete -n {pip_name} -g {rg_name}"
        ))
        .with_context(|| format!("Unable to delete Public IP {pip_name}"))?;
        Ok(())
    }

    /// List public IPs in a resource group
    pub fn list_public_ips(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az network public-ip list -g {rg_name}"),
            format,
            "Unable to list public IPs",
        )
    }

    /// Extract the address of a named public IP from the table listing
    pub fn public_ip_of(&self, pip_name: &str, rg_name: &str) -> Result<String> {
        let out = self.list_public_ips(rg_name, OutputFormat::Table)?;

        let pattern = format!(
            r"(\d{{1,3}}\.\d{{1,3}}\.\d{{1,3}}\.\d{{1,3}}) .* {}",
            regex::escape(pip_name)
        );
        let re = Regex::new(&pattern).context("Invalid public IP pattern")?;

        let captures = re.captures(&out).ok_or_else(|| {
            AzError::parse(format!("Unable to find public ip in output {out}"))
        })?;
        Ok(captures[1].trim().to_owned())
    }

    /// List network security groups in a resource group
    pub fn list_nsgs(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az network nsg list -g {rg_name}"),
            format,
            &format!("Unable to list network security groups associated with resource group {rg_name}"),
        )
    }

    /// Delete a network security group left behind by a deleted VM
    pub fn delete_nsg(&self, rg_name: &str, vm_name: &str, nsg_name: Option<&str>) -> Result<()> {
        self.ensure_vm_absent(rg_name, vm_name, "NSG")?;

        let nsg_name = match nsg_name {
            Some(name) => name.to_owned(),
            None => format!("{vm_name}NSG"),
        };

        self.run(&format!("az network nsg delete -n {nsg_name} -g {rg_name}"))
            .with_context(|| format!("Unable to delete NSG {nsg_name}"))?;
        Ok(())
    }

    /// List network interfaces in a resource group
    pub fn list_nics(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az network nic list -g {rg_name}"),
            format,
            &format!("Unable to list network interfaces associated with resource group {rg_name}"),
        )
    }

    /// Delete a network interface left behind by a deleted VM
    pub fn delete_nic(&self, rg_name: &str, vm_name: &str, nic_name: Option<&str>) -> Result<()> {
        self.ensure_vm_absent(rg_name, vm_name, "NIC")?;

        let nic_name = match nic_name {
            Some(name) => name.to_owned(),
            None => format!("{vm_name}VMNic"),
        };

        self.run(&format!("az network nic delete -n {nic_name} -g {rg_name}"))
            .with_context(|| format!("Unable to delete NIC {nic_name}"))?;
        Ok(())
    }
}
