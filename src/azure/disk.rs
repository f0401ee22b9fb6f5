//! Managed disk operations

use super::{AzureCli, OutputFormat};
use crate::error::AzError;
use anyhow::{Context as _, Result};
use regex::Regex;
use tracing::error;

impl AzureCli<'_> {
    /// Delete the managed disk left behind by a deleted VM
    ///
    /// When no disk name is given it is scraped from the disk listing
    /// using the generated `<vm>_OsDisk_...` convention. The VM must
    /// already be gone from the VM listing.
    pub fn delete_disk(&self, rg_name: &str, vm_name: &str, disk_name: Option<&str>) -> Result<()> {
        self.ensure_vm_absent(rg_name, vm_name, "disk")?;

        let disk_name = match disk_name {
            Some(name) => name.to_owned(),
            None => self.disk_name(rg_name, vm_name)?.ok_or_else(|| {
                AzError::parse(format!("Unable to determine disk name for VM {vm_name}"))
            })?,
        };

        self.run(&format!("az disk delete -n {disk_name} -g {rg_name} --yes"))
            .with_context(|| format!("Unable to delete disk {disk_name}"))?;
        Ok(())
    }

    /// List managed disks in a resource group
    pub fn list_disks(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az disk list -g {rg_name}"),
            format,
            &format!("Unable to list disks associated with resource group {rg_name}"),
        )
    }

    /// Scrape the name of the disk belonging to a VM out of the disk
    /// listing
    ///
    /// Generated disk names follow `<vm>_OsDisk_1_<hash>`. The VM name
    /// must appear in the listing; a listing that contains the name but
    /// defeats the scrape logs the problem and yields `None`.
    pub fn disk_name(&self, rg_name: &str, vm_name: &str) -> Result<Option<String>> {
        let disks = self.list_disks(rg_name, OutputFormat::Table)?;

        if !disks.contains(vm_name) {
            return Err(AzError::verification(format!(
                "VM {vm_name} is not present in disks {disks}"
            ))
            .into());
        }

        let pattern = format!(r"({}_\w*)", regex::escape(vm_name));
        let re = Regex::new(&pattern).context("Invalid disk name pattern")?;

        match re.captures(&disks) {
            Some(captures) => Ok(Some(captures[1].trim().to_owned())),
            None => {
                error!("Unable to find VM disk name in disks");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::Credentials;
    use crate::system::MockSystem;

    fn facade(system: &MockSystem) -> AzureCli<'_> {
        AzureCli::new(
            system,
            Credentials::UserPassword {
                username: "u".to_owned(),
                password: "p".to_owned(),
            },
        )
    }

    #[test]
    fn disk_name_scrapes_generated_name() {
        let listing = "Name                        ResourceGroup\n\
                       vm1_OsDisk_1_9f2e8a          rg1\n\
                       unrelated-disk               rg1\n";
        let system = MockSystem::new().with_response("az disk list", listing);
        let name = facade(&system).disk_name("rg1", "vm1").unwrap();
        assert_eq!(name.as_deref(), Some("vm1_OsDisk_1_9f2e8a"));
    }

    #[test]
    fn disk_name_requires_vm_in_listing() {
        let system = MockSystem::new().with_response("az disk list", "Name\nother-disk\n");
        let err = facade(&system).disk_name("rg1", "vm1").unwrap_err();
        assert!(err.to_string().contains("not present in disks"));
    }

    #[test]
    fn disk_name_yields_none_when_scrape_fails() {
        // VM name present but never followed by an underscore-delimited
        // disk suffix.
        let system = MockSystem::new().with_response("az disk list", "Name\nvm1\n");
        let name = facade(&system).disk_name("rg1", "vm1").unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn delete_disk_scrapes_name_when_not_given() {
        let system = MockSystem::new()
            .with_response("az vm list", "Name\nsurvivor\n")
            .with_response("az disk list", "Name\nvm1_OsDisk_1_9f2e8a\n");
        facade(&system).delete_disk("rg1", "vm1", None).unwrap();
        assert_eq!(
            system.commands().last().unwrap(),
            "az disk delete -n vm1_OsDisk_1_9f2e8a -g rg1 --yes"
        );
    }

    #[test]
    fn delete_disk_with_explicit_name_skips_scrape() {
        let system = MockSystem::new().with_response("az vm list", "Name\nsurvivor\n");
        facade(&system)
            .delete_disk("rg1", "vm1", Some("custom-disk"))
            .unwrap();
        let commands = system.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], "az disk delete -n custom-disk -g rg1 --yes");
    }
}
