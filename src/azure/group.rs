//! Resource group operations

use super::{AzureCli, OutputFormat};
use anyhow::{Context as _, Result};

/// Default Azure location for created resources
pub const DEFAULT_LOCATION: &str = "eastus";

impl AzureCli<'_> {
    /// Create a new resource group
    pub fn create_group(&self, rg_name: &str, location: &str) -> Result<()> {
        self.run(&format!(
            "az group create --name {rg_name} --location {location}"
        ))
        .with_context(|| format!("Unable to create resource group {rg_name}"))?;
        Ok(())
    }

    /// Delete an existing resource group
    pub fn delete_group(&self, rg_name: &str) -> Result<()> {
        self.run(&format!("az group delete --name {rg_name} -y"))
            .with_context(|| format!("Unable to delete resource group {rg_name}"))?;
        Ok(())
    }

    /// List resource groups matching all given tag/value pairs
    ///
    /// Tags are folded into a JMESPath query of the form
    /// `[?tag=='value'][?tag2=='value2']...`.
    pub fn list_groups(&self, tags: &[(&str, &str)], format: OutputFormat) -> Result<String> {
        let mut tag_str = String::new();
        for (tag, value) in tags {
            tag_str.push_str(&format!("[?{tag}=='{value}']"));
        }

        self.run_listing(
            &format!("az group list --query \"{tag_str}\""),
            format,
            "No Resource Groups information collected",
        )
    }

    /// Get data about a specific resource group
    pub fn show_group(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az group show --name {rg_name}"),
            format,
            &format!("No information for Resource Group {rg_name} collected"),
        )
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
    fn create_group_command() {
        let system = MockSystem::new();
        facade(&system).create_group("test-rg", DEFAULT_LOCATION).unwrap();
        assert_eq!(
            system.commands(),
            vec!["az group create --name test-rg --location eastus"]
        );
    }

    #[test]
    fn delete_group_confirms() {
        let system = MockSystem::new();
        facade(&system).delete_group("test-rg").unwrap();
        assert_eq!(system.commands(), vec!["az group delete --name test-rg -y"]);
    }

    #[test]
    fn list_groups_folds_tags_into_query() {
        let system = MockSystem::new().with_response("az group list", "Name    Location\n");
        facade(&system)
            .list_groups(&[("location", "eastus"), ("env", "test")], OutputFormat::Table)
            .unwrap();
        assert_eq!(
            system.commands(),
            vec!["az group list --query \"[?location=='eastus'][?env=='test']\" -o table"]
        );
    }

    #[test]
    fn list_groups_json_omits_table_suffix() {
        let system = MockSystem::new().with_response("az group list", "[]x");
        facade(&system)
            .list_groups(&[("location", "eastus")], OutputFormat::Json)
            .unwrap();
        assert_eq!(
            system.commands(),
            vec!["az group list --query \"[?location=='eastus']\""]
        );
    }

    #[test]
    fn show_group_rejects_blank_output() {
        let system = MockSystem::new().with_response("az group show", "   \n");
        let err = facade(&system)
            .show_group("missing-rg", OutputFormat::Table)
            .unwrap_err();
        assert!(err.to_string().contains("missing-rg"));
    }

    #[test]
    fn failed_delete_propagates() {
        let system = MockSystem::new().with_failure("az group delete", "not found", 3);
        let err = facade(&system).delete_group("gone-rg").unwrap_err();
        assert!(err.to_string().contains("gone-rg"));
    }
}
