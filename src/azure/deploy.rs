//! Template deployment workflows
//!
//! Two composed flows over the single-resource operations. Neither flow
//! rolls back on partial failure: if a deployment dies partway, the
//! resource group it created has to be cleaned up manually.

use super::storage::DEFAULT_STORAGE_SKU;
use super::{AzureCli, OutputFormat};
use anyhow::{Context as _, Result};
use tracing::info;

/// Container name baked into the custom-image deployment templates
///
/// Only change this when the template file carries a matching value.
pub const DEFAULT_CONTAINER_NAME: &str = "images";

impl AzureCli<'_> {
    /// Deploy a template backed by a custom VHD image
    ///
    /// Creates a resource group, a storage account and a container,
    /// uploads the image into the container, then runs the group
    /// deployment with the given template and parameter files.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy_custom_image(
        &self,
        resource_group: &str,
        storage_name: &str,
        image_path: &str,
        template_file: &str,
        parameter_file: &str,
        location: &str,
        container_name: &str,
    ) -> Result<()> {
        let setup = || -> Result<()> {
            self.create_group(resource_group, location)?;
            info!("Resource Group {resource_group} created");

            self.create_storage_account(storage_name, resource_group, location, DEFAULT_STORAGE_SKU)?;
            info!("Storage {storage_name} created");

            self.create_container(container_name, resource_group, storage_name)?;
            info!("Storage Container {container_name} created");

            self.upload_vhd(container_name, storage_name, resource_group, image_path)?;
            info!("Image {image_path} uploaded to Storage container {container_name}");
            Ok(())
        };
        setup().context("Unable to set up the resource group and storage to deploy template to")?;

        info!("Image on Azure, now deploying Template, can take a few minutes");
        self.run(&format!(
            "az group deployment create -g {resource_group} --template-file {template_file} \
             --parameters {parameter_file}"
        ))
        .context("Unable to deploy template")?;
        info!("Template deployed");
        Ok(())
    }

    /// Deploy a template backed by a Marketplace image
    ///
    /// Reuses the resource group when it already exists, creating it
    /// otherwise, then runs the group deployment.
    pub fn deploy_marketplace_image(
        &self,
        rg_name: &str,
        location: &str,
        template_file: &str,
        parameter_file: &str,
    ) -> Result<()> {
        match self.show_group(rg_name, OutputFormat::Table) {
            Ok(_) => info!("Resource group {rg_name} already exists"),
            Err(_) => {
                info!("Creating resource group {rg_name}");
                self.create_group(rg_name, location)?;
            }
        }

        self.run(&format!(
            "az group deployment create -g {rg_name} --template-file {template_file} \
             --parameters {parameter_file}"
        ))
        .context("Unable to deploy template")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::Credentials;
    use crate::system::MockSystem;

    const KEYS_JSON: &str = r#"[{"keyName": "key1", "value": "k1=="}]"#;

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
    fn custom_image_flow_runs_in_order() {
        let system = MockSystem::new()
            .with_response("az storage account keys list", KEYS_JSON)
            .with_response("az storage container list", "Name\nimages\n");
        facade(&system)
            .deploy_custom_image(
                "rg1",
                "store1",
                "/images/fw.vhd",
                "template.json",
                "params.json",
                "eastus",
                DEFAULT_CONTAINER_NAME,
            )
            .unwrap();

        let commands = system.commands();
        assert_eq!(commands[0], "az group create --name rg1 --location eastus");
        assert_eq!(
            commands[1],
            "az storage account create -g rg1 -n store1 -l eastus --sku Standard_LRS"
        );
        assert!(commands[3].starts_with("az storage container create -n images"));
        assert!(
            commands
                .iter()
                .any(|c| c.starts_with("az storage blob upload -n fw.vhd"))
        );
        assert_eq!(
            commands.last().unwrap(),
            "az group deployment create -g rg1 --template-file template.json --parameters params.json"
        );
    }

    #[test]
    fn custom_image_flow_stops_on_setup_failure() {
        let system = MockSystem::new().with_failure("az storage account create", "quota", 1);
        let err = facade(&system)
            .deploy_custom_image(
                "rg1",
                "store1",
                "/images/fw.vhd",
                "template.json",
                "params.json",
                "eastus",
                DEFAULT_CONTAINER_NAME,
            )
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("Unable to set up the resource group and storage")
        );
        // No deployment was attempted.
        assert!(
            !system
                .commands()
                .iter()
                .any(|c| c.starts_with("az group deployment create"))
        );
    }

    #[test]
    fn marketplace_flow_reuses_existing_group() {
        let system = MockSystem::new().with_response("az group show", "Name  Location\nrg1  eastus\n");
        facade(&system)
            .deploy_marketplace_image("rg1", "eastus", "template.json", "params.json")
            .unwrap();

        let commands = system.commands();
        assert!(!commands.iter().any(|c| c.starts_with("az group create")));
        assert_eq!(
            commands.last().unwrap(),
            "az group deployment create -g rg1 --template-file template.json --parameters params.json"
        );
    }

    #[test]
    fn marketplace_flow_creates_missing_group() {
        let system = MockSystem::new().with_failure("az group show", "ResourceGroupNotFound", 3);
        facade(&system)
            .deploy_marketplace_image("rg1", "eastus", "template.json", "params.json")
            .unwrap();

        let commands = system.commands();
        assert!(
            commands
                .contains(&"az group create --name rg1 --location eastus".to_owned())
        );
    }
}
