//! Virtual network and subnet operations

use super::{AzureCli, OutputFormat};
use anyhow::{Context as _, Result};

/// Optional extras for VNet creation
///
/// Leave everything `None` to take Azure's default address prefix, or set
/// all three fields to create the VNet with an explicit prefix and an
/// initial subnet. A partial set falls back to the bare form.
#[derive(Debug, Clone, Default)]
pub struct VnetOptions {
    pub address_prefix: Option<String>,
    pub subnet_name: Option<String>,
    pub subnet_prefix: Option<String>,
}

impl AzureCli<'_> {
    /// Create a new VNet, optionally with an explicit prefix and subnet
    pub fn create_vnet(
        &self,
        name: &str,
        rg_name: &str,
        location: &str,
        options: &VnetOptions,
    ) -> Result<()> {
        let command = match (
            options.address_prefix.as_deref(),
            options.subnet_name.as_deref(),
            options.subnet_prefix.as_deref(),
        ) {
            (Some(address_prefix), Some(subnet_name), Some(subnet_prefix)) => format!(
                "az network vnet create -g {rg_name} -n {name} --location {location} \
                 --address-prefix {address_prefix} --subnet-name {subnet_name} \
                 --subnet-prefix {subnet_prefix}"
            ),
            _ => format!("az network vnet create -g {rg_name} -n {name} --location {location}"),
        };

        self.run(&command)
            .with_context(|| format!("Unable to create vnet {name}"))?;
        Ok(())
    }

    /// Delete an existing VNet
    pub fn delete_vnet(&self, name: &str, rg_name: &str) -> Result<()> {
        self.run(&format!("az network vnet delete -n {name} -g {rg_name}"))
            .with_context(|| format!("Unable to delete vnet {name}"))?;
        Ok(())
    }

    /// List VNets contained in a resource group
    pub fn list_vnets(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az network vnet list --resource-group {rg_name}"),
            format,
            "Unable to list VNET information",
        )
    }

    /// Get data about a specific VNet in a resource group
    pub fn show_vnet(&self, name: &str, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az network vnet show -g {rg_name} -n {name}"),
            format,
            &format!("Unable to get information about VNET {name}"),
        )
    }

    /// Create a subnet and attach it to a VNet, optionally associating a
    /// route table
    pub fn add_subnet(
        &self,
        name: &str,
        rg_name: &str,
        vnet_name: &str,
        address_prefix: &str,
        route_table: Option<&str>,
    ) -> Result<()> {
        let command = match route_table {
            Some(route_table) => format!(
                "az network vnet subnet create -g {rg_name} -n {name} --vnet-name {vnet_name} \
                 --address-prefix {address_prefix} --route-table {route_table}"
            ),
            None => format!(
                "az network vnet subnet create -g {rg_name} -n {name} --vnet-name {vnet_name} \
                 --address-prefix {address_prefix}"
            ),
        };

        self.run(&command)
            .with_context(|| format!("Unable to create vnet subnet {name}"))?;
        Ok(())
    }

    /// Delete a subnet attached to a VNet
    pub fn delete_subnet(&self, name: &str, rg_name: &str, vnet_name: &str) -> Result<()> {
        self.run(&format!(
            "az network vnet subnet delete -g {rg_name} -n {name} --vnet-name {vnet_name}"
        ))
        .with_context(|| format!("Unable to delete subnet {name}"))?;
        Ok(())
    }

    /// List subnets attached to a VNet
    pub fn list_subnets(
        &self,
        vnet_name: &str,
        rg_name: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.run_listing(
            &format!("az network vnet subnet list -g {rg_name} --vnet-name {vnet_name}"),
            format,
            "Unable to list VNET Subnets information",
        )
    }

    /// Get data about a specific subnet attached to a VNet
    pub fn show_subnet(
        &self,
        name: &str,
        rg_name: &str,
        vnet_name: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.run_listing(
            &format!("az network vnet subnet show -g {rg_name} -n {name} --vnet-name {vnet_name}"),
            format,
            &format!("Unable to get information about Subnet VNET {name}"),
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
    fn create_vnet_bare_form() {
        let system = MockSystem::new();
        facade(&system)
            .create_vnet("net1", "rg1", "eastus", &VnetOptions::default())
            .unwrap();
        assert_eq!(
            system.commands(),
            vec!["az network vnet create -g rg1 -n net1 --location eastus"]
        );
    }

    #[test]
    fn create_vnet_with_subnet() {
        let system = MockSystem::new();
        let options = VnetOptions {
            address_prefix: Some("10.0.0.0/16".to_owned()),
            subnet_name: Some("sub1".to_owned()),
            subnet_prefix: Some("10.0.1.0/24".to_owned()),
        };
        facade(&system)
            .create_vnet("net1", "rg1", "eastus", &options)
            .unwrap();
        assert_eq!(
            system.commands(),
            vec![
                "az network vnet create -g rg1 -n net1 --location eastus \
                 --address-prefix 10.0.0.0/16 --subnet-name sub1 --subnet-prefix 10.0.1.0/24"
            ]
        );
    }

    #[test]
    fn create_vnet_partial_options_fall_back_to_bare_form() {
        let system = MockSystem::new();
        let options = VnetOptions {
            address_prefix: Some("10.0.0.0/16".to_owned()),
            ..VnetOptions::default()
        };
        facade(&system)
            .create_vnet("net1", "rg1", "eastus", &options)
            .unwrap();
        assert_eq!(
            system.commands(),
            vec!["az network vnet create -g rg1 -n net1 --location eastus"]
        );
    }

    #[test]
    fn add_subnet_with_route_table() {
        let system = MockSystem::new();
        facade(&system)
            .add_subnet("sub1", "rg1", "net1", "10.0.2.0/24", Some("rt1"))
            .unwrap();
        assert_eq!(
            system.commands(),
            vec![
                "az network vnet subnet create -g rg1 -n sub1 --vnet-name net1 \
                 --address-prefix 10.0.2.0/24 --route-table rt1"
            ]
        );
    }

    #[test]
    fn add_subnet_without_route_table() {
        let system = MockSystem::new();
        facade(&system)
            .add_subnet("sub1", "rg1", "net1", "10.0.2.0/24", None)
            .unwrap();
        assert_eq!(
            system.commands(),
            vec![
                "az network vnet subnet create -g rg1 -n sub1 --vnet-name net1 \
                 --address-prefix 10.0.2.0/24"
            ]
        );
    }

    #[test]
    fn list_subnets_requires_output() {
        let system = MockSystem::new();
        let err = facade(&system)
            .list_subnets("net1", "rg1", OutputFormat::Table)
            .unwrap_err();
        assert!(err.to_string().contains("Unable to list VNET Subnets"));
    }

    #[test]
    fn show_vnet_returns_raw_text() {
        let system =
            MockSystem::new().with_response("az network vnet show", "Name   Location\nnet1  eastus\n");
        let out = facade(&system)
            .show_vnet("net1", "rg1", OutputFormat::Table)
            .unwrap();
        assert!(out.contains("net1"));
    }
}
