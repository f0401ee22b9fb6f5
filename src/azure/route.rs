//! Route table and route operations

use super::{AzureCli, OutputFormat};
use anyhow::{Context as _, Result};

/// Default next-hop type for added routes
///
/// Allowed values on the Azure side: Internet, None, VirtualAppliance,
/// VirtualNetworkGateway, VnetLocal.
pub const DEFAULT_NEXT_HOP_TYPE: &str = "VirtualAppliance";

impl AzureCli<'_> {
    /// Create a route table in a resource group
    pub fn create_route_table(&self, rg_name: &str, route_table: &str) -> Result<()> {
        self.run(&format!(
            "az network route-table create -g {rg_name} -n {route_table}"
        ))
        .with_context(|| format!("Unable to add route-table {route_table}"))?;
        Ok(())
    }

    /// Delete a route table
    pub fn delete_route_table(&self, rg_name: &str, route_table: &str) -> Result<()> {
        self.run(&format!(
            "az network route-table delete -g {rg_name} -n {route_table}"
        ))
        .with_context(|| format!("Unable to delete route-table {route_table}"))?;
        Ok(())
    }

    /// List route tables in a resource group
    pub fn list_route_tables(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az network route-table list -g {rg_name}"),
            format,
            &format!("Unable to list route tables associated with resource group {rg_name}"),
        )
    }

    /// Get data about a specific route table
    ///
    /// Route entries only appear in the JSON form; the table form is a
    /// one-line summary.
    pub fn show_route_table(
        &self,
        rg_name: &str,
        route_table: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.run_listing(
            &format!("az network route-table show -g {rg_name} -n {route_table}"),
            format,
            &format!("Unable to get information about route-table {route_table}"),
        )
    }

    /// List routes contained in a route table
    pub fn list_routes(
        &self,
        rg_name: &str,
        route_table: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.run_listing(
            &format!("az network route-table route list -g {rg_name} --route-table-name {route_table}"),
            format,
            &format!("Unable to get information about routes in route-table {route_table}"),
        )
    }

    /// Add a route to a route table
    ///
    /// `next_hop_address` is the forwarding address used with the
    /// VirtualAppliance hop type.
    pub fn add_route(
        &self,
        rg_name: &str,
        route_table: &str,
        route: &str,
        prefix: &str,
        next_hop_address: &str,
        next_hop_type: &str,
    ) -> Result<()> {
        self.run(&format!(
            "az network route-table route create -g {rg_name} -n {route} --address-prefix \
             {prefix} --next-hop-type {next_hop_type} --route-table-name {route_table} \
             --next-hop-ip-address {next_hop_address}"
        ))
        .with_context(|| format!("Unable to add route {route}"))?;
        Ok(())
    }

    /// Delete a route from a route table
    pub fn delete_route(&self, rg_name: &str, route_table: &str, route: &str) -> Result<()> {
        self.run(&format!(
            "az network route-table route delete -g {rg_name} -n {route} --route-table-name {route_table}"
        ))
        .with_context(|| format!("Unable to delete route {route}"))?;
        Ok(())
    }
}
