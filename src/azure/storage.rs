//! Storage account, container and blob operations
//!
//! Container operations authenticate with an account key pulled from
//! `az storage account keys list`; the first key returned is used.

use super::{AzureCli, OutputFormat};
use crate::error::AzError;
use anyhow::{Context as _, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// Default storage account SKU
///
/// Accepted values on the Azure side: Premium_LRS, Standard_GRS,
/// Standard_LRS, Standard_RAGRS, Standard_ZRS.
pub const DEFAULT_STORAGE_SKU: &str = "Standard_LRS";

/// One entry of `az storage account keys list`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageKey {
    pub key_name: String,
    pub value: String,
}

impl AzureCli<'_> {
    /// Create a new storage account
    pub fn create_storage_account(
        &self,
        name: &str,
        rg_name: &str,
        location: &str,
        sku: &str,
    ) -> Result<()> {
        self.run(&format!(
            "az storage account create -g {rg_name} -n {name} -l {location} --sku {sku}"
        ))
        .with_context(|| format!("Unable to create storage {name}"))?;
        Ok(())
    }

    /// Delete an existing storage account
    pub fn delete_storage_account(&self, name: &str, rg_name: &str) -> Result<()> {
        self.run(&format!(
            "az storage account delete -n {name} -g {rg_name} --yes"
        ))
        .with_context(|| format!("Unable to delete storage {name}"))?;
        Ok(())
    }

    /// List storage accounts in a resource group
    pub fn list_storage_accounts(&self, rg_name: &str, format: OutputFormat) -> Result<String> {
        self.run_listing(
            &format!("az storage account list -g {rg_name}"),
            format,
            &format!("Unable to list storage accounts associated with resource group {rg_name}"),
        )
    }

    /// Get data about a specific storage account
    pub fn show_storage_account(
        &self,
        name: &str,
        rg_name: &str,
        format: OutputFormat,
    ) -> Result<String> {
        self.run_listing(
            &format!("az storage account show -g {rg_name} -n {name}"),
            format,
            &format!("Unable to get information about Storage Account {name}"),
        )
    }

    /// Fetch the access keys of a storage account as a name→value map
    pub fn storage_keys(&self, storage_name: &str, rg_name: &str) -> Result<HashMap<String, String>> {
        let entries = self.storage_key_entries(storage_name, rg_name)?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.key_name, entry.value))
            .collect())
    }

    /// Fetch the access keys in the order the CLI returns them
    fn storage_key_entries(&self, storage_name: &str, rg_name: &str) -> Result<Vec<StorageKey>> {
        let out = self.run(&format!(
            "az storage account keys list -n {storage_name} -g {rg_name}"
        ))?;

        if out.trim().is_empty() {
            return Err(
                AzError::verification("Unable to get Storage Account Key information").into(),
            );
        }

        let entries: Vec<StorageKey> = serde_json::from_str(&out).map_err(|err| {
            AzError::parse(format!("Unable to parse storage key listing: {err}"))
        })?;
        Ok(entries)
    }

    /// First key of a storage account, used to authenticate container
    /// operations
    fn first_storage_key(&self, storage_name: &str, rg_name: &str) -> Result<String> {
        let entries = self.storage_key_entries(storage_name, rg_name)?;
        entries
            .into_iter()
            .next()
            .map(|entry| entry.value)
            .ok_or_else(|| {
                AzError::parse(format!("Storage account {storage_name} returned no keys")).into()
            })
    }

    /// Create a container in an existing storage account
    pub fn create_container(&self, name: &str, rg_name: &str, storage_name: &str) -> Result<()> {
        let key = self.first_storage_key(storage_name, rg_name)?;
        self.run(&format!(
            "az storage container create -n {name} --account-name {storage_name} --account-key {key}"
        ))
        .with_context(|| format!("Unable to create storage container {name}"))?;
        Ok(())
    }

    /// List containers of a storage account
    pub fn list_containers(
        &self,
        rg_name: &str,
        storage_name: &str,
        format: OutputFormat,
    ) -> Result<String> {
        let key = self.first_storage_key(storage_name, rg_name)?;
        self.run_listing(
            &format!(
                "az storage container list --account-name {storage_name} --account-key {key}"
            ),
            format,
            "Unable to list Storage Account information",
        )
    }

    /// Delete a container of a storage account
    pub fn delete_container(&self, name: &str, rg_name: &str, storage_name: &str) -> Result<()> {
        let key = self.first_storage_key(storage_name, rg_name)?;
        self.run(&format!(
            "az storage container delete -n {name} --account-name {storage_name} --account-key {key}"
        ))
        .with_context(|| format!("Unable to delete storage container {name}"))?;
        Ok(())
    }

    /// Upload a VHD file as a page blob into an existing container
    ///
    /// The blob is named after the file; a path with no extractable file
    /// name falls back to `blob.vhd`.
    pub fn upload_vhd(
        &self,
        container_name: &str,
        storage_name: &str,
        rg_name: &str,
        file_path: &str,
    ) -> Result<()> {
        let containers = self.list_containers(rg_name, storage_name, OutputFormat::Table)?;
        if !containers.contains(container_name) {
            return Err(AzError::verification(format!(
                "Container {container_name} does not currently exist, please create first"
            ))
            .into());
        }

        let key = self.first_storage_key(storage_name, rg_name)?;

        let re = Regex::new(r"^.*[/\\](.*)").context("Invalid blob name pattern")?;
        let blob_name = re
            .captures(file_path)
            .map_or("blob.vhd".to_owned(), |captures| {
                captures[1].trim().to_owned()
            });

        self.run(&format!(
            "az storage blob upload -n {blob_name} -c {container_name} \
             --account-name {storage_name} --account-key {key} -f {file_path} -t page"
        ))
        .with_context(|| format!("Unable to upload file {file_path}"))?;
        Ok(())
    }
}
