use crate::azure::group::DEFAULT_LOCATION;
use crate::azure::route::DEFAULT_NEXT_HOP_TYPE;
use crate::azure::storage::DEFAULT_STORAGE_SKU;
use crate::azure::vm::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
use crate::params::DEFAULT_TESTBED_SECTION;
use clap::{Parser, Subcommand};

/// Command-line arguments for azprov
#[derive(Parser, Debug, Clone)]
#[command(name = "azprov")]
#[command(about = "A CLI tool for provisioning Azure testbed resources via the Azure CLI")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Azure application ID (service-principal login)
    #[arg(long, env = "AZ_APP_ID", global = true, value_name = "ID")]
    pub app_id: Option<String>,

    /// Azure directory (tenant) ID (service-principal login)
    #[arg(long, env = "AZ_DIR_ID", global = true, value_name = "ID")]
    pub dir_id: Option<String>,

    /// Azure auth key (service-principal login)
    #[arg(long, env = "AZ_KEY", global = true, value_name = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Azure username (password login)
    #[arg(long, env = "AZ_USERNAME", global = true, value_name = "USER")]
    pub username: Option<String>,

    /// Azure password (password login)
    #[arg(long, env = "AZ_PASSWORD", global = true, value_name = "PW", hide_env_values = true)]
    pub password: Option<String>,

    /// Request JSON output from list/show operations instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to the Azure CLI with the configured credentials
    Login,

    /// Log out of the Azure CLI
    Logout,

    /// Resource group operations
    #[command(subcommand)]
    Group(GroupCommand),

    /// Virtual network operations
    #[command(subcommand)]
    Vnet(VnetCommand),

    /// Subnet operations
    #[command(subcommand)]
    Subnet(SubnetCommand),

    /// Route table operations
    #[command(subcommand, name = "route-table")]
    RouteTable(RouteTableCommand),

    /// Route operations
    #[command(subcommand)]
    Route(RouteCommand),

    /// VM operations
    #[command(subcommand)]
    Vm(VmCommand),

    /// List every resource in a resource group
    Resources {
        /// Resource group to list
        resource_group: String,
    },

    /// Managed disk operations
    #[command(subcommand)]
    Disk(DiskCommand),

    /// Network interface operations
    #[command(subcommand)]
    Nic(NicCommand),

    /// Network security group operations
    #[command(subcommand)]
    Nsg(NsgCommand),

    /// Public IP operations
    #[command(subcommand, name = "public-ip")]
    PublicIp(PublicIpCommand),

    /// Storage account operations
    #[command(subcommand)]
    Storage(StorageCommand),

    /// Storage container operations
    #[command(subcommand)]
    Container(ContainerCommand),

    /// Upload a VHD image into a storage container as a page blob
    UploadVhd {
        /// Container to upload into
        #[arg(long, value_name = "NAME")]
        container: String,

        /// Storage account holding the container
        #[arg(long, value_name = "NAME")]
        storage_account: String,

        /// Resource group of the storage account
        #[arg(long, value_name = "NAME")]
        resource_group: String,

        /// Path of the VHD file to upload
        #[arg(long, value_name = "PATH")]
        file: String,
    },

    /// Render a deployment parameter file from a YAML testbed
    RenderParams {
        /// Parameter template file with [identifier] placeholders
        #[arg(long, value_name = "PATH")]
        template: String,

        /// Testbed YAML file holding the values
        #[arg(long, value_name = "PATH")]
        testbed: String,

        /// Path of the rendered output file
        #[arg(long, value_name = "PATH")]
        output: String,

        /// Testbed section holding the values
        #[arg(long, value_name = "NAME", default_value = DEFAULT_TESTBED_SECTION)]
        section: String,

        /// Take values from the document root instead of a section
        #[arg(long, conflicts_with = "section")]
        root: bool,
    },

    /// Template deployment workflows
    #[command(subcommand)]
    Deploy(DeployCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum GroupCommand {
    /// Create a resource group
    Create {
        name: String,
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
    /// Delete a resource group
    Delete { name: String },
    /// List resource groups matching tag filters
    List {
        /// Tag filter in KEY=VALUE form, repeatable; defaults to
        /// location=eastus when omitted
        #[arg(long = "tag", value_name = "KEY=VALUE")]
        tags: Vec<String>,
    },
    /// Show a resource group
    Show { name: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum VnetCommand {
    /// Create a VNet, optionally with an explicit prefix and subnet
    Create {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
        #[arg(long, value_name = "CIDR")]
        address_prefix: Option<String>,
        #[arg(long, value_name = "NAME")]
        subnet_name: Option<String>,
        #[arg(long, value_name = "CIDR")]
        subnet_prefix: Option<String>,
    },
    /// Delete a VNet
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
    /// List VNets in a resource group
    List {
        resource_group: String,
    },
    /// Show a VNet
    Show {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubnetCommand {
    /// Create a subnet on a VNet
    Add {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        vnet_name: String,
        #[arg(long, value_name = "CIDR")]
        address_prefix: String,
        #[arg(long, value_name = "NAME")]
        route_table: Option<String>,
    },
    /// Delete a subnet from a VNet
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        vnet_name: String,
    },
    /// List subnets of a VNet
    List {
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        vnet_name: String,
    },
    /// Show a subnet
    Show {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        vnet_name: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RouteTableCommand {
    /// Create a route table
    Create {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
    /// Delete a route table
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
    /// List route tables in a resource group
    List { resource_group: String },
    /// Show a route table (use --json to see its routes)
    Show {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RouteCommand {
    /// Add a route to a route table
    Add {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        route_table: String,
        #[arg(long, value_name = "CIDR")]
        address_prefix: String,
        #[arg(long, value_name = "IP")]
        next_hop_address: String,
        #[arg(long, value_name = "TYPE", default_value = DEFAULT_NEXT_HOP_TYPE)]
        next_hop_type: String,
    },
    /// Delete a route from a route table
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        route_table: String,
    },
    /// List routes of a route table
    List {
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        route_table: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum VmCommand {
    /// Create a basic Linux VM on an existing subnet
    DeployLinux {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        vnet_name: String,
        #[arg(long, value_name = "NAME")]
        subnet_name: String,
        #[arg(long, default_value = DEFAULT_ADMIN_USERNAME)]
        admin_username: String,
        #[arg(long, default_value = DEFAULT_ADMIN_PASSWORD)]
        admin_password: String,
    },
    /// Delete a Linux VM and its generated sub-resources
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
    /// List VMs in a resource group
    List { resource_group: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DiskCommand {
    /// Delete the managed disk left behind by a deleted VM
    Delete {
        /// VM the disk belonged to
        vm_name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        /// Explicit disk name; scraped from the listing when omitted
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// List managed disks in a resource group
    List { resource_group: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum NicCommand {
    /// Delete the NIC left behind by a deleted VM
    Delete {
        /// VM the NIC belonged to
        vm_name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        /// Explicit NIC name; defaults to <vm>VMNic
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// List network interfaces in a resource group
    List { resource_group: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum NsgCommand {
    /// Delete the NSG left behind by a deleted VM
    Delete {
        /// VM the NSG belonged to
        vm_name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        /// Explicit NSG name; defaults to <vm>NSG
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// List network security groups in a resource group
    List { resource_group: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PublicIpCommand {
    /// Delete the public IP left behind by a deleted VM
    Delete {
        /// VM the public IP belonged to
        vm_name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        /// Explicit public IP name; defaults to <vm>PublicIP
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// List public IPs in a resource group
    List { resource_group: String },
    /// Print the address of a named public IP
    Address {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum StorageCommand {
    /// Create a storage account
    Create {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
        #[arg(long, default_value = DEFAULT_STORAGE_SKU)]
        sku: String,
    },
    /// Delete a storage account
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
    /// List storage accounts in a resource group
    List { resource_group: String },
    /// Show a storage account
    Show {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
    /// Print the access keys of a storage account
    Keys {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ContainerCommand {
    /// Create a container in a storage account
    Create {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        storage_account: String,
    },
    /// Delete a container from a storage account
    Delete {
        name: String,
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        storage_account: String,
    },
    /// List containers of a storage account
    List {
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        storage_account: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeployCommand {
    /// Deploy a template backed by a custom VHD image
    CustomImage {
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "NAME")]
        storage_account: String,
        #[arg(long, value_name = "PATH")]
        image: String,
        #[arg(long, value_name = "PATH")]
        template: String,
        #[arg(long, value_name = "PATH")]
        parameters: String,
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
        /// Must match the container name baked into the template
        #[arg(long, value_name = "NAME", default_value = crate::azure::deploy::DEFAULT_CONTAINER_NAME)]
        container: String,
    },
    /// Deploy a template backed by a Marketplace image
    Marketplace {
        #[arg(long, value_name = "NAME")]
        resource_group: String,
        #[arg(long, value_name = "PATH")]
        template: String,
        #[arg(long, value_name = "PATH")]
        parameters: String,
        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,
    },
}

/// Parse a KEY=VALUE tag filter
pub fn parse_tag(arg: &str) -> anyhow::Result<(String, String)> {
    let parts: Vec<&str> = arg.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!(
            "Invalid tag format '{arg}'. Expected KEY=VALUE"
        ));
    }
    Ok((parts[0].to_owned(), parts[1].to_owned()))
}
