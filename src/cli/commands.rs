//! CLI command dispatch
//!
//! Builds the facade over the real system and maps each subcommand onto
//! one facade operation. List/show output goes to stdout untouched, the
//! way the Azure CLI produced it.

use crate::azure::vnet::VnetOptions;
use crate::azure::{AzureCli, Credentials, OutputFormat};
use crate::cli::args::{
    Args, Command, ContainerCommand, DeployCommand, DiskCommand, GroupCommand, NicCommand,
    NsgCommand, PublicIpCommand, RouteCommand, RouteTableCommand, StorageCommand, SubnetCommand,
    VmCommand, VnetCommand, parse_tag,
};
use crate::params;
use crate::system::System;
use anyhow::Result;

/// Execute the parsed command line
pub fn execute(args: Args, system: &dyn System) -> Result<()> {
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    // Rendering is pure file work; no credentials involved.
    if let Command::RenderParams {
        ref template,
        ref testbed,
        ref output,
        ref section,
        root,
    } = args.command
    {
        let section = if root { None } else { Some(section.as_str()) };
        let testbed = params::load_testbed(system, testbed, section)?;
        let count = params::render_parameter_file(system, template, &testbed, output)?;
        println!("Rendered {count} placeholders into {output}");
        return Ok(());
    }

    let credentials = Credentials::from_parts(
        args.app_id.clone(),
        args.dir_id.clone(),
        args.key.clone(),
        args.username.clone(),
        args.password.clone(),
    )?;
    let mut az = AzureCli::new(system, credentials);

    match args.command {
        Command::Login => az.login()?,
        Command::Logout => az.logout(),

        Command::Group(command) => match command {
            GroupCommand::Create { name, location } => az.create_group(&name, &location)?,
            GroupCommand::Delete { name } => az.delete_group(&name)?,
            GroupCommand::List { tags } => {
                let parsed = if tags.is_empty() {
                    vec![("location".to_owned(), "eastus".to_owned())]
                } else {
                    tags.iter()
                        .map(|tag| parse_tag(tag))
                        .collect::<Result<Vec<_>>>()?
                };
                let refs: Vec<(&str, &str)> = parsed
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                print!("{}", az.list_groups(&refs, format)?);
            }
            GroupCommand::Show { name } => print!("{}", az.show_group(&name, format)?),
        },

        Command::Vnet(command) => match command {
            VnetCommand::Create {
                name,
                resource_group,
                location,
                address_prefix,
                subnet_name,
                subnet_prefix,
            } => {
                let options = VnetOptions {
                    address_prefix,
                    subnet_name,
                    subnet_prefix,
                };
                az.create_vnet(&name, &resource_group, &location, &options)?;
            }
            VnetCommand::Delete {
                name,
                resource_group,
            } => az.delete_vnet(&name, &resource_group)?,
            VnetCommand::List { resource_group } => {
                print!("{}", az.list_vnets(&resource_group, format)?);
            }
            VnetCommand::Show {
                name,
                resource_group,
            } => print!("{}", az.show_vnet(&name, &resource_group, format)?),
        },

        Command::Subnet(command) => match command {
            SubnetCommand::Add {
                name,
                resource_group,
                vnet_name,
                address_prefix,
                route_table,
            } => az.add_subnet(
                &name,
                &resource_group,
                &vnet_name,
                &address_prefix,
                route_table.as_deref(),
            )?,
            SubnetCommand::Delete {
                name,
                resource_group,
                vnet_name,
            } => az.delete_subnet(&name, &resource_group, &vnet_name)?,
            SubnetCommand::List {
                resource_group,
                vnet_name,
            } => print!("{}", az.list_subnets(&vnet_name, &resource_group, format)?),
            SubnetCommand::Show {
                name,
                resource_group,
                vnet_name,
            } => print!(
                "{}",
                az.show_subnet(&name, &resource_group, &vnet_name, format)?
            ),
        },

        Command::RouteTable(command) => match command {
            RouteTableCommand::Create {
                name,
                resource_group,
            } => az.create_route_table(&resource_group, &name)?,
            RouteTableCommand::Delete {
                name,
                resource_group,
            } => az.delete_route_table(&resource_group, &name)?,
            RouteTableCommand::List { resource_group } => {
                print!("{}", az.list_route_tables(&resource_group, format)?);
            }
            RouteTableCommand::Show {
                name,
                resource_group,
            } => print!("{}", az.show_route_table(&resource_group, &name, format)?),
        },

        Command::Route(command) => match command {
            RouteCommand::Add {
                name,
                resource_group,
                route_table,
                address_prefix,
                next_hop_address,
                next_hop_type,
            } => az.add_route(
                &resource_group,
                &route_table,
                &name,
                &address_prefix,
                &next_hop_address,
                &next_hop_type,
            )?,
            RouteCommand::Delete {
                name,
                resource_group,
                route_table,
            } => az.delete_route(&resource_group, &route_table, &name)?,
            RouteCommand::List {
                resource_group,
                route_table,
            } => print!("{}", az.list_routes(&resource_group, &route_table, format)?),
        },

        Command::Vm(command) => match command {
            VmCommand::DeployLinux {
                name,
                resource_group,
                vnet_name,
                subnet_name,
                admin_username,
                admin_password,
            } => {
                let out = az.deploy_linux(
                    &name,
                    &resource_group,
                    &vnet_name,
                    &subnet_name,
                    &admin_username,
                    &admin_password,
                )?;
                print!("{out}");
            }
            VmCommand::Delete {
                name,
                resource_group,
            } => az.delete_linux(&name, &resource_group)?,
            VmCommand::List { resource_group } => {
                print!("{}", az.list_vms(&resource_group, format)?);
            }
        },

        Command::Resources { resource_group } => {
            print!("{}", az.list_resources(&resource_group, format)?);
        }

        Command::Disk(command) => match command {
            DiskCommand::Delete {
                vm_name,
                resource_group,
                name,
            } => az.delete_disk(&resource_group, &vm_name, name.as_deref())?,
            DiskCommand::List { resource_group } => {
                print!("{}", az.list_disks(&resource_group, format)?);
            }
        },

        Command::Nic(command) => match command {
            NicCommand::Delete {
                vm_name,
                resource_group,
                name,
            } => az.delete_nic(&resource_group, &vm_name, name.as_deref())?,
            NicCommand::List { resource_group } => {
                print!("{}", az.list_nics(&resource_group, format)?);
            }
        },

        Command::Nsg(command) => match command {
            NsgCommand::Delete {
                vm_name,
                resource_group,
                name,
            } => az.delete_nsg(&resource_group, &vm_name, name.as_deref())?,
            NsgCommand::List { resource_group } => {
                print!("{}", az.list_nsgs(&resource_group, format)?);
            }
        },

        Command::PublicIp(command) => match command {
            PublicIpCommand::Delete {
                vm_name,
                resource_group,
                name,
            } => az.delete_public_ip(&resource_group, &vm_name, name.as_deref())?,
            PublicIpCommand::List { resource_group } => {
                print!("{}", az.list_public_ips(&resource_group, format)?);
            }
            PublicIpCommand::Address {
                name,
                resource_group,
            } => println!("{}", az.public_ip_of(&name, &resource_group)?),
        },

        Command::Storage(command) => match command {
            StorageCommand::Create {
                name,
                resource_group,
                location,
                sku,
            } => az.create_storage_account(&name, &resource_group, &location, &sku)?,
            StorageCommand::Delete {
                name,
                resource_group,
            } => az.delete_storage_account(&name, &resource_group)?,
            StorageCommand::List { resource_group } => {
                print!("{}", az.list_storage_accounts(&resource_group, format)?);
            }
            StorageCommand::Show {
                name,
                resource_group,
            } => print!("{}", az.show_storage_account(&name, &resource_group, format)?),
            StorageCommand::Keys {
                name,
                resource_group,
            } => {
                let keys = az.storage_keys(&name, &resource_group)?;
                let mut names: Vec<&String> = keys.keys().collect();
                names.sort();
                for key_name in names {
                    println!("{key_name}: {}", keys[key_name]);
                }
            }
        },

        Command::Container(command) => match command {
            ContainerCommand::Create {
                name,
                resource_group,
                storage_account,
            } => az.create_container(&name, &resource_group, &storage_account)?,
            ContainerCommand::Delete {
                name,
                resource_group,
                storage_account,
            } => az.delete_container(&name, &resource_group, &storage_account)?,
            ContainerCommand::List {
                resource_group,
                storage_account,
            } => print!(
                "{}",
                az.list_containers(&resource_group, &storage_account, format)?
            ),
        },

        Command::UploadVhd {
            container,
            storage_account,
            resource_group,
            file,
        } => az.upload_vhd(&container, &storage_account, &resource_group, &file)?,

        Command::Deploy(command) => match command {
            DeployCommand::CustomImage {
                resource_group,
                storage_account,
                image,
                template,
                parameters,
                location,
                container,
            } => az.deploy_custom_image(
                &resource_group,
                &storage_account,
                &image,
                &template,
                &parameters,
                &location,
                &container,
            )?,
            DeployCommand::Marketplace {
                resource_group,
                template,
                parameters,
                location,
            } => az.deploy_marketplace_image(&resource_group, &location, &template, &parameters)?,
        },

        Command::RenderParams { .. } => unreachable!("handled before credential parsing"),
    }

    Ok(())
}
