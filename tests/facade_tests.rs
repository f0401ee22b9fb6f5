//! Facade tests against the mock system
//!
//! These drive the public `AzureCli` operations end to end and assert on
//! the exact command lines handed to the shell.

use azprov::azure::{AzureCli, Credentials, OutputFormat};
use azprov::system::MockSystem;

const KEYS_JSON: &str = r#"[
    {"keyName": "key1", "value": "primary==", "permissions": "Full"},
    {"keyName": "key2", "value": "secondary==", "permissions": "Full"}
]"#;

fn facade(system: &MockSystem) -> AzureCli<'_> {
    AzureCli::new(
        system,
        Credentials::ServicePrincipal {
            app_id: "app".to_owned(),
            dir_id: "dir".to_owned(),
            key: "key".to_owned(),
        },
    )
}

#[test]
fn network_provisioning_sequence() {
    let system = MockSystem::new();
    let az = facade(&system);

    az.create_group("rg1", "eastus").unwrap();
    az.create_vnet("net1", "rg1", "eastus", &Default::default())
        .unwrap();
    az.add_subnet("sub1", "rg1", "net1", "10.0.1.0/24", None)
        .unwrap();
    az.create_route_table("rg1", "rt1").unwrap();
    az.add_route("rg1", "rt1", "r1", "0.0.0.0/0", "10.0.1.4", "VirtualAppliance")
        .unwrap();

    assert_eq!(
        system.commands(),
        vec![
            "az group create --name rg1 --location eastus",
            "az network vnet create -g rg1 -n net1 --location eastus",
            "az network vnet subnet create -g rg1 -n sub1 --vnet-name net1 --address-prefix 10.0.1.0/24",
            "az network route-table create -g rg1 -n rt1",
            "az network route-table route create -g rg1 -n r1 --address-prefix 0.0.0.0/0 \
             --next-hop-type VirtualAppliance --route-table-name rt1 --next-hop-ip-address 10.0.1.4",
        ]
    );
}

#[test]
fn full_vm_teardown_leaves_nothing_behind() {
    let system = MockSystem::new()
        .with_response("az vm list", "Name\nsurvivor-vm\n")
        .with_response("az disk list", "Name\ntest-vm_OsDisk_1_77aa\n")
        .with_response("az resource list", "Name\nsurvivor-vm\n");
    let az = facade(&system);

    az.delete_linux("test-vm", "rg1").unwrap();

    let commands = system.commands();
    assert_eq!(commands[0], "az vm delete -n test-vm -g rg1 --yes");
    // Each sub-resource deletion re-checks the VM listing first.
    assert_eq!(
        commands
            .iter()
            .filter(|c| c.as_str() == "az vm list -g rg1 -o table")
            .count(),
        4
    );
    assert!(commands.contains(&"az disk delete -n test-vm_OsDisk_1_77aa -g rg1 --yes".to_owned()));
    assert!(commands.contains(&"az network nic delete -n test-vmVMNic -g rg1".to_owned()));
    assert!(commands.contains(&"az network nsg delete -n test-vmNSG -g rg1".to_owned()));
    assert!(commands.contains(&"az network public-ip delete -n test-vmPublicIP -g rg1".to_owned()));
    assert_eq!(commands.last().unwrap(), "az resource list -g rg1 -o table");
}

#[test]
fn teardown_aborts_on_first_guard_failure() {
    // VM still shows up in the listing after the delete: the disk guard
    // must refuse and nothing after it may run.
    let system = MockSystem::new().with_response("az vm list", "Name\ntest-vm\n");
    let az = facade(&system);

    let err = az.delete_linux("test-vm", "rg1").unwrap_err();
    assert!(err.to_string().contains("Unable to delete all resources"));

    let commands = system.commands();
    assert!(!commands.iter().any(|c| c.starts_with("az disk delete")));
    assert!(!commands.iter().any(|c| c.starts_with("az network nic delete")));
}

#[test]
fn listings_return_raw_cli_text() {
    let table = "Name    Location\n------  --------\nrg1     eastus\n";
    let system = MockSystem::new().with_response("az group list", table);
    let az = facade(&system);

    let out = az
        .list_groups(&[("location", "eastus")], OutputFormat::Table)
        .unwrap();
    assert_eq!(out, table);
}

#[test]
fn json_listing_drops_table_flag() {
    let system = MockSystem::new().with_response("az vm list", "[{\"name\": \"vm1\"}]");
    let az = facade(&system);

    az.list_vms("rg1", OutputFormat::Json).unwrap();
    assert_eq!(system.commands(), vec!["az vm list -g rg1"]);
}

#[test]
fn storage_container_lifecycle_reuses_first_key() {
    let system = MockSystem::new()
        .with_response("az storage account keys list", KEYS_JSON)
        .with_response("az storage container list", "Name\nimages\n");
    let az = facade(&system);

    az.create_storage_account("store1", "rg1", "eastus", "Standard_LRS")
        .unwrap();
    az.create_container("images", "rg1", "store1").unwrap();
    az.upload_vhd("images", "store1", "rg1", "/images/fw.vhd")
        .unwrap();
    az.delete_container("images", "rg1", "store1").unwrap();

    let commands = system.commands();
    assert!(commands.contains(
        &"az storage container create -n images --account-name store1 --account-key primary=="
            .to_owned()
    ));
    assert!(commands.iter().any(|c| c.starts_with(
        "az storage blob upload -n fw.vhd -c images --account-name store1 --account-key primary=="
    )));
    assert!(commands.contains(
        &"az storage container delete -n images --account-name store1 --account-key primary=="
            .to_owned()
    ));
}

#[test]
fn storage_keys_surface_every_entry() {
    let system = MockSystem::new().with_response("az storage account keys list", KEYS_JSON);
    let az = facade(&system);

    let keys = az.storage_keys("store1", "rg1").unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys["key1"], "primary==");
    assert_eq!(keys["key2"], "secondary==");
}

#[test]
fn command_failure_carries_stderr() {
    let system = MockSystem::new().with_failure(
        "az group create",
        "AuthorizationFailed: no permission",
        1,
    );
    let az = facade(&system);

    let err = az.create_group("rg1", "eastus").unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("Unable to create resource group rg1"));
    assert!(chain.contains("AuthorizationFailed"));
}
