//! End-to-end deployment against a local Anvil instance.
//!
//! The artifact is a tiny contract whose runtime code is the 20 bytes that
//! sit where a library placeholder was, so the deployed code shows exactly
//! what the linker wrote.

use alloy::node_bindings::Anvil;
use alloy::primitives::Address;
use alloy::providers::Provider;

use vault_runtime::{ChainClient, DeployEnvironment, LibraryTable, deploy_artifact};

// PUSH1 20, PUSH1 12, PUSH1 0, CODECOPY, PUSH1 20, PUSH1 0, RETURN
const INIT_CODE: &str = "6014600c60003960146000f3";
const PLACEHOLDER: &str = "__SettleAssetsExternal__________________";

#[tokio::test]
#[ignore = "requires a local anvil binary"]
async fn test_linked_deploy_on_anvil() {
    let anvil = Anvil::new().try_spawn().unwrap();
    let key = format!("0x{}", hex::encode(anvil.keys()[0].to_bytes()));
    let client = ChainClient::new(&anvil.endpoint(), &key, anvil.chain_id()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SettleProbe.json");
    std::fs::write(
        &path,
        format!(r#"{{"bytecode":"0x{INIT_CODE}{PLACEHOLDER}","abi":[]}}"#),
    )
    .unwrap();

    let library = Address::repeat_byte(0x42);
    let libraries = LibraryTable::new().with("SettleAssetsExternal", library);

    let nonce_before = client.nonce(client.address()).await.unwrap();
    let handle = deploy_artifact(&client, &path, &[], client.address(), "SettleProbe", &libraries)
        .await
        .unwrap();

    assert_eq!(handle.address, client.address().create(nonce_before));
    let code = client.provider().get_code_at(handle.address).await.unwrap();
    assert_eq!(code.as_ref(), library.as_slice());
    assert_eq!(client.nonce(client.address()).await.unwrap(), nonce_before + 1);
}
