//! Deployment flow against an in-memory environment.
//!
//! Exercises artifact loading, library linking, constructor encoding and the
//! handle returned by a deployment without touching a chain.

use std::sync::Mutex;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;

use vault_runtime::codec::{VaultConfigOptions, VaultFlag, build_vault_config, compute_flags};
use vault_runtime::{
    CreationReceipt, DeployEnvironment, LibraryTable, NotionalClient, VaultToolsError,
    deploy_artifact, find_placeholders,
};

const TRADING_ACTION: &str = "__TradingAction_________________________";
const VAULT_ACTION: &str = "__VaultAction___________________________";

#[derive(Debug, Clone)]
struct Submitted {
    from: Address,
    to: Option<Address>,
    nonce: Option<u64>,
    data: Bytes,
    value: U256,
}

/// Records every submission and hands out sequential contract addresses.
#[derive(Default)]
struct RecordingEnvironment {
    submissions: Mutex<Vec<Submitted>>,
    withhold_address: bool,
    /// Failed receipt that still names an address.
    revert: bool,
    /// Record the creation, then fail it at the transport.
    fail_with: Option<String>,
}

impl RecordingEnvironment {
    fn submissions(&self) -> Vec<Submitted> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeployEnvironment for RecordingEnvironment {
    async fn nonce(&self, _account: Address) -> Result<u64, VaultToolsError> {
        Ok(self.submissions.lock().unwrap().len() as u64)
    }

    async fn submit_creation(
        &self,
        from: Address,
        nonce: u64,
        data: Bytes,
    ) -> Result<CreationReceipt, VaultToolsError> {
        let mut subs = self.submissions.lock().unwrap();
        subs.push(Submitted {
            from,
            to: None,
            nonce: Some(nonce),
            data,
            value: U256::ZERO,
        });
        if let Some(message) = &self.fail_with {
            return Err(VaultToolsError::Transport(message.clone()));
        }
        let index = subs.len() as u8;
        Ok(CreationReceipt {
            tx_hash: B256::repeat_byte(index),
            contract_address: (!self.withhold_address).then(|| from.create(nonce)),
            success: !self.revert,
        })
    }

    async fn submit_call(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> Result<B256, VaultToolsError> {
        let mut subs = self.submissions.lock().unwrap();
        subs.push(Submitted {
            from,
            to: Some(to),
            nonce: None,
            data,
            value,
        });
        Ok(B256::repeat_byte(subs.len() as u8))
    }
}

fn write_artifact(dir: &tempfile::TempDir, name: &str, bytecode: &str, abi: &str) -> std::path::PathBuf {
    let path = dir.path().join(format!("{name}.json"));
    let json = format!(r#"{{"contractName":"{name}","bytecode":{{"object":"{bytecode}"}},"abi":{abi}}}"#);
    std::fs::write(&path, json).unwrap();
    path
}

const ROUTER_ABI: &str = r#"[
    {"type":"constructor","inputs":[{"name":"owner","type":"address"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"initialize","inputs":[{"name":"pauseRouter","type":"address"}],"outputs":[],"stateMutability":"nonpayable"}
]"#;

fn router_bytecode() -> String {
    format!("0x6080{TRADING_ACTION}5b{VAULT_ACTION}00{TRADING_ACTION}")
}

#[tokio::test]
async fn test_deploy_links_every_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, "Router", &router_bytecode(), ROUTER_ABI);

    let env = RecordingEnvironment::default();
    let deployer = Address::repeat_byte(0xaa);
    let trading = Address::repeat_byte(0x01);
    let vault = Address::repeat_byte(0x02);
    let libraries = LibraryTable::new().with("TradingAction", trading).with("VaultAction", vault);

    let handle = deploy_artifact(
        &env,
        &path,
        &[DynSolValue::Address(deployer)],
        deployer,
        "Router",
        &libraries,
    )
    .await
    .unwrap();

    assert_eq!(handle.name, "Router");
    assert_eq!(handle.owner, deployer);
    assert_eq!(handle.address, deployer.create(0));

    let subs = env.submissions();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].nonce, Some(0));
    assert_eq!(subs[0].to, None);

    let data = &subs[0].data;
    let submitted_hex = hex::encode(data);
    assert!(find_placeholders(&submitted_hex).is_empty());

    // code: 6080 | lib | 5b | lib | 00 | lib, then one constructor word
    assert_eq!(data.len(), 2 + 20 + 1 + 20 + 1 + 20 + 32);
    assert_eq!(&data[2..22], trading.as_slice());
    assert_eq!(&data[23..43], vault.as_slice());
    assert_eq!(&data[44..64], trading.as_slice());
    assert_eq!(&data[76..96], deployer.as_slice());
}

#[tokio::test]
async fn test_missing_library_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, "Router", &router_bytecode(), ROUTER_ABI);

    let env = RecordingEnvironment::default();
    let libraries = LibraryTable::new().with("TradingAction", Address::repeat_byte(0x01));

    let err = deploy_artifact(
        &env,
        &path,
        &[DynSolValue::Address(Address::ZERO)],
        Address::repeat_byte(0xaa),
        "Router",
        &libraries,
    )
    .await
    .unwrap_err();

    match err {
        VaultToolsError::UnresolvedLibrary { library, marker } => {
            assert_eq!(library, "VaultAction");
            assert_eq!(marker, VAULT_ACTION);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(env.submissions().is_empty());
}

#[tokio::test]
async fn test_missing_contract_address_is_a_revert() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, "EmptyProxy", "0x6000", "[]");

    let env = RecordingEnvironment {
        withhold_address: true,
        ..Default::default()
    };

    let err = deploy_artifact(&env, &path, &[], Address::repeat_byte(0xaa), "EmptyProxy", &LibraryTable::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VaultToolsError::DeploymentReverted { contract, .. } if contract == "EmptyProxy"));
    assert_eq!(env.submissions().len(), 1);
}

#[tokio::test]
async fn test_failed_receipt_with_address_is_a_revert() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, "EmptyProxy", "0x6000", "[]");

    let env = RecordingEnvironment {
        revert: true,
        ..Default::default()
    };

    let err = deploy_artifact(&env, &path, &[], Address::repeat_byte(0xaa), "EmptyProxy", &LibraryTable::new())
        .await
        .unwrap_err();
    match err {
        VaultToolsError::DeploymentReverted { contract, reason } => {
            assert_eq!(contract, "EmptyProxy");
            assert!(reason.contains(&B256::repeat_byte(1).to_string()), "{reason}");
        }
        other => panic!("expected DeploymentReverted, got {other}"),
    }
    assert_eq!(env.submissions().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_is_a_revert() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, "EmptyProxy", "0x6000", "[]");

    let env = RecordingEnvironment {
        fail_with: Some("connection reset by peer".to_string()),
        ..Default::default()
    };

    let err = deploy_artifact(&env, &path, &[], Address::repeat_byte(0xaa), "EmptyProxy", &LibraryTable::new())
        .await
        .unwrap_err();
    match err {
        VaultToolsError::DeploymentReverted { contract, reason } => {
            assert_eq!(contract, "EmptyProxy");
            assert!(reason.contains("connection reset by peer"), "{reason}");
        }
        other => panic!("expected DeploymentReverted, got {other}"),
    }
    assert_eq!(env.submissions().len(), 1);
}

#[tokio::test]
async fn test_missing_artifact() {
    let env = RecordingEnvironment::default();
    let err = deploy_artifact(
        &env,
        "/nonexistent/Router.json",
        &[],
        Address::ZERO,
        "Router",
        &LibraryTable::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VaultToolsError::ArtifactLoad { .. }));
    assert!(env.submissions().is_empty());
}

#[tokio::test]
async fn test_handle_and_admin_calls_share_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir, "Router", &router_bytecode(), ROUTER_ABI);
    let env = RecordingEnvironment::default();
    let deployer = Address::repeat_byte(0xaa);
    let libraries = LibraryTable::new()
        .with("TradingAction", Address::repeat_byte(0x01))
        .with("VaultAction", Address::repeat_byte(0x02));

    let router = deploy_artifact(&env, &path, &[DynSolValue::Address(deployer)], deployer, "Router", &libraries)
        .await
        .unwrap();

    router
        .send(&env, "initialize", &[DynSolValue::Address(Address::repeat_byte(0x03))])
        .await
        .unwrap();

    let config = build_vault_config(&VaultConfigOptions {
        flags: Some(compute_flags(0, [VaultFlag::Enabled, VaultFlag::AllowRollPosition])),
        ..Default::default()
    });
    let vault = Address::repeat_byte(0x0f);
    NotionalClient::new(router.address)
        .encode_update_vault(vault, config, U256::from(1_000_000u64))
        .unwrap()
        .send(&env, deployer)
        .await
        .unwrap();

    let subs = env.submissions();
    assert_eq!(subs.len(), 3);
    assert_eq!(subs[1].to, Some(router.address));
    assert_eq!(subs[1].from, deployer);
    assert_eq!(subs[1].data.len(), 4 + 32);
    assert_eq!(subs[2].to, Some(router.address));
    assert_eq!(subs[2].value, U256::ZERO);
}
