//! Deployment configuration read from the environment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::VaultToolsError;
use crate::linker::LibraryTable;

const DEFAULT_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_CHAIN_ID: u64 = 31337;

/// Everything the `vault-deploy` binary needs for one deployment.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub rpc_url: String,
    pub private_key: String,
    pub chain_id: u64,
    pub artifact_path: PathBuf,
    pub contract_name: String,
    pub libraries: LibraryTable,
    pub constructor_args: Vec<String>,
}

impl DeployConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, VaultToolsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset.
    ///
    /// Libraries from `ADDRESS_BOOK` are loaded first, then `LIBRARIES`
    /// entries override them by name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VaultToolsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| VaultToolsError::ConfigError(format!("{key} is not set")))
        };

        let rpc_url = get("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let private_key = require("PRIVATE_KEY")?;
        let chain_id = match get("CHAIN_ID") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| VaultToolsError::ConfigError(format!("Invalid CHAIN_ID '{raw}': {e}")))?,
            None => DEFAULT_CHAIN_ID,
        };
        let artifact_path = PathBuf::from(require("ARTIFACT_PATH")?);
        let contract_name = match get("CONTRACT_NAME") {
            Some(name) => name,
            None => contract_name_from_path(&artifact_path)?,
        };

        let mut libraries = match get("ADDRESS_BOOK") {
            Some(path) => AddressBook::load(path)?.library_table(),
            None => LibraryTable::new(),
        };
        if let Some(pairs) = get("LIBRARIES") {
            for (name, address) in LibraryTable::parse_pairs(&pairs)?.iter() {
                libraries.insert(name, address);
            }
        }

        let constructor_args = match get("CONSTRUCTOR_ARGS") {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).map_err(|e| {
                VaultToolsError::ConfigError(format!(
                    "CONSTRUCTOR_ARGS must be a JSON array of strings: {e}"
                ))
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            rpc_url,
            private_key,
            chain_id,
            artifact_path,
            contract_name,
            libraries,
            constructor_args,
        })
    }
}

fn contract_name_from_path(path: &Path) -> Result<String, VaultToolsError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            VaultToolsError::ConfigError(format!(
                "Cannot derive a contract name from {}; set CONTRACT_NAME",
                path.display()
            ))
        })
}

/// A per-network address file, e.g. `v2.mainnet.json`.
///
/// Only the `libs` table is interpreted; other keys are kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressBook {
    #[serde(default)]
    pub libs: BTreeMap<String, Address>,
    #[serde(default)]
    pub notional: Option<Address>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl AddressBook {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VaultToolsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            VaultToolsError::ConfigError(format!("Cannot read address book {}: {e}", path.display()))
        })?;
        let book = serde_json::from_str(&raw).map_err(|e| {
            VaultToolsError::ConfigError(format!("Invalid address book {}: {e}", path.display()))
        })?;
        Ok(book)
    }

    pub fn library_table(&self) -> LibraryTable {
        self.libs.iter().map(|(name, address)| (name.clone(), *address)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config() {
        let config = DeployConfig::from_lookup(lookup(&[
            ("PRIVATE_KEY", "0xabc"),
            ("ARTIFACT_PATH", "scripts/artifacts/TradingModule.json"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.contract_name, "TradingModule");
        assert!(config.libraries.is_empty());
        assert!(config.constructor_args.is_empty());
    }

    #[test]
    fn test_missing_private_key() {
        let err = DeployConfig::from_lookup(lookup(&[("ARTIFACT_PATH", "a.json"), ("PRIVATE_KEY", "  ")]))
            .unwrap_err();
        assert!(matches!(err, VaultToolsError::ConfigError(msg) if msg.contains("PRIVATE_KEY")));
    }

    #[test]
    fn test_invalid_chain_id() {
        let result = DeployConfig::from_lookup(lookup(&[
            ("PRIVATE_KEY", "0xabc"),
            ("ARTIFACT_PATH", "a.json"),
            ("CHAIN_ID", "mainnet"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_libraries_and_args() {
        let config = DeployConfig::from_lookup(lookup(&[
            ("PRIVATE_KEY", "0xabc"),
            ("ARTIFACT_PATH", "Router.json"),
            ("CONTRACT_NAME", "Router"),
            ("CHAIN_ID", "1"),
            (
                "LIBRARIES",
                "TradingAction=0x1111111111111111111111111111111111111111, VaultAction=0x2222222222222222222222222222222222222222",
            ),
            ("CONSTRUCTOR_ARGS", r#"["0x1344A36A1B56144C3Bc62E7757377D288fDE0369", "3"]"#),
        ]))
        .unwrap();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.libraries.len(), 2);
        assert_eq!(
            config.libraries.get("VaultAction"),
            Some("0x2222222222222222222222222222222222222222")
        );
        assert_eq!(config.constructor_args.len(), 2);
    }

    #[test]
    fn test_constructor_args_must_be_strings() {
        let result = DeployConfig::from_lookup(lookup(&[
            ("PRIVATE_KEY", "0xabc"),
            ("ARTIFACT_PATH", "a.json"),
            ("CONSTRUCTOR_ARGS", "[1, 2]"),
        ]));
        assert!(matches!(result, Err(VaultToolsError::ConfigError(_))));
    }

    #[test]
    fn test_address_book_libraries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "notional": "0x1344A36A1B56144C3Bc62E7757377D288fDE0369",
                "libs": {{
                    "SettleAssetsExternal": "0x3333333333333333333333333333333333333333",
                    "TradingAction": "0x4444444444444444444444444444444444444444"
                }},
                "tokens": {{"WETH": {{"address": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"}}}}
            }}"#
        )
        .unwrap();

        let book = AddressBook::load(file.path()).unwrap();
        assert!(book.notional.is_some());
        assert!(book.other.contains_key("tokens"));

        let config = DeployConfig::from_lookup(lookup(&[
            ("PRIVATE_KEY", "0xabc"),
            ("ARTIFACT_PATH", "TradingAction.json"),
            ("ADDRESS_BOOK", file.path().to_str().unwrap()),
            ("LIBRARIES", "TradingAction=0x5555555555555555555555555555555555555555"),
        ]))
        .unwrap();
        assert_eq!(config.libraries.len(), 2);
        assert_eq!(
            config.libraries.get("TradingAction"),
            Some("0x5555555555555555555555555555555555555555")
        );
        assert!(config.libraries.get("SettleAssetsExternal").is_some());
    }

    #[test]
    fn test_missing_address_book() {
        assert!(AddressBook::load("/nonexistent/v2.mainnet.json").is_err());
    }
}
