//! Compiled contract artifacts.
//!
//! Accepts both the brownie/hardhat layout (`"bytecode": "0x…"`) and the forge
//! layout (`"bytecode": { "object": "0x…" }`). The bytecode is kept as text
//! because unlinked library placeholders are not valid hex.

use std::path::Path;

use alloy::json_abi::JsonAbi;
use serde::Deserialize;

use crate::error::VaultToolsError;

/// Bytecode plus ABI, immutable once loaded.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    /// Creation bytecode without the `0x` prefix, possibly still unlinked.
    pub bytecode: String,
    pub abi: JsonAbi,
}

#[derive(Deserialize)]
struct RawArtifact {
    bytecode: RawBytecode,
    abi: JsonAbi,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Plain(String),
    Forge { object: String },
}

impl CompiledArtifact {
    /// Read and parse an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VaultToolsError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| VaultToolsError::artifact(display.clone(), e))?;
        Self::from_json_str(&display, &text)
    }

    /// Parse artifact JSON. `origin` is only used in error messages.
    pub fn from_json_str(origin: &str, json: &str) -> Result<Self, VaultToolsError> {
        let raw: RawArtifact =
            serde_json::from_str(json).map_err(|e| VaultToolsError::artifact(origin, e))?;

        let bytecode = match raw.bytecode {
            RawBytecode::Plain(s) => s,
            RawBytecode::Forge { object } => object,
        };
        let bytecode = bytecode
            .strip_prefix("0x")
            .unwrap_or(&bytecode)
            .to_string();
        if bytecode.is_empty() {
            return Err(VaultToolsError::artifact(
                origin,
                "artifact has no creation bytecode (abstract contract or interface?)",
            ));
        }

        Ok(Self {
            bytecode,
            abi: raw.abi,
        })
    }
}
