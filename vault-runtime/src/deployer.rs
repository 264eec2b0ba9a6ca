//! Artifact deployment with library linking.
//!
//! Linked bytecode is submitted as opaque creation data rather than through a
//! typed deploy helper: after linking, the creation code no longer matches any
//! compile-time binding.

use std::path::Path;

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, B256, Bytes, U256};

use crate::artifact::CompiledArtifact;
use crate::chain::DeployEnvironment;
use crate::error::VaultToolsError;
use crate::linker::{LibraryTable, link_bytecode};

/// A deployed contract: address + ABI, owned by the account that deployed it.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    pub name: String,
    pub address: Address,
    pub abi: JsonAbi,
    pub owner: Address,
}

impl ContractHandle {
    pub fn new(name: impl Into<String>, address: Address, abi: JsonAbi, owner: Address) -> Self {
        Self {
            name: name.into(),
            address,
            abi,
            owner,
        }
    }

    /// Look up a function by name, choosing the overload taking `arity` inputs.
    pub fn function(&self, name: &str, arity: usize) -> Result<&Function, VaultToolsError> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == arity))
            .ok_or_else(|| VaultToolsError::UnknownFunction {
                contract: self.name.clone(),
                function: format!("{name}/{arity}"),
            })
    }

    /// Selector-prefixed calldata for `name(args…)`.
    pub fn encode_call(&self, name: &str, args: &[DynSolValue]) -> Result<Bytes, VaultToolsError> {
        let function = self.function(name, args.len())?;
        let data = function.abi_encode_input(args).map_err(|e| {
            VaultToolsError::ConfigError(format!("Arguments for {}.{name}: {e}", self.name))
        })?;
        Ok(Bytes::from(data))
    }

    /// Decode the return data of `name`.
    pub fn decode_output(
        &self,
        name: &str,
        arity: usize,
        data: &[u8],
    ) -> Result<Vec<DynSolValue>, VaultToolsError> {
        self.function(name, arity)?
            .abi_decode_output(data)
            .map_err(|e| VaultToolsError::Decode(e.to_string()))
    }

    /// Send `name(args…)` from the owning account.
    pub async fn send<E: DeployEnvironment + ?Sized>(
        &self,
        env: &E,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<B256, VaultToolsError> {
        let data = self.encode_call(name, args)?;
        let tx_hash = env
            .submit_call(self.owner, self.address, data, U256::ZERO)
            .await?;
        tracing::info!(contract = %self.name, function = name, %tx_hash, "call mined");
        Ok(tx_hash)
    }
}

/// Coerce textual constructor arguments to the artifact's constructor types.
pub fn coerce_constructor_args(
    abi: &JsonAbi,
    args: &[String],
) -> Result<Vec<DynSolValue>, VaultToolsError> {
    let inputs = abi.constructor.as_ref().map(|c| c.inputs.as_slice()).unwrap_or_default();
    if inputs.len() != args.len() {
        return Err(VaultToolsError::ConfigError(format!(
            "Constructor takes {} arguments, {} supplied",
            inputs.len(),
            args.len()
        )));
    }

    inputs
        .iter()
        .zip(args)
        .map(|(param, raw)| {
            let ty = param
                .resolve()
                .map_err(|e| VaultToolsError::ConfigError(format!("Constructor input '{}': {e}", param.name)))?;
            ty.coerce_str(raw).map_err(|e| {
                VaultToolsError::ConfigError(format!(
                    "Constructor input '{}' ({}): {e}",
                    param.name, param.ty
                ))
            })
        })
        .collect()
}

/// Linked creation bytecode followed by the encoded constructor arguments.
pub fn creation_payload(
    artifact: &CompiledArtifact,
    constructor_args: &[DynSolValue],
    name: &str,
    libraries: &LibraryTable,
) -> Result<Bytes, VaultToolsError> {
    let linked = link_bytecode(&artifact.bytecode, libraries)?;
    let mut data = hex::decode(&linked)
        .map_err(|e| VaultToolsError::artifact(name, format!("linked bytecode is not hex: {e}")))?;

    match &artifact.abi.constructor {
        Some(constructor) => {
            let encoded = constructor.abi_encode_input(constructor_args).map_err(|e| {
                VaultToolsError::ConfigError(format!("Constructor arguments for {name}: {e}"))
            })?;
            data.extend_from_slice(&encoded);
        }
        None if !constructor_args.is_empty() => {
            tracing::warn!(contract = name, "constructor arguments supplied but ABI has no constructor");
            return Err(VaultToolsError::ConfigError(format!(
                "{name} has no constructor but {} arguments were supplied",
                constructor_args.len()
            )));
        }
        None => {}
    }

    Ok(Bytes::from(data))
}

/// Load, link and deploy the artifact at `artifact_path`.
pub async fn deploy_artifact<E: DeployEnvironment + ?Sized>(
    env: &E,
    artifact_path: impl AsRef<Path>,
    constructor_args: &[DynSolValue],
    deployer: Address,
    name: &str,
    libraries: &LibraryTable,
) -> Result<ContractHandle, VaultToolsError> {
    let artifact = CompiledArtifact::load(artifact_path)?;
    deploy_compiled(env, &artifact, constructor_args, deployer, name, libraries).await
}

/// Link and deploy an already-loaded artifact.
///
/// Linking and argument encoding finish before anything is sent, so a
/// missing library never costs a transaction. Failed deployments are
/// surfaced, never retried.
pub async fn deploy_compiled<E: DeployEnvironment + ?Sized>(
    env: &E,
    artifact: &CompiledArtifact,
    constructor_args: &[DynSolValue],
    deployer: Address,
    name: &str,
    libraries: &LibraryTable,
) -> Result<ContractHandle, VaultToolsError> {
    let data = creation_payload(artifact, constructor_args, name, libraries)?;
    let nonce = env.nonce(deployer).await?;

    tracing::info!(contract = name, %deployer, nonce, size = data.len(), "deploying contract");

    let receipt = env
        .submit_creation(deployer, nonce, data)
        .await
        .map_err(|e| VaultToolsError::DeploymentReverted {
            contract: name.to_string(),
            reason: e.to_string(),
        })?;

    let address = match receipt.contract_address {
        Some(address) if receipt.success => address,
        _ => {
            return Err(VaultToolsError::DeploymentReverted {
                contract: name.to_string(),
                reason: format!("no contract created by transaction {}", receipt.tx_hash),
            });
        }
    };

    tracing::info!(contract = name, %address, tx_hash = %receipt.tx_hash, "contract deployed");
    Ok(ContractHandle::new(name, address, artifact.abi.clone(), deployer))
}
