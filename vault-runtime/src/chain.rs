//! Chain access for deployments and admin calls.
//!
//! [`DeployEnvironment`] is the seam between the deployer and a chain: the
//! production implementation is [`ChainClient`] (an alloy HTTP provider with
//! a local signer), tests substitute an in-memory environment.

use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, B256, Bytes, TxKind, U256};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy::providers::{Identity, Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use crate::error::VaultToolsError;

/// Provider returned by [`ChainClient::new`]: alloy's recommended fillers
/// (gas, blob gas, nonce, chain id) followed by the signing wallet.
pub type HttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
    Ethereum,
>;

/// Result of a mined contract-creation transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReceipt {
    pub tx_hash: B256,
    pub contract_address: Option<Address>,
    pub success: bool,
}

/// What the deployer needs from a chain.
#[async_trait]
pub trait DeployEnvironment: Send + Sync {
    /// Current sequence number of `account`.
    async fn nonce(&self, account: Address) -> Result<u64, VaultToolsError>;

    /// Submit `data` as a raw contract-creation transaction and wait for it
    /// to be mined.
    async fn submit_creation(
        &self,
        from: Address,
        nonce: u64,
        data: Bytes,
    ) -> Result<CreationReceipt, VaultToolsError>;

    /// Send a call transaction (with `value` wei attached) and wait for it
    /// to be mined.
    async fn submit_call(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> Result<B256, VaultToolsError>;
}

/// HTTP provider plus the local key every deployment is signed with.
pub struct ChainClient {
    pub provider: HttpProvider,
    pub wallet: EthereumWallet,
    pub chain_id: u64,
    signer_address: Address,
}

impl ChainClient {
    /// Connect to `rpc_url`, signing with `private_key` (hex, `0x` optional).
    ///
    /// Nothing is sent here; a bad URL or key fails before any request.
    pub fn new(rpc_url: &str, private_key: &str, chain_id: u64) -> Result<Self, VaultToolsError> {
        let endpoint = url::Url::parse(rpc_url)
            .map_err(|e| VaultToolsError::ConfigError(format!("RPC URL '{rpc_url}' is invalid: {e}")))?;
        let key = private_key
            .parse::<PrivateKeySigner>()
            .map_err(|e| VaultToolsError::ConfigError(format!("Deployer key is invalid: {e}")))?;

        let signer_address = key.address();
        let wallet = EthereumWallet::new(key);
        let provider = ProviderBuilder::new().wallet(wallet.clone()).connect_http(endpoint);

        Ok(Self {
            provider,
            wallet,
            chain_id,
            signer_address,
        })
    }

    /// Address of the local signer; the account deployments are sent from.
    pub fn address(&self) -> Address {
        self.signer_address
    }

    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }
}

#[async_trait]
impl DeployEnvironment for ChainClient {
    async fn nonce(&self, account: Address) -> Result<u64, VaultToolsError> {
        self.provider
            .get_transaction_count(account)
            .await
            .map_err(|e| VaultToolsError::Transport(format!("Nonce fetch failed: {e}")))
    }

    async fn submit_creation(
        &self,
        from: Address,
        nonce: u64,
        data: Bytes,
    ) -> Result<CreationReceipt, VaultToolsError> {
        let mut tx = TransactionRequest::default()
            .from(from)
            .nonce(nonce)
            .input(TransactionInput::both(data));
        tx.to = Some(TxKind::Create);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| VaultToolsError::Transport(format!("Transaction send failed: {e}")))?;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| VaultToolsError::Transport(format!("Receipt fetch failed: {e}")))?;

        Ok(CreationReceipt {
            tx_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            success: receipt.status(),
        })
    }

    async fn submit_call(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
        value: U256,
    ) -> Result<B256, VaultToolsError> {
        let tx = TransactionRequest::default()
            .from(from)
            .to(to)
            .value(value)
            .input(TransactionInput::both(data));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| VaultToolsError::Transport(format!("Transaction send failed: {e}")))?;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| VaultToolsError::Transport(format!("Receipt fetch failed: {e}")))?;

        if !receipt.status() {
            return Err(VaultToolsError::Transport(format!(
                "Call to {to} reverted in {}",
                receipt.transaction_hash
            )));
        }
        Ok(receipt.transaction_hash)
    }
}
