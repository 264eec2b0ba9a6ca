//! Call encoding for Notional, strategy vaults and the trading module.
//!
//! Uses the bindings in `crate::contracts` to build ABI-encoded transactions
//! that can be submitted through any [`DeployEnvironment`].

use alloy::primitives::aliases::U80;
use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::chain::DeployEnvironment;
use crate::codec::{RedeemParams, StrategyVaultSettings, VaultConfig};
use crate::contracts::{INotionalVaults, IStrategyVault, ITradingModule};
use crate::error::VaultToolsError;

/// Encoded transaction data ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedTransaction {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl EncodedTransaction {
    fn call<C: SolCall>(to: Address, call: &C) -> Self {
        Self {
            to,
            data: Bytes::from(call.abi_encode()),
            value: U256::ZERO,
        }
    }

    /// Submit from `from` and wait for the transaction to be mined.
    pub async fn send<E: DeployEnvironment + ?Sized>(
        &self,
        env: &E,
        from: Address,
    ) -> Result<B256, VaultToolsError> {
        let tx_hash = env
            .submit_call(from, self.to, self.data.clone(), self.value)
            .await?;
        tracing::info!(to = %self.to, %from, value = %self.value, %tx_hash, "call mined");
        Ok(tx_hash)
    }
}

/// Builds calls against a Notional proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionalClient {
    pub notional: Address,
}

impl NotionalClient {
    pub fn new(notional: Address) -> Self {
        Self { notional }
    }

    /// Encode `updateVault(vault, config, maxPrimaryBorrowCapacity)`.
    ///
    /// The borrow capacity is a uint80 on chain.
    pub fn encode_update_vault(
        &self,
        vault: Address,
        config: VaultConfig,
        max_primary_borrow_capacity: U256,
    ) -> Result<EncodedTransaction, VaultToolsError> {
        if max_primary_borrow_capacity.bit_len() > 80 {
            return Err(VaultToolsError::EncodingRange {
                field: "maxPrimaryBorrowCapacity",
                value: max_primary_borrow_capacity.to_string(),
                abi_type: "uint80",
            });
        }
        let limbs = max_primary_borrow_capacity.into_limbs();
        let capacity = U80::from_limbs([limbs[0], limbs[1]]);

        let call = INotionalVaults::updateVaultCall {
            vaultAddress: vault,
            vaultConfig: config.into(),
            maxPrimaryBorrowCapacity: capacity,
        };
        Ok(EncodedTransaction::call(self.notional, &call))
    }

    /// Encode `setVaultPauseStatus(vault, enable)`.
    pub fn encode_set_vault_pause_status(&self, vault: Address, enable: bool) -> EncodedTransaction {
        let call = INotionalVaults::setVaultPauseStatusCall {
            vaultAddress: vault,
            enable,
        };
        EncodedTransaction::call(self.notional, &call)
    }

    /// Encode `enterVault(...)`. When the borrow currency is ETH the deposit
    /// travels as the transaction value.
    #[allow(clippy::too_many_arguments)]
    pub fn encode_enter_vault(
        &self,
        account: Address,
        vault: Address,
        deposit_amount: U256,
        maturity: U256,
        fcash: U256,
        max_borrow_rate: u32,
        vault_data: Bytes,
        pay_in_eth: bool,
    ) -> EncodedTransaction {
        let call = INotionalVaults::enterVaultCall {
            account,
            vault,
            depositAmountExternal: deposit_amount,
            maturity,
            fCash: fcash,
            maxBorrowRate: max_borrow_rate,
            vaultData: vault_data,
        };
        let mut tx = EncodedTransaction::call(self.notional, &call);
        if pay_in_eth {
            tx.value = deposit_amount;
        }
        tx
    }

    /// Encode `exitVault(...)`.
    #[allow(clippy::too_many_arguments)]
    pub fn encode_exit_vault(
        &self,
        account: Address,
        vault: Address,
        receiver: Address,
        vault_shares_to_redeem: U256,
        lend_amount: U256,
        min_lend_rate: u32,
        exit_vault_data: Bytes,
    ) -> EncodedTransaction {
        let call = INotionalVaults::exitVaultCall {
            account,
            vault,
            receiver,
            vaultSharesToRedeem: vault_shares_to_redeem,
            lendAmount: lend_amount,
            minLendRate: min_lend_rate,
            exitVaultData: exit_vault_data,
        };
        EncodedTransaction::call(self.notional, &call)
    }
}

/// Encode `setStrategyVaultSettings(settings)` against `vault`.
pub fn encode_set_strategy_vault_settings(
    vault: Address,
    settings: StrategyVaultSettings,
) -> EncodedTransaction {
    let call = IStrategyVault::setStrategyVaultSettingsCall {
        settings: settings.into(),
    };
    EncodedTransaction::call(vault, &call)
}

/// Encode `settleVaultNormal(maturity, strategyTokensToRedeem, redeemParams)`.
pub fn encode_settle_vault_normal(
    vault: Address,
    maturity: U256,
    strategy_tokens_to_redeem: U256,
    params: &RedeemParams,
) -> EncodedTransaction {
    let call = IStrategyVault::settleVaultNormalCall {
        maturity,
        strategyTokensToRedeem: strategy_tokens_to_redeem,
        data: params.encode(),
    };
    EncodedTransaction::call(vault, &call)
}

/// Encode `settleVaultPostMaturity(...)`, same arguments as a normal settle.
pub fn encode_settle_vault_post_maturity(
    vault: Address,
    maturity: U256,
    strategy_tokens_to_redeem: U256,
    params: &RedeemParams,
) -> EncodedTransaction {
    let call = IStrategyVault::settleVaultPostMaturityCall {
        maturity,
        strategyTokensToRedeem: strategy_tokens_to_redeem,
        data: params.encode(),
    };
    EncodedTransaction::call(vault, &call)
}

/// Encode `settleVaultEmergency(maturity, redeemParams)`. The vault picks the
/// redeem amount itself.
pub fn encode_settle_vault_emergency(
    vault: Address,
    maturity: U256,
    params: &RedeemParams,
) -> EncodedTransaction {
    let call = IStrategyVault::settleVaultEmergencyCall {
        maturity,
        data: params.encode(),
    };
    EncodedTransaction::call(vault, &call)
}

/// Encode `reinvestReward((tradeData, minBPT))`.
pub fn encode_reinvest_reward(vault: Address, trade_data: Bytes, min_bpt: U256) -> EncodedTransaction {
    let call = IStrategyVault::reinvestRewardCall {
        params: IStrategyVault::ReinvestRewardParams {
            tradeData: trade_data,
            minBPT: min_bpt,
        },
    };
    EncodedTransaction::call(vault, &call)
}

/// Encode `setMaxOracleFreshness(seconds)` on the trading module.
pub fn encode_set_max_oracle_freshness(trading_module: Address, seconds: u32) -> EncodedTransaction {
    let call = ITradingModule::setMaxOracleFreshnessCall {
        maxOracleFreshnessInSeconds: seconds,
    };
    EncodedTransaction::call(trading_module, &call)
}

/// Encode `setTokenPermissions(sender, token, (allowSell, dexFlags, tradeTypeFlags))`.
pub fn encode_set_token_permissions(
    trading_module: Address,
    sender: Address,
    token: Address,
    allow_sell: bool,
    dex_flags: u32,
    trade_type_flags: u32,
) -> EncodedTransaction {
    let call = ITradingModule::setTokenPermissionsCall {
        sender,
        token,
        permissions: ITradingModule::TokenPermissions {
            allowSell: allow_sell,
            dexFlags: dex_flags,
            tradeTypeFlags: trade_type_flags,
        },
    };
    EncodedTransaction::call(trading_module, &call)
}
