//! Vault configuration tuple passed to `updateVault`.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::contracts::INotionalVaults::VaultConfigParams;

/// The ten-field vault configuration, in the order Notional expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultConfig {
    pub flags: u16,
    pub currency_id: u16,
    pub min_account_borrow_size: U256,
    #[serde(rename = "minCollateralRatioBPS")]
    pub min_collateral_ratio_bps: u16,
    #[serde(rename = "feeRate5BPS")]
    pub fee_rate_5bps: u8,
    pub liquidation_rate: u8,
    pub reserve_fee_share: u8,
    pub max_borrow_market_index: u8,
    #[serde(rename = "maxDeleverageCollateralRatioBPS")]
    pub max_deleverage_collateral_ratio_bps: u16,
    pub secondary_borrow_currencies: [u16; 3],
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            flags: 0,
            currency_id: 1,
            min_account_borrow_size: U256::from(100_000u64),
            min_collateral_ratio_bps: 2000,
            fee_rate_5bps: 20,
            liquidation_rate: 104,
            reserve_fee_share: 20,
            max_borrow_market_index: 2,
            max_deleverage_collateral_ratio_bps: 4000,
            secondary_borrow_currencies: [0, 0, 0],
        }
    }
}

impl VaultConfig {
    /// Field values in tuple order, as they would be printed by a script.
    pub fn as_tuple(
        &self,
    ) -> (u16, u16, U256, u16, u8, u8, u8, u8, u16, [u16; 3]) {
        (
            self.flags,
            self.currency_id,
            self.min_account_borrow_size,
            self.min_collateral_ratio_bps,
            self.fee_rate_5bps,
            self.liquidation_rate,
            self.reserve_fee_share,
            self.max_borrow_market_index,
            self.max_deleverage_collateral_ratio_bps,
            self.secondary_borrow_currencies,
        )
    }
}

/// Named overrides for [`build_vault_config`]. Unset fields take the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultConfigOptions {
    pub flags: Option<u16>,
    pub currency_id: Option<u16>,
    pub min_account_borrow_size: Option<U256>,
    #[serde(rename = "minCollateralRatioBPS")]
    pub min_collateral_ratio_bps: Option<u16>,
    #[serde(rename = "feeRate5BPS")]
    pub fee_rate_5bps: Option<u8>,
    pub liquidation_rate: Option<u8>,
    pub reserve_fee_share: Option<u8>,
    pub max_borrow_market_index: Option<u8>,
    #[serde(rename = "maxDeleverageCollateralRatioBPS")]
    pub max_deleverage_collateral_ratio_bps: Option<u16>,
    pub secondary_borrow_currencies: Option<[u16; 3]>,
}

/// Merge `options` over the default configuration.
///
/// Values are not range-checked beyond their field types; Notional enforces
/// its own invariants on `updateVault`.
pub fn build_vault_config(options: &VaultConfigOptions) -> VaultConfig {
    let defaults = VaultConfig::default();
    VaultConfig {
        flags: options.flags.unwrap_or(defaults.flags),
        currency_id: options.currency_id.unwrap_or(defaults.currency_id),
        min_account_borrow_size: options
            .min_account_borrow_size
            .unwrap_or(defaults.min_account_borrow_size),
        min_collateral_ratio_bps: options
            .min_collateral_ratio_bps
            .unwrap_or(defaults.min_collateral_ratio_bps),
        fee_rate_5bps: options.fee_rate_5bps.unwrap_or(defaults.fee_rate_5bps),
        liquidation_rate: options.liquidation_rate.unwrap_or(defaults.liquidation_rate),
        reserve_fee_share: options.reserve_fee_share.unwrap_or(defaults.reserve_fee_share),
        max_borrow_market_index: options
            .max_borrow_market_index
            .unwrap_or(defaults.max_borrow_market_index),
        max_deleverage_collateral_ratio_bps: options
            .max_deleverage_collateral_ratio_bps
            .unwrap_or(defaults.max_deleverage_collateral_ratio_bps),
        secondary_borrow_currencies: options
            .secondary_borrow_currencies
            .unwrap_or(defaults.secondary_borrow_currencies),
    }
}

impl From<VaultConfig> for VaultConfigParams {
    fn from(config: VaultConfig) -> Self {
        VaultConfigParams {
            flags: config.flags,
            borrowCurrencyId: config.currency_id,
            minAccountBorrowSize: config.min_account_borrow_size,
            minCollateralRatioBPS: config.min_collateral_ratio_bps,
            feeRate5BPS: config.fee_rate_5bps,
            liquidationRate: config.liquidation_rate,
            reserveFeeShare: config.reserve_fee_share,
            maxBorrowMarketIndex: config.max_borrow_market_index,
            maxDeleverageCollateralRatioBPS: config.max_deleverage_collateral_ratio_bps,
            secondaryBorrowCurrencies: config.secondary_borrow_currencies,
        }
    }
}

impl From<VaultConfigParams> for VaultConfig {
    fn from(params: VaultConfigParams) -> Self {
        VaultConfig {
            flags: params.flags,
            currency_id: params.borrowCurrencyId,
            min_account_borrow_size: params.minAccountBorrowSize,
            min_collateral_ratio_bps: params.minCollateralRatioBPS,
            fee_rate_5bps: params.feeRate5BPS,
            liquidation_rate: params.liquidationRate,
            reserve_fee_share: params.reserveFeeShare,
            max_borrow_market_index: params.maxBorrowMarketIndex,
            max_deleverage_collateral_ratio_bps: params.maxDeleverageCollateralRatioBPS,
            secondary_borrow_currencies: params.secondaryBorrowCurrencies,
        }
    }
}
