//! Strategy vault settings and partial updates to them.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::contracts::IStrategyVault;

/// Settings held by a strategy vault, in `setStrategyVaultSettings` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyVaultSettings {
    pub max_underlying_surplus: U256,
    pub oracle_window_in_seconds: u32,
    pub settlement_slippage_limit_percent: u32,
    pub post_maturity_settlement_slippage_limit_percent: u32,
    pub emergency_settlement_slippage_limit_percent: u32,
    pub max_reward_trade_slippage_limit_percent: u32,
    pub max_balancer_pool_share: u16,
    pub settlement_cool_down_in_minutes: u16,
    pub oracle_price_deviation_limit_percent: u16,
}

/// Fields to change; anything left `None` keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultSettingsOverrides {
    pub max_underlying_surplus: Option<U256>,
    pub oracle_window_in_seconds: Option<u32>,
    pub settlement_slippage_limit_percent: Option<u32>,
    pub post_maturity_settlement_slippage_limit_percent: Option<u32>,
    pub emergency_settlement_slippage_limit_percent: Option<u32>,
    pub max_reward_trade_slippage_limit_percent: Option<u32>,
    pub max_balancer_pool_share: Option<u16>,
    pub settlement_cool_down_in_minutes: Option<u16>,
    pub oracle_price_deviation_limit_percent: Option<u16>,
}

impl VaultSettingsOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply `overrides` on top of `current`, returning the new settings.
pub fn build_vault_settings_update(
    current: &StrategyVaultSettings,
    overrides: &VaultSettingsOverrides,
) -> StrategyVaultSettings {
    StrategyVaultSettings {
        max_underlying_surplus: overrides
            .max_underlying_surplus
            .unwrap_or(current.max_underlying_surplus),
        oracle_window_in_seconds: overrides
            .oracle_window_in_seconds
            .unwrap_or(current.oracle_window_in_seconds),
        settlement_slippage_limit_percent: overrides
            .settlement_slippage_limit_percent
            .unwrap_or(current.settlement_slippage_limit_percent),
        post_maturity_settlement_slippage_limit_percent: overrides
            .post_maturity_settlement_slippage_limit_percent
            .unwrap_or(current.post_maturity_settlement_slippage_limit_percent),
        emergency_settlement_slippage_limit_percent: overrides
            .emergency_settlement_slippage_limit_percent
            .unwrap_or(current.emergency_settlement_slippage_limit_percent),
        max_reward_trade_slippage_limit_percent: overrides
            .max_reward_trade_slippage_limit_percent
            .unwrap_or(current.max_reward_trade_slippage_limit_percent),
        max_balancer_pool_share: overrides
            .max_balancer_pool_share
            .unwrap_or(current.max_balancer_pool_share),
        settlement_cool_down_in_minutes: overrides
            .settlement_cool_down_in_minutes
            .unwrap_or(current.settlement_cool_down_in_minutes),
        oracle_price_deviation_limit_percent: overrides
            .oracle_price_deviation_limit_percent
            .unwrap_or(current.oracle_price_deviation_limit_percent),
    }
}

impl From<StrategyVaultSettings> for IStrategyVault::StrategyVaultSettings {
    fn from(s: StrategyVaultSettings) -> Self {
        IStrategyVault::StrategyVaultSettings {
            maxUnderlyingSurplus: s.max_underlying_surplus,
            oracleWindowInSeconds: s.oracle_window_in_seconds,
            settlementSlippageLimitPercent: s.settlement_slippage_limit_percent,
            postMaturitySettlementSlippageLimitPercent: s
                .post_maturity_settlement_slippage_limit_percent,
            emergencySettlementSlippageLimitPercent: s.emergency_settlement_slippage_limit_percent,
            maxRewardTradeSlippageLimitPercent: s.max_reward_trade_slippage_limit_percent,
            maxBalancerPoolShare: s.max_balancer_pool_share,
            settlementCoolDownInMinutes: s.settlement_cool_down_in_minutes,
            oraclePriceDeviationLimitPercent: s.oracle_price_deviation_limit_percent,
        }
    }
}

impl From<IStrategyVault::StrategyVaultSettings> for StrategyVaultSettings {
    fn from(s: IStrategyVault::StrategyVaultSettings) -> Self {
        StrategyVaultSettings {
            max_underlying_surplus: s.maxUnderlyingSurplus,
            oracle_window_in_seconds: s.oracleWindowInSeconds,
            settlement_slippage_limit_percent: s.settlementSlippageLimitPercent,
            post_maturity_settlement_slippage_limit_percent: s
                .postMaturitySettlementSlippageLimitPercent,
            emergency_settlement_slippage_limit_percent: s.emergencySettlementSlippageLimitPercent,
            max_reward_trade_slippage_limit_percent: s.maxRewardTradeSlippageLimitPercent,
            max_balancer_pool_share: s.maxBalancerPoolShare,
            settlement_cool_down_in_minutes: s.settlementCoolDownInMinutes,
            oracle_price_deviation_limit_percent: s.oraclePriceDeviationLimitPercent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> StrategyVaultSettings {
        StrategyVaultSettings {
            max_underlying_surplus: U256::from(10u64).pow(U256::from(24u64)),
            oracle_window_in_seconds: 3600,
            settlement_slippage_limit_percent: 5_000_000,
            post_maturity_settlement_slippage_limit_percent: 10_000_000,
            emergency_settlement_slippage_limit_percent: 10_000_000,
            max_reward_trade_slippage_limit_percent: 5_000_000,
            max_balancer_pool_share: 2000,
            settlement_cool_down_in_minutes: 60,
            oracle_price_deviation_limit_percent: 100,
        }
    }

    #[test]
    fn test_empty_overrides_is_identity() {
        let settings = current();
        let overrides = VaultSettingsOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(build_vault_settings_update(&settings, &overrides), settings);
    }

    #[test]
    fn test_partial_update_leaves_current_untouched() {
        let settings = current();
        let overrides = VaultSettingsOverrides {
            max_balancer_pool_share: Some(1000),
            oracle_window_in_seconds: Some(600),
            ..Default::default()
        };
        let updated = build_vault_settings_update(&settings, &overrides);

        assert_eq!(updated.max_balancer_pool_share, 1000);
        assert_eq!(updated.oracle_window_in_seconds, 600);
        assert_eq!(updated.settlement_cool_down_in_minutes, 60);
        assert_eq!(updated.max_underlying_surplus, settings.max_underlying_surplus);
        assert_eq!(settings.max_balancer_pool_share, 2000);
    }

    #[test]
    fn test_sol_round_trip() {
        let settings = current();
        let sol = IStrategyVault::StrategyVaultSettings::from(settings);
        assert_eq!(sol.settlementCoolDownInMinutes, 60);
        assert_eq!(StrategyVaultSettings::from(sol), settings);
    }
}
