//! Shared Solidity contract bindings for the vault system.
//!
//! Uses alloy's `sol!` macro to generate type-safe ABI encoders/decoders
//! for Notional, the strategy vaults and the trading module.

use alloy::sol;

sol! {
    #![sol(all_derives = true)]

    #[sol(rpc)]
    interface INotionalVaults {
        struct VaultConfigParams {
            uint16 flags;
            uint16 borrowCurrencyId;
            uint256 minAccountBorrowSize;
            uint16 minCollateralRatioBPS;
            uint8 feeRate5BPS;
            uint8 liquidationRate;
            uint8 reserveFeeShare;
            uint8 maxBorrowMarketIndex;
            uint16 maxDeleverageCollateralRatioBPS;
            uint16[3] secondaryBorrowCurrencies;
        }

        function updateVault(address vaultAddress, VaultConfigParams calldata vaultConfig, uint80 maxPrimaryBorrowCapacity) external;
        function setVaultPauseStatus(address vaultAddress, bool enable) external;

        function enterVault(
            address account, address vault, uint256 depositAmountExternal, uint256 maturity,
            uint256 fCash, uint32 maxBorrowRate, bytes calldata vaultData
        ) external payable returns (uint256 strategyTokensAdded);

        function exitVault(
            address account, address vault, address receiver, uint256 vaultSharesToRedeem,
            uint256 lendAmount, uint32 minLendRate, bytes calldata exitVaultData
        ) external payable returns (uint256 underlyingToReceiver);
    }

    #[sol(rpc)]
    interface IStrategyVault {
        struct StrategyVaultSettings {
            uint256 maxUnderlyingSurplus;
            uint32 oracleWindowInSeconds;
            uint32 settlementSlippageLimitPercent;
            uint32 postMaturitySettlementSlippageLimitPercent;
            uint32 emergencySettlementSlippageLimitPercent;
            uint32 maxRewardTradeSlippageLimitPercent;
            uint16 maxBalancerPoolShare;
            uint16 settlementCoolDownInMinutes;
            uint16 oraclePriceDeviationLimitPercent;
        }

        /// `tradeData` is one of the reward trade payloads.
        struct ReinvestRewardParams {
            bytes tradeData;
            uint256 minBPT;
        }

        function setStrategyVaultSettings(StrategyVaultSettings calldata settings) external;
        function settleVaultNormal(uint256 maturity, uint256 strategyTokensToRedeem, bytes calldata data) external;
        function settleVaultPostMaturity(uint256 maturity, uint256 strategyTokensToRedeem, bytes calldata data) external;
        function settleVaultEmergency(uint256 maturity, bytes calldata data) external;
        function reinvestReward(ReinvestRewardParams calldata params) external;
    }

    #[sol(rpc)]
    interface ITradingModule {
        struct TokenPermissions {
            bool allowSell;
            uint32 dexFlags;
            uint32 tradeTypeFlags;
        }

        function setTokenPermissions(address sender, address token, TokenPermissions calldata permissions) external;
        function setMaxOracleFreshness(uint32 maxOracleFreshnessInSeconds) external;
    }
}
