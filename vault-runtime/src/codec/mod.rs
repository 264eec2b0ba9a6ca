//! Pure builders and encoders for the tuples vault contracts consume.
//!
//! Every blob is the standard ABI encoding of a single tuple argument, so
//! dynamic tuples start with a 32-byte offset word.

pub mod abi;
pub mod flags;
pub mod params;
pub mod reward;
pub mod trade;
pub mod vault_config;
pub mod vault_settings;

pub use flags::{VaultFlag, compute_dex_flags, compute_flags, compute_trade_type_flags};
pub use params::{
    CrossCurrencyDepositParams, CrossCurrencyRedeemParams, DepositParams, RedeemParams,
    encode_cross_currency_deposit_params, encode_cross_currency_redeem_params, encode_deposit_params,
    encode_redeem_params,
};
pub use reward::{
    BalancedRewardTrade, RewardTradePair, SingleSidedRewardTrade, encode_balanced_reward_trade_params,
    encode_reward_trade_pair_params, encode_single_sided_reward_trade_params,
};
pub use trade::{
    DexId, DynamicTradeParameters, ExchangeData, TradeParameters, TradeRequest, TradeType,
    encode_balancer_batch_exchange_data, encode_balancer_single_exchange_data,
    encode_batch_swap_exchange_data,
    encode_dynamic_trade_params, encode_single_swap_exchange_data, encode_trade_params,
    encode_uniswap_v2_exchange_data, encode_uniswap_v3_path,
};
pub use vault_config::{VaultConfig, VaultConfigOptions, build_vault_config};
pub use vault_settings::{StrategyVaultSettings, VaultSettingsOverrides, build_vault_settings_update};
