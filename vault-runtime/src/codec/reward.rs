//! `reinvestReward` payloads: how claimed reward tokens get sold back into
//! the vault's pool tokens.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;

use super::abi;
use super::trade::{DexId, DynamicTradeParameters, TradeRequest};
use crate::error::VaultToolsError;

/// Two explicit trades, one into each pool token:
/// `(uint16,Trade,uint16,Trade)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardTradePair {
    pub primary_dex: DexId,
    pub primary_trade: TradeRequest,
    pub secondary_dex: DexId,
    pub secondary_trade: TradeRequest,
}

impl RewardTradePair {
    pub fn encode(&self) -> Bytes {
        let params = abi::RewardTradePair {
            primaryDexId: self.primary_dex.id(),
            primaryTrade: self.primary_trade.to_abi(),
            secondaryDexId: self.secondary_dex.id(),
            secondaryTrade: self.secondary_trade.to_abi(),
        };
        Bytes::from(params.abi_encode())
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let params = abi::RewardTradePair::abi_decode(data)?;
        Ok(Self {
            primary_dex: DexId::try_from(params.primaryDexId)?,
            primary_trade: params.primaryTrade.try_into()?,
            secondary_dex: DexId::try_from(params.secondaryDexId)?,
            secondary_trade: params.secondaryTrade.try_into()?,
        })
    }
}

/// Sell `amount` of one reward token for one pool token, priced against
/// the oracle: `(address,address,uint256,(uint16,uint8,uint32,bool,bytes))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSidedRewardTrade {
    pub sell_token: Address,
    pub buy_token: Address,
    pub amount: U256,
    pub trade_params: DynamicTradeParameters,
}

impl SingleSidedRewardTrade {
    fn to_abi(&self) -> abi::SingleSidedRewardTradeParams {
        abi::SingleSidedRewardTradeParams {
            sellToken: self.sell_token,
            buyToken: self.buy_token,
            amount: self.amount,
            tradeParams: self.trade_params.to_abi(),
        }
    }

    pub fn encode(&self) -> Bytes {
        Bytes::from(self.to_abi().abi_encode())
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        abi::SingleSidedRewardTradeParams::abi_decode(data)?.try_into()
    }
}

impl TryFrom<abi::SingleSidedRewardTradeParams> for SingleSidedRewardTrade {
    type Error = VaultToolsError;

    fn try_from(params: abi::SingleSidedRewardTradeParams) -> Result<Self, Self::Error> {
        Ok(Self {
            sell_token: params.sellToken,
            buy_token: params.buyToken,
            amount: params.amount,
            trade_params: params.tradeParams.try_into()?,
        })
    }
}

/// Reward split across both tokens of a two-token pool so the join stays
/// balanced. A zero `buy_token` on either leg means "keep the reward as is".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedRewardTrade {
    pub primary: SingleSidedRewardTrade,
    pub secondary: SingleSidedRewardTrade,
}

impl BalancedRewardTrade {
    pub fn encode(&self) -> Bytes {
        let params = abi::Balanced2TokenRewardTradeParams {
            primaryTrade: self.primary.to_abi(),
            secondaryTrade: self.secondary.to_abi(),
        };
        Bytes::from(params.abi_encode())
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let params = abi::Balanced2TokenRewardTradeParams::abi_decode(data)?;
        Ok(Self {
            primary: params.primaryTrade.try_into()?,
            secondary: params.secondaryTrade.try_into()?,
        })
    }
}

pub fn encode_reward_trade_pair_params(
    primary_dex: DexId,
    primary_trade: TradeRequest,
    secondary_dex: DexId,
    secondary_trade: TradeRequest,
) -> Bytes {
    RewardTradePair {
        primary_dex,
        primary_trade,
        secondary_dex,
        secondary_trade,
    }
    .encode()
}

pub fn encode_single_sided_reward_trade_params(
    sell_token: Address,
    buy_token: Address,
    amount: U256,
    trade_params: DynamicTradeParameters,
) -> Bytes {
    SingleSidedRewardTrade {
        sell_token,
        buy_token,
        amount,
        trade_params,
    }
    .encode()
}

pub fn encode_balanced_reward_trade_params(
    primary: SingleSidedRewardTrade,
    secondary: SingleSidedRewardTrade,
) -> Bytes {
    BalancedRewardTrade { primary, secondary }.encode()
}
