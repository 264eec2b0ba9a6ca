//! Trade routing parameters and DEX-specific exchange data.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::aliases::U24;
use alloy::primitives::{Address, B256, Bytes, I256, U256};
use alloy::sol_types::{SolType, SolValue, sol_data};
use serde::{Deserialize, Serialize};

use super::abi;
use crate::error::VaultToolsError;

const MAX_UINT24: u32 = (1 << 24) - 1;

/// DEX identifiers understood by the trading module. Values are serialized
/// into trade data and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DexId {
    UniswapV2 = 0,
    UniswapV3 = 1,
    ZeroEx = 2,
    BalancerV2 = 3,
    Curve = 4,
    NotionalVault = 5,
}

/// Trade types understood by the trading module. Same stability rule as [`DexId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactInSingle = 0,
    ExactOutSingle = 1,
    ExactInBatch = 2,
    ExactOutBatch = 3,
}

impl DexId {
    pub const ALL: [DexId; 6] = [
        DexId::UniswapV2,
        DexId::UniswapV3,
        DexId::ZeroEx,
        DexId::BalancerV2,
        DexId::Curve,
        DexId::NotionalVault,
    ];

    pub const fn id(self) -> u16 {
        self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            DexId::UniswapV2 => "UNISWAP_V2",
            DexId::UniswapV3 => "UNISWAP_V3",
            DexId::ZeroEx => "ZERO_EX",
            DexId::BalancerV2 => "BALANCER_V2",
            DexId::Curve => "CURVE",
            DexId::NotionalVault => "NOTIONAL_VAULT",
        }
    }
}

impl TradeType {
    pub const ALL: [TradeType; 4] = [
        TradeType::ExactInSingle,
        TradeType::ExactOutSingle,
        TradeType::ExactInBatch,
        TradeType::ExactOutBatch,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            TradeType::ExactInSingle => "EXACT_IN_SINGLE",
            TradeType::ExactOutSingle => "EXACT_OUT_SINGLE",
            TradeType::ExactInBatch => "EXACT_IN_BATCH",
            TradeType::ExactOutBatch => "EXACT_OUT_BATCH",
        }
    }
}

impl TryFrom<u16> for DexId {
    type Error = VaultToolsError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        DexId::ALL
            .into_iter()
            .find(|dex| dex.id() == value)
            .ok_or_else(|| VaultToolsError::Decode(format!("Unknown dex id {value}")))
    }
}

impl TryFrom<u8> for TradeType {
    type Error = VaultToolsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TradeType::ALL
            .into_iter()
            .find(|t| t.id() == value)
            .ok_or_else(|| VaultToolsError::Decode(format!("Unknown trade type {value}")))
    }
}

impl fmt::Display for DexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DexId {
    type Err = VaultToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DexId::ALL
            .into_iter()
            .find(|dex| dex.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VaultToolsError::ConfigError(format!("Unknown dex '{s}'")))
    }
}

impl FromStr for TradeType {
    type Err = VaultToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TradeType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VaultToolsError::ConfigError(format!("Unknown trade type '{s}'")))
    }
}

/// `(uint24)` fee tier for a single-hop Uniswap V3 swap.
pub fn encode_single_swap_exchange_data(fee_tier: u32) -> Result<Bytes, VaultToolsError> {
    if fee_tier > MAX_UINT24 {
        return Err(VaultToolsError::EncodingRange {
            field: "feeTier",
            value: fee_tier.to_string(),
            abi_type: "uint24",
        });
    }
    let data = abi::SingleSwapData {
        fee: U24::from(fee_tier),
    };
    Ok(Bytes::from(data.abi_encode()))
}

/// `(bytes)` multi-hop path.
pub fn encode_batch_swap_exchange_data(path: &[u8]) -> Bytes {
    let data = abi::BatchSwapData {
        path: Bytes::copy_from_slice(path),
    };
    Bytes::from(data.abi_encode())
}

/// `(address[])` Uniswap V2 route.
pub fn encode_uniswap_v2_exchange_data(path: &[Address]) -> Bytes {
    let data = abi::UniV2Data {
        path: path.to_vec(),
    };
    Bytes::from(data.abi_encode())
}

/// `(bytes32)` Balancer V2 pool id for a single swap.
pub fn encode_balancer_single_exchange_data(pool_id: B256) -> Bytes {
    Bytes::from(abi::BalancerSingleData { poolId: pool_id }.abi_encode())
}

/// Packed Uniswap V3 multi-hop path: `token, fee, token, fee, …, token`.
///
/// Needs exactly one fee between each pair of tokens.
pub fn encode_uniswap_v3_path(tokens: &[Address], fees: &[u32]) -> Result<Bytes, VaultToolsError> {
    if tokens.len() < 2 || fees.len() != tokens.len() - 1 {
        return Err(VaultToolsError::ConfigError(format!(
            "Uniswap V3 path needs one fee per hop: {} tokens, {} fees",
            tokens.len(),
            fees.len()
        )));
    }

    let mut path = Vec::with_capacity(20 * tokens.len() + 3 * fees.len());
    for (token, fee) in tokens.iter().zip(fees) {
        if *fee > MAX_UINT24 {
            return Err(VaultToolsError::EncodingRange {
                field: "fee",
                value: fee.to_string(),
                abi_type: "uint24",
            });
        }
        path.extend(token.abi_encode_packed());
        path.extend(sol_data::Uint::<24>::abi_encode_packed(&U24::from(*fee)));
    }
    path.extend(tokens[tokens.len() - 1].abi_encode_packed());

    Ok(Bytes::from(path))
}

/// Balancer V2 batch swap data,
/// `((bytes32,uint256,uint256,uint256,bytes)[],address[],int256[])`.
pub fn encode_balancer_batch_exchange_data(
    swaps: &[abi::BatchSwapStep],
    assets: &[Address],
    limits: &[I256],
) -> Bytes {
    let data = abi::BalancerBatchData {
        swaps: swaps.to_vec(),
        assets: assets.to_vec(),
        limits: limits.to_vec(),
    };
    Bytes::from(data.abi_encode())
}

/// Exchange data for the common routes, tagged with the DEX it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeData {
    UniswapV3Single { fee_tier: u32 },
    UniswapV3Batch { path: Bytes },
    UniswapV2 { path: Vec<Address> },
    BalancerSingle { pool_id: B256 },
    /// Curve routes need no extra data.
    Curve,
}

impl ExchangeData {
    pub fn dex_id(&self) -> DexId {
        match self {
            ExchangeData::UniswapV3Single { .. } | ExchangeData::UniswapV3Batch { .. } => {
                DexId::UniswapV3
            }
            ExchangeData::UniswapV2 { .. } => DexId::UniswapV2,
            ExchangeData::BalancerSingle { .. } => DexId::BalancerV2,
            ExchangeData::Curve => DexId::Curve,
        }
    }

    pub fn encode(&self) -> Result<Bytes, VaultToolsError> {
        match self {
            ExchangeData::UniswapV3Single { fee_tier } => encode_single_swap_exchange_data(*fee_tier),
            ExchangeData::UniswapV3Batch { path } => Ok(encode_batch_swap_exchange_data(path)),
            ExchangeData::UniswapV2 { path } => Ok(encode_uniswap_v2_exchange_data(path)),
            ExchangeData::BalancerSingle { pool_id } => {
                Ok(encode_balancer_single_exchange_data(*pool_id))
            }
            ExchangeData::Curve => Ok(Bytes::new()),
        }
    }
}

/// Trade routing parameters, `(uint16,uint8,uint32,uint256,bytes)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeParameters {
    pub dex_id: DexId,
    pub trade_type: TradeType,
    /// Carried in a uint32 slot; larger values are rejected at encode time.
    pub amount: U256,
    pub slippage_limit: U256,
    pub exchange_data: Bytes,
}

impl TradeParameters {
    pub fn encode(&self) -> Result<Bytes, VaultToolsError> {
        if self.amount > U256::from(u32::MAX) {
            return Err(VaultToolsError::EncodingRange {
                field: "amount",
                value: self.amount.to_string(),
                abi_type: "uint32",
            });
        }
        let params = abi::TradeParams {
            dexId: self.dex_id.id(),
            tradeType: self.trade_type.id(),
            amount: self.amount.to::<u32>(),
            slippageLimit: self.slippage_limit,
            exchangeData: self.exchange_data.clone(),
        };
        Ok(Bytes::from(params.abi_encode()))
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let params = <abi::TradeParams as SolValue>::abi_decode(data)?;
        Ok(Self {
            dex_id: DexId::try_from(params.dexId)?,
            trade_type: TradeType::try_from(params.tradeType)?,
            amount: U256::from(params.amount),
            slippage_limit: params.slippageLimit,
            exchange_data: params.exchangeData,
        })
    }
}

pub fn encode_trade_params(
    dex_id: DexId,
    trade_type: TradeType,
    amount: U256,
    slippage_limit: U256,
    exchange_data: &[u8],
) -> Result<Bytes, VaultToolsError> {
    TradeParameters {
        dex_id,
        trade_type,
        amount,
        slippage_limit,
        exchange_data: Bytes::copy_from_slice(exchange_data),
    }
    .encode()
}

/// Trade parameters priced against the oracle, used when settling and
/// redeeming: `(uint16,uint8,uint32,bool,bytes)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicTradeParameters {
    pub dex_id: DexId,
    pub trade_type: TradeType,
    pub oracle_slippage_percent: u32,
    pub trade_unwrapped: bool,
    pub exchange_data: Bytes,
}

impl DynamicTradeParameters {
    pub fn to_abi(&self) -> abi::DynamicTradeParams {
        abi::DynamicTradeParams {
            dexId: self.dex_id.id(),
            tradeType: self.trade_type.id(),
            oracleSlippagePercent: self.oracle_slippage_percent,
            tradeUnwrapped: self.trade_unwrapped,
            exchangeData: self.exchange_data.clone(),
        }
    }

    pub fn encode(&self) -> Bytes {
        Bytes::from(self.to_abi().abi_encode())
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        <abi::DynamicTradeParams as SolValue>::abi_decode(data)?.try_into()
    }
}

impl TryFrom<abi::DynamicTradeParams> for DynamicTradeParameters {
    type Error = VaultToolsError;

    fn try_from(params: abi::DynamicTradeParams) -> Result<Self, Self::Error> {
        Ok(Self {
            dex_id: DexId::try_from(params.dexId)?,
            trade_type: TradeType::try_from(params.tradeType)?,
            oracle_slippage_percent: params.oracleSlippagePercent,
            trade_unwrapped: params.tradeUnwrapped,
            exchange_data: params.exchangeData,
        })
    }
}

pub fn encode_dynamic_trade_params(
    dex_id: DexId,
    trade_type: TradeType,
    oracle_slippage_percent: u32,
    trade_unwrapped: bool,
    exchange_data: &[u8],
) -> Bytes {
    DynamicTradeParameters {
        dex_id,
        trade_type,
        oracle_slippage_percent,
        trade_unwrapped,
        exchange_data: Bytes::copy_from_slice(exchange_data),
    }
    .encode()
}

/// A single trade as submitted to the trading module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub trade_type: TradeType,
    pub sell_token: Address,
    pub buy_token: Address,
    pub amount: U256,
    pub limit: U256,
    pub deadline: U256,
    pub exchange_data: Bytes,
}

impl TradeRequest {
    pub fn to_abi(&self) -> abi::Trade {
        abi::Trade {
            tradeType: self.trade_type.id(),
            sellToken: self.sell_token,
            buyToken: self.buy_token,
            amount: self.amount,
            limit: self.limit,
            deadline: self.deadline,
            exchangeData: self.exchange_data.clone(),
        }
    }

    pub fn encode(&self) -> Bytes {
        Bytes::from(self.to_abi().abi_encode())
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        <abi::Trade as SolValue>::abi_decode(data)?.try_into()
    }
}

impl TryFrom<abi::Trade> for TradeRequest {
    type Error = VaultToolsError;

    fn try_from(trade: abi::Trade) -> Result<Self, Self::Error> {
        Ok(Self {
            trade_type: TradeType::try_from(trade.tradeType)?,
            sell_token: trade.sellToken,
            buy_token: trade.buyToken,
            amount: trade.amount,
            limit: trade.limit,
            deadline: trade.deadline,
            exchange_data: trade.exchangeData,
        })
    }
}
