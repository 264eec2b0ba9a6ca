//! Vault entry and exit payloads (`vaultData` for enterVault / exitVault).

use alloy::primitives::{Bytes, U256};
use alloy::sol_types::SolValue;

use super::abi;
use super::trade::{DexId, ExchangeData};
use crate::error::VaultToolsError;

/// Deposit payload, `(uint256,uint256,uint32,uint32,bytes)`.
///
/// The secondary borrow and roll-lend limits are always encoded as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositParams {
    pub min_pool_token_out: U256,
    pub secondary_borrow_amount: U256,
    pub trade_data: Bytes,
}

impl DepositParams {
    pub fn encode(&self) -> Bytes {
        let params = abi::DepositParams {
            minPoolTokenOut: self.min_pool_token_out,
            secondaryBorrowAmount: self.secondary_borrow_amount,
            secondaryBorrowLimit: 0,
            secondaryRollLendLimit: 0,
            tradeData: self.trade_data.clone(),
        };
        Bytes::from(params.abi_encode())
    }

    /// Inverse of [`encode`](Self::encode). Non-zero limit fields are
    /// accepted and dropped.
    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let params = abi::DepositParams::abi_decode(data)?;
        Ok(Self {
            min_pool_token_out: params.minPoolTokenOut,
            secondary_borrow_amount: params.secondaryBorrowAmount,
            trade_data: params.tradeData,
        })
    }
}

pub fn encode_deposit_params(
    min_pool_token_out: U256,
    secondary_borrow_amount: U256,
    trade_bytes: &[u8],
) -> Bytes {
    DepositParams {
        min_pool_token_out,
        secondary_borrow_amount,
        trade_data: Bytes::copy_from_slice(trade_bytes),
    }
    .encode()
}

/// Redeem payload, `(uint32,uint256,uint256,bytes)`, with the secondary
/// slippage limit fixed at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedeemParams {
    pub min_primary: U256,
    pub min_secondary: U256,
    pub secondary_trade_params: Bytes,
}

impl RedeemParams {
    pub fn encode(&self) -> Bytes {
        let params = abi::RedeemParams {
            secondarySlippageLimit: 0,
            minPrimary: self.min_primary,
            minSecondary: self.min_secondary,
            secondaryTradeParams: self.secondary_trade_params.clone(),
        };
        Bytes::from(params.abi_encode())
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let params = abi::RedeemParams::abi_decode(data)?;
        Ok(Self {
            min_primary: params.minPrimary,
            min_secondary: params.minSecondary,
            secondary_trade_params: params.secondaryTradeParams,
        })
    }
}

pub fn encode_redeem_params(
    min_primary: U256,
    min_secondary: U256,
    secondary_trade_params: &[u8],
) -> Bytes {
    RedeemParams {
        min_primary,
        min_secondary,
        secondary_trade_params: Bytes::copy_from_slice(secondary_trade_params),
    }
    .encode()
}

/// Cross currency fCash vault entry payload, `(uint256,uint32,uint16,bytes)`.
/// The deposit is traded into the lending currency along `dex_id` before
/// lending at no less than `min_lend_rate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCurrencyDepositParams {
    pub min_purchase_amount: U256,
    pub min_lend_rate: u32,
    pub dex_id: DexId,
    pub exchange_data: Bytes,
}

impl CrossCurrencyDepositParams {
    /// Build from a tagged route; the dex id follows the exchange data.
    pub fn new(
        min_purchase_amount: U256,
        min_lend_rate: u32,
        exchange: &ExchangeData,
    ) -> Result<Self, VaultToolsError> {
        Ok(Self {
            min_purchase_amount,
            min_lend_rate,
            dex_id: exchange.dex_id(),
            exchange_data: exchange.encode()?,
        })
    }

    pub fn encode(&self) -> Bytes {
        encode_cross_currency(self.min_purchase_amount, self.min_lend_rate, self.dex_id, &self.exchange_data)
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let (min_purchase_amount, min_lend_rate, dex_id, exchange_data) = decode_cross_currency(data)?;
        Ok(Self {
            min_purchase_amount,
            min_lend_rate,
            dex_id,
            exchange_data,
        })
    }
}

/// Cross currency fCash vault exit payload. Same shape as the deposit, with
/// the rate slot holding the min borrow rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCurrencyRedeemParams {
    pub min_purchase_amount: U256,
    pub min_borrow_rate: u32,
    pub dex_id: DexId,
    pub exchange_data: Bytes,
}

impl CrossCurrencyRedeemParams {
    pub fn new(
        min_purchase_amount: U256,
        min_borrow_rate: u32,
        exchange: &ExchangeData,
    ) -> Result<Self, VaultToolsError> {
        Ok(Self {
            min_purchase_amount,
            min_borrow_rate,
            dex_id: exchange.dex_id(),
            exchange_data: exchange.encode()?,
        })
    }

    pub fn encode(&self) -> Bytes {
        encode_cross_currency(self.min_purchase_amount, self.min_borrow_rate, self.dex_id, &self.exchange_data)
    }

    pub fn decode(data: &[u8]) -> Result<Self, VaultToolsError> {
        let (min_purchase_amount, min_borrow_rate, dex_id, exchange_data) = decode_cross_currency(data)?;
        Ok(Self {
            min_purchase_amount,
            min_borrow_rate,
            dex_id,
            exchange_data,
        })
    }
}

/// Entry payload for a cross currency vault, routed through `exchange`.
pub fn encode_cross_currency_deposit_params(
    min_purchase_amount: U256,
    min_lend_rate: u32,
    exchange: &ExchangeData,
) -> Result<Bytes, VaultToolsError> {
    Ok(CrossCurrencyDepositParams::new(min_purchase_amount, min_lend_rate, exchange)?.encode())
}

/// Exit payload for a cross currency vault, routed through `exchange`.
pub fn encode_cross_currency_redeem_params(
    min_purchase_amount: U256,
    min_borrow_rate: u32,
    exchange: &ExchangeData,
) -> Result<Bytes, VaultToolsError> {
    Ok(CrossCurrencyRedeemParams::new(min_purchase_amount, min_borrow_rate, exchange)?.encode())
}

fn encode_cross_currency(min_purchase_amount: U256, rate_limit: u32, dex_id: DexId, exchange_data: &Bytes) -> Bytes {
    let params = abi::CrossCurrencyParams {
        minPurchaseAmount: min_purchase_amount,
        rateLimit: rate_limit,
        dexId: dex_id.id(),
        exchangeData: exchange_data.clone(),
    };
    Bytes::from(params.abi_encode())
}

fn decode_cross_currency(data: &[u8]) -> Result<(U256, u32, DexId, Bytes), VaultToolsError> {
    let params = abi::CrossCurrencyParams::abi_decode(data)?;
    Ok((
        params.minPurchaseAmount,
        params.rateLimit,
        DexId::try_from(params.dexId)?,
        params.exchangeData,
    ))
}
