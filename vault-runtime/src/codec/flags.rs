//! Packed boolean switches.
//!
//! Every helper here only ever sets bits: anything already set in the
//! existing value survives, whether or not it is named in the update.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::trade::{DexId, TradeType};
use crate::error::VaultToolsError;

/// Vault configuration switches, by bit index (LSB first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaultFlag {
    Enabled = 0,
    AllowRollPosition = 1,
    OnlyVaultEntry = 2,
    OnlyVaultExit = 3,
    OnlyVaultRoll = 4,
    OnlyVaultDeleverage = 5,
    OnlyVaultSettle = 6,
    TransferSharesOnDeleverage = 7,
    AllowReentrancy = 8,
}

impl VaultFlag {
    pub const ALL: [VaultFlag; 9] = [
        VaultFlag::Enabled,
        VaultFlag::AllowRollPosition,
        VaultFlag::OnlyVaultEntry,
        VaultFlag::OnlyVaultExit,
        VaultFlag::OnlyVaultRoll,
        VaultFlag::OnlyVaultDeleverage,
        VaultFlag::OnlyVaultSettle,
        VaultFlag::TransferSharesOnDeleverage,
        VaultFlag::AllowReentrancy,
    ];

    pub const fn bit(self) -> u16 {
        1 << self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            VaultFlag::Enabled => "ENABLED",
            VaultFlag::AllowRollPosition => "ALLOW_ROLL_POSITION",
            VaultFlag::OnlyVaultEntry => "ONLY_VAULT_ENTRY",
            VaultFlag::OnlyVaultExit => "ONLY_VAULT_EXIT",
            VaultFlag::OnlyVaultRoll => "ONLY_VAULT_ROLL",
            VaultFlag::OnlyVaultDeleverage => "ONLY_VAULT_DELEVERAGE",
            VaultFlag::OnlyVaultSettle => "ONLY_VAULT_SETTLE",
            VaultFlag::TransferSharesOnDeleverage => "TRANSFER_SHARES_ON_DELEVERAGE",
            VaultFlag::AllowReentrancy => "ALLOW_REENTRANCY",
        }
    }

    /// Whether this switch is set in `flags`.
    pub const fn is_set(self, flags: u16) -> bool {
        flags & self.bit() != 0
    }
}

impl fmt::Display for VaultFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VaultFlag {
    type Err = VaultToolsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VaultFlag::ALL
            .into_iter()
            .find(|flag| flag.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VaultToolsError::ConfigError(format!("Unknown vault flag '{s}'")))
    }
}

/// Set the named switches on top of `existing`.
pub fn compute_flags(existing: u16, switches: impl IntoIterator<Item = VaultFlag>) -> u16 {
    switches
        .into_iter()
        .fold(existing, |flags, switch| flags | switch.bit())
}

/// Trading module permission: DEXes a token may be sold on (bit = dex id).
pub fn compute_dex_flags(existing: u32, dexes: impl IntoIterator<Item = DexId>) -> u32 {
    dexes
        .into_iter()
        .fold(existing, |flags, dex| flags | (1 << dex.id()))
}

/// Trading module permission: allowed trade types (bit = trade type id).
pub fn compute_trade_type_flags(
    existing: u32,
    trade_types: impl IntoIterator<Item = TradeType>,
) -> u32 {
    trade_types
        .into_iter()
        .fold(existing, |flags, trade_type| flags | (1 << trade_type.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_from_zero() {
        assert_eq!(compute_flags(0, [VaultFlag::Enabled]), 1);
    }

    #[test]
    fn test_existing_bits_preserved() {
        assert_eq!(compute_flags(1, [VaultFlag::AllowRollPosition]), 3);
        // Bits outside the named table survive too.
        assert_eq!(compute_flags(0x8000, [VaultFlag::Enabled]), 0x8001);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = compute_flags(0, [VaultFlag::OnlyVaultSettle, VaultFlag::Enabled, VaultFlag::AllowReentrancy]);
        let b = compute_flags(0, [VaultFlag::AllowReentrancy, VaultFlag::Enabled, VaultFlag::OnlyVaultSettle]);
        assert_eq!(a, b);
        assert_eq!(a, 0b1_0100_0001);
    }

    #[test]
    fn test_no_switches_is_identity() {
        assert_eq!(compute_flags(0b1010, Vec::<VaultFlag>::new()), 0b1010);
    }

    #[test]
    fn test_all_switches() {
        assert_eq!(compute_flags(0, VaultFlag::ALL), 0x01FF);
        for flag in VaultFlag::ALL {
            assert!(flag.is_set(0x01FF));
            assert!(!flag.is_set(0));
        }
    }

    #[test]
    fn test_flag_names_round_trip() {
        for flag in VaultFlag::ALL {
            assert_eq!(flag.to_string().parse::<VaultFlag>().unwrap(), flag);
        }
        assert!("ALLOW_EVERYTHING".parse::<VaultFlag>().is_err());
    }

    #[test]
    fn test_dex_and_trade_type_flags() {
        assert_eq!(compute_dex_flags(0, [DexId::BalancerV2, DexId::Curve]), 0b11000);
        assert_eq!(compute_dex_flags(0b1, [DexId::UniswapV3]), 0b11);
        assert_eq!(compute_trade_type_flags(0, [TradeType::ExactInSingle]), 1);
        assert_eq!(
            compute_trade_type_flags(1, [TradeType::ExactInBatch, TradeType::ExactOutBatch]),
            0b1101
        );
    }
}
