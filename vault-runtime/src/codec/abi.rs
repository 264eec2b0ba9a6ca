//! Solidity tuple shapes the vault and trading contracts decode.
//!
//! Field order and widths are load-bearing; do not reorder.

use alloy::sol;

sol! {
    #![sol(all_derives = true)]

    /// `(uint24)`: Uniswap V3 single-hop data.
    struct SingleSwapData {
        uint24 fee;
    }

    /// `(bytes)`: encoded multi-hop path.
    struct BatchSwapData {
        bytes path;
    }

    /// `(address[])`: Uniswap V2 route.
    struct UniV2Data {
        address[] path;
    }

    /// `(bytes32)`: Balancer V2 single swap.
    struct BalancerSingleData {
        bytes32 poolId;
    }

    struct TradeParams {
        uint16 dexId;
        uint8 tradeType;
        uint32 amount;
        uint256 slippageLimit;
        bytes exchangeData;
    }

    struct DynamicTradeParams {
        uint16 dexId;
        uint8 tradeType;
        uint32 oracleSlippagePercent;
        bool tradeUnwrapped;
        bytes exchangeData;
    }

    struct Trade {
        uint8 tradeType;
        address sellToken;
        address buyToken;
        uint256 amount;
        uint256 limit;
        uint256 deadline;
        bytes exchangeData;
    }

    struct DepositParams {
        uint256 minPoolTokenOut;
        uint256 secondaryBorrowAmount;
        uint32 secondaryBorrowLimit;
        uint32 secondaryRollLendLimit;
        bytes tradeData;
    }

    struct RedeemParams {
        uint32 secondarySlippageLimit;
        uint256 minPrimary;
        uint256 minSecondary;
        bytes secondaryTradeParams;
    }

    /// One step of a Balancer V2 batch swap.
    struct BatchSwapStep {
        bytes32 poolId;
        uint256 assetInIndex;
        uint256 assetOutIndex;
        uint256 amount;
        bytes userData;
    }

    /// `((bytes32,uint256,uint256,uint256,bytes)[],address[],int256[])`
    struct BalancerBatchData {
        BatchSwapStep[] swaps;
        address[] assets;
        int256[] limits;
    }

    /// Reward sale routed as two trades, one per pool token.
    struct RewardTradePair {
        uint16 primaryDexId;
        Trade primaryTrade;
        uint16 secondaryDexId;
        Trade secondaryTrade;
    }

    struct SingleSidedRewardTradeParams {
        address sellToken;
        address buyToken;
        uint256 amount;
        DynamicTradeParams tradeParams;
    }

    struct Balanced2TokenRewardTradeParams {
        SingleSidedRewardTradeParams primaryTrade;
        SingleSidedRewardTradeParams secondaryTrade;
    }

    /// Cross currency fCash vault entry/exit: `(uint256,uint32,uint16,bytes)`.
    /// The rate limit is the min lend rate on entry, the min borrow rate on exit.
    struct CrossCurrencyParams {
        uint256 minPurchaseAmount;
        uint32 rateLimit;
        uint16 dexId;
        bytes exchangeData;
    }
}
