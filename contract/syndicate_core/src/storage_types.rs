use soroban_sdk::{contracttype, Address, BytesN};

// Storage keys for instance data (campaign-wide scalars, immutable config)
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Operator,
    PaymentToken,
    Fractionalizer,
    ResellerList,
    TargetList,
    NftContract,
    NftTokenId,
    MarketAdapter,
    AuctionId,
    HighestBid,
    MaxPrice,
    Fee,
    Gate,
    QuorumPercent,
    ExpirationTime,
    Status,
    TotalContributed,
    TotalSpent,
    ShareToken,
    ClaimableSupply,
    ResellerApproved,
}

// Storage keys for persistent data (per-contributor, per-proposal)
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Contribution(Address),
    Claimed(Address),
    // proposal hash -> cumulative support
    ResellerSupport(BytesN<32>),
    // (proposal hash, voter) -> true
    ResellerVote(BytesN<32>, Address),
}

/// Campaign lifecycle. Exactly one transition out of `Active`, irreversible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum SyndicateStatus {
    Active,
    Won,
    Lost,
}

/// Fee configuration, immutable after `init`.
///
/// `eth_fee_bps` is charged on the acquisition cost in the payment token;
/// `token_fee_bps` and `split_bps` are carved out of the minted share supply.
/// `resale_multiplier_bps` scales `total_spent` into the resale floor handed
/// to the fractionalizer (10_000 = break-even).
#[derive(Clone)]
#[contracttype]
pub struct FeeConfig {
    pub eth_fee_bps: u32,
    pub token_fee_bps: u32,
    pub resale_multiplier_bps: u32,
    pub split_recipient: Option<Address>,
    pub split_bps: u32,
}

/// Optional contribution gate: only holders of `token` with at least
/// `min_balance` may contribute.
#[derive(Clone)]
#[contracttype]
pub struct TokenGate {
    pub token: Address,
    pub min_balance: i128,
}

// Constants
pub const BASIS_POINTS: u32 = 10000;
// Share tokens minted per unit of total_spent
pub const TOKEN_SCALE: i128 = 1000;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
