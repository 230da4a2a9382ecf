//! Capability surfaces of the external collaborators the campaign engine
//! drives. One client per collaborator; the engine never branches on which
//! marketplace or vault sits behind an address.

use soroban_sdk::{contractclient, Address, Env};

/// Uniform capability over one third-party auction. Untrusted but
/// cooperative: unexpected reverts propagate as the calling operation's
/// failure, except where the engine explicitly tolerates them via `try_`
/// calls (finalization of a dead market).
#[contractclient(name = "MarketAdapterClient")]
pub trait MarketAdapter {
    /// Minimum acceptable next bid (the reserve before any bid).
    fn current_price(env: Env, auction_id: u64) -> i128;

    /// Record `amount` from `bidder` as the new leading bid. The offer is
    /// escrowed with the adapter before this call; the adapter returns the
    /// previous leader's escrow.
    fn place_bid(env: Env, auction_id: u64, bidder: Address, amount: i128);

    /// Settle the auction once it is over. Tolerates repeat invocation.
    fn finalize_auction(env: Env, auction_id: u64);

    /// Whether `bidder` leads (auction open) or won (auction settled).
    fn is_winner(env: Env, auction_id: u64, bidder: Address) -> bool;

    fn auction_open(env: Env, auction_id: u64) -> bool;
}

/// Fractional-ownership vault. Mints `supply` share tokens to `recipient`
/// against the asset, records `reserve_price` as the resale floor, and
/// returns the share-token contract address.
#[contractclient(name = "FractionalizerClient")]
pub trait Fractionalizer {
    fn fractionalize(
        env: Env,
        asset: Address,
        token_id: u64,
        reserve_price: i128,
        supply: i128,
        recipient: Address,
    ) -> Address;
}

/// Owner-curated address list (buy targets, resale channels).
#[contractclient(name = "AllowListClient")]
pub trait AllowList {
    fn is_allowed(env: Env, target: Address) -> bool;
}

/// Minimal non-fungible surface the engine needs: custody checks and
/// routing of the single target asset.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungible {
    fn owner(env: Env, token_id: u64) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u64);
}
