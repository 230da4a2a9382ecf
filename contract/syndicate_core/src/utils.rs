use soroban_sdk::Env;

use crate::storage_types::{PersistentKey, BASIS_POINTS, TTL_INSTANCE, TTL_PERSISTENT};

pub fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

pub fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

/// Basis-points share of an amount, floor division.
pub fn bps_share(amount: i128, bps: u32) -> i128 {
    (amount * bps as i128) / BASIS_POINTS as i128
}

/// The largest amount the pool can commit to an acquisition while keeping
/// the fee covered: `total * 10000 / (10000 + eth_fee_bps)`, floored.
/// For any offer at or below this, `offer + bps_share(offer, eth_fee_bps)`
/// never exceeds `total`.
pub fn max_offer(total: i128, eth_fee_bps: u32) -> i128 {
    (total * BASIS_POINTS as i128) / (BASIS_POINTS as i128 + eth_fee_bps as i128)
}
