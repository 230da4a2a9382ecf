//! Contribution ledger shared by both acquisition variants: cumulative
//! per-contributor deposits, the running pool total, and campaign-active
//! gating.

use soroban_sdk::{token, Address, Env};

use crate::events::{self, ContributedEvent};
use crate::storage_types::{
    DataKey, FeeConfig, PersistentKey, SyndicateStatus, TokenGate, BASIS_POINTS,
};
use crate::utils::{extend_instance, extend_persistent};

/// Shared half of campaign construction. The variant contract stores its own
/// keys (market/auction id, max price, target list) on top of this.
pub fn init_common(
    env: &Env,
    operator: Address,
    nft_contract: Address,
    nft_token_id: u64,
    payment_token: Address,
    fractionalizer: Address,
    reseller_list: Address,
    expiration_time: u64,
    fee: FeeConfig,
    gate: Option<TokenGate>,
    quorum_percent: u32,
) {
    if env.storage().instance().has(&DataKey::Operator) {
        panic!("already initialized");
    }
    validate_fee(&fee);
    if quorum_percent == 0 || quorum_percent > 100 {
        panic!("invalid quorum percent");
    }

    env.storage().instance().set(&DataKey::Operator, &operator);
    env.storage().instance().set(&DataKey::NftContract, &nft_contract);
    env.storage().instance().set(&DataKey::NftTokenId, &nft_token_id);
    env.storage().instance().set(&DataKey::PaymentToken, &payment_token);
    env.storage().instance().set(&DataKey::Fractionalizer, &fractionalizer);
    env.storage().instance().set(&DataKey::ResellerList, &reseller_list);
    env.storage().instance().set(&DataKey::ExpirationTime, &expiration_time);
    env.storage().instance().set(&DataKey::Fee, &fee);
    if let Some(gate) = gate {
        env.storage().instance().set(&DataKey::Gate, &gate);
    }
    env.storage().instance().set(&DataKey::QuorumPercent, &quorum_percent);
    env.storage().instance().set(&DataKey::Status, &SyndicateStatus::Active);
    env.storage().instance().set(&DataKey::TotalContributed, &0i128);
    env.storage().instance().set(&DataKey::TotalSpent, &0i128);

    extend_instance(env);
}

fn validate_fee(fee: &FeeConfig) {
    if fee.eth_fee_bps >= BASIS_POINTS {
        panic!("eth fee too high");
    }
    if fee.token_fee_bps + fee.split_bps >= BASIS_POINTS {
        panic!("token fee and split too high");
    }
    if fee.resale_multiplier_bps == 0 {
        panic!("resale multiplier must be positive");
    }
    if fee.split_bps > 0 && fee.split_recipient.is_none() {
        panic!("split recipient not set");
    }
}

/// Record a deposit. `cap` is the direct-buy contribution ceiling
/// (`None` for the auction variant, which is bounded only by what the pool
/// can actually spend).
pub fn contribute(env: &Env, contributor: Address, amount: i128, cap: Option<i128>) {
    contributor.require_auth();
    require_active(env);

    if amount <= 0 {
        panic!("must contribute more than 0");
    }

    if let Some(gate) = env.storage().instance().get::<DataKey, TokenGate>(&DataKey::Gate) {
        let balance = token::Client::new(env, &gate.token).balance(&contributor);
        if balance < gate.min_balance {
            panic!("must hold gate token to contribute");
        }
    }

    let previous_total = total_contributed(env);
    let new_total = previous_total + amount;
    if let Some(cap) = cap {
        if new_total > cap {
            panic!("exceeds maximum contributions");
        }
    }

    let payment_token: Address = env.storage().instance().get(&DataKey::PaymentToken).unwrap();
    let token_client = token::Client::new(env, &payment_token);
    token_client.transfer(&contributor, &env.current_contract_address(), &amount);

    let key = PersistentKey::Contribution(contributor.clone());
    let contributor_total =
        env.storage().persistent().get::<PersistentKey, i128>(&key).unwrap_or(0) + amount;
    env.storage().persistent().set(&key, &contributor_total);
    env.storage().instance().set(&DataKey::TotalContributed, &new_total);

    extend_persistent(env, &key);
    extend_instance(env);

    events::emit_contributed(
        env,
        ContributedEvent {
            contributor,
            amount,
            previous_total,
            contributor_total,
        },
    );
}

pub fn require_active(env: &Env) {
    if status(env) != SyndicateStatus::Active {
        panic!("party not active");
    }
}

pub fn status(env: &Env) -> SyndicateStatus {
    env.storage().instance().get(&DataKey::Status).unwrap()
}

pub fn total_contributed(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalContributed).unwrap()
}

pub fn total_spent(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalSpent).unwrap()
}

pub fn contribution(env: &Env, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&PersistentKey::Contribution(contributor.clone()))
        .unwrap_or(0)
}

pub fn fee_config(env: &Env) -> FeeConfig {
    env.storage().instance().get(&DataKey::Fee).unwrap()
}

pub fn expiration_time(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::ExpirationTime).unwrap()
}
