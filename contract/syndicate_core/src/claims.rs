//! Per-contributor claim settlement. Amounts are only computable in a
//! terminal state; each contributor claims at most once; floor-division dust
//! stays in campaign custody.

use soroban_sdk::{token, Address, Env};

use crate::events::{self, ClaimedEvent};
use crate::ledger;
use crate::storage_types::{DataKey, PersistentKey, SyndicateStatus};
use crate::utils::extend_persistent;

/// The share-token and payment-token amounts `contributor` is owed.
/// Lost: full refund, no tokens. Won: pro-rata share of the post-fee supply
/// and of the unspent pool, both floored.
pub fn claim_amounts(env: &Env, contributor: &Address) -> (i128, i128) {
    let contributed = ledger::contribution(env, contributor);
    match ledger::status(env) {
        SyndicateStatus::Active => panic!("party still active; amounts undetermined"),
        SyndicateStatus::Lost => (0, contributed),
        SyndicateStatus::Won => {
            let total_contributed = ledger::total_contributed(env);
            if contributed == 0 {
                return (0, 0);
            }
            let claimable_supply: i128 =
                env.storage().instance().get(&DataKey::ClaimableSupply).unwrap();
            let excess_pool = total_contributed - ledger::total_spent(env);
            let tokens = (claimable_supply * contributed) / total_contributed;
            let excess = (excess_pool * contributed) / total_contributed;
            (tokens, excess)
        }
    }
}

/// How much of the contributor's deposit was actually consumed by the
/// acquisition and fee. Exposed for external accounting.
pub fn total_eth_used(env: &Env, contributor: &Address) -> i128 {
    if ledger::status(env) == SyndicateStatus::Active {
        panic!("party still active; amounts undetermined");
    }
    let (_, excess) = claim_amounts(env, contributor);
    ledger::contribution(env, contributor) - excess
}

/// Pay out a contributor's share. Callable by anyone on the contributor's
/// behalf; funds always go to the contributor.
pub fn claim(env: &Env, contributor: Address) {
    if ledger::status(env) == SyndicateStatus::Active {
        panic!("party not finalized");
    }
    let contributed = ledger::contribution(env, &contributor);
    if contributed == 0 {
        panic!("not a contributor");
    }
    let claimed_key = PersistentKey::Claimed(contributor.clone());
    if env.storage().persistent().get::<PersistentKey, bool>(&claimed_key).unwrap_or(false) {
        panic!("contribution already claimed");
    }

    // claimed-flag first, transfers after
    env.storage().persistent().set(&claimed_key, &true);
    extend_persistent(env, &claimed_key);

    let (tokens, excess) = claim_amounts(env, &contributor);
    let me = env.current_contract_address();
    if tokens > 0 {
        let share_token: Address = env.storage().instance().get(&DataKey::ShareToken).unwrap();
        token::Client::new(env, &share_token).transfer(&me, &contributor, &tokens);
    }
    if excess > 0 {
        let payment_token: Address =
            env.storage().instance().get(&DataKey::PaymentToken).unwrap();
        token::Client::new(env, &payment_token).transfer(&me, &contributor, &excess);
    }

    events::emit_claimed(
        env,
        ClaimedEvent {
            contributor,
            contributed,
            excess,
            tokens,
        },
    );
}

pub fn has_claimed(env: &Env, contributor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&PersistentKey::Claimed(contributor.clone()))
        .unwrap_or(false)
}
