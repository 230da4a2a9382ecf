//! Post-win reseller governance: share-weighted approval of a resale
//! channel. A proposal is a (reseller, follow-up call) pair; support
//! accumulates until it reaches the configured quorum of total supply, at
//! which point the asset is routed to the reseller.

use soroban_sdk::{token, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol, Val, Vec};

use crate::events::{self, ResellerApprovedEvent, ResellerSupportedEvent};
use crate::interfaces::{AllowListClient, NonFungibleClient};
use crate::ledger;
use crate::storage_types::{DataKey, PersistentKey, SyndicateStatus, TOKEN_SCALE};
use crate::utils::extend_persistent;

pub fn support_reseller(
    env: &Env,
    voter: Address,
    reseller: Address,
    func: Option<Symbol>,
    args: Vec<Val>,
) {
    voter.require_auth();

    if ledger::status(env) != SyndicateStatus::Won {
        panic!("voting not open");
    }
    if env.storage().instance().get(&DataKey::ResellerApproved).unwrap_or(false) {
        panic!("resale already approved");
    }

    // vote weight is the voter's share balance, so claiming comes first
    let share_token: Address = env.storage().instance().get(&DataKey::ShareToken).unwrap();
    let weight = token::Client::new(env, &share_token).balance(&voter);
    if weight <= 0 {
        panic!("no voting power");
    }

    let reseller_list: Address = env.storage().instance().get(&DataKey::ResellerList).unwrap();
    if !AllowListClient::new(env, &reseller_list).is_allowed(&reseller) {
        panic!("reseller not allowed");
    }

    let proposal = proposal_hash(env, &reseller, &func, &args);
    let vote_key = PersistentKey::ResellerVote(proposal.clone(), voter.clone());
    if env.storage().persistent().has(&vote_key) {
        panic!("already supported this reseller");
    }
    env.storage().persistent().set(&vote_key, &true);
    extend_persistent(env, &vote_key);

    let support_key = PersistentKey::ResellerSupport(proposal);
    let total_support =
        env.storage().persistent().get::<PersistentKey, i128>(&support_key).unwrap_or(0)
            + weight;
    env.storage().persistent().set(&support_key, &total_support);
    extend_persistent(env, &support_key);

    events::emit_reseller_supported(
        env,
        ResellerSupportedEvent {
            reseller: reseller.clone(),
            voter,
            weight,
            total_support,
        },
    );

    let total_supply = ledger::total_spent(env) * TOKEN_SCALE;
    let quorum_percent: u32 = env.storage().instance().get(&DataKey::QuorumPercent).unwrap();
    if total_support * 100 >= total_supply * quorum_percent as i128 {
        approve_reseller(env, reseller, func, args, total_support);
    }
}

fn approve_reseller(
    env: &Env,
    reseller: Address,
    func: Option<Symbol>,
    args: Vec<Val>,
    support: i128,
) {
    env.storage().instance().set(&DataKey::ResellerApproved, &true);

    let nft_contract: Address = env.storage().instance().get(&DataKey::NftContract).unwrap();
    let nft_token_id: u64 = env.storage().instance().get(&DataKey::NftTokenId).unwrap();
    let me = env.current_contract_address();
    NonFungibleClient::new(env, &nft_contract).transfer(&me, &reseller, &nft_token_id);

    if let Some(func) = func {
        let _: Val = env.invoke_contract(&reseller, &func, args);
    }

    events::emit_reseller_approved(env, ResellerApprovedEvent { reseller, support });
}

/// Same reseller with different calldata is a distinct proposal; the hash
/// covers the whole (reseller, func, args) triple.
fn proposal_hash(env: &Env, reseller: &Address, func: &Option<Symbol>, args: &Vec<Val>) -> BytesN<32> {
    let mut bytes: Bytes = reseller.clone().to_xdr(env);
    bytes.append(&func.clone().to_xdr(env));
    bytes.append(&args.clone().to_xdr(env));
    env.crypto().sha256(&bytes).to_bytes()
}
