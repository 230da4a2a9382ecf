use soroban_sdk::{contracttype, Address, Symbol};

use crate::storage_types::SyndicateStatus;

#[contracttype]
#[derive(Clone)]
pub struct ContributedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub previous_total: i128,
    pub contributor_total: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct BidPlacedEvent {
    pub auction_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct BoughtEvent {
    pub target: Address,
    pub amount: i128,
    pub fee: i128,
    pub total_spent: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FinalizedEvent {
    pub status: SyndicateStatus,
    pub total_spent: i128,
    pub fee: i128,
    pub total_contributed: i128,
    pub expired: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct ClaimedEvent {
    pub contributor: Address,
    pub contributed: i128,
    pub excess: i128,
    pub tokens: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ResellerSupportedEvent {
    pub reseller: Address,
    pub voter: Address,
    pub weight: i128,
    pub total_support: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct ResellerApprovedEvent {
    pub reseller: Address,
    pub support: i128,
}

pub fn emit_contributed(env: &soroban_sdk::Env, event: ContributedEvent) {
    env.events().publish((Symbol::new(env, "contributed"),), event);
}

pub fn emit_bid_placed(env: &soroban_sdk::Env, event: BidPlacedEvent) {
    env.events().publish((Symbol::new(env, "bid_placed"),), event);
}

pub fn emit_bought(env: &soroban_sdk::Env, event: BoughtEvent) {
    env.events().publish((Symbol::new(env, "bought"),), event);
}

pub fn emit_finalized(env: &soroban_sdk::Env, event: FinalizedEvent) {
    env.events().publish((Symbol::new(env, "finalized"),), event);
}

pub fn emit_claimed(env: &soroban_sdk::Env, event: ClaimedEvent) {
    env.events().publish((Symbol::new(env, "claimed"),), event);
}

pub fn emit_reseller_supported(env: &soroban_sdk::Env, event: ResellerSupportedEvent) {
    env.events().publish((Symbol::new(env, "reseller_supported"),), event);
}

pub fn emit_reseller_approved(env: &soroban_sdk::Env, event: ResellerApprovedEvent) {
    env.events().publish((Symbol::new(env, "reseller_approved"),), event);
}
