#![no_std]

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Val, Vec};

use syndicate_core::events::{self, BoughtEvent, FinalizedEvent};
use syndicate_core::interfaces::{AllowListClient, NonFungibleClient};
use syndicate_core::storage_types::{DataKey, FeeConfig, SyndicateStatus, TokenGate};
use syndicate_core::utils::bps_share;
use syndicate_core::{claims, emergency, governance, ledger, settlement};

#[contract]
pub struct BuyoutSyndicateContract;

#[contractimpl]
impl BuyoutSyndicateContract {
    /// Set up a campaign buying one NFT outright at a bounded price. A
    /// deadline is mandatory: a buyout that never happens must be expirable.
    pub fn init(
        env: Env,
        operator: Address,
        nft_contract: Address,
        nft_token_id: u64,
        max_price: i128,
        seconds_to_timeout: u64,
        payment_token: Address,
        fractionalizer: Address,
        target_list: Address,
        reseller_list: Address,
        fee: FeeConfig,
        gate: Option<TokenGate>,
        quorum_percent: u32,
    ) {
        if max_price <= 0 {
            panic!("max price must be positive");
        }
        if seconds_to_timeout == 0 {
            panic!("must have an expiration");
        }
        ledger::init_common(
            &env,
            operator,
            nft_contract,
            nft_token_id,
            payment_token,
            fractionalizer,
            reseller_list,
            env.ledger().timestamp() + seconds_to_timeout,
            fee,
            gate,
            quorum_percent,
        );
        env.storage().instance().set(&DataKey::MaxPrice, &max_price);
        env.storage().instance().set(&DataKey::TargetList, &target_list);
    }

    /// Deposits are capped at the maximum possible spend (price bound plus
    /// fee) so no contribution can end up unusable.
    pub fn contribute(env: Env, contributor: Address, amount: i128) {
        let cap = Self::max_contributions(env.clone());
        ledger::contribute(&env, contributor, amount, Some(cap));
    }

    pub fn max_contributions(env: Env) -> i128 {
        let max_price: i128 = env.storage().instance().get(&DataKey::MaxPrice).unwrap();
        let fee = ledger::fee_config(&env);
        max_price + bps_share(max_price, fee.eth_fee_bps)
    }

    /// Execute the purchase: one allow-listed external call carrying the
    /// payment, then verify delivery before anything is committed. Any
    /// failure reverts whole and leaves the campaign active and retryable.
    pub fn buy(env: Env, spend_amount: i128, target: Address, func: Symbol, args: Vec<Val>) {
        ledger::require_active(&env);

        if spend_amount <= 0 {
            panic!("must spend more than 0");
        }
        let target_list: Address =
            env.storage().instance().get(&DataKey::TargetList).unwrap();
        if !AllowListClient::new(&env, &target_list).is_allowed(&target) {
            panic!("target not on allow list");
        }
        let max_price: i128 = env.storage().instance().get(&DataKey::MaxPrice).unwrap();
        if spend_amount > max_price {
            panic!("price exceeds maximum");
        }
        let fee_cfg = ledger::fee_config(&env);
        let fee = bps_share(spend_amount, fee_cfg.eth_fee_bps);
        if spend_amount + fee > ledger::total_contributed(&env) {
            panic!("insufficient funds");
        }

        let me = env.current_contract_address();
        let payment_token: Address =
            env.storage().instance().get(&DataKey::PaymentToken).unwrap();
        token::Client::new(&env, &payment_token).transfer(&me, &target, &spend_amount);
        let _: Val = env.invoke_contract(&target, &func, args);

        // sellers that accept payment without delivering don't get to keep it
        let nft_contract: Address =
            env.storage().instance().get(&DataKey::NftContract).unwrap();
        let nft_token_id: u64 = env.storage().instance().get(&DataKey::NftTokenId).unwrap();
        if NonFungibleClient::new(&env, &nft_contract).owner(&nft_token_id) != me {
            panic!("failed to buy token");
        }

        let (fee_paid, total_spent) = settlement::settle_won(&env, spend_amount);
        events::emit_bought(
            &env,
            BoughtEvent {
                target,
                amount: spend_amount,
                fee: fee_paid,
                total_spent,
            },
        );
        events::emit_finalized(
            &env,
            FinalizedEvent {
                status: SyndicateStatus::Won,
                total_spent,
                fee: fee_paid,
                total_contributed: ledger::total_contributed(&env),
                expired: false,
            },
        );
    }

    /// Close an expired campaign unconditionally; there is no winning
    /// position to protect on the buyout path.
    pub fn expire(env: Env) {
        ledger::require_active(&env);
        if env.ledger().timestamp() <= ledger::expiration_time(&env) {
            panic!("expiration time in future");
        }
        settlement::settle_lost(&env, true);
    }

    pub fn claim(env: Env, contributor: Address) {
        claims::claim(&env, contributor);
    }

    pub fn claim_amounts(env: Env, contributor: Address) -> (i128, i128) {
        claims::claim_amounts(&env, &contributor)
    }

    pub fn total_eth_used(env: Env, contributor: Address) -> i128 {
        claims::total_eth_used(&env, &contributor)
    }

    pub fn has_claimed(env: Env, contributor: Address) -> bool {
        claims::has_claimed(&env, &contributor)
    }

    pub fn support_reseller(
        env: Env,
        voter: Address,
        reseller: Address,
        func: Option<Symbol>,
        args: Vec<Val>,
    ) {
        governance::support_reseller(&env, voter, reseller, func, args);
    }

    pub fn emergency_withdraw(env: Env, amount: i128) {
        emergency::emergency_withdraw(&env, amount);
    }

    pub fn emergency_call(env: Env, target: Address, func: Symbol, args: Vec<Val>) -> Val {
        emergency::emergency_call(&env, target, func, args)
    }

    pub fn emergency_force_lost(env: Env) {
        emergency::emergency_force_lost(&env);
    }

    // View functions
    pub fn status(env: Env) -> SyndicateStatus {
        ledger::status(&env)
    }

    pub fn total_contributed(env: Env) -> i128 {
        ledger::total_contributed(&env)
    }

    pub fn contribution(env: Env, contributor: Address) -> i128 {
        ledger::contribution(&env, &contributor)
    }

    pub fn total_spent(env: Env) -> i128 {
        ledger::total_spent(&env)
    }

    pub fn max_price(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::MaxPrice).unwrap()
    }

    pub fn share_token(env: Env) -> Address {
        env.storage().instance().get(&DataKey::ShareToken).expect("no shares minted")
    }

    pub fn expiration_time(env: Env) -> u64 {
        ledger::expiration_time(&env)
    }
}
