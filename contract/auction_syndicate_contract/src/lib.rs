#![no_std]


use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Val, Vec};

use syndicate_core::events::{self, BidPlacedEvent, FinalizedEvent};
use syndicate_core::interfaces::MarketAdapterClient;
use syndicate_core::storage_types::{DataKey, FeeConfig, SyndicateStatus, TokenGate};
use syndicate_core::utils::max_offer;
use syndicate_core::{claims, emergency, governance, ledger, settlement};

#[contract]
pub struct AuctionSyndicateContract;

#[contractimpl]
impl AuctionSyndicateContract {
    /// Set up a campaign pursuing one external auction. `seconds_to_timeout`
    /// of 0 disables the expiration escape hatch.
    pub fn init(
        env: Env,
        operator: Address,
        market: Address,
        auction_id: u64,
        nft_contract: Address,
        nft_token_id: u64,
        payment_token: Address,
        fractionalizer: Address,
        reseller_list: Address,
        seconds_to_timeout: u64,
        fee: FeeConfig,
        gate: Option<TokenGate>,
        quorum_percent: u32,
    ) {
        let expiration_time = if seconds_to_timeout == 0 {
            0
        } else {
            env.ledger().timestamp() + seconds_to_timeout
        };
        ledger::init_common(
            &env,
            operator,
            nft_contract,
            nft_token_id,
            payment_token,
            fractionalizer,
            reseller_list,
            expiration_time,
            fee,
            gate,
            quorum_percent,
        );
        env.storage().instance().set(&DataKey::MarketAdapter, &market);
        env.storage().instance().set(&DataKey::AuctionId, &auction_id);
        env.storage().instance().set(&DataKey::HighestBid, &0i128);
    }

    pub fn contribute(env: Env, contributor: Address, amount: i128) {
        ledger::contribute(&env, contributor, amount, None);
    }

    /// Raise the pool's bid to the auction's minimum acceptable next price.
    /// Callable by anyone; the offer is escrowed with the market.
    pub fn bid(env: Env) {
        ledger::require_active(&env);

        let market_addr: Address =
            env.storage().instance().get(&DataKey::MarketAdapter).unwrap();
        let auction_id: u64 = env.storage().instance().get(&DataKey::AuctionId).unwrap();
        let market = MarketAdapterClient::new(&env, &market_addr);
        let me = env.current_contract_address();

        if !market.auction_open(&auction_id) {
            panic!("auction not open");
        }
        if market.is_winner(&auction_id, &me) {
            panic!("currently highest bidder");
        }

        let offer = market.current_price(&auction_id);
        let fee = ledger::fee_config(&env);
        if offer <= 0 || offer > max_offer(ledger::total_contributed(&env), fee.eth_fee_bps) {
            panic!("insufficient funds");
        }

        let payment_token: Address =
            env.storage().instance().get(&DataKey::PaymentToken).unwrap();
        token::Client::new(&env, &payment_token).transfer(&me, &market_addr, &offer);
        market.place_bid(&auction_id, &me, &offer);
        env.storage().instance().set(&DataKey::HighestBid, &offer);

        events::emit_bid_placed(&env, BidPlacedEvent { auction_id, amount: offer });
    }

    /// Settle the campaign once the external auction is over. Market queries
    /// are failure-tolerant: a dead market can only produce a loss, never a
    /// locked campaign.
    pub fn finalize(env: Env) {
        ledger::require_active(&env);

        let market_addr: Address =
            env.storage().instance().get(&DataKey::MarketAdapter).unwrap();
        let auction_id: u64 = env.storage().instance().get(&DataKey::AuctionId).unwrap();
        let market = MarketAdapterClient::new(&env, &market_addr);
        let me = env.current_contract_address();

        if matches!(market.try_auction_open(&auction_id), Ok(Ok(true))) {
            panic!("auction still open");
        }
        // tolerates a prior external finalize and a broken market
        let _ = market.try_finalize_auction(&auction_id);
        let won = matches!(market.try_is_winner(&auction_id, &me), Ok(Ok(true)));

        if won {
            let winning_bid: i128 =
                env.storage().instance().get(&DataKey::HighestBid).unwrap();
            let (fee, total_spent) = settlement::settle_won(&env, winning_bid);
            events::emit_finalized(
                &env,
                FinalizedEvent {
                    status: SyndicateStatus::Won,
                    total_spent,
                    fee,
                    total_contributed: ledger::total_contributed(&env),
                    expired: false,
                },
            );
        } else {
            settlement::settle_lost(&env, false);
        }
    }

    /// Abandon an expired campaign, unless the pool is leading the auction —
    /// a winning position is never walked away from.
    pub fn expire(env: Env) {
        ledger::require_active(&env);

        let expiration_time = ledger::expiration_time(&env);
        if expiration_time == 0 {
            panic!("no expiration configured");
        }
        if env.ledger().timestamp() <= expiration_time {
            panic!("expiration time in future");
        }

        let market_addr: Address =
            env.storage().instance().get(&DataKey::MarketAdapter).unwrap();
        let auction_id: u64 = env.storage().instance().get(&DataKey::AuctionId).unwrap();
        let market = MarketAdapterClient::new(&env, &market_addr);
        let me = env.current_contract_address();
        if matches!(market.try_is_winner(&auction_id, &me), Ok(Ok(true))) {
            panic!("currently highest bidder");
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

    pub fn highest_bid(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::HighestBid).unwrap()
    }

    pub fn share_token(env: Env) -> Address {
        env.storage().instance().get(&DataKey::ShareToken).expect("no shares minted")
    }

    pub fn expiration_time(env: Env) -> u64 {
        ledger::expiration_time(&env)
    }
}
