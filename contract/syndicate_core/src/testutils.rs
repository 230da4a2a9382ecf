//! Mock collaborator contracts for campaign tests: a bidding market, a
//! permanently broken market, a fractionalizer vault, a minimal NFT, and a
//! direct-buy seller with honest and dishonest modes.

use soroban_sdk::{
    contract, contractimpl, contracttype, token, vec, Address, Env, IntoVal, Symbol, Val,
};

#[contracttype]
#[derive(Clone)]
pub enum MarketKey {
    PaymentToken,
    Auction(u64),
}

#[contracttype]
#[derive(Clone)]
pub struct MockAuction {
    pub seller: Address,
    pub nft: Address,
    pub token_id: u64,
    pub reserve_price: i128,
    pub min_increment: i128,
    pub end_time: u64,
    pub highest_bid: i128,
    pub highest_bidder: Option<Address>,
    pub settled: bool,
    pub canceled: bool,
}

/// In-memory auction house implementing the MarketAdapter surface. Bids are
/// pushed: the bidder transfers its offer to the market before `place_bid`;
/// the market refunds the previous leader from its own balance.
#[contract]
pub struct MockMarket;

#[contractimpl]
impl MockMarket {
    pub fn init(env: Env, payment_token: Address) {
        env.storage().instance().set(&MarketKey::PaymentToken, &payment_token);
    }

    pub fn create_auction(
        env: Env,
        auction_id: u64,
        seller: Address,
        nft: Address,
        token_id: u64,
        reserve_price: i128,
        min_increment: i128,
        duration: u64,
    ) {
        seller.require_auth();
        if env.storage().instance().has(&MarketKey::Auction(auction_id)) {
            panic!("auction id taken");
        }
        crate::interfaces::NonFungibleClient::new(&env, &nft).transfer(
            &seller,
            &env.current_contract_address(),
            &token_id,
        );
        let auction = MockAuction {
            seller,
            nft,
            token_id,
            reserve_price,
            min_increment,
            end_time: env.ledger().timestamp() + duration,
            highest_bid: 0,
            highest_bidder: None,
            settled: false,
            canceled: false,
        };
        env.storage().instance().set(&MarketKey::Auction(auction_id), &auction);
    }

    pub fn current_price(env: Env, auction_id: u64) -> i128 {
        let auction = get_auction(&env, auction_id);
        if auction.highest_bid == 0 {
            auction.reserve_price
        } else {
            auction.highest_bid + auction.min_increment
        }
    }

    pub fn place_bid(env: Env, auction_id: u64, bidder: Address, amount: i128) {
        let mut auction = get_auction(&env, auction_id);
        if auction.settled || auction.canceled || env.ledger().timestamp() > auction.end_time {
            panic!("auction not open");
        }
        if amount < Self::current_price(env.clone(), auction_id) {
            panic!("bid too low");
        }
        if let Some(previous) = auction.highest_bidder {
            refund(&env, &previous, auction.highest_bid);
        }
        auction.highest_bid = amount;
        auction.highest_bidder = Some(bidder);
        env.storage().instance().set(&MarketKey::Auction(auction_id), &auction);
    }

    pub fn finalize_auction(env: Env, auction_id: u64) {
        let mut auction = get_auction(&env, auction_id);
        if auction.settled || auction.canceled {
            return;
        }
        if env.ledger().timestamp() <= auction.end_time {
            panic!("auction still open");
        }
        auction.settled = true;
        let nft = crate::interfaces::NonFungibleClient::new(&env, &auction.nft);
        let me = env.current_contract_address();
        match &auction.highest_bidder {
            Some(winner) => {
                nft.transfer(&me, winner, &auction.token_id);
                refund(&env, &auction.seller, auction.highest_bid);
            }
            None => nft.transfer(&me, &auction.seller, &auction.token_id),
        }
        env.storage().instance().set(&MarketKey::Auction(auction_id), &auction);
    }

    pub fn cancel_auction(env: Env, auction_id: u64) {
        let mut auction = get_auction(&env, auction_id);
        auction.seller.require_auth();
        if auction.settled || auction.canceled {
            panic!("auction already closed");
        }
        if let Some(previous) = auction.highest_bidder.take() {
            refund(&env, &previous, auction.highest_bid);
        }
        auction.highest_bid = 0;
        auction.canceled = true;
        let me = env.current_contract_address();
        crate::interfaces::NonFungibleClient::new(&env, &auction.nft).transfer(
            &me,
            &auction.seller,
            &auction.token_id,
        );
        env.storage().instance().set(&MarketKey::Auction(auction_id), &auction);
    }

    pub fn is_winner(env: Env, auction_id: u64, bidder: Address) -> bool {
        get_auction(&env, auction_id).highest_bidder == Some(bidder)
    }

    pub fn auction_open(env: Env, auction_id: u64) -> bool {
        let auction = get_auction(&env, auction_id);
        !auction.settled && !auction.canceled && env.ledger().timestamp() <= auction.end_time
    }
}

fn get_auction(env: &Env, auction_id: u64) -> MockAuction {
    env.storage()
        .instance()
        .get(&MarketKey::Auction(auction_id))
        .expect("auction not found")
}

fn refund(env: &Env, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let payment_token: Address =
        env.storage().instance().get(&MarketKey::PaymentToken).unwrap();
    token::Client::new(env, &payment_token).transfer(
        &env.current_contract_address(),
        to,
        &amount,
    );
}

/// A market whose every query traps, standing in for a self-destructed or
/// compromised external protocol.
#[contract]
pub struct MockBrokenMarket;

#[contractimpl]
impl MockBrokenMarket {
    pub fn current_price(_env: Env, _auction_id: u64) -> i128 {
        panic!("market destroyed")
    }

    pub fn place_bid(_env: Env, _auction_id: u64, _bidder: Address, _amount: i128) {
        panic!("market destroyed")
    }

    pub fn finalize_auction(_env: Env, _auction_id: u64) {
        panic!("market destroyed")
    }

    pub fn is_winner(_env: Env, _auction_id: u64, _bidder: Address) -> bool {
        panic!("market destroyed")
    }

    pub fn auction_open(_env: Env, _auction_id: u64) -> bool {
        panic!("market destroyed")
    }
}

#[contracttype]
#[derive(Clone)]
pub enum FracKey {
    ShareToken,
    LastReservePrice,
}

/// Vault that mints the requested share supply to the recipient. The share
/// token is a stellar asset whose admin is this contract.
#[contract]
pub struct MockFractionalizer;

#[contractimpl]
impl MockFractionalizer {
    pub fn init(env: Env, share_token: Address) {
        env.storage().instance().set(&FracKey::ShareToken, &share_token);
    }

    pub fn fractionalize(
        env: Env,
        _asset: Address,
        _token_id: u64,
        reserve_price: i128,
        supply: i128,
        recipient: Address,
    ) -> Address {
        let share_token: Address = env.storage().instance().get(&FracKey::ShareToken).unwrap();
        token::StellarAssetClient::new(&env, &share_token).mint(&recipient, &supply);
        env.storage().instance().set(&FracKey::LastReservePrice, &reserve_price);
        share_token
    }

    pub fn last_reserve_price(env: Env) -> i128 {
        env.storage().instance().get(&FracKey::LastReservePrice).unwrap_or(0)
    }
}

#[contracttype]
#[derive(Clone)]
pub enum NftKey {
    Owner(u64),
}

/// Minimal single-collection NFT: mint, transfer, owner lookup.
#[contract]
pub struct MockNft;

#[contractimpl]
impl MockNft {
    pub fn mint(env: Env, to: Address, token_id: u64) {
        if env.storage().persistent().has(&NftKey::Owner(token_id)) {
            panic!("token already minted");
        }
        env.storage().persistent().set(&NftKey::Owner(token_id), &to);
    }

    pub fn owner(env: Env, token_id: u64) -> Address {
        env.storage()
            .persistent()
            .get(&NftKey::Owner(token_id))
            .expect("token does not exist")
    }

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) {
        from.require_auth();
        let owner = Self::owner(env.clone(), token_id);
        if owner != from {
            panic!("not token owner");
        }
        env.storage().persistent().set(&NftKey::Owner(token_id), &to);
    }
}

/// Direct-buy counterparty. `sell` delivers the NFT it holds; the other
/// entry points model sellers that misbehave after taking payment.
#[contract]
pub struct MockSeller;

#[contractimpl]
impl MockSeller {
    pub fn sell(env: Env, nft: Address, token_id: u64, buyer: Address) {
        crate::interfaces::NonFungibleClient::new(&env, &nft).transfer(
            &env.current_contract_address(),
            &buyer,
            &token_id,
        );
    }

    /// Takes the payment and ships nothing.
    pub fn keep_payment(_env: Env, _nft: Address, _token_id: u64, _buyer: Address) {}

    pub fn reject(_env: Env) {
        panic!("seller rejected");
    }

    /// Tries to push a contribution back into the campaign mid-sale.
    pub fn reenter(env: Env, campaign: Address, contributor: Address, amount: i128) {
        let _: Val = env.invoke_contract(
            &campaign,
            &Symbol::new(&env, "contribute"),
            vec![&env, contributor.into_val(&env), amount.into_val(&env)],
        );
    }
}
