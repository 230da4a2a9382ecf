#![cfg(test)]

use super::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger, LedgerInfo},
    token, vec, Address, Env, IntoVal, Symbol, Val, Vec,
};

use allowlist_contract::{AllowListContract, AllowListContractClient};
use syndicate_core::storage_types::{FeeConfig, SyndicateStatus};
use syndicate_core::testutils::{
    MockFractionalizer, MockFractionalizerClient, MockNft, MockNftClient, MockSeller,
};

const TOKEN_ID: u64 = 95;
const MAX_PRICE: i128 = 10_000;
const DAY: u64 = 86400;

fn create_token<'a>(
    e: &Env,
    admin: &Address,
) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let sac = e.register_stellar_asset_contract_v2(admin.clone());
    (
        token::Client::new(e, &sac.address()),
        token::StellarAssetClient::new(e, &sac.address()),
    )
}

fn default_fee() -> FeeConfig {
    FeeConfig {
        eth_fee_bps: 250,
        token_fee_bps: 250,
        resale_multiplier_bps: 20000,
        split_recipient: None,
        split_bps: 0,
    }
}

fn fast_forward(env: &Env, seconds: u64) {
    env.ledger().set(LedgerInfo {
        timestamp: env.ledger().timestamp() + seconds,
        protocol_version: 22,
        sequence_number: env.ledger().sequence(),
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 1,
        min_persistent_entry_ttl: 1,
        max_entry_ttl: 365 * DAY as u32,
    });
}

struct Setup<'a> {
    env: Env,
    operator: Address,
    payment: token::Client<'a>,
    payment_admin: token::StellarAssetClient<'a>,
    shares: token::Client<'a>,
    nft: MockNftClient<'a>,
    seller: Address,
    targets: AllowListContractClient<'a>,
    resellers: AllowListContractClient<'a>,
    campaign: BuyoutSyndicateContractClient<'a>,
}

/// NFT #95 sits with a seller contract; the campaign may spend up to
/// MAX_PRICE plus a 2.5% payment-side fee within two days.
fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let operator = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let (payment, payment_admin) = create_token(&env, &token_admin);

    let nft = MockNftClient::new(&env, &env.register(MockNft, ()));
    let seller = env.register(MockSeller, ());
    nft.mint(&seller, &TOKEN_ID);

    let frac_address = env.register(MockFractionalizer, ());
    let shares_sac = env.register_stellar_asset_contract_v2(frac_address.clone());
    MockFractionalizerClient::new(&env, &frac_address).init(&shares_sac.address());
    let shares = token::Client::new(&env, &shares_sac.address());

    let targets = AllowListContractClient::new(&env, &env.register(AllowListContract, ()));
    targets.init(&operator);
    let resellers = AllowListContractClient::new(&env, &env.register(AllowListContract, ()));
    resellers.init(&operator);

    let campaign =
        BuyoutSyndicateContractClient::new(&env, &env.register(BuyoutSyndicateContract, ()));
    campaign.init(
        &operator,
        &nft.address,
        &TOKEN_ID,
        &MAX_PRICE,
        &(2 * DAY),
        &payment.address,
        &frac_address,
        &targets.address,
        &resellers.address,
        &default_fee(),
        &None,
        &90,
    );

    Setup {
        env,
        operator,
        payment,
        payment_admin,
        shares,
        nft,
        seller,
        targets,
        resellers,
        campaign,
    }
}

fn fund(s: &Setup, who: &Address, amount: i128) {
    s.payment_admin.mint(who, &amount);
}

fn sell_args(s: &Setup) -> Vec<Val> {
    vec![
        &s.env,
        s.nft.address.into_val(&s.env),
        TOKEN_ID.into_val(&s.env),
        s.campaign.address.into_val(&s.env),
    ]
}

#[test]
fn test_contributions_capped_at_max_spend() {
    let s = setup();
    assert_eq!(s.campaign.max_contributions(), 10_250);

    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 20_000);
    s.campaign.contribute(&c1, &10_250);
    assert_eq!(s.campaign.total_contributed(), 10_250);
}

#[test]
#[should_panic(expected = "exceeds maximum contributions")]
fn test_contribution_above_cap_reverts() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 20_000);
    s.campaign.contribute(&c1, &10_250);
    s.campaign.contribute(&c1, &1);
}

#[test]
#[should_panic(expected = "must contribute more than 0")]
fn test_contribute_zero_reverts() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 100);
    s.campaign.contribute(&c1, &0);
}

// Max price 10_000 and contributions totalling 10_250 cover a 10_000 buy
// plus the 2.5% fee exactly; a second buy must find the party closed.
#[test]
fn test_buy_settles_and_claims_split_exactly() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    let c2 = Address::generate(&s.env);
    fund(&s, &c1, 6_000);
    fund(&s, &c2, 4_250);
    s.campaign.contribute(&c1, &6_000);
    s.campaign.contribute(&c2, &4_250);

    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );

    assert_eq!(s.campaign.status(), SyndicateStatus::Won);
    assert_eq!(s.campaign.total_spent(), 10_250);
    assert_eq!(s.nft.owner(&TOKEN_ID), s.campaign.address);
    assert_eq!(s.payment.balance(&s.seller), 10_000);
    assert_eq!(s.payment.balance(&s.operator), 250);
    assert_eq!(s.payment.balance(&s.campaign.address), 0);

    // supply 10_250_000 with 2.5% to the operator
    assert_eq!(s.shares.balance(&s.operator), 256_250);
    assert_eq!(s.shares.balance(&s.campaign.address), 9_993_750);

    let again = s.campaign.try_buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
    assert!(again.is_err()); // party not active

    s.campaign.claim(&c1);
    s.campaign.claim(&c2);
    assert_eq!(s.shares.balance(&c1), 5_850_000);
    assert_eq!(s.shares.balance(&c2), 4_143_750);
    assert_eq!(s.payment.balance(&c1), 0);
    assert_eq!(s.payment.balance(&c2), 0);
    assert_eq!(s.shares.balance(&s.campaign.address), 0);

    assert_eq!(s.campaign.total_eth_used(&c1), 6_000);
    assert_eq!(s.campaign.total_eth_used(&c2), 4_250);
}

#[test]
fn test_buy_below_cap_leaves_claimable_excess() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 10_250);
    s.campaign.contribute(&c1, &10_250);

    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &8_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );

    // spent 8_000 + 200 fee, 2_050 left over for the sole contributor
    assert_eq!(s.campaign.total_spent(), 8_200);
    assert_eq!(s.campaign.claim_amounts(&c1), (7_995_000, 2_050));
    s.campaign.claim(&c1);
    assert_eq!(s.payment.balance(&c1), 2_050);
}

#[test]
#[should_panic(expected = "must spend more than 0")]
fn test_buy_zero_reverts() {
    let s = setup();
    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &0,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
}

#[test]
#[should_panic(expected = "target not on allow list")]
fn test_buy_unlisted_target_reverts() {
    let s = setup();
    s.campaign.buy(
        &1_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
}

#[test]
#[should_panic(expected = "price exceeds maximum")]
fn test_buy_above_max_price_reverts() {
    let s = setup();
    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &(MAX_PRICE + 1),
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
}

#[test]
#[should_panic(expected = "insufficient funds")]
fn test_buy_beyond_contributions_reverts() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 5_000);
    s.campaign.contribute(&c1, &5_000);
    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &9_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
}

#[test]
fn test_failed_external_call_leaves_party_retryable() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 10_250);
    s.campaign.contribute(&c1, &10_250);
    s.targets.set_allowed(&s.seller, &true);

    let rejected = s.campaign.try_buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "reject"),
        &vec![&s.env],
    );
    assert!(rejected.is_err());
    // nothing moved, nothing latched
    assert_eq!(s.campaign.status(), SyndicateStatus::Active);
    assert_eq!(s.payment.balance(&s.campaign.address), 10_250);
    assert_eq!(s.campaign.total_spent(), 0);

    // retry with honest parameters succeeds
    s.campaign.buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
    assert_eq!(s.campaign.status(), SyndicateStatus::Won);
}

#[test]
fn test_seller_keeping_payment_reverts_whole_buy() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 10_250);
    s.campaign.contribute(&c1, &10_250);
    s.targets.set_allowed(&s.seller, &true);

    let swindled = s.campaign.try_buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "keep_payment"),
        &sell_args(&s),
    );
    assert!(swindled.is_err());
    // the payment came back with the revert and the NFT never moved
    assert_eq!(s.payment.balance(&s.campaign.address), 10_250);
    assert_eq!(s.payment.balance(&s.seller), 0);
    assert_eq!(s.nft.owner(&TOKEN_ID), s.seller);
    assert_eq!(s.campaign.status(), SyndicateStatus::Active);
}

#[test]
#[should_panic(expected = "failed to buy token")]
fn test_seller_keeping_payment_panics_distinctly() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 10_250);
    s.campaign.contribute(&c1, &10_250);
    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "keep_payment"),
        &sell_args(&s),
    );
}

#[test]
fn test_reentrant_seller_cannot_double_spend() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 10_250);
    s.campaign.contribute(&c1, &5_000);
    s.targets.set_allowed(&s.seller, &true);

    // the seller tries to reenter the campaign with the buyer's own money
    let reentered = s.campaign.try_buy(
        &4_000,
        &s.seller,
        &Symbol::new(&s.env, "reenter"),
        &vec![
            &s.env,
            s.campaign.address.into_val(&s.env),
            c1.into_val(&s.env),
            1_000i128.into_val(&s.env),
        ],
    );
    assert!(reentered.is_err());
    assert_eq!(s.campaign.status(), SyndicateStatus::Active);
    assert_eq!(s.campaign.total_contributed(), 5_000);
    assert_eq!(s.payment.balance(&s.campaign.address), 5_000);
}

#[test]
#[should_panic(expected = "expiration time in future")]
fn test_expire_before_deadline_reverts() {
    let s = setup();
    s.campaign.expire();
}

#[test]
fn test_expire_refunds_contributors() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    let c2 = Address::generate(&s.env);
    fund(&s, &c1, 4_000);
    fund(&s, &c2, 2_000);
    s.campaign.contribute(&c1, &4_000);
    s.campaign.contribute(&c2, &2_000);

    fast_forward(&s.env, 2 * DAY + 1);
    s.campaign.expire();
    assert_eq!(s.campaign.status(), SyndicateStatus::Lost);
    assert_eq!(s.campaign.total_spent(), 0);

    assert_eq!(s.campaign.claim_amounts(&c1), (0, 4_000));
    s.campaign.claim(&c1);
    s.campaign.claim(&c2);
    assert_eq!(s.payment.balance(&c1), 4_000);
    assert_eq!(s.payment.balance(&c2), 2_000);
    assert_eq!(s.payment.balance(&s.campaign.address), 0);
}

#[test]
#[should_panic(expected = "party not active")]
fn test_expire_after_buy_reverts() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    fund(&s, &c1, 10_250);
    s.campaign.contribute(&c1, &10_250);
    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
    fast_forward(&s.env, 2 * DAY + 1);
    s.campaign.expire();
}

#[test]
fn test_reseller_governance_after_buy() {
    let s = setup();
    let c1 = Address::generate(&s.env);
    let c2 = Address::generate(&s.env);
    fund(&s, &c1, 6_000);
    fund(&s, &c2, 4_250);
    s.campaign.contribute(&c1, &6_000);
    s.campaign.contribute(&c2, &4_250);
    s.targets.set_allowed(&s.seller, &true);
    s.campaign.buy(
        &10_000,
        &s.seller,
        &Symbol::new(&s.env, "sell"),
        &sell_args(&s),
    );
    s.campaign.claim(&c1);
    s.campaign.claim(&c2);

    let reseller = Address::generate(&s.env);
    s.resellers.set_allowed(&reseller, &true);

    // quorum is 90% of 10_250_000; c1 alone holds 5_850_000
    s.campaign
        .support_reseller(&c1, &reseller, &None, &vec![&s.env]);
    assert_eq!(s.nft.owner(&TOKEN_ID), s.campaign.address);
    s.campaign
        .support_reseller(&c2, &reseller, &None, &vec![&s.env]);
    assert_eq!(s.nft.owner(&TOKEN_ID), reseller);
}

#[test]
#[should_panic(expected = "max price must be positive")]
fn test_init_rejects_zero_max_price() {
    let env = Env::default();
    env.mock_all_auths();
    let operator = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let (payment, _) = create_token(&env, &token_admin);
    let nft = MockNftClient::new(&env, &env.register(MockNft, ()));
    let frac = env.register(MockFractionalizer, ());
    let lists = AllowListContractClient::new(&env, &env.register(AllowListContract, ()));
    lists.init(&operator);

    let campaign =
        BuyoutSyndicateContractClient::new(&env, &env.register(BuyoutSyndicateContract, ()));
    campaign.init(
        &operator,
        &nft.address,
        &TOKEN_ID,
        &0,
        &(2 * DAY),
        &payment.address,
        &frac,
        &lists.address,
        &lists.address,
        &default_fee(),
        &None,
        &90,
    );
}

#[test]
#[should_panic(expected = "must have an expiration")]
fn test_init_rejects_missing_deadline() {
    let env = Env::default();
    env.mock_all_auths();
    let operator = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let (payment, _) = create_token(&env, &token_admin);
    let nft = MockNftClient::new(&env, &env.register(MockNft, ()));
    let frac = env.register(MockFractionalizer, ());
    let lists = AllowListContractClient::new(&env, &env.register(AllowListContract, ()));
    lists.init(&operator);

    let campaign =
        BuyoutSyndicateContractClient::new(&env, &env.register(BuyoutSyndicateContract, ()));
    campaign.init(
        &operator,
        &nft.address,
        &TOKEN_ID,
        &MAX_PRICE,
        &0,
        &payment.address,
        &frac,
        &lists.address,
        &lists.address,
        &default_fee(),
        &None,
        &90,
    );
}
