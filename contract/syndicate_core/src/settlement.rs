//! Terminal-state settlement. Runs inside the one-way `Active -> Won/Lost`
//! transition, so it can never execute twice for a campaign: the fee is
//! charged once, shares are minted once, and `total_spent` is written once.

use soroban_sdk::{token, Address, Env};

use crate::events::{self, FinalizedEvent};
use crate::interfaces::FractionalizerClient;
use crate::ledger;
use crate::storage_types::{DataKey, SyndicateStatus, BASIS_POINTS, TOKEN_SCALE};
use crate::utils::bps_share;

/// Fix the campaign's final numbers for a successful acquisition and hook up
/// fractionalization. `acquisition_cost` is what the asset itself cost; the
/// payment-token fee comes on top. Returns `(fee, total_spent)`.
pub fn settle_won(env: &Env, acquisition_cost: i128) -> (i128, i128) {
    let fee_cfg = ledger::fee_config(env);
    let eth_fee = bps_share(acquisition_cost, fee_cfg.eth_fee_bps);
    let total_spent = acquisition_cost + eth_fee;

    env.storage().instance().set(&DataKey::Status, &SyndicateStatus::Won);
    env.storage().instance().set(&DataKey::TotalSpent, &total_spent);

    let me = env.current_contract_address();
    let operator: Address = env.storage().instance().get(&DataKey::Operator).unwrap();
    let payment_token: Address = env.storage().instance().get(&DataKey::PaymentToken).unwrap();
    if eth_fee > 0 {
        token::Client::new(env, &payment_token).transfer(&me, &operator, &eth_fee);
    }

    // Mint the share supply against the asset. The campaign keeps custody of
    // the NFT; the vault only issues shares and records the resale floor.
    let nft_contract: Address = env.storage().instance().get(&DataKey::NftContract).unwrap();
    let nft_token_id: u64 = env.storage().instance().get(&DataKey::NftTokenId).unwrap();
    let fractionalizer: Address =
        env.storage().instance().get(&DataKey::Fractionalizer).unwrap();
    let resale_price =
        (total_spent * fee_cfg.resale_multiplier_bps as i128) / BASIS_POINTS as i128;
    let supply = total_spent * TOKEN_SCALE;
    let share_token = FractionalizerClient::new(env, &fractionalizer).fractionalize(
        &nft_contract,
        &nft_token_id,
        &resale_price,
        &supply,
        &me,
    );

    let shares = token::Client::new(env, &share_token);
    let token_fee = bps_share(supply, fee_cfg.token_fee_bps);
    if token_fee > 0 {
        shares.transfer(&me, &operator, &token_fee);
    }
    let split = bps_share(supply, fee_cfg.split_bps);
    if split > 0 {
        let recipient = fee_cfg.split_recipient.unwrap();
        shares.transfer(&me, &recipient, &split);
    }

    env.storage().instance().set(&DataKey::ShareToken, &share_token);
    env.storage()
        .instance()
        .set(&DataKey::ClaimableSupply, &(supply - token_fee - split));

    (eth_fee, total_spent)
}

/// Close the campaign without an acquisition. `total_spent` stays zero and
/// every contribution becomes refundable through the claim engine.
pub fn settle_lost(env: &Env, expired: bool) {
    env.storage().instance().set(&DataKey::Status, &SyndicateStatus::Lost);

    events::emit_finalized(
        env,
        FinalizedEvent {
            status: SyndicateStatus::Lost,
            total_spent: 0,
            fee: 0,
            total_contributed: ledger::total_contributed(env),
            expired,
        },
    );
}
