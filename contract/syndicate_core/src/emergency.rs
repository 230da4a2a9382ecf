//! Break-glass hatches for the trusted operator: recover stuck funds or
//! assets, or force a stuck campaign into the refund path. Not part of the
//! happy path; the claim ledger itself is never bypassed by normal
//! operation.

use soroban_sdk::{token, Address, Env, Symbol, Val, Vec};

use crate::ledger;
use crate::settlement;
use crate::storage_types::DataKey;

fn require_operator(env: &Env) -> Address {
    let operator: Address = env.storage().instance().get(&DataKey::Operator).unwrap();
    operator.require_auth();
    operator
}

/// Move `amount` of the payment token to the operator. Usable in any state.
pub fn emergency_withdraw(env: &Env, amount: i128) {
    let operator = require_operator(env);
    if amount <= 0 {
        panic!("must withdraw more than 0");
    }
    let payment_token: Address = env.storage().instance().get(&DataKey::PaymentToken).unwrap();
    token::Client::new(env, &payment_token).transfer(
        &env.current_contract_address(),
        &operator,
        &amount,
    );

    env.events().publish(
        (Symbol::new(env, "emergency"), Symbol::new(env, "withdraw")),
        (operator, amount),
    );
}

/// Arbitrary call on behalf of the campaign, e.g. to move out an NFT that
/// was sent here by mistake.
pub fn emergency_call(env: &Env, target: Address, func: Symbol, args: Vec<Val>) -> Val {
    require_operator(env);
    let result: Val = env.invoke_contract(&target, &func, args);

    env.events().publish(
        (Symbol::new(env, "emergency"), Symbol::new(env, "call")),
        (target, func),
    );

    result
}

/// Force an active campaign into the loss/refund path, e.g. when the
/// external market is compromised or permanently stuck.
pub fn emergency_force_lost(env: &Env) {
    require_operator(env);
    ledger::require_active(env);
    settlement::settle_lost(env, false);
}
