#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

mod storage;

#[cfg(test)]
mod test;

use crate::storage::DataKey;

#[contract]
pub struct AllowListContract;

#[contractimpl]
impl AllowListContract {
    pub fn init(env: Env, owner: Address) {
        if env.storage().instance().has(&DataKey::Owner) {
            panic!("already initialized");
        }
        env.storage().instance().set(&DataKey::Owner, &owner);
    }

    pub fn set_allowed(env: Env, target: Address, allowed: bool) {
        let owner: Address = env.storage().instance().get(&DataKey::Owner).unwrap();
        owner.require_auth();

        if allowed {
            env.storage().persistent().set(&DataKey::Allowed(target.clone()), &true);
        } else {
            env.storage().persistent().remove(&DataKey::Allowed(target.clone()));
        }

        env.events().publish(
            (Symbol::new(&env, "allowlist"), Symbol::new(&env, "updated")),
            (target, allowed),
        );
    }

    pub fn set_allowed_batch(env: Env, targets: Vec<Address>, allowed: bool) {
        for target in targets.iter() {
            Self::set_allowed(env.clone(), target, allowed);
        }
    }

    /// Unknown targets are simply not allowed.
    pub fn is_allowed(env: Env, target: Address) -> bool {
        env.storage().persistent().get(&DataKey::Allowed(target)).unwrap_or(false)
    }

    pub fn owner(env: Env) -> Address {
        env.storage().instance().get(&DataKey::Owner).unwrap()
    }
}
