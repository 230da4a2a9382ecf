#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, vec, Address, Env};

fn create_allowlist<'a>(e: &Env) -> AllowListContractClient<'a> {
    AllowListContractClient::new(e, &e.register(AllowListContract, ()))
}

#[test]
fn test_unknown_target_not_allowed() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let list = create_allowlist(&env);
    list.init(&owner);

    let target = Address::generate(&env);
    assert!(!list.is_allowed(&target));
}

#[test]
fn test_set_and_unset() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let list = create_allowlist(&env);
    list.init(&owner);

    let target = Address::generate(&env);
    list.set_allowed(&target, &true);
    assert!(list.is_allowed(&target));

    list.set_allowed(&target, &false);
    assert!(!list.is_allowed(&target));
}

#[test]
fn test_batch_update() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let list = create_allowlist(&env);
    list.init(&owner);

    let a = Address::generate(&env);
    let b = Address::generate(&env);
    list.set_allowed_batch(&vec![&env, a.clone(), b.clone()], &true);
    assert!(list.is_allowed(&a));
    assert!(list.is_allowed(&b));

    list.set_allowed_batch(&vec![&env, a.clone()], &false);
    assert!(!list.is_allowed(&a));
    assert!(list.is_allowed(&b));
}

#[test]
#[should_panic(expected = "already initialized")]
fn test_cannot_init_twice() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let list = create_allowlist(&env);
    list.init(&owner);
    list.init(&owner);
}
