// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use state_tree::{StateTree, StateTreeError};
use vm::{make_cid, ActorState, Address, TokenAmount, EMPTY_SUBSTATE};

fn actor(balance: u64) -> ActorState {
    ActorState::new(make_cid(b"code"), *EMPTY_SUBSTATE, TokenAmount::from(balance))
}

#[test]
fn get_set() {
    let addr = Address::new_id(100);
    let tree = StateTree::new();

    assert_eq!(tree.get_actor(&addr), None);

    let tree = tree.set_actor(addr.clone(), actor(1));
    assert_eq!(tree.get_actor(&addr), Some(&actor(1)));

    // overwriting leaves no trace of the old state
    let tree = tree.set_actor(addr.clone(), actor(2));
    assert_eq!(tree.get_actor(&addr), Some(&actor(2)));
}

#[test]
fn mutators_leave_receiver_untouched() {
    let addr = Address::new_id(100);
    let base = StateTree::new().set_actor(addr.clone(), actor(10));

    let new_state = make_cid(b"updated");
    let derived = base.with_actor_substate(&addr, new_state).unwrap();

    assert_eq!(derived.get_actor(&addr).unwrap().state, new_state);
    assert_eq!(base.get_actor(&addr).unwrap().state, *EMPTY_SUBSTATE);
    assert_ne!(base, derived);
}

#[test]
fn substate_update_requires_actor() {
    let tree = StateTree::new();
    let addr = Address::new_id(100);
    assert_eq!(
        tree.with_actor_substate(&addr, make_cid(b"x")),
        Err(StateTreeError::ActorNotFound(addr))
    );
}

#[test]
fn system_state_installs_missing_actor() {
    let addr = Address::new_id(100);
    let code = make_cid(b"new-code");

    let tree = StateTree::new().with_actor_system_state(&addr, code).unwrap();
    let act = tree.get_actor(&addr).unwrap();
    assert_eq!(act.code, code);
    assert_eq!(act.state, *EMPTY_SUBSTATE);
    assert_eq!(act.balance, TokenAmount::default());

    // existing actors only have their code replaced
    let other_code = make_cid(b"other-code");
    let tree = tree.with_actor_system_state(&addr, other_code).unwrap();
    assert_eq!(tree.get_actor(&addr).unwrap().code, other_code);
}

#[test]
fn funds_transfer() {
    let a = Address::new_id(100);
    let b = Address::new_id(101);
    let tree = StateTree::new()
        .set_actor(a.clone(), actor(500))
        .set_actor(b.clone(), actor(0));

    let after = tree.with_funds_transfer(&a, &b, &TokenAmount::from(100u64)).unwrap();
    assert_eq!(after.get_actor(&a).unwrap().balance, TokenAmount::from(400u64));
    assert_eq!(after.get_actor(&b).unwrap().balance, TokenAmount::from(100u64));

    // the source snapshot is untouched
    assert_eq!(tree.get_actor(&a).unwrap().balance, TokenAmount::from(500u64));

    assert_eq!(
        tree.with_funds_transfer(&a, &b, &TokenAmount::from(501u64)),
        Err(StateTreeError::InsufficientFunds(a.clone()))
    );
    assert_eq!(
        tree.with_funds_transfer(&a, &Address::new_id(9), &TokenAmount::from(1u64)),
        Err(StateTreeError::ActorNotFound(Address::new_id(9)))
    );
    assert_eq!(
        tree.with_funds_transfer(&a, &b, &TokenAmount::from(-1)),
        Err(StateTreeError::NegativeAmount)
    );

    // self transfer is a no-op
    let same = tree.with_funds_transfer(&a, &a, &TokenAmount::from(400u64)).unwrap();
    assert_eq!(same, tree);
}
