// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::TokenAmount;
use cid::Cid;

/// State of all actor implementations.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ActorState {
    /// Link to code for the actor.
    pub code: Cid,
    /// Link to the private substate of the actor.
    pub state: Cid,
    /// Tokens available to the actor.
    pub balance: TokenAmount,
    /// Signature public key declared by the actor, if any.
    pub public_key: Option<Vec<u8>>,
}

impl ActorState {
    /// Constructor for actor state
    pub fn new(code: Cid, state: Cid, balance: TokenAmount) -> Self {
        Self {
            code,
            state,
            balance,
            public_key: None,
        }
    }

    /// Attaches a declared signature public key to the state.
    pub fn with_public_key(mut self, key: Vec<u8>) -> Self {
        self.public_key = Some(key);
        self
    }

    /// Safely deducts funds from an Actor
    pub fn deduct_funds(&mut self, amt: &TokenAmount) -> Result<(), String> {
        if &self.balance < amt {
            return Err("Not enough funds".to_owned());
        }
        self.balance -= amt;

        Ok(())
    }

    /// Deposits funds to an Actor
    pub fn deposit_funds(&mut self, amt: &TokenAmount) {
        self.balance += amt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_cid, EMPTY_SUBSTATE};

    #[test]
    fn fund_movement() {
        let mut act = ActorState::new(
            make_cid(b"code"),
            *EMPTY_SUBSTATE,
            TokenAmount::from(10u64),
        );
        act.deposit_funds(&TokenAmount::from(5u64));
        assert_eq!(act.balance, TokenAmount::from(15u64));
        act.deduct_funds(&TokenAmount::from(15u64)).unwrap();
        assert_eq!(act.balance, TokenAmount::default());
        assert!(act.deduct_funds(&TokenAmount::from(1u64)).is_err());
    }
}
