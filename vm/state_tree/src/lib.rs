// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::sync::Arc;

use cid::Cid;
use thiserror::Error;
use vm::{ActorState, Address, TokenAmount, EMPTY_SUBSTATE};

/// Errors reported by the state tree mutators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateTreeError {
    #[error("actor {0} does not exist")]
    ActorNotFound(Address),
    #[error("not enough funds in actor {0}")]
    InsufficientFunds(Address),
    #[error("negative transfer amount")]
    NegativeAmount,
}

/// Immutable snapshot of the global actor state.
///
/// Mutators produce a new tree and leave the receiver untouched; the actor
/// map is shared between snapshots, so cloning a tree is cheap and discarding
/// a derived tree is a drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTree {
    actors: Arc<HashMap<Address, ActorState>>,
}

impl StateTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get actor state from an address.
    pub fn get_actor(&self, addr: &Address) -> Option<&ActorState> {
        self.actors.get(addr)
    }

    /// Returns a tree with the actor state set for an address. Used for
    /// seeding genesis state; execution goes through the mutators below.
    pub fn set_actor(&self, addr: Address, actor: ActorState) -> StateTree {
        let mut actors = (*self.actors).clone();
        actors.insert(addr, actor);
        StateTree {
            actors: Arc::new(actors),
        }
    }

    /// Returns a tree with the code binding installed for an address,
    /// creating the actor entry with an empty substate and zero balance when
    /// it does not exist yet.
    pub fn with_actor_system_state(
        &self,
        addr: &Address,
        code: Cid,
    ) -> Result<StateTree, StateTreeError> {
        let mut actors = (*self.actors).clone();
        match actors.get_mut(addr) {
            Some(act) => act.code = code,
            None => {
                actors.insert(
                    addr.clone(),
                    ActorState::new(code, *EMPTY_SUBSTATE, TokenAmount::default()),
                );
            }
        }
        Ok(StateTree {
            actors: Arc::new(actors),
        })
    }

    /// Returns a tree with the substate reference replaced for an address.
    pub fn with_actor_substate(
        &self,
        addr: &Address,
        state: Cid,
    ) -> Result<StateTree, StateTreeError> {
        let mut actors = (*self.actors).clone();
        let act = actors
            .get_mut(addr)
            .ok_or_else(|| StateTreeError::ActorNotFound(addr.clone()))?;
        act.state = state;
        Ok(StateTree {
            actors: Arc::new(actors),
        })
    }

    /// Returns a tree with funds moved between two actors.
    pub fn with_funds_transfer(
        &self,
        from: &Address,
        to: &Address,
        value: &TokenAmount,
    ) -> Result<StateTree, StateTreeError> {
        if from == to {
            return Ok(self.clone());
        }
        if value < &TokenAmount::default() {
            return Err(StateTreeError::NegativeAmount);
        }

        let mut f = self
            .get_actor(from)
            .cloned()
            .ok_or_else(|| StateTreeError::ActorNotFound(from.clone()))?;
        let mut t = self
            .get_actor(to)
            .cloned()
            .ok_or_else(|| StateTreeError::ActorNotFound(to.clone()))?;

        f.deduct_funds(value)
            .map_err(|_| StateTreeError::InsufficientFunds(from.clone()))?;
        t.deposit_funds(value);

        let mut actors = (*self.actors).clone();
        actors.insert(from.clone(), f);
        actors.insert(to.clone(), t);
        Ok(StateTree {
            actors: Arc::new(actors),
        })
    }
}
