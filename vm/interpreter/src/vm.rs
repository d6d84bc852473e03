// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::default_runtime::{DefaultRuntime, ErrorHandlingSpec};
use crate::rand::Rand;
use crate::store::BlockStore;
use log::debug;
use runtime::ActorRegistry;
use state_tree::StateTree;
use vm::{
    ActorError, Address, ChainEpoch, GasAmount, InvocInput, Message, MessageReceipt, TokenAmount,
};

/// Interpreter entry which executes top level messages over a state tree and
/// returns the receipts from the vm execution.
pub struct VM<'vm, BS, RG, R> {
    state: StateTree,
    registry: &'vm RG,
    store: &'vm BS,
    rand: &'vm R,
    epoch: ChainEpoch,
    block_winner: Address,
}

impl<'vm, BS, RG, R> VM<'vm, BS, RG, R>
where
    BS: BlockStore,
    RG: ActorRegistry,
    R: Rand,
{
    pub fn new(
        state: StateTree,
        registry: &'vm RG,
        store: &'vm BS,
        rand: &'vm R,
        epoch: ChainEpoch,
        block_winner: Address,
    ) -> Self {
        VM {
            state,
            registry,
            store,
            rand,
            epoch,
            block_winner,
        }
    }

    /// Returns a reference to the VM's current state tree.
    pub fn state(&self) -> &StateTree {
        &self.state
    }

    /// Applies the state transition for a single message and returns its
    /// receipt. Failures surface as error receipts; only unrecoverable
    /// runtime faults escape as errors.
    pub fn apply_message(&mut self, msg: &Message) -> Result<MessageReceipt, ActorError> {
        let mut rt = DefaultRuntime::new(
            self.registry,
            self.store,
            self.rand,
            self.epoch,
            msg.from.clone(),
            self.block_winner.clone(),
            msg.call_seq_num,
            0,
            self.state.clone(),
            msg.from.clone(),
            msg.from.clone(),
            TokenAmount::default(),
            msg.method_num,
            msg.gas_limit,
        );

        let input = InvocInput {
            to: msg.to.clone(),
            method: msg.method_num,
            params: msg.params.clone(),
            value: msg.value.clone(),
        };

        rt.set_running(true);
        let res = rt.send_internal(&input, ErrorHandlingSpec::CatchErrors);
        rt.set_running(false);

        match res {
            Ok(receipt) => {
                self.state = rt.state_pending().clone();
                Ok(receipt)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!(
                    "[from={}, to={}, seq={}, m={}] send error: {}",
                    msg.from, msg.to, msg.call_seq_num, msg.method_num, e
                );
                // nothing committed, the pre message state is the final state
                self.state = rt.state_initial().clone();
                let remaining = rt.gas_remaining().max(GasAmount::zero());
                Ok(MessageReceipt::new(
                    Default::default(),
                    e.exit_code(),
                    msg.gas_limit - remaining,
                ))
            }
        }
    }
}
