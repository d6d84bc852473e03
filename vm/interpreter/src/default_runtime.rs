// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::compute::COMPUTE_FUNCTION_DEFS;
use crate::price_list::{price_list_by_epoch, PriceList};
use crate::rand::Rand;
use crate::store::BlockStore;
use cid::Cid;
use log::debug;
use runtime::{ActorCode, ActorRegistry, ActorStateHandle, CallerPattern, Runtime};
use state_tree::StateTree;
use vm::{
    actor_error, ActorError, Address, CallSeqNum, ChainEpoch, ComputeFunctionID, ExitCode,
    GasAmount, InvocInput, InvocOutput, MessageReceipt, MethodNum, Randomness, Serialized,
    SysCode, TokenAmount, INIT_ACTOR_ADDR, METHOD_CONSTRUCTOR, METHOD_SEND,
};

/// Controls how an erroring callee is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHandlingSpec {
    /// An erroring callee terminates the caller with a subcall error.
    PropagateErrors,
    /// The callee's exit code is handed back to the caller.
    CatchErrors,
}

/// Implementation of the Runtime trait. One instance exists per actor method
/// invocation and responds to that method's runtime API calls.
pub struct DefaultRuntime<'vm, BS, RG, R> {
    registry: &'vm RG,
    store: &'vm BS,
    rand: &'vm R,
    epoch: ChainEpoch,
    price_list: PriceList,

    state_initial: StateTree,
    state_pending: StateTree,
    running: bool,
    actor_address: Address,
    actor_state_acquired: bool,

    immediate_caller: Address,
    toplevel_sender: Address,
    toplevel_block_winner: Address,
    toplevel_sender_call_seq_num: CallSeqNum,
    internal_call_seq_num: CallSeqNum,
    value_received: TokenAmount,
    method_num: MethodNum,
    gas_remaining: GasAmount,
    num_validate_calls: u32,
}

impl<'vm, BS, RG, R> DefaultRuntime<'vm, BS, RG, R>
where
    BS: BlockStore,
    RG: ActorRegistry,
    R: Rand,
{
    /// Constructs a new Runtime for a single method invocation.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: &'vm RG,
        store: &'vm BS,
        rand: &'vm R,
        epoch: ChainEpoch,
        toplevel_sender: Address,
        toplevel_block_winner: Address,
        toplevel_sender_call_seq_num: CallSeqNum,
        internal_call_seq_num: CallSeqNum,
        global_state: StateTree,
        actor_address: Address,
        immediate_caller: Address,
        value_received: TokenAmount,
        method_num: MethodNum,
        gas_remaining: GasAmount,
    ) -> Self {
        let price_list = price_list_by_epoch(epoch);
        DefaultRuntime {
            registry,
            store,
            rand,
            epoch,
            price_list,
            state_initial: global_state.clone(),
            state_pending: global_state,
            running: false,
            actor_address,
            actor_state_acquired: false,
            immediate_caller,
            toplevel_sender,
            toplevel_block_winner,
            toplevel_sender_call_seq_num,
            internal_call_seq_num,
            value_received,
            method_num,
            gas_remaining,
            num_validate_calls: 0,
        }
    }

    /// The in flight, not yet committed state view of this invocation.
    pub fn state_pending(&self) -> &StateTree {
        &self.state_pending
    }

    /// The state snapshot this invocation started from.
    pub fn state_initial(&self) -> &StateTree {
        &self.state_initial
    }

    /// Gas left in this frame's budget.
    pub fn gas_remaining(&self) -> GasAmount {
        self.gas_remaining
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn check_running(&self) -> Result<(), ActorError> {
        if !self.running {
            return Err(actor_error!(fatal(
                "Actor API called with no actor code running"
            )));
        }
        Ok(())
    }

    fn check_actor_state_acquired_flag(&self, expected: bool) -> Result<(), ActorError> {
        self.check_running()?;
        if self.actor_state_acquired != expected {
            return Err(actor_error!(sys RuntimeAPIError;
                "State updates and message sends must be disjoint"));
        }
        Ok(())
    }

    fn check_actor_state_acquired(&self) -> Result<(), ActorError> {
        self.check_actor_state_acquired_flag(true)
    }

    fn check_actor_state_not_acquired(&self) -> Result<(), ActorError> {
        self.check_actor_state_acquired_flag(false)
    }

    fn check_num_validate_calls(&self, expected: u32) -> Result<(), ActorError> {
        if self.num_validate_calls != expected {
            return Err(actor_error!(sys RuntimeAPIError;
                "Method must validate caller identity exactly once"));
        }
        Ok(())
    }

    fn check_gas_remaining(&self) -> Result<(), ActorError> {
        if self.gas_remaining.is_negative() {
            return Err(actor_error!(sys OutOfGas;
                "not enough gas (remaining={})", self.gas_remaining));
        }
        Ok(())
    }

    /// Deducts gas from this frame's budget. Going below zero raises an out
    /// of gas error that no error handling mode catches.
    pub fn deduct_gas_remaining(&mut self, x: GasAmount) -> Result<(), ActorError> {
        if x.is_negative() {
            return Err(actor_error!(fatal("Negative gas deduction {}", x)));
        }
        self.check_gas_remaining()?;
        self.gas_remaining = self.gas_remaining - x;
        self.check_gas_remaining()
    }

    /// Returns gas to this frame's budget. Must not be called once the frame
    /// is out of gas.
    pub fn refund_gas_remaining(&mut self, x: GasAmount) -> Result<(), ActorError> {
        if x.is_negative() {
            return Err(actor_error!(fatal("Negative gas refund {}", x)));
        }
        self.check_gas_remaining()?;
        self.gas_remaining = self.gas_remaining + x;
        self.check_gas_remaining()
    }

    fn transfer_funds(
        &mut self,
        from: &Address,
        to: &Address,
        amount: &TokenAmount,
    ) -> Result<(), ActorError> {
        self.check_running()?;
        self.check_actor_state_not_acquired()?;
        let next = self
            .state_pending
            .with_funds_transfer(from, to, amount)
            .map_err(|e| actor_error!(sys InsufficientFunds; "failed to transfer funds: {}", e))?;
        self.state_pending = next;
        Ok(())
    }

    fn current_substate(&self) -> Result<Cid, ActorError> {
        Ok(self
            .state_pending
            .get_actor(&self.actor_address)
            .ok_or_else(|| {
                actor_error!(fatal("actor under execution missing: {}", self.actor_address))
            })?
            .state)
    }

    fn update_actor_substate_internal(&mut self, new_state: Cid) -> Result<(), ActorError> {
        let next = self
            .state_pending
            .with_actor_substate(&self.actor_address, new_state)
            .map_err(|e| actor_error!(fatal("failed to update actor substate: {}", e)))?;
        self.state_pending = next;
        Ok(())
    }

    /// Routes a message to the target actor and dispatches the method on a
    /// child frame, committing or discarding the callee's state mutations
    /// according to the exit code.
    pub(crate) fn send_internal(
        &mut self,
        input: &InvocInput,
        err_spec: ErrorHandlingSpec,
    ) -> Result<MessageReceipt, ActorError> {
        self.check_running()?;
        self.check_actor_state_not_acquired()?;

        let to_actor = self
            .state_pending
            .get_actor(&input.to)
            .ok_or_else(|| actor_error!(sys ActorCodeNotFound; "no actor at address {}", input.to))?;
        let code_id = to_actor.code;

        let registry = self.registry;
        let to_actor_code = registry.load_code(&code_id).ok_or_else(
            || actor_error!(sys ActorCodeNotFound; "no code for actor at address {}", input.to),
        )?;

        let method_gas_bound = registry.method_gas_bound(&code_id, input.method, &input.params);
        self.deduct_gas_remaining(method_gas_bound)?;

        // Snapshot for restoring the caller's view if the callee errors.
        let state_prior = self.state_pending.clone();

        let from = self.actor_address.clone();
        self.transfer_funds(&from, &input.to, &input.value)?;

        let mut inner = DefaultRuntime::new(
            self.registry,
            self.store,
            self.rand,
            self.epoch,
            self.toplevel_sender.clone(),
            self.toplevel_block_winner.clone(),
            self.toplevel_sender_call_seq_num,
            self.internal_call_seq_num + 1,
            self.state_pending.clone(),
            input.to.clone(),
            self.actor_address.clone(),
            input.value.clone(),
            input.method,
            self.gas_remaining,
        );

        let (output, exit_code, gas_used, seq_final) =
            invoke_method_internal(&mut inner, to_actor_code, input.method, &input.params)?;

        self.internal_call_seq_num = seq_final;

        self.refund_gas_remaining(method_gas_bound)?;
        self.deduct_gas_remaining(gas_used)?;

        if exit_code == ExitCode::SystemError(SysCode::OutOfGas) {
            // Out of gas cannot be caught by any error handling mode.
            return Err(actor_error!(sys OutOfGas; "callee at {} ran out of gas", input.to));
        }

        if err_spec == ErrorHandlingSpec::PropagateErrors && exit_code.is_error() {
            return Err(actor_error!(sys MethodSubcallError;
                "callee at {} exited with {:?}", input.to, exit_code));
        }

        if exit_code.allows_state_update() {
            self.state_pending = inner.state_pending;
        } else {
            // An erroring callee leaves the caller's view untouched, fund
            // transfer included.
            self.state_pending = state_prior;
        }

        Ok(MessageReceipt::new(output, exit_code, gas_used))
    }
}

impl<BS, RG, R> Runtime for DefaultRuntime<'_, BS, RG, R>
where
    BS: BlockStore,
    RG: ActorRegistry,
    R: Rand,
{
    fn immediate_caller(&self) -> Address {
        debug_assert!(self.running);
        self.immediate_caller.clone()
    }

    fn toplevel_sender(&self) -> Address {
        debug_assert!(self.running);
        self.toplevel_sender.clone()
    }

    fn toplevel_block_winner(&self) -> Address {
        debug_assert!(self.running);
        self.toplevel_block_winner.clone()
    }

    fn toplevel_sender_call_seq_num(&self) -> CallSeqNum {
        debug_assert!(self.running);
        self.toplevel_sender_call_seq_num
    }

    fn internal_call_seq_num(&self) -> CallSeqNum {
        debug_assert!(self.running);
        self.internal_call_seq_num
    }

    fn value_received(&self) -> TokenAmount {
        debug_assert!(self.running);
        self.value_received.clone()
    }

    fn curr_epoch(&self) -> ChainEpoch {
        self.epoch
    }

    fn curr_method_num(&self) -> MethodNum {
        debug_assert!(self.running);
        self.method_num
    }

    fn current_balance(&self) -> Result<TokenAmount, ActorError> {
        self.check_running()?;
        Ok(self
            .state_pending
            .get_actor(&self.actor_address)
            .map(|act| act.balance.clone())
            .unwrap_or_default())
    }

    fn validate_immediate_caller_matches(
        &mut self,
        pattern: &CallerPattern,
    ) -> Result<(), ActorError> {
        self.check_running()?;
        self.check_num_validate_calls(0)?;
        if !pattern.matches(&self.immediate_caller) {
            return Err(self.abort_api("Method invoked by incorrect caller"));
        }
        self.num_validate_calls += 1;
        Ok(())
    }

    fn acquire_state(&mut self) -> Result<ActorStateHandle, ActorError> {
        self.check_running()?;
        self.check_actor_state_not_acquired()?;
        let init_value = self.current_substate()?;
        self.actor_state_acquired = true;
        Ok(ActorStateHandle::new(init_value))
    }

    fn update_release(
        &mut self,
        _handle: ActorStateHandle,
        new_state: Cid,
    ) -> Result<(), ActorError> {
        self.check_actor_state_acquired()?;
        self.update_actor_substate_internal(new_state)?;
        self.actor_state_acquired = false;
        Ok(())
    }

    fn release(&mut self, _handle: ActorStateHandle, expected: &Cid) -> Result<(), ActorError> {
        self.check_actor_state_acquired()?;
        let prev_state = self.current_substate()?;
        if &prev_state != expected {
            return Err(self.abort_api("State cid differs upon release call"));
        }
        self.actor_state_acquired = false;
        Ok(())
    }

    fn send_propagating_errors(&mut self, input: InvocInput) -> Result<InvocOutput, ActorError> {
        let receipt = self.send_internal(&input, ErrorHandlingSpec::PropagateErrors)?;
        Ok(InvocOutput {
            return_value: receipt.return_data,
        })
    }

    fn send_catching_errors(
        &mut self,
        input: InvocInput,
    ) -> Result<(InvocOutput, ExitCode), ActorError> {
        let receipt = self.send_internal(&input, ErrorHandlingSpec::CatchErrors)?;
        Ok((
            InvocOutput {
                return_value: receipt.return_data,
            },
            receipt.exit_code,
        ))
    }

    fn randomness(&self, epoch: ChainEpoch, offset: u64) -> Result<Randomness, ActorError> {
        self.check_running()?;
        self.rand
            .get_randomness(epoch, offset)
            .map_err(|e| actor_error!(fatal("could not get randomness: {}", e)))
    }

    fn ipld_put(&mut self, data: &[u8]) -> Result<Cid, ActorError> {
        self.check_running()?;
        self.deduct_gas_remaining(self.price_list.on_ipld_put(data.len()))?;
        self.store
            .put(data)
            .map_err(|e| actor_error!(fatal("storage put error: {}", e)))
    }

    fn ipld_get(&mut self, cid: &Cid) -> Result<Vec<u8>, ActorError> {
        self.check_running()?;
        self.deduct_gas_remaining(self.price_list.on_ipld_get())?;
        self.store
            .get(cid)
            .map_err(|e| actor_error!(fatal("storage get error: {}", e)))?
            .ok_or_else(|| self.abort_api("Object missing from the store"))
    }

    fn create_actor(
        &mut self,
        code: Cid,
        address: &Address,
        init_balance: TokenAmount,
        constructor_params: Serialized,
    ) -> Result<(), ActorError> {
        self.check_running()?;
        if self.actor_address != *INIT_ACTOR_ADDR {
            return Err(self.abort_api("Only the init actor may call create_actor"));
        }
        self.deduct_gas_remaining(self.price_list.on_create_actor())?;

        let next = self
            .state_pending
            .with_actor_system_state(address, code)
            .map_err(|e| actor_error!(fatal("failed to install actor system state: {}", e)))?;
        self.state_pending = next;

        self.send_propagating_errors(InvocInput {
            to: address.clone(),
            method: METHOD_CONSTRUCTOR,
            params: constructor_params,
            value: init_balance,
        })?;
        Ok(())
    }

    fn verify_signature(
        &mut self,
        signer: &Address,
        signature: &[u8],
        plaintext: &[u8],
    ) -> Result<bool, ActorError> {
        self.check_running()?;
        let signer_state = self
            .state_pending
            .get_actor(signer)
            .ok_or_else(|| self.abort_api("Signer actor not found"))?;
        let public_key = signer_state
            .public_key
            .clone()
            .ok_or_else(|| self.abort_api("Signer actor has no public key"))?;

        let args = [public_key, signature.to_vec(), plaintext.to_vec()];
        let ret = self.compute(ComputeFunctionID::VerifySignature, &args)?;
        Ok(ret == vec![1u8])
    }

    fn compute(&mut self, id: ComputeFunctionID, args: &[Vec<u8>]) -> Result<Vec<u8>, ActorError> {
        self.check_running()?;
        let def = COMPUTE_FUNCTION_DEFS
            .get(&id)
            .ok_or_else(|| self.abort_api("Function definition in compute() not found"))?;
        self.deduct_gas_remaining((def.gas_cost_fn)(args))?;
        Ok((def.body)(args))
    }
}

/// Dispatches a single method invocation on a fresh frame, converting a non
/// fatal unwind into an exit code. This is the only boundary at which runtime
/// errors are caught.
fn invoke_method_internal<BS, RG, R>(
    rt: &mut DefaultRuntime<'_, BS, RG, R>,
    actor_code: &dyn ActorCode,
    method: MethodNum,
    params: &Serialized,
) -> Result<(InvocOutput, ExitCode, GasAmount, CallSeqNum), ActorError>
where
    BS: BlockStore,
    RG: ActorRegistry,
    R: Rand,
{
    if method == METHOD_SEND {
        // Pure value transfer, no code runs and no gas is used.
        return Ok((
            InvocOutput::success(),
            ExitCode::Ok,
            GasAmount::zero(),
            rt.internal_call_seq_num,
        ));
    }

    let gas_on_entry = rt.gas_remaining;

    rt.running = true;
    let res = actor_code.invoke_method(rt, method, params);
    rt.running = false;

    let (output, exit_code) = match res {
        Ok(output) => {
            if rt.actor_state_acquired || rt.num_validate_calls != 1 {
                (
                    InvocOutput::success(),
                    ExitCode::SystemError(SysCode::RuntimeAPIError),
                )
            } else {
                (output, ExitCode::Ok)
            }
        }
        Err(e) => {
            if e.is_fatal() {
                return Err(e);
            }
            debug!("method {} aborted: {}", method, e);
            (InvocOutput::success(), e.exit_code().ensure_error_code())
        }
    };

    let remaining = rt.gas_remaining.max(GasAmount::zero());
    let gas_used = gas_on_entry - remaining;

    Ok((output, exit_code, gas_used, rt.internal_call_seq_num))
}
