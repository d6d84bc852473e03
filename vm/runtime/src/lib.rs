// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod actor_code;

pub use self::actor_code::*;

use cid::Cid;
use vm::{
    actor_error, ActorError, Address, CallSeqNum, ChainEpoch, ComputeFunctionID, ExitCode,
    InvocInput, InvocOutput, MethodNum, Randomness, Serialized, SysCode, TokenAmount, UserCode,
};

/// Runtime is the VM's internal runtime object.
/// this is everything that is accessible to actors, beyond parameters.
///
/// Every operation requires the frame to be running, i.e. it may only be
/// used from within a dispatched method body.
pub trait Runtime {
    /// The address of the immediate calling actor.
    fn immediate_caller(&self) -> Address;

    /// The address of the sender of the top level message, constant across
    /// the entire call chain.
    fn toplevel_sender(&self) -> Address;

    /// The address of the winner of the block carrying the current message.
    fn toplevel_block_winner(&self) -> Address;

    /// Call sequence number of the top level message.
    fn toplevel_sender_call_seq_num(&self) -> CallSeqNum;

    /// Sequence number of this invocation within the top level message.
    fn internal_call_seq_num(&self) -> CallSeqNum;

    /// The value attached to the message being processed, implicitly added to
    /// the current balance before method invocation.
    fn value_received(&self) -> TokenAmount;

    /// The current chain epoch number. The genesis block has epoch zero.
    fn curr_epoch(&self) -> ChainEpoch;

    /// Method number of the current invocation.
    fn curr_method_num(&self) -> MethodNum;

    /// The balance of the receiver.
    fn current_balance(&self) -> Result<TokenAmount, ActorError>;

    /// Validates the caller against a pattern.
    /// Exported actor methods must invoke exactly one caller validation
    /// before returning.
    fn validate_immediate_caller_matches(
        &mut self,
        pattern: &CallerPattern,
    ) -> Result<(), ActorError>;

    fn validate_immediate_caller_is(&mut self, expected: &Address) -> Result<(), ActorError> {
        self.validate_immediate_caller_matches(&CallerPattern::Singleton(expected.clone()))
    }

    fn validate_immediate_caller_accept_any(&mut self) -> Result<(), ActorError> {
        self.validate_immediate_caller_matches(&CallerPattern::AcceptAny)
    }

    /// Acquires the lease over the current actor's substate. At most one
    /// handle may be live per invocation, and sends are rejected while one
    /// is outstanding.
    fn acquire_state(&mut self) -> Result<ActorStateHandle, ActorError>;

    /// Overwrites the current actor's substate and releases the lease.
    fn update_release(
        &mut self,
        handle: ActorStateHandle,
        new_state: Cid,
    ) -> Result<(), ActorError>;

    /// Releases the lease, checking that the substate was left untouched.
    fn release(&mut self, handle: ActorStateHandle, expected: &Cid) -> Result<(), ActorError>;

    /// Sends a message to another actor. An erroring callee terminates this
    /// frame with a subcall error.
    fn send_propagating_errors(&mut self, input: InvocInput) -> Result<InvocOutput, ActorError>;

    /// Sends a message to another actor, returning the output and exit code
    /// of the callee. Out of gas failures are never caught.
    fn send_catching_errors(
        &mut self,
        input: InvocInput,
    ) -> Result<(InvocOutput, ExitCode), ActorError>;

    /// Constructs the error terminating this frame with the given exit code,
    /// coerced to a well formed error code. Aborts are how actors signal
    /// user defined errors.
    fn abort(&self, exit_code: ExitCode, msg: &str) -> ActorError {
        ActorError::new(exit_code.ensure_error_code(), msg.to_string())
    }

    fn abort_arg_msg(&self, msg: &str) -> ActorError {
        self.abort(ExitCode::UserDefinedError(UserCode::InvalidArguments), msg)
    }

    fn abort_arg(&self) -> ActorError {
        self.abort_arg_msg("Invalid arguments")
    }

    fn abort_state_msg(&self, msg: &str) -> ActorError {
        self.abort(ExitCode::UserDefinedError(UserCode::InconsistentState), msg)
    }

    fn abort_state(&self) -> ActorError {
        self.abort_state_msg("Inconsistent state")
    }

    fn abort_funds_msg(&self, msg: &str) -> ActorError {
        self.abort(ExitCode::UserDefinedError(UserCode::InsufficientFunds), msg)
    }

    fn abort_funds(&self) -> ActorError {
        self.abort_funds_msg("Insufficient funds")
    }

    fn abort_api(&self, msg: &str) -> ActorError {
        self.abort(ExitCode::SystemError(SysCode::RuntimeAPIError), msg)
    }

    /// Fails with a runtime assert failure when the condition does not hold.
    fn assert(&self, cond: bool) -> Result<(), ActorError> {
        if !cond {
            return Err(ActorError::new(
                ExitCode::SystemError(SysCode::RuntimeAssertFailure),
                "Runtime assertion failed".to_owned(),
            ));
        }
        Ok(())
    }

    /// Output of a method with nothing to return. Does not terminate the
    /// frame.
    fn success_return(&self) -> InvocOutput {
        InvocOutput::success()
    }

    /// Output carrying a return value. Does not terminate the frame.
    fn value_return(&self, bytes: Vec<u8>) -> InvocOutput {
        InvocOutput::value(bytes)
    }

    /// Randomness drawn from the chain at the given epoch and draw offset.
    fn randomness(&self, epoch: ChainEpoch, offset: u64) -> Result<Randomness, ActorError>;

    /// Puts an object into the content addressable store, returning its cid.
    fn ipld_put(&mut self, data: &[u8]) -> Result<Cid, ActorError>;

    /// Retrieves an object from the content addressable store.
    fn ipld_get(&mut self, cid: &Cid) -> Result<Vec<u8>, ActorError>;

    /// Installs an actor with the given code at the address, then sends its
    /// constructor with the initial balance. May only be called by the init
    /// actor.
    fn create_actor(
        &mut self,
        code: Cid,
        address: &Address,
        init_balance: TokenAmount,
        constructor_params: Serialized,
    ) -> Result<(), ActorError>;

    /// Verifies that a signature is valid for a signer actor's declared
    /// public key and plaintext.
    fn verify_signature(
        &mut self,
        signer: &Address,
        signature: &[u8],
        plaintext: &[u8],
    ) -> Result<bool, ActorError>;

    /// Invokes a host compute function, charging its table driven gas cost.
    fn compute(&mut self, id: ComputeFunctionID, args: &[Vec<u8>]) -> Result<Vec<u8>, ActorError>;
}

/// Lease over the current actor's substate, returned by
/// [`Runtime::acquire_state`] and consumed by [`Runtime::update_release`] or
/// [`Runtime::release`].
#[derive(Debug)]
pub struct ActorStateHandle {
    init_value: Option<Cid>,
}

impl ActorStateHandle {
    pub fn new(init_value: Cid) -> Self {
        Self {
            init_value: Some(init_value),
        }
    }

    /// Yields the substate reference captured at acquire time. May be called
    /// only once; the handle is no longer the initial value bearer after.
    pub fn take(&mut self) -> Result<Cid, ActorError> {
        self.init_value.take().ok_or_else(
            || actor_error!(sys RuntimeAPIError; "Must call take() only once on actor substate handle"),
        )
    }
}

/// Predicate over the immediate caller of a method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerPattern {
    /// Matches any caller.
    AcceptAny,
    /// Matches exactly one address.
    Singleton(Address),
    /// Matches any address in the set.
    Among(Vec<Address>),
}

impl CallerPattern {
    pub fn matches(&self, caller: &Address) -> bool {
        match self {
            CallerPattern::AcceptAny => true,
            CallerPattern::Singleton(addr) => addr == caller,
            CallerPattern::Among(addrs) => addrs.contains(caller),
        }
    }
}
