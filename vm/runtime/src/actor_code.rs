// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0

use crate::Runtime;
use cid::Cid;
use vm::{ActorError, GasAmount, InvocOutput, MethodNum, Serialized};

/// ActorCode is the interface that all actor code types should satisfy.
/// It is merely a method dispatch interface.
pub trait ActorCode {
    /// Invokes method with runtime on the actor's code
    fn invoke_method(
        &self,
        rt: &mut dyn Runtime,
        method: MethodNum,
        params: &Serialized,
    ) -> Result<InvocOutput, ActorError>;
}

/// Registry resolving a code identity to its dispatch entry and per method
/// gas bounds. Fixed for the duration of an execution.
pub trait ActorRegistry {
    /// Loads the dispatch entry for a code identity.
    fn load_code(&self, code_id: &Cid) -> Option<&dyn ActorCode>;

    /// Upper bound on the gas a method may consume, deducted from the caller
    /// before dispatch and refunded once the true usage is known.
    fn method_gas_bound(&self, code_id: &Cid, method: MethodNum, params: &Serialized)
        -> GasAmount;
}
