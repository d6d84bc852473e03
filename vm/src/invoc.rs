// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{
    Address, CallSeqNum, ExitCode, GasAmount, MethodNum, Serialized, TokenAmount,
};

/// Input variables for actor method invocation.
#[derive(Debug, Clone)]
pub struct InvocInput {
    pub to: Address,
    pub method: MethodNum,
    pub params: Serialized,
    pub value: TokenAmount,
}

/// Output variables for actor method invocation.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct InvocOutput {
    pub return_value: Serialized,
}

impl InvocOutput {
    /// Output of a method with nothing to return.
    pub fn success() -> Self {
        Self::default()
    }

    /// Output carrying a return value.
    pub fn value(bytes: Vec<u8>) -> Self {
        Self {
            return_value: Serialized::new(bytes),
        }
    }
}

/// Result of a state transition from a message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageReceipt {
    pub exit_code: ExitCode,
    pub return_data: Serialized,
    pub gas_used: GasAmount,
}

impl MessageReceipt {
    pub fn new(output: InvocOutput, exit_code: ExitCode, gas_used: GasAmount) -> Self {
        Self {
            exit_code,
            return_data: output.return_value,
            gas_used,
        }
    }
}

/// A transaction handed to the runtime by the external interpreter.
#[derive(Debug, Clone)]
pub struct Message {
    pub from: Address,
    pub to: Address,
    pub call_seq_num: CallSeqNum,
    pub value: TokenAmount,
    pub method_num: MethodNum,
    pub params: Serialized,
    pub gas_limit: GasAmount,
}
