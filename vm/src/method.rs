// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Method number indicator for calling actor methods.
pub type MethodNum = u64;

/// Pseudo method used for plain value transfers; never dispatched to code.
pub const METHOD_SEND: MethodNum = 0;
/// Method number reserved for actor constructors.
pub const METHOD_CONSTRUCTOR: MethodNum = 1;

/// Serialized bytes handed to and returned from actor methods. The runtime
/// treats the contents as opaque.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Serialized {
    bytes: Vec<u8>,
}

impl Serialized {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the serialized bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Identifier of a host compute function. The function table is fixed at
/// program start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeFunctionID {
    VerifySignature,
}

/// Raw randomness drawn from the chain's random beacon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Randomness(pub Vec<u8>);
