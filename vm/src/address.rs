// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

/// Protocol defines the way an address is derived and interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protocol {
    /// ID protocol addressing.
    ID = 0,
    /// Actor protocol addressing.
    Actor = 2,
}

/// Identity of an actor in the state tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    protocol: Protocol,
    payload: Vec<u8>,
}

impl Address {
    /// Generates an ID address from a numeric identifier.
    pub fn new_id(id: u64) -> Self {
        Self {
            protocol: Protocol::ID,
            payload: id.to_be_bytes().to_vec(),
        }
    }

    /// Generates an actor address from opaque payload bytes.
    pub fn new_actor(data: &[u8]) -> Self {
        Self {
            protocol: Protocol::Actor,
            payload: data.to_vec(),
        }
    }

    /// Returns the protocol of the address.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the raw payload of the address.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Byte encoding of the address, protocol byte followed by the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bz = vec![self.protocol as u8];
        bz.extend_from_slice(&self.payload);
        bz
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.protocol as u8, hex::encode(&self.payload))
    }
}

lazy_static! {
    /// Address of the system actor.
    pub static ref SYSTEM_ACTOR_ADDR: Address = Address::new_id(0);
    /// Address of the single actor permitted to install new actors.
    pub static ref INIT_ACTOR_ADDR: Address = Address::new_id(1);
}
