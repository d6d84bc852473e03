// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod actor_state;
mod address;
mod error;
mod exit_code;
mod gas;
mod invoc;
mod method;
mod token;

pub use self::actor_state::*;
pub use self::address::*;
pub use self::error::*;
pub use self::exit_code::*;
pub use self::gas::*;
pub use self::invoc::*;
pub use self::method::*;
pub use self::token::*;

#[macro_use]
extern crate lazy_static;

use cid::Cid;
use multihash::{Code, MultihashDigest};

/// Multicodec identifier for raw byte payloads.
const IPLD_RAW: u64 = 0x55;

/// Computes the content identifier of an opaque byte payload.
pub fn make_cid(data: &[u8]) -> Cid {
    Cid::new_v1(IPLD_RAW, Code::Blake2b256.digest(data))
}

lazy_static! {
    /// Cid of an empty actor substate payload.
    pub static ref EMPTY_SUBSTATE: Cid = make_cid(&[]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_substate_checks() {
        assert_eq!(*EMPTY_SUBSTATE, make_cid(&[]));
        assert_ne!(*EMPTY_SUBSTATE, make_cid(&[0]));
    }
}
