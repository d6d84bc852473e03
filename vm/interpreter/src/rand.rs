// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::error::Error as StdError;
use vm::{ChainEpoch, Randomness};

/// Randomness provider drawing from the chain's random beacon.
pub trait Rand {
    /// Gets randomness for the given epoch and draw offset.
    fn get_randomness(
        &self,
        epoch: ChainEpoch,
        offset: u64,
    ) -> Result<Randomness, Box<dyn StdError>>;
}
