// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use std::ops::{Add, Sub};

/// The current chain epoch number. The genesis block has epoch zero.
pub type ChainEpoch = i64;

/// Sequence number of a call, either of a top level message or of an
/// invocation within one.
pub type CallSeqNum = u64;

/// Signed quantity of execution gas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GasAmount(pub i64);

impl GasAmount {
    pub fn new(amount: i64) -> Self {
        GasAmount(amount)
    }

    pub fn zero() -> Self {
        GasAmount(0)
    }

    /// Returns true once the amount has gone below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for GasAmount {
    type Output = GasAmount;

    fn add(self, other: GasAmount) -> GasAmount {
        GasAmount(self.0 + other.0)
    }
}

impl Sub for GasAmount {
    type Output = GasAmount;

    fn sub(self, other: GasAmount) -> GasAmount {
        GasAmount(self.0 - other.0)
    }
}

impl fmt::Display for GasAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_arithmetic() {
        let a = GasAmount::new(10);
        let b = GasAmount::new(4);
        assert_eq!(a + b, GasAmount::new(14));
        assert_eq!(b - a, GasAmount::new(-6));
        assert!((b - a).is_negative());
        assert!(!GasAmount::zero().is_negative());
        assert!(b < a);
    }
}
