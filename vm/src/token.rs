// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use num_bigint::BigInt;

/// Token amount used for actor balances and value transfers.
pub type TokenAmount = BigInt;
