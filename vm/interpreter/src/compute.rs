// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::price_list::BASE_PRICES;
use multihash::{Code, MultihashDigest};
use std::collections::HashMap;
use vm::{ComputeFunctionID, GasAmount};

/// Definition of a host compute function: the gas cost over the arguments
/// and the body itself.
pub struct ComputeFunctionDef {
    pub gas_cost_fn: fn(args: &[Vec<u8>]) -> GasAmount,
    pub body: fn(args: &[Vec<u8>]) -> Vec<u8>,
}

fn verify_signature_cost(args: &[Vec<u8>]) -> GasAmount {
    let size: usize = args.iter().map(|a| a.len()).sum();
    BASE_PRICES.on_verify_signature(size)
}

/// Checks a signature against a signer's declared public key. The signature
/// must equal blake2b-256 over the public key followed by the plaintext.
fn verify_signature_body(args: &[Vec<u8>]) -> Vec<u8> {
    if args.len() != 3 {
        return vec![0];
    }
    let (public_key, signature, plaintext) = (&args[0], &args[1], &args[2]);

    let mut buf = Vec::with_capacity(public_key.len() + plaintext.len());
    buf.extend_from_slice(public_key);
    buf.extend_from_slice(plaintext);
    let digest = Code::Blake2b256.digest(&buf);

    if signature.as_slice() == digest.digest() {
        vec![1]
    } else {
        vec![0]
    }
}

lazy_static! {
    /// Host compute functions, fixed at program start and never mutated.
    pub static ref COMPUTE_FUNCTION_DEFS: HashMap<ComputeFunctionID, ComputeFunctionDef> = {
        let mut defs = HashMap::new();
        defs.insert(
            ComputeFunctionID::VerifySignature,
            ComputeFunctionDef {
                gas_cost_fn: verify_signature_cost,
                body: verify_signature_body,
            },
        );
        defs
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_verification() {
        let def = COMPUTE_FUNCTION_DEFS
            .get(&ComputeFunctionID::VerifySignature)
            .unwrap();

        let public_key = b"key".to_vec();
        let plaintext = b"plaintext".to_vec();
        let mut buf = public_key.clone();
        buf.extend_from_slice(&plaintext);
        let signature = Code::Blake2b256.digest(&buf).digest().to_vec();

        let args = [public_key.clone(), signature, plaintext.clone()];
        assert_eq!((def.body)(&args), vec![1]);

        let bad = [public_key, b"forged".to_vec(), plaintext];
        assert_eq!((def.body)(&bad), vec![0]);
        assert!((def.gas_cost_fn)(&bad) > GasAmount::zero());
    }
}
