// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use vm::{ChainEpoch, GasAmount};

/// Gas charges for runtime provided services.
#[derive(Debug, Clone, Copy)]
pub struct PriceList {
    pub ipld_get_base: i64,
    pub ipld_put_base: i64,
    pub ipld_put_per_byte: i64,
    pub create_actor: i64,
    pub sig_verify_base: i64,
    pub sig_verify_per_byte: i64,
}

pub(crate) const BASE_PRICES: PriceList = PriceList {
    ipld_get_base: 10,
    ipld_put_base: 20,
    ipld_put_per_byte: 2,
    create_actor: 40,
    sig_verify_base: 5,
    sig_verify_per_byte: 2,
};

/// Returns gas price list by Epoch for gas consumption
pub fn price_list_by_epoch(_epoch: ChainEpoch) -> PriceList {
    // In future will match on epoch and select matching price lists when config options allowed
    BASE_PRICES
}

impl PriceList {
    /// Returns the gas required for retrieving an object from the store.
    pub fn on_ipld_get(&self) -> GasAmount {
        GasAmount::new(self.ipld_get_base)
    }

    /// Returns the gas required for storing an object.
    pub fn on_ipld_put(&self, data_size: usize) -> GasAmount {
        GasAmount::new(self.ipld_put_base + self.ipld_put_per_byte * data_size as i64)
    }

    /// Returns the gas required for installing a new actor.
    pub fn on_create_actor(&self) -> GasAmount {
        GasAmount::new(self.create_actor)
    }

    /// Returns the gas required for verifying a signature over a plaintext.
    pub fn on_verify_signature(&self, data_size: usize) -> GasAmount {
        GasAmount::new(self.sig_verify_base + self.sig_verify_per_byte * data_size as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_charge_scales_with_size() {
        let pl = price_list_by_epoch(0);
        assert_eq!(pl.on_ipld_put(0), GasAmount::new(20));
        assert_eq!(pl.on_ipld_put(10), GasAmount::new(40));
        assert_eq!(pl.on_ipld_get(), GasAmount::new(10));
    }
}
