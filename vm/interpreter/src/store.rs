// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error as StdError;
use vm::make_cid;

/// Content addressable object store consumed by the runtime.
pub trait BlockStore {
    /// Retrieves the object bytes stored under a cid.
    fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, Box<dyn StdError>>;

    /// Stores object bytes, returning their cid.
    fn put(&self, data: &[u8]) -> Result<Cid, Box<dyn StdError>>;
}

/// In memory blockstore, used in tests and by embedders without a database.
#[derive(Debug, Default)]
pub struct MemoryBlockstore {
    blocks: RefCell<HashMap<Cid, Vec<u8>>>,
}

impl MemoryBlockstore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockStore for MemoryBlockstore {
    fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, Box<dyn StdError>> {
        Ok(self.blocks.borrow().get(cid).cloned())
    }

    fn put(&self, data: &[u8]) -> Result<Cid, Box<dyn StdError>> {
        let cid = make_cid(data);
        self.blocks.borrow_mut().insert(cid, data.to_vec());
        Ok(cid)
    }
}
