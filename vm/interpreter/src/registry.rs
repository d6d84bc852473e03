// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use runtime::{ActorCode, ActorRegistry};
use std::collections::HashMap;
use vm::{GasAmount, MethodNum, Serialized};

/// Actor code table mapping code identities to dispatch entries, with a per
/// actor method gas bound.
#[derive(Default)]
pub struct CodeRegistry {
    actors: HashMap<Cid, RegisteredActor>,
}

struct RegisteredActor {
    code: Box<dyn ActorCode>,
    method_gas_bound: GasAmount,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an actor implementation under a code identity.
    pub fn register_actor(
        &mut self,
        code_id: Cid,
        code: Box<dyn ActorCode>,
        method_gas_bound: GasAmount,
    ) {
        self.actors.insert(
            code_id,
            RegisteredActor {
                code,
                method_gas_bound,
            },
        );
    }
}

impl ActorRegistry for CodeRegistry {
    fn load_code(&self, code_id: &Cid) -> Option<&dyn ActorCode> {
        self.actors.get(code_id).map(|a| a.code.as_ref())
    }

    fn method_gas_bound(
        &self,
        code_id: &Cid,
        _method: MethodNum,
        _params: &Serialized,
    ) -> GasAmount {
        self.actors
            .get(code_id)
            .map(|a| a.method_gas_bound)
            .unwrap_or_else(GasAmount::zero)
    }
}
