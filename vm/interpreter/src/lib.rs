// Copyright 2020 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod compute;
mod default_runtime;
mod price_list;
mod rand;
mod registry;
mod store;
mod vm;

pub use self::compute::*;
pub use self::default_runtime::*;
pub use self::price_list::*;
pub use self::rand::*;
pub use self::registry::*;
pub use self::store::*;
pub use self::vm::*;

#[macro_use]
extern crate lazy_static;
