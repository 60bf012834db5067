// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for following and driving a presale NFT collection contract.
//!
//! The [`core::session::Session`] keeps the client-side view of the sale in sync with the
//! remote contract and dispatches the state-changing calls a user can make against it.

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub mod ops;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
