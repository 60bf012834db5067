// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod deployment;
pub mod diagnostics;
pub mod dispatch;
pub mod ledger;
pub mod metadata;
pub mod network;
pub mod poller;
pub mod sale;
pub mod session;
pub mod signer;
pub mod state;
pub mod view;
pub mod wallet;
