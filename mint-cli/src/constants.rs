// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Environment variable read for the private key when no key flag is given.
pub const PRIVATE_KEY_ENV: &str = "UNITY_MINT_PRIVATE_KEY";
