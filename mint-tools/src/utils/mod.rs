// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{utils::format_ether, U256};

use color::Color;

pub mod color;

/// Pretty-prints a wei amount in ether.
pub fn format_price(wei: U256) -> String {
    format!("{} ETH", format_ether(wei)).mint()
}

/// Decodes hex text with or without a `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_with_and_without_prefix() {
        assert_eq!(decode0x("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode0x(" 0a0b\n").unwrap(), vec![0x0a, 0x0b]);
        assert!(decode0x("0xzz").is_err());
    }

    #[test]
    fn clock_is_past_2020() {
        assert!(unix_now() > 1_577_836_800);
    }
}
