// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! What the user sees for a given [`SessionSnapshot`].

use std::fmt;

use super::{dispatch::Action, sale::SaleStatus, state::SessionSnapshot};
use crate::utils::color::Color;

pub const TITLE: &str = "Welcome to Profit Unity NFT!";
pub const TAGLINE: &str = "Holding a Profit Unity NFT gives you access to our fantastic DAO.";

/// Tokens in the collection.
pub const DEFAULT_MAX_SUPPLY: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    ConnectWallet,
    Loading,
    StartPresale,
    PresaleNotStarted,
    PresaleMint,
    PublicMint,
}

impl Screen {
    /// Picks the screen; the first matching rule wins.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if !snapshot.is_connected() {
            return Self::ConnectWallet;
        }
        if snapshot.pending {
            return Self::Loading;
        }
        match snapshot.sale {
            SaleStatus::NotStarted if snapshot.is_owner == Some(true) => Self::StartPresale,
            SaleStatus::NotStarted => Self::PresaleNotStarted,
            SaleStatus::PresaleActive => Self::PresaleMint,
            SaleStatus::PresaleEnded => Self::PublicMint,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::PresaleNotStarted => Some("Presale hasnt started yet."),
            Self::PresaleMint => Some(
                "Presale has started! If your address is whitelisted you can mint a Profit Unity NFT.",
            ),
            Self::PublicMint => Some("Presale has ended! Public mint is live."),
            Self::ConnectWallet | Self::Loading | Self::StartPresale => None,
        }
    }

    /// The action offered on this screen, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::ConnectWallet => Some(Action::Connect),
            Self::StartPresale => Some(Action::StartPresale),
            Self::PresaleMint => Some(Action::PresaleMint),
            Self::PublicMint => Some(Action::PublicMint),
            Self::Loading | Self::PresaleNotStarted => None,
        }
    }

    pub fn button_label(&self) -> Option<&'static str> {
        match self {
            Self::ConnectWallet => Some("Connect your wallet"),
            Self::Loading => Some("Loading..."),
            Self::StartPresale => Some("Start Presale!"),
            Self::PresaleMint => Some("Presale Mint"),
            Self::PublicMint => Some("Public Mint"),
            Self::PresaleNotStarted => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.message() {
            write!(f, "{message}")?;
            if self.button_label().is_some() {
                writeln!(f)?;
            }
        }
        if let Some(label) = self.button_label() {
            write!(f, "[{label}]")?;
        }
        Ok(())
    }
}

/// Line showing minting progress, e.g. `3/20 have been minted`.
pub fn minted_line(minted: Option<u64>, max_supply: u64) -> String {
    format!("{}/{max_supply} have been minted", minted.unwrap_or_default())
}

/// Full page text for a snapshot.
pub fn render(snapshot: &SessionSnapshot, max_supply: u64) -> String {
    let screen = Screen::from_snapshot(snapshot);
    format!(
        "{}\n{}\n{}\n{}",
        TITLE.mint(),
        TAGLINE.grey(),
        minted_line(snapshot.minted, max_supply).lavender(),
        screen,
    )
}
