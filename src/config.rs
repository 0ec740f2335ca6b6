// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Machine configuration.
//!
//! # Format
//!
//! ```toml
//! # Optional, largest first. Defaults to [2000, 500, 100].
//! denominations = [2000, 500, 100]
//!
//! [[notes]]
//! denomination = 2000
//! count = 1
//!
//! [[accounts]]
//! number = 1
//! balance = 3000
//!
//! [[cards]]
//! number = 4111
//! pin = "1234"
//! account = 1
//! ```

use crate::atm::Atm;
use crate::bank::Bank;
use crate::base::{AccountNumber, Amount, CardNumber, Denomination, Pin};
use crate::dispenser::DispensingChain;
use crate::error::ConfigError;
use crate::inventory::Inventory;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteConfig {
    pub denomination: Denomination,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    pub number: AccountNumber,
    pub balance: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardConfig {
    pub number: CardNumber,
    pub pin: Pin,
    pub account: AccountNumber,
}

/// Initial state of one machine and the cards it serves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtmConfig {
    #[serde(default = "standard_order")]
    pub denominations: Vec<Denomination>,
    #[serde(default)]
    pub notes: Vec<NoteConfig>,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

fn standard_order() -> Vec<Denomination> {
    Denomination::ALL.to_vec()
}

impl AtmConfig {
    /// Reads a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Builds the machine and the bank behind it.
    ///
    /// Cards referencing an account that is not listed get a new account
    /// with a zero balance.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyDenominationOrder`], [`ConfigError::InvalidDenominationOrder`]
    /// - [`ConfigError::DuplicateCard`]
    pub fn build(&self) -> Result<(Atm, Bank), ConfigError> {
        let chain = DispensingChain::new(self.denominations.clone())?;
        let inventory = Inventory::new(self.notes.iter().map(|n| (n.denomination, n.count)));

        let mut bank = Bank::new();
        for account in &self.accounts {
            bank.open_account(account.number, account.balance);
        }
        for card in &self.cards {
            bank.issue_card(card.number, card.pin.clone(), card.account)?;
        }

        Ok((Atm::new(inventory, chain), bank))
    }
}

impl FromStr for AtmConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Demo machine: a modest stock of every note and one card.
impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            denominations: standard_order(),
            notes: vec![
                NoteConfig {
                    denomination: Denomination::TwoThousand,
                    count: 10,
                },
                NoteConfig {
                    denomination: Denomination::FiveHundred,
                    count: 20,
                },
                NoteConfig {
                    denomination: Denomination::Hundred,
                    count: 50,
                },
            ],
            accounts: vec![AccountConfig {
                number: AccountNumber(1),
                balance: 10_000,
            }],
            cards: vec![CardConfig {
                number: CardNumber(4111),
                pin: Pin::new("1234"),
                account: AccountNumber(1),
            }],
        }
    }
}
