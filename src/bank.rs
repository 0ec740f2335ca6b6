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

//! Issued cards and their accounts.

use crate::account::Account;
use crate::base::{Amount, AccountNumber, CardNumber, Pin};
use crate::card::Card;
use crate::error::ConfigError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Directory of accounts and the cards issued against them.
///
/// # Invariants
///
/// - Card numbers are unique.
/// - Every card references an account held by this bank.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: BTreeMap<AccountNumber, Arc<Account>>,
    cards: HashMap<CardNumber, Card>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an account, or returns the existing one with that number.
    pub fn open_account(&mut self, number: AccountNumber, balance: Amount) -> Arc<Account> {
        Arc::clone(
            self.accounts
                .entry(number)
                .or_insert_with(|| Arc::new(Account::new(number, balance))),
        )
    }

    /// Issues a card against `account`, opening it with a zero balance if needed.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateCard`] if `number` is already issued.
    pub fn issue_card(
        &mut self,
        number: CardNumber,
        pin: Pin,
        account: AccountNumber,
    ) -> Result<Card, ConfigError> {
        if self.cards.contains_key(&number) {
            return Err(ConfigError::DuplicateCard(number));
        }
        let account = self.open_account(account, 0);
        let card = Card::new(number, pin, account);
        self.cards.insert(number, card.clone());
        Ok(card)
    }

    pub fn card(&self, number: &CardNumber) -> Option<&Card> {
        self.cards.get(number)
    }

    pub fn account(&self, number: &AccountNumber) -> Option<&Arc<Account>> {
        self.accounts.get(number)
    }

    /// Accounts ordered by number.
    pub fn accounts(&self) -> impl Iterator<Item = &Arc<Account>> {
        self.accounts.values()
    }
}
