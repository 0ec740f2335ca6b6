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

//! Debit cards.

use crate::account::Account;
use crate::base::{CardNumber, Pin};
use std::sync::Arc;

/// A card with its stored PIN and a reference to the linked account.
///
/// Cloning a card clones the reference, not the account.
#[derive(Debug, Clone)]
pub struct Card {
    number: CardNumber,
    pin: Pin,
    account: Arc<Account>,
}

impl Card {
    pub fn new(number: CardNumber, pin: Pin, account: Arc<Account>) -> Self {
        Self {
            number,
            pin,
            account,
        }
    }

    pub fn number(&self) -> CardNumber {
        self.number
    }

    pub fn validate_pin(&self, pin: &Pin) -> bool {
        self.pin == *pin
    }

    pub fn linked_account(&self) -> &Arc<Account> {
        &self.account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::AccountNumber;

    #[test]
    fn validates_only_stored_pin() {
        let account = Arc::new(Account::new(AccountNumber(1), 0));
        let card = Card::new(CardNumber(4111), Pin::new("1234"), account);

        assert!(card.validate_pin(&Pin::new("1234")));
        assert!(!card.validate_pin(&Pin::new("4321")));
        assert!(!card.validate_pin(&Pin::new("01234")));
    }

    #[test]
    fn clones_share_the_account() {
        let account = Arc::new(Account::new(AccountNumber(1), 1000));
        let card = Card::new(CardNumber(4111), Pin::new("1234"), Arc::clone(&account));
        let copy = card.clone();

        copy.linked_account().withdraw(400).unwrap();
        assert_eq!(card.linked_account().balance(), 600);
        assert_eq!(account.balance(), 600);
    }
}
