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

//! Account ledger.
//!
//! An [`Account`] holds a single balance. It is shared (via `Arc`) between
//! every card linked to it, so the balance lives behind a lock.
//!
//! # Example
//!
//! ```
//! use atm_session_rs::{Account, AccountNumber};
//!
//! let account = Account::new(AccountNumber(1), 3000);
//! account.withdraw(2700).unwrap();
//! assert_eq!(account.balance(), 300);
//! ```

use crate::AtmError;
use crate::base::{AccountNumber, Amount};
use parking_lot::Mutex;
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug)]
struct AccountData {
    number: AccountNumber,
    balance: Amount,
}

impl AccountData {
    /// Decreases the balance.
    fn withdraw(&mut self, amount: Amount) -> Result<(), AtmError> {
        if amount == 0 {
            return Err(AtmError::InvalidAmount);
        }
        if self.balance < amount {
            return Err(AtmError::InsufficientAccountFunds);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Increases the balance.
    fn deposit(&mut self, amount: Amount) -> Result<(), AtmError> {
        if amount == 0 {
            return Err(AtmError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::InvalidAmount)?;
        Ok(())
    }
}

/// Bank account linked to a card.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    pub fn new(number: AccountNumber, balance: Amount) -> Self {
        Self {
            inner: Mutex::new(AccountData { number, balance }),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.inner.lock().number
    }

    pub fn balance(&self) -> Amount {
        self.inner.lock().balance
    }

    /// Debits `amount`.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidAmount`] - `amount` is zero.
    /// - [`AtmError::InsufficientAccountFunds`] - `amount` exceeds the balance.
    ///   The balance is left untouched.
    pub fn withdraw(&self, amount: Amount) -> Result<(), AtmError> {
        self.inner.lock().withdraw(amount)
    }

    /// Credits `amount`. Used to reverse a debit whose cash was never handed out.
    pub fn deposit(&self, amount: Amount) -> Result<(), AtmError> {
        self.inner.lock().deposit(amount)
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 2)?;
        state.serialize_field("account", &data.number)?;
        state.serialize_field("balance", &data.balance)?;
        state.end()
    }
}
