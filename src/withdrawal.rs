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

//! Cash withdrawal with compensation.
//!
//! 1. Reject a zero amount.
//! 2. Reject amounts above the machine's total cash.
//! 3. Reject amounts above the account balance.
//! 4. Debit the account.
//! 5. Dispense through the chain.
//! 6. If the chain leaves an unfulfilled remainder, put the notes back,
//!    credit the account and report [`AtmError::CannotFulfillAmount`].

use crate::AtmError;
use crate::account::Account;
use crate::base::Amount;
use crate::dispenser::{DispensingChain, WithdrawalPlan};
use crate::inventory::Inventory;
use log::{info, warn};

/// Debits `account` and dispenses `amount` from `inventory`.
///
/// Both sides are restored if the chain cannot make up the amount.
pub(crate) fn withdraw_cash(
    inventory: &mut Inventory,
    chain: &DispensingChain,
    account: &Account,
    amount: Amount,
) -> Result<WithdrawalPlan, AtmError> {
    if amount == 0 {
        return Err(AtmError::InvalidAmount);
    }

    let available = inventory.total_cash();
    if amount > available {
        return Err(AtmError::InsufficientAtmFunds {
            requested: amount,
            available,
        });
    }
    if amount > account.balance() {
        return Err(AtmError::InsufficientAccountFunds);
    }

    account.withdraw(amount)?;

    let plan = chain.dispense(amount, inventory);
    if plan.is_fulfilled() {
        info!(
            "Account {}: dispensed {} as {:?}",
            account.number(),
            amount,
            plan.notes()
        );
        return Ok(plan);
    }

    let remaining = plan.remaining();
    warn!(
        "Account {}: cannot dispense {} ({} unfulfilled), reversing debit",
        account.number(),
        amount,
        remaining
    );
    plan.restore(inventory);
    account.deposit(amount)?;
    Err(AtmError::CannotFulfillAmount { remaining })
}
