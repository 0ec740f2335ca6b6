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

//! Note dispensing.
//!
//! The [`DispensingChain`] walks its denominations largest first and takes
//! as many notes of each as the amount and the [`Inventory`] allow. Whatever
//! a denomination cannot cover (because the notes ran out) is carried to the
//! next one.
//!
//! The algorithm is greedy and never backtracks. An amount can therefore be
//! undispensable even when the machine holds enough cash: 300 against a
//! machine stocked only with 2000 notes leaves 300 unfulfilled.
//!
//! ```text
//!  amount ──► [2000] ──remaining──► [500] ──remaining──► [100] ──► unfulfilled
//!               │                     │                    │
//!            deduct                deduct               deduct
//! ```

#[cfg(doc)]
use crate::AtmError;
use crate::base::{Amount, Denomination};
use crate::error::ConfigError;
use crate::inventory::Inventory;
use log::debug;
use serde::Serialize;

/// Notes taken from the inventory by one dispensing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WithdrawalPlan {
    /// `(denomination, count)` in dispensing order. Zero counts are omitted.
    notes: Vec<(Denomination, u64)>,
    /// Amount no denomination could cover.
    remaining: Amount,
}

impl WithdrawalPlan {
    pub fn notes(&self) -> &[(Denomination, u64)] {
        &self.notes
    }

    pub fn remaining(&self) -> Amount {
        self.remaining
    }

    pub fn is_fulfilled(&self) -> bool {
        self.remaining == 0
    }

    /// Cash covered by the notes in the plan.
    pub fn total(&self) -> Amount {
        self.notes
            .iter()
            .map(|(denomination, count)| denomination.value() * count)
            .sum()
    }

    /// Count dispensed for `denomination`.
    pub fn count(&self, denomination: Denomination) -> u64 {
        self.notes
            .iter()
            .find(|(d, _)| *d == denomination)
            .map_or(0, |(_, count)| *count)
    }

    /// Puts every note in the plan back into `inventory`.
    pub fn restore(&self, inventory: &mut Inventory) {
        for &(denomination, count) in &self.notes {
            inventory.restock(denomination, count);
        }
    }
}

/// Ordered denominations processed by one greedy loop.
///
/// # Invariants
///
/// - Denominations are strictly descending by value (so no duplicates).
/// - The chain holds no state between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispensingChain {
    order: Vec<Denomination>,
}

impl DispensingChain {
    /// Builds a chain over `order`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyDenominationOrder`] - `order` is empty.
    /// - [`ConfigError::InvalidDenominationOrder`] - `order` is not strictly descending.
    pub fn new(order: Vec<Denomination>) -> Result<Self, ConfigError> {
        if order.is_empty() {
            return Err(ConfigError::EmptyDenominationOrder);
        }
        if order.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::InvalidDenominationOrder(order));
        }
        Ok(Self { order })
    }

    /// 2000 → 500 → 100.
    pub fn standard() -> Self {
        Self {
            order: Denomination::ALL.to_vec(),
        }
    }

    pub fn order(&self) -> &[Denomination] {
        &self.order
    }

    /// Dispenses `amount` from `inventory`.
    ///
    /// Notes are deducted as each denomination is processed. If the returned
    /// plan is not [fulfilled](WithdrawalPlan::is_fulfilled), the notes it
    /// lists stay deducted; callers that need to undo the run use
    /// [`WithdrawalPlan::restore`].
    ///
    /// Each denomination first asks the inventory for the full count the
    /// amount calls for. An [`AtmError::InsufficientNotes`] refusal is absorbed
    /// here: the chain takes the notes that are held instead and carries the
    /// shortfall to the next denomination. It never reaches the caller.
    pub fn dispense(&self, amount: Amount, inventory: &mut Inventory) -> WithdrawalPlan {
        let mut plan = WithdrawalPlan::default();
        let mut remaining = amount;

        for &denomination in &self.order {
            let value = denomination.value();
            let ideal = remaining / value;
            let remainder = remaining % value;
            let dispensed = match inventory.deduct(denomination, ideal) {
                Ok(()) => ideal,
                Err(e) => {
                    // Fall back to whatever is held; the rest rolls on.
                    debug!("{e}");
                    let available = inventory.available(denomination);
                    inventory
                        .deduct(denomination, available)
                        .map_or(0, |()| available)
                }
            };
            if dispensed > 0 {
                plan.notes.push((denomination, dispensed));
            }

            remaining = remainder + (ideal - dispensed) * value;
            debug!("Dispensed {dispensed} x {denomination}, {remaining} remaining");
        }

        plan.remaining = remaining;
        plan
    }
}

impl Default for DispensingChain {
    fn default() -> Self {
        Self::standard()
    }
}
