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

//! Cash inventory.
//!
//! Counts notes per [`Denomination`]. Counts never go negative: a deduction
//! larger than what is held is rejected as a whole.
//!
//! # Example
//!
//! ```
//! use atm_session_rs::{Denomination, Inventory};
//!
//! let mut inventory = Inventory::new([(Denomination::FiveHundred, 2)]);
//! inventory.deduct(Denomination::FiveHundred, 1).unwrap();
//! assert_eq!(inventory.available(Denomination::FiveHundred), 1);
//! assert_eq!(inventory.total_cash(), 500);
//! ```

use crate::AtmError;
use crate::base::{Amount, Denomination};
use serde::Serialize;
use std::collections::BTreeMap;

/// Notes held by one machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    notes: BTreeMap<Denomination, u64>,
}

impl Inventory {
    /// Creates an inventory from `(denomination, count)` pairs.
    ///
    /// Repeated denominations are summed.
    pub fn new(counts: impl IntoIterator<Item = (Denomination, u64)>) -> Self {
        let mut inventory = Self::default();
        for (denomination, count) in counts {
            inventory.restock(denomination, count);
        }
        inventory
    }

    /// Notes held for `denomination`; zero if never stocked.
    pub fn available(&self, denomination: Denomination) -> u64 {
        self.notes.get(&denomination).copied().unwrap_or(0)
    }

    /// Sum of `count × value` over every denomination.
    pub fn total_cash(&self) -> Amount {
        self.notes
            .iter()
            .map(|(denomination, count)| count.saturating_mul(denomination.value()))
            .fold(0, Amount::saturating_add)
    }

    /// Removes `count` notes of `denomination`.
    ///
    /// # Errors
    ///
    /// [`AtmError::InsufficientNotes`] if `count` exceeds [`available`](Self::available).
    /// Nothing is deducted in that case.
    pub fn deduct(&mut self, denomination: Denomination, count: u64) -> Result<(), AtmError> {
        let available = self.available(denomination);
        if count > available {
            return Err(AtmError::InsufficientNotes {
                denomination,
                requested: count,
                available,
            });
        }
        if count > 0 {
            self.notes.insert(denomination, available - count);
        }
        Ok(())
    }

    /// Adds `count` notes of `denomination`.
    pub fn restock(&mut self, denomination: Denomination, count: u64) {
        let held = self.notes.entry(denomination).or_insert(0);
        *held = held.saturating_add(count);
    }

    /// Read-only snapshot for display, largest denomination first.
    pub fn report(&self) -> StatusReport {
        let notes = Denomination::ALL
            .into_iter()
            .map(|denomination| {
                let count = self.available(denomination);
                NoteCount {
                    denomination,
                    count,
                    value: count.saturating_mul(denomination.value()),
                }
            })
            .collect();
        StatusReport {
            notes,
            total_cash: self.total_cash(),
        }
    }
}

/// One row of a [`StatusReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteCount {
    pub denomination: Denomination,
    pub count: u64,
    pub value: Amount,
}

/// Machine cash status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub notes: Vec<NoteCount>,
    pub total_cash: Amount,
}
