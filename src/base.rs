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

//! Core identifier and value types for cards, accounts and notes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole rupees. Notes cannot dispense fractions, so amounts are integral.
pub type Amount = u64;

/// Number printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CardNumber(pub u64);

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a bank account linked to one or more cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal identification number.
///
/// Stored as text so leading zeros survive. `Display` masks the digits.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Pin(String);

impl Pin {
    pub fn new(digits: impl Into<String>) -> Self {
        Self(digits.into())
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// Note values the machine can hold. Ordered by face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Denomination {
    TwoThousand,
    FiveHundred,
    Hundred,
}

impl Denomination {
    /// All denominations, largest first.
    pub const ALL: [Denomination; 3] = [
        Denomination::TwoThousand,
        Denomination::FiveHundred,
        Denomination::Hundred,
    ];

    pub const fn value(self) -> Amount {
        match self {
            Denomination::TwoThousand => 2000,
            Denomination::FiveHundred => 500,
            Denomination::Hundred => 100,
        }
    }
}

impl PartialOrd for Denomination {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Denomination {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value().cmp(&other.value())
    }
}

impl TryFrom<u64> for Denomination {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or_else(|| format!("unsupported denomination {value}"))
    }
}

impl From<Denomination> for u64 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denominations_order_by_value() {
        assert!(Denomination::TwoThousand > Denomination::FiveHundred);
        assert!(Denomination::FiveHundred > Denomination::Hundred);
    }

    #[test]
    fn denomination_from_value() {
        assert_eq!(Denomination::try_from(500), Ok(Denomination::FiveHundred));
        assert!(Denomination::try_from(200).is_err());
    }

    #[test]
    fn pin_is_masked() {
        let pin = Pin::new("0042");
        assert_eq!(pin.to_string(), "****");
        assert_eq!(format!("{pin:?}"), "Pin(****)");
    }
}
