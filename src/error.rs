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

//! Error types for ATM sessions and machine configuration.

use crate::base::{Amount, CardNumber, Denomination};
use crate::session::State;
use thiserror::Error;

/// Session errors.
///
/// Every variant is recoverable: after any of them the machine is either
/// unchanged (rejected action) or back in [`State::Idle`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtmError {
    /// Action is not legal in the current state
    #[error("cannot {action} while {state}")]
    InvalidStateTransition { state: State, action: &'static str },

    /// PIN does not match the card's stored credential
    #[error("invalid PIN")]
    InvalidPin,

    /// PIN was offered for a card other than the inserted one
    #[error("card {0} is not the inserted card")]
    CardMismatch(CardNumber),

    /// Withdrawal amount is zero
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Requested amount exceeds the cash held by the machine
    #[error("insufficient cash in ATM: requested {requested}, available {available}")]
    InsufficientAtmFunds { requested: Amount, available: Amount },

    /// Requested amount exceeds the account balance
    #[error("insufficient account funds")]
    InsufficientAccountFunds,

    /// Deduction exceeds the notes held for one denomination
    #[error("insufficient {denomination} notes: requested {requested}, available {available}")]
    InsufficientNotes {
        denomination: Denomination,
        requested: u64,
        available: u64,
    },

    /// Inventory composition cannot make up the amount
    #[error("cannot dispense amount with available notes ({remaining} unfulfilled)")]
    CannotFulfillAmount { remaining: Amount },
}

/// Errors loading or validating machine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("denomination order must not be empty")]
    EmptyDenominationOrder,

    #[error("denomination order must be strictly descending without duplicates, got {0:?}")]
    InvalidDenominationOrder(Vec<Denomination>),

    #[error("duplicate card number {0}")]
    DuplicateCard(CardNumber),
}
