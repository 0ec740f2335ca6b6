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

//! # ATM Session
//!
//! This library models a single automated teller machine serving one
//! session at a time: card authentication, transaction selection, cash
//! withdrawal with note dispensing, and balance inquiry.
//!
//! ## Core Components
//!
//! - [`Atm`]: The machine. Owns the cash and drives the session.
//! - [`Session`]: Tagged union of session states, each holding the card in use.
//! - [`DispensingChain`]: Greedy conversion of an amount into notes.
//! - [`Inventory`]: Notes held per [`Denomination`].
//! - [`Account`]: Balance of the account linked to a card.
//! - [`AtmError`]: Error types for rejected or failed actions.
//!
//! ## Example
//!
//! ```
//! use atm_session_rs::{
//!     Account, AccountNumber, Atm, Card, CardNumber, Denomination, DispensingChain, Inventory,
//!     Operation, Pin, State,
//! };
//! use std::sync::Arc;
//!
//! let inventory = Inventory::new([
//!     (Denomination::TwoThousand, 1),
//!     (Denomination::FiveHundred, 2),
//!     (Denomination::Hundred, 5),
//! ]);
//! let mut atm = Atm::new(inventory, DispensingChain::standard());
//!
//! let account = Arc::new(Account::new(AccountNumber(1), 3000));
//! let card = Card::new(CardNumber(4111), Pin::new("1234"), Arc::clone(&account));
//!
//! atm.insert_card(card).unwrap();
//! atm.authenticate_pin(CardNumber(4111), Pin::new("1234")).unwrap();
//! atm.select_operation(Operation::Withdrawal).unwrap();
//! let outcome = atm.withdraw(2700).unwrap();
//!
//! let plan = outcome.plan().unwrap();
//! assert_eq!(
//!     plan.notes(),
//!     &[
//!         (Denomination::TwoThousand, 1),
//!         (Denomination::FiveHundred, 1),
//!         (Denomination::Hundred, 2),
//!     ]
//! );
//! assert_eq!(account.balance(), 300);
//! assert_eq!(atm.state(), State::Idle);
//! ```
//!
//! ## Failures
//!
//! No failure is fatal. Actions outside their state are rejected without
//! changing anything; every other failure returns the machine to
//! [`State::Idle`]. A withdrawal that cannot be dispensed is reversed on
//! both the account and the inventory.

pub mod account;
mod atm;
mod bank;
mod base;
pub mod config;
mod card;
mod dispenser;
pub mod error;
mod inventory;
mod session;
mod withdrawal;

pub use account::Account;
pub use atm::Atm;
pub use bank::Bank;
pub use base::{AccountNumber, Amount, CardNumber, Denomination, Pin};
pub use card::Card;
pub use config::AtmConfig;
pub use dispenser::{DispensingChain, WithdrawalPlan};
pub use error::{AtmError, ConfigError};
pub use inventory::{Inventory, NoteCount, StatusReport};
pub use session::{Action, Operation, Outcome, Session, State};
