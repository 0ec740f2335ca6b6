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

//! The ATM.
//!
//! An [`Atm`] owns one cash [`Inventory`], one [`DispensingChain`] and the
//! current [`Session`]. Every user action goes through [`Atm::handle`] (or
//! one of its named wrappers) and runs to completion before returning.
//!
//! Withdrawals are carried out by the `withdrawal` module,
//! which reverses both the debit and the dispensed notes when the chain
//! cannot make up the amount.

use crate::AtmError;
use crate::base::{Amount, CardNumber, Pin};
use crate::card::Card;
use crate::dispenser::DispensingChain;
use crate::inventory::{Inventory, StatusReport};
use crate::session::{Action, Operation, Outcome, Session, State};

/// A single machine serving one session at a time.
#[derive(Debug)]
pub struct Atm {
    inventory: Inventory,
    chain: DispensingChain,
    session: Session,
}

impl Atm {
    /// Creates an idle machine.
    pub fn new(inventory: Inventory, chain: DispensingChain) -> Self {
        Self {
            inventory,
            chain,
            session: Session::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Card in the slot, if any.
    pub fn active_card(&self) -> Option<&Card> {
        self.session.card()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn chain(&self) -> &DispensingChain {
        &self.chain
    }

    pub fn status(&self) -> StatusReport {
        self.inventory.report()
    }

    /// Dispatches `action` to the current state.
    ///
    /// # Errors
    ///
    /// - [`AtmError::InvalidStateTransition`] - action is not legal now; state is unchanged.
    /// - [`AtmError::InvalidPin`], [`AtmError::CardMismatch`] - authentication failed.
    /// - [`AtmError::InvalidAmount`], [`AtmError::InsufficientAtmFunds`],
    ///   [`AtmError::InsufficientAccountFunds`], [`AtmError::CannotFulfillAmount`] -
    ///   withdrawal failed.
    ///
    /// After any error other than `InvalidStateTransition` the machine is idle.
    pub fn handle(&mut self, action: Action) -> Result<Outcome, AtmError> {
        let session = std::mem::take(&mut self.session);
        let (next, result) = session.apply(action, &mut self.inventory, &self.chain);
        self.session = next;
        result
    }

    pub fn insert_card(&mut self, card: Card) -> Result<Outcome, AtmError> {
        self.handle(Action::InsertCard(card))
    }

    pub fn authenticate_pin(&mut self, card: CardNumber, pin: Pin) -> Result<Outcome, AtmError> {
        self.handle(Action::AuthenticatePin { card, pin })
    }

    pub fn select_operation(&mut self, operation: Operation) -> Result<Outcome, AtmError> {
        self.handle(Action::SelectOperation(operation))
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<Outcome, AtmError> {
        self.handle(Action::Withdraw(amount))
    }

    pub fn inquire_balance(&mut self) -> Result<Outcome, AtmError> {
        self.handle(Action::InquireBalance)
    }

    pub fn exit(&mut self) -> Result<Outcome, AtmError> {
        self.handle(Action::Exit)
    }
}
