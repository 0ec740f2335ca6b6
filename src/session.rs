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

//! Session state machine.
//!
//! ```text
//!  Idle ──insert card──► CardPresented ──PIN ok──► Authenticated
//!   ▲                        │                      │        │
//!   │                    wrong PIN            withdrawal  balance
//!   │                        │                      ▼        ▼
//!   ◄────────────────────────┘               Withdrawing  BalanceInquiry
//!   │                                               │        │
//!   ◄──────────────── withdraw (any result) ────────┘        │
//!   ◄──────────────── inquire ───────────────────────────────┘
//! ```
//!
//! `exit` returns to `Idle` from every state except `Idle`. Any other action
//! outside its state is rejected with [`AtmError::InvalidStateTransition`]
//! and leaves the session untouched.

use crate::AtmError;
use crate::base::{Amount, CardNumber, Pin};
use crate::card::Card;
use crate::dispenser::{DispensingChain, WithdrawalPlan};
use crate::inventory::Inventory;
use crate::withdrawal::withdraw_cash;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Idle,
    CardPresented,
    Authenticated,
    Withdrawing,
    BalanceInquiry,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Idle => "idle",
            State::CardPresented => "card presented",
            State::Authenticated => "authenticated",
            State::Withdrawing => "withdrawing",
            State::BalanceInquiry => "in balance inquiry",
        };
        f.write_str(name)
    }
}

/// Transaction type picked after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Withdrawal,
    #[serde(alias = "balance")]
    BalanceCheck,
}

/// User input driving the machine.
#[derive(Debug, Clone)]
pub enum Action {
    InsertCard(Card),
    AuthenticatePin { card: CardNumber, pin: Pin },
    SelectOperation(Operation),
    Withdraw(Amount),
    InquireBalance,
    Exit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::InsertCard(_) => "insert card",
            Action::AuthenticatePin { .. } => "authenticate",
            Action::SelectOperation(_) => "select operation",
            Action::Withdraw(_) => "withdraw",
            Action::InquireBalance => "inquire balance",
            Action::Exit => "exit",
        }
    }
}

/// Successful result of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    CardAccepted(CardNumber),
    Authenticated,
    OperationSelected(Operation),
    Dispensed(WithdrawalPlan),
    Balance(Amount),
    CardReturned,
}

impl Outcome {
    pub fn plan(&self) -> Option<&WithdrawalPlan> {
        match self {
            Outcome::Dispensed(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<Amount> {
        match self {
            Outcome::Balance(balance) => Some(*balance),
            _ => None,
        }
    }
}

/// Active state together with the card in use.
///
/// Only `Idle` carries no card; the card is dropped when the session ends.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Idle,
    CardPresented(Card),
    Authenticated(Card),
    Withdrawing(Card),
    BalanceInquiry(Card),
}

impl Session {
    pub fn state(&self) -> State {
        match self {
            Session::Idle => State::Idle,
            Session::CardPresented(_) => State::CardPresented,
            Session::Authenticated(_) => State::Authenticated,
            Session::Withdrawing(_) => State::Withdrawing,
            Session::BalanceInquiry(_) => State::BalanceInquiry,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            Session::Idle => None,
            Session::CardPresented(card)
            | Session::Authenticated(card)
            | Session::Withdrawing(card)
            | Session::BalanceInquiry(card) => Some(card),
        }
    }

    /// Applies `action` and returns the next session with the action's result.
    ///
    /// # Transitions
    ///
    /// | State | Action | Next |
    /// |-------|--------|------|
    /// | Idle | insert card | CardPresented |
    /// | CardPresented | authenticate | Authenticated, or Idle on failure |
    /// | Authenticated | select operation | Withdrawing / BalanceInquiry |
    /// | Withdrawing | withdraw | Idle |
    /// | BalanceInquiry | inquire balance | Idle |
    /// | any but Idle | exit | Idle |
    pub fn apply(
        self,
        action: Action,
        inventory: &mut Inventory,
        chain: &DispensingChain,
    ) -> (Session, Result<Outcome, AtmError>) {
        let from = self.state();
        let (next, result) = match (self, action) {
            (Session::Idle, Action::InsertCard(card)) => {
                let number = card.number();
                (Session::CardPresented(card), Ok(Outcome::CardAccepted(number)))
            }
            (Session::CardPresented(card), Action::AuthenticatePin { card: offered, pin }) => {
                if offered != card.number() {
                    (Session::Idle, Err(AtmError::CardMismatch(offered)))
                } else if !card.validate_pin(&pin) {
                    (Session::Idle, Err(AtmError::InvalidPin))
                } else {
                    (Session::Authenticated(card), Ok(Outcome::Authenticated))
                }
            }
            (Session::Authenticated(card), Action::SelectOperation(operation)) => {
                let next = match operation {
                    Operation::Withdrawal => Session::Withdrawing(card),
                    Operation::BalanceCheck => Session::BalanceInquiry(card),
                };
                (next, Ok(Outcome::OperationSelected(operation)))
            }
            (Session::Withdrawing(card), Action::Withdraw(amount)) => {
                let result = withdraw_cash(inventory, chain, card.linked_account(), amount)
                    .map(Outcome::Dispensed);
                (Session::Idle, result)
            }
            (Session::BalanceInquiry(card), Action::InquireBalance) => {
                let balance = card.linked_account().balance();
                info!("Card {}: balance {}", card.number(), balance);
                (Session::Idle, Ok(Outcome::Balance(balance)))
            }
            (session, Action::Exit) if !matches!(session, Session::Idle) => {
                (Session::Idle, Ok(Outcome::CardReturned))
            }
            (session, action) => {
                let error = AtmError::InvalidStateTransition {
                    state: session.state(),
                    action: action.name(),
                };
                warn!("Rejected action: {error}");
                return (session, Err(error));
            }
        };

        match &result {
            Ok(_) => debug!("Session {from} -> {}", next.state()),
            Err(e) => warn!("Session {from} -> {}: {e}", next.state()),
        }
        (next, result)
    }
}
