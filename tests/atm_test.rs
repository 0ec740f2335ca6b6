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

//! ATM session integration tests.

use atm_session_rs::{
    Account, AccountNumber, Atm, AtmError, Card, CardNumber, Denomination, DispensingChain,
    Inventory, Operation, Outcome, Pin, State,
};
use std::sync::Arc;

// === Helper Functions ===

const CARD: CardNumber = CardNumber(4111);

fn machine(twos: u64, fives: u64, hundreds: u64) -> Atm {
    let inventory = Inventory::new([
        (Denomination::TwoThousand, twos),
        (Denomination::FiveHundred, fives),
        (Denomination::Hundred, hundreds),
    ]);
    Atm::new(inventory, DispensingChain::standard())
}

fn card_with_balance(balance: u64) -> (Card, Arc<Account>) {
    let account = Arc::new(Account::new(AccountNumber(1), balance));
    let card = Card::new(CARD, Pin::new("1234"), Arc::clone(&account));
    (card, account)
}

fn ready_to_withdraw(atm: &mut Atm, card: Card) {
    atm.insert_card(card).unwrap();
    atm.authenticate_pin(CARD, Pin::new("1234")).unwrap();
    atm.select_operation(Operation::Withdrawal).unwrap();
    assert_eq!(atm.state(), State::Withdrawing);
}

// === Scenarios ===

#[test]
fn withdraw_2700_from_mixed_inventory() {
    let mut atm = machine(1, 2, 5);
    let (card, account) = card_with_balance(3000);
    ready_to_withdraw(&mut atm, card);

    let outcome = atm.withdraw(2700).unwrap();

    let plan = outcome.plan().unwrap();
    assert_eq!(
        plan.notes(),
        &[
            (Denomination::TwoThousand, 1),
            (Denomination::FiveHundred, 1),
            (Denomination::Hundred, 2),
        ]
    );
    assert_eq!(atm.inventory().available(Denomination::TwoThousand), 0);
    assert_eq!(atm.inventory().available(Denomination::FiveHundred), 1);
    assert_eq!(atm.inventory().available(Denomination::Hundred), 3);
    assert_eq!(account.balance(), 300);
    assert_eq!(atm.state(), State::Idle);
    assert!(atm.active_card().is_none());
}

#[test]
fn undispensable_amount_is_compensated() {
    let mut atm = machine(5, 0, 0);
    let (card, account) = card_with_balance(1000);
    ready_to_withdraw(&mut atm, card);

    let result = atm.withdraw(300);

    assert_eq!(result, Err(AtmError::CannotFulfillAmount { remaining: 300 }));
    assert_eq!(account.balance(), 1000);
    assert_eq!(atm.inventory().available(Denomination::TwoThousand), 5);
    assert_eq!(atm.state(), State::Idle);
}

#[test]
fn partial_dispense_is_rolled_back() {
    let mut atm = machine(1, 1, 0);
    let (card, account) = card_with_balance(10_000);
    ready_to_withdraw(&mut atm, card);

    let result = atm.withdraw(2100);

    assert_eq!(result, Err(AtmError::CannotFulfillAmount { remaining: 100 }));
    assert_eq!(account.balance(), 10_000);
    assert_eq!(atm.inventory().total_cash(), 2500);
    assert_eq!(atm.inventory().available(Denomination::TwoThousand), 1);
}

#[test]
fn account_shortfall_touches_nothing() {
    let mut atm = machine(5, 10, 10);
    let (card, account) = card_with_balance(1000);
    ready_to_withdraw(&mut atm, card);
    let before = atm.inventory().clone();

    let result = atm.withdraw(5000);

    assert_eq!(result, Err(AtmError::InsufficientAccountFunds));
    assert_eq!(account.balance(), 1000);
    assert_eq!(atm.inventory(), &before);
    assert_eq!(atm.state(), State::Idle);
}

#[test]
fn atm_shortfall_is_reported_first() {
    let mut atm = machine(0, 1, 0);
    let (card, account) = card_with_balance(100);
    ready_to_withdraw(&mut atm, card);

    let result = atm.withdraw(1000);

    assert_eq!(
        result,
        Err(AtmError::InsufficientAtmFunds {
            requested: 1000,
            available: 500,
        })
    );
    assert_eq!(account.balance(), 100);
}

#[test]
fn zero_withdrawal_ends_session() {
    let mut atm = machine(1, 1, 1);
    let (card, account) = card_with_balance(1000);
    ready_to_withdraw(&mut atm, card);

    assert_eq!(atm.withdraw(0), Err(AtmError::InvalidAmount));
    assert_eq!(account.balance(), 1000);
    assert_eq!(atm.state(), State::Idle);
}

// === Authentication ===

#[test]
fn correct_pin_authenticates() {
    let mut atm = machine(1, 1, 1);
    let (card, _) = card_with_balance(0);
    atm.insert_card(card).unwrap();

    let outcome = atm.authenticate_pin(CARD, Pin::new("1234"));

    assert_eq!(outcome, Ok(Outcome::Authenticated));
    assert_eq!(atm.state(), State::Authenticated);
}

#[test]
fn wrong_pin_returns_to_idle() {
    let mut atm = machine(1, 1, 1);
    let (card, _) = card_with_balance(0);
    atm.insert_card(card).unwrap();

    assert_eq!(
        atm.authenticate_pin(CARD, Pin::new("9999")),
        Err(AtmError::InvalidPin)
    );
    assert_eq!(atm.state(), State::Idle);
    assert!(atm.active_card().is_none());
}

#[test]
fn machine_is_reusable_after_failure() {
    let mut atm = machine(1, 1, 1);
    let (card, account) = card_with_balance(5000);

    atm.insert_card(card.clone()).unwrap();
    let _ = atm.authenticate_pin(CARD, Pin::new("0000"));
    assert_eq!(atm.state(), State::Idle);

    ready_to_withdraw(&mut atm, card);
    atm.withdraw(600).unwrap();
    assert_eq!(account.balance(), 4400);
}

// === Balance Inquiry ===

#[test]
fn balance_inquiry_reports_and_ends_session() {
    let mut atm = machine(1, 1, 1);
    let (card, _) = card_with_balance(4200);
    atm.insert_card(card).unwrap();
    atm.authenticate_pin(CARD, Pin::new("1234")).unwrap();
    atm.select_operation(Operation::BalanceCheck).unwrap();
    assert_eq!(atm.state(), State::BalanceInquiry);

    let outcome = atm.inquire_balance().unwrap();

    assert_eq!(outcome.balance(), Some(4200));
    assert_eq!(atm.state(), State::Idle);
}

// === Illegal Actions ===

#[test]
fn illegal_actions_are_rejected_without_state_change() {
    let mut atm = machine(1, 1, 1);
    let (card, account) = card_with_balance(1000);
    atm.insert_card(card.clone()).unwrap();

    for _ in 0..3 {
        assert_eq!(
            atm.withdraw(100),
            Err(AtmError::InvalidStateTransition {
                state: State::CardPresented,
                action: "withdraw",
            })
        );
        assert!(atm.inquire_balance().is_err());
        assert!(atm.select_operation(Operation::Withdrawal).is_err());
        assert!(atm.insert_card(card.clone()).is_err());
        assert_eq!(atm.state(), State::CardPresented);
    }
    assert_eq!(account.balance(), 1000);
}

#[test]
fn withdraw_not_allowed_in_balance_inquiry() {
    let mut atm = machine(1, 1, 1);
    let (card, _) = card_with_balance(1000);
    atm.insert_card(card).unwrap();
    atm.authenticate_pin(CARD, Pin::new("1234")).unwrap();
    atm.select_operation(Operation::BalanceCheck).unwrap();

    assert!(matches!(
        atm.withdraw(100),
        Err(AtmError::InvalidStateTransition {
            state: State::BalanceInquiry,
            ..
        })
    ));
    assert_eq!(atm.state(), State::BalanceInquiry);
}

#[test]
fn exit_from_idle_is_rejected() {
    let mut atm = machine(1, 1, 1);
    assert_eq!(
        atm.exit(),
        Err(AtmError::InvalidStateTransition {
            state: State::Idle,
            action: "exit",
        })
    );
}

#[test]
fn exit_cancels_withdrawal() {
    let mut atm = machine(1, 1, 1);
    let (card, account) = card_with_balance(1000);
    ready_to_withdraw(&mut atm, card);

    assert_eq!(atm.exit(), Ok(Outcome::CardReturned));
    assert_eq!(atm.state(), State::Idle);
    assert_eq!(account.balance(), 1000);
}

// === Status Report ===

#[test]
fn status_report_is_read_only() {
    let atm = machine(1, 2, 5);
    let report = atm.status();

    assert_eq!(report.total_cash, 3500);
    assert_eq!(report.notes[1].count, 2);
    assert_eq!(atm.inventory().total_cash(), 3500);
}
