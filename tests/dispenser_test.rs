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

//! Dispensing chain and inventory integration tests.

use atm_session_rs::{AtmError, Denomination, DispensingChain, Inventory};

fn inventory(twos: u64, fives: u64, hundreds: u64) -> Inventory {
    Inventory::new([
        (Denomination::TwoThousand, twos),
        (Denomination::FiveHundred, fives),
        (Denomination::Hundred, hundreds),
    ])
}

#[test]
fn exact_greedy_breakdown() {
    let mut inv = inventory(1, 2, 5);
    let plan = DispensingChain::standard().dispense(2700, &mut inv);

    assert!(plan.is_fulfilled());
    assert_eq!(
        plan.notes(),
        &[
            (Denomination::TwoThousand, 1),
            (Denomination::FiveHundred, 1),
            (Denomination::Hundred, 2),
        ]
    );
    assert_eq!(plan.total(), 2700);
    assert_eq!(inv, inventory(0, 1, 3));
}

#[test]
fn only_large_notes_cannot_make_small_amount() {
    let mut inv = inventory(5, 0, 0);
    let plan = DispensingChain::standard().dispense(300, &mut inv);

    assert!(!plan.is_fulfilled());
    assert_eq!(plan.remaining(), 300);
    assert!(plan.notes().is_empty());
    assert_eq!(inv, inventory(5, 0, 0));
}

#[test]
fn missing_large_notes_fall_through() {
    let mut inv = inventory(0, 0, 30);
    let plan = DispensingChain::standard().dispense(2500, &mut inv);

    assert!(plan.is_fulfilled());
    assert_eq!(plan.notes(), &[(Denomination::Hundred, 25)]);
    assert_eq!(plan.count(Denomination::TwoThousand), 0);
    assert_eq!(inv.available(Denomination::Hundred), 5);
}

#[test]
fn amount_not_multiple_of_smallest_note_is_unfulfilled() {
    let mut inv = inventory(1, 1, 1);
    let plan = DispensingChain::standard().dispense(2650, &mut inv);

    assert_eq!(plan.remaining(), 50);
    // Chain leaves its deductions in place.
    assert_eq!(inv, inventory(0, 0, 0));

    plan.restore(&mut inv);
    assert_eq!(inv, inventory(1, 1, 1));
}

#[test]
fn chain_without_hundreds_ignores_hundred_stock() {
    let chain =
        DispensingChain::new(vec![Denomination::TwoThousand, Denomination::FiveHundred]).unwrap();
    let mut inv = inventory(1, 1, 10);
    let plan = chain.dispense(2600, &mut inv);

    assert_eq!(plan.remaining(), 100);
    assert_eq!(inv.available(Denomination::Hundred), 10);
}

#[test]
fn chain_is_reusable_across_runs() {
    let chain = DispensingChain::standard();
    let mut inv = inventory(2, 2, 2);

    assert!(chain.dispense(2500, &mut inv).is_fulfilled());
    assert!(chain.dispense(2500, &mut inv).is_fulfilled());
    assert_eq!(inv, inventory(0, 0, 2));
}

#[test]
fn inventory_deduct_guards_each_denomination() {
    let mut inv = inventory(1, 0, 0);
    assert_eq!(
        inv.deduct(Denomination::TwoThousand, 2),
        Err(AtmError::InsufficientNotes {
            denomination: Denomination::TwoThousand,
            requested: 2,
            available: 1,
        })
    );
    inv.deduct(Denomination::TwoThousand, 1).unwrap();
    assert_eq!(inv.total_cash(), 0);
}
