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

use atm_session_rs::{Action, Atm, AtmConfig, Bank, CardNumber, Operation, Outcome, Pin};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

/// ATM Session - Replay user actions against one machine
///
/// Reads user actions from a CSV file, drives the ATM session with them and
/// writes the machine's cash status to stdout. Set `RUST_LOG=info` to see
/// each action's result.
#[derive(Parser, Debug)]
#[command(name = "atm-session-rs")]
#[command(about = "Replays ATM user actions from a CSV file", long_about = None)]
struct Args {
    /// Path to CSV file with actions
    ///
    /// Expected format: action,card,value
    /// Example: cargo run -- actions.csv > status.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// TOML file with initial notes, accounts and cards (demo machine if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match AtmConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => AtmConfig::default(),
    };

    let (mut atm, bank) = match config.build() {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("Error building ATM: {}", e);
            process::exit(1);
        }
    };

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = process_actions(BufReader::new(file), &mut atm, &bank) {
        eprintln!("Error processing actions: {}", e);
        process::exit(1);
    }

    for account in bank.accounts() {
        info!("Account {}: balance {}", account.number(), account.balance());
    }

    if let Err(e) = write_status(&atm, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the input format.
///
/// Fields: `action, card, value`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    action: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    card: Option<u64>,
    value: Option<String>,
}

impl CsvRecord {
    /// Converts a CSV record to an [`Action`].
    ///
    /// Returns `None` for unknown actions, unknown cards or missing fields.
    fn into_action(self, bank: &Bank) -> Option<Action> {
        match self.action.to_lowercase().as_str() {
            "insert" => {
                let card = bank.card(&CardNumber(self.card?))?;
                Some(Action::InsertCard(card.clone()))
            }
            "pin" => Some(Action::AuthenticatePin {
                card: CardNumber(self.card?),
                pin: Pin::new(self.value?),
            }),
            "select" => {
                let operation = match self.value?.to_lowercase().as_str() {
                    "withdrawal" => Operation::Withdrawal,
                    "balance" => Operation::BalanceCheck,
                    _ => return None,
                };
                Some(Action::SelectOperation(operation))
            }
            "withdraw" => Some(Action::Withdraw(self.value?.parse().ok()?)),
            "inquire" => Some(Action::InquireBalance),
            "exit" => Some(Action::Exit),
            _ => None,
        }
    }
}

/// Replays actions from a CSV reader against `atm`.
///
/// # CSV Format
///
/// Expected columns: `action, card, value`
/// - `action`: insert, pin, select, withdraw, inquire, exit
/// - `card`: Card number (insert and pin)
/// - `value`: PIN, operation (`withdrawal` or `balance`) or amount
///
/// # Example
///
/// ```csv
/// action,card,value
/// insert,4111,
/// pin,4111,1234
/// select,,withdrawal
/// withdraw,,2700
/// ```
///
/// Malformed rows and rejected actions are logged and skipped.
///
/// # Errors
///
/// Returns a CSV error if the reader fails.
pub fn process_actions<R: Read>(reader: R, atm: &mut Atm, bank: &Bank) -> Result<(), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for (row_idx, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let row = row_idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Row {}: skipping malformed row: {}", row, e);
                continue;
            }
        };

        let Some(action) = record.into_action(bank) else {
            warn!("Row {}: skipping invalid action", row);
            continue;
        };

        match atm.handle(action) {
            Ok(Outcome::Dispensed(plan)) => info!("Row {}: dispensed {:?}", row, plan.notes()),
            Ok(Outcome::Balance(balance)) => info!("Row {}: balance {}", row, balance),
            Ok(outcome) => info!("Row {}: {:?}, now {}", row, outcome, atm.state()),
            Err(e) => warn!("Row {}: {}", row, e),
        }
    }

    Ok(())
}

/// Writes the machine's cash status as CSV.
///
/// # CSV Format
///
/// Columns: `denomination, count, value`, followed by a `total` row.
///
/// ```csv
/// denomination,count,value
/// 2000,0,0
/// 500,1,500
/// 100,3,300
/// total,,800
/// ```
pub fn write_status<W: Write>(atm: &Atm, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    let report = atm.status();
    for row in &report.notes {
        wtr.serialize(row)?;
    }
    let total = report.total_cash.to_string();
    wtr.write_record(["total", "", total.as_str()])?;

    wtr.flush()?;
    Ok(())
}
