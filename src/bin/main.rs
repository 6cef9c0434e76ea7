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

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use teller_demo_rs::{
    Db, EntryChoice, FullName, IdentityStore, Ledger, Pin, SessionChoice, TellerError, User,
    UserId, parse_amount,
};
use tracing_subscriber::EnvFilter;

/// Console ATM - register, log in, and manage an account ledger
///
/// All state lives in a SQLite database; balances are derived from the
/// append-only transaction log, never stored separately.
#[derive(Parser, Debug)]
#[command(name = "teller-demo-rs")]
#[command(about = "A console ATM over a SQLite account ledger", long_about = None)]
struct Args {
    /// Path to the SQLite database (created on first use)
    #[arg(long, value_name = "FILE", default_value = "teller.db")]
    db: PathBuf,

    /// Bank name shown on the banner
    #[arg(long, default_value = "CitiBank")]
    bank: String,

    /// Branch location shown on the banner
    #[arg(long, default_value = "New York")]
    location: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let db = match Db::open(&args.db) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error opening database '{}': {}", args.db.display(), e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run(
        &db,
        &args.bank,
        &args.location,
        &mut stdin.lock(),
        &mut stdout.lock(),
    ) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Drives the entry menu until the user exits or input ends.
///
/// Validation and authentication failures print a message and return to the
/// prompt; only I/O failures propagate. A successful login hands off to
/// [`session`], and leaving the session ends the program - there is no
/// logout back to this menu.
fn run<R: BufRead, W: Write>(
    db: &Db,
    bank: &str,
    location: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "Welcome to {bank} ({location})")?;

    loop {
        writeln!(output)?;
        writeln!(output, "1) Register")?;
        writeln!(output, "2) Log in")?;
        writeln!(output, "3) Exit")?;
        let Some(choice) = prompt(input, output, "> ", EntryChoice::parse)? else {
            return Ok(());
        };

        match choice {
            EntryChoice::Register => register_flow(db, input, output)?,
            EntryChoice::LogIn => {
                if let Some(user) = login_flow(db, input, output)? {
                    session(db, &user, input, output)?;
                    return Ok(());
                }
            }
            EntryChoice::Exit => return Ok(()),
        }
    }
}

/// Prompts until `parse` accepts a line; `None` means the input stream ended.
fn prompt<R, W, T, F>(input: &mut R, output: &mut W, msg: &str, parse: F) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, TellerError>,
{
    loop {
        write!(output, "{msg}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse(line.trim()) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

fn register_flow<R: BufRead, W: Write>(db: &Db, input: &mut R, output: &mut W) -> io::Result<()> {
    let Some(name) = prompt(input, output, "Full name (first [middle] last): ", FullName::parse)?
    else {
        return Ok(());
    };
    let Some(pin) = prompt(input, output, "Choose a 4-digit PIN: ", Pin::parse)? else {
        return Ok(());
    };

    match IdentityStore::new(db).register(&name, &pin) {
        Ok(user) => {
            writeln!(output, "Account created for {}.", user.name)?;
            writeln!(
                output,
                "Your account id is {}. You will need it to log in.",
                user.id
            )?;
        }
        Err(e) => writeln!(output, "Registration failed: {e}")?,
    }
    Ok(())
}

fn login_flow<R: BufRead, W: Write>(
    db: &Db,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<User>> {
    let Some(id) = prompt(input, output, "Account id: ", UserId::parse)? else {
        return Ok(None);
    };
    let Some(pin) = prompt(input, output, "PIN: ", Pin::parse)? else {
        return Ok(None);
    };

    match IdentityStore::new(db).authenticate(&id, &pin) {
        Ok(user) => {
            writeln!(output, "Welcome back, {}.", user.name)?;
            Ok(Some(user))
        }
        Err(e) => {
            writeln!(output, "Login failed: {e}")?;
            Ok(None)
        }
    }
}

/// Authenticated session menu: deposit, withdraw, balance, history, exit.
fn session<R: BufRead, W: Write>(
    db: &Db,
    user: &User,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    let ledger = Ledger::new(db);

    loop {
        writeln!(output)?;
        writeln!(output, "1) Deposit")?;
        writeln!(output, "2) Withdraw")?;
        writeln!(output, "3) Balance")?;
        writeln!(output, "4) History")?;
        writeln!(output, "5) Exit")?;
        let Some(choice) = prompt(input, output, "> ", SessionChoice::parse)? else {
            return Ok(());
        };

        match choice {
            SessionChoice::Deposit => {
                let Some(amount) = prompt(input, output, "Amount to deposit: ", parse_amount)?
                else {
                    return Ok(());
                };
                match ledger.deposit(&user.id, amount) {
                    Ok(t) => writeln!(output, "New balance: {}", t.running_balance)?,
                    Err(e) => writeln!(output, "{e}")?,
                }
            }
            SessionChoice::Withdraw => {
                let Some(amount) = prompt(input, output, "Amount to withdraw: ", parse_amount)?
                else {
                    return Ok(());
                };
                match ledger.withdraw(&user.id, amount) {
                    Ok(t) => writeln!(output, "New balance: {}", t.running_balance)?,
                    Err(e) => writeln!(output, "{e}")?,
                }
            }
            SessionChoice::Balance => match ledger.balance(&user.id) {
                Ok(balance) => writeln!(output, "Current balance: {balance}")?,
                Err(e) => writeln!(output, "{e}")?,
            },
            SessionChoice::History => match ledger.history(&user.id) {
                Ok(entries) if entries.is_empty() => writeln!(output, "No transactions yet.")?,
                Ok(entries) => {
                    for t in entries {
                        writeln!(
                            output,
                            "{}  {:<10}  {:>12}  {:>12}",
                            t.timestamp.format("%Y-%m-%d %H:%M:%S"),
                            t.kind.to_string(),
                            t.delta.to_string(),
                            t.running_balance.to_string(),
                        )?;
                    }
                }
                Err(e) => writeln!(output, "{e}")?,
            },
            SessionChoice::Exit => {
                writeln!(output, "Goodbye.")?;
                return Ok(());
            }
        }
    }
}
