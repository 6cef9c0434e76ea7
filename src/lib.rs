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

//! # Teller Demo
//!
//! This library provides the account core of a console ATM: user
//! registration and authentication, and an append-only transaction ledger
//! from which balances are derived.
//!
//! ## Core Components
//!
//! - [`IdentityStore`]: Registers users and verifies id/PIN credentials
//! - [`Ledger`]: Append-only transaction log; balance is always the running
//!   balance of the newest entry
//! - [`Db`]: SQLite handle shared by both components
//! - [`TellerError`]: Error types for validation, authentication, and
//!   ledger failures
//!
//! ## Example
//!
//! ```
//! use teller_demo_rs::{Db, FullName, IdentityStore, Ledger, Pin};
//! use rust_decimal_macros::dec;
//!
//! let db = Db::in_memory().unwrap();
//! let identity = IdentityStore::new(&db);
//!
//! // Register a user and authenticate with the generated id
//! let name = FullName::parse("Ada Lovelace").unwrap();
//! let pin = Pin::parse("4321").unwrap();
//! let user = identity.register(&name, &pin).unwrap();
//! let user = identity.authenticate(&user.id, &pin).unwrap();
//!
//! // Deposit and check the derived balance
//! let ledger = Ledger::new(&db);
//! ledger.deposit(&user.id, dec!(100.00)).unwrap();
//! assert_eq!(ledger.balance(&user.id).unwrap(), dec!(100.00));
//! ```
//!
//! ## Session Model
//!
//! One interactive session at a time: a caller authenticates once, then
//! performs any number of deposit/withdraw/balance/history operations with
//! the returned [`User`] handle until the session ends. Every
//! read-then-append runs inside a single database transaction, so the
//! engine stays correct if lifted into a concurrent context.

mod base;
mod db;
pub mod error;
mod identity;
pub mod input;
mod ledger;

pub use base::{TransactionId, UserId};
pub use db::Db;
pub use error::TellerError;
pub use identity::{IdentityStore, User};
pub use input::{EntryChoice, FullName, Pin, SessionChoice, parse_amount};
pub use ledger::{Ledger, Transaction, TransactionKind};
