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

//! Append-only transaction ledger.
//!
//! The ledger is the single source of truth for balances: a user's balance
//! is the `running_balance` of their newest transaction, zero if they have
//! none. There is no separately stored balance to drift out of sync.
//!
//! # Invariants
//!
//! - Rows are append-only; nothing updates or deletes a recorded transaction.
//! - Per user, ordered by [`TransactionId`],
//!   `running_balance[n] = running_balance[n-1] + delta[n]`.
//! - `running_balance` never goes negative; an overdrawing withdrawal is
//!   rejected before any row is written.
//!
//! Each read-then-append pair runs inside one database transaction, so two
//! concurrent withdrawals cannot both read a stale balance and overdraw.

use crate::base::{TransactionId, UserId};
use crate::db::Db;
use crate::error::TellerError;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The two balance-affecting events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    /// Signed amount applied: positive for deposits, negative for withdrawals.
    pub delta: Decimal,
    /// Balance immediately after this transaction.
    pub running_balance: Decimal,
}

/// Owns transaction creation and balance derivation for authenticated users.
pub struct Ledger<'a> {
    db: &'a Db,
}

impl<'a> Ledger<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Returns the user's current balance.
    ///
    /// This is the `running_balance` of the newest recorded transaction, or
    /// zero for a user with no transactions yet.
    ///
    /// # Errors
    ///
    /// [`TellerError::StorageUnavailable`] if the store cannot be reached.
    pub fn balance(&self, user: &UserId) -> Result<Decimal, TellerError> {
        Self::balance_in(self.db.conn(), user)
    }

    /// Credits `amount` to the user's account and returns the recorded entry.
    ///
    /// # Errors
    ///
    /// [`TellerError::InvalidAmount`] unless `amount > 0`.
    pub fn deposit(&self, user: &UserId, amount: Decimal) -> Result<Transaction, TellerError> {
        if amount <= Decimal::ZERO {
            return Err(TellerError::InvalidAmount);
        }

        let tx = self.db.conn().unchecked_transaction()?;
        let balance = Self::balance_in(&tx, user)?;
        let record = Self::append(&tx, user, TransactionKind::Deposit, amount, balance + amount)?;
        tx.commit()?;

        tracing::debug!(user = %user, amount = %amount, balance = %record.running_balance, "deposit applied");
        Ok(record)
    }

    /// Debits `amount` from the user's account and returns the recorded entry.
    ///
    /// # Errors
    ///
    /// [`TellerError::InvalidAmount`] unless `amount > 0`.
    /// [`TellerError::InsufficientFunds`] if `amount` exceeds the current
    /// balance; no transaction is recorded on that path.
    pub fn withdraw(&self, user: &UserId, amount: Decimal) -> Result<Transaction, TellerError> {
        if amount <= Decimal::ZERO {
            return Err(TellerError::InvalidAmount);
        }

        let tx = self.db.conn().unchecked_transaction()?;
        let balance = Self::balance_in(&tx, user)?;
        if amount > balance {
            return Err(TellerError::InsufficientFunds);
        }
        let record = Self::append(
            &tx,
            user,
            TransactionKind::Withdrawal,
            -amount,
            balance - amount,
        )?;
        tx.commit()?;

        tracing::debug!(user = %user, amount = %amount, balance = %record.running_balance, "withdrawal applied");
        Ok(record)
    }

    /// Returns the user's full transaction history in insertion order.
    ///
    /// A user with no transactions gets an empty vec, never an error.
    pub fn history(&self, user: &UserId) -> Result<Vec<Transaction>, TellerError> {
        let mut stmt = self.db.conn().prepare(
            "SELECT transaction_id, user_id, timestamp, message, change_in_balance, curr_balance
             FROM transactions WHERE user_id = ?1 ORDER BY transaction_id ASC",
        )?;
        let rows = stmt.query_map(params![user.as_str()], Self::row_to_transaction)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    fn balance_in(conn: &Connection, user: &UserId) -> Result<Decimal, TellerError> {
        let newest: Option<String> = conn
            .query_row(
                "SELECT curr_balance FROM transactions
                 WHERE user_id = ?1 ORDER BY transaction_id DESC LIMIT 1",
                params![user.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match newest {
            Some(raw) => decimal_column(0, &raw).map_err(Into::into),
            None => Ok(Decimal::ZERO),
        }
    }

    fn append(
        conn: &Connection,
        user: &UserId,
        kind: TransactionKind,
        delta: Decimal,
        running_balance: Decimal,
    ) -> Result<Transaction, TellerError> {
        debug_assert!(running_balance >= Decimal::ZERO, "balance went negative");

        let timestamp = Utc::now();
        conn.execute(
            "INSERT INTO transactions (user_id, timestamp, message, change_in_balance, curr_balance)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.as_str(),
                timestamp,
                kind.as_str(),
                delta.to_string(),
                running_balance.to_string(),
            ],
        )?;

        Ok(Transaction {
            id: TransactionId(conn.last_insert_rowid()),
            user_id: user.clone(),
            timestamp,
            kind,
            delta,
            running_balance,
        })
    }

    fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
        let message: String = row.get(3)?;
        let kind = match message.as_str() {
            "Deposit" => TransactionKind::Deposit,
            "Withdrawal" => TransactionKind::Withdrawal,
            other => {
                return Err(rusqlite::Error::FromSqlConversionFailure(
                    3,
                    Type::Text,
                    format!("unknown transaction kind: {other}").into(),
                ));
            }
        };

        Ok(Transaction {
            id: TransactionId(row.get(0)?),
            user_id: UserId::from_generated(row.get(1)?),
            timestamp: row.get(2)?,
            kind,
            delta: decimal_column(4, &row.get::<_, String>(4)?)?,
            running_balance: decimal_column(5, &row.get::<_, String>(5)?)?,
        })
    }
}

/// Parses a decimal stored in its canonical string form.
fn decimal_column(index: usize, raw: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kind_round_trips_through_its_message() {
        assert_eq!(TransactionKind::Deposit.as_str(), "Deposit");
        assert_eq!(TransactionKind::Withdrawal.as_str(), "Withdrawal");
        assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
    }

    #[test]
    fn decimal_column_parses_canonical_form() {
        assert_eq!(decimal_column(0, "12.34").unwrap(), dec!(12.34));
        assert_eq!(decimal_column(0, "-5").unwrap(), dec!(-5));
        assert_eq!(decimal_column(0, "0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn decimal_column_rejects_garbage() {
        assert!(decimal_column(0, "not-a-number").is_err());
    }
}
