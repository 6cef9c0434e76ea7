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

//! SQLite-backed storage handle.
//!
//! [`Db`] owns the connection and bootstraps the schema; the identity store
//! and the ledger engine issue their own parameterized statements against
//! it. Nothing outside the library touches SQL.

use crate::error::TellerError;
use rusqlite::Connection;
use std::path::Path;

/// Schema SQL embedded at compile time.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Handle to the users/transactions database.
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Opens (creating if needed) a database file and applies the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TellerError> {
        let conn = Connection::open(path)?;
        // WAL only applies to real files; :memory: databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Self::init(conn)
    }

    /// Opens an in-memory database (used in tests).
    pub fn in_memory() -> Result<Self, TellerError> {
        Self::init(Connection::open(":memory:")?)
    }

    fn init(conn: Connection) -> Result<Self, TellerError> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
