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

//! User registration and credential verification.
//!
//! PINs are stored as a salted SHA-256 digest, never as text, and digest
//! comparison is constant-time. A failed login for an unknown id performs
//! the same digest work as a wrong PIN, so the two cases are
//! indistinguishable to the caller in both message and timing.

use crate::base::UserId;
use crate::db::Db;
use crate::error::TellerError;
use crate::input::{FullName, Pin};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Bytes of salt generated per user.
const SALT_BYTES: usize = 16;

/// Salt and digest used to burn digest work when the id does not exist.
const DUMMY_SALT: &str = "00000000000000000000000000000000";
const DUMMY_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// A registered user, as handed to the ledger after authentication.
///
/// Carries no credential material; the PIN exists only as a salted digest
/// inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// Owns user creation and PIN verification.
pub struct IdentityStore<'a> {
    db: &'a Db,
}

impl<'a> IdentityStore<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Registers a new user and returns the persisted record.
    ///
    /// The id is eleven alphanumeric characters from the OS random source.
    /// A collision against an existing user regenerates instead of failing;
    /// with 62^11 possible ids this loop effectively runs once.
    ///
    /// # Errors
    ///
    /// [`TellerError::StorageUnavailable`] if the store cannot be reached.
    /// Nothing is persisted on failure.
    pub fn register(&self, name: &FullName, pin: &Pin) -> Result<User, TellerError> {
        let id = self.fresh_id()?;

        let mut salt = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        let salt = hex::encode(salt);
        let digest = pin_digest(&salt, pin);

        self.db.conn().execute(
            "INSERT INTO users (id, name, pin_salt, pin_hash) VALUES (?1, ?2, ?3, ?4)",
            params![id.as_str(), name.as_str(), salt, digest],
        )?;

        tracing::info!(user = %id, "registered new user");
        Ok(User {
            id,
            name: name.as_str().to_owned(),
        })
    }

    /// Verifies an id/PIN pair and returns the user record on a match.
    ///
    /// # Errors
    ///
    /// [`TellerError::InvalidCredentials`] for an unknown id and for a wrong
    /// PIN alike. [`TellerError::StorageUnavailable`] if the lookup itself
    /// fails.
    pub fn authenticate(&self, id: &UserId, pin: &Pin) -> Result<User, TellerError> {
        let row = self
            .db
            .conn()
            .query_row(
                "SELECT name, pin_salt, pin_hash FROM users WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((name, salt, stored)) if verify_pin(&salt, pin, &stored) => {
                tracing::debug!(user = %id, "authentication succeeded");
                Ok(User {
                    id: id.clone(),
                    name,
                })
            }
            Some(_) => {
                tracing::debug!(user = %id, "authentication failed");
                Err(TellerError::InvalidCredentials)
            }
            None => {
                // Burn the same digest work as a real verification so the
                // unknown-id path matches the wrong-PIN path in timing.
                let _ = verify_pin(DUMMY_SALT, pin, DUMMY_HASH);
                tracing::debug!(user = %id, "authentication failed");
                Err(TellerError::InvalidCredentials)
            }
        }
    }

    /// Looks up a user record by id, without checking credentials.
    ///
    /// # Errors
    ///
    /// [`TellerError::NotFound`] if no user is registered under the id.
    pub fn find(&self, id: &UserId) -> Result<User, TellerError> {
        self.db
            .conn()
            .query_row(
                "SELECT name FROM users WHERE id = ?1",
                params![id.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .map(|name| User {
                id: id.clone(),
                name,
            })
            .ok_or(TellerError::NotFound)
    }

    fn fresh_id(&self) -> Result<UserId, TellerError> {
        loop {
            let candidate: String = OsRng
                .sample_iter(&Alphanumeric)
                .take(UserId::LEN)
                .map(char::from)
                .collect();

            let taken: bool = self.db.conn().query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                params![candidate],
                |row| row.get(0),
            )?;
            if !taken {
                return Ok(UserId::from_generated(candidate));
            }
            tracing::warn!("generated id collided with an existing user, regenerating");
        }
    }
}

fn pin_digest(salt_hex: &str, pin: &Pin) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(pin.as_str().as_bytes());
    hex::encode(hasher.finalize())
}

fn verify_pin(salt_hex: &str, pin: &Pin, stored_hex: &str) -> bool {
    let computed = pin_digest(salt_hex, pin);
    computed.as_bytes().ct_eq(stored_hex.as_bytes()).into()
}
