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

//! Core identifier types for users and ledger transactions.

use crate::error::TellerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a registered user.
///
/// Eleven alphanumeric characters, generated at registration and immutable
/// afterwards. Users type this id back in to log in, so [`UserId::parse`]
/// accepts external text and rejects anything that cannot be a real id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Length of every generated id.
    pub const LEN: usize = 11;

    /// Validates externally supplied text as a user id.
    pub fn parse(raw: &str) -> Result<Self, TellerError> {
        let raw = raw.trim();
        if raw.len() != Self::LEN || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TellerError::InvalidInput(
                "account id must be 11 letters and digits",
            ));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Wraps an id produced by the generator.
    pub(crate) fn from_generated(id: String) -> Self {
        debug_assert_eq!(id.len(), Self::LEN);
        debug_assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ledger transaction.
///
/// Wraps the store's monotonically increasing row id; ordering transactions
/// by this id reproduces insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
