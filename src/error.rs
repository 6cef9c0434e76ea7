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

//! Error types for registration, authentication, and ledger operations.

use thiserror::Error;

/// Teller operation errors.
///
/// Validation failures are recoverable: the interactive shell re-prompts
/// instead of exiting. Storage failures abort the current operation only.
#[derive(Error, Debug)]
pub enum TellerError {
    /// Malformed name, PIN, id, or menu choice
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Amount is not a positive decimal number
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Withdrawal would exceed the current balance
    #[error("insufficient available funds")]
    InsufficientFunds,

    /// No user registered under the given id
    #[error("no such user")]
    NotFound,

    /// Unknown id or wrong PIN (deliberately indistinguishable)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Underlying store could not be reached or rejected the operation
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),
}
