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

//! Validated user input.
//!
//! One typed validator per input kind. Raw console text only crosses into
//! the rest of the crate as one of these types, so registration and ledger
//! code never re-checks formats.

use crate::error::TellerError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A validated personal name: 2-3 space-separated alphabetic words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Validates a name typed at the registration prompt.
    ///
    /// Surrounding whitespace is trimmed and interior runs of whitespace
    /// collapse to single spaces, so `" John  Smith "` and `"John Smith"`
    /// are the same name.
    pub fn parse(raw: &str) -> Result<Self, TellerError> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if !(2..=3).contains(&words.len()) {
            return Err(TellerError::InvalidInput(
                "name must be 2-3 space-separated words",
            ));
        }
        if !words
            .iter()
            .all(|word| word.chars().all(char::is_alphabetic))
        {
            return Err(TellerError::InvalidInput(
                "name may only contain letters",
            ));
        }
        Ok(Self(words.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated 4-digit PIN.
///
/// Kept as text rather than a number so leading zeros survive: `0042` is a
/// valid PIN distinct from `42`.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Validates a PIN typed at a prompt: exactly 4 ASCII decimal digits.
    pub fn parse(raw: &str) -> Result<Self, TellerError> {
        let raw = raw.trim();
        if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(TellerError::InvalidInput("PIN must be exactly 4 digits"));
        }
        Ok(Self(raw.to_owned()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// PINs are credentials; keep them out of debug output and logs.
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Validates an amount typed at the deposit or withdrawal prompt.
///
/// Accepts any positive decimal number; everything else is
/// [`TellerError::InvalidAmount`].
pub fn parse_amount(raw: &str) -> Result<Decimal, TellerError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| TellerError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(TellerError::InvalidAmount);
    }
    Ok(amount)
}

/// Selection on the entry menu, before anyone is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryChoice {
    Register,
    LogIn,
    Exit,
}

impl EntryChoice {
    pub fn parse(raw: &str) -> Result<Self, TellerError> {
        match raw.trim() {
            "1" => Ok(Self::Register),
            "2" => Ok(Self::LogIn),
            "3" => Ok(Self::Exit),
            _ => Err(TellerError::InvalidInput("choose 1, 2, or 3")),
        }
    }
}

/// Selection on the session menu, after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChoice {
    Deposit,
    Withdraw,
    Balance,
    History,
    Exit,
}

impl SessionChoice {
    pub fn parse(raw: &str) -> Result<Self, TellerError> {
        match raw.trim() {
            "1" => Ok(Self::Deposit),
            "2" => Ok(Self::Withdraw),
            "3" => Ok(Self::Balance),
            "4" => Ok(Self::History),
            "5" => Ok(Self::Exit),
            _ => Err(TellerError::InvalidInput("choose 1-5")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // === Name Validation ===

    #[test]
    fn two_word_name_is_valid() {
        let name = FullName::parse("John Smith").unwrap();
        assert_eq!(name.as_str(), "John Smith");
    }

    #[test]
    fn three_word_name_is_valid() {
        let name = FullName::parse("John Middle Smith").unwrap();
        assert_eq!(name.as_str(), "John Middle Smith");
    }

    #[test]
    fn name_with_digit_is_rejected() {
        assert!(matches!(
            FullName::parse("J0hn Smith"),
            Err(TellerError::InvalidInput(_))
        ));
    }

    #[test]
    fn single_word_name_is_rejected() {
        assert!(matches!(
            FullName::parse("Prince"),
            Err(TellerError::InvalidInput(_))
        ));
    }

    #[test]
    fn four_word_name_is_rejected() {
        assert!(matches!(
            FullName::parse("One Two Three Four"),
            Err(TellerError::InvalidInput(_))
        ));
    }

    #[test]
    fn name_whitespace_is_normalized() {
        let name = FullName::parse("  John \t Smith \n").unwrap();
        assert_eq!(name.as_str(), "John Smith");
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(FullName::parse("").is_err());
        assert!(FullName::parse("   ").is_err());
    }

    // === PIN Validation ===

    #[test]
    fn four_digit_pin_is_valid() {
        assert!(Pin::parse("1234").is_ok());
    }

    #[test]
    fn pin_keeps_leading_zeros() {
        let pin = Pin::parse("0042").unwrap();
        assert_eq!(pin.as_str(), "0042");
    }

    #[test]
    fn short_and_long_pins_are_rejected() {
        assert!(Pin::parse("123").is_err());
        assert!(Pin::parse("12345").is_err());
    }

    #[test]
    fn non_numeric_pin_is_rejected() {
        assert!(Pin::parse("12a4").is_err());
        assert!(Pin::parse("-123").is_err());
    }

    #[test]
    fn pin_debug_hides_digits() {
        let pin = Pin::parse("1234").unwrap();
        assert_eq!(format!("{pin:?}"), "Pin(****)");
    }

    // === Amount Validation ===

    #[test]
    fn positive_amount_parses() {
        assert_eq!(parse_amount("50").unwrap(), dec!(50));
        assert_eq!(parse_amount("0.01").unwrap(), dec!(0.01));
        assert_eq!(parse_amount(" 12.50 ").unwrap(), dec!(12.50));
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        assert!(matches!(parse_amount("0"), Err(TellerError::InvalidAmount)));
        assert!(matches!(
            parse_amount("-5.00"),
            Err(TellerError::InvalidAmount)
        ));
    }

    #[test]
    fn malformed_amount_is_rejected() {
        assert!(matches!(
            parse_amount("ten"),
            Err(TellerError::InvalidAmount)
        ));
        assert!(matches!(parse_amount(""), Err(TellerError::InvalidAmount)));
    }

    // === Menu Choices ===

    #[test]
    fn entry_choices_parse() {
        assert_eq!(EntryChoice::parse("1").unwrap(), EntryChoice::Register);
        assert_eq!(EntryChoice::parse("2").unwrap(), EntryChoice::LogIn);
        assert_eq!(EntryChoice::parse(" 3 ").unwrap(), EntryChoice::Exit);
        assert!(EntryChoice::parse("4").is_err());
        assert!(EntryChoice::parse("register").is_err());
    }

    #[test]
    fn session_choices_parse() {
        assert_eq!(SessionChoice::parse("1").unwrap(), SessionChoice::Deposit);
        assert_eq!(SessionChoice::parse("4").unwrap(), SessionChoice::History);
        assert_eq!(SessionChoice::parse("5").unwrap(), SessionChoice::Exit);
        assert!(SessionChoice::parse("6").is_err());
        assert!(SessionChoice::parse("").is_err());
    }
}
