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

//! Identity store public API integration tests.

use rust_decimal_macros::dec;
use teller_demo_rs::{
    Db, FullName, IdentityStore, Ledger, Pin, TellerError, UserId,
};

// === Helper Functions ===

fn name(raw: &str) -> FullName {
    FullName::parse(raw).unwrap()
}

fn pin(raw: &str) -> Pin {
    Pin::parse(raw).unwrap()
}

// === Registration ===

#[test]
fn registration_returns_a_well_formed_id() {
    let db = Db::in_memory().unwrap();
    let user = IdentityStore::new(&db)
        .register(&name("John Middle Smith"), &pin("1234"))
        .unwrap();

    assert_eq!(user.name, "John Middle Smith");
    assert_eq!(user.id.as_str().len(), 11);
    assert!(user.id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn registration_rejects_a_name_with_a_digit() {
    // Validation lives in the typed name parser; a name like "J0hn Smith"
    // never reaches the store.
    assert!(matches!(
        FullName::parse("J0hn Smith"),
        Err(TellerError::InvalidInput(_))
    ));
}

#[test]
fn repeated_registrations_get_distinct_ids() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);

    let a = identity.register(&name("John Smith"), &pin("1234")).unwrap();
    let b = identity.register(&name("John Smith"), &pin("1234")).unwrap();
    let c = identity.register(&name("John Smith"), &pin("1234")).unwrap();

    assert_ne!(a.id, b.id);
    assert_ne!(b.id, c.id);
    assert_ne!(a.id, c.id);
}

// === Authentication ===

#[test]
fn authenticate_with_correct_credentials_returns_the_user() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);
    let registered = identity.register(&name("John Smith"), &pin("1234")).unwrap();

    let authed = identity.authenticate(&registered.id, &pin("1234")).unwrap();
    assert_eq!(authed, registered);
}

#[test]
fn authenticate_with_leading_zero_pin() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);
    let user = identity.register(&name("John Smith"), &pin("0042")).unwrap();

    assert!(identity.authenticate(&user.id, &pin("0042")).is_ok());
    // "0042" and "4200" share digits but are different PINs
    assert!(matches!(
        identity.authenticate(&user.id, &pin("4200")),
        Err(TellerError::InvalidCredentials)
    ));
}

#[test]
fn wrong_pin_fails_with_invalid_credentials() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);
    let user = identity.register(&name("John Smith"), &pin("1234")).unwrap();

    let result = identity.authenticate(&user.id, &pin("9999"));
    assert!(matches!(result, Err(TellerError::InvalidCredentials)));
}

#[test]
fn unknown_id_fails_like_a_wrong_pin() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);
    identity.register(&name("John Smith"), &pin("1234")).unwrap();

    let stranger = UserId::parse("AAAAAAAAAAA").unwrap();
    let unknown = identity.authenticate(&stranger, &pin("1234")).unwrap_err();
    assert!(matches!(unknown, TellerError::InvalidCredentials));
}

#[test]
fn failed_authentication_leaves_the_ledger_untouched() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);
    let user = identity.register(&name("John Smith"), &pin("1234")).unwrap();

    let ledger = Ledger::new(&db);
    ledger.deposit(&user.id, dec!(100.00)).unwrap();

    let _ = identity.authenticate(&user.id, &pin("0000"));

    assert_eq!(ledger.balance(&user.id).unwrap(), dec!(100.00));
    assert_eq!(ledger.history(&user.id).unwrap().len(), 1);
}

// === Lookup ===

#[test]
fn find_returns_the_user_record() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);
    let user = identity.register(&name("John Smith"), &pin("1234")).unwrap();

    let found = identity.find(&user.id).unwrap();
    assert_eq!(found, user);
}

#[test]
fn find_of_unknown_id_is_not_found() {
    let db = Db::in_memory().unwrap();
    let identity = IdentityStore::new(&db);

    let stranger = UserId::parse("AAAAAAAAAAA").unwrap();
    assert!(matches!(
        identity.find(&stranger),
        Err(TellerError::NotFound)
    ));
}
