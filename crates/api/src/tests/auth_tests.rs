// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{TEST_BCRYPT_COST, create_test_credentials};
use crate::{AdminCredentials, ApiError, LoginRequest, login};

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: String::from(username),
        password: String::from(password),
        next: None,
    }
}

#[test]
fn test_login_with_correct_credentials() {
    let credentials = create_test_credentials();

    let response = login(&credentials, &login_request("admin", "harbour-pass")).unwrap();

    assert_eq!(response.username, "admin");
    assert_eq!(response.message, "Logged in as admin.");
}

#[test]
fn test_login_trims_input() {
    let credentials = create_test_credentials();
    assert!(login(&credentials, &login_request(" admin ", " harbour-pass\n")).is_ok());
}

#[test]
fn test_login_rejects_wrong_password_and_username() {
    let credentials = create_test_credentials();

    for (username, password) in [("admin", "wrong"), ("root", "harbour-pass"), ("", "")] {
        let err = login(&credentials, &login_request(username, password)).unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationFailed { .. }));
        assert_eq!(err.user_message(), "Invalid credentials.");
    }
}

#[test]
fn test_credentials_require_non_empty_values() {
    assert!(AdminCredentials::with_cost("", "secret", TEST_BCRYPT_COST).is_err());
    assert!(AdminCredentials::with_cost("admin", "  ", TEST_BCRYPT_COST).is_err());
}

#[test]
fn test_credentials_debug_hides_hash() {
    let credentials = create_test_credentials();
    let debug = format!("{credentials:?}");
    assert!(debug.contains("admin"));
    assert!(!debug.contains("$2"));
}
