// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin credential handling.
//!
//! There is exactly one administrator account, configured at startup. The
//! plaintext password is hashed immediately and only the bcrypt hash is
//! retained.

use tracing::{info, warn};

use crate::error::{ApiError, AuthError};

/// The configured administrator account.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: String,
}

impl AdminCredentials {
    /// Hashes the configured password with the default bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or password is empty, or if hashing
    /// fails.
    pub fn new(username: &str, password: &str) -> Result<Self, ApiError> {
        Self::with_cost(username, password, bcrypt::DEFAULT_COST)
    }

    /// Hashes the configured password with an explicit bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or password is empty, or if hashing
    /// fails.
    pub fn with_cost(username: &str, password: &str, cost: u32) -> Result<Self, ApiError> {
        let username: &str = username.trim();
        let password: &str = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("admin_credentials"),
                message: String::from("Admin username and password must not be empty"),
            });
        }

        let password_hash: String =
            bcrypt::hash(password, cost).map_err(|e| ApiError::Internal {
                message: format!("Failed to hash admin password: {e}"),
            })?;

        Ok(Self {
            username: username.to_string(),
            password_hash,
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks a submitted username and password, both trimmed.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        if username.trim() != self.username {
            return false;
        }
        bcrypt::verify(password.trim(), &self.password_hash).unwrap_or(false)
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Authentication service.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates the administrator.
    ///
    /// # Returns
    ///
    /// The authenticated username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the credentials do not
    /// match. The reason never says which half was wrong.
    pub fn login(
        credentials: &AdminCredentials,
        username: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        if !credentials.matches(username, password) {
            warn!(username = username.trim(), "Rejected login attempt");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            });
        }

        info!(username = credentials.username(), "Administrator logged in");
        Ok(credentials.username().to_string())
    }
}
