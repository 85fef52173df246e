// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use harbour_domain::DomainError;
use harbour_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Every variant except `Internal` carries a message that is
/// safe to show to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The text shown to the operator in a flash message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationFailed { .. } => String::from("Invalid credentials."),
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. } => message.clone(),
            Self::Internal { .. } => String::from("An internal error occurred."),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ShipAlreadyExists(_) => Self::DomainRuleViolation {
                rule: String::from("unique_ship_id"),
                message: String::from("Ship ID already exists."),
            },
            PersistenceError::ShipNotFound(_) => Self::ResourceNotFound {
                resource_type: String::from("Ship"),
                message: String::from("Ship not found. Add ship first."),
            },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("All fields are required."),
        },
        DomainError::InvalidShipId(msg) => ApiError::InvalidInput {
            field: String::from("ship_id"),
            message: msg,
        },
        DomainError::InvalidTimestamp(_) => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message: String::from("Invalid date/time format."),
        },
        DomainError::DepartureNotAfterArrival { .. } => ApiError::DomainRuleViolation {
            rule: String::from("departure_after_arrival"),
            message: String::from("Departure must be after arrival."),
        },
        DomainError::InvalidHours(_) => ApiError::InvalidInput {
            field: String::from("hours"),
            message: String::from("Enter valid non-negative numeric values."),
        },
        DomainError::InvalidServiceCost(_) => ApiError::InvalidInput {
            field: String::from("service_cost"),
            message: String::from("Enter valid non-negative numeric values."),
        },
        DomainError::TimestampOverflow { operation } => ApiError::Internal {
            message: format!("Timestamp arithmetic overflow: {operation}"),
        },
    }
}
