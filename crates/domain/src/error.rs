// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty or missing.
    MissingField(&'static str),
    /// Ship identifier is empty or invalid.
    InvalidShipId(String),
    /// A timestamp could not be parsed.
    InvalidTimestamp(String),
    /// Departure is not strictly after arrival.
    DepartureNotAfterArrival {
        /// The canonical arrival timestamp.
        arrival: String,
        /// The canonical departure timestamp.
        departure: String,
    },
    /// Docked hours are not a non-negative integer.
    InvalidHours(String),
    /// Service cost is not a non-negative decimal.
    InvalidServiceCost(String),
    /// Timestamp arithmetic overflow.
    TimestampOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Field '{field}' is required"),
            Self::InvalidShipId(msg) => write!(f, "Invalid ship ID: {msg}"),
            Self::InvalidTimestamp(value) => {
                write!(f, "Invalid date/time format: '{value}'")
            }
            Self::DepartureNotAfterArrival { arrival, departure } => {
                write!(
                    f,
                    "Departure ({departure}) must be after arrival ({arrival})"
                )
            }
            Self::InvalidHours(value) => {
                write!(f, "Hours docked must be a non-negative integer, got '{value}'")
            }
            Self::InvalidServiceCost(value) => {
                write!(
                    f,
                    "Service cost must be a non-negative number, got '{value}'"
                )
            }
            Self::TimestampOverflow { operation } => {
                write!(f, "Timestamp arithmetic overflow: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
