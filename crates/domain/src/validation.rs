// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Timestamp;

/// Validates that a required text field is present.
///
/// # Arguments
///
/// * `field` - The field name, used in the error
/// * `value` - The raw input value
///
/// # Returns
///
/// The value with surrounding whitespace removed.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the trimmed value is empty.
pub fn validate_required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(trimmed)
}

/// Validates that a docking window is well formed.
///
/// # Errors
///
/// Returns `DomainError::DepartureNotAfterArrival` unless departure is
/// strictly after arrival.
pub fn validate_schedule(arrival: &Timestamp, departure: &Timestamp) -> Result<(), DomainError> {
    // Rule: a ship cannot leave before (or at the moment) it arrives
    if departure <= arrival {
        return Err(DomainError::DepartureNotAfterArrival {
            arrival: arrival.canonical(),
            departure: departure.canonical(),
        });
    }
    Ok(())
}

/// Parses the number of hours a ship was docked.
///
/// # Errors
///
/// Returns `DomainError::InvalidHours` if the input is not an integer,
/// is negative, or does not fit in a `u32`.
pub fn parse_hours(input: &str) -> Result<u32, DomainError> {
    let trimmed: &str = input.trim();
    let hours: i64 = trimmed
        .parse()
        .map_err(|_| DomainError::InvalidHours(trimmed.to_string()))?;
    u32::try_from(hours).map_err(|_| DomainError::InvalidHours(trimmed.to_string()))
}

/// Parses a service cost.
///
/// # Errors
///
/// Returns `DomainError::InvalidServiceCost` if the input is not a finite,
/// non-negative decimal number.
pub fn parse_service_cost(input: &str) -> Result<f64, DomainError> {
    let trimmed: &str = input.trim();
    let cost: f64 = trimmed
        .parse()
        .map_err(|_| DomainError::InvalidServiceCost(trimmed.to_string()))?;
    validate_service_cost(cost).map_err(|_| DomainError::InvalidServiceCost(trimmed.to_string()))
}

/// Validates an already-numeric service cost.
///
/// # Errors
///
/// Returns `DomainError::InvalidServiceCost` for negative or non-finite values.
pub fn validate_service_cost(cost: f64) -> Result<f64, DomainError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(DomainError::InvalidServiceCost(cost.to_string()));
    }
    Ok(cost)
}
