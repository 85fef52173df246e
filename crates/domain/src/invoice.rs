// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Docking fee computation.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::validate_service_cost;

/// Flat docking rate, in currency units per hour.
pub const BASE_RATE: f64 = 1000.0;

/// The monetary breakdown of a docking invoice.
///
/// The total is always derived from the other three fields and is never
/// set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCharge {
    hours_docked: u32,
    service_cost: f64,
    base_rate: f64,
    total: f64,
}

impl InvoiceCharge {
    /// Computes a charge at the current `BASE_RATE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cost is negative or not finite.
    pub fn compute(hours_docked: u32, service_cost: f64) -> Result<Self, DomainError> {
        Self::compute_with_rate(hours_docked, service_cost, BASE_RATE)
    }

    /// Computes a charge at an explicit rate.
    ///
    /// Used when rebuilding invoices whose rate was captured at issue time.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cost is negative or not finite.
    pub fn compute_with_rate(
        hours_docked: u32,
        service_cost: f64,
        base_rate: f64,
    ) -> Result<Self, DomainError> {
        let service_cost: f64 = validate_service_cost(service_cost)?;
        Ok(Self {
            hours_docked,
            service_cost,
            base_rate,
            total: compute_total(hours_docked, service_cost, base_rate),
        })
    }

    #[must_use]
    pub const fn hours_docked(&self) -> u32 {
        self.hours_docked
    }

    #[must_use]
    pub const fn service_cost(&self) -> f64 {
        self.service_cost
    }

    #[must_use]
    pub const fn base_rate(&self) -> f64 {
        self.base_rate
    }

    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }
}

/// `hours * base_rate + service_cost`.
#[must_use]
pub fn compute_total(hours_docked: u32, service_cost: f64, base_rate: f64) -> f64 {
    f64::from(hours_docked).mul_add(base_rate, service_cost)
}
