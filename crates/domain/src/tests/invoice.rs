// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BASE_RATE, DomainError, InvoiceCharge, compute_total};

#[test]
fn test_base_rate_is_one_thousand_per_hour() {
    assert_eq!(BASE_RATE, 1000.0);
}

#[test]
fn test_charge_total_matches_formula() {
    let charge: InvoiceCharge = InvoiceCharge::compute(5, 250.0).unwrap();
    assert_eq!(charge.total(), 5250.0);
    assert_eq!(charge.hours_docked(), 5);
    assert_eq!(charge.service_cost(), 250.0);
    assert_eq!(charge.base_rate(), BASE_RATE);
}

#[test]
fn test_charge_total_is_exact_for_many_inputs() {
    for hours in [0_u32, 1, 7, 24, 96, 1000] {
        for service_cost in [0.0, 0.1, 99.99, 250.0, 12_345.67] {
            let charge: InvoiceCharge = InvoiceCharge::compute(hours, service_cost).unwrap();
            assert_eq!(charge.total(), f64::from(hours) * BASE_RATE + service_cost);
        }
    }
}

#[test]
fn test_zero_hours_charges_only_service() {
    assert_eq!(compute_total(0, 42.5, BASE_RATE), 42.5);
}

#[test]
fn test_charge_rejects_negative_service_cost() {
    assert!(matches!(
        InvoiceCharge::compute(1, -1.0),
        Err(DomainError::InvalidServiceCost(_))
    ));
}

#[test]
fn test_compute_with_rate_uses_given_rate() {
    let charge: InvoiceCharge = InvoiceCharge::compute_with_rate(3, 10.0, 500.0).unwrap();
    assert_eq!(charge.total(), 1510.0);
    assert_eq!(charge.base_rate(), 500.0);
}
