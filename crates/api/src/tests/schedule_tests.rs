// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use harbour_domain::Timestamp;

use crate::tests::helpers::{
    br9001_request, create_test_persistence, invoice_request, ship_request, test_now,
};
use crate::{
    ApiError, add_ship, create_invoice, dashboard, delete_ship, list_invoices, list_schedules,
    seed_demo_data,
};

#[test]
fn test_add_ship_success() {
    let mut persistence = create_test_persistence();

    let response = add_ship(&mut persistence, &br9001_request(), test_now()).unwrap();

    assert_eq!(response.ship_id, "BR9001");
    assert_eq!(response.message, "Ship BR9001 added.");
    let ships = list_schedules(&mut persistence).unwrap().ships;
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].arrival, "2025-01-01T10:00:00");
    assert_eq!(ships[0].departure, "2025-01-01T18:00:00");
    assert_eq!(ships[0].created_at, "2025-01-01T00:00:00");
}

#[test]
fn test_add_ship_trims_fields() {
    let mut persistence = create_test_persistence();
    let request = ship_request("  BR1 ", " Trimmed ", " 2025-02-01 08:00 ", "2025-02-01 09:00");

    add_ship(&mut persistence, &request, test_now()).unwrap();

    let ships = list_schedules(&mut persistence).unwrap().ships;
    assert_eq!(ships[0].ship_id, "BR1");
    assert_eq!(ships[0].name, "Trimmed");
}

#[test]
fn test_add_ship_rejects_blank_fields() {
    let mut persistence = create_test_persistence();
    let request = ship_request("BR1", "   ", "2025-02-01T08:00", "2025-02-01T09:00");

    let result = add_ship(&mut persistence, &request, test_now());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref message, .. }) if message == "All fields are required."
    ));
    assert!(list_schedules(&mut persistence).unwrap().ships.is_empty());
}

#[test]
fn test_add_ship_rejects_unparseable_timestamp() {
    let mut persistence = create_test_persistence();
    let request = ship_request("BR1", "Vessel", "tomorrow", "2025-02-01T09:00");

    let err = add_ship(&mut persistence, &request, test_now()).unwrap_err();

    assert_eq!(err.user_message(), "Invalid date/time format.");
}

#[test]
fn test_add_ship_rejects_departure_not_after_arrival() {
    let mut persistence = create_test_persistence();
    for departure in ["2025-02-01T08:00", "2025-02-01T07:59"] {
        let request = ship_request("BR1", "Vessel", "2025-02-01T08:00", departure);
        let err = add_ship(&mut persistence, &request, test_now()).unwrap_err();
        assert!(matches!(
            err,
            ApiError::DomainRuleViolation { ref rule, .. } if rule == "departure_after_arrival"
        ));
        assert_eq!(err.user_message(), "Departure must be after arrival.");
    }
    assert!(list_schedules(&mut persistence).unwrap().ships.is_empty());
}

#[test]
fn test_add_ship_duplicate_id_leaves_table_unchanged() {
    let mut persistence = create_test_persistence();
    add_ship(&mut persistence, &br9001_request(), test_now()).unwrap();

    let duplicate = ship_request("BR9001", "Other", "2025-03-01T00:00", "2025-03-02T00:00");
    let err = add_ship(&mut persistence, &duplicate, test_now()).unwrap_err();

    assert_eq!(err.user_message(), "Ship ID already exists.");
    let ships = list_schedules(&mut persistence).unwrap().ships;
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].name, "Test Ship");
}

#[test]
fn test_add_invoice_then_delete_ship_scenario() {
    let mut persistence = create_test_persistence();
    add_ship(&mut persistence, &br9001_request(), test_now()).unwrap();

    let invoice = create_invoice(
        &mut persistence,
        &invoice_request("BR9001", "5", "250.0"),
        test_now(),
    )
    .unwrap();
    assert_eq!(invoice.total, 5250.0);

    let deleted = delete_ship(&mut persistence, "BR9001").unwrap();
    assert!(deleted.ship_deleted);
    assert_eq!(deleted.invoices_deleted, 1);
    assert_eq!(deleted.message, "Ship BR9001 and related invoices deleted.");

    let invoices = list_invoices(&mut persistence).unwrap().invoices;
    assert!(invoices.iter().all(|i| i.id != invoice.invoice_id));
}

#[test]
fn test_delete_ship_leaves_other_ships_invoices() {
    let mut persistence = create_test_persistence();
    add_ship(&mut persistence, &br9001_request(), test_now()).unwrap();
    add_ship(
        &mut persistence,
        &ship_request("BR9002", "Keeper", "2025-01-02T10:00", "2025-01-02T12:00"),
        test_now(),
    )
    .unwrap();
    create_invoice(&mut persistence, &invoice_request("BR9001", "1", "0"), test_now()).unwrap();
    let kept = create_invoice(&mut persistence, &invoice_request("BR9002", "2", "0"), test_now())
        .unwrap();

    delete_ship(&mut persistence, "BR9001").unwrap();

    let invoices = list_invoices(&mut persistence).unwrap().invoices;
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].id, kept.invoice_id);
}

#[test]
fn test_delete_missing_ship_is_success() {
    let mut persistence = create_test_persistence();
    let response = delete_ship(&mut persistence, "NOPE").unwrap();
    assert!(!response.ship_deleted);
    assert_eq!(response.invoices_deleted, 0);
}

#[test]
fn test_seed_twice_inserts_nothing_the_second_time() {
    let mut persistence = create_test_persistence();

    let first = seed_demo_data(&mut persistence, test_now()).unwrap();
    let second = seed_demo_data(&mut persistence, test_now()).unwrap();

    assert_eq!(first.inserted, 14);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 14);
    assert_eq!(list_schedules(&mut persistence).unwrap().ships.len(), 14);
}

#[test]
fn test_dashboard_counts_and_upcoming() {
    let mut persistence = create_test_persistence();
    let now: Timestamp = test_now();
    seed_demo_data(&mut persistence, now).unwrap();
    add_ship(
        &mut persistence,
        &ship_request("OLD1", "Past", "2024-06-01T00:00", "2024-06-02T00:00"),
        now,
    )
    .unwrap();
    create_invoice(&mut persistence, &invoice_request("BR2000", "3", "0"), now).unwrap();

    let view = dashboard(&mut persistence, now).unwrap();

    assert_eq!(view.ship_count, 15);
    assert_eq!(view.invoice_count, 1);
    assert_eq!(view.upcoming.len(), 5);
    // BR2000 arrives exactly at "now" and is included
    assert_eq!(view.upcoming[0].ship_id, "BR2000");
    assert!(view.upcoming.iter().all(|s| s.ship_id != "OLD1"));
    assert_eq!(view.now, "2025-01-01T00:00:00");
}
