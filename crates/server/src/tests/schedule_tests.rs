// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::header;
use harbour_domain::DEMO_SHIP_NAMES;

use super::{TestApp, body_bytes, flash_messages, location};

const BR9001_FORM: &str =
    "ship_id=BR9001&name=Test+Ship&arrival=2025-01-01T10%3A00&departure=2025-01-01T18%3A00";

#[tokio::test]
async fn test_add_ship_after_login() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;

    let response = app
        .post_form("/schedules/add", BR9001_FORM, Some(&cookie))
        .await;
    assert_eq!(location(&response), "/schedules");

    let page = app.page("/schedules", Some(&cookie)).await;
    assert_eq!(
        flash_messages(&page),
        vec!["Logged in as admin.", "Ship BR9001 added."]
    );
    assert_eq!(page["ships"][0]["ship_id"], "BR9001");
    assert_eq!(page["ships"][0]["arrival"], "2025-01-01T10:00:00");

    // The ships export is refreshed on every change
    let export: String =
        std::fs::read_to_string(app.dir.path().join(harbour_api::SHIPS_EXPORT_FILE)).unwrap();
    assert!(export.starts_with("ship_id,name,arrival,departure,created_at"));
    assert!(export.contains("BR9001,Test Ship"));
}

#[tokio::test]
async fn test_add_ship_rejections_flash_and_return_to_form() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;
    let _ = app.page("/", Some(&cookie)).await;

    let cases: [(&str, &str); 3] = [
        (
            "ship_id=BR1&name=&arrival=2025-01-01T10%3A00&departure=2025-01-01T18%3A00",
            "All fields are required.",
        ),
        (
            "ship_id=BR1&name=X&arrival=2025-01-01T10%3A00&departure=2025-01-01T10%3A00",
            "Departure must be after arrival.",
        ),
        (
            "ship_id=BR1&name=X&arrival=tomorrow&departure=2025-01-01T10%3A00",
            "Invalid date/time format.",
        ),
    ];

    for (form, expected) in cases {
        let response = app.post_form("/schedules/add", form, Some(&cookie)).await;
        assert_eq!(location(&response), "/schedules/add");

        let page = app.page("/schedules/add", Some(&cookie)).await;
        assert_eq!(page["flashes"][0]["level"], "danger");
        assert_eq!(flash_messages(&page), vec![expected]);
    }

    assert_eq!(app.ship_count().await, 0);
}

#[tokio::test]
async fn test_duplicate_ship_is_rejected() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;

    app.post_form("/schedules/add", BR9001_FORM, Some(&cookie))
        .await;
    let response = app
        .post_form("/schedules/add", BR9001_FORM, Some(&cookie))
        .await;
    assert_eq!(location(&response), "/schedules/add");

    let page = app.page("/schedules/add", Some(&cookie)).await;
    assert!(flash_messages(&page).contains(&String::from("Ship ID already exists.")));
    assert_eq!(app.ship_count().await, 1);
}

#[tokio::test]
async fn test_invoice_then_delete_ship_removes_invoices() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;

    app.post_form("/schedules/add", BR9001_FORM, Some(&cookie))
        .await;
    let response = app
        .post_form(
            "/fees",
            "ship_id=BR9001&hours=1&service_cost=500",
            Some(&cookie),
        )
        .await;
    assert_eq!(location(&response), "/invoices");

    let page = app.page("/invoices", Some(&cookie)).await;
    assert_eq!(
        flash_messages(&page),
        vec!["Logged in as admin.", "Ship BR9001 added.", "Invoice created for BR9001: ₹1500.00"]
    );
    assert_eq!(page["invoices"][0]["ship_name"], "Test Ship");
    assert_eq!(page["invoices"][0]["total"], 1500.0);

    let response = app
        .post_form("/schedules/delete/BR9001", "", Some(&cookie))
        .await;
    assert_eq!(location(&response), "/schedules");

    let page = app.page("/invoices", Some(&cookie)).await;
    assert_eq!(
        flash_messages(&page),
        vec!["Ship BR9001 and related invoices deleted."]
    );
    assert_eq!(page["invoices"].as_array().unwrap().len(), 0);
    assert_eq!(app.ship_count().await, 0);
}

#[tokio::test]
async fn test_invoice_rejections_return_to_form() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;
    app.post_form("/schedules/add", BR9001_FORM, Some(&cookie))
        .await;
    let _ = app.page("/", Some(&cookie)).await;

    let cases: [(&str, &str); 3] = [
        (
            "ship_id=BR9001&hours=-1&service_cost=0",
            "Enter valid non-negative numeric values.",
        ),
        (
            "ship_id=BR9001&hours=2&service_cost=abc",
            "Enter valid non-negative numeric values.",
        ),
        (
            "ship_id=NOPE&hours=2&service_cost=0",
            "Ship not found. Add ship first.",
        ),
    ];

    for (form, expected) in cases {
        let response = app.post_form("/fees", form, Some(&cookie)).await;
        assert_eq!(location(&response), "/fees");

        let page = app.page("/fees", Some(&cookie)).await;
        assert_eq!(flash_messages(&page), vec![expected]);
    }

    let page = app.page("/invoices", None).await;
    assert_eq!(page["invoices"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_missing_invoice_still_succeeds() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;

    let response = app
        .post_form("/invoices/delete/42", "", Some(&cookie))
        .await;
    assert_eq!(location(&response), "/invoices");

    let page = app.page("/invoices", Some(&cookie)).await;
    assert!(flash_messages(&page).contains(&String::from("Invoice #42 deleted.")));
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let app: TestApp = TestApp::new();

    let response = app.get("/seed", None).await;
    assert_eq!(location(&response), "/schedules");
    let response = app.get("/seed", None).await;
    assert_eq!(location(&response), "/schedules");

    assert_eq!(app.ship_count().await, DEMO_SHIP_NAMES.len());

    let page = app.page("/", None).await;
    assert_eq!(page["ship_count"], DEMO_SHIP_NAMES.len());
    assert_eq!(page["invoice_count"], 0);
    assert_eq!(page["upcoming"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_download_ships_export() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;
    app.post_form("/schedules/add", BR9001_FORM, Some(&cookie))
        .await;

    let response = app.get("/download/ships", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"ships.csv\""
    );

    let body: String = String::from_utf8(body_bytes(response).await).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("ship_id,name,arrival,departure,created_at")
    );
    assert!(lines.next().unwrap().starts_with("BR9001,Test Ship,2025-01-01T10:00:00"));
}

#[tokio::test]
async fn test_download_fees_export_with_no_invoices() {
    let app: TestApp = TestApp::new();
    let cookie: String = app.login().await;

    let response = app.get("/download/fees", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"fees.csv\""
    );

    let body: String = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body.lines().count(), 1);
}
