// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::classifier::KeywordClassifier;
use fintrack::models::TransactionInput;
use fintrack::{db, service, store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let owner = store::create_user(&conn, "alice").unwrap();
    (conn, owner)
}

fn spend(conn: &Connection, owner: i64, desc: &str, amount: &str, date: &str) {
    let classifier = KeywordClassifier::default();
    let input = TransactionInput {
        description: desc.to_string(),
        amount: dec(amount),
        date: date.to_string(),
        kind: "expense".to_string(),
        category: None,
        receipt: None,
    };
    service::add_transaction(conn, &classifier, owner, &input).unwrap();
}

#[test]
fn set_budget_upserts_per_month_and_category() {
    let (conn, owner) = setup();
    store::set_budget(&conn, owner, "food", dec("400"), "2025-09").unwrap();
    store::set_budget(&conn, owner, "food", dec("450"), "2025-09").unwrap();
    store::set_budget(&conn, owner, "food", dec("500"), "2025-10").unwrap();

    let september = store::list_budgets(&conn, owner, Some("2025-09")).unwrap();
    assert_eq!(september.len(), 1);
    assert_eq!(september[0].amount, dec("450"));

    let all = store::list_budgets(&conn, owner, None).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn budgets_are_scoped_per_owner() {
    let (conn, owner) = setup();
    let other = store::create_user(&conn, "bob").unwrap();
    store::set_budget(&conn, owner, "food", dec("400"), "2025-09").unwrap();

    assert!(store::list_budgets(&conn, other, None).unwrap().is_empty());
}

#[test]
fn monthly_category_spend_sums_only_matching_expenses() {
    let (conn, owner) = setup();
    spend(&conn, owner, "groceries run", "85.50", "2025-09-05");
    spend(&conn, owner, "cafe lunch", "14.50", "2025-09-12");
    spend(&conn, owner, "uber home", "20.00", "2025-09-13");
    spend(&conn, owner, "groceries run", "99.00", "2025-10-01");

    let food = store::expense_total_for_category_month(&conn, owner, "food", "2025-09").unwrap();
    assert_eq!(food, dec("100.00"));

    let transport =
        store::expense_total_for_category_month(&conn, owner, "transport", "2025-09").unwrap();
    assert_eq!(transport, dec("20.00"));

    let empty =
        store::expense_total_for_category_month(&conn, owner, "bills", "2025-09").unwrap();
    assert_eq!(empty, Decimal::ZERO);
}
