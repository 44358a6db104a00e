// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::insights::{self, MonthComparison, MonthTotal};
use fintrack::models::{Transaction, TransactionKind};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(category: &str, amount: &str, date: &str) -> Transaction {
    Transaction {
        id: 0,
        owner_id: 1,
        description: format!("{} spend", category),
        amount: dec(amount),
        category: category.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        kind: TransactionKind::Expense,
        currency: "USD".to_string(),
        receipt: None,
        created_at: String::new(),
    }
}

#[test]
fn empty_input_yields_empty_summary_not_error() {
    let summary = insights::compute(&[]);
    assert_eq!(summary.total_spending, Decimal::ZERO);
    assert!(summary.category_breakdown.is_empty());
    assert!(summary.monthly_trend.is_empty());
}

#[test]
fn breakdown_totals_match_total_spending() {
    let txs = vec![
        expense("food", "100.49", "2025-01-10"),
        expense("transport", "56.48", "2025-01-12"),
        expense("bills", "50.00", "2025-01-15"),
        expense("bills", "50.00", "2025-02-01"),
    ];
    let summary = insights::compute(&txs);
    assert_eq!(summary.total_spending, dec("256.97"));

    let sum_of_rows: Decimal = summary.category_breakdown.iter().map(|c| c.total).sum();
    assert_eq!(sum_of_rows, summary.total_spending);

    let bills = summary
        .category_breakdown
        .iter()
        .find(|c| c.category == "bills")
        .unwrap();
    assert_eq!(bills.total, dec("100.00"));
    assert_eq!(bills.count, 2);
}

#[test]
fn breakdown_keeps_first_appearance_order() {
    let txs = vec![
        expense("transport", "10", "2025-01-01"),
        expense("food", "20", "2025-01-02"),
        expense("transport", "5", "2025-01-03"),
    ];
    let summary = insights::compute(&txs);
    let order: Vec<&str> = summary
        .category_breakdown
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(order, vec!["transport", "food"]);
}

#[test]
fn category_totals_are_rounded_to_cents() {
    let txs = vec![
        expense("food", "10.333", "2025-01-01"),
        expense("food", "10.333", "2025-01-02"),
    ];
    let summary = insights::compute(&txs);
    assert_eq!(summary.category_breakdown[0].total, dec("20.67"));
    // the grand total stays at full precision
    assert_eq!(summary.total_spending, dec("20.666"));
}

#[test]
fn monthly_trend_is_chronological() {
    let txs = vec![
        expense("food", "30", "2025-03-05"),
        expense("food", "10", "2025-01-20"),
        expense("food", "20", "2024-12-31"),
        expense("food", "15", "2025-01-02"),
    ];
    let summary = insights::compute(&txs);
    let months: Vec<&str> = summary
        .monthly_trend
        .iter()
        .map(|m| m.month.as_str())
        .collect();
    assert_eq!(months, vec!["2024-12", "2025-01", "2025-03"]);
    assert_eq!(summary.monthly_trend[1].total, dec("25"));
}

#[test]
fn average_monthly_expense_is_mean_of_month_sums() {
    let trend = vec![
        MonthTotal {
            month: "2025-01".into(),
            total: dec("100"),
        },
        MonthTotal {
            month: "2025-02".into(),
            total: dec("200"),
        },
    ];
    assert_eq!(insights::average_monthly_expense(&trend), dec("150"));
    assert_eq!(insights::average_monthly_expense(&[]), Decimal::ZERO);
}

#[test]
fn month_over_month_change_when_prior_month_has_spending() {
    let trend = vec![
        MonthTotal {
            month: "2025-08".into(),
            total: dec("200"),
        },
        MonthTotal {
            month: "2025-09".into(),
            total: dec("250"),
        },
    ];
    let cmp = insights::month_over_month(&trend, "2025-09", "2025-08").unwrap();
    assert_eq!(cmp, MonthComparison::Change { percent: dec("25") });
}

#[test]
fn month_over_month_reports_no_prior_data_not_division_error() {
    let trend = vec![MonthTotal {
        month: "2025-09".into(),
        total: dec("80"),
    }];
    let cmp = insights::month_over_month(&trend, "2025-09", "2025-08").unwrap();
    assert_eq!(cmp, MonthComparison::NoPriorData);
}

#[test]
fn month_over_month_is_silent_when_both_months_are_empty() {
    assert_eq!(insights::month_over_month(&[], "2025-09", "2025-08"), None);
}

#[test]
fn negative_change_reported_when_spending_drops() {
    let trend = vec![
        MonthTotal {
            month: "2025-08".into(),
            total: dec("400"),
        },
        MonthTotal {
            month: "2025-09".into(),
            total: dec("300"),
        },
    ];
    let cmp = insights::month_over_month(&trend, "2025-09", "2025-08").unwrap();
    assert_eq!(cmp, MonthComparison::Change { percent: dec("-25") });
}
