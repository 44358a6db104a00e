// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction service: validates caller input, resolves categories via the
//! classifier, and delegates persistence to the ledger store. Validation is
//! fail-fast and complete before any mutation, so no partial writes occur.

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::insights::{self, InsightSummary, MonthComparison};
use crate::models::{DEFAULT_CURRENCY, Transaction, TransactionInput, TransactionKind};
use crate::store::{self, NewTransaction, TransactionFilter};

fn check_owner(owner_id: i64) -> Result<()> {
    if owner_id <= 0 {
        return Err(Error::validation("owner_id", "must be a positive identifier"));
    }
    Ok(())
}

fn parse_iso_date(field: &'static str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Error::validation(field, format!("'{}' is not YYYY-MM-DD", raw)))
}

/// Validate every field in order, then resolve the category: an explicit
/// non-blank category is taken as-is (freeform values allowed), otherwise
/// the classifier decides.
fn validate(
    owner_id: i64,
    input: &TransactionInput,
    classifier: &dyn Classifier,
) -> Result<(NaiveDate, TransactionKind, String)> {
    check_owner(owner_id)?;
    if input.description.is_empty() {
        return Err(Error::validation("description", "must be non-empty text"));
    }
    if input.amount <= Decimal::ZERO {
        return Err(Error::validation("amount", "must be a positive number"));
    }
    let date = parse_iso_date("date", &input.date)?;
    let kind = TransactionKind::parse(&input.kind)?;

    let category = match input.category.as_deref() {
        Some(cat) if !cat.trim().is_empty() => cat.to_string(),
        _ => classifier
            .categorize(&input.description, input.amount)
            .map_err(|e| Error::Classification(Box::new(e)))?,
    };

    Ok((date, kind, category))
}

pub fn add_transaction(
    conn: &Connection,
    classifier: &dyn Classifier,
    owner_id: i64,
    input: &TransactionInput,
) -> Result<Transaction> {
    let (date, kind, category) = validate(owner_id, input, classifier)?;
    let rec = NewTransaction {
        description: &input.description,
        amount: input.amount,
        category: &category,
        date,
        kind,
        currency: DEFAULT_CURRENCY,
        receipt: input.receipt.as_deref(),
    };
    let id = store::insert_transaction(conn, owner_id, &rec)?;
    store::get_transaction(conn, owner_id, id)
}

/// Re-validates the full field set and replaces every mutable field.
/// An id owned by someone else reads as `NotFound`.
pub fn update_transaction(
    conn: &Connection,
    classifier: &dyn Classifier,
    owner_id: i64,
    id: i64,
    input: &TransactionInput,
) -> Result<Transaction> {
    let (date, kind, category) = validate(owner_id, input, classifier)?;
    let rec = NewTransaction {
        description: &input.description,
        amount: input.amount,
        category: &category,
        date,
        kind,
        currency: DEFAULT_CURRENCY,
        receipt: input.receipt.as_deref(),
    };
    store::update_transaction(conn, owner_id, id, &rec)?;
    store::get_transaction(conn, owner_id, id)
}

pub fn delete_transaction(conn: &Connection, owner_id: i64, id: i64) -> Result<()> {
    check_owner(owner_id)?;
    store::delete_transaction(conn, owner_id, id)
}

pub fn list_transactions(
    conn: &Connection,
    owner_id: i64,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>> {
    check_owner(owner_id)?;
    store::query_transactions(conn, owner_id, filter)
}

/// Default insight range: first calendar day of `today`'s month through
/// `today`. Applied only when BOTH bounds are unset.
pub fn default_insight_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    (first, today)
}

pub fn compute_insights(
    conn: &Connection,
    owner_id: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<InsightSummary> {
    check_owner(owner_id)?;
    let (start, end) = match (start_date, end_date) {
        (None, None) => {
            let (s, e) = default_insight_range(chrono::Local::now().date_naive());
            (Some(s), Some(e))
        }
        bounds => bounds,
    };
    let filter = TransactionFilter {
        start_date: start,
        end_date: end,
        kind: Some(TransactionKind::Expense),
        ..TransactionFilter::default()
    };
    let transactions = store::query_transactions(conn, owner_id, &filter)?;
    Ok(insights::compute(&transactions))
}

/// Predictive figures for the advanced view: mean monthly spend over the
/// whole ledger plus the comparison of `today`'s month to the one before.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MonthlyOutlook {
    pub average_monthly_expense: Decimal,
    pub current_month: String,
    pub previous_month: String,
    pub comparison: Option<MonthComparison>,
}

pub fn monthly_outlook(
    conn: &Connection,
    owner_id: i64,
    today: NaiveDate,
) -> Result<MonthlyOutlook> {
    check_owner(owner_id)?;
    let filter = TransactionFilter {
        kind: Some(TransactionKind::Expense),
        ..TransactionFilter::default()
    };
    let transactions = store::query_transactions(conn, owner_id, &filter)?;
    let summary = insights::compute(&transactions);

    let current_month = today.format("%Y-%m").to_string();
    let first = today.with_day(1).unwrap_or(today);
    let previous_month = (first - chrono::Duration::days(1))
        .format("%Y-%m")
        .to_string();
    let comparison =
        insights::month_over_month(&summary.monthly_trend, &current_month, &previous_month);

    Ok(MonthlyOutlook {
        average_monthly_expense: insights::average_monthly_expense(&summary.monthly_trend),
        current_month,
        previous_month,
        comparison,
    })
}
