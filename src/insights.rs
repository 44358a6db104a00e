// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Transaction;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Rounded to 2 decimal places for display stability.
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthTotal {
    /// `YYYY-MM`, chronologically orderable as text.
    pub month: String,
    pub total: Decimal,
}

/// Derived aggregate over an owner's expense transactions for one range.
/// Recomputed on every query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InsightSummary {
    /// Full-precision sum of every amount in the filtered set.
    pub total_spending: Decimal,
    /// Grouped by category, in order of first appearance.
    pub category_breakdown: Vec<CategoryTotal>,
    /// Grouped by calendar month, chronological.
    pub monthly_trend: Vec<MonthTotal>,
}

impl InsightSummary {
    pub fn empty() -> Self {
        InsightSummary {
            total_spending: Decimal::ZERO,
            category_breakdown: Vec::new(),
            monthly_trend: Vec::new(),
        }
    }
}

/// Aggregate a set of transactions the caller has already filtered to
/// `kind = expense` and the desired date range. An empty input yields the
/// empty summary, not an error.
pub fn compute(transactions: &[Transaction]) -> InsightSummary {
    if transactions.is_empty() {
        return InsightSummary::empty();
    }

    let mut total = Decimal::ZERO;
    let mut breakdown: Vec<CategoryTotal> = Vec::new();
    let mut months: BTreeMap<String, Decimal> = BTreeMap::new();

    for t in transactions {
        total += t.amount;

        match breakdown.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => {
                entry.total += t.amount;
                entry.count += 1;
            }
            None => breakdown.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
                count: 1,
            }),
        }

        *months
            .entry(t.date.format("%Y-%m").to_string())
            .or_insert(Decimal::ZERO) += t.amount;
    }

    for entry in &mut breakdown {
        entry.total = entry.total.round_dp(2);
    }

    InsightSummary {
        total_spending: total,
        category_breakdown: breakdown,
        monthly_trend: months
            .into_iter()
            .map(|(month, total)| MonthTotal { month, total })
            .collect(),
    }
}

/// Mean of the per-month sums. Zero when there are no months.
pub fn average_monthly_expense(trend: &[MonthTotal]) -> Decimal {
    if trend.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = trend.iter().map(|m| m.total).sum();
    sum / Decimal::from(trend.len() as i64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MonthComparison {
    /// Percentage change versus the previous month.
    Change { percent: Decimal },
    /// Spending this month but nothing last month; a division result
    /// would be meaningless.
    NoPriorData,
}

/// Month-over-month comparison between two `YYYY-MM` labels in the trend.
/// `None` when neither month saw spending.
pub fn month_over_month(
    trend: &[MonthTotal],
    current_month: &str,
    previous_month: &str,
) -> Option<MonthComparison> {
    let total_for = |label: &str| {
        trend
            .iter()
            .find(|m| m.month == label)
            .map(|m| m.total)
            .unwrap_or(Decimal::ZERO)
    };
    let current = total_for(current_month);
    let previous = total_for(previous_month);

    if previous > Decimal::ZERO {
        Some(MonthComparison::Change {
            percent: (current - previous) / previous * Decimal::from(100),
        })
    } else if current > Decimal::ZERO {
        Some(MonthComparison::NoPriorData)
    } else {
        None
    }
}
