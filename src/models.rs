// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Direction of a ledger entry. Serialized as the literal strings
/// `income` / `expense` everywhere, including the bulk wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::validation(
                "kind",
                format!("'{}' is not 'income' or 'expense'", other),
            )),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

/// A persisted ledger entry. `id`, `owner_id` and `created_at` are
/// store-assigned and immutable after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub currency: String,
    /// Receipt attachment as base64 text, absent when none was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    pub created_at: String,
}

/// Caller-supplied fields for add/update. Date and kind arrive as raw
/// text so the service owns format validation.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Decimal,
    pub date: String,
    pub kind: String,
    pub category: Option<String>,
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Budget {
    pub id: i64,
    pub owner_id: i64,
    pub category: String,
    pub amount: Decimal,
    pub month: String, // YYYY-MM
}
