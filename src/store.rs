// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger store: owner-scoped persistence over SQLite. Every statement
//! filters by `user_id`; callers never see another owner's rows.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Budget, Transaction, TransactionKind, User};

/// Validated fields ready for insert or full-row update.
#[derive(Debug, Clone)]
pub struct NewTransaction<'a> {
    pub description: &'a str,
    pub amount: Decimal,
    pub category: &'a str,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub currency: &'a str,
    pub receipt: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub limit: Option<usize>,
}

pub fn insert_transaction(
    conn: &Connection,
    owner_id: i64,
    rec: &NewTransaction,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, category, date, kind, currency, receipt)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            owner_id,
            rec.description,
            rec.amount.to_string(),
            rec.category,
            rec.date.to_string(),
            rec.kind.as_str(),
            rec.currency,
            rec.receipt
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_transaction(r: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let amount_raw: String = r.get(3)?;
    let amount = amount_raw.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let kind_raw: String = r.get(6)?;
    let kind = match kind_raw.as_str() {
        "income" => TransactionKind::Income,
        "expense" => TransactionKind::Expense,
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                format!("unrecognized kind '{}'", other).into(),
            ));
        }
    };
    Ok(Transaction {
        id: r.get(0)?,
        owner_id: r.get(1)?,
        description: r.get(2)?,
        amount,
        category: r.get(4)?,
        date: r.get(5)?,
        kind,
        currency: r.get(7)?,
        receipt: r.get(8)?,
        created_at: r.get(9)?,
    })
}

const TX_COLUMNS: &str =
    "id, user_id, description, amount, category, date, kind, currency, receipt, created_at";

pub fn get_transaction(conn: &Connection, owner_id: i64, id: i64) -> Result<Transaction> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE id=?1 AND user_id=?2",
        TX_COLUMNS
    );
    conn.query_row(&sql, params![id, owner_id], |r| row_to_transaction(r))
        .optional()?
        .ok_or(Error::NotFound)
}

/// Query an owner's transactions, newest first.
pub fn query_transactions(
    conn: &Connection,
    owner_id: i64,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>> {
    let mut sql = format!(
        "SELECT {} FROM transactions WHERE user_id=?",
        TX_COLUMNS
    );
    let mut params_vec: Vec<String> = vec![owner_id.to_string()];

    if let Some(start) = filter.start_date {
        sql.push_str(" AND date >= ?");
        params_vec.push(start.to_string());
    }
    if let Some(end) = filter.end_date {
        sql.push_str(" AND date <= ?");
        params_vec.push(end.to_string());
    }
    if let Some(ref cat) = filter.category {
        sql.push_str(" AND category = ?");
        params_vec.push(cat.clone());
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind = ?");
        params_vec.push(kind.as_str().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let bind: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(row_to_transaction(r)?);
    }
    Ok(data)
}

/// Full-row replace of the mutable fields. The id/owner pair is checked in
/// the statement itself so a foreign owner's id reads as not-found.
pub fn update_transaction(
    conn: &Connection,
    owner_id: i64,
    id: i64,
    rec: &NewTransaction,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE transactions
         SET description=?1, amount=?2, category=?3, date=?4, kind=?5, currency=?6, receipt=?7
         WHERE id=?8 AND user_id=?9",
        params![
            rec.description,
            rec.amount.to_string(),
            rec.category,
            rec.date.to_string(),
            rec.kind.as_str(),
            rec.currency,
            rec.receipt,
            id,
            owner_id
        ],
    )?;
    if changed == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, owner_id: i64, id: i64) -> Result<()> {
    let changed = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, owner_id],
    )?;
    if changed == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

pub fn create_user(conn: &Connection, username: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO users(username) VALUES (?1)",
        params![username],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username, created_at FROM users ORDER BY username")?;
    let rows = stmt.query_map([], |r| {
        Ok(User {
            id: r.get(0)?,
            username: r.get(1)?,
            created_at: r.get(2)?,
        })
    })?;
    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

pub fn set_budget(
    conn: &Connection,
    owner_id: i64,
    category: &str,
    amount: Decimal,
    month: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets(user_id, category, amount, month) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id, category, month) DO UPDATE SET amount=excluded.amount",
        params![owner_id, category, amount.to_string(), month],
    )?;
    Ok(())
}

pub fn list_budgets(
    conn: &Connection,
    owner_id: i64,
    month: Option<&str>,
) -> Result<Vec<Budget>> {
    let mut sql = String::from(
        "SELECT id, user_id, category, amount, month FROM budgets WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![owner_id.to_string()];
    if let Some(m) = month {
        sql.push_str(" AND month=?");
        params_vec.push(m.to_string());
    }
    sql.push_str(" ORDER BY month DESC, category");

    let mut stmt = conn.prepare(&sql)?;
    let bind: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(bind))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let amount_raw: String = r.get(3)?;
        let amount = amount_raw.parse::<Decimal>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;
        data.push(Budget {
            id: r.get(0)?,
            owner_id: r.get(1)?,
            category: r.get(2)?,
            amount,
            month: r.get(4)?,
        });
    }
    Ok(data)
}

/// Sum of an owner's expense amounts for one category in one `YYYY-MM`
/// month, summed as decimals on the Rust side.
pub fn expense_total_for_category_month(
    conn: &Connection,
    owner_id: i64,
    category: &str,
    month: &str,
) -> Result<Decimal> {
    let mut stmt = conn.prepare(
        "SELECT amount FROM transactions
         WHERE user_id=?1 AND category=?2 AND kind='expense' AND substr(date,1,7)=?3",
    )?;
    let mut rows = stmt.query(params![owner_id, category, month])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let raw: String = r.get(0)?;
        let amt = raw.parse::<Decimal>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        total += amt;
    }
    Ok(total)
}
