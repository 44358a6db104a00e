// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Scan the ledger for rows that violate the at-rest invariants:
/// positive amounts, resolved categories, parseable dates, known owners.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT t.id, t.amount, t.category, t.date,
                (SELECT COUNT(*) FROM users u WHERE u.id = t.user_id)
         FROM transactions t",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let amount_raw: String = r.get(1)?;
        let category: String = r.get(2)?;
        let date_raw: String = r.get(3)?;
        let owner_exists: i64 = r.get(4)?;

        match amount_raw.parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            Ok(_) => rows.push(vec![
                "non_positive_amount".into(),
                format!("tx {} amount {}", id, amount_raw),
            ]),
            Err(_) => rows.push(vec![
                "unparseable_amount".into(),
                format!("tx {} amount '{}'", id, amount_raw),
            ]),
        }
        if category.trim().is_empty() {
            rows.push(vec!["empty_category".into(), format!("tx {}", id)]);
        }
        if chrono::NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").is_err() {
            rows.push(vec![
                "unparseable_date".into(),
                format!("tx {} date '{}'", id, date_raw),
            ]);
        }
        if owner_exists == 0 {
            rows.push(vec!["orphaned_owner".into(), format!("tx {}", id)]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
