// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{self, TransactionFilter};
use crate::utils::id_for_user;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut rows =
        store::query_transactions(conn, owner_id, &TransactionFilter::default())?;
    // Store order is newest-first; files read better oldest-first.
    rows.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["description", "amount", "date", "type", "category", "currency"])?;
            for t in &rows {
                wtr.write_record([
                    t.description.clone(),
                    format!("{:.2}", t.amount),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.currency.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in &rows {
                items.push(json!({
                    "description": t.description,
                    "amount": format!("{:.2}", t.amount),
                    "date": t.date.to_string(),
                    "type": t.kind.as_str(),
                    "category": t.category,
                    "currency": t.currency,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
