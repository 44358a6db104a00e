// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::classifier::KeywordClassifier;
use crate::models::{DEFAULT_CURRENCY, TransactionInput};
use crate::service;
use crate::utils::{id_for_user, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rusqlite::Connection;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Bulk interchange record. The wire field `type` maps to the internal
/// transaction kind.
#[derive(Debug, Deserialize)]
struct WireRecord {
    description: String,
    #[serde(deserialize_with = "amount_field")]
    amount: String,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    currency: Option<String>,
}

/// Amounts arrive as JSON numbers from some producers and as plain text
/// from CSV; both forms are accepted and validated downstream.
fn amount_field<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> de::Visitor<'de> for AmountVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a decimal amount as a number or string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    d.deserialize_any(AmountVisitor)
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn read_records(path: &str, format: &str) -> Result<Vec<WireRecord>> {
    match format {
        "csv" => {
            let mut rdr = ReaderBuilder::new()
                .has_headers(true)
                .from_path(path)
                .with_context(|| format!("Open CSV {}", path))?;
            let mut records = Vec::new();
            for result in rdr.deserialize() {
                records.push(result?);
            }
            Ok(records)
        }
        "json" => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Open JSON {}", path))?;
            let records: Vec<WireRecord> =
                serde_json::from_str(&raw).with_context(|| format!("Parse JSON {}", path))?;
            Ok(records)
        }
        other => Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let path = sub.get_one::<String>("path").unwrap().trim();
    let format = sub.get_one::<String>("format").unwrap().to_lowercase();

    let records = read_records(path, &format)?;
    let classifier = KeywordClassifier::default();

    // The whole file lands in one transaction; a bad row aborts it all.
    let tx = conn.transaction()?;
    let mut imported = 0usize;
    for (i, rec) in records.iter().enumerate() {
        if let Some(ccy) = rec.currency.as_deref() {
            if !ccy.is_empty() && !ccy.eq_ignore_ascii_case(DEFAULT_CURRENCY) {
                return Err(anyhow!(
                    "Row {}: currency '{}' is not supported (expected {})",
                    i + 1,
                    ccy,
                    DEFAULT_CURRENCY
                ));
            }
        }
        let amount = parse_decimal(&rec.amount)
            .with_context(|| format!("Row {}: invalid amount '{}'", i + 1, rec.amount))?;
        let input = TransactionInput {
            description: rec.description.clone(),
            amount,
            date: rec.date.clone(),
            kind: rec.kind.clone(),
            category: rec.category.clone(),
            receipt: None,
        };
        service::add_transaction(&tx, &classifier, owner_id, &input)
            .with_context(|| format!("Row {}: '{}'", i + 1, rec.description))?;
        imported += 1;
    }
    tx.commit()?;
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
