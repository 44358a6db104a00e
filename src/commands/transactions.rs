// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::classifier::KeywordClassifier;
use crate::models::{Transaction, TransactionInput, TransactionKind};
use crate::service;
use crate::store::TransactionFilter;
use crate::utils::{fmt_money, id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn input_from_args(sub: &clap::ArgMatches) -> Result<TransactionInput> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let receipt = match sub.get_one::<String>("receipt") {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("Read receipt file {}", path))?;
            Some(BASE64.encode(bytes))
        }
        None => None,
    };
    Ok(TransactionInput {
        description: sub.get_one::<String>("description").unwrap().clone(),
        amount,
        date: sub.get_one::<String>("date").unwrap().clone(),
        kind: sub.get_one::<String>("kind").unwrap().clone(),
        category: sub.get_one::<String>("category").cloned(),
        receipt,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let input = input_from_args(sub)?;
    let classifier = KeywordClassifier::default();
    let tx = service::add_transaction(conn, &classifier, owner_id, &input)?;
    println!(
        "Recorded {} '{}' on {} as {} [{}] (id {})",
        tx.kind,
        tx.description,
        tx.date,
        fmt_money(&tx.amount, &tx.currency),
        tx.category,
        tx.id
    );
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let input = input_from_args(sub)?;
    let classifier = KeywordClassifier::default();
    let tx = service::update_transaction(conn, &classifier, owner_id, id, &input)?;
    println!("Updated transaction {} ('{}' [{}])", tx.id, tx.description, tx.category);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    service::delete_transaction(conn, owner_id, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::default();
    if let Some(from) = sub.get_one::<String>("from") {
        filter.start_date = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filter.end_date = Some(parse_date(to)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        filter.category = Some(cat.clone());
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        filter.kind = Some(TransactionKind::parse(kind)?);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        filter.limit = Some(*limit);
    }
    Ok(filter)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let filter = filter_from_args(sub)?;
    Ok(service::list_transactions(conn, owner_id, &filter)?)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    format!("{:.2}", t.amount),
                    t.currency.clone(),
                    t.category.clone(),
                    t.kind.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "CCY", "Category", "Kind"],
                rows,
            )
        );
    }
    Ok(())
}
