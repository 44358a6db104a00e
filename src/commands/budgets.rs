// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{id_for_user, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    store::set_budget(conn, owner_id, category, amount, &month)?;
    println!("Budget set for {} / {} = {}", month, category, amount);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let budgets = store::list_budgets(conn, owner_id, month.as_deref())?;
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let rows: Vec<Vec<String>> = budgets
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    b.category.clone(),
                    format!("{:.2}", b.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Category", "Budget"], rows));
    }
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;

    let budgets = store::list_budgets(conn, owner_id, Some(&month))?;
    let mut data = Vec::new();
    for b in &budgets {
        let spent = store::expense_total_for_category_month(conn, owner_id, &b.category, &month)?;
        let flag = if spent > b.amount { "OVER" } else { "ok" };
        data.push(vec![
            b.category.clone(),
            format!("{:.2}", b.amount),
            format!("{:.2}", spent),
            flag.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Status"], data)
        );
    }
    Ok(())
}
