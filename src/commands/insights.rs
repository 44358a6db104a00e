// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights::MonthComparison;
use crate::service;
use crate::utils::{id_for_user, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("compare", sub)) => compare(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn range_from_args(sub: &clap::ArgMatches) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = match sub.get_one::<String>("from") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    let end = match sub.get_one::<String>("to") {
        Some(s) => Some(parse_date(s)?),
        None => None,
    };
    Ok((start, end))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let (start, end) = range_from_args(sub)?;

    let insights = service::compute_insights(conn, owner_id, start, end)?;
    if !maybe_print_json(json_flag, jsonl_flag, &insights)? {
        let rows: Vec<Vec<String>> = insights
            .category_breakdown
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format!("{:.2}", c.total),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Count"], rows));
        println!("Total spending: {:.2}", insights.total_spending);
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let (start, end) = range_from_args(sub)?;

    let insights = service::compute_insights(conn, owner_id, start, end)?;
    if !maybe_print_json(json_flag, jsonl_flag, &insights.monthly_trend)? {
        let rows: Vec<Vec<String>> = insights
            .monthly_trend
            .iter()
            .map(|m| vec![m.month.clone(), format!("{:.2}", m.total)])
            .collect();
        println!("{}", pretty_table(&["Month", "Spent"], rows));
    }
    Ok(())
}

fn compare(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;

    let today = chrono::Local::now().date_naive();
    let outlook = service::monthly_outlook(conn, owner_id, today)?;
    if !maybe_print_json(json_flag, jsonl_flag, &outlook)? {
        println!(
            "Predicted spend next month: {:.2} (mean of monthly totals)",
            outlook.average_monthly_expense
        );
        match outlook.comparison {
            Some(MonthComparison::Change { percent }) => {
                let trend = if percent > rust_decimal::Decimal::ZERO {
                    "up"
                } else {
                    "down"
                };
                println!(
                    "{} vs {}: {:.1}% {}",
                    outlook.current_month,
                    outlook.previous_month,
                    percent.abs(),
                    trend
                );
            }
            Some(MonthComparison::NoPriorData) => {
                println!(
                    "{} vs {}: no prior data",
                    outlook.current_month, outlook.previous_month
                );
            }
            None => {
                println!(
                    "No spending recorded in {} or {}",
                    outlook.current_month, outlook.previous_month
                );
            }
        }
    }
    Ok(())
}
