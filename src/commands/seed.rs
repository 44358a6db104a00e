// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::classifier::KeywordClassifier;
use crate::models::TransactionInput;
use crate::service;
use crate::utils::{id_for_user, parse_decimal};
use anyhow::{Context, Result};
use rusqlite::Connection;

/// Demo ledger: (description, amount, date, kind, category).
const SAMPLE_DATA: &[(&str, &str, &str, &str, &str)] = &[
    ("Groceries at Walmart", "85.50", "2025-09-15", "expense", "food"),
    ("Uber ride to airport", "45.00", "2025-09-16", "expense", "transport"),
    ("Netflix subscription", "15.99", "2025-09-17", "expense", "entertainment"),
    ("Salary deposit", "2500.00", "2025-09-15", "income", "general"),
    ("Amazon shopping", "120.75", "2025-09-18", "expense", "shopping"),
    ("Electricity bill", "85.00", "2025-08-19", "expense", "bills"),
    ("Dinner at restaurant", "65.25", "2025-08-20", "expense", "food"),
    ("Gas station", "45.50", "2025-08-21", "expense", "transport"),
    ("Rent payment", "1200.00", "2025-07-01", "expense", "bills"),
    ("Grocery shopping", "95.50", "2025-07-05", "expense", "food"),
    ("Train ticket", "15.00", "2025-07-10", "expense", "transport"),
    ("Concert tickets", "85.00", "2025-07-15", "expense", "entertainment"),
    ("Clothes from H&M", "60.00", "2025-07-20", "expense", "shopping"),
    ("Freelance payment", "500.00", "2025-07-25", "income", "general"),
    ("Water bill", "35.00", "2025-06-01", "expense", "bills"),
    ("Restaurant dinner", "75.00", "2025-06-05", "expense", "food"),
    ("Gas for car", "50.00", "2025-06-10", "expense", "transport"),
    ("Online shopping", "45.00", "2025-06-20", "expense", "shopping"),
    ("Doctor visit", "150.00", "2025-06-22", "expense", "healthcare"),
    ("Dividend income", "200.00", "2025-06-25", "income", "general"),
    ("Internet bill", "60.00", "2025-05-01", "expense", "bills"),
    ("Cafe lunch", "12.50", "2025-05-05", "expense", "food"),
    ("Taxi ride", "20.00", "2025-05-10", "expense", "transport"),
    ("Video game", "59.99", "2025-05-15", "expense", "entertainment"),
    ("Online course", "49.99", "2025-05-18", "expense", "education"),
    ("Gift for friend", "30.00", "2025-05-20", "expense", "miscellaneous"),
    ("Salary", "2500.00", "2025-05-25", "income", "general"),
];

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let owner_id = id_for_user(conn, m.get_one::<String>("user").unwrap())?;
    let classifier = KeywordClassifier::default();

    let tx = conn.transaction()?;
    for (description, amount, date, kind, category) in SAMPLE_DATA {
        let input = TransactionInput {
            description: (*description).to_string(),
            amount: parse_decimal(amount)?,
            date: (*date).to_string(),
            kind: (*kind).to_string(),
            category: Some((*category).to_string()),
            receipt: None,
        };
        service::add_transaction(&tx, &classifier, owner_id, &input)
            .with_context(|| format!("Seeding '{}'", description))?;
    }
    tx.commit()?;
    println!("Seeded {} demo transactions", SAMPLE_DATA.len());
    Ok(())
}
