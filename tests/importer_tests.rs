// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::commands::importer;
use fintrack::store::{self, TransactionFilter};
use fintrack::{cli, db};
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let owner = store::create_user(&conn, "alice").unwrap();
    (conn, owner)
}

fn run_import(conn: &mut Connection, path: &str, format: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "import",
        "transactions",
        "--user",
        "alice",
        "--path",
        path,
        "--format",
        format,
    ]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("import command not parsed");
    }
}

#[test]
fn csv_import_maps_wire_type_to_kind_and_classifies_blanks() {
    let (mut conn, owner) = setup();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "description,amount,date,type,category").unwrap();
    writeln!(file, "Groceries at Walmart,85.50,2025-09-15,expense,food").unwrap();
    writeln!(file, "Uber ride,12.00,2025-09-16,expense,").unwrap();
    writeln!(file, "Salary deposit,2500.00,2025-09-15,income,general").unwrap();
    file.flush().unwrap();

    run_import(&mut conn, file.path().to_str().unwrap(), "csv").unwrap();

    let rows = store::query_transactions(&conn, owner, &TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 3);

    let uber = rows.iter().find(|t| t.description == "Uber ride").unwrap();
    // blank category went through the classifier
    assert_eq!(uber.category, "transport");

    let salary = rows
        .iter()
        .find(|t| t.description == "Salary deposit")
        .unwrap();
    assert_eq!(salary.kind.as_str(), "income");
}

#[test]
fn json_import_accepts_the_same_wire_schema() {
    let (mut conn, owner) = setup();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"description": "Netflix subscription", "amount": "15.99", "date": "2025-09-17", "type": "expense"}},
            {{"description": "Dinner at restaurant", "amount": "65.25", "date": "2025-09-18", "type": "expense", "category": "food"}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    run_import(&mut conn, file.path().to_str().unwrap(), "json").unwrap();

    let rows = store::query_transactions(&conn, owner, &TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 2);
    let netflix = rows
        .iter()
        .find(|t| t.description == "Netflix subscription")
        .unwrap();
    assert_eq!(netflix.category, "entertainment");
}

#[test]
fn json_import_accepts_numeric_amounts() {
    let (mut conn, owner) = setup();
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"description": "Netflix subscription", "amount": 15.99, "date": "2025-09-17", "type": "expense"}},
            {{"description": "Rent payment", "amount": 1200, "date": "2025-09-01", "type": "expense", "category": "bills"}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    run_import(&mut conn, file.path().to_str().unwrap(), "json").unwrap();

    let rows = store::query_transactions(&conn, owner, &TransactionFilter::default()).unwrap();
    assert_eq!(rows.len(), 2);
    let netflix = rows
        .iter()
        .find(|t| t.description == "Netflix subscription")
        .unwrap();
    assert_eq!(netflix.amount, "15.99".parse::<rust_decimal::Decimal>().unwrap());
    let rent = rows.iter().find(|t| t.description == "Rent payment").unwrap();
    assert_eq!(rent.amount, "1200".parse::<rust_decimal::Decimal>().unwrap());
}

#[test]
fn a_bad_row_aborts_the_whole_import() {
    let (mut conn, owner) = setup();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "description,amount,date,type,category").unwrap();
    writeln!(file, "Groceries,85.50,2025-09-15,expense,food").unwrap();
    writeln!(file, "Broken row,-5.00,2025-09-16,expense,").unwrap();
    file.flush().unwrap();

    let err = run_import(&mut conn, file.path().to_str().unwrap(), "csv").unwrap_err();
    assert!(err.to_string().contains("Row 2"));

    // nothing was committed
    let rows = store::query_transactions(&conn, owner, &TransactionFilter::default()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn foreign_currency_rows_are_rejected() {
    let (mut conn, owner) = setup();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "description,amount,date,type,category,currency").unwrap();
    writeln!(file, "Groceries,85.50,2025-09-15,expense,food,EUR").unwrap();
    file.flush().unwrap();

    let err = run_import(&mut conn, file.path().to_str().unwrap(), "csv").unwrap_err();
    assert!(err.to_string().contains("not supported"));

    let rows = store::query_transactions(&conn, owner, &TransactionFilter::default()).unwrap();
    assert!(rows.is_empty());
}
