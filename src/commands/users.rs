// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::create_user(conn, name)?;
            println!("Added user '{}' (id {})", name, id);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let users = store::list_users(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &users)? {
                let rows: Vec<Vec<String>> = users
                    .iter()
                    .map(|u| {
                        vec![
                            u.id.to_string(),
                            u.username.clone(),
                            u.created_at.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Username", "Created"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
