// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .required(true)
        .help("Username the operation is scoped to")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn tx_field_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("description")
            .long("description")
            .required(true)
            .help("What the money moved for"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(true)
            .help("Positive decimal amount"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .required(true)
            .help("YYYY-MM-DD"),
    )
    .arg(
        Arg::new("kind")
            .long("kind")
            .required(true)
            .help("income or expense"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .help("Explicit category; left blank it is classified from the description"),
    )
    .arg(
        Arg::new("receipt")
            .long("receipt")
            .help("Path to a receipt file to attach"),
    )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance ledger with keyword auto-categorization and spending insights")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add").about("Create a user").arg(
                        Arg::new("name")
                            .long("name")
                            .required(true)
                            .help("Unique username"),
                    ),
                )
                .subcommand(json_flags(Command::new("list").about("List users"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(tx_field_args(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(user_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(user_arg())
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("kind").long("kind").help("income or expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    tx_field_args(
                        Command::new("update")
                            .about("Replace the mutable fields of a transaction")
                            .arg(user_arg()),
                    )
                    .arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("Spending insights over the ledger")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Total and per-category spending for a range")
                        .arg(user_arg())
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD")),
                ))
                .subcommand(json_flags(
                    Command::new("trend")
                        .about("Per-month spending totals")
                        .arg(user_arg())
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD")),
                ))
                .subcommand(json_flags(
                    Command::new("compare")
                        .about("Average monthly spend and month-over-month change")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set or replace a budget")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List budgets")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Budgeted vs. spent for a month")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM")),
                )),
        )
        .subcommand(
            Command::new("import").about("Bulk import").subcommand(
                Command::new("transactions")
                    .about("Import transactions from CSV or JSON")
                    .arg(user_arg())
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    ),
            ),
        )
        .subcommand(
            Command::new("export").about("Bulk export").subcommand(
                Command::new("transactions")
                    .about("Export transactions to CSV or JSON")
                    .arg(user_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("seed")
                .about("Load the demo ledger for a user")
                .arg(user_arg()),
        )
        .subcommand(Command::new("doctor").about("Scan the ledger for integrity issues"))
}
