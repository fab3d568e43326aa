// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Entity id")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Categorized personal finance ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FINTRACK_DB")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the SQLite database (default: platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database and seed defaults"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color").help("#rgb or #rrggbb")),
                )
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include deleted categories"),
                    ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("icon").long("icon").help("Empty string clears"))
                        .arg(Arg::new("color").long("color").help("Empty string clears")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Negative for expenses"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from").requires("to"))
                        .arg(Arg::new("to").long("to").requires("from"))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .conflicts_with_all(["category", "from"])
                                .help("Include deleted transactions"),
                        ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note").help("Empty string clears")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_args(
            Command::new("ledger")
                .about("Monthly ledger with balance")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32)),
                )
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_parser(value_parser!(u32).range(1..=12)),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .help("Newest first"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}
