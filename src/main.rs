// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use fintrack::{cli, commands, db, finance::Tracker};

fn init_logging() {
    let filter = EnvFilter::try_from_env("FINTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = matches.get_one::<PathBuf>("db");
    let conn = db::open_or_init(db_path.map(PathBuf::as_path)).context("Open database")?;
    let mut tracker = Tracker::load(&conn).context("Load stores")?;
    tracker.seed_defaults();

    match matches.subcommand() {
        Some(("init", _)) => match db_path {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("category", sub)) => commands::categories::handle(&mut tracker, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut tracker, sub)?,
        Some(("ledger", sub)) => commands::ledger::handle(&tracker, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&tracker, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    tracker.save(&conn).context("Save stores")?;
    Ok(())
}
