// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::finance::Tracker;
use crate::ledger::{LedgerFilter, build_ledger};
use crate::utils::{fmt_amount, pretty_table};
use anyhow::Result;
use chrono::Datelike;

pub fn filter_from(m: &clap::ArgMatches) -> LedgerFilter {
    let today = chrono::Local::now().date_naive();
    let year = m.get_one::<i32>("year").copied().unwrap_or(today.year());
    let month = m.get_one::<u32>("month").copied().unwrap_or(today.month());
    let filter = LedgerFilter::month(year, month);
    if m.get_flag("desc") {
        filter.descending()
    } else {
        filter
    }
}

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from(m);
    let ledger = build_ledger(&tracker.transactions, &tracker.categories, filter);

    if m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&ledger)?);
        return Ok(());
    }
    if m.get_flag("jsonl") {
        for row in &ledger.rows {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    let count = ledger.rows.len();
    let mut rows: Vec<Vec<String>> = ledger
        .rows
        .into_iter()
        .map(|r| vec![r.date, r.category, fmt_amount(&r.amount), r.note, r.id])
        .collect();
    rows.push(vec![
        "Balance".into(),
        String::new(),
        fmt_amount(&ledger.total),
        String::new(),
        String::new(),
    ]);
    println!(
        "{}-{:02} ({} items, {})",
        filter.year,
        filter.month,
        count,
        if filter.ascending { "oldest first" } else { "newest first" }
    );
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Amount", "Note", "ID"], rows)
    );
    Ok(())
}
