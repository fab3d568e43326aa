// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::entity::Entity;
use crate::finance::Tracker;
use crate::utils::fmt_amount;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(tracker: &Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(tracker, sub),
        _ => Ok(()),
    }
}

fn export_transactions(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let rows: Vec<[String; 6]> = tracker
        .transactions
        .get_active()
        .into_iter()
        .map(|t| {
            [
                t.id().to_string(),
                t.date.to_string(),
                t.category_id.clone(),
                tracker.categories.label_for(&t.category_id),
                fmt_amount(&t.amount),
                t.note.clone().unwrap_or_default(),
            ]
        })
        .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "category_id", "category", "amount", "note"])?;
            for row in &rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .into_iter()
                .map(|[id, date, category_id, category, amount, note]| {
                    json!({
                        "id": id, "date": date, "categoryId": category_id,
                        "category": category, "amount": amount, "note": note
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
