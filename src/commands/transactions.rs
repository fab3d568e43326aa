// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::entity::Entity;
use crate::error::TrackerError;
use crate::finance::{Tracker, by_category, by_date_range};
use crate::models::{Transaction, TransactionInput, TransactionPatch};
use crate::utils::{fmt_amount, maybe_print_json, non_empty, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(tracker: &mut Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(tracker, sub)?,
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("update", sub)) => update(tracker, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if tracker.transactions.remove(id) {
                println!("Removed transaction {}", id);
            } else {
                println!("No active transaction with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

/// The store keeps whatever id it is given; the CLI only files new entries
/// under categories that currently exist.
fn active_category(tracker: &Tracker, raw: &str) -> Result<String> {
    let id = raw.trim();
    tracker
        .categories
        .active_by_id(id)
        .map(|c| c.id().to_string())
        .ok_or_else(|| TrackerError::UnknownCategory(id.to_string()).into())
}

fn add(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category_id = active_category(tracker, sub.get_one::<String>("category").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let note = non_empty(sub.get_one::<String>("note"));

    let added = tracker.transactions.add(TransactionInput {
        amount,
        category_id,
        date,
        note,
    });
    println!(
        "Recorded {} on {} under '{}' ({})",
        fmt_amount(&added.amount),
        added.date,
        added.category_id,
        added.id()
    );
    Ok(())
}

fn update(tracker: &mut Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|s| active_category(tracker, s))
        .transpose()?;
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;
    let note = sub
        .get_one::<String>("note")
        .map(|raw| non_empty(Some(raw)));

    let patch = TransactionPatch {
        amount,
        category_id,
        date,
        note,
    };
    if tracker.transactions.update(id, patch) {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
    pub deleted: bool,
}

impl TransactionRow {
    fn new(tracker: &Tracker, t: &Transaction) -> Self {
        Self {
            id: t.id().to_string(),
            date: t.date.to_string(),
            category: tracker.categories.label_for(&t.category_id),
            amount: fmt_amount(&t.amount),
            note: t.note.clone().unwrap_or_default(),
            deleted: !t.is_active(),
        }
    }
}

pub fn query_rows(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let items = tracker.transactions.items();
    let mut picked: Vec<&Transaction> = if sub.get_flag("all") {
        items.iter().collect()
    } else {
        tracker.transactions.get_active()
    };

    if let Some(cat) = sub.get_one::<String>("category") {
        picked = by_category(picked, cat.trim());
    }
    if let (Some(from), Some(to)) = (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        picked = by_date_range(picked, parse_date(from)?, parse_date(to)?);
    }

    Ok(picked
        .into_iter()
        .map(|t| TransactionRow::new(tracker, t))
        .collect())
}

fn list(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(tracker, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}
