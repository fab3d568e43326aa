// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use chrono::NaiveDate;
use fintrack::entity::Entity;
use fintrack::finance::{by_date_range, category_store, transaction_store};
use fintrack::models::{CategoryInput, CategoryPatch, TransactionInput};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(amount: i64, category: &str, date: &str) -> TransactionInput {
    TransactionInput {
        amount: Decimal::new(amount, 0),
        category_id: category.into(),
        date: day(date),
        note: None,
    }
}

#[test]
fn add_to_empty_category_store() {
    let mut cats = category_store();
    cats.add(CategoryInput::named("Food"));
    assert_eq!(cats.items().len(), 1);
    assert_eq!(cats.items()[0].name, "Food");
    assert!(cats.items()[0].base().deleted_at().is_none());
}

#[test]
fn hundreds_of_adds_get_distinct_ids() {
    let mut cats = category_store();
    for i in 0..150 {
        cats.add(CategoryInput::named(format!("c{i}")));
    }
    let ids: HashSet<&str> = cats.items().iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), 150);
}

#[test]
fn removed_item_drops_out_of_active_view() {
    let mut cats = category_store();
    let a = cats.add(CategoryInput::named("A")).id().to_string();
    let b = cats.add(CategoryInput::named("B")).id().to_string();
    cats.remove(&a);

    let active: Vec<&str> = cats.get_active().iter().map(|c| c.id()).collect();
    assert_eq!(active, [b.as_str()]);
    assert_eq!(cats.items().len(), 2);
}

#[test]
fn default_categories_seed_once() {
    let mut cats = category_store();
    assert!(cats.seed_defaults());
    assert_eq!(cats.items().len(), 8);
    assert!(cats.get_by_id("food").is_some());
    assert!(cats.get_by_id("transport").is_some());
    assert!(cats.seeded());

    cats.add(CategoryInput::named("Custom"));
    assert!(!cats.seed_defaults());
    assert_eq!(cats.items().len(), 9);
}

#[test]
fn category_update_can_clear_icon() {
    let mut cats = category_store();
    cats.seed_defaults();
    cats.update(
        "food",
        CategoryPatch {
            name: Some("Groceries".into()),
            icon: Some(None),
            ..Default::default()
        },
    );
    let food = cats.get_by_id("food").unwrap();
    assert_eq!(food.name, "Groceries");
    assert_eq!(food.icon, None);
    assert_eq!(food.color.as_deref(), Some("#ef4444"));
    assert_eq!(food.label(), "Groceries");
}

#[test]
fn default_transactions_seed() {
    let mut txs = transaction_store();
    txs.seed_defaults();
    assert_eq!(txs.items().len(), 8);
    assert_eq!(txs.get_by_id("tx-4").unwrap().amount, Decimal::new(250000, 2));
}

#[test]
fn by_category_matches_reference_and_skips_deleted() {
    let mut txs = transaction_store();
    txs.add(tx(-50, "food", "2026-02-25"));
    txs.add(tx(-20, "transport", "2026-02-25"));

    let food = txs.get_by_category("food");
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].amount, Decimal::new(-50, 0));

    let id = food[0].id().to_string();
    txs.remove(&id);
    assert!(txs.get_by_category("food").is_empty());
}

#[test]
fn date_range_keeps_insertion_order() {
    let mut txs = transaction_store();
    txs.add(tx(-50, "food", "2026-02-15"));
    txs.add(tx(-30, "food", "2026-02-20"));
    txs.add(tx(-10, "food", "2026-02-28"));

    let hits = txs.get_by_date_range(day("2026-02-14"), day("2026-02-21"));
    let dates: Vec<String> = hits.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, ["2026-02-15", "2026-02-20"]);
}

#[test]
fn date_range_includes_both_boundaries() {
    let mut txs = transaction_store();
    txs.add(tx(-50, "food", "2026-02-15"));
    txs.add(tx(-30, "food", "2026-02-20"));
    txs.add(tx(-10, "food", "2026-02-28"));

    let hits = by_date_range(txs.items(), day("2026-02-15"), day("2026-02-20"));
    assert_eq!(hits.len(), 2);
    assert!(by_date_range(txs.items(), day("2026-02-21"), day("2026-02-01")).is_empty());
}

#[test]
fn dangling_category_reference_is_tolerated() {
    let mut cats = category_store();
    cats.seed_defaults();
    let mut txs = transaction_store();
    txs.add(tx(-5, "food", "2026-02-10"));
    txs.add(tx(-5, "ghost", "2026-02-10"));

    cats.remove("food");
    assert_eq!(cats.label_for("food"), "unknown");
    assert_eq!(cats.label_for("ghost"), "unknown");
    assert_eq!(cats.label_for("bills"), "📄 Bills");
    assert_eq!(txs.get_by_category("food").len(), 1);
}
