// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Data a fresh install starts with.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::entity::Seed;
use crate::models::{CategoryInput, TransactionInput};

pub fn default_categories() -> Vec<Seed<CategoryInput>> {
    [
        ("food", "Food", "🍔", "#ef4444"),
        ("transport", "Transport", "🚗", "#3b82f6"),
        ("entertainment", "Entertainment", "🎬", "#8b5cf6"),
        ("shopping", "Shopping", "🛒", "#f59e0b"),
        ("bills", "Bills", "📄", "#6b7280"),
        ("health", "Health", "🏥", "#10b981"),
        ("salary", "Salary", "💰", "#22c55e"),
        ("other", "Other", "📦", "#94a3b8"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| {
        Seed::new(
            id,
            CategoryInput {
                name: name.to_string(),
                icon: Some(icon.to_string()),
                color: Some(color.to_string()),
            },
        )
    })
    .collect()
}

pub fn default_transactions() -> Vec<Seed<TransactionInput>> {
    // (id, amount in cents, category, day of February 2026, note)
    [
        ("tx-1", -4550, "food", 20, "Groceries"),
        ("tx-2", -1200, "transport", 21, "Bus pass"),
        ("tx-3", -8999, "entertainment", 22, "Concert tickets"),
        ("tx-4", 250000, "salary", 15, "Monthly salary"),
        ("tx-5", -15000, "bills", 18, "Electricity"),
        ("tx-6", -3250, "food", 23, "Dinner out"),
        ("tx-7", -6500, "health", 19, "Pharmacy"),
        ("tx-8", -12000, "shopping", 24, "New shoes"),
    ]
    .into_iter()
    .filter_map(|(id, cents, category, day, note)| {
        let date = NaiveDate::from_ymd_opt(2026, 2, day)?;
        Some(Seed::new(
            id,
            TransactionInput {
                amount: Decimal::new(cents, 2),
                category_id: category.to_string(),
                date,
                note: Some(note.to_string()),
            },
        ))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_transaction_points_at_a_default_category() {
        let categories: Vec<String> = default_categories().into_iter().map(|s| s.id).collect();
        let txs = default_transactions();
        assert_eq!(txs.len(), 8);
        for tx in txs {
            assert!(categories.contains(&tx.input.category_id), "{}", tx.id);
        }
    }

    #[test]
    fn salary_is_income() {
        let salary = default_transactions()
            .into_iter()
            .find(|s| s.id == "tx-4")
            .unwrap();
        assert_eq!(salary.input.amount.to_string(), "2500.00");
    }
}
