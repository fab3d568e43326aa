// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month view over the transaction store: filter, sort, resolve, total.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entity::Entity;
use crate::finance::{CategoryStore, TransactionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerFilter {
    pub year: i32,
    pub month: u32,
    pub ascending: bool,
}

impl LedgerFilter {
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            ascending: true,
        }
    }

    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    pub rows: Vec<LedgerRow>,
    pub total: Decimal,
}

pub fn build_ledger(
    transactions: &TransactionStore,
    categories: &CategoryStore,
    filter: LedgerFilter,
) -> Ledger {
    let mut matching: Vec<_> = transactions
        .get_active()
        .into_iter()
        .filter(|t| t.date.year() == filter.year && t.date.month() == filter.month)
        .collect();
    // sort_by is stable: same-day entries keep insertion order either way
    if filter.ascending {
        matching.sort_by(|a, b| a.date.cmp(&b.date));
    } else {
        matching.sort_by(|a, b| b.date.cmp(&a.date));
    }

    let total: Decimal = matching.iter().map(|t| t.amount).sum();
    let rows = matching
        .into_iter()
        .map(|t| LedgerRow {
            id: t.id().to_string(),
            date: t.date.to_string(),
            category: categories.label_for(&t.category_id),
            amount: t.amount,
            note: t.note.clone().unwrap_or_default(),
        })
        .collect();
    Ledger { rows, total }
}
