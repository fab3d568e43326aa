// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::debug;

use crate::crud::{CrudEngine, Store};
use crate::db;
use crate::defaults::{default_categories, default_transactions};
use crate::entity::Entity;
use crate::error::Result;
use crate::models::{Category, Transaction};

pub type CategoryStore = Store<Category>;
pub type TransactionStore = Store<Transaction>;

pub const CATEGORIES_KEY: &str = "categories-storage";
pub const TRANSACTIONS_KEY: &str = "transactions-storage";

pub const UNKNOWN_CATEGORY: &str = "unknown";

pub fn category_engine() -> CrudEngine<Category> {
    CrudEngine::new("categories", Category::new).with_defaults(default_categories())
}

pub fn transaction_engine() -> CrudEngine<Transaction> {
    CrudEngine::new("transactions", Transaction::new).with_defaults(default_transactions())
}

pub fn category_store() -> CategoryStore {
    Store::new(category_engine())
}

pub fn transaction_store() -> TransactionStore {
    Store::new(transaction_engine())
}

/// Active transactions filed under `category_id`, in insertion order.
pub fn by_category<'a>(
    items: impl IntoIterator<Item = &'a Transaction>,
    category_id: &str,
) -> Vec<&'a Transaction> {
    items
        .into_iter()
        .filter(|t| t.is_active() && t.category_id == category_id)
        .collect()
}

/// Active transactions dated within `[start, end]`, both ends included.
/// An inverted range matches nothing.
pub fn by_date_range<'a>(
    items: impl IntoIterator<Item = &'a Transaction>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a Transaction> {
    items
        .into_iter()
        .filter(|t| t.is_active() && start <= t.date && t.date <= end)
        .collect()
}

impl Store<Transaction> {
    pub fn get_by_category(&self, category_id: &str) -> Vec<&Transaction> {
        by_category(self.items(), category_id)
    }

    pub fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
        by_date_range(self.items(), start, end)
    }
}

impl Store<Category> {
    /// Only active categories resolve; deleted or dangling ids do not.
    pub fn active_by_id(&self, id: &str) -> Option<&Category> {
        self.get_by_id(id).filter(|c| c.is_active())
    }

    pub fn label_for(&self, id: &str) -> String {
        self.active_by_id(id)
            .map(Category::label)
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }
}

/// Both collections, as one CLI invocation sees them.
#[derive(Debug)]
pub struct Tracker {
    pub categories: CategoryStore,
    pub transactions: TransactionStore,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            categories: category_store(),
            transactions: transaction_store(),
        }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        let mut tracker = Self::new();
        db::load_into(conn, CATEGORIES_KEY, &mut tracker.categories)?;
        db::load_into(conn, TRANSACTIONS_KEY, &mut tracker.transactions)?;
        Ok(tracker)
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        db::save_store(conn, CATEGORIES_KEY, &self.categories)?;
        db::save_store(conn, TRANSACTIONS_KEY, &self.transactions)?;
        Ok(())
    }

    /// Categories first, so seeded transactions reference existing ids.
    pub fn seed_defaults(&mut self) -> bool {
        let categories = self.categories.seed_defaults();
        let transactions = self.transactions.seed_defaults();
        debug!(categories, transactions, "startup seeding");
        categories || transactions
    }
}
