// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::{BaseFields, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    base: BaseFields,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(input: CategoryInput, base: BaseFields) -> Self {
        Self {
            base,
            name: input.name,
            icon: input.icon,
            color: input.color,
        }
    }

    /// "icon name", or just the name when there is no icon.
    pub fn label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CategoryInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

impl Entity for Category {
    type Input = CategoryInput;
    type Patch = CategoryPatch;

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Negative amounts are expenses, positive are income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(flatten)]
    base: BaseFields,
    pub amount: Decimal,
    pub category_id: String, // not checked against the category store
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(input: TransactionInput, base: BaseFields) -> Self {
        Self {
            base,
            amount: input.amount,
            category_id: input.category_id,
            date: input.date,
            note: input.note,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub amount: Decimal,
    pub category_id: String,
    pub date: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub category_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub note: Option<Option<String>>,
}

impl Entity for Transaction {
    type Input = TransactionInput;
    type Patch = TransactionPatch;

    fn base(&self) -> &BaseFields {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        &mut self.base
    }

    fn apply(&mut self, patch: TransactionPatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
    }
}
