// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fields and collaborators shared by every record the stores manage.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Timestamp = DateTime<Utc>;

/// Identity, lifecycle timestamps and the soft-delete marker.
///
/// Fields are read-only outside this crate; only the CRUD engine stamps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFields {
    id: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    deleted_at: Option<Timestamp>,
}

impl BaseFields {
    pub(crate) fn new(id: String, at: Timestamp) -> Self {
        Self {
            id,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Refresh `updated_at`, never moving it backwards.
    pub(crate) fn touch(&mut self, now: Timestamp) -> Timestamp {
        if now > self.updated_at {
            self.updated_at = now;
        }
        self.updated_at
    }

    /// Returns false if the record was already deleted; the first deletion
    /// time is kept.
    pub(crate) fn mark_deleted(&mut self, now: Timestamp) -> bool {
        if self.deleted_at.is_some() {
            return false;
        }
        let at = self.touch(now);
        self.deleted_at = Some(at);
        true
    }
}

/// A record with embedded [`BaseFields`] plus its own domain data.
///
/// `Input` is the domain data alone (what callers supply to `add`), and
/// `Patch` is the partial form accepted by `update`. Neither carries base
/// fields, so callers cannot overwrite identity or timestamps.
pub trait Entity: Clone {
    type Input;
    type Patch;

    fn base(&self) -> &BaseFields;
    fn base_mut(&mut self) -> &mut BaseFields;

    /// Merge the fields present in `patch`; absent fields stay as they are.
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> &str {
        self.base().id()
    }

    fn is_active(&self) -> bool {
        self.base().is_active()
    }
}

/// A default record with its pre-assigned, stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed<I> {
    pub id: String,
    pub input: I,
}

impl<I> Seed<I> {
    pub fn new(id: impl Into<String>, input: I) -> Self {
        Self {
            id: id.into(),
            input,
        }
    }
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Clock that only moves when told to. Useful for hosts replaying
/// history and for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, at: Timestamp) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs drawn from the OS CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
