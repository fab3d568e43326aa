// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Generic soft-delete CRUD engine shared by every collection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entity::{BaseFields, Clock, Entity, IdGenerator, Seed, SystemClock, UuidGenerator};

/// Items in insertion order plus the one-shot seeding flag.
///
/// Plain data, so a persistence layer can snapshot and restore it as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionState<T> {
    items: Vec<T>,
    seeded: bool,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seeded: false,
        }
    }
}

impl<T: Entity> CollectionState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn seeded(&self) -> bool {
        self.seeded
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Matches deleted records too.
    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_active())
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

type Construct<T> = Box<dyn Fn(<T as Entity>::Input, BaseFields) -> T>;

/// Lifecycle rules for one entity type. Holds no items itself; every
/// operation works on a caller-owned [`CollectionState`].
pub struct CrudEngine<T: Entity> {
    name: &'static str,
    construct: Construct<T>,
    defaults: Vec<Seed<T::Input>>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<T: Entity> CrudEngine<T> {
    /// `construct` merges caller-supplied domain fields with the base fields
    /// the engine stamps.
    pub fn new(name: &'static str, construct: impl Fn(T::Input, BaseFields) -> T + 'static) -> Self {
        Self {
            name,
            construct: Box::new(construct),
            defaults: Vec::new(),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        }
    }

    pub fn with_defaults(mut self, defaults: Vec<Seed<T::Input>>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn add<'s>(&self, state: &'s mut CollectionState<T>, input: T::Input) -> &'s T {
        let base = BaseFields::new(self.ids.next_id(), self.clock.now());
        let entity = (self.construct)(input, base);
        debug!(store = self.name, id = entity.id(), "added entity");
        state.items.push(entity);
        &state.items[state.items.len() - 1]
    }

    /// Soft delete. Unknown or already deleted ids leave the state untouched
    /// and return false.
    pub fn remove(&self, state: &mut CollectionState<T>, id: &str) -> bool {
        let now = self.clock.now();
        match state.get_mut(id) {
            Some(item) => {
                let changed = item.base_mut().mark_deleted(now);
                if changed {
                    debug!(store = self.name, id, "soft-deleted entity");
                }
                changed
            }
            None => {
                debug!(store = self.name, id, "remove ignored, no such entity");
                false
            }
        }
    }

    /// Merge `patch` into the matching entity, deleted or not. Unknown ids
    /// leave the state untouched and return false.
    pub fn update(&self, state: &mut CollectionState<T>, id: &str, patch: T::Patch) -> bool {
        let now = self.clock.now();
        match state.get_mut(id) {
            Some(item) => {
                item.apply(patch);
                item.base_mut().touch(now);
                debug!(store = self.name, id, "updated entity");
                true
            }
            None => {
                debug!(store = self.name, id, "update ignored, no such entity");
                false
            }
        }
    }

    pub fn get_by_id<'s>(&self, state: &'s CollectionState<T>, id: &str) -> Option<&'s T> {
        state.get_by_id(id)
    }

    pub fn get_active<'s>(&self, state: &'s CollectionState<T>) -> Vec<&'s T> {
        state.active().collect()
    }

    /// Replace the collection with the defaults, once. Every later call is a
    /// no-op, whatever happened to the items in between.
    pub fn seed_defaults(&self, state: &mut CollectionState<T>) -> bool
    where
        T::Input: Clone,
    {
        if state.seeded {
            return false;
        }
        let now = self.clock.now();
        state.items = self
            .defaults
            .iter()
            .map(|seed| (self.construct)(seed.input.clone(), BaseFields::new(seed.id.clone(), now)))
            .collect();
        state.seeded = true;
        info!(store = self.name, count = state.items.len(), "seeded defaults");
        true
    }
}

impl<T: Entity> fmt::Debug for CrudEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudEngine")
            .field("name", &self.name)
            .field("defaults", &self.defaults.len())
            .finish_non_exhaustive()
    }
}

/// One collection: its state and the engine that governs it.
pub struct Store<T: Entity> {
    state: CollectionState<T>,
    engine: CrudEngine<T>,
}

impl<T: Entity> Store<T> {
    pub fn new(engine: CrudEngine<T>) -> Self {
        Self {
            state: CollectionState::default(),
            engine,
        }
    }

    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    pub fn seeded(&self) -> bool {
        self.state.seeded()
    }

    pub fn add(&mut self, input: T::Input) -> &T {
        self.engine.add(&mut self.state, input)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.engine.remove(&mut self.state, id)
    }

    pub fn update(&mut self, id: &str, patch: T::Patch) -> bool {
        self.engine.update(&mut self.state, id, patch)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&T> {
        self.engine.get_by_id(&self.state, id)
    }

    pub fn get_active(&self) -> Vec<&T> {
        self.engine.get_active(&self.state)
    }

    pub fn seed_defaults(&mut self) -> bool
    where
        T::Input: Clone,
    {
        self.engine.seed_defaults(&mut self.state)
    }

    pub fn snapshot(&self) -> &CollectionState<T> {
        &self.state
    }

    /// Swap in previously persisted state; the engine is kept.
    pub fn restore(&mut self, state: CollectionState<T>) {
        self.state = state;
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("engine", &self.engine)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ManualClock, Timestamp};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        base: BaseFields,
        name: String,
        tag: Option<String>,
    }

    #[derive(Debug, Clone)]
    struct ItemInput {
        name: String,
        tag: Option<String>,
    }

    #[derive(Default)]
    struct ItemPatch {
        name: Option<String>,
        tag: Option<Option<String>>,
    }

    impl Entity for Item {
        type Input = ItemInput;
        type Patch = ItemPatch;

        fn base(&self) -> &BaseFields {
            &self.base
        }

        fn base_mut(&mut self) -> &mut BaseFields {
            &mut self.base
        }

        fn apply(&mut self, patch: ItemPatch) {
            if let Some(name) = patch.name {
                self.name = name;
            }
            if let Some(tag) = patch.tag {
                self.tag = tag;
            }
        }
    }

    struct Counter(Cell<u32>);

    impl IdGenerator for Counter {
        fn next_id(&self) -> String {
            self.0.set(self.0.get() + 1);
            format!("item-{}", self.0.get())
        }
    }

    fn input(name: &str) -> ItemInput {
        ItemInput {
            name: name.into(),
            tag: None,
        }
    }

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 2, 20, 9, 0, 0).unwrap()
    }

    fn engine(clock: &Rc<ManualClock>) -> CrudEngine<Item> {
        CrudEngine::new("items", |input: ItemInput, base: BaseFields| Item {
            base,
            name: input.name,
            tag: input.tag,
        })
        .with_clock(Rc::clone(clock))
        .with_defaults(vec![
            Seed::new("food", input("Food")),
            Seed::new("transport", input("Transport")),
        ])
    }

    fn store() -> (Store<Item>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(start()));
        (Store::new(engine(&clock)), clock)
    }

    #[test]
    fn add_stamps_base_fields() {
        let (mut s, _) = store();
        let added = s.add(input("Food")).clone();
        assert_eq!(s.items().len(), 1);
        assert_eq!(added.name, "Food");
        assert_eq!(added.base.created_at(), start());
        assert_eq!(added.base.updated_at(), start());
        assert!(added.base.deleted_at().is_none());
        assert_eq!(s.items()[0], added);
    }

    #[test]
    fn rapid_adds_never_share_an_id() {
        let (mut s, _) = store();
        for i in 0..200 {
            s.add(input(&format!("n{i}")));
        }
        let ids: HashSet<&str> = s.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn injected_id_generator_is_used() {
        let clock = Rc::new(ManualClock::new(start()));
        let mut s = Store::new(engine(&clock).with_id_generator(Counter(Cell::new(0))));
        s.add(input("a"));
        s.add(input("b"));
        assert_eq!(s.items()[1].id(), "item-2");
    }

    #[test]
    fn remove_marks_deleted_and_keeps_other_fields() {
        let (mut s, clock) = store();
        let id = s.add(input("Food")).id().to_string();
        let before = s.items()[0].clone();
        clock.advance(Duration::seconds(5));
        assert!(s.remove(&id));

        let after = &s.items()[0];
        assert_eq!(s.items().len(), 1);
        assert_eq!(after.base.deleted_at(), Some(start() + Duration::seconds(5)));
        assert!(after.base.updated_at() > before.base.updated_at());
        assert_eq!(after.base.created_at(), before.base.created_at());
        assert_eq!(after.name, before.name);
        assert_eq!(after.tag, before.tag);
    }

    #[test]
    fn second_remove_keeps_first_deletion_time() {
        let (mut s, clock) = store();
        let id = s.add(input("Food")).id().to_string();
        s.remove(&id);
        let first = s.items()[0].clone();
        clock.advance(Duration::minutes(1));
        assert!(!s.remove(&id));
        assert_eq!(s.items()[0], first);
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        let (mut s, _) = store();
        s.add(input("Food"));
        let before = s.snapshot().clone();
        assert!(!s.remove("non-existent"));
        assert_eq!(s.snapshot(), &before);
    }

    #[test]
    fn update_merges_present_fields_only() {
        let (mut s, clock) = store();
        let id = s
            .add(ItemInput {
                name: "Food".into(),
                tag: Some("daily".into()),
            })
            .id()
            .to_string();
        let before = s.items()[0].clone();
        clock.advance(Duration::seconds(1));

        let patch = ItemPatch {
            name: Some("Groceries".into()),
            ..Default::default()
        };
        assert!(s.update(&id, patch));

        let after = &s.items()[0];
        assert_eq!(after.name, "Groceries");
        assert_eq!(after.tag.as_deref(), Some("daily"));
        assert_eq!(after.id(), before.id());
        assert_eq!(after.base.created_at(), before.base.created_at());
        assert_eq!(after.base.deleted_at(), None);
        assert!(after.base.updated_at() > before.base.updated_at());
    }

    #[test]
    fn update_can_clear_optional_field() {
        let (mut s, _) = store();
        let id = s
            .add(ItemInput {
                name: "Food".into(),
                tag: Some("x".into()),
            })
            .id()
            .to_string();
        s.update(
            &id,
            ItemPatch {
                tag: Some(None),
                ..Default::default()
            },
        );
        assert_eq!(s.items()[0].tag, None);
    }

    #[test]
    fn update_on_deleted_item_keeps_deletion_time() {
        let (mut s, clock) = store();
        let id = s.add(input("Food")).id().to_string();
        s.remove(&id);
        let deleted_at = s.items()[0].base.deleted_at();
        clock.advance(Duration::seconds(3));
        s.update(
            &id,
            ItemPatch {
                name: Some("Old food".into()),
                ..Default::default()
            },
        );
        assert_eq!(s.items()[0].base.deleted_at(), deleted_at);
        assert_eq!(s.items()[0].name, "Old food");
    }

    #[test]
    fn update_unknown_id_changes_nothing() {
        let (mut s, _) = store();
        s.add(input("Test"));
        let before = s.snapshot().clone();
        let patch = ItemPatch {
            name: Some("Updated".into()),
            ..Default::default()
        };
        assert!(!s.update("non-existent", patch));
        assert_eq!(s.snapshot(), &before);
    }

    #[test]
    fn updated_at_is_monotonic_when_clock_steps_back() {
        let (mut s, clock) = store();
        let id = s.add(input("Food")).id().to_string();
        clock.set(start() - Duration::hours(1));
        s.update(&id, ItemPatch::default());
        assert_eq!(s.items()[0].base.updated_at(), start());
    }

    #[test]
    fn get_by_id_sees_deleted_items() {
        let (mut s, _) = store();
        let id = s.add(input("Test")).id().to_string();
        s.remove(&id);
        assert_eq!(s.get_by_id(&id).map(|i| i.name.as_str()), Some("Test"));
        assert!(s.get_by_id("non-existent").is_none());
    }

    #[test]
    fn get_active_skips_deleted_in_insertion_order() {
        let (mut s, _) = store();
        let a = s.add(input("A")).id().to_string();
        s.add(input("B"));
        s.add(input("C"));
        s.remove(&a);

        let active: Vec<&str> = s.get_active().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(active, ["B", "C"]);
        let deleted = s.items().iter().filter(|i| !i.is_active()).count();
        assert_eq!(active.len() + deleted, s.items().len());
        assert_eq!(s.get_active().len(), 2);
    }

    #[test]
    fn seeding_uses_preassigned_ids_and_one_timestamp() {
        let (mut s, _) = store();
        s.add(input("stale"));
        assert!(s.seed_defaults());

        let ids: Vec<&str> = s.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["food", "transport"]);
        assert!(s.seeded());
        assert!(s.items().iter().all(|i| i.base.created_at() == start()));
    }

    #[test]
    fn seeding_twice_is_a_no_op() {
        let (mut s, clock) = store();
        s.seed_defaults();
        s.add(input("New"));
        let before = s.snapshot().clone();
        clock.advance(Duration::seconds(10));
        assert!(!s.seed_defaults());
        assert_eq!(s.snapshot(), &before);
        assert_eq!(s.items().len(), 3);
    }

    #[test]
    fn restore_keeps_seeded_flag() {
        let (mut s, _) = store();
        s.seed_defaults();
        let snapshot = s.snapshot().clone();

        let (mut fresh, _) = store();
        fresh.restore(snapshot);
        assert!(fresh.seeded());
        assert!(!fresh.seed_defaults());
        assert_eq!(fresh.items().len(), 2);
    }
}
