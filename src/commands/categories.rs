// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::entity::Entity;
use crate::finance::Tracker;
use crate::models::{Category, CategoryInput, CategoryPatch};
use crate::utils::{maybe_print_json, non_empty, parse_color, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle(tracker: &mut Tracker, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = non_empty(sub.get_one::<String>("name"))
                .ok_or_else(|| anyhow!("Category name must not be empty"))?;
            let icon = non_empty(sub.get_one::<String>("icon"));
            let color = non_empty(sub.get_one::<String>("color"))
                .map(|c| parse_color(&c))
                .transpose()?;
            let added = tracker.categories.add(CategoryInput { name, icon, color });
            println!("Added category '{}' ({})", added.name, added.id());
        }
        Some(("list", sub)) => list(tracker, sub)?,
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let name = sub
                .get_one::<String>("name")
                .map(|raw| {
                    non_empty(Some(raw)).ok_or_else(|| anyhow!("Category name must not be empty"))
                })
                .transpose()?;
            // present but blank clears the field
            let icon = sub
                .get_one::<String>("icon")
                .map(|_| non_empty(sub.get_one::<String>("icon")));
            let color = match sub.get_one::<String>("color") {
                Some(raw) if raw.trim().is_empty() => Some(None),
                Some(raw) => Some(Some(parse_color(raw)?)),
                None => None,
            };
            let patch = CategoryPatch { name, icon, color };
            if tracker.categories.update(id, patch) {
                println!("Updated category {}", id);
            } else {
                println!("No category with id {}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if tracker.categories.remove(id) {
                println!("Removed category {}", id);
            } else {
                println!("No active category with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(serde::Serialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub deleted: bool,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id().to_string(),
            name: c.name.clone(),
            icon: c.icon.clone().unwrap_or_default(),
            color: c.color.clone().unwrap_or_default(),
            deleted: !c.is_active(),
        }
    }
}

pub fn query_rows(tracker: &Tracker, sub: &clap::ArgMatches) -> Vec<CategoryRow> {
    if sub.get_flag("all") {
        tracker.categories.items().iter().map(CategoryRow::from).collect()
    } else {
        tracker
            .categories
            .get_active()
            .into_iter()
            .map(CategoryRow::from)
            .collect()
    }
}

fn list(tracker: &Tracker, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(tracker, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id,
                    r.icon,
                    r.name,
                    r.color,
                    if r.deleted { "deleted".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Icon", "Category", "Color", "Status"], rows)
        );
    }
    Ok(())
}
