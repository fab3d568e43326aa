// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable snapshots of store state, one JSON document per store key.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::crud::{CollectionState, Store};
use crate::entity::Entity;
use crate::error::{Result, TrackerError};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(TrackerError::NoDataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("fintrack.sqlite"))
}

/// Open the database at `path`, or at [`db_path`] when none is given.
pub fn open_or_init(path: Option<&Path>) -> Result<Connection> {
    let path = match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            p.to_path_buf()
        }
        None => db_path()?,
    };
    let conn = Connection::open(&path)?;
    init_schema(&conn)?;
    info!(path = %path.display(), "opened database");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS stores(
        name TEXT PRIMARY KEY,
        state TEXT NOT NULL,
        saved_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- snapshots that failed to decode, kept verbatim for manual recovery
    CREATE TABLE IF NOT EXISTS stores_quarantine(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        state TEXT NOT NULL,
        error TEXT NOT NULL,
        saved_at TEXT,
        quarantined_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn save_state<T>(conn: &Connection, name: &str, state: &CollectionState<T>) -> Result<()>
where
    T: Entity + Serialize,
{
    let json = serde_json::to_string(state)?;
    conn.execute(
        "INSERT INTO stores(name, state, saved_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(name) DO UPDATE SET state=excluded.state, saved_at=excluded.saved_at",
        params![name, json],
    )?;
    info!(store = name, items = state.len(), "saved snapshot");
    Ok(())
}

/// `None` if nothing was saved under `name` yet.
pub fn load_state<T>(conn: &Connection, name: &str) -> Result<Option<CollectionState<T>>>
where
    T: Entity + DeserializeOwned,
{
    let raw: Option<String> = conn
        .query_row(
            "SELECT state FROM stores WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Restore `store` from its saved snapshot. An unreadable snapshot is
/// copied into `stores_quarantine` first; only then does the store start
/// empty, so the next save cannot destroy the original text.
pub fn load_into<T>(conn: &Connection, name: &str, store: &mut Store<T>) -> Result<()>
where
    T: Entity + DeserializeOwned,
{
    match load_state(conn, name) {
        Ok(Some(state)) => {
            info!(store = name, items = state.len(), "loaded snapshot");
            store.restore(state);
        }
        Ok(None) => {}
        Err(TrackerError::Json(err)) => {
            let id = quarantine(conn, name, &err.to_string())?;
            warn!(
                store = name,
                quarantine_id = id,
                error = %err,
                "unreadable snapshot moved to stores_quarantine, starting empty"
            );
            store.restore(CollectionState::default());
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

/// Copy the current snapshot under `name` into `stores_quarantine` and
/// return the new row id.
pub fn quarantine(conn: &Connection, name: &str, error: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO stores_quarantine(name, state, error, saved_at)
         SELECT name, state, ?2, saved_at FROM stores WHERE name=?1",
        params![name, error],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Quarantined snapshot texts for `name`, oldest first.
pub fn quarantined(conn: &Connection, name: &str) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT state FROM stores_quarantine WHERE name=?1 ORDER BY id")?;
    let rows = stmt.query_map(params![name], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn save_store<T>(conn: &Connection, name: &str, store: &Store<T>) -> Result<()>
where
    T: Entity + Serialize,
{
    save_state(conn, name, store.snapshot())
}
