// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, TrackerError};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("static regex"));

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TrackerError::InvalidDate(s.to_string()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let s = s.trim();
    s.parse::<Decimal>()
        .map_err(|_| TrackerError::InvalidAmount(s.to_string()))
}

pub fn parse_color(s: &str) -> Result<String> {
    let s = s.trim();
    if COLOR_RE.is_match(s) {
        Ok(s.to_lowercase())
    } else {
        Err(TrackerError::InvalidColor(s.to_string()))
    }
}

/// Trimmed, non-empty text or `None`.
pub fn non_empty(s: Option<&String>) -> Option<String> {
    s.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!(
        "{:.2}",
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
