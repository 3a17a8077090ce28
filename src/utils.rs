// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

const UA: &str = concat!(
    "adreport/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/adreport)"
);

// Generation on large exports can run well past the blocking client's 30s default.
const HTTP_TIMEOUT_SECS: u64 = 120;

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Strict `YYYY-MM-DD`; unpadded forms like `2026-1-10` are rejected since
/// the date is later matched as text.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let t = s.trim();
    let d = NaiveDate::parse_from_str(t, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?;
    if d.format("%Y-%m-%d").to_string() != t {
        return Err(anyhow::anyhow!("Invalid date '{}', expected YYYY-MM-DD", s));
    }
    Ok(d)
}

/// pt-BR money: `R$ 1234,50`.
pub fn fmt_brl(d: &Decimal) -> String {
    let s = format!("{:.2}", d.round_dp(2));
    format!("{} {}", crate::prompt::CURRENCY_PREFIX, s.replace('.', ","))
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
) -> Result<bool> {
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

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Open system clipboard")?;
    clipboard
        .set_text(text)
        .context("Write report to clipboard")?;
    log::info!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}
