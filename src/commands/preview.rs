// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::column_keys;
use crate::error::ReportError;
use crate::filter::{ColumnKeys, filter_records, leading_amount};
use crate::models::RawRecord;
use crate::records::load_records;
use crate::utils::{fmt_brl, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let path = sub.get_one::<String>("csv").unwrap().trim();
    let campaign_col = sub.get_one::<String>("campaign-column").unwrap();
    let keys = column_keys(sub);

    let records = load_records(path).with_context(|| format!("Open CSV {}", path))?;
    let target = date.format("%Y-%m-%d").to_string();
    let eligible = filter_records(&records, &target, &keys);
    if eligible.is_empty() {
        eprintln!("{}", ReportError::NoEligibleRecords);
        return Ok(());
    }
    if maybe_print_json(json_flag, jsonl_flag, &eligible)? {
        return Ok(());
    }

    let data = spend_rows(&eligible, &keys, campaign_col);
    println!("{}", pretty_table(&["Date", "Campaign", "Spent"], data));
    Ok(())
}

/// One table row per record plus a `TOTAL` row. Amounts that do not fit a
/// `Decimal` are shown as written and left out of the total.
pub fn spend_rows(records: &[RawRecord], keys: &ColumnKeys, campaign_col: &str) -> Vec<Vec<String>> {
    let mut total = Decimal::ZERO;
    let mut data = Vec::new();
    for rec in records {
        let raw = rec.get(&keys.amount_spent).unwrap_or_default();
        let spent = leading_amount(raw).and_then(|v| Decimal::try_from(v).ok());
        let shown = match spent {
            Some(d) => {
                total += d;
                fmt_brl(&d)
            }
            None => raw.to_string(),
        };
        data.push(vec![
            rec.get(&keys.period_start).unwrap_or_default().to_string(),
            rec.get(campaign_col).unwrap_or("-").to_string(),
            shown,
        ]);
    }
    data.push(vec![
        "TOTAL".to_string(),
        format!("{} campaign(s)", records.len()),
        fmt_brl(&total),
    ]);
    data
}
