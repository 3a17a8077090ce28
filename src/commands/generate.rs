// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, column_keys};
use crate::error::ReportError;
use crate::filter::{ColumnKeys, filter_records};
use crate::gemini::{GeminiClient, GenerativeApi, RetryPolicy, Sleeper, ThreadSleeper};
use crate::models::RawRecord;
use crate::pipeline::{Report, generate_report};
use crate::prompt::build_prompt;
use crate::records::load_records;
use crate::utils::{copy_to_clipboard, http_client, maybe_print_json, parse_date};
use anyhow::{Context, Result};
use chrono::NaiveDate;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let (date, path) = required_inputs(sub)?;
    let records = load_records(&path).with_context(|| format!("Open CSV {}", path))?;
    let keys = column_keys(sub);

    if sub.get_flag("dry-run") {
        return dry_run(&records, date, &keys);
    }

    let settings = Settings::from_env()?;
    let client = GeminiClient::new(http_client()?, &settings.api_base, &settings.api_key);
    submit(&client, &ThreadSleeper, sub, &records, date, &keys)
}

/// Both the date and the file must be given before anything is read.
fn required_inputs(sub: &clap::ArgMatches) -> Result<(NaiveDate, String)> {
    let date = sub.get_one::<String>("date").map(|s| s.trim()).filter(|s| !s.is_empty());
    let path = sub.get_one::<String>("csv").map(|s| s.trim()).filter(|s| !s.is_empty());
    match (date, path) {
        (Some(d), Some(p)) => Ok((parse_date(d)?, p.to_string())),
        _ => Err(ReportError::InputIncomplete.into()),
    }
}

/// Run one submission against `api` and present the outcome. An empty
/// filter result is a notice, not a failure.
pub fn submit<A, S>(
    api: &A,
    sleeper: &S,
    sub: &clap::ArgMatches,
    records: &[RawRecord],
    date: NaiveDate,
    keys: &ColumnKeys,
) -> Result<()>
where
    A: GenerativeApi + ?Sized,
    S: Sleeper + ?Sized,
{
    match generate_report(api, sleeper, records, date, keys, &RetryPolicy::default()) {
        Ok(report) => present(sub, &report),
        Err(ReportError::NoEligibleRecords) => {
            eprintln!("{}", ReportError::NoEligibleRecords);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn present(sub: &clap::ArgMatches, report: &Report) -> Result<()> {
    if !maybe_print_json(sub.get_flag("json"), false, report)? {
        println!("{}", report.report);
    }
    if let Some(out) = sub.get_one::<String>("out") {
        let out = out.trim();
        std::fs::write(out, &report.report).with_context(|| format!("Write report to {}", out))?;
        eprintln!("Report written to {}", out);
    }
    if sub.get_flag("copy") {
        copy_to_clipboard(&report.report)?;
        eprintln!("✅ Copied!");
    }
    Ok(())
}

fn dry_run(records: &[RawRecord], date: NaiveDate, keys: &ColumnKeys) -> Result<()> {
    let target = date.format("%Y-%m-%d").to_string();
    let eligible = filter_records(records, &target, keys);
    if eligible.is_empty() {
        eprintln!("{}", ReportError::NoEligibleRecords);
        return Ok(());
    }
    println!("{}", build_prompt(date, &eligible)?);
    Ok(())
}
