// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ReportError;
use crate::filter::{ColumnKeys, filter_records};
use crate::gemini::{GenerativeApi, RetryPolicy, Sleeper, discover_model, generate_with_retry};
use crate::models::RawRecord;
use crate::prompt::{build_prompt, format_report_date};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: String,
    pub model: String,
    pub records: usize,
    pub report: String,
}

/// Filter `records` for `date` and turn what is left into report text.
///
/// Runs discovery, then generation; an empty filter result stops before any
/// network call with `NoEligibleRecords`.
pub fn generate_report<A, S>(
    api: &A,
    sleeper: &S,
    records: &[RawRecord],
    date: NaiveDate,
    keys: &ColumnKeys,
    policy: &RetryPolicy,
) -> Result<Report, ReportError>
where
    A: GenerativeApi + ?Sized,
    S: Sleeper + ?Sized,
{
    let target = date.format("%Y-%m-%d").to_string();
    let eligible = filter_records(records, &target, keys);
    info!(
        "{} of {} rows match {} with spend",
        eligible.len(),
        records.len(),
        target
    );
    if eligible.is_empty() {
        return Err(ReportError::NoEligibleRecords);
    }

    let model = discover_model(api)?;
    let prompt = build_prompt(date, &eligible)?;
    let report = generate_with_retry(api, &model, &prompt, policy, sleeper)?;

    Ok(Report {
        date: format_report_date(date),
        model,
        records: eligible.len(),
        report,
    })
}
