// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::RawRecord;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_DATE_COLUMN: &str = "Início dos relatórios";
pub const DEFAULT_SPEND_COLUMN: &str = "Valor usado (BRL)";

/// Column names the filter reads from each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKeys {
    pub period_start: String,
    pub amount_spent: String,
}

impl Default for ColumnKeys {
    fn default() -> Self {
        Self {
            period_start: DEFAULT_DATE_COLUMN.to_string(),
            amount_spent: DEFAULT_SPEND_COLUMN.to_string(),
        }
    }
}

static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("static regex")
});

/// Read the leading decimal literal of `raw`, ignoring whatever follows it.
/// `"15.5"` -> 15.5, `"15,00"` -> 15, `"Infinity"` -> inf, `"abc"` and `""` -> None.
pub fn leading_amount(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let m = LEADING_FLOAT.find(s)?;
    m.as_str().parse::<f64>().ok()
}

/// True when the row's period start equals `date` and it has positive spend.
pub fn is_eligible(record: &RawRecord, date: &str, keys: &ColumnKeys) -> bool {
    if record.get(&keys.period_start) != Some(date) {
        return false;
    }
    record
        .get(&keys.amount_spent)
        .and_then(leading_amount)
        .is_some_and(|v| v > 0.0)
}

/// Rows whose period start equals `date` literally and whose spend is above zero,
/// in input order.
pub fn filter_records(records: &[RawRecord], date: &str, keys: &ColumnKeys) -> Vec<RawRecord> {
    records
        .iter()
        .filter(|r| is_eligible(r, date, keys))
        .cloned()
        .collect()
}
