// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ReportError;
use crate::models::RawRecord;
use csv::ReaderBuilder;
use log::debug;
use std::io::Read;
use std::path::Path;

/// Load every data row of a headed CSV file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, ReportError> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let records = collect(rdr)?;
    debug!("Loaded {} rows from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, ReportError> {
    let rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    collect(rdr)
}

// Short rows keep only the columns they have; extra trailing cells are dropped.
fn collect<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<RawRecord>, ReportError> {
    let headers = rdr.headers()?.clone();
    let mut out = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        out.push(RawRecord::from_pairs(headers.iter().zip(rec.iter())));
    }
    Ok(out)
}
