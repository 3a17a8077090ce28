// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Every way a single report submission can end without a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Please select the date and the CSV file!")]
    InputIncomplete,

    #[error("No data found for this date in the file.")]
    NoEligibleRecords,

    #[error("No model supporting content generation was found: {0}")]
    NoCapableModelFound(String),

    #[error("{0}")]
    GenerationFailed(String),

    #[error("Unexpected response from the generation service: {0}")]
    MalformedResponse(String),

    #[error("Request to the generation service failed: {0}")]
    Transport(String),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}
