// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::ColumnKeys;
use crate::gemini::DEFAULT_API_BASE;
use anyhow::{Result, anyhow};
use std::path::Path;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const API_BASE_VAR: &str = "ADREPORT_API_BASE";

/// Load `.env.local`, falling back to `.env`, from the working directory.
/// Variables already set in the environment win.
pub fn load_dotenv() {
    for env_file in [".env.local", ".env"] {
        let path = Path::new(env_file);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => log::debug!("Loaded {}", path.display()),
                Err(e) => log::warn!("Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("{} is not set (environment, .env.local or .env)", API_KEY_VAR))?;
        let api_base = std::env::var(API_BASE_VAR)
            .ok()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Ok(Self { api_key, api_base })
    }
}

/// Column names from `--date-column` / `--spend-column`, defaulting to the
/// Meta Ads pt-BR export headers.
pub fn column_keys(sub: &clap::ArgMatches) -> ColumnKeys {
    let mut keys = ColumnKeys::default();
    if let Some(c) = sub.get_one::<String>("date-column") {
        keys.period_start = c.clone();
    }
    if let Some(c) = sub.get_one::<String>("spend-column") {
        keys.amount_spent = c.clone();
    }
    keys
}
