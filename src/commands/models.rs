// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::gemini::{GENERATE_METHOD, GeminiClient, GenerativeApi, list_models};
use crate::models::ModelDescriptor;
use crate::utils::{http_client, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::from_env()?;
    let client = GeminiClient::new(http_client()?, &settings.api_base, &settings.api_key);
    list(&client, sub)
}

pub fn list<A: GenerativeApi + ?Sized>(api: &A, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let show_all = sub.get_flag("all");

    let models = visible_models(list_models(api)?, show_all);
    if maybe_print_json(json_flag, jsonl_flag, &models)? {
        return Ok(());
    }
    let data = model_rows(&models);
    println!("{}", pretty_table(&["Model", "Display name", "Methods"], data));
    Ok(())
}

/// Models able to generate content, or all of them with `show_all`.
pub fn visible_models(models: Vec<ModelDescriptor>, show_all: bool) -> Vec<ModelDescriptor> {
    models
        .into_iter()
        .filter(|m| show_all || m.supports(GENERATE_METHOD))
        .collect()
}

pub fn model_rows(models: &[ModelDescriptor]) -> Vec<Vec<String>> {
    models
        .iter()
        .map(|m| {
            vec![
                m.name.clone(),
                m.display_name.clone().unwrap_or_default(),
                m.supported_generation_methods.join(", "),
            ]
        })
        .collect()
}
