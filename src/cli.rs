// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::{DEFAULT_DATE_COLUMN, DEFAULT_SPEND_COLUMN};
use clap::{Arg, ArgAction, Command};

pub const DEFAULT_CAMPAIGN_COLUMN: &str = "Nome da campanha";

fn column_args() -> [Arg; 2] {
    [
        Arg::new("date-column")
            .long("date-column")
            .value_name("NAME")
            .default_value(DEFAULT_DATE_COLUMN)
            .help("CSV column holding the reporting period start"),
        Arg::new("spend-column")
            .long("spend-column")
            .value_name("NAME")
            .default_value(DEFAULT_SPEND_COLUMN)
            .help("CSV column holding the amount spent"),
    ]
}

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("adreport")
        .version(clap::crate_version!())
        .about("Daily ad-campaign reports from Meta Ads CSV exports, written by Gemini")
        .subcommand(
            Command::new("generate")
                .about("Filter the CSV for a date and generate the report")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Report date"),
                )
                .arg(
                    Arg::new("csv")
                        .long("csv")
                        .value_name("PATH")
                        .help("Meta Ads CSV export"),
                )
                .arg(
                    Arg::new("copy")
                        .long("copy")
                        .action(ArgAction::SetTrue)
                        .help("Copy the report to the clipboard"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("FILE")
                        .help("Also write the report text to FILE"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the report with its metadata as JSON"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print the prompt instead of calling the API"),
                )
                .args(column_args()),
        )
        .subcommand(
            Command::new("preview")
                .about("Show the rows that would be sent, without calling the API")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("csv")
                        .long("csv")
                        .value_name("PATH")
                        .required(true),
                )
                .arg(
                    Arg::new("campaign-column")
                        .long("campaign-column")
                        .value_name("NAME")
                        .default_value(DEFAULT_CAMPAIGN_COLUMN),
                )
                .args(column_args())
                .args(json_flags()),
        )
        .subcommand(
            Command::new("models")
                .about("List models available to the configured API key")
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include models that cannot generate content"),
                )
                .args(json_flags()),
        )
}
