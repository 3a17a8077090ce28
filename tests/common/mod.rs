// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use adreport::error::ReportError;
use adreport::gemini::{GenerativeApi, Sleeper};
use adreport::models::{GenerateResponse, ModelList};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

pub const OVERLOADED: &str = "The model is overloaded. Please try again later.";

pub enum Reply {
    Body(GenerateResponse),
    Transport(String),
}

/// In-memory provider replaying a fixed listing and a queue of generation
/// replies; once the queue is drained `fallback` is returned forever.
pub struct ScriptedApi {
    pub listing: Option<ModelList>,
    pub replies: RefCell<VecDeque<Reply>>,
    pub fallback: Option<GenerateResponse>,
    pub list_calls: Cell<usize>,
    pub generate_calls: Cell<usize>,
    pub seen: RefCell<Vec<(String, String)>>,
}

impl ScriptedApi {
    pub fn new(listing: Option<ModelList>) -> Self {
        Self {
            listing,
            replies: RefCell::new(VecDeque::new()),
            fallback: None,
            list_calls: Cell::new(0),
            generate_calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn with_default_models() -> Self {
        Self::new(Some(default_listing()))
    }

    pub fn reply(self, r: GenerateResponse) -> Self {
        self.replies.borrow_mut().push_back(Reply::Body(r));
        self
    }

    pub fn transport_failure(self, msg: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Transport(msg.to_string()));
        self
    }

    pub fn then_always(mut self, r: GenerateResponse) -> Self {
        self.fallback = Some(r);
        self
    }
}

impl GenerativeApi for ScriptedApi {
    fn list_models(&self) -> Result<ModelList, ReportError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.listing
            .clone()
            .ok_or_else(|| ReportError::Transport("connection refused".to_string()))
    }

    fn generate_content(&self, model: &str, prompt: &str) -> Result<GenerateResponse, ReportError> {
        self.generate_calls.set(self.generate_calls.get() + 1);
        self.seen
            .borrow_mut()
            .push((model.to_string(), prompt.to_string()));
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Body(r)) => Ok(r),
            Some(Reply::Transport(msg)) => Err(ReportError::Transport(msg)),
            None => Ok(self
                .fallback
                .clone()
                .expect("ScriptedApi ran out of replies")),
        }
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn total(&self) -> Duration {
        self.slept.borrow().iter().sum()
    }

    pub fn count(&self) -> usize {
        self.slept.borrow().len()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, dur: Duration) {
        self.slept.borrow_mut().push(dur);
    }
}

pub fn listing(value: serde_json::Value) -> ModelList {
    serde_json::from_value(value).unwrap()
}

pub fn default_listing() -> ModelList {
    listing(json!({
        "models": [
            {
                "name": "models/embedding-001",
                "supportedGenerationMethods": ["embedContent"]
            },
            {
                "name": "models/gemini-2.0-flash",
                "displayName": "Gemini 2.0 Flash",
                "supportedGenerationMethods": ["generateContent", "countTokens"]
            },
            {
                "name": "models/gemini-1.5-pro",
                "supportedGenerationMethods": ["generateContent"]
            }
        ]
    }))
}

pub const SAMPLE_CSV: &str = "\
Nome da campanha,Início dos relatórios,Término dos relatórios,Valor usado (BRL),Impressões
[MSG] Loja Centro,2026-01-10,2026-01-10,15.5,1200
[REC] Alcance Bairro,2026-01-11,2026-01-11,22.10,3400
";
