// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use adreport::error::ReportError;
use adreport::gemini::{MAX_RETRIES, RETRY_DELAY, RetryPolicy, generate_with_retry};
use adreport::models::GenerateResponse;
use common::{OVERLOADED, RecordingSleeper, ScriptedApi};
use std::time::Duration;

const MODEL: &str = "models/gemini-2.0-flash";

#[test]
fn default_policy_is_three_retries_three_seconds_apart() {
    let p = RetryPolicy::default();
    assert_eq!(p.max_retries, 3);
    assert_eq!(p.delay, Duration::from_secs(3));
    assert_eq!(p.trigger, "overloaded");
    assert_eq!(MAX_RETRIES, p.max_retries);
    assert_eq!(RETRY_DELAY, p.delay);
}

#[test]
fn recovers_after_two_overloads() {
    let api = ScriptedApi::with_default_models()
        .reply(GenerateResponse::failure(OVERLOADED))
        .reply(GenerateResponse::failure(OVERLOADED))
        .reply(GenerateResponse::text("🔹 Relatório"));
    let sleeper = RecordingSleeper::default();

    let text = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap();

    assert_eq!(text, "🔹 Relatório");
    assert_eq!(api.generate_calls.get(), 3);
    assert_eq!(sleeper.count(), 2);
    assert!(sleeper.total() >= Duration::from_secs(6));
}

#[test]
fn gives_up_after_four_attempts_when_always_overloaded() {
    let api = ScriptedApi::with_default_models().then_always(GenerateResponse::failure(OVERLOADED));
    let sleeper = RecordingSleeper::default();

    let err = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap_err();

    match err {
        ReportError::GenerationFailed(msg) => assert_eq!(msg, OVERLOADED),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(api.generate_calls.get(), 4);
    assert_eq!(sleeper.count(), 3);
    assert_eq!(sleeper.total(), Duration::from_secs(9));
}

#[test]
fn other_errors_fail_immediately_without_waiting() {
    let api = ScriptedApi::with_default_models()
        .reply(GenerateResponse::failure("API key not valid. Please pass a valid API key."))
        .then_always(GenerateResponse::text("never reached"));
    let sleeper = RecordingSleeper::default();

    let err = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::GenerationFailed(ref m) if m.starts_with("API key not valid")
    ));
    assert_eq!(api.generate_calls.get(), 1);
    assert_eq!(sleeper.count(), 0);
}

#[test]
fn overload_match_is_a_substring_check() {
    let api = ScriptedApi::with_default_models()
        .reply(GenerateResponse::failure("503: server overloaded, retry later"))
        .reply(GenerateResponse::text("ok"));
    let sleeper = RecordingSleeper::default();

    let text = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap();
    assert_eq!(text, "ok");
    assert_eq!(api.generate_calls.get(), 2);
}

#[test]
fn same_request_is_reissued_on_retry() {
    let api = ScriptedApi::with_default_models()
        .reply(GenerateResponse::failure(OVERLOADED))
        .reply(GenerateResponse::text("ok"));
    let sleeper = RecordingSleeper::default();

    generate_with_retry(&api, MODEL, "the prompt", &RetryPolicy::default(), &sleeper).unwrap();

    let seen = api.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert_eq!(seen[0], (MODEL.to_string(), "the prompt".to_string()));
}

#[test]
fn transport_failure_is_not_retried() {
    let api = ScriptedApi::with_default_models()
        .transport_failure("connection reset")
        .then_always(GenerateResponse::text("never reached"));
    let sleeper = RecordingSleeper::default();

    let err = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap_err();
    assert!(matches!(err, ReportError::GenerationFailed(ref m) if m == "connection reset"));
    assert_eq!(api.generate_calls.get(), 1);
    assert_eq!(sleeper.count(), 0);
}

#[test]
fn success_without_candidates_is_malformed() {
    let api = ScriptedApi::with_default_models().reply(GenerateResponse::default());
    let sleeper = RecordingSleeper::default();

    let err = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap_err();
    assert!(matches!(err, ReportError::MalformedResponse(_)));
}

#[test]
fn first_candidate_first_part_is_used() {
    let body: GenerateResponse = serde_json::from_value(serde_json::json!({
        "candidates": [
            { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
            { "content": { "parts": [{ "text": "other candidate" }] } }
        ]
    }))
    .unwrap();
    let api = ScriptedApi::with_default_models().reply(body);
    let sleeper = RecordingSleeper::default();

    let text = generate_with_retry(&api, MODEL, "prompt", &RetryPolicy::default(), &sleeper)
        .unwrap();
    assert_eq!(text, "first");
}
