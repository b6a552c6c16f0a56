mod common;

use std::sync::Arc;

use bp_llm::FakeCompleter;
use bp_llm::prompts::{EMPTY_PASSAGE_REPLY, EXPLAIN_SYSTEM};
use common::spawn_app;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn summarize_and_explain() {
    let fake = Arc::new(FakeCompleter::replying("Short version."));
    let app = spawn_app(fake.clone()).await;

    let (status, body) = app.post("/summarize", &json!({"text": "A long passage"})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"summary": "Short version."}));

    let (status, body) = app.post("/explain", &json!({"concept": "osmosis"})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"explanation": "Short version."}));

    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].user, "A long passage");
    assert_eq!(calls[1].system, EXPLAIN_SYSTEM);
}

#[tokio::test]
async fn missing_keys_are_rejected() {
    let fake = Arc::new(FakeCompleter::replying("unused"));
    let app = spawn_app(fake.clone()).await;

    let (status, body) = app.post("/summarize", &json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "missing field `text`");

    let (status, _) = app.post("/explain", &json!({"text": "x"})).await;
    assert_eq!(status, 400);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn blank_passage_is_answered_locally() {
    let fake = Arc::new(FakeCompleter::replying("unused"));
    let app = spawn_app(fake.clone()).await;

    let (status, body) = app.post("/generate-questions", &json!({"text": "   "})).await;
    assert_eq!(status, 200);
    assert_eq!(body["questions"], EMPTY_PASSAGE_REPLY);

    let (_, body) = app.post("/generate-questions", &json!({})).await;
    assert_eq!(body["questions"], EMPTY_PASSAGE_REPLY);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn provider_failure_is_dependency_unavailable() {
    let app = spawn_app(Arc::new(FakeCompleter::failing(500))).await;
    let (status, body) = app
        .post("/generate-questions", &json!({"text": "Plate tectonics"}))
        .await;
    assert_eq!(status, 503);
    assert_eq!(body["success"], false);
}
