//! End-to-end tests of the chat trigger against a mock `/chat` endpoint

use medxpert_core::{
    ChatClient, ChatError, ChatSurface, ChatTrigger, Completion, AnswerKind, FALLBACK_ANSWER,
    PENDING_INDICATOR,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::io::Write;
use std::time::Duration;

struct Screen {
    prompt: String,
    lang: String,
    display: String,
    history: Vec<String>,
}

impl Screen {
    fn new(prompt: &str, lang: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            lang: lang.to_string(),
            display: String::new(),
            history: Vec::new(),
        }
    }
}

impl ChatSurface for Screen {
    fn prompt(&self) -> String {
        self.prompt.clone()
    }

    fn language(&self) -> String {
        self.lang.clone()
    }

    fn show(&mut self, text: &str) {
        self.display = text.to_string();
        self.history.push(text.to_string());
    }

    fn set_prompt(&mut self, text: &str) {
        self.prompt = text.to_string();
    }
}

#[tokio::test]
async fn test_posts_json_and_shows_answer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"message": "Hello", "lang": "en"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"type": "faq", "payload": {"answer": "Hi there"}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = ChatClient::new(&server.url());
    let mut screen = Screen::new("Hello", "en");
    let mut trigger = ChatTrigger::new();

    let completion = trigger.send(&mut screen, &client).await;

    mock.assert_async().await;
    assert_eq!(screen.history, vec![PENDING_INDICATOR, "Hi there"]);
    match completion {
        Some(Completion::Answered(response)) => assert_eq!(response.kind, Some(AnswerKind::Faq)),
        other => panic!("expected an answer, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_payload_shows_fallback() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(r#"{"payload":{}}"#)
        .create_async()
        .await;

    let client = ChatClient::new(&server.url());
    let mut screen = Screen::new("what is leprosy", "hi");
    let mut trigger = ChatTrigger::new();

    trigger.send(&mut screen, &client).await;

    assert_eq!(screen.display, FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_whitespace_prompt_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .expect(0)
        .create_async()
        .await;

    let client = ChatClient::new(&server.url());
    let mut screen = Screen::new("    ", "en");
    let mut trigger = ChatTrigger::new();

    assert!(trigger.send(&mut screen, &client).await.is_none());

    mock.assert_async().await;
    assert!(screen.history.is_empty());
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(r#"{"payload":{"answer":"ok"}}"#)
        .create_async()
        .await;

    let client = ChatClient::new(&format!("{}/", server.url()));
    let mut screen = Screen::new("ping", "en");
    let mut trigger = ChatTrigger::new();

    trigger.send(&mut screen, &client).await;

    mock.assert_async().await;
    assert_eq!(screen.display, "ok");
}

#[tokio::test]
async fn test_server_error_is_surfaced() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(500)
        .with_body("database offline")
        .create_async()
        .await;

    let client = ChatClient::new(&server.url());
    let mut screen = Screen::new("Hello", "en");
    let mut trigger = ChatTrigger::new();

    let completion = trigger.send(&mut screen, &client).await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(ChatError::Status { .. }))
    ));
    assert_eq!(
        screen.display,
        "Server error 500 Internal Server Error: database offline"
    );
}

#[tokio::test]
async fn test_malformed_json_is_surfaced() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = ChatClient::new(&server.url());
    let mut screen = Screen::new("Hello", "en");
    let mut trigger = ChatTrigger::new();

    let completion = trigger.send(&mut screen, &client).await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(ChatError::Decode(_)))
    ));
    assert!(screen.display.starts_with("Could not read answer: "));
}

#[tokio::test]
async fn test_connection_refused_is_surfaced() {
    // Nothing listens on port 1
    let client = ChatClient::new("http://127.0.0.1:1");
    let mut screen = Screen::new("Hello", "en");
    let mut trigger = ChatTrigger::new();

    let completion = trigger.send(&mut screen, &client).await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(ChatError::Network(_)))
    ));
    assert!(screen.display.starts_with("Network error: "));
    assert_ne!(screen.display, PENDING_INDICATOR);
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all(br#"{"payload":{"answer":"too late"}}"#)
        })
        .create_async()
        .await;

    let client = ChatClient::with_timeout(&server.url(), Duration::from_millis(200)).unwrap();
    let mut screen = Screen::new("Hello", "en");
    let mut trigger = ChatTrigger::new();

    let completion = trigger.send(&mut screen, &client).await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(ChatError::Network(_)))
    ));
    assert!(screen.display.starts_with("Network error: "));
}

#[tokio::test]
async fn test_extra_details_are_decoded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat")
        .with_status(200)
        .with_body(
            json!({
                "type": "vaccination",
                "payload": {
                    "answer": "Here is the offline vaccination schedule (infant, child, adult, pregnant).",
                    "extra": {"pregnant": ["TT vaccine"]}
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ChatClient::new(&server.url());
    let mut screen = Screen::new("vaccine schedule", "en");
    let mut trigger = ChatTrigger::new();

    let Some(Completion::Answered(response)) = trigger.send(&mut screen, &client).await else {
        panic!("expected an answer");
    };

    assert_eq!(response.kind, Some(AnswerKind::Vaccination));
    assert_eq!(response.payload.extra.unwrap()["pregnant"][0], "TT vaccine");
}
