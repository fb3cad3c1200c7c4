//! セッション上の生成フロー統合テスト
//!
//! スタブ通信で成功・失敗・設定エラー時の状態遷移を検証

use lacquer_studio::generate::generate_in_session;
use lacquer_studio_common::{
    DesignRecord, Error, GEMINI_IMAGE_MODEL, PreviewState, SessionState, Transport,
};
use std::sync::atomic::{AtomicUsize, Ordering};

const IMAGE_BODY: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"ok"},{"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}]}}]}"#;

/// 呼び出し回数を数えるスタブ
struct CountingTransport {
    body: Option<&'static str>,
    calls: AtomicUsize,
}

impl CountingTransport {
    fn ok() -> Self {
        Self { body: Some(IMAGE_BODY), calls: AtomicUsize::new(0) }
    }

    fn down() -> Self {
        Self { body: None, calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for CountingTransport {
    async fn post_json(&self, _url: &str, _body: String) -> lacquer_studio_common::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.body {
            Some(body) => Ok(body.to_string()),
            None => Err(Error::Transport("error sending request: connection refused".into())),
        }
    }
}

#[tokio::test]
async fn test_success_prepends_history() {
    let transport = CountingTransport::ok();
    let mut state = SessionState::new();
    let design = DesignRecord::default();

    assert!(generate_in_session(&mut state, &transport, GEMINI_IMAGE_MODEL, Some("key"), &design).await);
    assert!(generate_in_session(&mut state, &transport, GEMINI_IMAGE_MODEL, Some("key"), &design.with_detail_text("")).await);

    assert_eq!(transport.calls(), 2);
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.current.as_ref(), Some(&state.history[0]));
    assert!(!state.history[0].source_prompt.contains("Specific details"));
    assert!(state.history[1].source_prompt.contains("Specific details"));
    let newest: u64 = state.history[0].id.parse().unwrap();
    let older: u64 = state.history[1].id.parse().unwrap();
    assert!(newest > older);
    assert!(!state.is_generating);
    assert!(state.last_error.is_none());
}

#[tokio::test]
async fn test_missing_key_never_reaches_transport() {
    let transport = CountingTransport::ok();
    let mut state = SessionState::new();

    generate_in_session(&mut state, &transport, GEMINI_IMAGE_MODEL, None, &DesignRecord::default()).await;

    assert_eq!(transport.calls(), 0);
    assert!(state.history.is_empty());
    assert!(!state.is_generating);
    assert_eq!(state.last_error.as_deref(), Some("API Key is not configured"));
}

#[tokio::test]
async fn test_transport_failure_keeps_results() {
    let mut state = SessionState::new();
    generate_in_session(&mut state, &CountingTransport::ok(), GEMINI_IMAGE_MODEL, Some("k"), &DesignRecord::default()).await;
    let history = state.history.clone();
    let current = state.current.clone();

    let down = CountingTransport::down();
    generate_in_session(&mut state, &down, GEMINI_IMAGE_MODEL, Some("k"), &DesignRecord::default()).await;

    assert_eq!(down.calls(), 1);
    assert_eq!(state.history, history);
    assert_eq!(state.current, current);
    assert!(state.last_error.as_deref().unwrap_or_default().contains("connection refused"));
    assert!(!state.is_generating);
    assert!(matches!(state.preview(), PreviewState::Showing(_)));
}

#[tokio::test]
async fn test_request_while_generating_is_ignored() {
    let transport = CountingTransport::ok();
    let mut state = SessionState::new();
    let ticket = state.begin_generation().expect("開始できない");

    let started = generate_in_session(&mut state, &transport, GEMINI_IMAGE_MODEL, Some("k"), &DesignRecord::default()).await;

    assert!(!started);
    assert_eq!(transport.calls(), 0);
    assert!(state.is_generating);

    state.finish_generation(ticket, Err(Error::NoImage));
    assert!(!state.is_generating);
}
