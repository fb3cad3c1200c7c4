//! 画像生成クライアント
//!
//! 通信手段は `Transport` で差し替える（CLI: reqwest / Web: fetch / テスト: スタブ）。
//! 1回の呼び出しにつきリクエストは1回だけ。再試行・キャッシュ・タイムアウトは持たない。

use crate::error::{Error, Result};
use crate::gemini::{generate_content_url, parse_generate_response, GeminiRequest};
use crate::types::ImageResource;

/// JSONをPOSTして成功時の本文を返す通信層
///
/// 非2xx・ネットワーク障害は `Error::Transport` で返すこと。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<String>;
}

/// プロンプトから1:1画像を1枚生成する
///
/// APIキーが無い（空白のみを含む）場合は通信せずに `Error::MissingApiKey` を返す。
pub async fn generate_image<T: Transport>(
    transport: &T,
    model: &str,
    api_key: Option<&str>,
    prompt: &str,
) -> Result<ImageResource> {
    let api_key = api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(Error::MissingApiKey)?;

    let request = GeminiRequest::square_image(prompt);
    let body = serde_json::to_string(&request)?;
    let url = generate_content_url(model, api_key);

    let response_body = transport.post_json(&url, body).await?;
    parse_generate_response(&response_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GEMINI_IMAGE_MODEL;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// 呼び出しを記録するスタブ
    struct StubTransport {
        reply: Result<String>,
        calls: RefCell<Vec<(String, String)>>,
    }

    impl StubTransport {
        fn replying(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(Error::Transport(message.to_string())),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<String> {
            self.calls.borrow_mut().push((url.to_string(), body));
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(Error::Transport(message)) => Err(Error::Transport(message.clone())),
                Err(other) => Err(Error::Transport(other.to_string())),
            }
        }
    }

    const IMAGE_BODY: &str =
        r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}]}}]}"#;

    #[test]
    fn test_missing_api_key_never_calls_transport() {
        let transport = StubTransport::replying(IMAGE_BODY);

        for key in [None, Some(""), Some("   ")] {
            let result = block_on(generate_image(&transport, GEMINI_IMAGE_MODEL, key, "prompt"));
            assert!(matches!(result, Err(Error::MissingApiKey)));
        }
        assert!(transport.calls.borrow().is_empty());
    }

    #[test]
    fn test_success_returns_data_url_image() {
        let transport = StubTransport::replying(IMAGE_BODY);
        let image = block_on(generate_image(&transport, GEMINI_IMAGE_MODEL, Some("key-1"), "a vase"))
            .expect("生成失敗");

        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");

        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.ends_with("gemini-2.5-flash-image:generateContent?key=key-1"));
        assert!(calls[0].1.contains("\"text\":\"a vase\""));
        assert!(calls[0].1.contains("\"aspectRatio\":\"1:1\""));
    }

    #[test]
    fn test_transport_error_message_preserved() {
        let transport = StubTransport::failing("API error: 429 Resource exhausted");
        let result = block_on(generate_image(&transport, GEMINI_IMAGE_MODEL, Some("k"), "p"));

        match result {
            Err(Error::Transport(message)) => assert_eq!(message, "API error: 429 Resource exhausted"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(transport.calls.borrow().len(), 1);
    }

    #[test]
    fn test_no_image_part_is_distinct_error() {
        let transport = StubTransport::replying(r#"{"candidates":[{"content":{"parts":[{"text":"no"}]}}]}"#);
        let result = block_on(generate_image(&transport, GEMINI_IMAGE_MODEL, Some("k"), "p"));
        assert!(matches!(result, Err(Error::NoImage)));
    }
}
