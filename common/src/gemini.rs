//! Gemini API ワイヤーフォーマット
//!
//! generateContent のリクエスト/レスポンス型と、レスポンスから画像パートを
//! 取り出す処理。通信そのものは `client::Transport` の実装側が行う。

use crate::error::{Error, Result};
use crate::types::ImageResource;
use serde::{Deserialize, Serialize};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// 画像生成モデル
pub const GEMINI_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// 正方形（1:1）のみ要求する
pub const SQUARE_ASPECT_RATIO: &str = "1:1";

/// inlineData にMIMEタイプが無い場合の既定値
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// generateContent のエンドポイントURL
pub fn generate_content_url(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "imageConfig")]
    pub image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
pub struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
}

impl GeminiRequest {
    /// テキスト1パート + 1:1画像の生成リクエスト
    pub fn square_image(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt.to_string() }],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: SQUARE_ASPECT_RATIO.to_string(),
                },
            },
        }
    }
}

/// Gemini APIレスポンス
///
/// ブロック時などは candidates / parts が欠けるため全て省略可能として扱う。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeminiResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    pub mime_type: Option<String>,
    pub data: Option<String>,
}

/// エラーレスポンス本文 `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// 先頭候補のパートを順に走査し、最初の画像パートを返す
pub fn extract_image(response: &GeminiResponse) -> Option<ImageResource> {
    let content = response.candidates.first()?.content.as_ref()?;

    content.parts.iter().find_map(|part| {
        let inline = part.inline_data.as_ref()?;
        let data = inline.data.as_deref().filter(|d| !d.is_empty())?;
        let mime_type = inline
            .mime_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Some(ImageResource::new(mime_type, data))
    })
}

/// 成功レスポンス本文をパースして画像を取り出す
///
/// 本文がJSONとして不正なら通信エラー、画像パートが無ければ `Error::NoImage`。
pub fn parse_generate_response(body: &str) -> Result<ImageResource> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| Error::Transport(format!("Malformed response: {}", e)))?;

    extract_image(&response).ok_or(Error::NoImage)
}

/// 非2xxレスポンスを通信エラーに変換
///
/// Gemini形式のエラー本文があればその message を残す。
pub fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => Error::Transport(format!("API error: {} {}", status, parsed.error.message)),
        Err(_) if body.trim().is_empty() => Error::Transport(format!("API error: {}", status)),
        Err(_) => Error::Transport(format!("API error: {} {}", status, body.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_image_request_serialize() {
        let request = GeminiRequest::square_image("テストプロンプト");
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(
            json,
            r#"{"contents":[{"parts":[{"text":"テストプロンプト"}]}],"generationConfig":{"imageConfig":{"aspectRatio":"1:1"}}}"#
        );
    }

    #[test]
    fn test_generate_content_url() {
        let url = generate_content_url(GEMINI_IMAGE_MODEL, "abc");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image:generateContent?key=abc"
        );
    }

    #[test]
    fn test_extract_first_image_part_after_text() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your lacquerware." },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } },
                        { "inlineData": { "mimeType": "image/png", "data": "BBBB" } }
                    ]
                }
            }]
        }"#;

        let image = parse_generate_response(json).expect("画像が取れない");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "AAAA");
    }

    #[test]
    fn test_extract_skips_empty_inline_data() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "" } },
                        { "inlineData": { "data": "CCCC" } }
                    ]
                }
            }]
        }"#;

        let image = parse_generate_response(json).unwrap();
        assert_eq!(image.data, "CCCC");
        assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME);
    }

    #[test]
    fn test_snake_case_inline_data_accepted() {
        let json = r#"{"candidates":[{"content":{"parts":[{"inline_data":{"mime_type":"image/webp","data":"DDDD"}}]}}]}"#;
        let image = parse_generate_response(json).unwrap();
        assert_eq!(image.mime_type, "image/webp");
    }

    #[test]
    fn test_text_only_response_is_no_image() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"I cannot draw that."}]}}]}"#;
        assert!(matches!(parse_generate_response(json), Err(Error::NoImage)));
    }

    #[test]
    fn test_missing_candidates_is_no_image() {
        assert!(matches!(parse_generate_response("{}"), Err(Error::NoImage)));
        let blocked = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        assert!(matches!(parse_generate_response(blocked), Err(Error::NoImage)));
    }

    #[test]
    fn test_malformed_body_is_transport_error() {
        match parse_generate_response("<html>502</html>") {
            Err(Error::Transport(message)) => assert!(message.starts_with("Malformed response")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_keeps_service_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let error = api_error(400, body);
        assert_eq!(error.to_string(), "API error: 400 API key not valid.");
    }

    #[test]
    fn test_api_error_plain_body() {
        assert_eq!(api_error(503, "").to_string(), "API error: 503");
        assert_eq!(api_error(500, "oops\n").to_string(), "API error: 500 oops");
    }
}
