//! Gemini API連携（ブラウザ fetch）

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use lacquer_studio_common::{
    api_error, compile_prompt, generate_image, DesignRecord, Error, ImageResource, Transport,
    GEMINI_IMAGE_MODEL,
};

/// window.fetch による通信
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> lacquer_studio_common::Result<String> {
        fetch_json(url, &body).await.map_err(|e| Error::Transport(js_error_message(&e)))
    }
}

/// fetch呼び出し（非2xxはGeminiのエラー本文を残して返す）
async fn fetch_json(url: &str, body: &str) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(JsValue::from_str(&api_error(resp.status(), &text).to_string()));
    }

    Ok(text)
}

/// JsValue のエラーを表示用文字列にする
fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

/// 設計からプロンプトを作って画像を生成する
///
/// 戻り値のプロンプトは結果の出典表示に使う。
pub async fn generate_design(
    record: &DesignRecord,
    api_key: &str,
) -> (String, lacquer_studio_common::Result<ImageResource>) {
    let prompt = compile_prompt(record);
    let outcome = generate_image(&FetchTransport, GEMINI_IMAGE_MODEL, Some(api_key), &prompt).await;
    (prompt, outcome)
}
