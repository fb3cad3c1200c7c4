//! ブラウザでの画像ダウンロード

use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;
use lacquer_studio_common::{download_file_name, GeneratedResult};

/// 一時的な <a download> を作ってクリックする
pub fn download_result(result: &GeneratedResult) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document.body is not available"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&result.image.data_url());
    link.set_download(&download_file_name(result));

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use lacquer_studio_common::ImageResource;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_download_leaves_no_anchor_behind() {
        let result = GeneratedResult {
            id: "1700000000000".to_string(),
            image: ImageResource::new("image/png", "iVBORw0KGgo="),
            source_prompt: String::new(),
            created_at: 1_700_000_000_000,
        };

        download_result(&result).expect("download failed");

        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.query_selector("a[download]").unwrap().is_none());
    }
}
