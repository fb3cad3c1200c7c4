//! 環境変数からの設定読み込み
//!
//! 設定ファイルは持たない。APIキーは生成のたびに読み直す。

use lacquer_studio_common::GEMINI_IMAGE_MODEL;

/// APIキーの環境変数（優先順）
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// モデル上書き用の環境変数
pub const MODEL_VAR: &str = "LACQUER_MODEL";

#[derive(Debug, Clone)]
pub struct Config {
    pub model: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から組み立てる（テスト用に環境変数を差し替えられる）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let model = lookup(MODEL_VAR)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GEMINI_IMAGE_MODEL.to_string());

        Self {
            model,
            api_key: api_key_from(&lookup),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// 現在の環境からAPIキーを読む（空文字は未設定扱い）
pub fn current_api_key() -> Option<String> {
    api_key_from(&|name: &str| std::env::var(name).ok())
}

fn api_key_from(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
