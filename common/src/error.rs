//! エラー型定義
//!
//! 生成処理の失敗は3系統に分かれる:
//! - MissingApiKey: 設定エラー（通信前に検出）
//! - Transport: 通信・サービス側の失敗（元のメッセージを保持）
//! - NoImage: 通信は成功したが画像パートが無い

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("API Key is not configured")]
    MissingApiKey,

    #[error("{0}")]
    Transport(String),

    #[error("No image data found in response")]
    NoImage,

    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 設定エラーかどうか（再試行しても解決しない）
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::MissingApiKey)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
