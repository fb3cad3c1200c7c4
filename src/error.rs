use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("APIキーが設定されていません。環境変数 GEMINI_API_KEY（または API_KEY）を設定してください")]
    MissingApiKey,

    #[error("画像生成エラー: {0}")]
    Generation(lacquer_studio_common::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lacquer_studio_common::Error> for StudioError {
    fn from(error: lacquer_studio_common::Error) -> Self {
        // 設定エラーは環境変数の案内付きで返す
        if error.is_configuration() {
            return StudioError::MissingApiKey;
        }
        StudioError::Generation(error)
    }
}

impl From<dialoguer::Error> for StudioError {
    fn from(error: dialoguer::Error) -> Self {
        StudioError::Prompt(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
