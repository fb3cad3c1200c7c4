//! ダウンロード（ローカル保存）用ヘルパー

use crate::error::{Error, Result};
use crate::types::{GeneratedResult, ImageResource};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 保存ファイル名の接頭辞
pub const DOWNLOAD_PREFIX: &str = "lacquerware-";

/// 結果IDから決まる保存ファイル名（例: "lacquerware-1700000000000.png"）
pub fn download_file_name(result: &GeneratedResult) -> String {
    format!("{}{}.{}", DOWNLOAD_PREFIX, result.id, result.image.extension())
}

/// Base64データをバイト列に戻す
pub fn decode_image(image: &ImageResource) -> Result<Vec<u8>> {
    STANDARD
        .decode(image.data.trim())
        .map_err(|e| Error::InvalidImageData(e.to_string()))
}
