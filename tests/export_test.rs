//! 画像保存の統合テスト

use lacquer_studio::error::StudioError;
use lacquer_studio::generate::save_result;
use lacquer_studio_common::{GeneratedResult, ImageResource};
use tempfile::tempdir;

/// 1x1 PNG
const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn create_test_result(id: &str, mime: &str, data: &str) -> GeneratedResult {
    GeneratedResult {
        id: id.to_string(),
        image: ImageResource::new(mime, data),
        source_prompt: "A lacquerware Tea Canister".to_string(),
        created_at: 1_700_000_000_000,
    }
}

#[test]
fn test_save_result_writes_decoded_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = create_test_result("1700000000000", "image/png", PNG_1X1);

    let path = save_result(&result, dir.path()).expect("保存失敗");

    assert_eq!(path, dir.path().join("lacquerware-1700000000000.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_save_result_creates_missing_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("out").join("images");
    let result = create_test_result("7", "image/jpeg", "/9j/4AAQ");

    let path = save_result(&result, &nested).expect("保存失敗");
    assert!(path.ends_with("lacquerware-7.jpg"));
    assert!(path.exists());
}

#[test]
fn test_save_result_rejects_invalid_base64() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = create_test_result("8", "image/png", "not*base64");

    let err = save_result(&result, dir.path()).unwrap_err();
    assert!(matches!(err, StudioError::Generation(lacquer_studio_common::Error::InvalidImageData(_))));
    assert!(!dir.path().join("lacquerware-8.png").exists());
}
