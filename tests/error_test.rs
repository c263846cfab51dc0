//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use recipe_finder::error::RecipeFinderError;
use recipe_finder::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(RecipeFinderError::FolderNotFound(_))));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.unwrap().is_empty());
}

/// RecipeFinderErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        RecipeFinderError::Config("テスト設定エラー".to_string()),
        RecipeFinderError::FileNotFound("egg.jpg".to_string()),
        RecipeFinderError::FolderNotFound("/path/to/folder".to_string()),
        RecipeFinderError::NoImagesFound("フォルダ".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: RecipeFinderError = io_err.into();

    assert!(matches!(err, RecipeFinderError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: RecipeFinderError = json_err.into();

    assert!(matches!(err, RecipeFinderError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let err: RecipeFinderError = recipe_finder_common::Error::NoIngredients.into();

    assert!(matches!(err, RecipeFinderError::Common(_)));
    assert_eq!(format!("{}", err), "Please upload images of ingredients first!");
}
