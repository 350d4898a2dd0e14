//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use legalease::error::LegalEaseError;
use legalease::source;
use legalease_common::{ActionKind, TransportError, ValidationError};
use std::path::Path;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_read_nonexistent_file() {
    let result = source::read_upload(Path::new("/nonexistent/path/contract.pdf"));
    assert!(matches!(result, Err(LegalEaseError::FileNotFound(_))));
}

/// LegalEaseErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        LegalEaseError::Config("テスト設定エラー".to_string()),
        LegalEaseError::FileNotFound("contract.pdf".to_string()),
        LegalEaseError::HttpClient("TLS初期化失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 共通ライブラリのエラーはそのままのメッセージで表示される
#[test]
fn test_common_error_is_transparent() {
    let err: LegalEaseError = legalease_common::Error::from(ValidationError::EmptyText).into();
    assert_eq!(err.to_string(), ValidationError::EmptyText.to_string());

    let err: LegalEaseError = legalease_common::Error::AlreadyInFlight(ActionKind::Question).into();
    assert_eq!(err.to_string(), "Another question request is already in progress.");
}

/// 通信エラーからの変換
#[test]
fn test_transport_error_conversion() {
    let err: LegalEaseError = TransportError::Http {
        status: 400,
        body: "Contract text too short".to_string(),
    }
    .into();

    assert!(matches!(
        err,
        LegalEaseError::Common(legalease_common::Error::Transport(TransportError::Http { status: 400, .. }))
    ));
    assert_eq!(err.to_string(), "HTTP 400: Contract text too short");
}

/// 壊れた設定ファイル
#[test]
fn test_io_and_json_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
    let err: LegalEaseError = json_err.into();
    assert!(matches!(err, LegalEaseError::JsonParse(_)));

    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: LegalEaseError = io_err.into();
    assert!(matches!(err, LegalEaseError::Io(_)));
}
