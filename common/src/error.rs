//! エラー型定義
//!
//! - ValidationError: 送信前の入力チェック（ネットワークには到達しない）
//! - TransportError: HTTP通信の失敗
//! - RenderingFailure: ペイロード形状がパネル描画時に合わなかった
//! - Error: 上記をまとめた共通エラー

use std::fmt;

use thiserror::Error;

/// パネル種別（描画失敗の発生箇所）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Summary,
    KeyTerms,
    Risk,
    Obligations,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Summary,
        PanelKind::KeyTerms,
        PanelKind::Risk,
        PanelKind::Obligations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Summary => "summary",
            PanelKind::KeyTerms => "key-terms",
            PanelKind::Risk => "risk",
            PanelKind::Obligations => "obligations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Summary => "Summary",
            PanelKind::KeyTerms => "Key Terms",
            PanelKind::Risk => "Risk Assessment",
            PanelKind::Obligations => "Obligations",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ユーザー操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Analysis,
    Question,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Analysis => f.write_str("analysis"),
            ActionKind::Question => f.write_str("question"),
        }
    }
}

/// 入力チェックエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the contract text to analyze.")]
    EmptyText,

    #[error("Contract text is too short ({length} characters). Please provide at least {minimum} characters.")]
    InputTooShort { length: usize, minimum: usize },

    #[error("Please select a file to upload.")]
    NoFileSelected,

    #[error("File is too large ({size} bytes). Maximum size is 10MB.")]
    FileTooLarge { size: u64 },

    #[error("Unsupported file type '{extension}'. Supported types: PDF, DOCX, TXT.")]
    UnsupportedFileType { extension: String },

    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error("Question is too long ({length} characters). Maximum is {maximum} characters.")]
    QuestionTooLong { length: usize, maximum: usize },

    #[error("Please analyze a contract first so there is context to ask about.")]
    NoContextAvailable,
}

/// HTTP通信エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Cannot reach the analysis service at {base_url}. Make sure the backend is running.")]
    BackendUnreachable { base_url: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response from the analysis service: {0}")]
    InvalidResponseBody(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// パネル描画の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to render {panel} panel: {reason}")]
pub struct RenderingFailure {
    pub panel: PanelKind,
    pub reason: String,
}

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Rendering(#[from] RenderingFailure),

    #[error("Another {0} request is already in progress.")]
    AlreadyInFlight(ActionKind),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_is_verbatim() {
        let error = TransportError::Http {
            status: 500,
            body: "model overloaded".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500: model overloaded");
    }

    #[test]
    fn test_unsupported_file_type_carries_extension() {
        let error = ValidationError::UnsupportedFileType {
            extension: "exe".to_string(),
        };
        assert!(error.to_string().contains("'exe'"));
    }

    #[test]
    fn test_error_from_validation_is_transparent() {
        let error: Error = ValidationError::EmptyQuestion.into();
        assert!(matches!(error, Error::Validation(ValidationError::EmptyQuestion)));
        assert_eq!(error.to_string(), "Please enter a question.");
    }

    #[test]
    fn test_error_from_transport() {
        let error: Error = TransportError::Network("reset".to_string()).into();
        assert!(matches!(error, Error::Transport(_)));
        assert_eq!(error.to_string(), "Network error: reset");
    }

    #[test]
    fn test_rendering_failure_display() {
        let failure = RenderingFailure {
            panel: PanelKind::Risk,
            reason: "missing field `riskLevel`".to_string(),
        };
        let display = format!("{}", failure);
        assert!(display.contains("risk panel"));
        assert!(display.contains("riskLevel"));
    }

    #[test]
    fn test_already_in_flight_display() {
        let error = Error::AlreadyInFlight(ActionKind::Analysis);
        assert_eq!(error.to_string(), "Another analysis request is already in progress.");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
