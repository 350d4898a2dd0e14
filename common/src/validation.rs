//! 送信前の入力チェック
//!
//! すべて純粋関数。失敗したらネットワークには一切到達しない。

use crate::error::ValidationError;

/// 解析に必要な最小文字数
pub const MIN_CONTRACT_CHARS: usize = 100;
/// アップロード上限（10 MiB）
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
/// 質問の最大文字数
pub const MAX_QUESTION_CHARS: usize = 500;
/// Q&Aに必要なコンテキストの最小文字数
pub const MIN_CONTEXT_CHARS: usize = 100;
/// 対応拡張子
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// 選択されたファイルのメタデータ（中身は読まない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// テキスト解析の入力チェック
pub fn validate_contract_text(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let length = trimmed.chars().count();
    if length < MIN_CONTRACT_CHARS {
        return Err(ValidationError::InputTooShort {
            length,
            minimum: MIN_CONTRACT_CHARS,
        });
    }
    Ok(())
}

/// ファイル名の最後のドット以降を小文字で返す（ドットなしは空文字）
pub fn file_extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// ファイル解析の入力チェック
///
/// 選択有無 → サイズ → 拡張子 の順に判定する。
pub fn validate_file(file: Option<&FileCandidate>) -> Result<(), ValidationError> {
    let file = file.ok_or(ValidationError::NoFileSelected)?;

    if file.size > MAX_FILE_BYTES {
        return Err(ValidationError::FileTooLarge { size: file.size });
    }

    let extension = file_extension(&file.name);
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedFileType { extension });
    }
    Ok(())
}

/// 質問の入力チェック
///
/// `context` は描画済みサマリーパネルのテキスト（未描画なら None）。
pub fn validate_question(question: &str, context: Option<&str>) -> Result<(), ValidationError> {
    if question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }

    let length = question.chars().count();
    if length > MAX_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooLong {
            length,
            maximum: MAX_QUESTION_CHARS,
        });
    }

    match context {
        Some(ctx) if ctx.trim().chars().count() >= MIN_CONTEXT_CHARS => Ok(()),
        _ => Err(ValidationError::NoContextAvailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text(n: usize) -> String {
        "a".repeat(n)
    }

    #[test]
    fn test_contract_text_empty() {
        assert_eq!(validate_contract_text(""), Err(ValidationError::EmptyText));
        assert_eq!(validate_contract_text("   \n\t "), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_contract_text_too_short_after_trim() {
        // 前後の空白は文字数に含めない
        let text = format!("   {}   ", long_text(99));
        assert_eq!(
            validate_contract_text(&text),
            Err(ValidationError::InputTooShort { length: 99, minimum: 100 })
        );
    }

    #[test]
    fn test_contract_text_boundary() {
        assert!(validate_contract_text(&long_text(100)).is_ok());
        assert!(validate_contract_text(&long_text(150)).is_ok());
    }

    #[test]
    fn test_contract_text_counts_characters_not_bytes() {
        // マルチバイト文字100文字はOK
        assert!(validate_contract_text(&"契".repeat(100)).is_ok());
        assert!(validate_contract_text(&"契".repeat(40)).is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("contract.PDF"), "pdf");
        assert_eq!(file_extension("archive.tar.docx"), "docx");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn test_file_not_selected() {
        assert_eq!(validate_file(None), Err(ValidationError::NoFileSelected));
    }

    #[test]
    fn test_file_too_large() {
        let file = FileCandidate::new("contract.pdf", MAX_FILE_BYTES + 1);
        assert_eq!(
            validate_file(Some(&file)),
            Err(ValidationError::FileTooLarge { size: MAX_FILE_BYTES + 1 })
        );

        let at_limit = FileCandidate::new("contract.pdf", MAX_FILE_BYTES);
        assert!(validate_file(Some(&at_limit)).is_ok());
    }

    #[test]
    fn test_file_unsupported_type() {
        let file = FileCandidate::new("contract.exe", 1024);
        assert_eq!(
            validate_file(Some(&file)),
            Err(ValidationError::UnsupportedFileType { extension: "exe".to_string() })
        );
    }

    #[test]
    fn test_file_supported_types() {
        for name in ["a.pdf", "b.DOCX", "c.Txt"] {
            let file = FileCandidate::new(name, 10);
            assert!(validate_file(Some(&file)).is_ok(), "{} should be accepted", name);
        }
    }

    #[test]
    fn test_question_empty() {
        let ctx = long_text(200);
        assert_eq!(
            validate_question("  ", Some(&ctx)),
            Err(ValidationError::EmptyQuestion)
        );
    }

    #[test]
    fn test_question_too_long() {
        let ctx = long_text(200);
        let question = long_text(501);
        assert_eq!(
            validate_question(&question, Some(&ctx)),
            Err(ValidationError::QuestionTooLong { length: 501, maximum: 500 })
        );
        assert!(validate_question(&long_text(500), Some(&ctx)).is_ok());
    }

    #[test]
    fn test_question_without_context() {
        assert_eq!(
            validate_question("What is the rent?", None),
            Err(ValidationError::NoContextAvailable)
        );
        assert_eq!(
            validate_question("What is the rent?", Some("short summary")),
            Err(ValidationError::NoContextAvailable)
        );
    }
}
