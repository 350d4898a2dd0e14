//! 契約書の読み込み

use crate::error::{LegalEaseError, Result};
use legalease_common::{file_extension, FileCandidate, FileUpload};
use std::io::Read;
use std::path::{Path, PathBuf};

/// 解析対象
///
/// ファイルは入力チェックが通るまで中身を読まない。
#[derive(Debug, Clone, PartialEq)]
pub enum ContractSource {
    Text(String),
    File(PathBuf),
}

/// テキストを読む（`-` は標準入力）
pub fn read_text_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    ensure_exists(path)?;
    Ok(std::fs::read_to_string(path)?)
}

/// 名前とサイズだけを取得（中身は読まない）
pub fn file_candidate(path: &Path) -> Result<FileCandidate> {
    ensure_exists(path)?;
    let size = std::fs::metadata(path)?.len();
    Ok(FileCandidate::new(file_name(path)?, size))
}

/// アップロード用にファイルを読む
pub fn read_upload(path: &Path) -> Result<FileUpload> {
    ensure_exists(path)?;
    let filename = file_name(path)?;

    Ok(FileUpload {
        mime_hint: mime_hint(&filename).map(str::to_string),
        filename,
        bytes: std::fs::read(path)?,
    })
}

/// 拡張子で送り方を決める（pdf/docx はアップロード、それ以外はテキスト）
pub fn load_contract(path: &Path) -> Result<ContractSource> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match file_extension(&filename).as_str() {
        "pdf" | "docx" => {
            ensure_exists(path)?;
            Ok(ContractSource::File(path.to_path_buf()))
        }
        _ => Ok(ContractSource::Text(read_text_input(path)?)),
    }
}

pub fn mime_hint(filename: &str) -> Option<&'static str> {
    match file_extension(filename).as_str() {
        "pdf" => Some("application/pdf"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| LegalEaseError::FileNotFound(path.display().to_string()))
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(LegalEaseError::FileNotFound(path.display().to_string()))
    }
}
