//! HTTP通信の抽象
//!
//! ブラウザ（fetch）とネイティブ（reqwest）で実装を差し替える。
//! 実装は1回の通信を行い、成功時はJSON、失敗時は [`TransportError`] を返す。
//! 画面状態には触れない。

use serde_json::{json, Value};

use crate::error::TransportError;
use crate::types::{AnalysisRequest, FileUpload, HealthStatus, ModelInfo, QuestionRequest};

/// バックエンドのエンドポイント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AnalyzeText,
    UploadFile,
    AskQuestion,
    Health,
    ModelInfo,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AnalyzeText => "/analyze-text",
            Endpoint::UploadFile => "/upload-file",
            Endpoint::AskQuestion => "/ask-question",
            Endpoint::Health => "/health",
            Endpoint::ModelInfo => "/model-info",
        }
    }
}

/// multipartのファイルフィールド名
pub const FILE_FIELD: &str = "file";

/// HTTP通信
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// JSON POST
    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> Result<Value, TransportError>;

    /// multipart POST（`file` フィールド1つ）
    async fn post_multipart(
        &self,
        endpoint: Endpoint,
        upload: &FileUpload,
    ) -> Result<Value, TransportError>;

    /// JSON GET
    async fn get_json(&self, endpoint: Endpoint) -> Result<Value, TransportError>;
}

/// 解析リクエストを対応するエンドポイントへ送る
pub async fn send_analysis<T: Transport>(
    transport: &T,
    request: &AnalysisRequest,
) -> Result<Value, TransportError> {
    match request {
        AnalysisRequest::Text(text) => {
            let body = json!({ "contract_text": text.contract_text });
            transport.post_json(Endpoint::AnalyzeText, &body).await
        }
        AnalysisRequest::File(upload) => {
            transport.post_multipart(Endpoint::UploadFile, upload).await
        }
    }
}

/// 質問を送る
pub async fn send_question<T: Transport>(
    transport: &T,
    request: &QuestionRequest,
) -> Result<Value, TransportError> {
    let body = json!({
        "question": request.question,
        "contract_context": request.contract_context,
    });
    transport.post_json(Endpoint::AskQuestion, &body).await
}

/// バックエンドの稼働状況を取得
pub async fn check_health<T: Transport>(transport: &T) -> Result<HealthStatus, TransportError> {
    let value = transport.get_json(Endpoint::Health).await?;
    HealthStatus::from_value(value)
}

/// モデルと対応形式の情報を取得
pub async fn fetch_model_info<T: Transport>(transport: &T) -> Result<ModelInfo, TransportError> {
    let value = transport.get_json(Endpoint::ModelInfo).await?;
    ModelInfo::from_value(value)
}

/// 成功以外のステータスを共通のエラーにする
pub fn check_status(status: u16, body: String) -> Result<String, TransportError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(TransportError::Http { status, body })
    }
}

/// レスポンス本文をJSONとして解釈
pub fn parse_body(body: &str) -> Result<Value, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::InvalidResponseBody(e.to_string()))
}
