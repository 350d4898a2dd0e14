//! 解析API のリクエスト/レスポンス型
//!
//! バックエンドは snake_case で返すが、camelCase でも受け付ける。
//! 解析結果の4セクションは [`AnalysisPayload`] では生JSONのまま保持し、
//! パネル描画時にそれぞれ型付きでデコードする（失敗はパネル単位）。

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::TransportError;

// =============================================
// リクエスト
// =============================================

/// テキスト解析リクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysisRequest {
    pub contract_text: String,
}

/// アップロードするファイル
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_hint: Option<String>,
}

/// 解析リクエスト（テキストかファイルのどちらか一方）
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Text(TextAnalysisRequest),
    File(FileUpload),
}

/// 質問リクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRequest {
    pub question: String,
    pub contract_context: String,
}

// =============================================
// 解析結果
// =============================================

/// 解析レスポンスの最上位
///
/// 4セクションの存在だけをここで確認する。中身の形は描画時に検証する。
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPayload {
    pub detailed_summary: Value,
    pub key_terms: Value,
    pub risk_assessment: Value,
    pub obligations: Value,
    pub details: AnalysisDetails,
}

impl AnalysisPayload {
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        let Value::Object(mut map) = value else {
            return Err(TransportError::InvalidResponseBody(
                "expected a JSON object".to_string(),
            ));
        };

        // バックエンド側の処理失敗は 200 で `processing_status: failed` が返る
        let status = take_optional::<String>(&mut map, "processingStatus", "processing_status");
        if status.as_deref() == Some("failed") {
            let reason = take_optional::<String>(&mut map, "error", "error")
                .unwrap_or_else(|| "contract processing failed".to_string());
            return Err(TransportError::InvalidResponseBody(reason));
        }

        Ok(Self {
            detailed_summary: take_required(&mut map, "detailedSummary", "detailed_summary")?,
            key_terms: take_required(&mut map, "keyTerms", "key_terms")?,
            risk_assessment: take_required(&mut map, "riskAssessment", "risk_assessment")?,
            obligations: take_required(&mut map, "obligations", "obligations")?,
            details: AnalysisDetails {
                sections: take_optional(&mut map, "sections", "sections").unwrap_or_default(),
                entities: take_optional(&mut map, "entities", "entities").unwrap_or_default(),
                simplified_text: take_optional(&mut map, "simplifiedText", "simplified_text"),
            },
        })
    }
}

/// 4パネル以外の付加情報
///
/// どれも無くてよい。形が違う項目は読み飛ばす。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// 条項の分類（"payment_terms" → 該当条文）
    pub sections: BTreeMap<String, Vec<String>>,
    /// 抽出された固有表現（"parties", "dates" など）
    pub entities: BTreeMap<String, Vec<String>>,
    pub simplified_text: Option<String>,
}

impl AnalysisDetails {
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(Vec::is_empty)
            && self.entities.values().all(Vec::is_empty)
            && self
                .simplified_text
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
    }
}

fn take_optional<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    camel: &str,
    snake: &str,
) -> Option<T> {
    let value = map.remove(camel).or_else(|| map.remove(snake))?;
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value)
        .inspect_err(|e| warn!(field = snake, error = %e, "ignore malformed field"))
        .ok()
}

fn take_required(
    map: &mut Map<String, Value>,
    camel: &str,
    snake: &str,
) -> Result<Value, TransportError> {
    let value = map.remove(camel).or_else(|| map.remove(snake));
    match value {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(TransportError::InvalidResponseBody(format!(
            "missing field `{}`",
            camel
        ))),
    }
}

/// 詳細サマリー
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSummary {
    #[serde(alias = "executive_summary")]
    pub executive_summary: String,
    #[serde(alias = "key_points")]
    pub key_points: Vec<String>,
    #[serde(alias = "financial_terms")]
    pub financial_terms: FinancialTerms,
    pub timeline: Option<Vec<TimelineEvent>>,
    #[serde(alias = "contract_type")]
    pub contract_type: String,
    #[serde(alias = "main_subject")]
    pub main_subject: String,
}

/// 金額条件（全項目任意）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTerms {
    pub amounts: Option<Vec<String>>,
    #[serde(alias = "payment_schedule")]
    pub payment_schedule: Option<Vec<String>>,
    #[serde(alias = "interest_rates")]
    pub interest_rates: Option<Vec<String>>,
    #[serde(alias = "payment_methods")]
    pub payment_methods: Option<Vec<String>>,
    pub penalties: Option<Vec<String>>,
    pub currencies: Option<Vec<String>>,
}

/// タイムライン項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// 重要用語
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyTerm {
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// リスク評価
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    #[serde(alias = "risk_level")]
    pub risk_level: String,
    #[serde(alias = "risk_score")]
    pub risk_score: f64,
    pub reasons: Vec<String>,
    #[serde(alias = "detailed_analysis")]
    pub detailed_analysis: Option<Vec<RiskFactor>>,
}

/// リスク要因の詳細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFactor {
    pub factor: String,
    pub impact: String,
    pub context: String,
}

/// 義務（4カテゴリ、全項目任意）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obligations {
    #[serde(alias = "critical_obligations")]
    pub critical_obligations: Option<Vec<String>>,
    #[serde(alias = "payment_obligations")]
    pub payment_obligations: Option<Vec<String>>,
    #[serde(alias = "performance_obligations")]
    pub performance_obligations: Option<Vec<String>>,
    #[serde(alias = "all_obligations")]
    pub all_obligations: Option<Vec<String>>,
}

// =============================================
// Q&A / ヘルスチェック
// =============================================

/// 質問への回答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaResult {
    pub answer: String,
    #[serde(alias = "relevant_clauses")]
    pub relevant_clauses: Option<Vec<String>>,
    pub confidence: f64,
    #[serde(alias = "follow_up_suggestions")]
    pub follow_up_suggestions: Option<Vec<String>>,
}

impl QaResult {
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        serde_json::from_value(value)
            .map_err(|e| TransportError::InvalidResponseBody(e.to_string()))
    }
}

/// `/model-info` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub primary_model: Option<ModelDescription>,
    pub qa_model: Option<ModelDescription>,
    pub features: Vec<String>,
    pub supported_formats: Vec<String>,
    pub max_file_size: Option<String>,
    pub api_version: Option<String>,
}

/// モデル1つ分の説明
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDescription {
    pub name: String,
    pub parameters: Option<String>,
    pub training_data: Option<String>,
    pub capabilities: Vec<String>,
}

impl ModelInfo {
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        serde_json::from_value(value)
            .map_err(|e| TransportError::InvalidResponseBody(e.to_string()))
    }
}

/// `/health` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        serde_json::from_value(value)
            .map_err(|e| TransportError::InvalidResponseBody(e.to_string()))
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}
