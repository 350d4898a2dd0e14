//! 解析画面のオーケストレーション
//!
//! 入力チェック → ローディング表示 → 通信 → パネル描画 → 結果表示 の流れを管理する。
//! 通信そのものは行わない `begin_*` / `finish_*` に分かれているので、
//! ブラウザ側はシグナルの借用を await 越しに持たずに済む。
//! 通信込みの `analyze_text` などはネイティブとテストで使う。

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ActionKind, Error, Result, TransportError};
use crate::projector::{project, render_details, Panels};
use crate::qa::{render_answer, QaPanel};
use crate::state::{InputTab, UiState};
use crate::transport::{send_analysis, send_question, Transport};
use crate::types::{
    AnalysisPayload, AnalysisRequest, FileUpload, QaResult, QuestionRequest, TextAnalysisRequest,
};
use crate::validation::{validate_contract_text, validate_file, validate_question, FileCandidate};

pub const NOTICE_ANALYSIS_COMPLETE: &str = "Contract analysis completed successfully!";
pub const NOTICE_RENDERING_FAILED: &str = "Error displaying results. Please try again.";
pub const ANALYSIS_FAILED_PREFIX: &str = "Analysis failed";

/// 入力欄の内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDrafts {
    pub contract_text: String,
    pub question: String,
    pub file: Option<FileCandidate>,
}

/// 通信中の操作を識別するチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: ActionKind,
    serial: u64,
}

impl Ticket {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }
}

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// 画面上部に出す通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// 画面全体の状態
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    state: UiState,
    inputs: InputDrafts,
    panels: Panels,
    qa: QaPanel,
    notice: Option<Notice>,
    analysis_ticket: Option<Ticket>,
    question_ticket: Option<Ticket>,
    next_serial: u64,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn inputs(&self) -> &InputDrafts {
        &self.inputs
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn qa(&self) -> &QaPanel {
        &self.qa
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_in_flight(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Analysis => self.analysis_ticket.is_some(),
            ActionKind::Question => self.question_ticket.is_some(),
        }
    }

    // =============================================
    // 入力
    // =============================================

    pub fn set_contract_text(&mut self, text: impl Into<String>) {
        self.inputs.contract_text = text.into();
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.inputs.question = question.into();
    }

    pub fn select_file(&mut self, file: Option<FileCandidate>) {
        self.inputs.file = file;
    }

    pub fn select_tab(&mut self, tab: InputTab) {
        self.state.select_tab(tab);
    }

    /// フォローアップ候補を質問欄に入れる（送信はしない）
    pub fn apply_suggestion(&mut self, suggestion: &str) {
        self.inputs.question = suggestion.to_string();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// 入力と結果を破棄してIdleに戻す
    ///
    /// 通信中の操作の結果は、届いても捨てる。
    pub fn clear(&mut self) {
        info!("clear workbench");
        self.inputs = InputDrafts::default();
        self.panels.clear();
        self.qa = QaPanel::Empty;
        self.notice = None;
        self.analysis_ticket = None;
        self.question_ticket = None;
        self.state.reset();
    }

    // =============================================
    // 解析
    // =============================================

    /// テキスト解析を開始（入力チェック → Loading）
    pub fn begin_text_analysis(&mut self) -> Result<(Ticket, AnalysisRequest)> {
        self.ensure_idle(ActionKind::Analysis)?;
        if let Err(e) = validate_contract_text(&self.inputs.contract_text) {
            return Err(self.reject(e.into()));
        }

        // 長さの判定だけ前後の空白を除く。送るのは入力そのまま
        let request = AnalysisRequest::Text(TextAnalysisRequest {
            contract_text: self.inputs.contract_text.clone(),
        });
        Ok((self.start_analysis(), request))
    }

    /// ファイル解析を開始（入力チェック → Loading）
    ///
    /// ファイルの中身は呼び出し側が読み込んで送る。
    pub fn begin_file_analysis(&mut self) -> Result<(Ticket, FileCandidate)> {
        self.ensure_idle(ActionKind::Analysis)?;
        if let Err(e) = validate_file(self.inputs.file.as_ref()) {
            return Err(self.reject(e.into()));
        }

        let file = match self.inputs.file.clone() {
            Some(file) => file,
            None => return Err(self.reject(crate::error::ValidationError::NoFileSelected.into())),
        };
        Ok((self.start_analysis(), file))
    }

    /// 解析の通信結果を反映
    ///
    /// 成功なら4パネルを描画して Output へ。失敗なら Idle へ戻す。
    /// 描画途中の失敗では、それまでに描画したパネルは残る。
    pub fn finish_analysis(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<Value, TransportError>,
    ) -> Result<()> {
        if self.analysis_ticket != Some(ticket) {
            debug!(serial = ticket.serial, "discard stale analysis response");
            return Ok(());
        }
        self.analysis_ticket = None;

        let payload = match outcome.and_then(AnalysisPayload::from_value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "analysis request failed");
                self.state.reset();
                self.notify(NoticeLevel::Error, format!("{}: {}", ANALYSIS_FAILED_PREFIX, e));
                return Err(e.into());
            }
        };

        let panels = &mut self.panels;
        match project(&payload, |panel| panels.set(panel)) {
            Ok(()) => {
                self.panels.set_details(render_details(&payload.details));
                self.state.enter_output();
                info!("analysis rendered");
                self.notify(NoticeLevel::Success, NOTICE_ANALYSIS_COMPLETE.to_string());
                Ok(())
            }
            Err(failure) => {
                warn!(error = %failure, "rendering failed");
                self.state.reset();
                self.notify(NoticeLevel::Error, NOTICE_RENDERING_FAILED.to_string());
                Err(failure.into())
            }
        }
    }

    // =============================================
    // Q&A
    // =============================================

    /// 質問を開始（入力チェック → Thinking表示）
    pub fn begin_question(&mut self) -> Result<(Ticket, QuestionRequest)> {
        if self.question_ticket.is_some() {
            return Err(self.reject(Error::AlreadyInFlight(ActionKind::Question)));
        }

        let context = self.panels.summary_text();
        if let Err(e) = validate_question(&self.inputs.question, context.as_deref()) {
            return Err(self.reject(e.into()));
        }

        let ticket = self.issue(ActionKind::Question);
        self.question_ticket = Some(ticket);
        self.qa = QaPanel::Thinking;

        let request = QuestionRequest {
            question: self.inputs.question.trim().to_string(),
            contract_context: context.unwrap_or_default(),
        };
        Ok((ticket, request))
    }

    /// 質問の通信結果を反映（失敗はQ&Aパネル内だけに表示）
    pub fn finish_question(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<Value, TransportError>,
    ) -> Result<()> {
        if self.question_ticket != Some(ticket) {
            debug!(serial = ticket.serial, "discard stale question response");
            return Ok(());
        }
        self.question_ticket = None;

        match outcome.and_then(QaResult::from_value) {
            Ok(result) => {
                self.qa = QaPanel::Answered(render_answer(&result));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "question failed");
                let error = Error::from(e);
                self.qa = QaPanel::failed(&error);
                Err(error)
            }
        }
    }

    // =============================================
    // 通信込みの操作
    // =============================================

    pub async fn analyze_text<T: Transport>(&mut self, transport: &T) -> Result<()> {
        let (ticket, request) = self.begin_text_analysis()?;
        let outcome = send_analysis(transport, &request).await;
        self.finish_analysis(ticket, outcome)
    }

    pub async fn analyze_file<T: Transport>(&mut self, transport: &T, upload: FileUpload) -> Result<()> {
        self.select_file(Some(FileCandidate::new(
            upload.filename.clone(),
            upload.bytes.len() as u64,
        )));
        let (ticket, _) = self.begin_file_analysis()?;
        let outcome = send_analysis(transport, &AnalysisRequest::File(upload)).await;
        self.finish_analysis(ticket, outcome)
    }

    pub async fn ask_question<T: Transport>(&mut self, transport: &T) -> Result<()> {
        let (ticket, request) = self.begin_question()?;
        let outcome = send_question(transport, &request).await;
        self.finish_question(ticket, outcome)
    }

    // =============================================
    // 内部処理
    // =============================================

    fn ensure_idle(&mut self, kind: ActionKind) -> Result<()> {
        if self.is_in_flight(kind) {
            return Err(self.reject(Error::AlreadyInFlight(kind)));
        }
        Ok(())
    }

    fn issue(&mut self, kind: ActionKind) -> Ticket {
        self.next_serial += 1;
        Ticket {
            kind,
            serial: self.next_serial,
        }
    }

    fn start_analysis(&mut self) -> Ticket {
        let ticket = self.issue(ActionKind::Analysis);
        self.analysis_ticket = Some(ticket);
        self.notice = None;
        self.state.enter_loading();
        ticket
    }

    fn reject(&mut self, error: Error) -> Error {
        debug!(error = %error, "action rejected");
        self.notify(NoticeLevel::Error, error.to_string());
        error
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notice = Some(Notice { level, message });
    }
}
