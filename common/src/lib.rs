//! LegalEase Common Library
//!
//! ブラウザ(WASM)とCLIで共有される型・入力チェック・描画・画面状態

pub mod config;
pub mod error;
pub mod projector;
pub mod qa;
pub mod state;
pub mod transport;
pub mod types;
pub mod validation;
pub mod view;
pub mod workbench;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ActionKind, Error, PanelKind, RenderingFailure, Result, TransportError, ValidationError};
pub use projector::{Panel, Panels};
pub use qa::QaPanel;
pub use state::{InputTab, Phase, UiState};
pub use transport::{
    check_health, check_status, fetch_model_info, parse_body, send_analysis, send_question, Endpoint,
    Transport, FILE_FIELD,
};
pub use types::{
    AnalysisDetails, AnalysisPayload, AnalysisRequest, FileUpload, HealthStatus, ModelDescription,
    ModelInfo, QaResult, QuestionRequest,
};
pub use validation::{file_extension, FileCandidate};
pub use view::{plain_text, Node, Tag};
pub use workbench::{Notice, NoticeLevel, Ticket, Workbench};
