//! Workbench を端末から動かす
//!
//! ローディング表示の代わりにスピナーを出す。

use crate::error::Result;
use crate::source::{self, ContractSource};
use indicatif::{ProgressBar, ProgressStyle};
use legalease_common::{
    send_analysis, send_question, AnalysisRequest, Transport, TransportError, Workbench,
};
use std::time::Duration;

fn loading_spinner(enabled: bool, message: &'static str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// 契約書を解析して Workbench に反映
pub async fn run_analysis<T: Transport>(
    bench: &mut Workbench,
    transport: &T,
    source: ContractSource,
    show_progress: bool,
) -> Result<()> {
    let (ticket, request) = match source {
        ContractSource::Text(text) => {
            bench.set_contract_text(text);
            bench.begin_text_analysis()?
        }
        ContractSource::File(path) => {
            bench.select_file(Some(source::file_candidate(&path)?));
            let (ticket, _) = bench.begin_file_analysis()?;
            match source::read_upload(&path) {
                Ok(upload) => (ticket, AnalysisRequest::File(upload)),
                Err(e) => {
                    // Loading を終わらせてから読み込みエラーを返す
                    bench
                        .finish_analysis(ticket, Err(TransportError::Network(e.to_string())))
                        .ok();
                    return Err(e);
                }
            }
        }
    };

    let spinner = loading_spinner(show_progress, "Analyzing contract...");
    let outcome = send_analysis(transport, &request).await;
    spinner.finish_and_clear();

    bench.finish_analysis(ticket, outcome)?;
    Ok(())
}

/// 解析済みの内容に質問する
pub async fn run_question<T: Transport>(
    bench: &mut Workbench,
    transport: &T,
    question: &str,
    show_progress: bool,
) -> Result<()> {
    bench.set_question(question);
    let (ticket, request) = bench.begin_question()?;

    let spinner = loading_spinner(show_progress, "Thinking...");
    let outcome = send_question(transport, &request).await;
    spinner.finish_and_clear();

    bench.finish_question(ticket, outcome)?;
    Ok(())
}
