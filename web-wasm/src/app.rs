//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use legalease_common::{
    check_health, send_analysis, send_question, AnalysisRequest, FileCandidate, HealthStatus,
    TransportError, Workbench,
};
use crate::api::backend::{read_upload, FetchTransport};
use crate::components::{
    header::Header,
    input_panel::InputPanel,
    loading_indicator::LoadingIndicator,
    notice_bar::NoticeBar,
    question_panel::QuestionPanel,
    results::Results,
};
use crate::config::resolve_client_config;

/// 接続確認の結果（未確認は None）
pub type HealthCheck = Option<Result<HealthStatus, String>>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let transport = FetchTransport::new(resolve_client_config());

    // 画面状態はすべて Workbench に集約
    let bench = RwSignal::new(Workbench::new());
    // 選択中のファイル本体（web_sys::File は Send でないためローカル保持）
    let selected_file = StoredValue::new_local(None::<web_sys::File>);
    let health = RwSignal::new(HealthCheck::None);

    // 起動時の接続確認
    {
        let transport = transport.clone();
        spawn_local(async move {
            let checked = check_health(&transport).await.map_err(|e| {
                gloo::console::warn!(format!("health check failed: {}", e));
                e.to_string()
            });
            health.set(Some(checked));
        });
    }

    // テキスト解析ハンドラ
    let on_analyze_text = {
        let transport = transport.clone();
        move |_| {
            let Some((ticket, request)) = bench.try_update(|b| b.begin_text_analysis().ok()).flatten() else {
                return;
            };
            let transport = transport.clone();
            spawn_local(async move {
                let outcome = send_analysis(&transport, &request).await;
                bench.update(|b| {
                    if let Err(e) = b.finish_analysis(ticket, outcome) {
                        gloo::console::error!(e.to_string());
                    }
                });
            });
        }
    };

    // ファイル解析ハンドラ
    let on_analyze_file = {
        let transport = transport.clone();
        move |_| {
            let Some((ticket, candidate)) = bench.try_update(|b| b.begin_file_analysis().ok()).flatten() else {
                return;
            };
            let file = selected_file.get_value();
            let transport = transport.clone();
            spawn_local(async move {
                let outcome = match file {
                    Some(file) => match read_upload(&file).await {
                        Ok(upload) => send_analysis(&transport, &AnalysisRequest::File(upload)).await,
                        Err(e) => Err(e),
                    },
                    None => Err(TransportError::Network(format!(
                        "{} is no longer available",
                        candidate.name
                    ))),
                };
                bench.update(|b| {
                    if let Err(e) = b.finish_analysis(ticket, outcome) {
                        gloo::console::error!(e.to_string());
                    }
                });
            });
        }
    };

    // 質問ハンドラ
    let on_ask = {
        let transport = transport.clone();
        move |_| {
            let Some((ticket, request)) = bench.try_update(|b| b.begin_question().ok()).flatten() else {
                return;
            };
            let transport = transport.clone();
            spawn_local(async move {
                let outcome = send_question(&transport, &request).await;
                bench.update(|b| {
                    if let Err(e) = b.finish_question(ticket, outcome) {
                        gloo::console::error!(e.to_string());
                    }
                });
            });
        }
    };

    // ファイル選択ハンドラ
    let on_file_selected = move |file: Option<web_sys::File>| {
        let candidate = file
            .as_ref()
            .map(|f| FileCandidate::new(f.name(), f.size() as u64));
        selected_file.set_value(file);
        bench.update(|b| b.select_file(candidate));
    };

    // クリアハンドラ
    let on_clear = move |_| {
        selected_file.set_value(None);
        bench.update(|b| b.clear());
    };

    view! {
        <div class="container">
            <Header health=health />

            <NoticeBar bench=bench />

            <InputPanel
                bench=bench
                on_analyze_text=on_analyze_text
                on_analyze_file=on_analyze_file
                on_file_selected=on_file_selected
                on_clear=on_clear
            />

            <Show when=move || bench.with(|b| b.state().loading_visible())>
                <LoadingIndicator />
            </Show>

            <div
                class="output"
                class:hidden=move || !bench.with(|b| b.state().output_visible())
            >
                <Results bench=bench />
                <QuestionPanel bench=bench on_ask=on_ask />
            </div>
        </div>
    }
}
