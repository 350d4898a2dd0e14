//! 入力エリア（テキスト貼り付け / ファイル選択）

use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};
use legalease_common::validation::{MAX_FILE_BYTES, SUPPORTED_EXTENSIONS};
use legalease_common::{ActionKind, InputTab, Workbench};

#[component]
pub fn InputPanel<A, B, F, C>(
    bench: RwSignal<Workbench>,
    on_analyze_text: A,
    on_analyze_file: B,
    on_file_selected: F,
    on_clear: C,
) -> impl IntoView
where
    A: Fn(()) + 'static + Clone,
    B: Fn(()) + 'static + Clone,
    F: Fn(Option<File>) + 'static + Clone,
    C: Fn(()) + 'static + Clone,
{
    let active_tab = move || bench.with(|b| b.state().active_tab());
    let analyzing = move || bench.with(|b| b.is_in_flight(ActionKind::Analysis));
    let accept = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");

    // クリア後はブラウザ側の選択表示も消す
    let file_ref: NodeRef<Input> = NodeRef::new();
    Effect::new(move |_| {
        let has_file = bench.with(|b| b.inputs().file.is_some());
        if !has_file {
            if let Some(input) = file_ref.get() {
                input.set_value("");
            }
        }
    });

    let tab_class = move |tab: InputTab| {
        if active_tab() == tab {
            "tab active"
        } else {
            "tab"
        }
    };

    view! {
        <section class="input-section">
            <div class="tabs">
                <button
                    class=move || tab_class(InputTab::Text)
                    on:click=move |_| bench.update(|b| b.select_tab(InputTab::Text))
                >
                    "Paste Text"
                </button>
                <button
                    class=move || tab_class(InputTab::File)
                    on:click=move |_| bench.update(|b| b.select_tab(InputTab::File))
                >
                    "Upload File"
                </button>
            </div>

            <div class="tab-content" class:hidden=move || active_tab() != InputTab::Text>
                <textarea
                    class="contract-text"
                    placeholder="Paste your contract text here..."
                    rows="12"
                    prop:value=move || bench.with(|b| b.inputs().contract_text.clone())
                    on:input=move |ev| bench.update(|b| b.set_contract_text(event_target_value(&ev)))
                />
                <button
                    class="btn btn-primary"
                    disabled=analyzing
                    on:click={
                        let on_analyze_text = on_analyze_text.clone();
                        move |_| on_analyze_text(())
                    }
                >
                    "Analyze Contract"
                </button>
            </div>

            <div class="tab-content" class:hidden=move || active_tab() != InputTab::File>
                <input
                    type="file"
                    accept=accept
                    node_ref=file_ref
                    on:change={
                        let on_file_selected = on_file_selected.clone();
                        move |ev: web_sys::Event| {
                            let file = ev
                                .target()
                                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                                .and_then(|input| input.files())
                                .and_then(|files| files.get(0));
                            on_file_selected(file);
                        }
                    }
                />
                <p class="file-info">
                    {move || {
                        bench.with(|b| match &b.inputs().file {
                            Some(file) => format!("{} ({})", file.name, format_size(file.size)),
                            None => format!(
                                "PDF, DOCX or TXT up to {}",
                                format_size(MAX_FILE_BYTES)
                            ),
                        })
                    }}
                </p>
                <button
                    class="btn btn-primary"
                    disabled=analyzing
                    on:click={
                        let on_analyze_file = on_analyze_file.clone();
                        move |_| on_analyze_file(())
                    }
                >
                    "Analyze File"
                </button>
            </div>

            <button
                class="btn btn-secondary"
                on:click={
                    let on_clear = on_clear.clone();
                    move |_| on_clear(())
                }
            >
                "Clear"
            </button>
        </section>
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}
