//! Q&Aパネル

use leptos::prelude::*;
use legalease_common::validation::MAX_QUESTION_CHARS;
use legalease_common::{ActionKind, Workbench};
use super::node_view::render_nodes;

#[component]
pub fn QuestionPanel<F>(bench: RwSignal<Workbench>, on_ask: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let asking = move || bench.with(|b| b.is_in_flight(ActionKind::Question));

    view! {
        <section class="qa-section">
            <h3>"Ask About This Contract"</h3>
            <textarea
                class="qa-input"
                placeholder="e.g. What happens if I terminate early?"
                rows="3"
                maxlength=MAX_QUESTION_CHARS.to_string()
                prop:value=move || bench.with(|b| b.inputs().question.clone())
                on:input=move |ev| bench.update(|b| b.set_question(event_target_value(&ev)))
            />
            <p class="char-count">
                {move || {
                    let used = bench.with(|b| b.inputs().question.chars().count());
                    format!("{}/{}", used, MAX_QUESTION_CHARS)
                }}
            </p>
            <button
                class="btn btn-primary"
                disabled=asking
                on:click={
                    let on_ask = on_ask.clone();
                    move |_| on_ask(())
                }
            >
                "Ask"
            </button>
            <div
                class="qa-response"
                class:thinking=move || bench.with(|b| b.qa().is_thinking())
            >
                {move || bench.with(|b| render_nodes(&b.qa().nodes(), bench))}
            </div>
        </section>
    }
}
