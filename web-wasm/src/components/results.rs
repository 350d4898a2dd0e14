//! 解析結果（4パネル）

use leptos::prelude::*;
use legalease_common::{PanelKind, Workbench};
use super::node_view::render_nodes;

#[component]
pub fn Results(bench: RwSignal<Workbench>) -> impl IntoView {
    view! {
        <div class="results">
            {PanelKind::ALL
                .into_iter()
                .map(|kind| {
                    view! {
                        <section class=format!("panel panel-{}", kind.as_str())>
                            <h3>{kind.title()}</h3>
                            {move || {
                                bench.with(|b| {
                                    b.panels().get(kind).map(|panel| render_nodes(&panel.nodes, bench))
                                })
                            }}
                        </section>
                    }
                })
                .collect_view()}
            // 付加情報は中身があるときだけ
            {move || {
                bench.with(|b| {
                    let details = b.panels().details();
                    (!details.is_empty()).then(|| {
                        view! {
                            <section class="panel panel-details">
                                <h3>"Details"</h3>
                                {render_nodes(details, bench)}
                            </section>
                        }
                    })
                })
            }}
        </div>
    }
}
