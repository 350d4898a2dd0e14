//! 表示ノード → DOM

use leptos::prelude::*;
use legalease_common::{Node, Tag, Workbench};

pub fn render_nodes(nodes: &[Node], bench: RwSignal<Workbench>) -> Vec<AnyView> {
    nodes.iter().map(|node| render_node(node, bench)).collect()
}

fn render_node(node: &Node, bench: RwSignal<Workbench>) -> AnyView {
    match node {
        Node::Text(text) => text.clone().into_any(),
        // フォローアップ候補はクリックで質問欄へ
        Node::Suggestion(text) => {
            let suggestion = text.clone();
            view! {
                <button
                    class="suggestion"
                    on:click=move |_| bench.update(|b| b.apply_suggestion(&suggestion))
                >
                    {text.clone()}
                </button>
            }
            .into_any()
        }
        Node::Element { tag, class, children } => {
            let class = class.clone().unwrap_or_default();
            let children = render_nodes(children, bench);
            match tag {
                Tag::Div => view! { <div class=class>{children}</div> }.into_any(),
                Tag::H3 => view! { <h3 class=class>{children}</h3> }.into_any(),
                Tag::H4 => view! { <h4 class=class>{children}</h4> }.into_any(),
                Tag::P => view! { <p class=class>{children}</p> }.into_any(),
                Tag::Ul => view! { <ul class=class>{children}</ul> }.into_any(),
                Tag::Ol => view! { <ol class=class>{children}</ol> }.into_any(),
                Tag::Li => view! { <li class=class>{children}</li> }.into_any(),
                Tag::Span => view! { <span class=class>{children}</span> }.into_any(),
                Tag::Strong => view! { <strong class=class>{children}</strong> }.into_any(),
            }
        }
    }
}
