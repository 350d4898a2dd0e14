//! ローディング表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="spinner" />
            <p class="loading-text">"Analyzing contract..."</p>
        </div>
    }
}
