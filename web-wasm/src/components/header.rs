//! ヘッダーコンポーネント

use leptos::prelude::*;
use crate::app::HealthCheck;

#[component]
pub fn Header(health: RwSignal<HealthCheck>) -> impl IntoView {
    let badge = move || match health.get() {
        None => ("health-badge pending", "Checking backend...".to_string()),
        Some(Ok(status)) if status.is_healthy() => ("health-badge ok", "Backend ready".to_string()),
        Some(Ok(status)) => (
            "health-badge degraded",
            status
                .error
                .or(status.message)
                .unwrap_or_else(|| format!("Backend {}", status.status)),
        ),
        Some(Err(message)) => ("health-badge down", message),
    };

    view! {
        <header class="header">
            <h1>"LegalEase"</h1>
            <p class="subtitle">"AI contract analysis"</p>
            <span class=move || badge().0>{move || badge().1}</span>
        </header>
    }
}
