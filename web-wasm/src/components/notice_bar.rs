//! 通知バー

use leptos::prelude::*;
use legalease_common::{NoticeLevel, Workbench};

#[component]
pub fn NoticeBar(bench: RwSignal<Workbench>) -> impl IntoView {
    move || {
        bench.with(|b| b.notice().cloned()).map(|notice| {
            let level = match notice.level {
                NoticeLevel::Success => "notice notice-success",
                NoticeLevel::Error => "notice notice-error",
            };
            view! {
                <div class=level role="alert">
                    <span>{notice.message}</span>
                    <button class="notice-close" on:click=move |_| bench.update(|b| b.dismiss_notice())>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
