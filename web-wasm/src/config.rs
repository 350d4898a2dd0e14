//! 接続先の決定
//!
//! `<meta name="legalease-api-base">` > ビルド時の LEGALEASE_API_BASE > 既定値

use legalease_common::ClientConfig;

const META_NAME: &str = "legalease-api-base";

pub fn resolve_client_config() -> ClientConfig {
    let configured = meta_base_url()
        .or_else(|| option_env!("LEGALEASE_API_BASE").map(str::to_string));

    match configured {
        Some(url) => ClientConfig::new(&url).unwrap_or_else(|e| {
            gloo::console::warn!(format!("{}; falling back to default", e));
            ClientConfig::default()
        }),
        None => ClientConfig::default(),
    }
}

fn meta_base_url() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{}\"]", META_NAME))
        .ok()??;
    element
        .get_attribute("content")
        .filter(|content| !content.trim().is_empty())
}
