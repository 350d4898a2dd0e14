//! 端末への出力整形

use legalease_common::{plain_text, HealthStatus, ModelDescription, ModelInfo, PanelKind, Panels, QaPanel};

/// 4パネルを見出し付きで並べる（付加情報があれば最後に Details として出す）
pub fn render_panels(panels: &Panels) -> String {
    let mut blocks: Vec<String> = PanelKind::ALL
        .iter()
        .filter_map(|kind| panels.get(*kind))
        .map(|panel| format!("== {} ==\n{}\n", panel.kind.title(), panel.plain_text()))
        .collect();
    if !panels.details().is_empty() {
        blocks.push(format!("== Details ==\n{}\n", plain_text(panels.details())));
    }
    blocks.join("\n")
}

pub fn render_qa(qa: &QaPanel) -> String {
    plain_text(&qa.nodes())
}

pub fn render_health(status: &HealthStatus) -> String {
    let mut lines = vec![format!(
        "{} {} (model loaded: {})",
        if status.is_healthy() { "✔" } else { "✖" },
        status.status,
        if status.model_loaded { "yes" } else { "no" }
    )];
    if let Some(message) = &status.message {
        lines.push(format!("  {}", message));
    }
    if let Some(error) = &status.error {
        lines.push(format!("  error: {}", error));
    }
    lines.join("\n")
}

pub fn render_model_info(info: &ModelInfo) -> String {
    let mut lines = Vec::new();
    if let Some(version) = &info.api_version {
        lines.push(format!("API version: {}", version));
    }
    for (label, model) in [("Analysis model", &info.primary_model), ("Q&A model", &info.qa_model)] {
        if let Some(model) = model {
            lines.extend(describe_model(label, model));
        }
    }
    if !info.features.is_empty() {
        lines.push("Features:".to_string());
        lines.extend(info.features.iter().map(|f| format!("  - {}", f)));
    }
    if !info.supported_formats.is_empty() {
        lines.push(format!("Supported formats: {}", info.supported_formats.join(", ")));
    }
    if let Some(size) = &info.max_file_size {
        lines.push(format!("Max file size: {}", size));
    }
    lines.join("\n")
}

fn describe_model(label: &str, model: &ModelDescription) -> Vec<String> {
    let mut lines = vec![match &model.parameters {
        Some(parameters) => format!("{}: {} ({})", label, model.name, parameters),
        None => format!("{}: {}", label, model.name),
    }];
    if let Some(training) = &model.training_data {
        lines.push(format!("  trained on {}", training));
    }
    lines.extend(model.capabilities.iter().map(|c| format!("  - {}", c)));
    lines
}
