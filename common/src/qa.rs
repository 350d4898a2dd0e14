//! Q&Aパネルの表示

use crate::error::Error;
use crate::types::QaResult;
use crate::view::{Node, Tag};

pub const THINKING_PLACEHOLDER: &str = "Thinking...";
pub const RETRY_HINT: &str = "Please try again or rephrase your question.";

/// Q&Aパネルの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QaPanel {
    #[default]
    Empty,
    Thinking,
    Answered(Vec<Node>),
    Failed { message: String },
}

impl QaPanel {
    pub fn is_thinking(&self) -> bool {
        matches!(self, QaPanel::Thinking)
    }

    pub fn failed(error: &Error) -> Self {
        QaPanel::Failed {
            message: error.to_string(),
        }
    }

    /// 表示用ノード
    pub fn nodes(&self) -> Vec<Node> {
        match self {
            QaPanel::Empty => Vec::new(),
            QaPanel::Thinking => {
                vec![Node::paragraph(THINKING_PLACEHOLDER).with_class("qa-thinking")]
            }
            QaPanel::Answered(nodes) => nodes.clone(),
            QaPanel::Failed { message } => vec![Node::div(
                "qa-error",
                vec![
                    Node::labeled("Error", message.as_str()),
                    Node::paragraph(RETRY_HINT).with_class("qa-retry-hint"),
                ],
            )],
        }
    }
}

/// 信頼度を丸めたパーセント表記に変換（0.5 → "50%"）
pub fn confidence_percent(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

/// 回答を描画
///
/// 関連条項は無ければ節ごと省略する。フォローアップ候補はクリック可能な項目になる。
pub fn render_answer(result: &QaResult) -> Vec<Node> {
    let mut nodes = vec![
        Node::paragraph(result.answer.as_str()).with_class("qa-answer"),
    ];

    if let Some(clauses) = result.relevant_clauses.as_deref().filter(|c| !c.is_empty()) {
        nodes.push(Node::heading(Tag::H4, "Relevant Clauses"));
        nodes.push(Node::list(false, clauses.iter().cloned()).with_class("qa-clauses"));
    }

    nodes.push(
        Node::labeled("Confidence", confidence_percent(result.confidence)).with_class("qa-confidence"),
    );

    if let Some(suggestions) = result
        .follow_up_suggestions
        .as_deref()
        .filter(|s| !s.is_empty())
    {
        nodes.push(Node::heading(Tag::H4, "Follow-up Questions"));
        nodes.push(Node::div(
            "qa-suggestions",
            suggestions
                .iter()
                .map(|s| Node::Suggestion(s.clone()))
                .collect(),
        ));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::view::{find_by_class, plain_text};

    #[test]
    fn test_confidence_percent() {
        assert_eq!(confidence_percent(0.0), "0%");
        assert_eq!(confidence_percent(0.5), "50%");
        assert_eq!(confidence_percent(1.0), "100%");
        assert_eq!(confidence_percent(0.876), "88%");
    }

    #[test]
    fn test_render_answer_full() {
        let result = QaResult {
            answer: "Either party may terminate with 30 days notice.".to_string(),
            relevant_clauses: Some(vec!["Section 9: Termination".to_string()]),
            confidence: 0.9,
            follow_up_suggestions: Some(vec!["What are the penalties?".to_string()]),
        };
        let nodes = render_answer(&result);
        let text = plain_text(&nodes);
        assert!(text.starts_with("Either party may terminate with 30 days notice."));
        assert!(text.contains("- Section 9: Termination"));
        assert!(text.contains("Confidence: 90%"));

        let suggestions = find_by_class(&nodes, "qa-suggestions").expect("候補なし");
        assert_eq!(
            suggestions.children(),
            &[Node::Suggestion("What are the penalties?".to_string())]
        );
    }

    #[test]
    fn test_render_answer_omits_missing_sections() {
        let result = QaResult {
            answer: "Not specified.".to_string(),
            confidence: 0.7,
            ..Default::default()
        };
        let nodes = render_answer(&result);
        assert!(find_by_class(&nodes, "qa-clauses").is_none());
        assert!(find_by_class(&nodes, "qa-suggestions").is_none());
        assert!(!plain_text(&nodes).contains("Relevant Clauses"));
    }

    #[test]
    fn test_failed_panel_shows_message_and_hint() {
        let error: Error = TransportError::Http {
            status: 500,
            body: "Question processing failed".to_string(),
        }
        .into();
        let text = plain_text(&QaPanel::failed(&error).nodes());
        assert!(text.contains("Error: HTTP 500: Question processing failed"));
        assert!(text.contains(RETRY_HINT));
    }

    #[test]
    fn test_thinking_placeholder() {
        let panel = QaPanel::Thinking;
        assert!(panel.is_thinking());
        assert_eq!(plain_text(&panel.nodes()), THINKING_PLACEHOLDER);
        assert!(QaPanel::Empty.nodes().is_empty());
    }
}
