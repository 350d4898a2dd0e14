//! 解析結果をパネル（ビューモデル）へ変換する
//!
//! Summary → Key Terms → Risk → Obligations の順に1パネルずつ
//! デコード・描画・反映する。途中で失敗しても、それまでに反映した
//! パネルは巻き戻さない。

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PanelKind, RenderingFailure};
use crate::types::{
    AnalysisDetails, AnalysisPayload, DetailedSummary, KeyTerm, Obligations, RiskAssessment,
    TimelineEvent,
};
use crate::view::{plain_text, Node, Tag};

pub const FALLBACK_FINANCIAL_TERMS: &str = "No specific financial terms identified.";
pub const FALLBACK_TIMELINE: &str = "No specific timeline identified.";
pub const FALLBACK_CRITICAL_OBLIGATIONS: &str = "No critical obligations identified.";
pub const FALLBACK_PAYMENT_OBLIGATIONS: &str = "No payment obligations identified.";
pub const FALLBACK_PERFORMANCE_OBLIGATIONS: &str = "No performance obligations identified.";
pub const FALLBACK_ALL_OBLIGATIONS: &str = "No obligations identified.";

/// 金額条件の項目区切り
pub const ITEM_SEPARATOR: &str = ", ";

/// 描画済みパネル
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub nodes: Vec<Node>,
}

impl Panel {
    pub fn plain_text(&self) -> String {
        plain_text(&self.nodes)
    }
}

/// 4パネル分の表示内容（と付加情報）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panels {
    summary: Option<Panel>,
    key_terms: Option<Panel>,
    risk: Option<Panel>,
    obligations: Option<Panel>,
    details: Vec<Node>,
}

impl Panels {
    pub fn get(&self, kind: PanelKind) -> Option<&Panel> {
        match kind {
            PanelKind::Summary => self.summary.as_ref(),
            PanelKind::KeyTerms => self.key_terms.as_ref(),
            PanelKind::Risk => self.risk.as_ref(),
            PanelKind::Obligations => self.obligations.as_ref(),
        }
    }

    /// 同種のパネルを置き換える（追記はしない）
    pub fn set(&mut self, panel: Panel) {
        let slot = match panel.kind {
            PanelKind::Summary => &mut self.summary,
            PanelKind::KeyTerms => &mut self.key_terms,
            PanelKind::Risk => &mut self.risk,
            PanelKind::Obligations => &mut self.obligations,
        };
        *slot = Some(panel);
    }

    /// 付加情報（固有表現・条項分類・平易な要約）。無ければ空
    pub fn details(&self) -> &[Node] {
        &self.details
    }

    pub fn set_details(&mut self, nodes: Vec<Node>) {
        self.details = nodes;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        PanelKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }

    /// Q&Aのコンテキスト（サマリーパネルのテキスト）
    pub fn summary_text(&self) -> Option<String> {
        self.summary.as_ref().map(Panel::plain_text)
    }
}

/// ペイロードを4パネルへ投影する
///
/// 各パネルは成功した時点で `commit` に渡される。
pub fn project(
    payload: &AnalysisPayload,
    mut commit: impl FnMut(Panel),
) -> Result<(), RenderingFailure> {
    for kind in PanelKind::ALL {
        let panel = project_panel(kind, payload)?;
        commit(panel);
    }
    Ok(())
}

/// 1パネル分をデコードして描画
pub fn project_panel(kind: PanelKind, payload: &AnalysisPayload) -> Result<Panel, RenderingFailure> {
    let nodes = match kind {
        PanelKind::Summary => render_summary(&decode(kind, &payload.detailed_summary)?),
        PanelKind::KeyTerms => render_key_terms(&decode::<Vec<KeyTerm>>(kind, &payload.key_terms)?),
        PanelKind::Risk => render_risk(&decode(kind, &payload.risk_assessment)?),
        PanelKind::Obligations => render_obligations(&decode(kind, &payload.obligations)?),
    };
    Ok(Panel { kind, nodes })
}

fn decode<T: DeserializeOwned>(panel: PanelKind, value: &Value) -> Result<T, RenderingFailure> {
    T::deserialize(value).map_err(|e| RenderingFailure {
        panel,
        reason: e.to_string(),
    })
}

fn populated(items: &Option<Vec<String>>) -> Option<&[String]> {
    items.as_deref().filter(|items| !items.is_empty())
}

/// サマリーパネル
pub fn render_summary(summary: &DetailedSummary) -> Vec<Node> {
    let terms = &summary.financial_terms;
    let financial_lines: Vec<Node> = [
        ("Amounts", &terms.amounts),
        ("Payment Schedule", &terms.payment_schedule),
        ("Interest Rates", &terms.interest_rates),
        ("Payment Methods", &terms.payment_methods),
        ("Penalties", &terms.penalties),
        ("Currencies", &terms.currencies),
    ]
    .into_iter()
    .filter_map(|(label, items)| {
        populated(items).map(|items| Node::labeled(label, items.join(ITEM_SEPARATOR)))
    })
    .collect();

    let financial = if financial_lines.is_empty() {
        Node::paragraph(FALLBACK_FINANCIAL_TERMS).with_class("fallback")
    } else {
        Node::div("financial-terms", financial_lines)
    };

    let timeline = match summary.timeline.as_deref() {
        Some(events) if !events.is_empty() => Node::element(
            Tag::Ol,
            events.iter().map(render_timeline_event).collect(),
        )
        .with_class("timeline"),
        _ => Node::paragraph(FALLBACK_TIMELINE).with_class("fallback"),
    };

    vec![
        Node::div(
            "summary-meta",
            vec![
                Node::labeled("Contract Type", summary.contract_type.as_str()),
                Node::labeled("Main Subject", summary.main_subject.as_str()),
            ],
        ),
        Node::heading(Tag::H4, "Executive Summary"),
        Node::paragraph(summary.executive_summary.as_str()).with_class("executive-summary"),
        Node::heading(Tag::H4, "Key Points"),
        Node::list(false, summary.key_points.iter().cloned()).with_class("key-points"),
        Node::heading(Tag::H4, "Financial Terms"),
        financial,
        Node::heading(Tag::H4, "Timeline"),
        timeline,
    ]
}

/// 種別（start, deadline など）があれば項目のクラスにする
fn render_timeline_event(event: &TimelineEvent) -> Node {
    let item = Node::element(Tag::Li, vec![Node::text(format!("{}: {}", event.event, event.date))]);
    match event.kind.as_deref().map(class_slug).filter(|k| !k.is_empty()) {
        Some(kind) => item.with_class(format!("timeline-{}", kind)),
        None => item,
    }
}

/// 重要用語パネル（内容はそのまま表示、省略・除外しない）
///
/// 契約書中の出現箇所（context）があれば定義の下に添える。
pub fn render_key_terms(terms: &[KeyTerm]) -> Vec<Node> {
    terms
        .iter()
        .map(|term| {
            let mut card = vec![
                Node::heading(Tag::H4, term.term.as_str()).with_class("term-name"),
                Node::paragraph(term.definition.as_str()).with_class("term-definition"),
            ];
            if let Some(context) = term.context.as_deref().filter(|c| !c.trim().is_empty()) {
                card.push(Node::labeled("Context", context).with_class("term-context"));
            }
            Node::div("term-card", card)
        })
        .collect()
}

/// 小文字化して空白を `-` でつなぐ（"VERY LOW" → "very-low"）
fn class_slug(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// リスク評価のバッジ用クラス
pub fn risk_badge_class(risk_level: &str) -> String {
    format!("risk-badge risk-{}", class_slug(risk_level))
}

/// リスクパネル
///
/// reasons が空でも空リストを出す。詳細分析が無ければ節ごと省く。
pub fn render_risk(risk: &RiskAssessment) -> Vec<Node> {
    let mut nodes = vec![
        Node::div(
            "risk-header",
            vec![
                Node::element(Tag::Span, vec![Node::text(risk.risk_level.as_str())])
                    .with_class(risk_badge_class(&risk.risk_level)),
                Node::text(" "),
                Node::element(Tag::Span, vec![Node::text(format!("{}/10", risk.risk_score))])
                    .with_class("risk-score"),
            ],
        ),
        Node::heading(Tag::H4, "Risk Factors"),
        Node::list(false, risk.reasons.iter().cloned()).with_class("risk-reasons"),
    ];

    if let Some(details) = risk.detailed_analysis.as_deref().filter(|d| !d.is_empty()) {
        nodes.push(Node::heading(Tag::H4, "Detailed Analysis"));
        nodes.push(Node::div(
            "risk-details",
            details
                .iter()
                .map(|d| {
                    Node::div(
                        "risk-factor",
                        vec![
                            Node::labeled("Factor", d.factor.as_str()),
                            Node::labeled("Impact", d.impact.as_str()),
                            Node::labeled("Context", d.context.as_str()),
                        ],
                    )
                })
                .collect(),
        ));
    }
    nodes
}

/// 義務パネル（カテゴリごとに独立したフォールバック）
pub fn render_obligations(obligations: &Obligations) -> Vec<Node> {
    [
        ("Critical Obligations", "critical-obligations", &obligations.critical_obligations, FALLBACK_CRITICAL_OBLIGATIONS),
        ("Payment Obligations", "payment-obligations", &obligations.payment_obligations, FALLBACK_PAYMENT_OBLIGATIONS),
        ("Performance Obligations", "performance-obligations", &obligations.performance_obligations, FALLBACK_PERFORMANCE_OBLIGATIONS),
        ("All Obligations", "all-obligations", &obligations.all_obligations, FALLBACK_ALL_OBLIGATIONS),
    ]
    .into_iter()
    .map(|(title, class, items, fallback)| {
        let body = match populated(items) {
            Some(items) => Node::list(false, items.iter().cloned()),
            None => Node::paragraph(fallback).with_class("fallback"),
        };
        Node::div(class, vec![Node::heading(Tag::H4, title), body])
    })
    .collect()
}

/// 付加情報の描画（4パネルとは別枠）
///
/// 中身のある項目だけを出す。フォールバック文言は無い。
pub fn render_details(details: &AnalysisDetails) -> Vec<Node> {
    let mut nodes = Vec::new();

    let entities: Vec<Node> = details
        .entities
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(kind, values)| Node::labeled(&label_from_key(kind), values.join(ITEM_SEPARATOR)))
        .collect();
    if !entities.is_empty() {
        nodes.push(Node::heading(Tag::H4, "Entities"));
        nodes.push(Node::div("entities", entities));
    }

    let sections: Vec<Node> = details
        .sections
        .iter()
        .filter(|(_, clauses)| !clauses.is_empty())
        .map(|(name, clauses)| {
            Node::div(
                "contract-section",
                vec![
                    Node::element(
                        Tag::P,
                        vec![Node::element(Tag::Strong, vec![Node::text(label_from_key(name))])],
                    ),
                    Node::list(false, clauses.iter().cloned()),
                ],
            )
        })
        .collect();
    if !sections.is_empty() {
        nodes.push(Node::heading(Tag::H4, "Contract Sections"));
        nodes.push(Node::div("contract-sections", sections));
    }

    if let Some(text) = details.simplified_text.as_deref().filter(|t| !t.trim().is_empty()) {
        nodes.push(Node::heading(Tag::H4, "Simplified Text"));
        nodes.push(Node::paragraph(text).with_class("simplified-text"));
    }
    nodes
}

/// "payment_terms" → "Payment Terms"
fn label_from_key(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::find_by_class;
    use serde_json::json;

    fn full_payload() -> AnalysisPayload {
        AnalysisPayload::from_value(json!({
            "detailed_summary": {
                "executive_summary": "This is a residential lease.",
                "key_points": ["Monthly rent", "12 month term"],
                "financial_terms": {
                    "amounts": ["$1,200", "$2,400"],
                    "payment_schedule": ["monthly"],
                    "interest_rates": []
                },
                "timeline": [{ "event": "Lease start", "date": "January 1, 2025" }],
                "contract_type": "Lease Agreement",
                "main_subject": "Apartment 4B"
            },
            "key_terms": [
                { "term": "Indemnify", "definition": "protect from loss or damage", "context": "..." },
                { "term": "Waiver", "definition": "" }
            ],
            "risk_assessment": {
                "risk_level": "HIGH",
                "risk_score": 7,
                "reasons": ["Unlimited liability"],
                "detailed_analysis": [
                    { "factor": "unlimited", "impact": "high risk by 3 points", "context": "shall be unlimited" }
                ]
            },
            "obligations": {
                "critical_obligations": ["Tenant must pay rent"],
                "payment_obligations": [],
                "all_obligations": ["Tenant must pay rent", "Landlord shall repair"]
            }
        }))
        .expect("payload作成失敗")
    }

    fn minimal_payload() -> AnalysisPayload {
        AnalysisPayload::from_value(json!({
            "detailedSummary": {
                "executiveSummary": "Summary.",
                "keyPoints": [],
                "financialTerms": {},
                "contractType": "General",
                "mainSubject": "Services"
            },
            "keyTerms": [],
            "riskAssessment": { "riskLevel": "LOW", "riskScore": 0, "reasons": [] },
            "obligations": {}
        }))
        .expect("payload作成失敗")
    }

    fn render_all(payload: &AnalysisPayload) -> Panels {
        let mut panels = Panels::default();
        project(payload, |panel| panels.set(panel)).expect("描画失敗");
        panels
    }

    #[test]
    fn test_full_payload_renders_every_panel() {
        let panels = render_all(&full_payload());
        for kind in PanelKind::ALL {
            assert!(panels.get(kind).is_some(), "{} panel missing", kind);
        }

        let summary = panels.summary_text().expect("summaryなし");
        assert!(summary.contains("This is a residential lease."));
        assert!(summary.contains("Amounts: $1,200, $2,400"));
        assert!(summary.contains("Payment Schedule: monthly"));
        // 空の配列はラベルごと出さない
        assert!(!summary.contains("Interest Rates"));
        assert!(summary.contains("1. Lease start: January 1, 2025"));
    }

    #[test]
    fn test_minimal_payload_uses_every_fallback() {
        let panels = render_all(&minimal_payload());

        let summary = panels.get(PanelKind::Summary).expect("summaryなし").plain_text();
        assert!(summary.contains(FALLBACK_FINANCIAL_TERMS));
        assert!(summary.contains(FALLBACK_TIMELINE));

        let obligations = panels.get(PanelKind::Obligations).expect("obligationsなし").plain_text();
        for fallback in [
            FALLBACK_CRITICAL_OBLIGATIONS,
            FALLBACK_PAYMENT_OBLIGATIONS,
            FALLBACK_PERFORMANCE_OBLIGATIONS,
            FALLBACK_ALL_OBLIGATIONS,
        ] {
            assert!(obligations.contains(fallback), "missing fallback: {}", fallback);
        }

        // 詳細分析が無ければ節ごと省略（フォールバック文言も出さない）
        let risk = panels.get(PanelKind::Risk).expect("riskなし");
        assert!(find_by_class(&risk.nodes, "risk-details").is_none());
        assert!(!risk.plain_text().contains("Detailed Analysis"));
    }

    #[test]
    fn test_empty_reasons_render_empty_list() {
        let panels = render_all(&minimal_payload());
        let risk = panels.get(PanelKind::Risk).expect("riskなし");
        let reasons = find_by_class(&risk.nodes, "risk-reasons").expect("reasonsリストなし");
        assert!(matches!(reasons, Node::Element { tag: Tag::Ul, .. }));
        assert!(reasons.children().is_empty());
    }

    #[test]
    fn test_risk_badge_and_score() {
        let panels = render_all(&full_payload());
        let risk = panels.get(PanelKind::Risk).expect("riskなし");
        assert!(find_by_class(&risk.nodes, "risk-badge risk-high").is_some());
        assert!(risk.plain_text().starts_with("HIGH 7/10"));

        let fractional = RiskAssessment {
            risk_level: "Medium".to_string(),
            risk_score: 5.5,
            ..Default::default()
        };
        let nodes = render_risk(&fractional);
        assert!(find_by_class(&nodes, "risk-badge risk-medium").is_some());
        assert!(plain_text(&nodes).contains("5.5/10"));
    }

    #[test]
    fn test_multi_word_risk_level_is_one_class() {
        assert_eq!(risk_badge_class("VERY LOW"), "risk-badge risk-very-low");
        assert_eq!(risk_badge_class("  Very   High "), "risk-badge risk-very-high");

        let nodes = render_risk(&RiskAssessment {
            risk_level: "VERY LOW".to_string(),
            risk_score: 1.0,
            ..Default::default()
        });
        assert!(find_by_class(&nodes, "risk-badge risk-very-low").is_some());
        assert!(plain_text(&nodes).starts_with("VERY LOW 1/10"));
    }

    #[test]
    fn test_key_term_context_is_shown_when_present() {
        let terms = vec![
            KeyTerm {
                term: "Indemnify".to_string(),
                definition: "protect from loss or damage".to_string(),
                context: Some("Tenant shall indemnify the Landlord".to_string()),
            },
            KeyTerm {
                term: "Waiver".to_string(),
                definition: "giving up a right".to_string(),
                context: Some("  ".to_string()),
            },
        ];
        let nodes = render_key_terms(&terms);

        let context = nodes[0].find_by_class("term-context").expect("contextなし");
        assert_eq!(plain_text(std::slice::from_ref(context)), "Context: Tenant shall indemnify the Landlord");
        assert!(nodes[1].find_by_class("term-context").is_none());
    }

    #[test]
    fn test_timeline_type_becomes_item_class() {
        let summary = DetailedSummary {
            timeline: Some(vec![
                TimelineEvent {
                    event: "Lease start".to_string(),
                    date: "January 1, 2025".to_string(),
                    kind: Some("Start Date".to_string()),
                },
                TimelineEvent {
                    event: "Renewal".to_string(),
                    date: "December 1, 2025".to_string(),
                    kind: None,
                },
            ]),
            ..Default::default()
        };
        let nodes = render_summary(&summary);
        let timeline = find_by_class(&nodes, "timeline").expect("timelineなし");

        assert_eq!(timeline.children()[0].class(), Some("timeline-start-date"));
        assert_eq!(timeline.children()[1].class(), None);
        // 表示文言は種別の有無で変わらない
        assert!(plain_text(&nodes).contains("1. Lease start: January 1, 2025"));
        assert!(plain_text(&nodes).contains("2. Renewal: December 1, 2025"));
    }

    #[test]
    fn test_render_details_only_populated_parts() {
        let mut details = AnalysisDetails::default();
        assert!(render_details(&details).is_empty());

        details.entities.insert("parties".to_string(), vec!["Acme Corp".to_string(), "Jane Doe".to_string()]);
        details.entities.insert("dates".to_string(), Vec::new());
        details.sections.insert("payment_terms".to_string(), vec!["Rent is due on the 1st.".to_string()]);
        details.simplified_text = Some("You rent the flat for a year.".to_string());

        let nodes = render_details(&details);
        let text = plain_text(&nodes);
        assert!(text.contains("Parties: Acme Corp, Jane Doe"));
        assert!(!text.contains("Dates"));
        assert!(text.contains("Payment Terms"));
        assert!(text.contains("- Rent is due on the 1st."));
        assert!(text.contains("You rent the flat for a year."));
        assert!(find_by_class(&nodes, "simplified-text").is_some());
    }

    #[test]
    fn test_key_terms_shown_verbatim_including_empty_definition() {
        let panels = render_all(&full_payload());
        let terms = panels.get(PanelKind::KeyTerms).expect("key termsなし");
        assert_eq!(terms.nodes.len(), 2);
        let empty_card = &terms.nodes[1];
        let definition = empty_card.find_by_class("term-definition").expect("definitionなし");
        assert_eq!(definition.children(), &[Node::text("")]);
    }

    #[test]
    fn test_obligation_categories_are_independent() {
        let panels = render_all(&full_payload());
        let text = panels.get(PanelKind::Obligations).expect("obligationsなし").plain_text();
        assert!(text.contains("- Tenant must pay rent"));
        assert!(text.contains(FALLBACK_PAYMENT_OBLIGATIONS));
        assert!(text.contains(FALLBACK_PERFORMANCE_OBLIGATIONS));
        assert!(!text.contains(FALLBACK_CRITICAL_OBLIGATIONS));
        assert!(!text.contains(FALLBACK_ALL_OBLIGATIONS));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let payload = full_payload();
        let first = render_all(&payload);
        let second = render_all(&payload);
        assert_eq!(first, second);

        // 同じPanelsに2回描画しても蓄積しない
        let mut panels = Panels::default();
        project(&payload, |p| panels.set(p)).expect("描画失敗");
        project(&payload, |p| panels.set(p)).expect("描画失敗");
        assert_eq!(panels, first);
    }

    #[test]
    fn test_malformed_panel_keeps_earlier_panels() {
        let mut payload = full_payload();
        payload.risk_assessment = json!({ "riskScore": "not a number" });

        let mut panels = Panels::default();
        let err = project(&payload, |p| panels.set(p)).unwrap_err();
        assert_eq!(err.panel, PanelKind::Risk);

        assert!(panels.get(PanelKind::Summary).is_some());
        assert!(panels.get(PanelKind::KeyTerms).is_some());
        assert!(panels.get(PanelKind::Risk).is_none());
        assert!(panels.get(PanelKind::Obligations).is_none());
    }

    #[test]
    fn test_panels_clear() {
        let mut panels = render_all(&full_payload());
        assert!(!panels.is_empty());
        panels.clear();
        assert!(panels.is_empty());
        assert_eq!(panels.summary_text(), None);
    }
}
