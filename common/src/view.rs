//! パネル表示用のビューモデル
//!
//! HTML文字列は組み立てず、型付きノードの木で表現する。
//! ブラウザ側はこれをそのままDOMに変換し、CLIはプレーンテキストにする。

/// 要素タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    H3,
    H4,
    P,
    Ul,
    Ol,
    Li,
    Span,
    Strong,
}

impl Tag {
    fn is_block(&self) -> bool {
        !matches!(self, Tag::Span | Tag::Strong)
    }
}

/// ビューモデルのノード
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element {
        tag: Tag,
        class: Option<String>,
        children: Vec<Node>,
    },
    /// クリックすると質問欄にこの文言を入れる
    Suggestion(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn element(tag: Tag, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class: None,
            children,
        }
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        match self {
            Node::Element { tag, children, .. } => Node::Element {
                tag,
                class: Some(class.into()),
                children,
            },
            other => other,
        }
    }

    pub fn div(class: &str, children: Vec<Node>) -> Self {
        Node::element(Tag::Div, children).with_class(class)
    }

    pub fn heading(tag: Tag, text: impl Into<String>) -> Self {
        Node::element(tag, vec![Node::text(text)])
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::element(Tag::P, vec![Node::text(text)])
    }

    /// `<p><strong>label:</strong> value</p>`
    pub fn labeled(label: &str, value: impl Into<String>) -> Self {
        Node::element(
            Tag::P,
            vec![
                Node::element(Tag::Strong, vec![Node::text(format!("{}:", label))]),
                Node::text(format!(" {}", value.into())),
            ],
        )
    }

    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tag = if ordered { Tag::Ol } else { Tag::Ul };
        Node::element(
            tag,
            items
                .into_iter()
                .map(|item| Node::element(Tag::Li, vec![Node::text(item)]))
                .collect(),
        )
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Element { class, .. } => class.as_deref(),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// 深さ優先でクラス名が一致する最初の要素を探す
    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        if self.class() == Some(class) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_class(class))
    }
}

/// クラス名でノード列から要素を探す
pub fn find_by_class<'a>(nodes: &'a [Node], class: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| node.find_by_class(class))
}

/// ノード列をプレーンテキストに変換
///
/// ブロック要素ごとに改行し、リスト項目には `- ` / `1. ` を付ける。
pub fn plain_text(nodes: &[Node]) -> String {
    let mut writer = TextWriter::default();
    for node in nodes {
        writer.write(node);
    }
    writer.finish()
}

#[derive(Default)]
struct TextWriter {
    lines: Vec<String>,
    current: String,
}

impl TextWriter {
    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        let line = line.trim_end();
        if !line.trim().is_empty() {
            self.lines.push(line.to_string());
        }
    }

    fn write(&mut self, node: &Node) {
        match node {
            Node::Text(text) | Node::Suggestion(text) => self.current.push_str(text),
            Node::Element { tag, children, .. } => match tag {
                Tag::Ul | Tag::Ol => {
                    self.break_line();
                    for (i, child) in children.iter().enumerate() {
                        if *tag == Tag::Ol {
                            self.current.push_str(&format!("{}. ", i + 1));
                        } else {
                            self.current.push_str("- ");
                        }
                        match child {
                            Node::Element { tag: Tag::Li, children, .. } => {
                                children.iter().for_each(|c| self.write(c))
                            }
                            other => self.write(other),
                        }
                        self.break_line();
                    }
                }
                tag if tag.is_block() => {
                    self.break_line();
                    children.iter().for_each(|c| self.write(c));
                    self.break_line();
                }
                _ => children.iter().for_each(|c| self.write(c)),
            },
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}
