use serde::{Deserialize, Serialize};

/// Mount targets owned by the page chrome. The mount step decides what each
/// one maps to on screen; the view layer only names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Container {
    TodaysFixtures,
    TomorrowsFixtures,
    LoadingIndicator,
}

impl Container {
    pub fn css_class(self) -> &'static str {
        match self {
            Container::TodaysFixtures => "todays-fixtures",
            Container::TomorrowsFixtures => "tomorrows-fixtures",
            Container::LoadingIndicator => "loading-indicator-container",
        }
    }
}

/// One side effect against the page. Rendering produces an ordered list of
/// these; applying them in order reproduces the page exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MountOp {
    Append { container: Container, node: Node },
    Clear { container: Container },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Block,
    Text(String),
    Image {
        src: String,
        alt: String,
    },
    NumberInput {
        name: String,
        value: Option<u8>,
        placeholder: String,
        disabled: bool,
    },
    Hidden {
        name: String,
        value: String,
    },
    Button {
        label: String,
        disabled: bool,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Node {
    fn with_kind(kind: NodeKind, class: &str) -> Self {
        Self {
            kind,
            classes: vec![class.to_string()],
            children: Vec::new(),
        }
    }

    pub fn block(class: &str) -> Self {
        Self::with_kind(NodeKind::Block, class)
    }

    pub fn text(content: impl Into<String>, class: &str) -> Self {
        Self::with_kind(NodeKind::Text(content.into()), class)
    }

    pub fn image(src: &str, alt: &str, class: &str) -> Self {
        Self::with_kind(
            NodeKind::Image {
                src: src.to_string(),
                alt: alt.to_string(),
            },
            class,
        )
    }

    pub fn number_input(
        name: &str,
        value: Option<u8>,
        placeholder: String,
        disabled: bool,
        class: &str,
    ) -> Self {
        Self::with_kind(
            NodeKind::NumberInput {
                name: name.to_string(),
                value,
                placeholder,
                disabled,
            },
            class,
        )
    }

    pub fn hidden(name: &str, value: String) -> Self {
        Self {
            kind: NodeKind::Hidden {
                name: name.to_string(),
                value,
            },
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn button(label: impl Into<String>, disabled: bool, class: &str) -> Self {
        Self::with_kind(
            NodeKind::Button {
                label: label.into(),
                disabled,
            },
            class,
        )
    }

    pub fn table(header: &[&str], rows: Vec<Vec<String>>, class: &str) -> Self {
        Self::with_kind(
            NodeKind::Table {
                header: header.iter().map(|h| h.to_string()).collect(),
                rows,
            },
            class,
        )
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first lookup by class.
    pub fn find(&self, class: &str) -> Option<&Node> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(class))
    }

    pub fn find_all<'a>(&'a self, class: &str, out: &mut Vec<&'a Node>) {
        if self.has_class(class) {
            out.push(self);
        }
        for child in &self.children {
            child.find_all(class, out);
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(content) => Some(content),
            _ => None,
        }
    }
}
