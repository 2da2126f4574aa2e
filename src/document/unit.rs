//! Rendered units: the typed output of the renderer.

use serde::Serialize;

/// Links always open in a new browsing context.
pub const LINK_TARGET: &str = "_blank";

/// Links never leak the referrer or an opener handle.
pub const LINK_REL: &str = "noopener noreferrer";

/// A text style applied around an inline unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Code,
    Strikethrough,
    Underline,
    Italic,
    Bold,
}

impl Mark {
    /// Order in which marks wrap text, innermost first.
    pub const COMPOSITION_ORDER: [Mark; 5] = [
        Mark::Code,
        Mark::Strikethrough,
        Mark::Underline,
        Mark::Italic,
        Mark::Bold,
    ];

    /// HTML element used for this mark.
    pub fn tag(&self) -> &'static str {
        match self {
            Mark::Code => "code",
            Mark::Strikethrough => "s",
            Mark::Underline => "u",
            Mark::Italic => "em",
            Mark::Bold => "strong",
        }
    }
}

/// Rendered inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineUnit {
    Text { text: String },
    Marked { mark: Mark, content: Box<InlineUnit> },
    Link(LinkUnit),
    Empty,
}

impl InlineUnit {
    pub fn text(text: impl Into<String>) -> Self {
        InlineUnit::Text { text: text.into() }
    }

    pub fn marked(mark: Mark, content: InlineUnit) -> Self {
        InlineUnit::Marked {
            mark,
            content: Box::new(content),
        }
    }

    pub fn link(href: impl Into<String>, children: Vec<InlineUnit>) -> Self {
        InlineUnit::Link(LinkUnit {
            href: href.into(),
            target: LINK_TARGET,
            rel: LINK_REL,
            children,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InlineUnit::Empty)
    }

    /// Marks wrapping this unit, outermost first.
    pub fn marks(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        let mut current = self;
        while let InlineUnit::Marked { mark, content } = current {
            marks.push(*mark);
            current = content;
        }
        marks
    }
}

/// An anchor. Target and rel are fixed by `InlineUnit::link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkUnit {
    href: String,
    target: &'static str,
    rel: &'static str,
    children: Vec<InlineUnit>,
}

impl LinkUnit {
    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn rel(&self) -> &'static str {
        self.rel
    }

    pub fn children(&self) -> &[InlineUnit] {
        &self.children
    }
}

/// Heading presentation level. Only 2 through 6 are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Map an authored level to its presentation. Anything outside 2..=6,
    /// including a missing level, is shown as level 2.
    pub fn from_raw(level: Option<i64>) -> Self {
        match level {
            Some(3) => HeadingLevel::H3,
            Some(4) => HeadingLevel::H4,
            Some(5) => HeadingLevel::H5,
            Some(6) => HeadingLevel::H6,
            _ => HeadingLevel::H2,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

/// An image whose media reference resolved to a displayable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub src: String,
    pub alt: String,
}

/// Rendered block content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockUnit {
    Paragraph {
        children: Vec<InlineUnit>,
    },
    Heading {
        level: HeadingLevel,
        children: Vec<InlineUnit>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<InlineUnit>>,
    },
    /// Input for the quote presentation component
    Quote {
        text: String,
        author: Option<String>,
        role: Option<String>,
    },
    Image {
        image: Option<ResolvedImage>,
        caption: Option<String>,
    },
    Code {
        code: String,
    },
    Empty,
}

impl BlockUnit {
    pub fn is_empty(&self) -> bool {
        matches!(self, BlockUnit::Empty)
    }
}

/// A block unit keyed by its position in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    pub key: usize,
    #[serde(flatten)]
    pub unit: BlockUnit,
}
