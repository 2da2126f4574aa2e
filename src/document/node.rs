//! Wire types for rich content documents.
//!
//! Every node is decoded on its own: a node with a field of the wrong type
//! becomes `Malformed`, an unrecognised `type` becomes `Unknown`, and both
//! render to nothing without affecting their siblings. Optional structure is
//! modelled with explicit `Option` fields instead of permissive lookups.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// A content body as fetched from the content store.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Legacy plain-text body: blank-line separated paragraphs and bullet blocks
    Plain(String),

    /// Structured body: ordered block nodes
    Blocks(Vec<BlockNode>),
}

impl Document {
    /// Decode a document from its JSON wire shape.
    ///
    /// Anything that is neither a string nor an array decodes to an empty
    /// block document.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Document::Plain(text),
            Value::Array(items) => {
                Document::Blocks(items.into_iter().map(decode_lenient).collect())
            }
            Value::Null => Document::Blocks(Vec::new()),
            other => {
                debug!("Ignoring document body of unexpected shape: {}", other);
                Document::Blocks(Vec::new())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Document::from_value)
    }
}

/// A top-level block node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockNode {
    Paragraph(ParagraphNode),
    Heading(HeadingNode),
    List(ListNode),
    Quote(QuoteNode),
    Image(ImageNode),
    Code(CodeNode),

    /// A node whose fields could not be decoded
    #[serde(skip)]
    Malformed,

    /// A block type this renderer does not know
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParagraphNode {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<InlineNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeadingNode {
    /// Raw level as authored; clamped when rendered
    #[serde(default, deserialize_with = "lenient_option")]
    pub level: Option<i64>,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<InlineNode>,
}

/// Ordering of a list block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    #[default]
    Unordered,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListNode {
    #[serde(default, deserialize_with = "lenient_option")]
    pub format: Option<ListFormat>,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<ListItemNode>,
}

impl ListNode {
    pub fn is_ordered(&self) -> bool {
        self.format == Some(ListFormat::Ordered)
    }
}

/// One item of a list block. Its own `type` tag is not checked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListItemNode {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<InlineNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuoteNode {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<InlineNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageNode {
    #[serde(default, deserialize_with = "lenient_option")]
    pub image: Option<MediaRef>,
}

/// Media library entry referenced by an image block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    #[serde(default, deserialize_with = "lenient_option")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient_option")]
    pub alternative_text: Option<String>,

    #[serde(default, deserialize_with = "lenient_option")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodeNode {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<InlineNode>,
}

impl CodeNode {
    /// Literal text of the first child. Further children are ignored.
    pub fn literal(&self) -> &str {
        match self.children.first() {
            Some(InlineNode::Text(node)) => node.text.as_deref().unwrap_or(""),
            _ => "",
        }
    }
}

/// An inline node inside a block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InlineNode {
    Text(TextNode),
    Link(LinkNode),

    #[serde(skip)]
    Malformed,

    #[serde(other)]
    Unknown,
}

/// Text with independent style flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextNode {
    #[serde(default, deserialize_with = "lenient_option")]
    pub text: Option<String>,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub bold: bool,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub italic: bool,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub underline: bool,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub strikethrough: bool,

    #[serde(default, deserialize_with = "lenient_flag")]
    pub code: bool,
}

impl TextNode {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkNode {
    #[serde(default, deserialize_with = "lenient_option")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient_vec")]
    pub children: Vec<InlineNode>,
}

// ==================== Lenient decoding ====================

/// Nodes that have a stand-in value when their own fields fail to decode.
trait Lenient: DeserializeOwned {
    fn malformed() -> Self;
}

impl Lenient for BlockNode {
    fn malformed() -> Self {
        BlockNode::Malformed
    }
}

impl Lenient for InlineNode {
    fn malformed() -> Self {
        InlineNode::Malformed
    }
}

impl Lenient for ListItemNode {
    fn malformed() -> Self {
        ListItemNode::default()
    }
}

fn decode_lenient<T: Lenient>(value: Value) -> T {
    match serde_json::from_value(value) {
        Ok(node) => node,
        Err(e) => {
            debug!("Dropping malformed content node: {}", e);
            T::malformed()
        }
    }
}

/// Children arrays: each element decoded on its own; a non-array is empty.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Lenient,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(decode_lenient).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Optional fields: a value of the wrong type reads as absent.
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Style flags: only a literal `true` sets the flag.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
