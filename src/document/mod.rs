//! Rich content rendering.
//!
//! Documents arrive from the content store either as a plain string or as a
//! JSON array of block nodes. Rendering turns them into an ordered list of
//! typed units, one per input node, that can be serialised to JSON or HTML.
//!
//! # Pipeline
//!
//! - `node`: wire types, decoded leniently so one bad node never spoils a page
//! - `marks`: nests text in its style marks in a fixed order
//! - `inline`: text and link nodes
//! - `block`: paragraph, heading, list, quote, image and code nodes
//! - `plain`: blank-line separated plain-text documents
//! - `render`: walks a whole document
//! - `html`: serialises rendered units to HTML
//!
//! # Example
//!
//! ```rust,ignore
//! use content_locale::document::{Document, MediaResolver, Renderer};
//!
//! let document: Document = serde_json::from_str(body)?;
//! let renderer = Renderer::new(MediaResolver::new("https://cms.example.com"));
//! let html = content_locale::document::to_html(&renderer.render(&document));
//! ```

mod block;
mod html;
mod inline;
mod marks;
mod media;
mod node;
mod plain;
mod render;
mod unit;

pub use block::render_block;
pub use html::to_html;
pub use inline::{plain_text, render_inline};
pub use marks::compose_marks;
pub use media::MediaResolver;
pub use node::{
    BlockNode, CodeNode, Document, HeadingNode, ImageNode, InlineNode, LinkNode, ListFormat,
    ListItemNode, ListNode, MediaRef, ParagraphNode, QuoteNode, TextNode,
};
pub use plain::{render_plain, BULLET_MARKER};
pub use render::Renderer;
pub use unit::{
    BlockUnit, HeadingLevel, InlineUnit, LinkUnit, Mark, RenderedBlock, ResolvedImage,
    LINK_REL, LINK_TARGET,
};
