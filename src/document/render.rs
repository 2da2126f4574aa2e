//! Document tree rendering.

use super::block::render_block;
use super::media::MediaResolver;
use super::node::Document;
use super::plain::render_plain;
use super::unit::RenderedBlock;

/// Renders whole documents.
///
/// Rendering is pure: the same document always yields the same blocks, and
/// one renderer can be shared across concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    media: MediaResolver,
}

impl Renderer {
    pub fn new(media: MediaResolver) -> Self {
        Self { media }
    }

    /// Render a document into position-keyed blocks.
    ///
    /// Block documents yield exactly one block per node, in input order,
    /// with unknown and malformed nodes as empty units. Plain-text
    /// documents yield one block per non-empty segment.
    pub fn render(&self, document: &Document) -> Vec<RenderedBlock> {
        let units = match document {
            Document::Blocks(nodes) => nodes
                .iter()
                .map(|node| render_block(node, &self.media))
                .collect::<Vec<_>>(),
            Document::Plain(text) => render_plain(text),
        };

        units
            .into_iter()
            .enumerate()
            .map(|(key, unit)| RenderedBlock { key, unit })
            .collect()
    }
}
