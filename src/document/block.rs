//! Block node dispatch.

use super::inline::{plain_text, render_inlines};
use super::media::MediaResolver;
use super::node::{BlockNode, ImageNode};
use super::unit::{BlockUnit, HeadingLevel, ResolvedImage};

/// Render one block node.
///
/// Each block type maps to exactly one unit shape; unknown and malformed
/// blocks render as `BlockUnit::Empty`.
pub fn render_block(node: &BlockNode, media: &MediaResolver) -> BlockUnit {
    match node {
        BlockNode::Paragraph(paragraph) => BlockUnit::Paragraph {
            children: render_inlines(&paragraph.children),
        },
        BlockNode::Heading(heading) => BlockUnit::Heading {
            level: HeadingLevel::from_raw(heading.level),
            children: render_inlines(&heading.children),
        },
        BlockNode::List(list) => BlockUnit::List {
            ordered: list.is_ordered(),
            items: list
                .children
                .iter()
                .map(|item| render_inlines(&item.children))
                .collect(),
        },
        // Author and role are not part of a quote block
        BlockNode::Quote(quote) => BlockUnit::Quote {
            text: plain_text(&quote.children),
            author: None,
            role: None,
        },
        BlockNode::Image(image) => render_image(image, media),
        BlockNode::Code(code) => BlockUnit::Code {
            code: code.literal().to_string(),
        },
        BlockNode::Unknown | BlockNode::Malformed => BlockUnit::Empty,
    }
}

fn render_image(node: &ImageNode, media: &MediaResolver) -> BlockUnit {
    let Some(reference) = &node.image else {
        return BlockUnit::Empty;
    };

    let image = reference
        .url
        .as_deref()
        .and_then(|url| media.resolve(url))
        .map(|src| ResolvedImage {
            src,
            alt: reference.alternative_text.clone().unwrap_or_default(),
        });

    let caption = reference
        .caption
        .as_deref()
        .map(str::trim)
        .filter(|caption| !caption.is_empty())
        .map(str::to_string);

    if image.is_none() && caption.is_none() {
        return BlockUnit::Empty;
    }

    BlockUnit::Image { image, caption }
}
