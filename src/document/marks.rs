//! Mark composition for styled text.

use super::node::TextNode;
use super::unit::{InlineUnit, Mark};

/// Wrap a text node's payload in every active style mark.
///
/// Marks nest in `Mark::COMPOSITION_ORDER`: code sits directly around the
/// text and bold is always outermost. A node with no flags yields the bare
/// text, and a node without a payload yields an empty unit.
pub fn compose_marks(node: &TextNode) -> InlineUnit {
    let Some(text) = node.text.as_deref() else {
        return InlineUnit::Empty;
    };

    Mark::COMPOSITION_ORDER
        .iter()
        .filter(|mark| is_active(node, **mark))
        .fold(InlineUnit::text(text), |inner, mark| {
            InlineUnit::marked(*mark, inner)
        })
}

fn is_active(node: &TextNode, mark: Mark) -> bool {
    match mark {
        Mark::Code => node.code,
        Mark::Strikethrough => node.strikethrough,
        Mark::Underline => node.underline,
        Mark::Italic => node.italic,
        Mark::Bold => node.bold,
    }
}
