//! Inline node dispatch.

use super::marks::compose_marks;
use super::node::InlineNode;
use super::unit::InlineUnit;
use tracing::debug;

/// Link schemes allowed in rendered output.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// Whether `url` is relative or uses an allowed scheme. Whitespace and
/// control characters are skipped while reading the scheme, as browsers do.
fn is_allowed_href(url: &str) -> bool {
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    let Some(colon) = compact.find(':') else {
        return true;
    };
    let head = &compact[..colon];

    // A colon after the first path, query or fragment character is not a scheme
    if head.contains(|c: char| c == '/' || c == '?' || c == '#') {
        return true;
    }

    ALLOWED_SCHEMES
        .iter()
        .any(|scheme| head.eq_ignore_ascii_case(scheme))
}

/// Render one inline node.
///
/// Text goes through mark composition; links render their children
/// recursively. Unknown and malformed nodes, and links without a usable
/// URL or with a disallowed scheme (`javascript:`, `data:`), render as
/// empty units.
pub fn render_inline(node: &InlineNode) -> InlineUnit {
    match node {
        InlineNode::Text(text) => compose_marks(text),
        InlineNode::Link(link) => match link.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && is_allowed_href(url) => {
                InlineUnit::link(url, render_inlines(&link.children))
            }
            Some(url) if !url.is_empty() => {
                debug!("Dropping link with disallowed scheme: {}", url);
                InlineUnit::Empty
            }
            _ => InlineUnit::Empty,
        },
        InlineNode::Unknown | InlineNode::Malformed => InlineUnit::Empty,
    }
}

/// Render a sequence of inline nodes, one unit per node.
pub(crate) fn render_inlines(nodes: &[InlineNode]) -> Vec<InlineUnit> {
    nodes.iter().map(render_inline).collect()
}

/// Concatenated text of inline nodes, ignoring styling and link targets.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    push_plain_text(nodes, &mut out);
    out
}

fn push_plain_text(nodes: &[InlineNode], out: &mut String) {
    for node in nodes {
        match node {
            InlineNode::Text(text) => out.push_str(text.text.as_deref().unwrap_or("")),
            InlineNode::Link(link) => push_plain_text(&link.children, out),
            InlineNode::Unknown | InlineNode::Malformed => {}
        }
    }
}
