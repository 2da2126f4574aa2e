//! HTML serialisation of rendered blocks.

use super::unit::{BlockUnit, InlineUnit, RenderedBlock};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Serialise rendered blocks to an HTML fragment.
///
/// Empty units produce no markup. Quotes are emitted in the markup the
/// quote presentation component expects.
pub fn to_html(blocks: &[RenderedBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        push_block(&block.unit, &mut out);
    }
    out
}

fn push_block(unit: &BlockUnit, out: &mut String) {
    match unit {
        BlockUnit::Paragraph { children } => {
            out.push_str("<p>");
            push_inlines(children, out);
            out.push_str("</p>\n");
        }
        BlockUnit::Heading { level, children } => {
            let level = level.as_u8();
            out.push_str(&format!("<h{}>", level));
            push_inlines(children, out);
            out.push_str(&format!("</h{}>\n", level));
        }
        BlockUnit::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{}>\n", tag));
            for item in items {
                out.push_str("<li>");
                push_inlines(item, out);
                out.push_str("</li>\n");
            }
            out.push_str(&format!("</{}>\n", tag));
        }
        BlockUnit::Quote { text, author, role } => {
            out.push_str("<blockquote class=\"quote\">");
            out.push_str(&format!("<p>{}</p>", encode_text(text)));
            if author.is_some() || role.is_some() {
                out.push_str("<footer>");
                if let Some(author) = author {
                    out.push_str(&format!("<cite>{}</cite>", encode_text(author)));
                }
                if let Some(role) = role {
                    out.push_str(&format!("<span class=\"role\">{}</span>", encode_text(role)));
                }
                out.push_str("</footer>");
            }
            out.push_str("</blockquote>\n");
        }
        BlockUnit::Image { image, caption } => {
            out.push_str("<figure>");
            if let Some(image) = image {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                    encode_double_quoted_attribute(&image.src),
                    encode_double_quoted_attribute(&image.alt)
                ));
            }
            if let Some(caption) = caption {
                out.push_str(&format!("<figcaption>{}</figcaption>", encode_text(caption)));
            }
            out.push_str("</figure>\n");
        }
        BlockUnit::Code { code } => {
            out.push_str(&format!("<pre><code>{}</code></pre>\n", encode_text(code)));
        }
        BlockUnit::Empty => {}
    }
}

fn push_inlines(units: &[InlineUnit], out: &mut String) {
    for unit in units {
        push_inline(unit, out);
    }
}

fn push_inline(unit: &InlineUnit, out: &mut String) {
    match unit {
        InlineUnit::Text { text } => out.push_str(&encode_text(text)),
        InlineUnit::Marked { mark, content } => {
            out.push_str(&format!("<{}>", mark.tag()));
            push_inline(content, out);
            out.push_str(&format!("</{}>", mark.tag()));
        }
        InlineUnit::Link(link) => {
            out.push_str(&format!(
                "<a href=\"{}\" target=\"{}\" rel=\"{}\">",
                encode_double_quoted_attribute(link.href()),
                link.target(),
                link.rel()
            ));
            push_inlines(link.children(), out);
            out.push_str("</a>");
        }
        InlineUnit::Empty => {}
    }
}
