//! Plain-text document fallback.
//!
//! Older entries store their body as a single string: paragraphs separated
//! by blank lines, and bullet blocks whose lines start with `•`.

use super::unit::{BlockUnit, InlineUnit};
use regex::Regex;
use std::sync::OnceLock;

/// Marker that opens a bullet line.
pub const BULLET_MARKER: char = '•';

static BLANK_LINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn blank_line_regex() -> &'static Regex {
    BLANK_LINE_REGEX.get_or_init(|| {
        Regex::new(r"\n(?:[ \t]*\n)+").expect("Blank line regex should be valid")
    })
}

/// Render a plain-text document, one unit per non-empty segment.
///
/// A segment whose first non-whitespace character is the bullet marker
/// becomes a list with one item per marker line. Lines without a marker
/// inside such a segment continue the previous item. Any other segment
/// becomes a single paragraph.
pub fn render_plain(text: &str) -> Vec<BlockUnit> {
    let normalized = text.replace("\r\n", "\n");

    blank_line_regex()
        .split(&normalized)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(render_segment)
        .collect()
}

fn render_segment(segment: &str) -> BlockUnit {
    if !segment.starts_with(BULLET_MARKER) {
        return BlockUnit::Paragraph {
            children: vec![InlineUnit::text(segment)],
        };
    }

    let mut items: Vec<String> = Vec::new();
    for line in segment.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix(BULLET_MARKER) {
            items.push(rest.trim().to_string());
        } else if let Some(last) = items.last_mut() {
            if !line.is_empty() {
                if !last.is_empty() {
                    last.push(' ');
                }
                last.push_str(line);
            }
        }
    }

    BlockUnit::List {
        ordered: false,
        items: items
            .into_iter()
            .map(|item| vec![InlineUnit::text(item)])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paragraph(text: &str) -> BlockUnit {
        BlockUnit::Paragraph {
            children: vec![InlineUnit::text(text)],
        }
    }

    fn list(items: &[&str]) -> BlockUnit {
        BlockUnit::List {
            ordered: false,
            items: items.iter().map(|item| vec![InlineUnit::text(*item)]).collect(),
        }
    }

    // ==================== Paragraph Tests ====================

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let units = render_plain("First.\n\nSecond.\n\n\nThird.");
        assert_eq!(
            units,
            vec![paragraph("First."), paragraph("Second."), paragraph("Third.")]
        );
    }

    #[test]
    fn test_single_newline_stays_in_paragraph() {
        let units = render_plain("Line one\nline two");
        assert_eq!(units, vec![paragraph("Line one\nline two")]);
    }

    #[test]
    fn test_whitespace_only_lines_separate_segments() {
        let units = render_plain("A\n   \t\nB");
        assert_eq!(units, vec![paragraph("A"), paragraph("B")]);
    }

    #[test]
    fn test_crlf_input() {
        let units = render_plain("A\r\n\r\nB");
        assert_eq!(units, vec![paragraph("A"), paragraph("B")]);
    }

    #[test]
    fn test_empty_and_blank_documents() {
        assert!(render_plain("").is_empty());
        assert!(render_plain("\n\n  \n").is_empty());
    }

    // ==================== Bullet Tests ====================

    #[test]
    fn test_intro_then_bullets() {
        let units = render_plain("Intro line.\n\n• First\n• Second");
        assert_eq!(units, vec![paragraph("Intro line."), list(&["First", "Second"])]);
    }

    #[test]
    fn test_bullet_segment_with_leading_whitespace() {
        let units = render_plain("   •  Indented\n  •Tight");
        assert_eq!(units, vec![list(&["Indented", "Tight"])]);
    }

    #[test]
    fn test_continuation_line_joins_previous_item() {
        let units = render_plain("• First item\n  wraps here\n• Second");
        assert_eq!(units, vec![list(&["First item wraps here", "Second"])]);
    }

    #[test]
    fn test_marker_mid_paragraph_is_not_a_list() {
        let units = render_plain("Prices • from 10€\n• not a list here");
        assert_eq!(units, vec![paragraph("Prices • from 10€\n• not a list here")]);
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_one_paragraph_per_segment(segments in prop::collection::vec("[a-z][a-z .]{0,15}", 1..8)) {
            let text = segments.join("\n\n");
            let units = render_plain(&text);

            prop_assert_eq!(units.len(), segments.len());
            for (unit, segment) in units.iter().zip(&segments) {
                prop_assert_eq!(unit, &paragraph(segment.trim()));
            }
        }

        #[test]
        fn prop_bullet_count_matches_marker_lines(items in prop::collection::vec("[a-z]{1,10}", 1..10)) {
            let text = items
                .iter()
                .map(|item| format!("• {}", item))
                .collect::<Vec<_>>()
                .join("\n");

            let units = render_plain(&text);
            prop_assert_eq!(units.len(), 1);
            let BlockUnit::List { items: rendered, .. } = &units[0] else {
                panic!("Expected list");
            };
            prop_assert_eq!(rendered.len(), items.len());
        }
    }
}
