//! Turns a reply into paragraphs and bullet lists.
//!
//! Replies use a tiny markup: lines starting with `•` are list items and
//! `**_text_**` marks emphasis. Everything else is a paragraph, one per
//! line.

use regex::Regex;

const BULLET: char = '•';
const EMPHASIS_PATTERN: &str = r"\*\*_(.*?)_\*\*";

/// An inline run of text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Span {
    /// Text without decoration.
    PlainText(String),
    /// Emphasized text, markers stripped.
    Emphasis(String),
}

/// A renderable block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Block {
    /// A single paragraph.
    Paragraph(Vec<Span>),
    /// Consecutive bullet items, in order.
    BulletList(Vec<Vec<Span>>),
}

/// Splits reply text into [`Block`]s.
#[derive(Clone, Debug)]
pub struct TextBlockFormatter {
    emphasis: Regex,
}

impl Default for TextBlockFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBlockFormatter {
    /// Creates a formatter.
    pub fn new() -> Self {
        Self {
            emphasis: Regex::new(EMPHASIS_PATTERN)
                .expect("valid emphasis pattern"),
        }
    }

    /// Formats `text`.
    ///
    /// Text without any non-blank line comes back untouched as a single
    /// plain paragraph.
    pub fn format(&self, text: &str) -> Vec<Block> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return vec![Block::Paragraph(vec![Span::PlainText(
                text.to_owned(),
            )])];
        }

        let mut blocks = Vec::new();
        let mut items = Vec::new();
        for line in lines {
            if let Some(item) = line.strip_prefix(BULLET) {
                items.push(self.spans(item.trim_start()));
                continue;
            }
            if !items.is_empty() {
                blocks.push(Block::BulletList(std::mem::take(&mut items)));
            }
            blocks.push(Block::Paragraph(self.spans(line)));
        }
        if !items.is_empty() {
            blocks.push(Block::BulletList(items));
        }
        blocks
    }

    /// Splits a line into plain and emphasized spans, dropping empty ones.
    pub fn spans(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut last = 0;
        for caps in self.emphasis.captures_iter(text) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_plain(&mut spans, &text[last..whole.start()]);
            if !inner.as_str().is_empty() {
                spans.push(Span::Emphasis(inner.as_str().to_owned()));
            }
            last = whole.end();
        }
        push_plain(&mut spans, &text[last..]);
        spans
    }
}

#[inline]
fn push_plain(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::PlainText(text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Span {
        Span::PlainText(s.to_owned())
    }

    fn emphasis(s: &str) -> Span {
        Span::Emphasis(s.to_owned())
    }

    #[test]
    fn test_bullets_then_paragraph() {
        let blocks = TextBlockFormatter::new().format("• one\n• two\nplain line");
        assert_eq!(
            blocks,
            [
                Block::BulletList(vec![vec![plain("one")], vec![plain("two")]]),
                Block::Paragraph(vec![plain("plain line")]),
            ]
        );
    }

    #[test]
    fn test_emphasis() {
        let formatter = TextBlockFormatter::new();
        assert_eq!(
            formatter.format("**_bold_** text"),
            [Block::Paragraph(vec![emphasis("bold"), plain(" text")])]
        );
        assert_eq!(
            formatter.spans("a **_b_** c **_d_**"),
            [plain("a "), emphasis("b"), plain(" c "), emphasis("d")]
        );
        assert_eq!(formatter.spans("no **markers_ here"), [plain("no **markers_ here")]);
        assert_eq!(formatter.spans("a **__** b"), [plain("a "), plain(" b")]);
    }

    #[test]
    fn test_mixed_layout() {
        let text = "Intro\r\n\n  • **_ARR_**: $1M  \n•growth 3x\n\nOutro\n• last";
        let blocks = TextBlockFormatter::new().format(text);
        assert_eq!(
            blocks,
            [
                Block::Paragraph(vec![plain("Intro")]),
                Block::BulletList(vec![
                    vec![emphasis("ARR"), plain(": $1M")],
                    vec![plain("growth 3x")],
                ]),
                Block::Paragraph(vec![plain("Outro")]),
                Block::BulletList(vec![vec![plain("last")]]),
            ]
        );
    }

    #[test]
    fn test_blank_input_is_preserved() {
        let formatter = TextBlockFormatter::new();
        assert_eq!(
            formatter.format("  \n\t"),
            [Block::Paragraph(vec![plain("  \n\t")])]
        );
        assert_eq!(formatter.format(""), [Block::Paragraph(vec![plain("")])]);
    }
}
