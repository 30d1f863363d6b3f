//! Plain-text rendering of reply blocks for terminals.

use diligence_chat_core::{Block, Span};

/// Renders `blocks` as lines of text.
///
/// Paragraphs are separated by blank lines, bullet items are prefixed with
/// `•`, and emphasized spans are passed through `emphasize` so callers can
/// decorate them (e.g. with ANSI bold).
pub fn render_blocks<F>(blocks: &[Block], emphasize: F) -> String
where
    F: Fn(&str) -> String,
{
    let rendered: Vec<String> = blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(spans) => render_spans(spans, &emphasize),
            Block::BulletList(items) => items
                .iter()
                .map(|item| format!("• {}", render_spans(item, &emphasize)))
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect();
    rendered.join("\n\n")
}

fn render_spans<F>(spans: &[Span], emphasize: &F) -> String
where
    F: Fn(&str) -> String,
{
    spans
        .iter()
        .map(|span| match span {
            Span::PlainText(text) => text.clone(),
            Span::Emphasis(text) => emphasize(text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use diligence_chat_core::TextBlockFormatter;

    use super::*;

    #[test]
    fn test_render_blocks() {
        let blocks = TextBlockFormatter::new()
            .format("Highlights:\n• **_ARR_** $1M\n• 40 customers\nThanks");
        let rendered = render_blocks(&blocks, |s| format!("<{s}>"));
        assert_eq!(
            rendered,
            "Highlights:\n\n• <ARR> $1M\n• 40 customers\n\nThanks"
        );
    }
}
