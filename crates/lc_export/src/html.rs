use crate::markup::{self, Block, Span};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.bold {
                format!("<strong>{}</strong>", escape(&span.text))
            } else {
                escape(&span.text)
            }
        })
        .collect()
}

/// CMS-ready HTML, one element per source line.
pub fn to_html(text: &str) -> String {
    markup::parse(text)
        .iter()
        .map(|block| match block {
            Block::Blank => "<br>".to_string(),
            Block::Heading { level, spans } => format!("<h{0}>{1}</h{0}>", level, render_spans(spans)),
            Block::ListItem(spans) => format!("<li>{}</li>", render_spans(spans)),
            Block::Paragraph(spans) => format!("<p>{}</p>", render_spans(spans)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_bold_paragraph() {
        assert_eq!(
            to_html("# Title\n\nBody **bold** text"),
            "<h1>Title</h1>\n<br>\n<p>Body <strong>bold</strong> text</p>"
        );
    }

    #[test]
    fn test_lists_and_subheadings() {
        let html = to_html("## Strafen\n### Geldstrafe\n- bis zu 5 Jahre\n• **Haft**");
        assert_eq!(
            html,
            "<h2>Strafen</h2>\n<h3>Geldstrafe</h3>\n<li>bis zu 5 Jahre</li>\n<li><strong>Haft</strong></li>"
        );
    }

    #[test]
    fn test_escapes_markup_characters() {
        assert_eq!(to_html("a < b & c > d"), "<p>a &lt; b &amp; c &gt; d</p>");
    }
}
