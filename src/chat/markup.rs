//! The small markup dialect bot replies may use: `**bold**`, `*italic*`, line breaks and `•`
//! bullets.
//!
//! Reply text is untrusted. It is parsed into typed segments and renderers only ever emit
//! those constructs; the HTML renderer escapes every piece of text before wrapping it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Bold(String),
    Italic(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Bold(text) | Segment::Italic(text) => text,
        }
    }
}

pub type MarkupLine = Vec<Segment>;

/// Splits `text` into lines of segments. Unpaired markers are kept as literal text.
pub fn parse(text: &str) -> Vec<MarkupLine> {
    text.split('\n')
        .map(|line| parse_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn parse_line(line: &str) -> MarkupLine {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                flush_plain(&mut plain, &mut segments);
                segments.push(Segment::Bold(after[..end].to_string()));
                rest = &after[end + 2..];
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('*') {
            if let Some(end) = after.find('*') {
                flush_plain(&mut plain, &mut segments);
                segments.push(Segment::Italic(after[..end].to_string()));
                rest = &after[end + 1..];
                continue;
            }
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            plain.push(ch);
        }
        rest = chars.as_str();
    }

    flush_plain(&mut plain, &mut segments);
    segments
}

fn flush_plain(plain: &mut String, segments: &mut MarkupLine) {
    if !plain.is_empty() {
        segments.push(Segment::Plain(std::mem::take(plain)));
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '•' => escaped.push_str("&bull;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders bot markup as an HTML fragment. Only `<strong>`, `<em>` and `<br>` are produced.
pub fn to_html(text: &str) -> String {
    parse(text)
        .iter()
        .map(|line| {
            line.iter()
                .map(|segment| match segment {
                    Segment::Plain(text) => escape_html(text),
                    Segment::Bold(text) => format!("<strong>{}</strong>", escape_html(text)),
                    Segment::Italic(text) => format!("<em>{}</em>", escape_html(text)),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_and_italic() {
        let lines = parse("**Punjab** is *over-exploited* now");
        assert_eq!(lines, vec![vec![
            Segment::Bold("Punjab".to_string()),
            Segment::Plain(" is ".to_string()),
            Segment::Italic("over-exploited".to_string()),
            Segment::Plain(" now".to_string()),
        ]]);
    }

    #[test]
    fn test_lines_and_bullets() {
        let lines = parse("I can help with:\r\n• Water level monitoring\n\n• Regional reports");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], vec![Segment::Plain("• Water level monitoring".to_string())]);
        assert!(lines[2].is_empty());
    }

    #[test]
    fn test_unpaired_markers_stay_literal() {
        assert_eq!(parse("2 * 3 = 6"), vec![vec![Segment::Plain("2 * 3 = 6".to_string())]]);
        assert_eq!(parse("**open"), vec![vec![Segment::Plain("**open".to_string())]]);
    }

    #[test]
    fn test_markers_do_not_span_lines() {
        let lines = parse("**start\nend**");
        assert_eq!(lines[0], vec![Segment::Plain("**start".to_string())]);
        assert_eq!(lines[1], vec![Segment::Plain("end**".to_string())]);
    }

    #[test]
    fn test_to_html() {
        assert_eq!(
            to_html("📊 **Data**\n• *Punjab*"),
            "📊 <strong>Data</strong><br>&bull; <em>Punjab</em>"
        );
    }

    #[test]
    fn test_to_html_escapes_backend_tags() {
        let html = to_html("<script>alert('x')</script> **<img src=x onerror=y>**");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; <strong>&lt;img src=x onerror=y&gt;</strong>"
        );
    }
}
