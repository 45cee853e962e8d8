use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::chat::controller::QUICK_ACTIONS;
use crate::chat::markup::{self, Segment};
use crate::chat::Message;
use crate::ui::style::{segment_style, sender_style};

pub fn render_chat_history(app: &mut App, area: Rect, buf: &mut Buffer) {
    let messages = app.chat.store().messages();
    let content = if messages.is_empty() {
        welcome_text()
    } else {
        Text::from(messages.iter().flat_map(message_lines).collect::<Vec<_>>())
    };

    let chat_widget = Paragraph::new(content)
        .block(
            Block::bordered()
                .title("Chat History (↑↓ to scroll)")
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    // Pin to the bottom unless the user scrolled up.
    let inner_height = area.height.saturating_sub(2) as usize;
    let total = chat_widget.line_count(area.width.saturating_sub(2)).saturating_sub(2);
    let max_scroll = total.saturating_sub(inner_height).min(u16::MAX as usize) as u16;
    app.max_scroll = max_scroll;
    app.scroll_offset = app.scroll_offset.min(max_scroll);
    let scroll = max_scroll - app.scroll_offset;

    chat_widget.scroll((scroll, 0)).render(area, buf);
}

fn welcome_text() -> Text<'static> {
    let mut lines = vec![
        Line::from("💧 Welcome to INGRES"),
        Line::from("Your AI-powered groundwater intelligence assistant"),
        Line::from(""),
    ];
    for (index, (icon, text)) in QUICK_ACTIONS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  F{} ", index + 1), Style::default().fg(Color::Yellow)),
            Span::raw(format!("{} {}", icon, text)),
        ]));
    }
    Text::from(lines)
}

/// User text is shown verbatim; bot text goes through the markup parser.
fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let prefix = if message.is_user() { "You: " } else { "INGRES: " };
    let body: Vec<Vec<Span<'static>>> = if message.is_user() {
        message
            .text
            .split('\n')
            .map(|line| vec![Span::styled(line.to_string(), Style::default().fg(Color::White))])
            .collect()
    } else {
        markup::parse(&message.text)
            .into_iter()
            .map(|line| line.iter().map(segment_span).collect())
            .collect()
    };

    let mut lines = Vec::with_capacity(body.len() + 2);
    for (index, spans) in body.into_iter().enumerate() {
        let lead = if index == 0 {
            Span::styled(prefix, sender_style(message))
        } else {
            Span::raw("    ")
        };
        let mut line = vec![lead];
        line.extend(spans);
        lines.push(Line::from(line));
    }
    lines.push(Line::from(Span::styled(
        format!("    {}", message.display_time()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines
}

fn segment_span(segment: &Segment) -> Span<'static> {
    Span::styled(segment.text().to_string(), segment_style(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatStore, NewMessage};
    use ratatui::style::Modifier;

    #[test]
    fn test_bot_markup_becomes_styled_spans() {
        let mut store = ChatStore::new();
        store.add_message(NewMessage::bot("**Critical** blocks:\n• *Ajnala*"));

        let lines = message_lines(&store.messages()[0]);
        // two body lines, the time line and a spacer
        assert_eq!(lines.len(), 4);

        let first = &lines[0].spans;
        assert_eq!(first[0].content, "INGRES: ");
        assert_eq!(first[1].content, "Critical");
        assert!(first[1].style.add_modifier.contains(Modifier::BOLD));

        let second = &lines[1].spans;
        assert_eq!(second[1].content, "• ");
        assert_eq!(second[2].content, "Ajnala");
        assert!(second[2].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_user_text_is_verbatim() {
        let mut store = ChatStore::new();
        store.add_message(NewMessage::user("is **this** bold?"));

        let lines = message_lines(&store.messages()[0]);
        assert_eq!(lines[0].spans[0].content, "You: ");
        assert_eq!(lines[0].spans[1].content, "is **this** bold?");
    }
}
