use ratatui::style::{Color, Modifier, Style, Stylize};

use crate::chat::markup::Segment;
use crate::chat::Message;

pub fn connection_style(connected: bool) -> Style {
    if connected { Style::default().fg(Color::Green) } else { Style::default().fg(Color::Red).bold() }
}

/// Counter turns amber near the limit and red at it.
pub fn counter_style(count: usize, max: usize) -> Style {
    if count >= max {
        Style::default().fg(Color::Red)
    } else if count * 10 >= max * 9 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn sender_style(message: &Message) -> Style {
    if message.is_user() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if message.is_error() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }
}

pub fn segment_style(segment: &Segment) -> Style {
    let base = Style::default().fg(Color::White);
    match segment {
        Segment::Plain(_) => base,
        Segment::Bold(_) => base.add_modifier(Modifier::BOLD),
        Segment::Italic(_) => base.add_modifier(Modifier::ITALIC),
    }
}
