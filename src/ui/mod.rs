pub mod chat_history;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, StatefulWidget, Widget},
};
use throbber_widgets_tui::Throbber;

use crate::app::App;
use crate::ui::style::{connection_style, counter_style};

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Chat history
                Constraint::Length(1), // Typing indicator
                Constraint::Length(3), // Input box
                Constraint::Length(1), // Controls / notice
            ])
            .split(area);

        render_header(self, main_layout[0], buf);
        chat_history::render_chat_history(self, main_layout[1], buf);
        render_typing(self, main_layout[2], buf);
        render_input(self, main_layout[3], buf);
        render_footer(self, main_layout[4], buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let connected = app.chat.is_connected();
    let status = if connected { "● Connected" } else { "● Disconnected" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("🤖 INGRES Assistant", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  Groundwater Intelligence  "),
        Span::styled(status, connection_style(connected)),
    ]))
    .block(
        Block::bordered()
            .title(format!(" {} ", app.chat.store().session_id()))
            .title_alignment(Alignment::Right)
            .border_type(BorderType::Rounded),
    );
    header.render(area, buf);
}

fn render_typing(app: &mut App, area: Rect, buf: &mut Buffer) {
    if !app.chat.is_typing() {
        return;
    }

    let throbber = Throbber::default()
        .label("INGRES is typing...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(Style::default().fg(Color::Cyan))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
    StatefulWidget::render(throbber, area, buf, &mut app.throbber_state);
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let count = app.chat.input_len();
    let max = app.chat.max_input_chars();

    let title = if !app.chat.is_connected() {
        "Disconnected - sending disabled"
    } else {
        "Ask about groundwater data, quality, or generate reports..."
    };

    let input = Paragraph::new(format!("> {}", app.chat.input()))
        .block(
            Block::bordered()
                .title(title)
                .title_bottom(
                    Line::from(Span::styled(format!(" {}/{} ", count, max), counter_style(count, max)))
                        .right_aligned(),
                )
                .border_type(BorderType::Rounded),
        )
        .fg(if app.chat.can_send() { Color::Yellow } else { Color::DarkGray });
    input.render(area, buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let text = match &app.notice {
        Some(notice) => notice.clone(),
        None => "Enter: send • Ctrl+N: new session • Ctrl+L: clear • Ctrl+R: reconnect • Ctrl+E: export • Esc: quit"
            .to_string(),
    };

    Paragraph::new(text)
        .fg(Color::DarkGray)
        .alignment(Alignment::Center)
        .render(area, buf);
}
