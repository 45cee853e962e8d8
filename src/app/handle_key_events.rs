use color_eyre::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::event::AppEvent;

impl App {
    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            match key_event.code {
                KeyCode::Char('c' | 'C') => self.events.send(AppEvent::Quit),
                KeyCode::Char('l' | 'L') => self.events.send(AppEvent::ClearMessages),
                KeyCode::Char('n' | 'N') => self.events.send(AppEvent::NewSession),
                KeyCode::Char('r' | 'R') => self.events.send(AppEvent::CheckConnection),
                KeyCode::Char('e' | 'E') => self.events.send(AppEvent::ExportTranscript),
                _ => {}
            }
            return Ok(());
        }

        match key_event.code {
            KeyCode::Esc => self.events.send(AppEvent::Quit),
            KeyCode::Enter => self.events.send(AppEvent::Submit),
            KeyCode::Backspace => self.chat.backspace(),
            KeyCode::Char(ch) => {
                self.chat.push_char(ch);
            }
            KeyCode::F(n @ 1..=4) => self.events.send(AppEvent::QuickAction(usize::from(n) - 1)),
            KeyCode::Up | KeyCode::PageUp => self.events.send(AppEvent::ScrollUp),
            KeyCode::Down | KeyCode::PageDown => self.events.send(AppEvent::ScrollDown),
            _ => {}
        }
        Ok(())
    }
}
