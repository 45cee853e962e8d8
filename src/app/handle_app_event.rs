use tracing::{error, info};

use super::App;
use crate::chat::transcript::export_html;
use crate::event::{AppEvent, Event};

const SCROLL_STEP: u16 = 3;

/// Never past the top of the transcript, so Down always moves back right away.
fn scroll_up(offset: u16, max_scroll: u16) -> u16 {
    offset.saturating_add(SCROLL_STEP).min(max_scroll)
}

fn scroll_down(offset: u16) -> u16 {
    offset.saturating_sub(SCROLL_STEP)
}

impl App {
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Submit => self.submit_message(),
            AppEvent::ReplyReceived(result) => self.chat.complete_send(result),
            AppEvent::CheckConnection => self.check_connection(),
            AppEvent::ConnectionChecked(connected) => self.chat.set_connection_status(connected),
            AppEvent::ClearMessages => self.chat.store_mut().clear_messages(),
            AppEvent::NewSession => self.chat.store_mut().start_new_session(),
            AppEvent::ExportTranscript => self.export_transcript(),
            AppEvent::QuickAction(index) => {
                self.chat.apply_quick_action(index);
            }
            AppEvent::ScrollUp => self.scroll_offset = scroll_up(self.scroll_offset, self.max_scroll),
            AppEvent::ScrollDown => self.scroll_offset = scroll_down(self.scroll_offset),
            AppEvent::Quit => self.quit(),
        }
    }

    /// Appends the user's message right away and asks the backend on a separate task;
    /// the reply comes back as [`AppEvent::ReplyReceived`].
    fn submit_message(&mut self) {
        let Some(message) = self.chat.begin_send() else {
            return;
        };

        let backend = self.chat.backend().clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let result = backend.reply(&message).await;
            let _ = sender.send(Event::App(AppEvent::ReplyReceived(result)));
        });
    }

    fn check_connection(&mut self) {
        let backend = self.chat.backend().clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let connected = backend.check_connection().await;
            let _ = sender.send(Event::App(AppEvent::ConnectionChecked(connected)));
        });
    }

    fn export_transcript(&mut self) {
        match export_html(self.chat.store(), &self.config.export_dir) {
            Ok(path) => {
                info!(path = %path.display(), "transcript saved");
                self.notice = Some(format!("Transcript saved to {}", path.display()));
            }
            Err(e) => {
                error!("Failed to export transcript: {}", e);
                self.notice = Some(format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_up_stops_at_top() {
        let mut offset = 0;
        for _ in 0..10 {
            offset = scroll_up(offset, 7);
        }
        assert_eq!(offset, 7);

        // one Down press moves away from the top again
        assert_eq!(scroll_down(offset), 4);
    }

    #[test]
    fn test_short_transcript_does_not_scroll() {
        assert_eq!(scroll_up(0, 0), 0);
        assert_eq!(scroll_down(0), 0);
    }
}
