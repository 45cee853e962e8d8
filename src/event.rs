use color_eyre::eyre::OptionExt;
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::chat::BotReply;
use crate::error::ChatError;

/// The frequency at which tick events are emitted.
const TICK_FPS: f64 = 30.0;

/// Representation of all possible events.
#[derive(Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    Tick,
    /// Crossterm events.
    Crossterm(CrosstermEvent),
    /// Application events.
    App(AppEvent),
}

/// Application events.
#[derive(Debug)]
pub enum AppEvent {
    // Transcript
    Submit,
    ClearMessages,
    NewSession,
    ExportTranscript,
    QuickAction(usize),

    // Scrolling
    ScrollUp,
    ScrollDown,

    // Backend
    CheckConnection,
    ConnectionChecked(bool),
    ReplyReceived(Result<BotReply, ChatError>),

    // System
    Quit,
}

pub type EventSender = mpsc::UnboundedSender<Event>;

/// Terminal event handler.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: EventSender,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns a task reading terminal events.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone());
        tokio::spawn(async { actor.run().await });
        Self { sender, receiver }
    }

    /// Receives an event from the sender.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    /// Queue an app event to be sent to the event receiver.
    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }

    /// A sender for background tasks that report back to the app.
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }
}

/// Queues `CheckConnection` every `interval` until the app goes away.
pub fn spawn_status_poller(sender: EventSender, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; the startup check is queued by the app.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if sender.send(Event::App(AppEvent::CheckConnection)).is_err() {
                break;
            }
        }
    });
}

/// Terminal events that turn into app events on their own, outside of key handling.
pub fn app_event_for(event: &CrosstermEvent) -> Option<AppEvent> {
    match event {
        // Coming back to the terminal is our "page became visible again".
        CrosstermEvent::FocusGained => Some(AppEvent::CheckConnection),
        _ => None,
    }
}

/// A task that reads crossterm events and emits tick events on a regular schedule.
struct EventTask {
    /// Event sender channel.
    sender: EventSender,
}

impl EventTask {
    /// Constructs a new instance of [`EventTask`].
    fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    /// Runs the event task.
    async fn run(self) -> color_eyre::Result<()> {
        let tick_rate = Duration::from_secs_f64(1.0 / TICK_FPS);
        let mut reader = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(tick_rate);
        loop {
            let tick_delay = tick.tick();
            let crossterm_event = reader.next().fuse();
            tokio::select! {
              _ = self.sender.closed() => {
                break;
              }
              _ = tick_delay => {
                self.send(Event::Tick);
              }
              Some(Ok(evt)) = crossterm_event => {
                self.send(Event::Crossterm(evt));
              }
            };
        }
        Ok(())
    }

    /// Sends an event to the receiver.
    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_check(event: Option<Event>) -> bool {
        matches!(event, Some(Event::App(AppEvent::CheckConnection)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_poller_fires_every_interval() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        spawn_status_poller(sender, Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(receiver.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(is_check(receiver.try_recv().ok()));
        assert!(receiver.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(is_check(receiver.try_recv().ok()));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_focus_gained_checks_connection() {
        assert!(matches!(
            app_event_for(&CrosstermEvent::FocusGained),
            Some(AppEvent::CheckConnection)
        ));
        assert!(app_event_for(&CrosstermEvent::FocusLost).is_none());
        assert!(app_event_for(&CrosstermEvent::Resize(80, 24)).is_none());
    }
}
