pub mod state;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::chat::message::{Message, NewMessage};
pub use state::{ChatEvent, ChatIntent, ChatState, ChatStateMachine};

pub type ChatEventReceiver = mpsc::UnboundedReceiver<ChatEvent>;

/// In-memory transcript for one session at a time.
///
/// Every change goes through [`ChatStateMachine::transition`]; the resulting events are
/// fanned out to subscribers. Nothing is persisted.
#[derive(Debug)]
pub struct ChatStore {
    state: ChatState,
    subscribers: Vec<mpsc::UnboundedSender<ChatEvent>>,
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStore {
    pub fn new() -> Self {
        let state = ChatState::new(Local::now());
        info!(session_id = %state.session_id, "chat session created");
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    /// Receives every event produced from now on.
    pub fn subscribe(&mut self) -> ChatEventReceiver {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    pub fn dispatch(&mut self, intent: ChatIntent) {
        let state = std::mem::take(&mut self.state);
        let (new_state, events) = ChatStateMachine::transition(state, intent, Local::now());
        self.state = new_state;

        for event in events {
            self.publish(event);
        }
    }

    fn publish(&mut self, event: ChatEvent) {
        debug!(?event, "chat event");
        // Closed receivers are dropped from the list.
        self.subscribers.retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn add_message(&mut self, message: NewMessage) {
        self.dispatch(ChatIntent::AddMessage(message));
    }

    pub fn clear_messages(&mut self) {
        self.dispatch(ChatIntent::ClearMessages);
    }

    pub fn start_new_session(&mut self) {
        self.dispatch(ChatIntent::StartNewSession);
        info!(session_id = %self.state.session_id, "new chat session started");
    }

    pub fn set_connection_status(&mut self, connected: bool) {
        self.dispatch(ChatIntent::SetConnectionStatus(connected));
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn session_id(&self) -> &str {
        &self.state.session_id
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_every_event() {
        let mut store = ChatStore::new();
        let mut events = store.subscribe();

        store.add_message(NewMessage::user("How is Gujarat doing?"));
        store.set_connection_status(false);
        store.clear_messages();

        assert!(matches!(events.try_recv(), Ok(ChatEvent::MessageAdded { total: 1, .. })));
        assert_eq!(events.try_recv().ok(), Some(ChatEvent::ConnectionChanged { connected: false }));
        assert_eq!(events.try_recv().ok(), Some(ChatEvent::MessagesCleared { removed: 1 }));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut store = ChatStore::new();
        let receiver = store.subscribe();
        drop(receiver);

        store.add_message(NewMessage::bot("still works"));
        assert_eq!(store.messages().len(), 1);
        assert!(store.subscribers.is_empty());
    }

    #[test]
    fn test_start_new_session() {
        let mut store = ChatStore::new();
        store.add_message(NewMessage::user("one"));
        store.add_message(NewMessage::bot("two"));
        let before = store.session_id().to_string();

        store.start_new_session();

        assert!(store.messages().is_empty());
        assert_ne!(store.session_id(), before);
        assert!(store.session_id().starts_with("session_"));
    }
}
