// src/chat/store/state.rs
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::chat::message::{Message, NewMessage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    pub session_id: String,
    /// Clock reading (unix millis) the session id was derived from.
    pub session_started_ms: i64,
    pub messages: Vec<Message>,
    pub is_connected: bool,
}

impl ChatState {
    pub fn new(now: DateTime<Local>) -> Self {
        let started = now.timestamp_millis();
        Self {
            session_id: session_id_for(started),
            session_started_ms: started,
            messages: Vec::new(),
            is_connected: true,
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

fn session_id_for(millis: i64) -> String {
    format!("session_{}", millis)
}

// ----------------------------------------------------------------------------
// INTENT - what a caller wants done to the transcript
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ChatIntent {
    AddMessage(NewMessage),
    ClearMessages,
    StartNewSession,
    SetConnectionStatus(bool),
}

// ----------------------------------------------------------------------------
// EVENTS - things that happened (past tense)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    MessageAdded { message: Message, total: usize },
    MessagesCleared { removed: usize },
    SessionStarted { session_id: String },
    ConnectionChanged { connected: bool },
}

// ----------------------------------------------------------------------------
// STATE MACHINE - pure function: (State, Intent, now) -> (State, Vec<Event>)
// ----------------------------------------------------------------------------

pub struct ChatStateMachine;

impl ChatStateMachine {
    pub fn transition(
        state: ChatState,
        intent: ChatIntent,
        now: DateTime<Local>,
    ) -> (ChatState, Vec<ChatEvent>) {
        use ChatIntent::*;

        match intent {
            AddMessage(message) => Self::handle_add_message(state, message, now),
            ClearMessages => Self::handle_clear_messages(state),
            StartNewSession => Self::handle_start_new_session(state, now),
            SetConnectionStatus(connected) => Self::handle_set_connection_status(state, connected),
        }
    }

    fn handle_add_message(
        mut state: ChatState,
        message: NewMessage,
        now: DateTime<Local>,
    ) -> (ChatState, Vec<ChatEvent>) {
        let id = state.messages.len();
        let message = message.into_message(id, now);
        state.messages.push(message.clone());

        let total = state.messages.len();
        (state, vec![ChatEvent::MessageAdded { message, total }])
    }

    fn handle_clear_messages(mut state: ChatState) -> (ChatState, Vec<ChatEvent>) {
        let removed = state.messages.len();
        state.messages.clear();
        (state, vec![ChatEvent::MessagesCleared { removed }])
    }

    fn handle_start_new_session(
        mut state: ChatState,
        now: DateTime<Local>,
    ) -> (ChatState, Vec<ChatEvent>) {
        // Ids must differ even if the clock stalls or steps backwards.
        let started = now.timestamp_millis().max(state.session_started_ms + 1);
        state.session_started_ms = started;
        state.session_id = session_id_for(started);

        let removed = state.messages.len();
        state.messages.clear();

        let session_id = state.session_id.clone();
        (state, vec![
            ChatEvent::MessagesCleared { removed },
            ChatEvent::SessionStarted { session_id },
        ])
    }

    fn handle_set_connection_status(
        mut state: ChatState,
        connected: bool,
    ) -> (ChatState, Vec<ChatEvent>) {
        if state.is_connected == connected {
            return (state, vec![]);
        }
        state.is_connected = connected;
        (state, vec![ChatEvent::ConnectionChanged { connected }])
    }
}
