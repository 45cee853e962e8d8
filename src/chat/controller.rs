use tracing::{debug, warn};

use crate::chat::backend::Backend;
use crate::chat::client::BotReply;
use crate::chat::message::{MessageKind, NewMessage};
use crate::chat::store::ChatStore;
use crate::config::AppConfig;
use crate::error::Result;

pub const CONNECTION_ERROR_MESSAGE: &str =
    "❌ Sorry, I'm having trouble connecting to the server. Please check your connection and try again.";

pub const WELCOME_MESSAGE: &str = "🌊 Welcome to INGRES ChatBot!

I'm your AI assistant for groundwater resource information across India. I can help you with:

📊 **Groundwater Data Queries**
• \"Show me groundwater data for Punjab\"
• \"What's the status of Maharashtra's water resources?\"

📈 **Historical Analysis**
• \"Compare groundwater trends for Gujarat vs Rajasthan\"
• \"Show me 5-year data for Karnataka\"

⚠️ **Critical Area Identification**
• \"Which areas are over-exploited?\"
• \"Show me safe groundwater zones\"

❓ **General Help**
• \"Explain groundwater categories\"
• \"What does stage of extraction mean?\"

Try asking me anything about India's groundwater resources!";

/// `(icon, text)` shortcuts offered while the transcript is empty.
pub const QUICK_ACTIONS: &[(&str, &str)] = &[
    ("🌊", "Check water levels"),
    ("📊", "Generate report"),
    ("💧", "Water quality"),
    ("❓", "Help"),
];

/// Owns the transcript, the input line and the backend, and runs the send flow:
/// guard, optimistic user message, one request, then a reply or a fixed error message.
#[derive(Debug)]
pub struct ChatController {
    store: ChatStore,
    backend: Backend,
    input: String,
    max_input_chars: usize,
    pending: usize,
}

impl ChatController {
    pub fn new(backend: Backend, max_input_chars: usize) -> Self {
        Self {
            store: ChatStore::new(),
            backend,
            input: String::new(),
            max_input_chars,
            pending: 0,
        }
    }

    /// Network-backed chats open with the welcome message; offline ones start empty.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut controller = Self::new(Backend::from_config(config)?, config.max_input_chars);
        if controller.backend.is_remote() {
            controller.show_welcome();
        }
        Ok(controller)
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ChatStore {
        &mut self.store
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn show_welcome(&mut self) {
        self.store.add_message(NewMessage::bot(WELCOME_MESSAGE));
    }

    // ------------------------------------------------------------------------
    // Input line
    // ------------------------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    /// Returns `false` when the input is already at the character limit.
    pub fn push_char(&mut self, ch: char) -> bool {
        if self.input_len() >= self.max_input_chars {
            return false;
        }
        self.input.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.chars().take(self.max_input_chars).collect();
    }

    pub fn apply_quick_action(&mut self, index: usize) -> bool {
        match QUICK_ACTIONS.get(index) {
            Some((_, text)) => {
                self.set_input(text);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Connection
    // ------------------------------------------------------------------------

    pub fn is_connected(&self) -> bool {
        self.store.is_connected()
    }

    pub fn set_connection_status(&mut self, connected: bool) {
        self.store.set_connection_status(connected);
    }

    pub async fn check_connection(&mut self) -> bool {
        let connected = self.backend.check_connection().await;
        self.set_connection_status(connected);
        connected
    }

    // ------------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------------

    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty() && self.is_connected()
    }

    /// The typing indicator stays up while any request is outstanding.
    pub fn is_typing(&self) -> bool {
        self.pending > 0
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Appends the user's message and clears the input. Returns the text to send, or `None`
    /// when the input is blank or the backend is unreachable (input is left untouched).
    pub fn begin_send(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }

        let message = self.input.trim().to_string();
        self.input.clear();
        self.store.add_message(NewMessage::user(message.clone()));
        self.pending += 1;
        debug!(pending = self.pending, "message submitted");
        Some(message)
    }

    pub fn complete_send(&mut self, result: Result<BotReply>) {
        self.pending = self.pending.saturating_sub(1);

        match result {
            Ok(reply) => self.store.add_message(
                NewMessage::bot(reply.text).with_processing_time(reply.processing_time),
            ),
            Err(e) => {
                warn!("Error sending message: {}", e);
                self.store.add_message(
                    NewMessage::bot(CONNECTION_ERROR_MESSAGE).with_kind(MessageKind::Alert),
                );
            }
        }
    }

    /// Full send flow awaited in place. Returns `false` when the guard rejected the send.
    pub async fn send_message(&mut self) -> bool {
        let Some(message) = self.begin_send() else {
            return false;
        };
        let result = self.backend.reply(&message).await;
        self.complete_send(result);
        true
    }
}
