pub mod backend;
pub mod client;
pub mod controller;
pub mod markup;
pub mod message;
pub mod responder;
pub mod store;
pub mod transcript;

pub use backend::Backend;
pub use client::{BotReply, ChatClient};
pub use controller::ChatController;
pub use message::{Message, MessageKind, MessageMetadata, NewMessage, Sender};
pub use store::ChatStore;
