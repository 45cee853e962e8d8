pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod ui;
pub mod util;

pub use chat::{ChatClient, ChatController, ChatStore};
pub use config::AppConfig;
pub use error::{ChatError, Result};
