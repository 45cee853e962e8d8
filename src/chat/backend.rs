use crate::chat::client::{BotReply, ChatClient};
use crate::chat::responder::LocalResponder;
use crate::config::{AppConfig, BackendMode};
use crate::error::Result;

/// Whatever answers the user: the INGRES backend, or the offline keyword responder.
#[derive(Debug, Clone)]
pub enum Backend {
    Remote(ChatClient),
    Local(LocalResponder),
}

impl Backend {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.mode {
            BackendMode::Network => Ok(Backend::Remote(ChatClient::new(
                &config.api_base_url,
                config.request_timeout(),
            )?)),
            BackendMode::Local => Ok(Backend::Local(LocalResponder::new(config.local_delay_ms))),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Backend::Remote(_))
    }

    pub fn describe(&self) -> String {
        match self {
            Backend::Remote(client) => client.base_url().to_string(),
            Backend::Local(_) => "offline".to_string(),
        }
    }

    /// The offline responder is always reachable.
    pub async fn check_connection(&self) -> bool {
        match self {
            Backend::Remote(client) => client.check_connection().await,
            Backend::Local(_) => true,
        }
    }

    pub async fn reply(&self, message: &str) -> Result<BotReply> {
        match self {
            Backend::Remote(client) => client.send_chat(message).await,
            Backend::Local(responder) => Ok(BotReply {
                text: responder.respond(message).await.to_string(),
                processing_time: None,
            }),
        }
    }
}
