use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::chat::markup::{escape_html, to_html};
use crate::chat::message::Message;
use crate::chat::store::ChatStore;
use crate::error::Result;

/// Renders a transcript as a standalone HTML page. User text is escaped verbatim; bot text
/// goes through the markup renderer.
pub fn render_html(session_id: &str, messages: &[Message]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>INGRES chat {}</title>\n", escape_html(session_id)));
    out.push_str("</head>\n<body>\n<div class=\"chat-messages\">\n");

    for message in messages {
        let (class, avatar) = if message.is_user() { ("user", "👤") } else { ("bot", "🤖") };
        let content = if message.is_user() {
            escape_html(&message.text).replace('\n', "<br>")
        } else {
            to_html(&message.text)
        };
        let class = if message.is_error() { format!("{} error", class) } else { class.to_string() };

        out.push_str(&format!(
            "<div class=\"message {}\" data-id=\"{}\">\n  <div class=\"message-avatar\">{}</div>\n  <div class=\"message-content\">{}<div class=\"message-time\">{}</div></div>\n</div>\n",
            class,
            message.id,
            avatar,
            content,
            escape_html(&message.display_time()),
        ));
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

/// Writes `<dir>/<session_id>.html` and returns its path.
pub fn export_html(store: &ChatStore, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.html", store.session_id()));
    fs::write(&path, render_html(store.session_id(), store.messages()))?;
    info!(path = %path.display(), messages = store.messages().len(), "transcript exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::{MessageKind, NewMessage};
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_escaped_transcript() {
        let mut store = ChatStore::new();
        store.add_message(NewMessage::user("<b>is my input</b> **raw**?"));
        store.add_message(NewMessage::bot("**Safe** zones:\n• <script>x()</script>"));
        store.add_message(NewMessage::bot("offline").with_kind(MessageKind::Alert));

        let dir = TempDir::new().unwrap();
        let path = export_html(&store, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap().to_string_lossy(), format!("{}.html", store.session_id()));

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("&lt;b&gt;is my input&lt;/b&gt; **raw**?"));
        assert!(html.contains("<strong>Safe</strong> zones:<br>&bull; &lt;script&gt;x()&lt;/script&gt;"));
        assert!(html.contains("class=\"message bot error\" data-id=\"2\""));
        assert!(!html.contains("<script>"));
    }
}
