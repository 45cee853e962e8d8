use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Data,
    Chart,
    Alert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// A transcript entry. `id` and `timestamp` are stamped by the store on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: usize,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    /// Milliseconds the backend reported spending on this reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_error(&self) -> bool {
        self.kind == Some(MessageKind::Alert)
    }

    /// `02:30 PM`, plus ` • 42ms` when the backend reported a nonzero processing time.
    pub fn display_time(&self) -> String {
        let mut time = self.timestamp.format("%I:%M %p").to_string();
        if let Some(ms) = self.processing_time.filter(|ms| *ms != 0.0) {
            time.push_str(&format!(" • {}ms", ms));
        }
        time
    }
}

/// Everything a caller supplies when adding a message.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub text: String,
    pub sender: Sender,
    pub kind: Option<MessageKind>,
    pub metadata: Option<MessageMetadata>,
    pub processing_time: Option<f64>,
}

impl NewMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            kind: None,
            metadata: None,
            processing_time: None,
        }
    }

    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_processing_time(mut self, processing_time: Option<f64>) -> Self {
        self.processing_time = processing_time;
        self
    }

    pub(crate) fn into_message(self, id: usize, timestamp: DateTime<Local>) -> Message {
        Message {
            id,
            text: self.text,
            sender: self.sender,
            timestamp,
            kind: self.kind,
            metadata: self.metadata,
            processing_time: self.processing_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_display_time() {
        let message = NewMessage::bot("hi").into_message(0, at(14, 5));
        assert_eq!(message.display_time(), "02:05 PM");
    }

    #[test]
    fn test_display_time_with_processing_time() {
        let message = NewMessage::bot("hi")
            .with_processing_time(Some(42.0))
            .into_message(0, at(9, 30));
        assert_eq!(message.display_time(), "09:30 AM • 42ms");

        let message = NewMessage::bot("hi")
            .with_processing_time(Some(12.5))
            .into_message(1, at(9, 30));
        assert_eq!(message.display_time(), "09:30 AM • 12.5ms");
    }

    #[test]
    fn test_zero_processing_time_is_hidden() {
        let message = NewMessage::bot("hi")
            .with_processing_time(Some(0.0))
            .into_message(0, at(9, 30));
        assert_eq!(message.display_time(), "09:30 AM");
    }

    #[test]
    fn test_serialized_shape() {
        let message = NewMessage::bot("Punjab is over-exploited")
            .with_kind(MessageKind::Data)
            .with_metadata(MessageMetadata {
                location: Some("Punjab".to_string()),
                data_type: Some("extraction".to_string()),
                confidence: Some(0.9),
            })
            .into_message(3, at(10, 0));

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["type"], "data");
        assert_eq!(json["metadata"]["dataType"], "extraction");
        assert!(json.get("processing_time").is_none());
    }
}
