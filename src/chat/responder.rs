//! Offline canned replies.
//!
//! Keywords are matched case-insensitively anywhere in the input. The table is walked top to
//! bottom and the first hit wins, so "help with water levels" gets the `water` reply.

use std::time::Duration;

use rand::Rng;

use crate::config::DelayRange;

/// Ordered `(keyword, reply)` table. Earlier rows take priority.
pub const KEYWORD_RESPONSES: &[(&str, &str)] = &[
    (
        "water",
        "🌊 I can help you with water level information. Which region are you interested in?",
    ),
    (
        "level",
        "📊 Current water levels are being monitored across 28 states. Would you like specific data?",
    ),
    (
        "quality",
        "💧 Water quality parameters include pH, TDS, and contamination levels. What would you like to know?",
    ),
    (
        "report",
        "📋 I can generate comprehensive reports for any region. Please specify the area.",
    ),
    (
        "help",
        "🤖 I'm INGRES, your groundwater intelligence assistant. I can help with:\n• Water level monitoring\n• Quality assessment\n• Regional reports\n• Trend analysis\n• Alert notifications",
    ),
];

pub const DEFAULT_RESPONSE: &str =
    "I understand you're asking about groundwater. Let me analyze the available data for your query.";

/// Picks the canned reply for `input`.
pub fn canned_response(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    KEYWORD_RESPONSES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, response)| *response)
        .unwrap_or(DEFAULT_RESPONSE)
}

#[derive(Debug, Clone)]
pub struct LocalResponder {
    delay: DelayRange,
}

impl LocalResponder {
    pub fn new(delay: DelayRange) -> Self {
        Self { delay }
    }

    /// A uniformly drawn "thinking" pause within the configured bounds.
    pub fn next_delay(&self) -> Duration {
        let millis = if self.delay.min >= self.delay.max {
            self.delay.min
        } else {
            rand::thread_rng().gen_range(self.delay.min..=self.delay.max)
        };
        Duration::from_millis(millis)
    }

    pub async fn respond(&self, input: &str) -> &'static str {
        tokio::time::sleep(self.next_delay()).await;
        canned_response(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_for(keyword: &str) -> &'static str {
        KEYWORD_RESPONSES
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, r)| *r)
            .unwrap()
    }

    #[test]
    fn test_table_order_is_fixed() {
        let keywords: Vec<&str> = KEYWORD_RESPONSES.iter().map(|(k, _)| *k).collect();
        assert_eq!(keywords, vec!["water", "level", "quality", "report", "help"]);
    }

    #[test]
    fn test_help_any_case_anywhere() {
        assert_eq!(canned_response("help"), reply_for("help"));
        assert_eq!(canned_response("Can you HELP me?"), reply_for("help"));
        assert_eq!(canned_response("unhelpful answer"), reply_for("help"));
    }

    #[test]
    fn test_earlier_keyword_wins() {
        assert_eq!(canned_response("help me with WATER"), reply_for("water"));
        assert_eq!(canned_response("generate a report, help"), reply_for("report"));
        assert_eq!(canned_response("quality report"), reply_for("quality"));
        // "levels" contains "level", but "water" sits above it.
        assert_eq!(canned_response("Check water levels"), reply_for("water"));
    }

    #[test]
    fn test_default_response() {
        assert_eq!(canned_response("Which districts in Punjab are critical?"), DEFAULT_RESPONSE);
        assert_eq!(canned_response(""), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_delay_within_bounds() {
        let responder = LocalResponder::new(DelayRange { min: 1500, max: 2500 });
        for _ in 0..100 {
            let delay = responder.next_delay();
            assert!(delay >= Duration::from_millis(1500));
            assert!(delay <= Duration::from_millis(2500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_waits_before_replying() {
        let responder = LocalResponder::new(DelayRange { min: 1500, max: 2500 });
        let started = tokio::time::Instant::now();

        let reply = responder.respond("water quality").await;

        assert_eq!(reply, reply_for("water"));
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
