use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{lookup, lookup_string, PlatformAdapter};
use crate::services::conversation::IntentVocabulary;

const PRIMARY_VOICE: &str = "vasilisa-hifigan";
const SECONDARY_VOICE: &str = "pavel-hifigan";

/// VK Marusia. Posts are read as separate TTS commands in alternating voices.
pub struct VkAdapter {
    vocabulary: IntentVocabulary,
}

impl VkAdapter {
    pub fn new() -> Self {
        Self {
            vocabulary: IntentVocabulary::ordinal(),
        }
    }
}

impl Default for VkAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for VkAdapter {
    fn name(&self) -> &'static str {
        "vk"
    }

    fn user_id(&self, request: &Value) -> Option<String> {
        lookup_string(request, &["session", "user", "user_id"])
    }

    fn utterance(&self, request: &Value) -> Option<String> {
        lookup_string(request, &["request", "original_utterance"])
    }

    fn make_response(&self, request: &Value, text: &str, ssml: Option<&str>, interactive: bool) -> Value {
        if ssml.is_some() {
            warn!("SSML markup is not supported by {}, sending plain text", self.name());
        }

        debug!("Response length (text) is {}", text.chars().count());

        json!({
            "response": {
                "text": text,
                "end_session": !interactive,
            },
            "session": lookup(request, &["session"]).cloned().unwrap_or(Value::Null),
            "version": lookup(request, &["version"]).cloned().unwrap_or(Value::Null),
        })
    }

    fn posts_to_response(&self, request: &Value, posts: &[String]) -> Value {
        let commands: Vec<Value> = posts
            .iter()
            .enumerate()
            .map(|(i, post)| {
                json!({
                    "type": "TTS",
                    "text": post,
                    "tts": post,
                    "voice": if i % 2 == 0 { PRIMARY_VOICE } else { SECONDARY_VOICE },
                })
            })
            .collect();

        json!({
            "response": {
                "commands": commands,
                "end_session": false,
            },
            "session": lookup(request, &["session"]).cloned().unwrap_or(Value::Null),
            "version": lookup(request, &["version"]).cloned().unwrap_or(Value::Null),
        })
    }

    fn vocabulary(&self) -> &IntentVocabulary {
        &self.vocabulary
    }
}
