use serde_json::{json, Value};
use tracing::debug;

use super::{lookup, lookup_string, PlatformAdapter};
use crate::services::conversation::IntentVocabulary;

const SSML_PAUSE: &str = " <break time=\"1500ms\"/> ";

/// Sber Salute. Utterances arrive lemmatised, hence the separate vocabulary.
pub struct SberAdapter {
    vocabulary: IntentVocabulary,
}

impl SberAdapter {
    pub fn new() -> Self {
        Self {
            vocabulary: IntentVocabulary::lemmatised(),
        }
    }
}

impl Default for SberAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for SberAdapter {
    fn name(&self) -> &'static str {
        "sber"
    }

    fn user_id(&self, request: &Value) -> Option<String> {
        lookup_string(request, &["uuid", "userId"])
    }

    fn utterance(&self, request: &Value) -> Option<String> {
        lookup_string(request, &["payload", "annotations", "unified_normalized_text"])
    }

    fn make_response(&self, request: &Value, text: &str, ssml: Option<&str>, interactive: bool) -> Value {
        match ssml {
            Some(ssml) => debug!("Response length (ssml) is {}", ssml.chars().count()),
            None => debug!("Response length (text) is {}", text.chars().count()),
        }

        let field = |key: &str| lookup(request, &[key]).cloned().unwrap_or(Value::Null);

        json!({
            "sessionId": field("sessionId"),
            "messageId": field("messageId"),
            "uuid": field("uuid"),
            "messageName": "ANSWER_TO_USER",
            "payload": {
                "pronounceText": ssml.unwrap_or(text),
                "pronounceTextType": if ssml.is_some() { "application/ssml" } else { "application/text" },
                "emotion": {"emotionId": "laugh"},
                "items": [
                    {"bubble": {"text": text, "expand_policy": "auto_expand"}}
                ],
                "auto_listening": interactive,
                "finished": false,
                "device": lookup(request, &["payload", "device"]).cloned().unwrap_or(Value::Null),
                "intent": "string",
                "asr_hints": {},
            },
        })
    }

    fn posts_to_response(&self, request: &Value, posts: &[String]) -> Value {
        self.make_response(request, &posts.join("\n"), Some(&posts.join(SSML_PAUSE)), true)
    }

    fn vocabulary(&self) -> &IntentVocabulary {
        &self.vocabulary
    }
}
