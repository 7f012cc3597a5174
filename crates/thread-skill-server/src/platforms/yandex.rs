use serde_json::{json, Map, Value};
use tracing::debug;

use super::{lookup, lookup_string, PlatformAdapter};
use crate::services::conversation::IntentVocabulary;

const TTS_PAUSE: &str = "sil <[1500]>";

/// Yandex Alice. Echoes the stored session/user/application state back.
pub struct YandexAdapter {
    version: String,
    vocabulary: IntentVocabulary,
}

impl YandexAdapter {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            vocabulary: IntentVocabulary::numeric(),
        }
    }
}

impl PlatformAdapter for YandexAdapter {
    fn name(&self) -> &'static str {
        "yandex"
    }

    fn user_id(&self, request: &Value) -> Option<String> {
        lookup_string(request, &["session", "user", "user_id"])
    }

    fn utterance(&self, request: &Value) -> Option<String> {
        lookup_string(request, &["request", "original_utterance"])
    }

    fn make_response(&self, request: &Value, text: &str, ssml: Option<&str>, interactive: bool) -> Value {
        match ssml {
            Some(ssml) => debug!("Response length (ssml) is {}", ssml.chars().count()),
            None => debug!("Response length (text) is {}", text.chars().count()),
        }

        let mut body = Map::new();
        body.insert("text".to_string(), json!(text));
        body.insert("end_session".to_string(), json!(!interactive));
        if let Some(ssml) = ssml {
            body.insert("tts".to_string(), json!(ssml));
        }

        let mut response = Map::new();
        response.insert("response".to_string(), Value::Object(body));
        response.insert("version".to_string(), json!(self.version));

        for (scope, key) in [
            ("session", "session_state"),
            ("user", "user_state"),
            ("application", "application_state"),
        ] {
            if let Some(state) = lookup(request, &["state", scope]) {
                response.insert(key.to_string(), state.clone());
            }
        }

        Value::Object(response)
    }

    fn posts_to_response(&self, request: &Value, posts: &[String]) -> Value {
        self.make_response(request, &posts.join("\n"), Some(&posts.join(TTS_PAUSE)), true)
    }

    fn vocabulary(&self) -> &IntentVocabulary {
        &self.vocabulary
    }
}
