//! Voice assistant integrations
//!
//! Each platform knows how to read the user id and utterance out of its
//! webhook payload, how to shape a reply, and which words its users say.
//! The dispatcher talks to them only through [`PlatformAdapter`].

mod sber;
mod vk;
mod yandex;

use serde_json::Value;

use crate::services::conversation::IntentVocabulary;

pub use sber::SberAdapter;
pub use vk::VkAdapter;
pub use yandex::YandexAdapter;

pub trait PlatformAdapter: Send + Sync {
    /// Route segment and log label.
    fn name(&self) -> &'static str;

    fn user_id(&self, request: &Value) -> Option<String>;

    fn utterance(&self, request: &Value) -> Option<String>;

    fn make_response(&self, request: &Value, text: &str, ssml: Option<&str>, interactive: bool) -> Value;

    fn posts_to_response(&self, request: &Value, posts: &[String]) -> Value;

    fn vocabulary(&self) -> &IntentVocabulary;
}

/// Follow `path` through nested objects.
pub(crate) fn lookup<'a>(request: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(request, |value, key| value.get(*key))
}

/// String (or number rendered as string) at `path`.
pub(crate) fn lookup_string(request: &Value, path: &[&str]) -> Option<String> {
    match lookup(request, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
