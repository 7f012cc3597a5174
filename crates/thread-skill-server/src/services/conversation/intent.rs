/// Intent vocabulary
/// Keyword-containment matching over the lower-cased, trimmed utterance.
/// Each platform ships its own word lists.
use tracing::debug;

/// Commands recognised by plain keyword containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Reset,
    Stop,
    Repeat,
    Continue,
    Rewind,
    Forward,
    Back,
}

/// Outcome of classifying one utterance against a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Explicit reset, or the first turn of a user.
    Reset,
    Stop,
    Repeat,
    Continue,
    Rewind,
    Forward,
    Back,
    /// 0-based position on the current listing page.
    Select(usize),
    Default,
}

#[derive(Debug, Clone)]
pub struct IntentVocabulary {
    pub help: Vec<String>,
    pub reset: Vec<String>,
    pub stop: Vec<String>,
    pub repeat: Vec<String>,
    pub proceed: Vec<String>,
    pub rewind: Vec<String>,
    pub forward: Vec<String>,
    pub back: Vec<String>,
    /// Checked in order, first hit wins.
    pub selections: Vec<(String, usize)>,
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const ORDINALS: [(&str, usize); 11] = [
    ("первый", 0),
    ("второй", 1),
    ("третий", 2),
    ("четвертый", 3),
    ("четвёртый", 3),
    ("пятый", 4),
    ("шестой", 5),
    ("седьмой", 6),
    ("восьмой", 7),
    ("девятый", 8),
    ("десятый", 9),
];

// "10" before "1", otherwise "10" would select the first item.
const NUMERALS: [(&str, usize); 10] = [
    ("10", 9),
    ("1", 0),
    ("2", 1),
    ("3", 2),
    ("4", 3),
    ("5", 4),
    ("6", 5),
    ("7", 6),
    ("8", 7),
    ("9", 8),
];

impl IntentVocabulary {
    /// Spoken-word vocabulary with ordinal selection ("первый", "второй", ...).
    pub fn ordinal() -> Self {
        Self {
            help: words(&["можешь", "умеешь", "можете", "умеете"]),
            reset: words(&["хочу"]),
            stop: words(&["стоп"]),
            repeat: words(&["поиграем"]),
            proceed: words(&["дальше", "скилл", "skill"]),
            rewind: words(&["включи"]),
            forward: words(&["вперед", "вперёд"]),
            back: words(&["назад"]),
            selections: ORDINALS
                .iter()
                .map(|(word, index)| (word.to_string(), *index))
                .collect(),
        }
    }

    /// Same words, but items are picked by number.
    pub fn numeric() -> Self {
        Self {
            selections: NUMERALS
                .iter()
                .map(|(word, index)| (word.to_string(), *index))
                .collect(),
            ..Self::ordinal()
        }
    }

    /// Lemmatised vocabulary (the platform normalises utterances to
    /// dictionary forms before they reach us).
    pub fn lemmatised() -> Self {
        Self {
            reset: words(&["хотеть"]),
            proceed: words(&["далекий", "скилл", "skill"]),
            repeat: words(&["поиграть"]),
            ..Self::numeric()
        }
    }

    fn keywords(&self, command: Command) -> &[String] {
        match command {
            Command::Help => &self.help,
            Command::Reset => &self.reset,
            Command::Stop => &self.stop,
            Command::Repeat => &self.repeat,
            Command::Continue => &self.proceed,
            Command::Rewind => &self.rewind,
            Command::Forward => &self.forward,
            Command::Back => &self.back,
        }
    }

    /// `utterance` must already be prepared with [`prepare`].
    pub fn matches(&self, command: Command, utterance: &str) -> bool {
        let hit = self
            .keywords(command)
            .iter()
            .find(|keyword| utterance.contains(keyword.as_str()));

        if let Some(keyword) = hit {
            debug!("Detected {:?}: matched '{}'", command, keyword);
            return true;
        }

        false
    }

    /// Raw list position named in the utterance, not yet checked against
    /// the page that was shown.
    pub fn infer_index(&self, utterance: &str) -> Option<usize> {
        self.selections
            .iter()
            .find(|(keyword, _)| utterance.contains(keyword.as_str()))
            .map(|(_, index)| *index)
    }
}

pub fn prepare(utterance: &str) -> String {
    utterance.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_selection() {
        let vocabulary = IntentVocabulary::ordinal();
        assert_eq!(vocabulary.infer_index("давай первый"), Some(0));
        assert_eq!(vocabulary.infer_index("четвёртый тред"), Some(3));
        assert_eq!(vocabulary.infer_index("четвертый"), Some(3));
        assert_eq!(vocabulary.infer_index("десятый"), Some(9));
        assert_eq!(vocabulary.infer_index("тред 3"), None);
    }

    #[test]
    fn test_numeric_selection_prefers_ten() {
        let vocabulary = IntentVocabulary::numeric();
        assert_eq!(vocabulary.infer_index("тред 10"), Some(9));
        assert_eq!(vocabulary.infer_index("тред 1"), Some(0));
        assert_eq!(vocabulary.infer_index("номер 7"), Some(6));
        assert_eq!(vocabulary.infer_index("первый"), None);
    }

    #[test]
    fn test_commands() {
        let vocabulary = IntentVocabulary::ordinal();
        assert!(vocabulary.matches(Command::Help, "что ты умеешь"));
        assert!(vocabulary.matches(Command::Stop, "стоп"));
        assert!(vocabulary.matches(Command::Continue, "дальше"));
        assert!(vocabulary.matches(Command::Forward, "вперёд"));
        assert!(vocabulary.matches(Command::Back, "назад"));
        assert!(!vocabulary.matches(Command::Reset, "хотеть"));
    }

    #[test]
    fn test_lemmatised_overrides() {
        let vocabulary = IntentVocabulary::lemmatised();
        assert!(vocabulary.matches(Command::Reset, "я хотеть треды"));
        assert!(vocabulary.matches(Command::Continue, "далекий"));
        assert!(vocabulary.matches(Command::Repeat, "поиграть"));
        assert!(!vocabulary.matches(Command::Continue, "дальше"));
        assert!(vocabulary.matches(Command::Stop, "стоп"));
        assert_eq!(vocabulary.infer_index("2"), Some(1));
    }

    #[test]
    fn test_prepare() {
        assert_eq!(prepare("  Дальше \n"), "дальше");
    }
}
