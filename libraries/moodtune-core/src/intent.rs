//! Keyword based intent detection for chat messages.

/// Phrases that mark a message as asking about the user's own mood data
pub const DEFAULT_ANALYSIS_KEYWORDS: &[&str] = &[
    "mood pattern",
    "mood trend",
    "analyze",
    "analysis",
    "how am i doing",
    "my mood",
    "mood history",
    "pattern",
    "trend",
    "progress",
    "improvement",
];

/// Case-insensitive substring matcher over a keyword set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentClassifier {
    keywords: Vec<String>,
}

impl IntentClassifier {
    /// Build a classifier; keywords are lowercased and blanks dropped
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Keywords in use
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when the message asks for an analysis of stored moods
    pub fn is_mood_analysis_query(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        self.keywords.iter().any(|k| message.contains(k.as_str()))
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_KEYWORDS)
    }
}
