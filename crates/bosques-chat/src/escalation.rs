//! Keyword classifier for the human-contact banner.

use bosques_core::config::ConciergeConfig;

/// Case-insensitive substring classifier over a fixed keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationClassifier {
    /// Lowercased, non-empty keywords.
    keywords: Vec<String>,
}

impl Default for EscalationClassifier {
    fn default() -> Self {
        Self::from_config(&ConciergeConfig::default())
    }
}

impl EscalationClassifier {
    /// Create a classifier from a keyword list. Blank keywords are dropped.
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

    pub fn from_config(config: &ConciergeConfig) -> Self {
        Self::new(&config.escalation_keywords)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns true if `text` contains any keyword, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
