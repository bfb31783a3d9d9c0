use regex::Regex;

use crate::models::Intent;

use super::patterns::{EMERGENCY_KEYWORDS, EMERGENCY_PHRASES, INTENT_RULES};

/// Rule-based intent detection. Patterns are compiled once at startup and
/// checked in a fixed order, so the same message always yields the same label.
pub struct IntentClassifier {
    emergency_phrases: &'static [&'static str],
    emergency_keywords: Regex,
    rules: Vec<(Intent, Regex)>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        let rules = INTENT_RULES
            .iter()
            .map(|(intent, pattern)| {
                let re = Regex::new(pattern).expect("invalid intent pattern");
                (*intent, re)
            })
            .collect();

        Self {
            emergency_phrases: EMERGENCY_PHRASES,
            emergency_keywords: Regex::new(EMERGENCY_KEYWORDS)
                .expect("invalid emergency pattern"),
            rules,
        }
    }

    pub fn classify(&self, message: &str) -> Intent {
        let lower = message.to_lowercase();

        // Emergency language wins no matter what else the message contains.
        if self.matches_emergency(&lower) {
            return Intent::Emergency;
        }

        for (intent, re) in &self.rules {
            if re.is_match(&lower) {
                return *intent;
            }
        }

        Intent::Fallback
    }

    fn matches_emergency(&self, lower: &str) -> bool {
        self.emergency_phrases.iter().any(|p| lower.contains(p))
            || self.emergency_keywords.is_match(lower)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
