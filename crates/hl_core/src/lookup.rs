//! Fixed translation tables from request codes to upstream vocabulary.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
        }
    }

    /// Resolves a request topic. Unknown topics fall back to `General`.
    pub fn from_topic(topic: &str) -> Self {
        match topic.trim().to_ascii_uppercase().as_str() {
            "TOP" | "WORLD" | "NATION" => Category::General,
            "BUSINESS" => Category::Business,
            "TECHNOLOGY" => Category::Technology,
            "ENTERTAINMENT" => Category::Entertainment,
            "SPORTS" => Category::Sports,
            "SCIENCE" => Category::Science,
            "HEALTH" => Category::Health,
            _ => Category::General,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("ng", "Nigeria"),
    ("ke", "Kenya"),
    ("za", "South Africa"),
    ("gh", "Ghana"),
    ("ug", "Uganda"),
    ("tz", "Tanzania"),
    ("mw", "Malawi"),
    ("ci", "Côte d'Ivoire"),
    ("in", "India"),
    ("us", "United States"),
];

/// Display name used in full-text queries. Unknown codes pass through unchanged.
pub fn country_name(code: &str) -> &str {
    COUNTRY_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_mapping() {
        let cases = [
            ("TOP", "general"),
            ("WORLD", "general"),
            ("NATION", "general"),
            ("BUSINESS", "business"),
            ("TECHNOLOGY", "technology"),
            ("ENTERTAINMENT", "entertainment"),
            ("SPORTS", "sports"),
            ("SCIENCE", "science"),
            ("HEALTH", "health"),
        ];
        for (topic, category) in cases {
            assert_eq!(Category::from_topic(topic).as_str(), category, "topic {}", topic);
        }
    }

    #[test]
    fn test_unknown_topic_is_general() {
        assert_eq!(Category::from_topic("POLITICS"), Category::General);
        assert_eq!(Category::from_topic(""), Category::General);
        assert_eq!(Category::from_topic("general"), Category::General);
    }

    #[test]
    fn test_topic_ignores_case() {
        assert_eq!(Category::from_topic("technology"), Category::Technology);
        assert_eq!(Category::from_topic("Sports"), Category::Sports);
    }

    #[test]
    fn test_country_mapping() {
        for (code, name) in COUNTRY_NAMES {
            assert_eq!(country_name(code), *name);
        }
        assert_eq!(country_name("ci"), "Côte d'Ivoire");
    }

    #[test]
    fn test_unknown_country_passes_through() {
        assert_eq!(country_name("fr"), "fr");
        assert_eq!(country_name("Atlantis"), "Atlantis");
    }
}
