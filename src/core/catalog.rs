//! Static, read-only catalogs compiled into the binary: prompt suggestions,
//! selectable models, and the sample entries shown under "Recent History".

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub description: &'static str,
    /// Glyph rendered in front of the title.
    pub icon: &'static str,
}

pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        title: "Analyze Data",
        description: "Can you help me analyze this dataset for trends?",
        icon: "⚡",
    },
    Suggestion {
        title: "Write Code",
        description: "Create a responsive React component using Tailwind CSS.",
        icon: "‹›",
    },
    Suggestion {
        title: "Brainstorm",
        description: "Give me 5 creative ideas for a low-fidelity wireframe.",
        icon: "✦",
    },
    Suggestion {
        title: "Summarize",
        description: "Summarize the key takeaways from a complex technical paper.",
        icon: "≡",
    },
];

pub const MODELS: &[&str] = &["GPT-5-Nano", "GPT-5-Mini"];

pub const DEFAULT_MODEL: &str = "GPT-5-Nano";

/// Catalog lookup, exact match.
pub fn find_model(name: &str) -> Option<&'static str> {
    MODELS.iter().copied().find(|m| *m == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub title: &'static str,
    pub age: &'static str,
}

pub const RECENT_HISTORY: &[HistoryEntry] = &[
    HistoryEntry {
        title: "Quantum Computing Basics",
        age: "2h ago",
    },
    HistoryEntry {
        title: "React Performance Tips",
        age: "5h ago",
    },
    HistoryEntry {
        title: "Recipe for Sourdough",
        age: "Yesterday",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_in_catalog() {
        assert_eq!(find_model(DEFAULT_MODEL), Some(DEFAULT_MODEL));
        assert_eq!(MODELS.len(), 2);
    }

    #[test]
    fn test_find_model_is_exact() {
        assert_eq!(find_model("GPT-5-Mini"), Some("GPT-5-Mini"));
        assert_eq!(find_model("gpt-5-mini"), None);
    }

    #[test]
    fn test_suggestion_titles_are_unique() {
        let mut titles: Vec<_> = SUGGESTIONS.iter().map(|s| s.title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), SUGGESTIONS.len());
    }
}
