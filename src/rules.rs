//! Direct category mapping — normalized category label to classification.

use std::collections::HashMap;

use crate::config::CategoryRuleConfig;
use crate::types::Classification;

/// Lowercase and trim. Accents and punctuation are kept as-is.
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Lookup table keyed by normalized category label.
///
/// Synonyms are stored as separate keys pointing at equal classifications.
#[derive(Debug, Clone, Default)]
pub struct CategoryRules {
    entries: HashMap<String, Classification>,
}

impl CategoryRules {
    pub fn from_config(rules: &[CategoryRuleConfig]) -> Self {
        let mut entries = HashMap::new();
        for rule in rules {
            let classification =
                Classification::new(rule.department, rule.priority, rule.reason.as_str());
            for key in rule.keys.iter().map(|k| normalize_category(k)) {
                if !key.is_empty() {
                    entries.insert(key, classification.clone());
                }
            }
        }
        Self { entries }
    }

    /// Exact lookup; `normalized` must already have gone through
    /// [`normalize_category`].
    pub fn lookup(&self, normalized: &str) -> Option<&Classification> {
        self.entries.get(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
