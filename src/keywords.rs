//! Description keyword fallback.
//!
//! Used only when the category has no direct mapping. Groups are checked in
//! order and the first group with any hit wins.

use crate::config::KeywordGroupConfig;
use crate::types::{Classification, Department, Priority};

#[derive(Debug, Clone)]
struct KeywordSet {
    department: Department,
    priority: Priority,
    reason: String,
    keywords: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    sets: Vec<KeywordSet>,
}

impl KeywordMatcher {
    pub fn from_config(groups: &[KeywordGroupConfig]) -> Self {
        let sets = groups
            .iter()
            .map(|g| KeywordSet {
                department: g.department,
                priority: g.priority,
                reason: g.reason.clone(),
                keywords: g
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self { sets }
    }

    /// Scan a description. Plain substring containment, so "décompte"
    /// matches "compte".
    pub fn match_description(&self, description: &str) -> Option<Classification> {
        let haystack = description.to_lowercase();
        self.sets
            .iter()
            .find(|set| set.keywords.iter().any(|kw| haystack.contains(kw.as_str())))
            .map(|set| Classification::new(set.department, set.priority, set.reason.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;

    fn builtin() -> KeywordMatcher {
        KeywordMatcher::from_config(&RoutingConfig::builtin().keyword_groups)
    }

    #[test]
    fn test_data_protection_keywords() {
        let m = builtin();
        let c = m
            .match_description("Quelqu'un a volé mes DONNÉES PERSONNELLES")
            .unwrap();
        assert_eq!(c.department, Department::DataProtectionAuthority);
        assert_eq!(c.priority, Priority::High);
    }

    #[test]
    fn test_cybercrime_keywords() {
        let c = builtin()
            .match_description("Arnaque sur internet via un faux site")
            .unwrap();
        assert_eq!(c.department, Department::CybercrimeDivision);
    }

    #[test]
    fn test_data_protection_group_checked_first() {
        // "compte" and "en ligne" both hit; the first group wins.
        let c = builtin()
            .match_description("mon compte en ligne a été vidé")
            .unwrap();
        assert_eq!(c.department, Department::DataProtectionAuthority);
    }

    #[test]
    fn test_substring_not_whole_word() {
        let c = builtin()
            .match_description("Le décompte de ma facture d'eau est faux")
            .unwrap();
        assert_eq!(c.department, Department::DataProtectionAuthority);

        let c = builtin().match_description("Un acompte versé à un faux bailleur").unwrap();
        assert_eq!(c.department, Department::DataProtectionAuthority);

        // "comptable" does not contain "compte".
        assert!(builtin()
            .match_description("Mon comptable a disparu avec la caisse")
            .is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(builtin()
            .match_description("Harcèlement moral au travail")
            .is_none());
        assert!(builtin().match_description("").is_none());
    }
}
