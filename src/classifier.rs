//! Report classification entry point.
//!
//! Precedence, first success wins:
//! 1. direct category mapping
//! 2. description keyword fallback (non-empty description only)
//! 3. geographic families on the category (urban → police, rural → gendarmerie)
//! 4. default: police, medium

use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::{GeographicRuleConfig, RoutingConfig};
use crate::geography::GeographicResolver;
use crate::keywords::KeywordMatcher;
use crate::report::{resolve_category_name, CategoryLookup, Classifiable};
use crate::rules::{normalize_category, CategoryRules};
use crate::types::{Classification, Department, Priority};

pub const DEFAULT_REASON: &str = "default classification";

static BUILTIN: Lazy<ReportClassifier> =
    Lazy::new(|| ReportClassifier::from_config(&RoutingConfig::builtin()));

#[derive(Debug, Clone)]
struct GeographicFamily {
    name: String,
    markers: Vec<String>,
    priority: Priority,
    urban_reason: String,
    rural_reason: String,
}

impl GeographicFamily {
    fn from_config(rule: &GeographicRuleConfig) -> Self {
        Self {
            name: rule.name.clone(),
            // An empty marker is a substring of every category.
            markers: rule
                .markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
            priority: rule.priority,
            urban_reason: rule.urban_reason.clone(),
            rural_reason: rule.rural_reason.clone(),
        }
    }

    fn matches(&self, normalized_category: &str) -> bool {
        self.markers.iter().any(|m| normalized_category.contains(m.as_str()))
    }
}

/// Immutable routing engine. Cheap to share across threads.
///
/// Built from any `RoutingConfig`, validated or not: empty markers, empty
/// keys and blank keywords are dropped, so they never match.
#[derive(Debug, Clone)]
pub struct ReportClassifier {
    rules: CategoryRules,
    keywords: KeywordMatcher,
    geography: GeographicResolver,
    families: Vec<GeographicFamily>,
}

impl ReportClassifier {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            rules: CategoryRules::from_config(&config.categories),
            keywords: KeywordMatcher::from_config(&config.keyword_groups),
            geography: GeographicResolver::from_config(&config.localities),
            families: config
                .geographic_rules
                .iter()
                .map(GeographicFamily::from_config)
                .collect(),
        }
    }

    /// Process-wide classifier over the built-in table.
    pub fn builtin() -> &'static ReportClassifier {
        &BUILTIN
    }

    pub fn geography(&self) -> &GeographicResolver {
        &self.geography
    }

    /// Route one report. Always returns a classification.
    pub fn classify(
        &self,
        category_name: &str,
        region: &str,
        description: Option<&str>,
    ) -> Classification {
        let category = normalize_category(category_name);

        if let Some(c) = self.rules.lookup(&category) {
            debug!(%category, department = %c.department, priority = %c.priority, step = "direct", "report classified");
            return c.clone();
        }

        if let Some(text) = description.filter(|d| !d.trim().is_empty()) {
            if let Some(c) = self.keywords.match_description(text) {
                debug!(%category, department = %c.department, priority = %c.priority, step = "keyword", "report classified");
                return c;
            }
        }

        let locality = self.geography.resolve(region);
        for family in self.families.iter().filter(|f| f.matches(&category)) {
            let routed = if locality.urban {
                Some((Department::Police, family.urban_reason.as_str()))
            } else if locality.rural {
                Some((Department::Gendarmerie, family.rural_reason.as_str()))
            } else {
                None
            };
            if let Some((department, reason)) = routed {
                debug!(%category, region, family = %family.name, %department, priority = %family.priority, step = "geographic", "report classified");
                return Classification::new(department, family.priority, reason);
            }
        }

        debug!(%category, region, step = "default", "report classified");
        Classification::new(Department::Police, Priority::Medium, DEFAULT_REASON)
    }

    /// Resolve the record's category against `lookup`, then classify it.
    pub fn classify_record<R: Classifiable + ?Sized>(
        &self,
        record: &R,
        lookup: &CategoryLookup,
    ) -> Classification {
        let category = resolve_category_name(record.category(), lookup);
        self.classify(&category, record.region(), record.description())
    }
}

impl Default for ReportClassifier {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::builtin())
    }
}

/// Classify with the built-in table.
pub fn classify_report(
    category_name: &str,
    region: &str,
    description: Option<&str>,
) -> Classification {
    ReportClassifier::builtin().classify(category_name, region, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direct_match_beats_keywords() {
        let c = classify_report("vol_urbain", "Dakar", Some("phishing et cyber attaque"));
        assert_eq!(c.department, Department::Police);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.reason, "Urban theft is handled by the national police");
    }

    #[test]
    fn test_direct_match_phishing() {
        let c = classify_report("phishing", "Dakar", Some(""));
        assert_eq!(c.department, Department::CybercrimeDivision);
        assert_eq!(c.department.as_str(), "dsc");
        assert_eq!(c.priority, Priority::High);
    }

    #[test]
    fn test_synonym_equivalence() {
        let slug = classify_report("usurpation_identité", "Dakar", None);
        let label = classify_report("  Usurpation D'Identité ", "Dakar", None);
        assert_eq!(slug, label);
        assert_eq!(slug.department, Department::DataProtectionAuthority);
    }

    #[test]
    fn test_keyword_fallback() {
        let c = classify_report("Autres", "Dakar", Some("On a piraté mon compte Facebook"));
        assert_eq!(c.department, Department::DataProtectionAuthority);
        assert_eq!(c.priority, Priority::High);

        let c = classify_report("Autres", "Kolda", Some("Escroquerie sur un site de vente"));
        assert_eq!(c.department, Department::CybercrimeDivision);
    }

    #[test]
    fn test_keyword_fallback_beats_geography() {
        let c = classify_report("Vol", "Dakar", Some("vol de mon identité"));
        assert_eq!(c.department, Department::DataProtectionAuthority);
    }

    #[test]
    fn test_whitespace_description_skips_keywords() {
        let c = classify_report("Vol", "Kolda", Some("   "));
        assert_eq!(c.department, Department::Gendarmerie);
    }

    #[test]
    fn test_theft_by_geography() {
        let urban = classify_report("Vol", "Dakar", None);
        assert_eq!((urban.department, urban.priority), (Department::Police, Priority::Medium));

        let rural = classify_report("Cambriolage", "Matam", None);
        assert_eq!(
            (rural.department, rural.priority),
            (Department::Gendarmerie, Priority::Medium)
        );
    }

    #[test]
    fn test_urban_wins_on_overlap() {
        let c = classify_report("Vol", "Saint-Louis", None);
        assert_eq!(c.department, Department::Police);

        let c = classify_report("Violence", "Saint-Louis", None);
        assert_eq!((c.department, c.priority), (Department::Police, Priority::Urgent));

        let c = classify_report("Harcèlement", "Saint-Louis", None);
        assert_eq!((c.department, c.priority), (Department::Police, Priority::High));
    }

    #[test]
    fn test_unvalidated_config_ignores_empty_markers_and_keys() {
        // Deserialized directly, so `validate()` never runs.
        let config: RoutingConfig = toml::from_str(
            r#"
            [[category]]
            keys = ["  ", "fraude"]
            department = "dsc"
            priority = "high"
            reason = "fraud"

            [[geographic_rule]]
            name = "all"
            markers = ["", "vol"]
            priority = "low"
            urban_reason = "u"
            rural_reason = "r"

            [localities]
            urban = ["Dakar"]
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let classifier = ReportClassifier::from_config(&config);
        let c = classifier.classify("Autres", "Dakar", None);
        assert_eq!(
            c,
            Classification::new(Department::Police, Priority::Medium, DEFAULT_REASON)
        );
        let c = classifier.classify("", "Dakar", None);
        assert_eq!(c.reason, DEFAULT_REASON);
        // Non-empty entries of the same rules still apply.
        assert_eq!(classifier.classify("Fraude", "Dakar", None).reason, "fraud");
        assert_eq!(classifier.classify("Vol", "Dakar", None).reason, "u");
    }

    #[test]
    fn test_violence_is_urgent() {
        let c = classify_report("Violence", "Pikine", None);
        assert_eq!((c.department, c.priority), (Department::Police, Priority::Urgent));

        let c = classify_report("Agression physique", "Sédhiou", None);
        assert_eq!(
            (c.department, c.priority),
            (Department::Gendarmerie, Priority::Urgent)
        );
    }

    #[test]
    fn test_harassment() {
        let c = classify_report("Harcèlement", "Thiès", None);
        assert_eq!((c.department, c.priority), (Department::Police, Priority::High));

        let c = classify_report("harcèlement sexuel", "Louga", None);
        assert_eq!(
            (c.department, c.priority),
            (Department::Gendarmerie, Priority::High)
        );
    }

    #[test]
    fn test_family_without_known_region_defaults() {
        let c = classify_report("Vol", "Paris", None);
        assert_eq!(c.department, Department::Police);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_default() {
        let c = classify_report("", "Nowhere", Some(""));
        assert_eq!(c.department, Department::Police);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_families_only_look_at_category() {
        let c = classify_report("Autres", "Kolda", Some("Harcèlement moral au travail"));
        assert_eq!(c.department, Department::Police);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_custom_config() {
        let config = RoutingConfig::from_toml_str(
            r#"
            [[geographic_rule]]
            name = "fraud"
            markers = ["fraude"]
            priority = "low"
            urban_reason = "urban fraud"
            rural_reason = "rural fraud"

            [localities]
            rural = ["Podor"]
            "#,
        )
        .unwrap();
        let classifier = ReportClassifier::from_config(&config);
        let c = classifier.classify("Fraude", "Podor", None);
        assert_eq!(c, Classification::new(Department::Gendarmerie, Priority::Low, "rural fraud"));
        // Built-in categories are not present in the custom table.
        let c = classifier.classify("phishing", "Dakar", None);
        assert_eq!(c.reason, DEFAULT_REASON);
    }

    proptest! {
        #[test]
        fn classification_is_total_and_deterministic(
            category in any::<String>(),
            region in any::<String>(),
            description in proptest::option::of(any::<String>()),
        ) {
            let first = classify_report(&category, &region, description.as_deref());
            let second = classify_report(&category, &region, description.as_deref());
            prop_assert!(Department::ALL.contains(&first.department));
            prop_assert!(Priority::ALL.contains(&first.priority));
            prop_assert!(!first.reason.is_empty());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn direct_mapping_ignores_description_and_region(
            description in "[a-z ]{0,40}",
            region in "[A-Za-z-]{0,20}",
        ) {
            let c = classify_report("phishing", &region, Some(&description));
            prop_assert_eq!(c.department, Department::CybercrimeDivision);
        }
    }
}
