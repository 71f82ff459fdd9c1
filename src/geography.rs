//! Urban/rural resolution of free-text region names.

use crate::config::LocalityConfig;

/// Membership of a region in each locality list. Both flags may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locality {
    pub urban: bool,
    pub rural: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GeographicResolver {
    urban: Vec<String>,
    rural: Vec<String>,
}

impl GeographicResolver {
    pub fn from_config(config: &LocalityConfig) -> Self {
        Self {
            urban: lowercase_entries(&config.urban),
            rural: lowercase_entries(&config.rural),
        }
    }

    pub fn is_urban(&self, region: &str) -> bool {
        contains_any(&region.to_lowercase(), &self.urban)
    }

    pub fn is_rural(&self, region: &str) -> bool {
        contains_any(&region.to_lowercase(), &self.rural)
    }

    pub fn resolve(&self, region: &str) -> Locality {
        let haystack = region.to_lowercase();
        Locality {
            urban: contains_any(&haystack, &self.urban),
            rural: contains_any(&haystack, &self.rural),
        }
    }
}

fn lowercase_entries(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}
