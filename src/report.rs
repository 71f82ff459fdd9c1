//! Report and complaint records as they arrive from the backend API.
//!
//! The API sends `category` either as a bare id or as an embedded object.
//! [`CategoryRef`] captures both shapes and [`resolve_category_name`] turns
//! either into the label the classifier expects.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Department;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryId::Number(n) => write!(f, "{n}"),
            CategoryId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Embedded(EmbeddedCategory),
    Id(CategoryId),
}

/// Category names keyed by id, as served by the categories endpoint.
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup {
    names: HashMap<String, String>,
}

impl CategoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<CategoryId>, name: impl Into<String>) {
        self.names.insert(id.into().to_string(), name.into());
    }

    pub fn name_of(&self, id: &CategoryId) -> Option<&str> {
        self.names.get(&id.to_string()).map(String::as_str)
    }
}

impl<I: Into<CategoryId>, N: Into<String>> FromIterator<(I, N)> for CategoryLookup {
    fn from_iter<T: IntoIterator<Item = (I, N)>>(iter: T) -> Self {
        let mut lookup = Self::new();
        for (id, name) in iter {
            lookup.insert(id, name);
        }
        lookup
    }
}

impl From<i64> for CategoryId {
    fn from(n: i64) -> Self {
        CategoryId::Number(n)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        CategoryId::Text(s.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        CategoryId::Text(s)
    }
}

/// Category label for classification. An id missing from `lookup` yields an
/// empty label, which classifies through the remaining fallbacks.
pub fn resolve_category_name(category: &CategoryRef, lookup: &CategoryLookup) -> String {
    match category {
        CategoryRef::Embedded(embedded) => embedded.name.clone(),
        CategoryRef::Id(id) => lookup.name_of(id).unwrap_or_default().to_string(),
    }
}

/// Anything that carries the three classification inputs.
pub trait Classifiable {
    fn category(&self) -> &CategoryRef;
    fn region(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

/// Crime report submitted by a citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: RecordId,
    pub category: CategoryRef,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
}

/// Formal complaint. Its free text lives in `facts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: RecordId,
    pub category: CategoryRef,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub facts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
}

/// Report and complaint ids share the numeric-or-text shape of category ids.
pub type RecordId = CategoryId;

impl Classifiable for Report {
    fn category(&self) -> &CategoryRef {
        &self.category
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Classifiable for Complaint {
    fn category(&self) -> &CategoryRef {
        &self.category
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn description(&self) -> Option<&str> {
        self.facts.as_deref()
    }
}

impl<T: Classifiable + ?Sized> Classifiable for &T {
    fn category(&self) -> &CategoryRef {
        (**self).category()
    }

    fn region(&self) -> &str {
        (**self).region()
    }

    fn description(&self) -> Option<&str> {
        (**self).description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_category_shapes_deserialize() {
        let flat: Report = serde_json::from_value(serde_json::json!({
            "id": 1,
            "category": 7,
            "region": "Dakar",
            "description": "vol de sac"
        }))
        .unwrap();
        assert_eq!(flat.category, CategoryRef::Id(CategoryId::Number(7)));

        let embedded: Report = serde_json::from_value(serde_json::json!({
            "id": "r-2",
            "category": { "id": 7, "name": "Vol" },
            "region": "Dakar"
        }))
        .unwrap();
        assert!(matches!(embedded.category, CategoryRef::Embedded(ref e) if e.name == "Vol"));
        assert!(embedded.description.is_none());
    }

    #[test]
    fn test_resolve_category_name() {
        let lookup: CategoryLookup = [(7_i64, "Vol"), (8_i64, "Phishing")].into_iter().collect();
        assert_eq!(
            resolve_category_name(&CategoryRef::Id(CategoryId::Number(8)), &lookup),
            "Phishing"
        );
        let embedded = CategoryRef::Embedded(EmbeddedCategory {
            id: None,
            name: "Harcèlement".into(),
        });
        assert_eq!(resolve_category_name(&embedded, &lookup), "Harcèlement");
        assert_eq!(
            resolve_category_name(&CategoryRef::Id(CategoryId::Number(99)), &lookup),
            ""
        );
    }

    #[test]
    fn test_numeric_and_text_ids_share_keys() {
        let lookup: CategoryLookup = [(7_i64, "Vol")].into_iter().collect();
        assert_eq!(lookup.name_of(&CategoryId::Text("7".into())), Some("Vol"));
    }

    #[test]
    fn test_complaint_uses_facts() {
        let complaint: Complaint = serde_json::from_value(serde_json::json!({
            "id": 3,
            "category": { "name": "Autres" },
            "region": "Kolda",
            "facts": "escroquerie",
            "department": "dsc"
        }))
        .unwrap();
        assert_eq!(complaint.description(), Some("escroquerie"));
        assert_eq!(complaint.department, Some(Department::CybercrimeDivision));
    }
}
