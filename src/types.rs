//! Routing vocabulary: departments, priorities and the classification triple.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Government body a report is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    /// Commission de protection des données personnelles.
    #[serde(rename = "cdp")]
    DataProtectionAuthority,
    /// Division spéciale de cybersécurité.
    #[serde(rename = "dsc")]
    CybercrimeDivision,
    #[serde(rename = "police")]
    Police,
    #[serde(rename = "gendarmerie")]
    Gendarmerie,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::DataProtectionAuthority,
        Department::CybercrimeDivision,
        Department::Police,
        Department::Gendarmerie,
    ];

    /// Wire value stored alongside reports and on authority accounts.
    pub fn as_str(self) -> &'static str {
        match self {
            Department::DataProtectionAuthority => "cdp",
            Department::CybercrimeDivision => "dsc",
            Department::Police => "police",
            Department::Gendarmerie => "gendarmerie",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Department {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "department",
                value: s.to_string(),
            })
    }
}

/// Handling urgency. Ordered from `Low` to `Urgent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownValue {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// Outcome of routing one report.
///
/// `reason` is an audit string for display; nothing branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub department: Department,
    pub priority: Priority,
    pub reason: String,
}

impl Classification {
    pub fn new(department: Department, priority: Priority, reason: impl Into<String>) -> Self {
        Self {
            department,
            priority,
            reason: reason.into(),
        }
    }
}
