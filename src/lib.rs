//! Department routing for citizen crime reports and complaints.
//!
//! Routes each report to one of four departments:
//! 1. data protection authority (`cdp`)
//! 2. cybercrime division (`dsc`)
//! 3. police
//! 4. gendarmerie
//!
//! and decides which authority accounts may see it. Everything here is pure
//! and infallible except loading an alternate routing table.
//!
//! With the `python` feature the crate also builds as a Python extension
//! module for the backend.

pub mod classifier;
pub mod config;
pub mod error;
pub mod geography;
pub mod keywords;
pub mod report;
pub mod rules;
pub mod types;
pub mod visibility;

#[cfg(feature = "python")]
mod python;

pub use classifier::{classify_report, ReportClassifier, DEFAULT_REASON};
pub use config::RoutingConfig;
pub use error::{Result, RoutingError};
pub use geography::{GeographicResolver, Locality};
pub use report::{
    resolve_category_name, CategoryId, CategoryLookup, CategoryRef, Classifiable, Complaint,
    EmbeddedCategory, RecordId, Report,
};
pub use rules::normalize_category;
pub use types::{Classification, Department, Priority};
pub use visibility::{
    can_user_view_report, department_breakdown, filter_reports_for_user, UserContext, UserRole,
};

/// `true` when the region matches the built-in urban locality list.
pub fn is_urban(region: &str) -> bool {
    ReportClassifier::builtin().geography().is_urban(region)
}

/// `true` when the region matches the built-in rural locality list.
pub fn is_rural(region: &str) -> bool {
    ReportClassifier::builtin().geography().is_rural(region)
}
