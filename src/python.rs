//! Python bindings for the backend, built with the `python` feature.

use pyo3::prelude::*;

use crate::classifier::ReportClassifier;
use crate::report::{CategoryLookup, CategoryRef, Classifiable, EmbeddedCategory};
use crate::rules;
use crate::visibility::{self, UserRole};

/// Classify a report.
///
/// Parameters
/// ----------
/// category : str
///     Category label (already resolved from an id if needed).
/// region : str
///     Free-text region.
/// description : str | None
///     Report description or complaint facts.
///
/// Returns
/// -------
/// tuple[str, str, str]
///     (department, priority, reason), e.g. ("dsc", "high", "...").
#[pyfunction]
#[pyo3(signature = (category, region, description=None))]
pub fn classify_report(
    category: &str,
    region: &str,
    description: Option<&str>,
) -> (String, String, String) {
    let c = ReportClassifier::builtin().classify(category, region, description);
    (
        c.department.as_str().to_string(),
        c.priority.as_str().to_string(),
        c.reason,
    )
}

#[pyfunction]
pub fn is_urban(region: &str) -> bool {
    ReportClassifier::builtin().geography().is_urban(region)
}

#[pyfunction]
pub fn is_rural(region: &str) -> bool {
    ReportClassifier::builtin().geography().is_rural(region)
}

#[pyfunction]
pub fn normalize_category(category: &str) -> String {
    rules::normalize_category(category)
}

#[pyfunction]
#[pyo3(signature = (user_department, report_department, user_role))]
pub fn can_user_view_report(
    user_department: Option<&str>,
    report_department: &str,
    user_role: &str,
) -> bool {
    visibility::can_user_view_report(user_department, report_department, UserRole::from(user_role))
}

/// Indices of the reports a user may see.
///
/// Parameters
/// ----------
/// reports : list[tuple[str, str, str | None]]
///     (category, region, description) per report.
/// user_department : str | None
/// user_role : str
///
/// Returns
/// -------
/// list[int]
///     Positions in `reports` that pass, in input order.
#[pyfunction]
#[pyo3(signature = (reports, user_department, user_role))]
pub fn filter_reports_for_user(
    reports: Vec<(String, String, Option<String>)>,
    user_department: Option<&str>,
    user_role: &str,
) -> Vec<usize> {
    let rows: Vec<ReportRow> = reports.into_iter().map(ReportRow::from).collect();
    ReportClassifier::builtin().visible_indices(
        &rows,
        &CategoryLookup::new(),
        user_department,
        UserRole::from(user_role),
    )
}

/// `(category, region, description)` as passed from Python.
struct ReportRow {
    category: CategoryRef,
    region: String,
    description: Option<String>,
}

impl From<(String, String, Option<String>)> for ReportRow {
    fn from((name, region, description): (String, String, Option<String>)) -> Self {
        Self {
            category: CategoryRef::Embedded(EmbeddedCategory { id: None, name }),
            region,
            description,
        }
    }
}

impl Classifiable for ReportRow {
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

/// Department routing for citizen reports and complaints.
#[pymodule]
fn report_routing(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classification
    m.add_function(wrap_pyfunction!(classify_report, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_category, m)?)?;

    // Geography
    m.add_function(wrap_pyfunction!(is_urban, m)?)?;
    m.add_function(wrap_pyfunction!(is_rural, m)?)?;

    // Visibility
    m.add_function(wrap_pyfunction!(can_user_view_report, m)?)?;
    m.add_function(wrap_pyfunction!(filter_reports_for_user, m)?)?;

    Ok(())
}
