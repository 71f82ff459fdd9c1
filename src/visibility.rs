//! Which users may see which department-tagged reports.
//!
//! Admins and moderators see everything. Authorities see only their own
//! department. Everyone else, including an authority with no department on
//! file, sees nothing through this path.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classifier::ReportClassifier;
use crate::report::{CategoryLookup, CategoryRef, Classifiable};
use crate::types::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Authority,
    Admin,
    Moderator,
    /// Any role string this crate does not know. Denied everywhere.
    #[serde(other)]
    Unknown,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::Authority => "authority",
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
            UserRole::Unknown => "unknown",
        }
    }

    /// Unscoped roles skip per-report checks entirely.
    pub fn sees_all(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Moderator)
    }
}

/// Role strings are matched exactly.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            "citizen" => UserRole::Citizen,
            "authority" => UserRole::Authority,
            "admin" => UserRole::Admin,
            "moderator" => UserRole::Moderator,
            _ => UserRole::Unknown,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of the session user that visibility depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub role: UserRole,
    #[serde(default)]
    pub department: Option<String>,
}

impl UserContext {
    pub fn new(role: UserRole, department: Option<&str>) -> Self {
        Self {
            role,
            department: department.map(str::to_string),
        }
    }

    pub fn can_view(&self, report_department: &str) -> bool {
        can_user_view_report(self.department.as_deref(), report_department, self.role)
    }
}

/// Visibility predicate. Department comparison is exact string equality.
pub fn can_user_view_report(
    user_department: Option<&str>,
    report_department: &str,
    user_role: UserRole,
) -> bool {
    match (user_role, user_department) {
        (UserRole::Admin | UserRole::Moderator, _) => true,
        (UserRole::Authority, Some(department)) => department == report_department,
        _ => false,
    }
}

impl ReportClassifier {
    /// Keep the reports `user` may see, classifying each one afresh.
    ///
    /// Unscoped roles get `reports` back untouched without any
    /// classification work.
    pub fn filter_for_user<T: Classifiable>(
        &self,
        reports: Vec<T>,
        lookup: &CategoryLookup,
        user_department: Option<&str>,
        user_role: UserRole,
    ) -> Vec<T> {
        if user_role.sees_all() {
            debug!(role = %user_role, total = reports.len(), "unscoped role, returning all reports");
            return reports;
        }

        let total = reports.len();
        let visible: Vec<T> = reports
            .into_iter()
            .filter(|report| {
                let department = self.classify_record(report, lookup).department;
                let allowed =
                    can_user_view_report(user_department, department.as_str(), user_role);
                trace!(%department, allowed, "report visibility");
                allowed
            })
            .collect();
        debug!(
            role = %user_role,
            department = user_department.unwrap_or("-"),
            kept = visible.len(),
            total,
            "filtered reports for user"
        );
        visible
    }

    /// Positions in `reports` that `user_role` may see, in input order.
    pub fn visible_indices<T: Classifiable>(
        &self,
        reports: &[T],
        lookup: &CategoryLookup,
        user_department: Option<&str>,
        user_role: UserRole,
    ) -> Vec<usize> {
        let indexed: Vec<Indexed<'_, T>> = reports
            .iter()
            .enumerate()
            .map(|(index, report)| Indexed { index, report })
            .collect();
        self.filter_for_user(indexed, lookup, user_department, user_role)
            .into_iter()
            .map(|r| r.index)
            .collect()
    }

    /// Number of reports routed to each department.
    pub fn department_breakdown<T: Classifiable>(
        &self,
        reports: &[T],
        lookup: &CategoryLookup,
    ) -> BTreeMap<Department, usize> {
        let mut counts = BTreeMap::new();
        for report in reports {
            *counts
                .entry(self.classify_record(report, lookup).department)
                .or_insert(0) += 1;
        }
        counts
    }
}

/// A borrowed report tagged with its position in the caller's list.
struct Indexed<'a, T> {
    index: usize,
    report: &'a T,
}

impl<T: Classifiable> Classifiable for Indexed<'_, T> {
    fn category(&self) -> &CategoryRef {
        self.report.category()
    }

    fn region(&self) -> &str {
        self.report.region()
    }

    fn description(&self) -> Option<&str> {
        self.report.description()
    }
}

/// [`ReportClassifier::filter_for_user`] with the built-in table.
pub fn filter_reports_for_user<T: Classifiable>(
    reports: Vec<T>,
    lookup: &CategoryLookup,
    user_department: Option<&str>,
    user_role: UserRole,
) -> Vec<T> {
    ReportClassifier::builtin().filter_for_user(reports, lookup, user_department, user_role)
}

/// [`ReportClassifier::department_breakdown`] with the built-in table.
pub fn department_breakdown<T: Classifiable>(
    reports: &[T],
    lookup: &CategoryLookup,
) -> BTreeMap<Department, usize> {
    ReportClassifier::builtin().department_breakdown(reports, lookup)
}
