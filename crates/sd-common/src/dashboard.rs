//! Dashboard statistics.

use crate::badge::Badge;
use crate::de::{count_or_len, list_or_empty, null_default, opt_text};
use crate::employee::{Employee, EmployeeStatus};
use crate::RecordId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Alerts at or below this many days are shown as urgent.
pub const URGENT_DAYS: i64 = 7;

/// Urgency of an expiring contract or assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Danger,
}

impl Severity {
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left <= URGENT_DAYS {
            Severity::Danger
        } else {
            Severity::Warning
        }
    }

    pub fn badge(&self) -> Badge {
        match self {
            Severity::Warning => Badge::Warning,
            Severity::Danger => Badge::Danger,
        }
    }
}

/// Headcount per site, for the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStat {
    #[serde(default, deserialize_with = "null_default")]
    pub site_name: String,
    #[serde(default, deserialize_with = "count_or_len")]
    pub employee_count: u64,
}

/// Site contract ending within 30 days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringContract {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub contract_end: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub days_left: i64,
}

impl ExpiringContract {
    pub fn severity(&self) -> Severity {
        Severity::from_days_left(self.days_left)
    }
}

/// Placement ending within 30 days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringAssignment {
    #[serde(default, deserialize_with = "null_default")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub applied_part: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub site_name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub days_left: i64,
}

impl ExpiringAssignment {
    pub fn severity(&self) -> Severity {
        Severity::from_days_left(self.days_left)
    }
}

/// Response of `GET /api/dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "count_or_len")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub status_counts: HashMap<String, u64>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub site_stats: Vec<SiteStat>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub recent_employees: Vec<Employee>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub expiring_contracts: Vec<ExpiringContract>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub expiring_assignments: Vec<ExpiringAssignment>,
}

impl DashboardStats {
    pub fn count_for(&self, status: &EmployeeStatus) -> u64 {
        self.status_counts.get(status.label()).copied().unwrap_or(0)
    }

    /// Status distribution for the pie chart, zero buckets removed.
    pub fn status_distribution(&self) -> Vec<(EmployeeStatus, u64)> {
        EmployeeStatus::KNOWN
            .iter()
            .map(|status| (status.clone(), self.count_for(status)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn site_count(&self) -> usize {
        self.site_stats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_threshold() {
        assert_eq!(Severity::from_days_left(7), Severity::Danger);
        assert_eq!(Severity::from_days_left(0), Severity::Danger);
        assert_eq!(Severity::from_days_left(8), Severity::Warning);
    }

    #[test]
    fn test_distribution_skips_zero() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total": 5, "statusCounts": {"파견중": 3, "대기": 0, "퇴사": 2}}"#,
        )
        .unwrap();
        let dist = stats.status_distribution();
        assert_eq!(
            dist,
            vec![(EmployeeStatus::Dispatched, 3), (EmployeeStatus::Resigned, 2)]
        );
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"statusCounts": null, "siteStats": null}"#).unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.site_count(), 0);
        assert!(stats.status_distribution().is_empty());
        assert_eq!(stats.count_for(&EmployeeStatus::Standby), 0);
    }

    #[test]
    fn test_expiring_lists() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"expiringContracts": [{"name": "A", "contract_end": "2025-01-10", "days_left": 3}],
                "expiringAssignments": [{"id": 9, "employee_name": "B", "site_name": "C",
                                          "end_date": "2025-01-30T00:00:00Z", "days_left": 20}]}"#,
        )
        .unwrap();
        assert_eq!(stats.expiring_contracts[0].severity(), Severity::Danger);
        assert_eq!(stats.expiring_assignments[0].severity(), Severity::Warning);
    }
}
