//! Assignments: placements of one employee at one site.

use super::employees::{list_employees, EmployeeFilter};
use crate::api::ApiClient;
use chrono::NaiveDate;
use sd_common::{
    Assignment, AssignmentStatus, Employee, EmployeeStatus, EndAssignment, NewAssignment,
    RecordId, Result,
};
use serde_json::Value;
use tracing::info;

pub fn list_assignments(
    api: &ApiClient,
    status: Option<&AssignmentStatus>,
) -> Result<Vec<Assignment>> {
    match status {
        Some(status) => api.get("/api/assignments", &[("status", status.label())]),
        None => api.get("/api/assignments", &[]),
    }
}

pub fn create_assignment(api: &ApiClient, assignment: &NewAssignment) -> Result<()> {
    api.post::<_, Value>("/api/assignments", assignment)?;
    info!(
        employee_id = assignment.employee_id,
        site_id = assignment.site_id,
        "assignment created"
    );
    Ok(())
}

/// Mark an assignment ended as of `today`.
pub fn end_assignment(api: &ApiClient, id: RecordId, today: NaiveDate) -> Result<()> {
    api.put::<_, Value>(&format!("/api/assignments/{}", id), &EndAssignment::on(today))?;
    info!(id, "assignment ended");
    Ok(())
}

/// Employees that can be placed: those on standby.
pub fn candidate_employees(api: &ApiClient) -> Result<Vec<Employee>> {
    list_employees(api, &EmployeeFilter::with_status(EmployeeStatus::Standby))
}
