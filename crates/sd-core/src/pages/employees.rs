//! Employee registration, roster, and skills.

use super::{borrow_query, DELETE_CONFIRM_PROMPT};
use crate::api::{ApiClient, Method};
use sd_common::employee::group_skills_by_category;
use sd_common::{
    Employee, EmployeeStatus, EmployeeUpdate, Error, NewEmployee, RecordId, Result, Skill,
};
use serde_json::Value;
use tracing::{info, warn};

pub const REGISTERED_MESSAGE: &str = "인력이 성공적으로 등록되었습니다!";
pub const REGISTER_REJECTED_MESSAGE: &str = "등록 실패";
pub const REGISTER_ERROR_MESSAGE: &str = "등록 중 오류가 발생했습니다.";

/// Roster filter. Empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
    pub search: Option<String>,
}

impl EmployeeFilter {
    pub fn with_status(status: EmployeeStatus) -> Self {
        Self {
            status: Some(status),
            search: None,
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.label().to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        pairs
    }
}

pub fn list_employees(api: &ApiClient, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
    let query = filter.query();
    api.get("/api/employees", &borrow_query(&query))
}

pub fn get_employee(api: &ApiClient, id: RecordId) -> Result<Employee> {
    api.get(&format!("/api/employees/{}", id), &[])
}

/// `PUT` the full record.
pub fn put_employee(api: &ApiClient, employee: &Employee) -> Result<()> {
    api.put::<_, Value>(&format!("/api/employees/{}", employee.id), employee)
        .map(|_| ())
}

pub fn delete_employee(api: &ApiClient, id: RecordId) -> Result<()> {
    api.delete(&format!("/api/employees/{}", id))
}

pub fn list_skills(api: &ApiClient) -> Result<Vec<Skill>> {
    api.get("/api/skills", &[])
}

/// Skills grouped by category for the registration form.
pub fn skill_groups(api: &ApiClient) -> Result<Vec<(String, Vec<Skill>)>> {
    list_skills(api).map(|skills| group_skills_by_category(&skills))
}

/// Answer to a registration that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created(RecordId),
    Rejected(String),
}

impl RegisterOutcome {
    pub fn message(&self) -> &str {
        match self {
            RegisterOutcome::Created(_) => REGISTERED_MESSAGE,
            RegisterOutcome::Rejected(message) => message,
        }
    }
}

/// Register a new employee.
///
/// The name is checked before any request. A body carrying an `id` is a
/// success whatever the status; otherwise the body's `message` or
/// [`REGISTER_REJECTED_MESSAGE`] is the rejection text.
pub fn register_employee(api: &ApiClient, form: &NewEmployee) -> Result<RegisterOutcome> {
    form.validate()?;
    let body = serde_json::to_value(form)?;
    let raw = api.send_raw(Method::Post, "/api/employees", &[], Some(&body))?;

    match raw.body.get("id").and_then(Value::as_i64) {
        Some(id) => {
            info!(id, name = %form.name, "employee registered");
            Ok(RegisterOutcome::Created(id))
        }
        None => {
            let message = raw
                .message()
                .unwrap_or_else(|| REGISTER_REJECTED_MESSAGE.to_string());
            warn!(status = raw.status, %message, "registration rejected");
            Ok(RegisterOutcome::Rejected(message))
        }
    }
}

/// Inline text for a registration error.
pub fn register_error_message(err: &Error) -> String {
    match err {
        Error::Validation(message) => message.clone(),
        _ => REGISTER_ERROR_MESSAGE.to_string(),
    }
}

/// Roster page state.
#[derive(Debug, Clone, Default)]
pub struct EmployeeListPage {
    pub filter: EmployeeFilter,
    pub employees: Vec<Employee>,
    /// Record open in the detail view.
    pub selected: Option<Employee>,
}

impl EmployeeListPage {
    pub fn new(filter: EmployeeFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        match list_employees(api, &self.filter) {
            Ok(employees) => {
                self.employees = employees;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch employees");
                Err(err)
            }
        }
    }

    pub fn view(&mut self, api: &ApiClient, id: RecordId) -> Result<&Employee> {
        let employee = get_employee(api, id).map_err(|err| {
            warn!(id, error = %err, "failed to fetch employee");
            err
        })?;
        Ok(&*self.selected.insert(employee))
    }

    /// Apply `update` to the record, `PUT` it, and re-fetch the roster.
    pub fn update(&mut self, api: &ApiClient, id: RecordId, update: EmployeeUpdate) -> Result<()> {
        let mut employee = match &self.selected {
            Some(current) if current.id == id => current.clone(),
            _ => get_employee(api, id)?,
        };
        employee.apply(update);
        put_employee(api, &employee).map_err(|err| {
            warn!(id, error = %err, "failed to update employee");
            err
        })?;
        info!(id, "employee updated");
        self.selected = None;
        self.refresh(api)
    }

    /// Returns `Ok(false)` when `confirm` declines; no request is sent then.
    pub fn delete(
        &mut self,
        api: &ApiClient,
        id: RecordId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool> {
        if !confirm(DELETE_CONFIRM_PROMPT) {
            return Ok(false);
        }
        delete_employee(api, id).map_err(|err| {
            warn!(id, error = %err, "failed to delete employee");
            err
        })?;
        info!(id, "employee deleted");
        if self.selected.as_ref().map(|e| e.id) == Some(id) {
            self.selected = None;
        }
        self.refresh(api)?;
        Ok(true)
    }
}
