//! Client sites with their active and ended assignments.

use super::assignments::{candidate_employees, create_assignment, end_assignment, list_assignments};
use super::{DELETE_CONFIRM_PROMPT, END_ASSIGNMENT_PROMPT};
use crate::api::ApiClient;
use chrono::NaiveDate;
use sd_common::{
    Assignment, AssignmentStatus, Employee, NewAssignment, RecordId, Result, Site, SiteForm,
};
use serde_json::Value;
use tracing::{info, warn};

pub fn list_sites(api: &ApiClient) -> Result<Vec<Site>> {
    api.get("/api/sites", &[])
}

pub fn create_site(api: &ApiClient, form: &SiteForm) -> Result<()> {
    form.validate()?;
    api.post::<_, Value>("/api/sites", form).map(|_| ())
}

pub fn update_site(api: &ApiClient, id: RecordId, form: &SiteForm) -> Result<()> {
    form.validate()?;
    api.put::<_, Value>(&format!("/api/sites/{}", id), form)
        .map(|_| ())
}

pub fn delete_site(api: &ApiClient, id: RecordId) -> Result<()> {
    api.delete(&format!("/api/sites/{}", id))
}

/// Site management page state.
#[derive(Debug, Clone, Default)]
pub struct SitePage {
    pub sites: Vec<Site>,
    /// Assignments with status 진행중.
    pub active: Vec<Assignment>,
    /// Assignments with status 종료.
    pub history: Vec<Assignment>,
    /// Standby employees offered for a new assignment.
    pub candidates: Vec<Employee>,
}

impl SitePage {
    /// Fetch all four lists. Nothing is replaced unless every fetch succeeds.
    pub fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        let fetched = (|| {
            Ok::<_, sd_common::Error>((
                list_sites(api)?,
                list_assignments(api, Some(&AssignmentStatus::Active))?,
                list_assignments(api, Some(&AssignmentStatus::Ended))?,
                candidate_employees(api)?,
            ))
        })();
        match fetched {
            Ok((sites, active, history, candidates)) => {
                self.sites = sites;
                self.active = active;
                self.history = history;
                self.candidates = candidates;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch site data");
                Err(err)
            }
        }
    }

    /// Create when `editing` is `None`, update otherwise; then re-fetch.
    pub fn save(
        &mut self,
        api: &ApiClient,
        editing: Option<RecordId>,
        form: &SiteForm,
    ) -> Result<()> {
        let saved = match editing {
            Some(id) => update_site(api, id, form),
            None => create_site(api, form),
        };
        if let Err(err) = saved {
            warn!(error = %err, "failed to save site");
            return Err(err);
        }
        info!(name = %form.name, editing = ?editing, "site saved");
        self.refresh(api)
    }

    pub fn delete(
        &mut self,
        api: &ApiClient,
        id: RecordId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool> {
        if !confirm(DELETE_CONFIRM_PROMPT) {
            return Ok(false);
        }
        delete_site(api, id).map_err(|err| {
            warn!(id, error = %err, "failed to delete site");
            err
        })?;
        info!(id, "site deleted");
        self.refresh(api)?;
        Ok(true)
    }

    pub fn assign(&mut self, api: &ApiClient, assignment: &NewAssignment) -> Result<()> {
        create_assignment(api, assignment).map_err(|err| {
            warn!(error = %err, "failed to create assignment");
            err
        })?;
        self.refresh(api)
    }

    pub fn end_assignment(
        &mut self,
        api: &ApiClient,
        id: RecordId,
        today: NaiveDate,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool> {
        if !confirm(END_ASSIGNMENT_PROMPT) {
            return Ok(false);
        }
        end_assignment(api, id, today).map_err(|err| {
            warn!(id, error = %err, "failed to end assignment");
            err
        })?;
        self.refresh(api)?;
        Ok(true)
    }

    /// Active assignments at one site.
    pub fn assignments_at(&self, site_id: RecordId) -> Vec<&Assignment> {
        self.active.iter().filter(|a| a.site_id == site_id).collect()
    }
}
