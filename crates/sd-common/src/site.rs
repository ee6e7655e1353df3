//! Client sites and the assignments that place employees there.

use crate::badge::Badge;
use crate::de::{null_default, opt_number, opt_text, opt_u32};
use crate::error::{Error, Result};
use crate::RecordId;
use serde::{Deserialize, Serialize};

labeled_enum! {
    /// Contract state of a client site.
    pub enum SiteStatus {
        Active => "진행중",
        Ended => "종료",
        Pending => "대기",
    }
}

impl Default for SiteStatus {
    fn default() -> Self {
        SiteStatus::Active
    }
}

impl SiteStatus {
    pub fn badge(&self) -> Badge {
        match self {
            SiteStatus::Active => Badge::Success,
            _ => Badge::Danger,
        }
    }
}

labeled_enum! {
    /// Commercial form of a site contract.
    pub enum ContractType {
        Dispatch => "파견",
        Subcontract => "도급",
        Freelance => "프리랜서",
    }
}

impl Default for ContractType {
    fn default() -> Self {
        ContractType::Dispatch
    }
}

labeled_enum! {
    /// Whether a placement is still running.
    pub enum AssignmentStatus {
        Active => "진행중",
        Ended => "종료",
    }
}

impl AssignmentStatus {
    pub fn badge(&self) -> Badge {
        match self {
            AssignmentStatus::Active => Badge::Success,
            _ => Badge::Secondary,
        }
    }
}

/// Client site as returned by `GET /api/sites`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub contact_phone: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub contract_start: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub contract_end: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub contract_amount: Option<f64>,
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    #[serde(default)]
    pub status: Option<SiteStatus>,
    #[serde(default, deserialize_with = "opt_u32")]
    pub employee_count: Option<u32>,
}

impl Site {
    pub fn status_or_default(&self) -> SiteStatus {
        self.status.clone().unwrap_or_default()
    }

    /// Prefill the edit form from this record.
    pub fn to_form(&self) -> SiteForm {
        SiteForm {
            name: self.name.clone(),
            address: self.address.clone().unwrap_or_default(),
            contact_person: self.contact_person.clone().unwrap_or_default(),
            contact_phone: self.contact_phone.clone().unwrap_or_default(),
            contract_start: self
                .contract_start
                .as_deref()
                .map(crate::format::date_part)
                .unwrap_or_default()
                .to_string(),
            contract_end: self
                .contract_end
                .as_deref()
                .map(crate::format::date_part)
                .unwrap_or_default()
                .to_string(),
            contract_amount: self
                .contract_amount
                .map(|a| format!("{}", a as i64))
                .unwrap_or_default(),
            contract_type: self.contract_type.clone().unwrap_or_default(),
            status: self.status_or_default(),
        }
    }
}

/// Body for `POST /api/sites` and `PUT /api/sites/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteForm {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub contract_start: String,
    #[serde(default)]
    pub contract_end: String,
    #[serde(default)]
    pub contract_amount: String,
    #[serde(default)]
    pub contract_type: ContractType,
    #[serde(default)]
    pub status: SiteStatus,
}

impl SiteForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("사이트명은 필수입니다.".to_string()));
        }
        Ok(())
    }
}

/// Placement of one employee at one site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub employee_id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub site_id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub site_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub applied_part: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub monthly_rate: Option<f64>,
    #[serde(default)]
    pub status: Option<AssignmentStatus>,
}

/// Body for `POST /api/assignments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub employee_id: RecordId,
    pub site_id: RecordId,
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub monthly_rate: String,
}

impl NewAssignment {
    /// New placement starting on `today`, as the assign dialog prefills it.
    pub fn starting(employee_id: RecordId, site_id: RecordId, today: chrono::NaiveDate) -> Self {
        Self {
            employee_id,
            site_id,
            start_date: today.format("%Y-%m-%d").to_string(),
            end_date: String::new(),
            monthly_rate: String::new(),
        }
    }
}

/// Body for ending a placement via `PUT /api/assignments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndAssignment {
    pub status: AssignmentStatus,
    pub end_date: String,
}

impl EndAssignment {
    pub fn on(today: chrono::NaiveDate) -> Self {
        Self {
            status: AssignmentStatus::Ended,
            end_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}
