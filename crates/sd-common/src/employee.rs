//! Employee roster records and the registration form.

use crate::badge::Badge;
use crate::de::{null_default, opt_text, opt_u32};
use crate::error::{Error, Result};
use crate::RecordId;
use serde::{Deserialize, Serialize};

labeled_enum! {
    /// Employment state of a roster entry.
    pub enum EmployeeStatus {
        /// Currently placed at a client site.
        Dispatched => "파견중",
        /// Waiting for a placement.
        Standby => "대기",
        /// Employed, not a dispatch candidate.
        Employed => "재직",
        /// Left the company.
        Resigned => "퇴사",
    }
}

impl EmployeeStatus {
    /// Badge tone for the roster table.
    pub fn badge(&self) -> Badge {
        match self {
            EmployeeStatus::Dispatched => Badge::Success,
            EmployeeStatus::Standby => Badge::Warning,
            EmployeeStatus::Employed => Badge::Primary,
            EmployeeStatus::Resigned => Badge::Danger,
            EmployeeStatus::Other(_) => Badge::Primary,
        }
    }
}

labeled_enum! {
    /// Self-reported proficiency for a skill.
    pub enum SkillLevel {
        Beginner => "초급",
        Intermediate => "중급",
        Advanced => "고급",
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        SkillLevel::Intermediate
    }
}

/// Category used when a skill has none.
pub const DEFAULT_SKILL_CATEGORY: &str = "기타";

/// A skill from the backend catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub category: Option<String>,
}

impl Skill {
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_SKILL_CATEGORY)
    }
}

/// Group skills by category, keeping categories in first-seen order.
pub fn group_skills_by_category(skills: &[Skill]) -> Vec<(String, Vec<Skill>)> {
    let mut groups: Vec<(String, Vec<Skill>)> = Vec::new();
    for skill in skills {
        let category = skill.category_label();
        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, members)) => members.push(skill.clone()),
            None => groups.push((category.to_string(), vec![skill.clone()])),
        }
    }
    groups
}

/// A skill picked on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSelection {
    pub id: RecordId,
    #[serde(default)]
    pub level: SkillLevel,
}

/// Roster entry as returned by `GET /api/employees[/{id}]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_u32")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "opt_text")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub applied_part: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    /// Comma-separated skill names (detail view only).
    #[serde(default, deserialize_with = "opt_text")]
    pub skills: Option<String>,
}

impl Employee {
    /// Skill names split out of the comma-separated `skills` column.
    pub fn skill_tags(&self) -> Vec<&str> {
        self.skills
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn status_badge(&self) -> Badge {
        self.status
            .as_ref()
            .map(EmployeeStatus::badge)
            .unwrap_or(Badge::Primary)
    }

    /// Merge an edit into this record before it is sent back with `PUT`.
    pub fn apply(&mut self, update: EmployeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(applied_part) = update.applied_part {
            self.applied_part = Some(applied_part);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(position) = update.position {
            self.position = Some(position);
        }
        if let Some(status) = update.status {
            self.status = Some(status);
        }
    }
}

/// Fields editable from the detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub applied_part: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        *self == EmployeeUpdate::default()
    }
}

/// Registration form body for `POST /api/employees`.
///
/// Fields stay as strings, matching what the form collects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub applied_part: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub hire_date: String,
    #[serde(default)]
    pub skills: Vec<SkillSelection>,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Only the name is required.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("이름은 필수입니다.".to_string()));
        }
        Ok(())
    }

    /// Select a skill at the default level, or deselect it if already picked.
    pub fn toggle_skill(&mut self, skill_id: RecordId) {
        if let Some(pos) = self.skills.iter().position(|s| s.id == skill_id) {
            self.skills.remove(pos);
        } else {
            self.skills.push(SkillSelection {
                id: skill_id,
                level: SkillLevel::default(),
            });
        }
    }

    /// Change the level of an already selected skill. Unselected ids are ignored.
    pub fn set_skill_level(&mut self, skill_id: RecordId, level: SkillLevel) {
        for selection in self.skills.iter_mut().filter(|s| s.id == skill_id) {
            selection.level = level.clone();
        }
    }
}
