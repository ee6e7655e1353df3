//! Staffdesk common types, status vocabularies, and errors.
//!
//! This crate provides the records exchanged with the staffing backend and
//! the fixed Korean vocabularies the client displays:
//! - Employees, skills, client sites, assignments, servers, reports
//! - Status enumerations with pure badge/tone mapping functions
//! - Tolerant deserializers for optional or loosely-typed wire fields
//! - The unified error type and output format selection

#[macro_use]
mod macros;

pub mod badge;
pub mod dashboard;
pub mod de;
pub mod employee;
pub mod error;
pub mod format;
pub mod output;
pub mod report;
pub mod server;
pub mod site;
pub mod user;

pub use badge::Badge;
pub use dashboard::{DashboardStats, ExpiringAssignment, ExpiringContract, Severity, SiteStat};
pub use employee::{
    Employee, EmployeeStatus, EmployeeUpdate, NewEmployee, Skill, SkillLevel, SkillSelection,
};
pub use error::{Error, ErrorCategory, Result};
pub use output::OutputFormat;
pub use report::{
    GeneratedReport, Report, ReportSummary, SaveReportRequest, SavedReport, StatsSnapshot,
};
pub use server::{Ping, Server, ServerForm, ServerStatus, ServerSummary, StatusDot};
pub use site::{
    Assignment, AssignmentStatus, ContractType, EndAssignment, NewAssignment, Site, SiteForm,
    SiteStatus,
};
pub use user::{LoginRequest, User};

/// Identifier type used by every backend record.
pub type RecordId = i64;
