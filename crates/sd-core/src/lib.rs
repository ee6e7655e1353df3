//! Staffdesk Core Library
//!
//! This library provides the client side of the staffing dashboard:
//! - A blocking REST client for the staffing backend
//! - Page services (employees, sites, assignments, servers, dashboard, reports)
//! - The persisted login session
//! - Exit codes, logging setup and output rendering for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod api;
pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod pages;
pub mod session;
