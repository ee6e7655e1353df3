//! Dashboard statistics.

use crate::api::ApiClient;
use sd_common::{DashboardStats, EmployeeStatus, Result};
use tracing::warn;

pub fn fetch_stats(api: &ApiClient) -> Result<DashboardStats> {
    api.get("/api/dashboard/stats", &[])
}

/// The four headline counters: total, dispatched, standby, sites.
pub fn headline(stats: &DashboardStats) -> [(&'static str, u64); 4] {
    [
        ("전체 인원", stats.total),
        ("파견중", stats.count_for(&EmployeeStatus::Dispatched)),
        ("대기", stats.count_for(&EmployeeStatus::Standby)),
        ("파견 사이트", stats.site_count() as u64),
    ]
}

#[derive(Debug, Clone, Default)]
pub struct DashboardPage {
    pub stats: Option<DashboardStats>,
}

impl DashboardPage {
    pub fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        match fetch_stats(api) {
            Ok(stats) => {
                self.stats = Some(stats);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch stats");
                Err(err)
            }
        }
    }
}
