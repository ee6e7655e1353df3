//! Server inventory records and liveness display rules.

use crate::de::{null_default, opt_number, opt_text};
use crate::error::{Error, Result};
use crate::RecordId;
use serde::{Deserialize, Serialize};

labeled_enum! {
    /// Operator-set state of a server.
    pub enum ServerStatus {
        Running => "운영중",
        Maintenance => "점검중",
        Stopped => "중지",
    }
}

impl Default for ServerStatus {
    fn default() -> Self {
        ServerStatus::Running
    }
}

/// Result of a liveness probe from `GET /api/servers/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    #[serde(default, deserialize_with = "null_default")]
    pub alive: bool,
    #[serde(default, deserialize_with = "opt_number")]
    pub latency: Option<f64>,
}

/// Indicator dot next to the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusDot {
    Online,
    Maintenance,
    Offline,
}

impl StatusDot {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusDot::Online => "online",
            StatusDot::Maintenance => "maintenance",
            StatusDot::Offline => "offline",
        }
    }
}

/// Server inventory entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub ip_address: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub os: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub cpu: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub memory: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub disk: Option<String>,
    #[serde(default)]
    pub status: Option<ServerStatus>,
    /// Last probe result; never persisted by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping: Option<Ping>,
}

impl Server {
    pub fn status_or_default(&self) -> ServerStatus {
        self.status.clone().unwrap_or_default()
    }

    /// A failed probe overrides the stored status.
    pub fn status_dot(&self) -> StatusDot {
        if matches!(self.ping, Some(Ping { alive: false, .. })) {
            return StatusDot::Offline;
        }
        match self.status_or_default() {
            ServerStatus::Maintenance => StatusDot::Maintenance,
            ServerStatus::Stopped => StatusDot::Offline,
            _ => StatusDot::Online,
        }
    }

    pub fn status_text(&self) -> String {
        match &self.ping {
            Some(Ping { alive: false, .. }) => "응답없음".to_string(),
            Some(Ping {
                alive: true,
                latency,
            }) => match latency {
                Some(ms) => format!("정상 ({}ms)", format_latency(*ms)),
                None => "정상".to_string(),
            },
            None => self.status_or_default().label().to_string(),
        }
    }

    /// CPU, RAM and disk joined for the 사양 column.
    pub fn spec_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(cpu) = &self.cpu {
            lines.push(format!("CPU: {}", cpu));
        }
        if let Some(memory) = &self.memory {
            lines.push(format!("RAM: {}", memory));
        }
        if let Some(disk) = &self.disk {
            lines.push(format!("Disk: {}", disk));
        }
        lines
    }

    pub fn to_form(&self) -> ServerForm {
        ServerForm {
            name: self.name.clone(),
            ip_address: self.ip_address.clone().unwrap_or_default(),
            os: self.os.clone().unwrap_or_default(),
            purpose: self.purpose.clone().unwrap_or_default(),
            cpu: self.cpu.clone().unwrap_or_default(),
            memory: self.memory.clone().unwrap_or_default(),
            disk: self.disk.clone().unwrap_or_default(),
            status: self.status_or_default(),
        }
    }
}

fn format_latency(ms: f64) -> String {
    if ms.fract() == 0.0 {
        format!("{}", ms as i64)
    } else {
        format!("{:.1}", ms)
    }
}

/// Body for `POST /api/servers` and `PUT /api/servers/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerForm {
    pub name: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub disk: String,
    #[serde(default)]
    pub status: ServerStatus,
}

impl ServerForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("서버명은 필수입니다.".to_string()));
        }
        Ok(())
    }
}

/// Header counters on the system page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub total: usize,
    pub running: usize,
    pub maintenance: usize,
    pub stopped: usize,
}

impl ServerSummary {
    /// Counts use the stored status only; probe results do not move servers between buckets.
    pub fn from_servers(servers: &[Server]) -> Self {
        let count = |want: ServerStatus| {
            servers
                .iter()
                .filter(|s| s.status.as_ref() == Some(&want))
                .count()
        };
        Self {
            total: servers.len(),
            running: count(ServerStatus::Running),
            maintenance: count(ServerStatus::Maintenance),
            stopped: count(ServerStatus::Stopped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: Option<ServerStatus>, ping: Option<Ping>) -> Server {
        Server {
            id: 1,
            name: "Web-Server-01".into(),
            status,
            ping,
            ..Default::default()
        }
    }

    #[test]
    fn test_dot_prefers_failed_probe() {
        let s = server(
            Some(ServerStatus::Running),
            Some(Ping { alive: false, latency: None }),
        );
        assert_eq!(s.status_dot(), StatusDot::Offline);
        assert_eq!(s.status_text(), "응답없음");
    }

    #[test]
    fn test_dot_from_stored_status() {
        assert_eq!(server(Some(ServerStatus::Maintenance), None).status_dot(), StatusDot::Maintenance);
        assert_eq!(server(Some(ServerStatus::Stopped), None).status_dot(), StatusDot::Offline);
        assert_eq!(server(None, None).status_dot(), StatusDot::Online);
        assert_eq!(server(Some("폐기".into()), None).status_dot(), StatusDot::Online);
    }

    #[test]
    fn test_alive_probe_text() {
        let s = server(
            Some(ServerStatus::Stopped),
            Some(Ping { alive: true, latency: Some(12.0) }),
        );
        assert_eq!(s.status_text(), "정상 (12ms)");
        // A live probe does not override a stopped dot.
        assert_eq!(s.status_dot(), StatusDot::Offline);
    }

    #[test]
    fn test_text_without_probe_is_stored_status() {
        assert_eq!(server(Some(ServerStatus::Maintenance), None).status_text(), "점검중");
        assert_eq!(server(None, None).status_text(), "운영중");
    }

    #[test]
    fn test_summary_counts() {
        let servers = vec![
            server(Some(ServerStatus::Running), None),
            server(Some(ServerStatus::Running), Some(Ping { alive: false, latency: None })),
            server(Some(ServerStatus::Maintenance), None),
            server(None, None),
        ];
        let summary = ServerSummary::from_servers(&servers);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.running, 2);
        assert_eq!(summary.maintenance, 1);
        assert_eq!(summary.stopped, 0);
    }

    #[test]
    fn test_spec_lines_skip_missing() {
        let mut s = server(None, None);
        s.cpu = Some("Intel Xeon 8 Core".into());
        s.disk = Some("500GB SSD".into());
        assert_eq!(s.spec_lines(), vec!["CPU: Intel Xeon 8 Core", "Disk: 500GB SSD"]);
    }
}
