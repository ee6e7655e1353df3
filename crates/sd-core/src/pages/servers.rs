//! Server inventory and liveness checks.
//!
//! Checking all servers probes them one after another in list order. A slow
//! probe delays the rest; a failed probe is logged and the loop moves on.

use super::DELETE_CONFIRM_PROMPT;
use crate::api::ApiClient;
use sd_common::{Ping, RecordId, Result, Server, ServerForm, ServerSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Body of `GET /api/servers/{id}/status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusProbe {
    #[serde(default)]
    pub ping: Option<Ping>,
}

pub fn list_servers(api: &ApiClient) -> Result<Vec<Server>> {
    api.get("/api/servers", &[])
}

pub fn probe_server(api: &ApiClient, id: RecordId) -> Result<StatusProbe> {
    api.get(&format!("/api/servers/{}/status", id), &[])
}

pub fn create_server(api: &ApiClient, form: &ServerForm) -> Result<()> {
    form.validate()?;
    api.post::<_, Value>("/api/servers", form).map(|_| ())
}

pub fn update_server(api: &ApiClient, id: RecordId, form: &ServerForm) -> Result<()> {
    form.validate()?;
    api.put::<_, Value>(&format!("/api/servers/{}", id), form)
        .map(|_| ())
}

pub fn delete_server(api: &ApiClient, id: RecordId) -> Result<()> {
    api.delete(&format!("/api/servers/{}", id))
}

/// Outcome of a check-all pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Servers whose probe succeeded, in probe order.
    pub checked: Vec<RecordId>,
    /// Servers whose probe failed, with the error text.
    pub failed: Vec<(RecordId, String)>,
}

/// Server status page state.
#[derive(Debug, Clone, Default)]
pub struct ServerPage {
    pub servers: Vec<Server>,
}

impl ServerPage {
    pub fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        match list_servers(api) {
            Ok(servers) => {
                self.servers = servers;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch servers");
                Err(err)
            }
        }
    }

    pub fn summary(&self) -> ServerSummary {
        ServerSummary::from_servers(&self.servers)
    }

    /// Probe one server and merge its `ping` into the matching record.
    ///
    /// On failure the record is left as it was.
    pub fn check(&mut self, api: &ApiClient, id: RecordId) -> Result<()> {
        let probe = probe_server(api, id).map_err(|err| {
            warn!(id, error = %err, "failed to check status");
            err
        })?;
        debug!(id, ping = ?probe.ping, "status checked");
        if let Some(server) = self.servers.iter_mut().find(|s| s.id == id) {
            server.ping = probe.ping;
        }
        Ok(())
    }

    /// Probe every listed server sequentially. No retry, no concurrency.
    pub fn check_all(&mut self, api: &ApiClient) -> CheckReport {
        let ids: Vec<RecordId> = self.servers.iter().map(|s| s.id).collect();
        let mut report = CheckReport::default();
        for id in ids {
            match self.check(api, id) {
                Ok(()) => report.checked.push(id),
                Err(err) => report.failed.push((id, err.to_string())),
            }
        }
        info!(
            checked = report.checked.len(),
            failed = report.failed.len(),
            "server check finished"
        );
        report
    }

    pub fn save(
        &mut self,
        api: &ApiClient,
        editing: Option<RecordId>,
        form: &ServerForm,
    ) -> Result<()> {
        let saved = match editing {
            Some(id) => update_server(api, id, form),
            None => create_server(api, form),
        };
        if let Err(err) = saved {
            warn!(error = %err, "failed to save server");
            return Err(err);
        }
        info!(name = %form.name, editing = ?editing, "server saved");
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
        delete_server(api, id).map_err(|err| {
            warn!(id, error = %err, "failed to delete server");
            err
        })?;
        info!(id, "server deleted");
        self.refresh(api)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_body_without_ping() {
        let probe: StatusProbe = serde_json::from_str("{}").unwrap();
        assert!(probe.ping.is_none());
        let probe: StatusProbe =
            serde_json::from_str(r#"{"ping": {"alive": true, "latency": 12}}"#).unwrap();
        assert_eq!(probe.ping.map(|p| p.alive), Some(true));
    }

    #[test]
    fn test_failed_probe_keeps_record() {
        let api = ApiClient::new("http://127.0.0.1:9", std::time::Duration::from_secs(1));
        let before = Server {
            id: 3,
            name: "db".into(),
            ping: Some(Ping {
                alive: true,
                latency: Some(4.0),
            }),
            ..Default::default()
        };
        let mut page = ServerPage {
            servers: vec![before.clone()],
        };
        let report = page.check_all(&api);
        assert!(report.checked.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(page.servers[0], before);
    }
}
