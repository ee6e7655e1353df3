//! In-process mock of the staffing backend.
//!
//! Serves canned JSON from a handler closure on a background thread and
//! records every request in arrival order.

#![allow(dead_code)]

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path without the query string.
    pub path: String,
    /// Raw query string, percent-encoded.
    pub query: String,
    pub body: String,
}

impl Recorded {
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Status and JSON body to answer with.
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body: body.to_string() }
    }

    pub fn status(status: u16, body: serde_json::Value) -> Self {
        Self { status, body: body.to_string() }
    }
}

pub struct MockBackend {
    base_url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl MockBackend {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> Reply + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock backend");
        let port = server
            .server_addr()
            .to_ip()
            .expect("tcp listener")
            .port();
        let log = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let thread_log = log.clone();
        let thread_shutdown = shutdown.clone();
        let thread = thread::spawn(move || {
            while !thread_shutdown.load(Ordering::SeqCst) {
                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let url = request.url().to_string();
                let (path, query) = match url.split_once('?') {
                    Some((p, q)) => (p.to_string(), q.to_string()),
                    None => (url.clone(), String::new()),
                };
                let recorded = Recorded {
                    method: request.method().to_string(),
                    path,
                    query,
                    body,
                };
                thread_log.lock().unwrap().push(recorded.clone());

                let reply = handler(&recorded);
                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .unwrap();
                let response = tiny_http::Response::from_string(reply.body)
                    .with_status_code(reply.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            log,
            shutdown,
            thread: Some(thread),
        }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// `METHOD /path` of every request so far.
    pub fn lines(&self) -> Vec<String> {
        self.requests().iter().map(Recorded::line).collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// The user every mock accepts at `POST /api/login`.
pub fn admin_user() -> serde_json::Value {
    serde_json::json!({ "id": 1, "username": "admin", "name": "관리자", "role": "admin" })
}

/// 404 with a `message`, for routes a test does not serve.
pub fn not_found(req: &Recorded) -> Reply {
    Reply::status(404, serde_json::json!({ "message": format!("no route {}", req.line()) }))
}

/// The `staffdesk` binary isolated from the caller's environment.
///
/// Config lookup is pointed into `home` and the session lives in `home/data`.
pub fn staffdesk(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd =
        assert_cmd::Command::cargo_bin("staffdesk").expect("staffdesk binary should exist");
    for key in [
        "STAFFDESK_CONFIG",
        "STAFFDESK_API_URL",
        "STAFFDESK_TIMEOUT",
        "STAFFDESK_DATA_DIR",
        "STAFFDESK_EXPORT_DIR",
        "STAFFDESK_PASSWORD",
        "STAFFDESK_LOG",
        "STAFFDESK_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .arg("--data-dir")
        .arg(home.join("data"));
    cmd
}

/// Log in as [`admin_user`] so page commands are allowed.
pub fn login(home: &std::path::Path, backend: &MockBackend) {
    staffdesk(home)
        .args(["--api-url", backend.url(), "login", "-u", "admin", "--password", "pw"])
        .assert()
        .success();
}
