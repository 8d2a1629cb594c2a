//! HTTP surface: the page, the live metrics and the site manifest.
//!
//! Routing is a pure function of method, URL and [`AppState`] so it can be
//! tested without a socket. [`FolioServer`] only moves bytes between
//! `tiny_http` and [`route`].

use crate::error::ServeError;
use crate::page::{render_page, PageOptions};
use folio_core::{DashboardSnapshot, LatestSnapshot, MetricGroup, MetricRow, SyntheticCollector, Ticker};
use folio_yaml::{FolioConfig, SiteManifest};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tiny_http::{Header, Method, Request, Response, Server};

/// How often the accept loop checks its shutdown flag.
const ACCEPT_POLL: Duration = Duration::from_millis(100);

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// Response produced by [`route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) content_type: &'static str,
    pub(crate) body: String,
}

impl Reply {
    fn new(status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }
}

/// Everything a request handler reads.
pub(crate) struct AppState {
    site: SiteManifest,
    site_json: String,
    latest: LatestSnapshot<DashboardSnapshot>,
    options: PageOptions,
}

impl AppState {
    pub(crate) fn new(
        site: SiteManifest,
        latest: LatestSnapshot<DashboardSnapshot>,
        options: PageOptions,
    ) -> Result<Self, ServeError> {
        let site_json = serde_json::to_string(&site)?;
        Ok(Self {
            site,
            site_json,
            latest,
            options,
        })
    }
}

#[derive(Serialize)]
struct CardPayload {
    group: MetricGroup,
    title: &'static str,
    rows: Vec<MetricRow>,
}

/// Body of `GET /api/metrics`.
#[derive(Serialize)]
struct MetricsPayload<'a> {
    tick: u64,
    snapshot: &'a DashboardSnapshot,
    cards: Vec<CardPayload>,
}

fn metrics_json(snapshot: &DashboardSnapshot) -> Result<String, serde_json::Error> {
    let cards = snapshot
        .cards()
        .into_iter()
        .map(|(group, rows)| CardPayload {
            group,
            title: group.title(),
            rows,
        })
        .collect();
    serde_json::to_string(&MetricsPayload {
        tick: snapshot.tick,
        snapshot,
        cards,
    })
}

/// Answer one request.
pub(crate) fn route(method: &Method, url: &str, state: &AppState) -> Reply {
    if *method != Method::Get {
        return Reply::new(405, TEXT, "405 Method Not Allowed");
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);

    match path {
        "/" | "/index.html" => Reply::new(
            200,
            HTML,
            render_page(&state.site, &state.latest.get(), &state.options),
        ),
        "/api/metrics" => match metrics_json(&state.latest.get()) {
            Ok(body) => Reply::new(200, JSON, body),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode metrics");
                Reply::new(500, TEXT, "500 Internal Server Error")
            }
        },
        "/api/site" => Reply::new(200, JSON, state.site_json.clone()),
        "/healthz" => Reply::new(200, TEXT, "ok"),
        _ => Reply::new(404, TEXT, "404 Not Found"),
    }
}

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static header is valid")
}

/// Bound HTTP listener.
pub(crate) struct FolioServer {
    server: Server,
    state: AppState,
}

impl FolioServer {
    pub(crate) fn bind(addr: &str, state: AppState) -> Result<Self, ServeError> {
        let server = Server::http(addr).map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Self { server, state })
    }

    pub(crate) fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve until `shutdown` is set.
    pub(crate) fn run(&self, shutdown: &AtomicBool) -> Result<(), ServeError> {
        while !shutdown.load(Ordering::Relaxed) {
            if let Some(request) = self.server.recv_timeout(ACCEPT_POLL)? {
                self.respond(request);
            }
        }
        Ok(())
    }

    fn respond(&self, request: Request) {
        let reply = route(request.method(), request.url(), &self.state);
        tracing::debug!(
            method = %request.method(),
            url = request.url(),
            status = reply.status,
            "request"
        );

        let mut response = Response::from_string(reply.body)
            .with_status_code(reply.status)
            .with_header(header("Content-Type", reply.content_type))
            .with_header(header("Cache-Control", "no-store"));
        if reply.status == 405 {
            response = response.with_header(header("Allow", "GET"));
        }
        if let Err(e) = request.respond(response) {
            tracing::warn!(error = %e, "failed to send response");
        }
    }
}

/// Run the HTTP surface until the process is killed.
pub(crate) fn serve(config: &FolioConfig, site: SiteManifest, seed: Option<u64>) -> Result<(), ServeError> {
    serve_until(config, site, seed, &AtomicBool::new(false))
}

/// Run the HTTP surface with a ticker refreshing the shared snapshot.
///
/// Returns once `shutdown` is set, after joining the ticker. The `folio`
/// binary never sets it: Ctrl+C ends the process and the ticker thread with
/// it. Callers that embed the server set the flag from another thread.
pub(crate) fn serve_until(
    config: &FolioConfig,
    site: SiteManifest,
    seed: Option<u64>,
    shutdown: &AtomicBool,
) -> Result<(), ServeError> {
    let latest = LatestSnapshot::new();
    let state = AppState::new(site, latest.clone(), PageOptions::from(config))?;
    let server = FolioServer::bind(&config.server.address(), state)?;
    let addr = server
        .local_addr()
        .map_or_else(|| config.server.address(), |a| a.to_string());

    let mut ticker = Ticker::spawn(
        SyntheticCollector::from_seed(seed),
        config.refresh_interval(),
        latest,
    )?;
    tracing::info!(%addr, ?seed, refresh_ms = config.refresh_ms, "serving");
    println!("Serving folio at http://{addr}");
    println!("Press Ctrl+C to stop");

    let result = server.run(shutdown);
    ticker.stop();
    tracing::info!(%addr, "stopped");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Snapshot;
    use proptest::prelude::*;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    fn state() -> AppState {
        AppState::new(
            SiteManifest::bundled(),
            LatestSnapshot::new(),
            PageOptions::default(),
        )
        .expect("bundled site encodes")
    }

    #[test]
    fn test_index_is_html() {
        let reply = route(&Method::Get, "/", &state());
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, HTML);
        assert!(reply.body.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_metrics_follow_latest_snapshot() {
        let state = state();
        let first: serde_json::Value =
            serde_json::from_str(&route(&Method::Get, "/api/metrics", &state).body).expect("json");
        assert_eq!(first["tick"], 0);

        state
            .latest
            .set(SyntheticCollector::seeded(3).next_snapshot());
        let reply = route(&Method::Get, "/api/metrics?t=123", &state);
        assert_eq!(reply.content_type, JSON);
        let body: serde_json::Value = serde_json::from_str(&reply.body).expect("json");
        assert_eq!(body["tick"], 1);
        assert_eq!(body["cards"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["cards"][0]["group"], "system_resources");
        assert_eq!(body["cards"][0]["rows"][0]["key"], "cpu_usage");
        assert!(body["snapshot"]["system"]["cpu_usage"].is_number());
    }

    #[test]
    fn test_site_json() {
        let reply = route(&Method::Get, "/api/site", &state());
        let body: serde_json::Value = serde_json::from_str(&reply.body).expect("json");
        assert_eq!(body["name"], "Moiz");
        assert_eq!(body["contact"]["email"], "contact@moizmoiz.com");
    }

    #[test]
    fn test_healthz() {
        let reply = route(&Method::Get, "/healthz", &state());
        assert_eq!((reply.status, reply.body.as_str()), (200, "ok"));
    }

    #[test]
    fn test_non_get_is_405() {
        for method in [Method::Post, Method::Put, Method::Delete] {
            assert_eq!(route(&method, "/", &state()).status, 405);
        }
    }

    #[test]
    fn test_empty_snapshot_page() {
        let state = state();
        assert_eq!(state.latest.get(), DashboardSnapshot::empty());
        let reply = route(&Method::Get, "/", &state);
        assert!(reply.body.contains("tick 0"));
    }

    proptest! {
        #[test]
        fn prop_unknown_paths_are_404(segment in "[a-z]{1,12}") {
            prop_assume!(segment != "healthz" && segment != "api" && segment != "index");
            let reply = route(&Method::Get, &format!("/{segment}"), &state());
            prop_assert_eq!(reply.status, 404);
        }
    }

    #[test]
    fn test_server_answers_over_tcp() {
        let server = FolioServer::bind("127.0.0.1:0", state()).expect("bind");
        let addr = server.local_addr().expect("ip listener");
        let shutdown = AtomicBool::new(false);

        std::thread::scope(|s| {
            let handle = s.spawn(|| server.run(&shutdown));

            let mut stream = TcpStream::connect(addr).expect("connect");
            stream
                .write_all(b"GET /healthz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .expect("write request");
            let mut response = String::new();
            stream.read_to_string(&mut response).expect("read response");
            shutdown.store(true, Ordering::Relaxed);

            assert!(handle.join().expect("server thread").is_ok());
            assert!(response.starts_with("HTTP/1.1 200"), "{response}");
            assert!(response.contains("Cache-Control: no-store"));
            assert!(response.ends_with("ok"));
        });
    }

    #[test]
    fn test_bind_failure_reports_address() {
        let first = FolioServer::bind("127.0.0.1:0", state()).expect("bind");
        let taken = first.local_addr().expect("ip listener").to_string();
        let Err(err) = FolioServer::bind(&taken, state()) else {
            panic!("second bind on {taken} succeeded");
        };
        assert!(err.to_string().contains(&taken));
    }

    #[test]
    fn test_serve_until_returns_when_flag_is_set() {
        let mut config = FolioConfig::default();
        config.server.port = 0;
        config.refresh_ms = 5;
        let shutdown = AtomicBool::new(false);

        std::thread::scope(|s| {
            let handle = s.spawn(|| serve_until(&config, SiteManifest::bundled(), Some(4), &shutdown));
            std::thread::sleep(Duration::from_millis(30));
            shutdown.store(true, Ordering::Relaxed);
            assert!(handle.join().expect("serve thread").is_ok());
        });
    }
}
