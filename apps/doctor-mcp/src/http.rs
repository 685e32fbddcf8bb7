//! Streamable HTTP transport with Host header filtering.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use doctor_mcp_server::DoctorServer;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tower_http::trace::TraceLayer;

use crate::config::Settings;

/// Hosts allowed in the `Host` header of HTTP requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrustedHosts {
    Any,
    List(Vec<String>),
}

impl TrustedHosts {
    /// Parse a comma list. Blank input or any `*` entry allows every host.
    pub fn parse(raw: &str) -> Self {
        let entries: Vec<String> = raw
            .split(',')
            .map(|h| h.trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();

        if entries.is_empty() || entries.iter().any(|h| h == "*") {
            Self::Any
        } else {
            Self::List(entries)
        }
    }

    /// Entries with a port must match exactly; entries without one match any port.
    pub fn allows(&self, host_header: &str) -> bool {
        let Self::List(entries) = self else {
            return true;
        };
        let host = host_header.trim().to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        let bare = strip_port(&host);
        entries.iter().any(|e| *e == host || *e == bare)
    }
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // [::1]:8000
        return rest
            .find(']')
            .map_or(host, |end| &host[..end + 2]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

async fn check_host(
    State(trusted): State<Arc<TrustedHosts>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if trusted.allows(host) {
        next.run(request).await
    } else {
        tracing::warn!(host, "rejected request from untrusted host");
        (StatusCode::FORBIDDEN, "Host not allowed").into_response()
    }
}

/// Build the router serving MCP on `path`, guarded by the trusted-host check.
pub fn router(server: DoctorServer, path: &str, trusted: TrustedHosts) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: false,
            ..Default::default()
        },
    );

    let router = if path == "/" {
        Router::new().fallback_service(service)
    } else {
        Router::new().nest_service(path, service)
    };

    router
        .layer(middleware::from_fn_with_state(Arc::new(trusted), check_host))
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl-C.
pub async fn serve(server: DoctorServer, settings: &Settings) -> anyhow::Result<()> {
    let app = router(server, &settings.path, settings.trusted_hosts.clone());

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", settings.host, settings.port))?;
    let local = listener.local_addr()?;

    eprintln!("Serving MCP over HTTP at http://{local}{}", settings.path);
    tracing::info!(addr = %local, path = %settings.path, "http transport listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown_signal())
        .await
        .context("http server failed")?;

    tracing::info!("http transport stopped");
    Ok(())
}
