//! Liveness endpoints.

/// GET / - banner text.
pub async fn root() -> &'static str {
    "Helpdesk backend running"
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
