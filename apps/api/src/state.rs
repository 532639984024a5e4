use reqwest::Client as HttpClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::FallbackClient;
use crate::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: FallbackClient,
    pub mailer: Mailer,
    /// Plain HTTP client for non-LLM upstreams (LeetCode stats proxy).
    pub http: HttpClient,
    pub config: Config,
}
