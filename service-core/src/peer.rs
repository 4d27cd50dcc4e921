//! Existence checks against peer services.
//!
//! Services keep their own databases, so a foreign key that points into a
//! sibling service (a class id held by a booking, a student id held by a
//! grade) is validated with a live `GET {base}/{resource}/{id}` right before
//! the local write. The outcome is one of three cases and every caller maps
//! them the same way:
//!
//! | Peer answer                          | [`Existence`]   | Client sees |
//! |--------------------------------------|-----------------|-------------|
//! | `200 OK`                             | `Valid`         | write proceeds |
//! | `404 Not Found`                      | `NotFound`      | 404         |
//! | other status, timeout, connect error | `Unreachable`   | 502         |
//!
//! There is no retry and no caching: a lookup reflects the peer at the moment
//! of the write and nothing more.

use crate::error::AppError;
use crate::observability::TracedClientExt;
use once_cell::sync::Lazy;
use prometheus::{CounterVec, HistogramVec, register_counter_vec, register_histogram_vec};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Peer lookups by peer, resource and outcome.
pub static PEER_LOOKUPS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "peer_lookups_total",
        "Total number of peer-service existence checks",
        &["peer", "resource", "outcome"]
    )
    .expect("Failed to register peer_lookups_total")
});

/// Peer lookup latency.
pub static PEER_LOOKUP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "peer_lookup_duration_seconds",
        "Peer-service existence check duration in seconds",
        &["peer", "resource"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register peer_lookup_duration_seconds")
});

/// Result of asking a peer whether an entity exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existence {
    Valid,
    NotFound,
    /// The peer could not give a definitive answer.
    Unreachable(String),
}

impl Existence {
    pub fn as_label(&self) -> &'static str {
        match self {
            Existence::Valid => "valid",
            Existence::NotFound => "not_found",
            Existence::Unreachable(_) => "unreachable",
        }
    }

    /// Turn the outcome into the error a handler should return.
    ///
    /// `label` is the human name of the referenced entity ("Turma", "Aluno").
    pub fn into_result(self, service: &str, label: &str, id: i64) -> Result<(), AppError> {
        match self {
            Existence::Valid => Ok(()),
            Existence::NotFound => Err(AppError::NotFound(anyhow::anyhow!(
                "{} with id {} not found in {}",
                label,
                id,
                service
            ))),
            Existence::Unreachable(reason) => Err(AppError::BadGateway(format!(
                "could not verify {} {} with {}: {}",
                label, id, service, reason
            ))),
        }
    }
}

/// HTTP client for one peer service.
#[derive(Clone, Debug)]
pub struct PeerClient {
    service_name: String,
    base_url: String,
    http: reqwest::Client,
}

impl PeerClient {
    /// Build a client with an explicit per-request timeout.
    pub fn new(
        service_name: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "peer base URL must not be empty"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Failed to build peer HTTP client: {}", e))
            })?;

        Ok(Self {
            service_name: service_name.into(),
            base_url,
            http,
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, resource: &str, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, resource.trim_matches('/'), id)
    }

    /// `GET {base}/{resource}/{id}` and classify the answer.
    #[instrument(skip(self, request_id), fields(peer = %self.service_name))]
    pub async fn check_exists(
        &self,
        resource: &str,
        id: i64,
        request_id: Option<&str>,
    ) -> Existence {
        let url = self.resource_url(resource, id);
        let start = Instant::now();

        let outcome = match self
            .http
            .traced_get(&url)
            .request_id(request_id)
            .send()
            .await
        {
            Ok(response) => match response.status() {
                StatusCode::OK => Existence::Valid,
                StatusCode::NOT_FOUND => Existence::NotFound,
                status => Existence::Unreachable(format!("unexpected status {}", status)),
            },
            Err(e) if e.is_timeout() => Existence::Unreachable("request timed out".to_string()),
            Err(e) => Existence::Unreachable(format!("request failed: {}", e)),
        };

        PEER_LOOKUP_DURATION
            .with_label_values(&[self.service_name.as_str(), resource])
            .observe(start.elapsed().as_secs_f64());
        PEER_LOOKUPS_TOTAL
            .with_label_values(&[self.service_name.as_str(), resource, outcome.as_label()])
            .inc();

        match &outcome {
            Existence::Valid => tracing::debug!(url = %url, "Peer reference verified"),
            Existence::NotFound => tracing::info!(url = %url, "Peer reference not found"),
            Existence::Unreachable(reason) => {
                tracing::warn!(url = %url, reason = %reason, "Peer lookup failed")
            }
        }

        outcome
    }

    /// Check a reference and convert the outcome to the handler error.
    pub async fn require(
        &self,
        resource: &str,
        label: &str,
        id: i64,
        request_id: Option<&str>,
    ) -> Result<(), AppError> {
        self.check_exists(resource, id, request_id)
            .await
            .into_result(&self.service_name, label, id)
    }
}
