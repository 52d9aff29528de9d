//! Health API.

use tokio_util::sync::CancellationToken;

use crate::client::LeapClient;
use crate::error::Result;
use crate::types::Health;

/// Path of the service-health endpoint.
pub const HEALTH_PATH: &str = "/v2/health";

/// Health API client.
pub struct HealthApi {
    client: LeapClient,
}

impl HealthApi {
    pub(crate) fn new(client: LeapClient) -> Self {
        Self { client }
    }

    /// Fetch the service-health snapshot.
    pub async fn get_health(&self, cancel: &CancellationToken) -> Result<Health> {
        let (mut health, status) = self.client.get::<Health>(HEALTH_PATH, cancel).await?;
        health.http_status = status;
        Ok(health)
    }

    /// Simple connectivity check - returns true if the endpoint answered
    /// with a decodable health report.
    pub async fn is_reachable(&self, cancel: &CancellationToken) -> bool {
        self.get_health(cancel).await.is_ok()
    }
}
