//! [`ConnectionFactory`] that logs in for every tool call

use super::auth::login;
use super::connection::RestConnection;
use super::error::transport;
use crate::config::FileSalesforceConfig;
use async_trait::async_trait;
use sfmcp_application::{ConnectionError, ConnectionFactory, CrmConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct SalesforceConnector {
    http: reqwest::Client,
    config: FileSalesforceConfig,
}

impl SalesforceConnector {
    /// Build the shared HTTP client; credentials are checked at connect time
    pub fn new(config: FileSalesforceConfig) -> Result<Self, ConnectionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("salesforce-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl ConnectionFactory for SalesforceConnector {
    async fn connect(&self) -> Result<Arc<dyn CrmConnection>, ConnectionError> {
        let session = login(&self.http, &self.config).await?;
        info!(instance_url = %session.instance_url, "Connected to Salesforce");
        Ok(Arc::new(RestConnection::new(
            self.http.clone(),
            session,
            self.config.api_version.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_credentials_fails_before_network() {
        let connector = SalesforceConnector::new(FileSalesforceConfig::default()).unwrap();
        let err = connector.connect().await.err().unwrap();
        assert!(matches!(err, ConnectionError::Config(_)));
    }
}
