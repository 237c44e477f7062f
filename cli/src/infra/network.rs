//! Network infrastructure: implements `PublicIpLookup` using `spawn_blocking`.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::PublicIpLookup;
use crate::domain::DeployError;
use crate::domain::network::parse_public_ip;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Production implementation that asks an HTTP "what is my IP" endpoint.
pub struct HttpIpLookup {
    url: String,
}

impl HttpIpLookup {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl PublicIpLookup for HttpIpLookup {
    async fn public_ip(&self) -> Result<Ipv4Addr> {
        let url = self.url.clone();
        let body = tokio::task::spawn_blocking(move || {
            let agent = ureq::AgentBuilder::new().timeout(LOOKUP_TIMEOUT).build();
            match agent.get(&url).call() {
                Ok(resp) => resp
                    .into_string()
                    .map_err(|e| DeployError::PublicIpLookup(format!("reading {url}: {e}"))),
                Err(ureq::Error::Status(code, _)) => Err(DeployError::PublicIpLookup(format!(
                    "{url} answered HTTP {code}"
                ))),
                Err(e) => Err(DeployError::PublicIpLookup(format!("{url}: {e}"))),
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))??;
        let ip = parse_public_ip(&body)?;
        tracing::info!(%ip, url = %self.url, "resolved public IP");
        Ok(ip)
    }
}
