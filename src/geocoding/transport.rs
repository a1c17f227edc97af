//! Network seam between the retry loop and the geocoding endpoint.
//!
//! # Responsibilities
//! - Build the request URL (base URL + static params + address)
//! - Enforce per-attempt connect and request timeouts
//! - Decode the JSON body into a `GeocodeResponse`

use std::collections::BTreeMap;
use std::future::Future;

use reqwest::header::ACCEPT_CHARSET;
use url::Url;

use crate::config::{EndpointConfig, TimeoutConfig};
use crate::geocoding::types::{GeocodeError, GeocodeResponse, TransportError};

/// Performs one geocoding request. Implementations must not retry.
pub trait GeocodeTransport: Send + Sync + 'static {
    fn fetch(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeocodeResponse, TransportError>> + Send;
}

/// HTTP GET transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    address_param: String,
    params: BTreeMap<String, String>,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint.
    ///
    /// Fails if the base URL is unusable; no request is made.
    pub fn new(endpoint: &EndpointConfig, timeouts: &TimeoutConfig) -> Result<Self, GeocodeError> {
        let base_url = Url::parse(&endpoint.base_url).map_err(|source| GeocodeError::InvalidEndpoint {
            url: endpoint.base_url.clone(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(GeocodeError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(timeouts.connect())
            .timeout(timeouts.request());
        if !endpoint.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(GeocodeError::Client)?;

        tracing::debug!(
            base_url = %base_url,
            connect_timeout = ?timeouts.connect(),
            request_timeout = ?timeouts.request(),
            "HTTP transport initialized"
        );

        Ok(Self {
            client,
            base_url,
            address_param: endpoint.address_param.clone(),
            params: endpoint.params.clone(),
        })
    }

    /// Full request URL for one address.
    pub fn request_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
            query.append_pair(&self.address_param, address);
        }
        url
    }
}

impl GeocodeTransport for HttpTransport {
    async fn fetch(&self, address: &str) -> Result<GeocodeResponse, TransportError> {
        let response = self
            .client
            .get(self.request_url(address))
            .header(ACCEPT_CHARSET, "utf-8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
