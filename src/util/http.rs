use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use hyper::body::to_bytes;
use hyper::client::HttpConnector;
use hyper::header::{HeaderValue, LOCATION, USER_AGENT};
use hyper::{Body, Client, Request, Uri};
use hyper_tls::HttpsConnector;
use tokio::time::timeout;
use tracing::trace;

use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const MAX_REDIRECTS: usize = 10;

// Maven Central returns a 403 without a user agent.
const USER_AGENT_STRING: &str = "curl/7.68.0";

/// Fetch abstraction consumed by the resolver. Production code uses
/// [`HyperHttpFetcher`]; tests substitute an in-memory double.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;

    /// Fetches the first URL of the list to respond successfully. When every
    /// URL fails, returns `NotFound` if all of them were 404s and the last
    /// non-404 failure otherwise.
    async fn fetch_first(&self, urls: &[String]) -> Result<Bytes, FetchError> {
        let mut last_err: Option<FetchError> = None;
        for url in urls {
            match self.fetch(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(FetchError::NotFound) => {}
                Err(err) => last_err = Some(err),
            }
        }
        match last_err {
            Some(err) => Err(err),
            None if !urls.is_empty() => Err(FetchError::NotFound),
            None => Err(FetchError::Network("no urls provided".to_string())),
        }
    }
}

/// Downloads over HTTPS, following redirects and applying a per-request
/// time budget.
///
/// Instances do HTTP connection caching internally, so keeping them alive
/// has performance benefits.
pub struct HyperHttpFetcher {
    client: Client<HttpsConnector<HttpConnector>>,
}

impl HyperHttpFetcher {
    pub fn new() -> HyperHttpFetcher {
        HyperHttpFetcher {
            client: Client::builder().build::<_, Body>(HttpsConnector::new()),
        }
    }

    async fn request(&self, url: &str) -> Result<hyper::Response<Body>, FetchError> {
        let uri = Uri::try_from(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(USER_AGENT, USER_AGENT_STRING)
            .body(Body::empty())
            .map_err(|e| FetchError::Network(e.to_string()))?;

        trace!(url, "fetching");

        match timeout(REQUEST_TIMEOUT, self.client.request(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(FetchError::Network(e.to_string())),
            Err(_) => Err(FetchError::Timeout(REQUEST_TIMEOUT)),
        }
    }
}

impl Default for HyperHttpFetcher {
    fn default() -> Self {
        HyperHttpFetcher::new()
    }
}

#[async_trait]
impl HttpFetch for HyperHttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let mut url = url.to_string();
        let mut response = self.request(&url).await?;

        let mut redirects = 0;
        while response.status().is_redirection() {
            redirects += 1;
            if redirects > MAX_REDIRECTS {
                return Err(FetchError::Network(format!("too many redirects for {}", url)));
            }
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|h: &HeaderValue| h.to_str().ok())
                .ok_or_else(|| FetchError::Network(format!("redirect without location for {}", url)))?;
            url = location.to_string();
            response = self.request(&url).await?;
        }

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        match timeout(REQUEST_TIMEOUT, to_bytes(response.into_body())).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(FetchError::Network(e.to_string())),
            Err(_) => Err(FetchError::Timeout(REQUEST_TIMEOUT)),
        }
    }
}
