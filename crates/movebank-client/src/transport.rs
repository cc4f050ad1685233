use crate::credentials::MovebankCredentials;
use crate::error::Result as ClientResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use movebank_domain::DirectReadParams;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::Url;
use tracing::instrument;

/// Default direct-read endpoint
pub const DIRECT_READ_URL: &str = "https://www.movebank.org/movebank/service/direct-read";

/// One GET against the direct-read endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectReadRequest {
    pub params: DirectReadParams,
    /// `Cookie` header value carried over from an earlier response
    pub cookie: Option<String>,
}

/// Raw response of a direct-read GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final request URL including the query string
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
    /// Session cookies set by the server, as a `Cookie` header value
    pub cookie: Option<String>,
}

/// Trait for issuing authenticated GETs
///
/// Implementations should:
/// - Encode `params` as the query string, in order
/// - Attach HTTP basic credentials
/// - Send `cookie` as the `Cookie` header when present
/// - Return an error only when no response was received
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: DirectReadRequest) -> Result<HttpResponse>;
}

/// `HttpTransport` backed by a reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    credentials: MovebankCredentials,
}

impl ReqwestTransport {
    pub fn new(
        base_url: impl Into<String>,
        credentials: MovebankCredentials,
    ) -> ClientResult<Self> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            credentials,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(
        name = "direct_read_get",
        skip(self, request),
        fields(has_cookie = request.cookie.is_some())
    )]
    async fn get(&self, request: DirectReadRequest) -> Result<HttpResponse> {
        let url = Url::parse_with_params(&self.base_url, &request.params)
            .with_context(|| format!("Invalid direct-read URL: {}", self.base_url))?;

        let mut builder = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password));
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder
            .send()
            .await
            .context("Failed to send direct-read request")?;

        let url = response.url().to_string();
        let status = response.status().as_u16();
        let cookie = session_cookie(response.headers());
        let body = response
            .bytes()
            .await
            .context("Failed to read direct-read response body")?
            .to_vec();

        Ok(HttpResponse {
            url,
            status,
            body,
            cookie,
        })
    }
}

/// Collapse `Set-Cookie` headers into a `Cookie` header value
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_session_cookie_from_set_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("JSESSIONID=ABC123; Path=/movebank; Secure; HttpOnly"),
        );
        headers.append(SET_COOKIE, HeaderValue::from_static("route=r1; Path=/"));

        assert_eq!(
            session_cookie(&headers),
            Some("JSESSIONID=ABC123; route=r1".to_string())
        );
    }

    #[test]
    fn test_session_cookie_absent() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }

    #[test]
    fn test_new_transport_keeps_base_url() {
        let transport = ReqwestTransport::new(
            DIRECT_READ_URL,
            MovebankCredentials::new("user", "pass"),
        )
        .unwrap();

        assert_eq!(transport.base_url, DIRECT_READ_URL);
    }
}
