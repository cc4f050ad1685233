use crate::transport::{DirectReadRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use md5::{Digest, Md5};
use movebank_domain::{DirectReadApi, DirectReadParams};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Text the service returns in place of data until its license is accepted
pub const LICENSE_MARKER: &str = "License Terms:";

/// Query parameter carrying the hash of accepted license terms
pub const LICENSE_MD5_PARAM: &str = "license-md5";

const HTTP_OK: u16 = 200;
const HTTP_FORBIDDEN: u16 = 403;

/// Direct-read client that accepts license terms on demand.
///
/// When a study's license must be accepted first, the service answers with
/// the terms instead of data. The client then repeats the request with the
/// MD5 of those terms and the session cookie of the first response.
pub struct MovebankClient {
    transport: Arc<dyn HttpTransport>,
}

impl MovebankClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn send(&self, request: DirectReadRequest) -> Option<HttpResponse> {
        match self.transport.get(request).await {
            Ok(response) => {
                info!(url = %response.url, status = response.status, "Request");
                Some(response)
            }
            Err(e) => {
                error!(error = %e, "Direct-read request failed");
                None
            }
        }
    }

    async fn accept_license(
        &self,
        mut params: DirectReadParams,
        terms: HttpResponse,
    ) -> Option<HttpResponse> {
        info!("Has license terms");
        params.push((LICENSE_MD5_PARAM.to_string(), license_md5(&terms.body)));

        let response = self
            .send(DirectReadRequest {
                params,
                cookie: terms.cookie,
            })
            .await?;

        match response.status {
            HTTP_OK => Some(response),
            HTTP_FORBIDDEN => {
                warn!("Incorrect hash");
                None
            }
            status => {
                log_failure(status, &response.body);
                None
            }
        }
    }
}

#[async_trait]
impl DirectReadApi for MovebankClient {
    #[instrument(skip(self, params), fields(entity_type = entity_type(&params)))]
    async fn call(&self, params: DirectReadParams) -> String {
        let Some(response) = self
            .send(DirectReadRequest {
                params: params.clone(),
                cookie: None,
            })
            .await
        else {
            return String::new();
        };

        if response.status != HTTP_OK {
            log_failure(response.status, &response.body);
            return String::new();
        }

        let response = if has_license_terms(&response.body) {
            match self.accept_license(params, response).await {
                Some(response) => response,
                None => return String::new(),
            }
        } else {
            response
        };

        String::from_utf8(response.body).unwrap_or_else(|e| {
            error!(error = %e, "Response body is not valid UTF-8");
            String::new()
        })
    }
}

/// Hex MD5 digest of the license terms as returned by the service
pub fn license_md5(terms: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(terms);
    hex::encode(hasher.finalize())
}

fn has_license_terms(body: &[u8]) -> bool {
    String::from_utf8_lossy(body).contains(LICENSE_MARKER)
}

fn log_failure(status: u16, body: &[u8]) {
    error!(
        status = status,
        body = %String::from_utf8_lossy(body),
        "Direct-read request rejected"
    );
}

fn entity_type(params: &DirectReadParams) -> &str {
    params
        .iter()
        .find(|(k, _)| k == "entity_type")
        .map_or("", |(_, v)| v.as_str())
}
