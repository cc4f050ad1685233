use async_trait::async_trait;

/// Ordered query parameters of one direct-read request
pub type DirectReadParams = Vec<(String, String)>;

/// Build request parameters from string pairs, preserving order
pub fn params<const N: usize>(pairs: [(&str, &str); N]) -> DirectReadParams {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Trait for the remote direct-read endpoint
///
/// Implementations should:
/// - Authenticate every request
/// - Accept license terms when the service asks for them
/// - Return the response body as text, or an empty string on any failure
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DirectReadApi: Send + Sync {
    /// Issue one direct-read call
    ///
    /// # Arguments
    /// * `params` - Query parameters such as `entity_type` and `study_id`
    ///
    /// # Returns
    /// Delimited response text, empty when nothing could be read
    async fn call(&self, params: DirectReadParams) -> String;
}
