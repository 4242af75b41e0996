use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: the headers to attach to the request
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// Receives the exact query string and body bytes the kernel sends.
pub trait Signer: Send + Sync {
    /// Sign a request and return the authentication headers
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - Query string (without leading '?'), already in sorted order
    /// * `body` - Raw request body bytes, empty for GET
    /// * `timestamp` - Request timestamp in milliseconds since the Unix epoch
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}
