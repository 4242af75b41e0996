use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{instrument, trace};

/// REST client trait for making HTTP requests
///
/// Every call is a single attempt; failures are returned to the caller as-is.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs, in any order
    /// * `authenticated` - Whether to sign the request
    ///
    /// # Returns
    /// The response body as a JSON value
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a POST request with a JSON body
    ///
    /// A `null` body is sent (and signed) as an empty body.
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a PUT request with a JSON body
    async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Deadline applied to every request, in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 15,
            user_agent: "okx-swap-trader/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Get the current timestamp in milliseconds
    fn get_timestamp() -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| ExchangeError::AuthError(format!("Failed to get timestamp: {}", e)))
    }

    /// Handle the response and extract JSON
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(
        &self,
        response: Response,
        request_line: &str,
    ) -> Result<Value, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ExchangeError::NetworkError(format!(
                "{}: failed to read response body: {}",
                request_line, e
            ))
        })?;

        trace!("Response body: {}", response_text);

        if !status.is_success() {
            return Err(ExchangeError::HttpStatusError {
                status: status.as_u16(),
                message: format!("{}: {}", request_line, response_text),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "{}: failed to parse JSON response: {}",
                request_line, e
            ))
        })
    }

    #[instrument(skip(self, query_params, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: &[u8],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let request_line = format!("{} {}", method, endpoint);

        let signer = if authenticated {
            Some(self.signer.as_deref().ok_or_else(|| {
                ExchangeError::AuthError(
                    "Authentication required but no signer provided".to_string(),
                )
            })?)
        } else {
            None
        };
        let timestamp = match signer {
            Some(_) => Self::get_timestamp()?,
            None => 0,
        };

        let (request_path, headers) = prepare_request(
            signer,
            method.as_str(),
            endpoint,
            query_params,
            body,
            timestamp,
        )?;
        let url = format!("{}{}", self.config.base_url, request_path);

        let mut request = self.client.request(method.clone(), &url);
        let mut has_content_type = false;

        for (key, value) in headers {
            has_content_type |= key.eq_ignore_ascii_case("content-type");
            request = request.header(&key, &value);
        }

        if !body.is_empty() {
            if !has_content_type {
                request = request.header("Content-Type", "application/json");
            }
            request = request.body(body.to_vec());
        }

        let response = request.send().await.map_err(|e| {
            ExchangeError::NetworkError(format!("{}: request failed: {}", request_line, e))
        })?;

        self.handle_response(response, &request_line).await
    }
}

/// Build the `path?query` to request and the headers signed over that same
/// query string
///
/// Without a signer the header map is empty.
pub fn prepare_request(
    signer: Option<&dyn Signer>,
    method: &str,
    endpoint: &str,
    query_params: &[(&str, &str)],
    body: &[u8],
    timestamp: u64,
) -> Result<(String, HashMap<String, String>), ExchangeError> {
    let query_string = create_query_string(query_params);
    let request_path = build_request_path(endpoint, &query_string);

    let headers = match signer {
        Some(signer) => signer.sign_request(method, endpoint, &query_string, body, timestamp)?,
        None => HashMap::new(),
    };

    Ok((request_path, headers))
}

/// Create query string from parameters, sorted by key
///
/// The order is part of the signed payload, so it must not depend on the
/// order the caller happened to list the parameters in.
pub fn create_query_string(params: &[(&str, &str)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Path plus `?query` as it is both signed and requested
pub fn build_request_path(endpoint: &str, query_string: &str) -> String {
    if query_string.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query_string)
    }
}

/// Compact JSON for a request body; `null` means no body
pub fn encode_body(body: &Value) -> Result<Vec<u8>, ExchangeError> {
    if body.is_null() {
        return Ok(Vec::new());
    }
    serde_json::to_vec(body).map_err(|e| {
        ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
    })
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::GET, endpoint, query_params, &[], authenticated)
            .await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let body_bytes = encode_body(body)?;
        self.make_request(Method::POST, endpoint, &[], &body_bytes, authenticated)
            .await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let body_bytes = encode_body(body)?;
        self.make_request(Method::PUT, endpoint, &[], &body_bytes, authenticated)
            .await
    }
}
