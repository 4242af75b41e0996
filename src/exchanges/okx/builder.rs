use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::events::{TraderWarning, WarningSink};
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::okx::{connector::OkxConnector, signer::OkxSigner};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const DEFAULT_BASE_URL: &str = "https://www.okx.com";
pub const DEFAULT_REST_TIMEOUT_SECS: u64 = 15;

/// Builder for creating OKX exchange connectors
///
/// OKX serves demo trading from the production host, so `testnet` only marks
/// requests as simulated and never changes the base URL.
pub struct OkxBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    warning_sender: Option<mpsc::UnboundedSender<TraderWarning>>,
}

impl Default for OkxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OkxBuilder {
    /// Create a new `OkxBuilder` with default settings
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::default(),
            rest_timeout: DEFAULT_REST_TIMEOUT_SECS,
            warning_sender: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials, keeping the testnet flag and base URL
    pub fn with_credentials(
        mut self,
        api_key: String,
        secret_key: String,
        passphrase: String,
    ) -> Self {
        let mut config =
            ExchangeConfig::new(api_key, secret_key, passphrase).testnet(self.config.testnet);
        if let Some(base_url) = self.config.base_url.take() {
            config = config.base_url(base_url);
        }
        self.config = config;
        self
    }

    /// Set testnet (simulated trading) mode
    pub fn with_testnet(mut self, testnet: bool) -> Self {
        self.config.testnet = testnet;
        self
    }

    /// Set base URL for REST API
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Set REST client timeout in seconds
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    /// Forward best-effort failures to `sender` in addition to logging them
    pub fn with_warning_sender(mut self, sender: mpsc::UnboundedSender<TraderWarning>) -> Self {
        self.warning_sender = Some(sender);
        self
    }

    /// Create a warning channel and return its receiving end
    pub fn with_warning_channel(self) -> (Self, mpsc::UnboundedReceiver<TraderWarning>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (self.with_warning_sender(tx), rx)
    }

    /// Build the REST client this builder is configured for
    pub fn build_rest_client(&self) -> Result<ReqwestRest, ExchangeError> {
        let base_url = self
            .config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let rest_config =
            RestClientConfig::new(base_url, "okx".to_string()).with_timeout(self.rest_timeout);

        let mut rest_builder = RestClientBuilder::new(rest_config);

        // Without credentials only public endpoints work
        if self.config.has_credentials() {
            let signer = OkxSigner::new(
                self.config.api_key().to_string(),
                self.config.secret_key().to_string(),
                self.config.passphrase().to_string(),
            )
            .with_simulated_trading(self.config.testnet);
            rest_builder = rest_builder.with_signer(Arc::new(signer));
        }

        rest_builder.build()
    }

    /// Build a REST-backed OKX connector
    pub fn build(self) -> Result<OkxConnector<ReqwestRest>, ExchangeError> {
        if self.rest_timeout == 0 {
            return Err(ExchangeError::ConfigurationError(
                "REST timeout must be at least one second".to_string(),
            ));
        }

        let rest = self.build_rest_client()?;
        Ok(OkxConnector::with_warnings(
            rest,
            WarningSink::new(self.warning_sender),
        ))
    }
}

/// Create an OKX connector from configuration with default settings
pub fn build_connector(config: ExchangeConfig) -> Result<OkxConnector<ReqwestRest>, ExchangeError> {
    OkxBuilder::new().with_config(config).build()
}
