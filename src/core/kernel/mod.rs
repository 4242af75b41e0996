/// Transport kernel shared by exchange connectors
///
/// The kernel contains transport logic only: a `RestClient` seam with a
/// reqwest-backed implementation, and a pluggable `Signer` that produces
/// authentication headers. Exchange-specific payloads, error codes and
/// signing schemes live with the exchange.
///
/// # Basic usage
/// ```rust,no_run
/// use okx_swap_trader::core::kernel::*;
/// use okx_swap_trader::exchanges::okx::signer::OkxSigner;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = Arc::new(OkxSigner::new(
///     "api_key".to_string(),
///     "secret_key".to_string(),
///     "passphrase".to_string(),
/// ));
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     "https://www.okx.com".to_string(),
///     "okx".to_string(),
/// ))
/// .with_signer(signer)
/// .build()?;
///
/// let balance = rest.get("/api/v5/account/balance", &[("ccy", "USDT")], true).await?;
/// # Ok(())
/// # }
/// ```
pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
