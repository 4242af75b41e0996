use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

pub const HEADER_API_KEY: &str = "OK-ACCESS-KEY";
pub const HEADER_SIGN: &str = "OK-ACCESS-SIGN";
pub const HEADER_TIMESTAMP: &str = "OK-ACCESS-TIMESTAMP";
pub const HEADER_PASSPHRASE: &str = "OK-ACCESS-PASSPHRASE";
pub const HEADER_SIMULATED_TRADING: &str = "x-simulated-trading";

pub struct OkxSigner {
    api_key: String,
    secret_key: String,
    passphrase: String,
    simulated_trading: bool,
}

impl OkxSigner {
    pub fn new(api_key: String, secret_key: String, passphrase: String) -> Self {
        Self {
            api_key,
            secret_key,
            passphrase,
            simulated_trading: false,
        }
    }

    /// Mark every signed request as demo trading
    pub fn with_simulated_trading(mut self, simulated_trading: bool) -> Self {
        self.simulated_trading = simulated_trading;
        self
    }

    /// Signature for OKX API requests
    ///
    /// The prehash string is `timestamp + METHOD + requestPath + body`, where the
    /// request path includes `?query` and the body is empty for GET. The result
    /// is base64 of HMAC-SHA256 keyed with the secret.
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<String, ExchangeError> {
        let prehash = format!(
            "{}{}{}{}",
            timestamp,
            method.to_uppercase(),
            request_path,
            body
        );

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;

        mac.update(prehash.as_bytes());
        let signature_bytes = mac.finalize().into_bytes();

        Ok(general_purpose::STANDARD.encode(signature_bytes))
    }
}

/// UTC ISO-8601 timestamp with millisecond precision and a literal `Z`
pub fn iso_timestamp(timestamp_ms: u64) -> Result<String, ExchangeError> {
    let millis = i64::try_from(timestamp_ms)
        .map_err(|_| ExchangeError::AuthError(format!("Timestamp out of range: {}", timestamp_ms)))?;

    let datetime = chrono::DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ExchangeError::AuthError(format!("Invalid timestamp: {}", timestamp_ms)))?;

    Ok(datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

impl Signer for OkxSigner {
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult {
        let timestamp = iso_timestamp(timestamp)?;

        let request_path = if query_string.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, query_string)
        };

        let body_str = std::str::from_utf8(body)
            .map_err(|e| ExchangeError::AuthError(format!("Invalid body encoding: {}", e)))?;

        let signature = self.sign(&timestamp, method, &request_path, body_str)?;

        let mut headers = HashMap::new();
        headers.insert(HEADER_API_KEY.to_string(), self.api_key.clone());
        headers.insert(HEADER_SIGN.to_string(), signature);
        headers.insert(HEADER_TIMESTAMP.to_string(), timestamp);
        headers.insert(HEADER_PASSPHRASE.to_string(), self.passphrase.clone());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if self.simulated_trading {
            headers.insert(HEADER_SIMULATED_TRADING.to_string(), "1".to_string());
        }

        Ok(headers)
    }
}
