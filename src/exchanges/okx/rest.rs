use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::okx::types::{
    OkxAlgoOrderRequest, OkxAlgoOrderResponse, OkxAlgoPending, OkxBalanceData,
    OkxCancelAlgoRequest, OkxCancelOrderRequest, OkxInstrument, OkxItemStatus, OkxOrderRequest,
    OkxOrderResponse, OkxPendingOrder, OkxPosition, OkxPositionModeRequest, OkxResponse,
    OkxSetLeverageRequest, OkxTicker,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const INSTRUMENTS_ENDPOINT: &str = "/api/v5/public/instruments";
pub const TICKER_ENDPOINT: &str = "/api/v5/market/ticker";
pub const BALANCE_ENDPOINT: &str = "/api/v5/account/balance";
pub const POSITIONS_ENDPOINT: &str = "/api/v5/account/positions";
pub const POSITION_MODE_ENDPOINT: &str = "/api/v5/account/set-position-mode";
pub const LEVERAGE_ENDPOINT: &str = "/api/v5/account/set-leverage";
pub const ORDER_ENDPOINT: &str = "/api/v5/trade/order";
pub const ALGO_ORDER_ENDPOINT: &str = "/api/v5/trade/order-algo";
pub const PENDING_ORDERS_ENDPOINT: &str = "/api/v5/trade/orders-pending";
pub const PENDING_ALGO_ORDERS_ENDPOINT: &str = "/api/v5/trade/orders-algo-pending";
pub const CANCEL_ORDER_ENDPOINT: &str = "/api/v5/trade/cancel-order";
pub const CANCEL_ALGOS_ENDPOINT: &str = "/api/v5/trade/cancel-algos";

/// OKX REST API client implementation
#[derive(Debug)]
pub struct OkxRest<R: RestClient> {
    rest_client: R,
}

impl<R: RestClient> OkxRest<R> {
    pub fn new(rest_client: R) -> Self {
        Self { rest_client }
    }

    /// Maps OKX error codes to appropriate `ExchangeError` variants
    fn map_okx_error(code: &str, message: &str) -> ExchangeError {
        match code {
            // Authentication errors
            "50100" | "50101" | "50102" | "50103" | "50104" | "50105" | "50111" | "50113" => {
                ExchangeError::AuthError(format!("{} - {}", code, message))
            }

            // Rate limit errors
            "50011" | "50061" => {
                ExchangeError::RateLimitExceeded(format!("{} - {}", code, message))
            }

            // Invalid parameter errors
            "50014" | "51000" | "51001" | "51002" | "51003" | "51004" | "51005" => {
                ExchangeError::InvalidParameters(format!("{} - {}", code, message))
            }
            "51008" => {
                ExchangeError::InvalidParameters(format!("Insufficient balance: {}", message))
            }

            // Server errors
            "50001" | "50004" | "50013" | "50026" => {
                ExchangeError::ServerError(format!("{} - {}", code, message))
            }

            _ => ExchangeError::ApiError {
                code: code.parse().unwrap_or(-1),
                message: message.to_string(),
            },
        }
    }

    /// Decode an OKX envelope into its data items
    ///
    /// A non-zero envelope code is an error. When the first item carries its own
    /// `sCode`/`sMsg` (order endpoints do), that more specific reason wins.
    fn handle_response<T>(endpoint: &str, response_value: Value) -> Result<Vec<T>, ExchangeError>
    where
        T: DeserializeOwned,
    {
        let response: OkxResponse<Value> = serde_json::from_value(response_value).map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "{}: failed to parse OKX response: {}",
                endpoint, e
            ))
        })?;

        if response.code != "0" {
            let item_status = response
                .data
                .first()
                .and_then(|item| serde_json::from_value::<OkxItemStatus>(item.clone()).ok())
                .filter(|status| !status.s_code.is_empty() && status.s_code != "0");

            return Err(match item_status {
                Some(status) => Self::map_okx_error(&status.s_code, &status.s_msg),
                None => Self::map_okx_error(&response.code, &response.msg),
            });
        }

        response
            .data
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| {
                    ExchangeError::DeserializationError(format!(
                        "{}: failed to parse OKX data item: {}",
                        endpoint, e
                    ))
                })
            })
            .collect()
    }

    /// Like `handle_response`, for endpoints where an empty `data` array means
    /// the lookup failed
    fn handle_single_item_response<T>(
        endpoint: &str,
        response_value: Value,
        error_msg: &str,
    ) -> Result<T, ExchangeError>
    where
        T: DeserializeOwned,
    {
        Self::handle_response(endpoint, response_value)?
            .into_iter()
            .next()
            .ok_or_else(|| ExchangeError::InvalidResponseFormat(error_msg.to_string()))
    }

    fn to_body<B: Serialize>(body: &B) -> Result<Value, ExchangeError> {
        serde_json::to_value(body).map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }

    // Public endpoints

    /// Get trading instruments of one type
    pub async fn get_instruments(&self, inst_type: &str) -> Result<Vec<OkxInstrument>, ExchangeError> {
        let query_params = &[("instType", inst_type)];
        let response_value = self
            .rest_client
            .get(INSTRUMENTS_ENDPOINT, query_params, false)
            .await?;
        Self::handle_response(INSTRUMENTS_ENDPOINT, response_value)
    }

    /// Get ticker information
    pub async fn get_ticker(&self, inst_id: &str) -> Result<OkxTicker, ExchangeError> {
        let query_params = &[("instId", inst_id)];
        let response_value = self
            .rest_client
            .get(TICKER_ENDPOINT, query_params, false)
            .await?;
        Self::handle_single_item_response(
            TICKER_ENDPOINT,
            response_value,
            &format!("No ticker data found for {}", inst_id),
        )
    }

    // Account endpoints

    /// Get account balance
    pub async fn get_balance(&self, ccy: &str) -> Result<OkxBalanceData, ExchangeError> {
        let query_params = &[("ccy", ccy)];
        let response_value = self
            .rest_client
            .get(BALANCE_ENDPOINT, query_params, true)
            .await?;
        Self::handle_single_item_response(
            BALANCE_ENDPOINT,
            response_value,
            "Account balance response was empty",
        )
    }

    /// Get open positions of one instrument type
    pub async fn get_positions(&self, inst_type: &str) -> Result<Vec<OkxPosition>, ExchangeError> {
        let query_params = &[("instType", inst_type)];
        let response_value = self
            .rest_client
            .get(POSITIONS_ENDPOINT, query_params, true)
            .await?;
        Self::handle_response(POSITIONS_ENDPOINT, response_value)
    }

    /// Set the account-wide position mode (`long_short_mode` or `net_mode`)
    pub async fn set_position_mode(&self, pos_mode: &str) -> Result<(), ExchangeError> {
        let body = Self::to_body(&OkxPositionModeRequest {
            pos_mode: pos_mode.to_string(),
        })?;
        let response_value = self
            .rest_client
            .post(POSITION_MODE_ENDPOINT, &body, true)
            .await?;
        Self::handle_response::<Value>(POSITION_MODE_ENDPOINT, response_value).map(|_| ())
    }

    /// Set leverage and margin mode for an instrument
    pub async fn set_leverage(&self, request: &OkxSetLeverageRequest) -> Result<(), ExchangeError> {
        let body = Self::to_body(request)?;
        let response_value = self
            .rest_client
            .post(LEVERAGE_ENDPOINT, &body, true)
            .await?;
        Self::handle_response::<Value>(LEVERAGE_ENDPOINT, response_value).map(|_| ())
    }

    // Trading endpoints

    /// Place a new order
    ///
    /// Returns `None` if the exchange accepted the request without echoing an
    /// order.
    pub async fn place_order(
        &self,
        order: &OkxOrderRequest,
    ) -> Result<Option<OkxOrderResponse>, ExchangeError> {
        let body = Self::to_body(order)?;
        let response_value = self.rest_client.post(ORDER_ENDPOINT, &body, true).await?;
        Self::handle_response(ORDER_ENDPOINT, response_value).map(|items| items.into_iter().next())
    }

    /// Place a trigger (algo) order
    pub async fn place_algo_order(
        &self,
        order: &OkxAlgoOrderRequest,
    ) -> Result<Option<OkxAlgoOrderResponse>, ExchangeError> {
        let body = Self::to_body(order)?;
        let response_value = self
            .rest_client
            .post(ALGO_ORDER_ENDPOINT, &body, true)
            .await?;
        Self::handle_response(ALGO_ORDER_ENDPOINT, response_value)
            .map(|items| items.into_iter().next())
    }

    /// Get resting orders for one instrument
    pub async fn get_pending_orders(
        &self,
        inst_type: &str,
        inst_id: &str,
    ) -> Result<Vec<OkxPendingOrder>, ExchangeError> {
        let query_params = &[("instType", inst_type), ("instId", inst_id)];
        let response_value = self
            .rest_client
            .get(PENDING_ORDERS_ENDPOINT, query_params, true)
            .await?;
        Self::handle_response(PENDING_ORDERS_ENDPOINT, response_value)
    }

    /// Get pending algo orders of one algo type for one instrument
    pub async fn get_pending_algo_orders(
        &self,
        inst_type: &str,
        inst_id: &str,
        ord_type: &str,
    ) -> Result<Vec<OkxAlgoPending>, ExchangeError> {
        let query_params = &[
            ("instType", inst_type),
            ("instId", inst_id),
            ("ordType", ord_type),
        ];
        let response_value = self
            .rest_client
            .get(PENDING_ALGO_ORDERS_ENDPOINT, query_params, true)
            .await?;
        Self::handle_response(PENDING_ALGO_ORDERS_ENDPOINT, response_value)
    }

    /// Cancel a resting order
    pub async fn cancel_order(&self, inst_id: &str, ord_id: &str) -> Result<(), ExchangeError> {
        let body = Self::to_body(&OkxCancelOrderRequest {
            inst_id: inst_id.to_string(),
            ord_id: ord_id.to_string(),
        })?;
        let response_value = self
            .rest_client
            .post(CANCEL_ORDER_ENDPOINT, &body, true)
            .await?;
        Self::handle_response::<OkxItemStatus>(CANCEL_ORDER_ENDPOINT, response_value).map(|_| ())
    }

    /// Cancel trigger orders; OKX takes an array body for this endpoint
    pub async fn cancel_algo_orders(
        &self,
        requests: &[OkxCancelAlgoRequest],
    ) -> Result<(), ExchangeError> {
        let body = Self::to_body(&requests)?;
        let response_value = self
            .rest_client
            .post(CANCEL_ALGOS_ENDPOINT, &body, true)
            .await?;
        Self::handle_response::<OkxItemStatus>(CANCEL_ALGOS_ENDPOINT, response_value).map(|_| ())
    }
}
