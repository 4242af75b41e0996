use serde::{Deserialize, Serialize};

/// OKX API standard response wrapper
#[derive(Debug, Deserialize, Serialize)]
pub struct OkxResponse<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Per-item status carried by order, cancel and algo responses
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxItemStatus {
    pub s_code: String,
    pub s_msg: String,
}

/// OKX instrument (contract) definition, reduced to what precision needs
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxInstrument {
    pub inst_type: String, // SWAP
    pub inst_id: String,   // e.g., BTC-USDT-SWAP
    pub tick_sz: String,   // Price step
    pub lot_sz: String,    // Quantity step
    pub min_sz: String,    // Minimum order size
    pub ct_val: String,    // Contract value
    pub state: String,     // live, suspend, preopen, test
}

/// OKX per-currency balance detail
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxBalanceDetail {
    pub ccy: String,
    pub eq: String,        // Equity, including unrealized P&L
    pub cash_bal: String,  // Cash balance, excluding unrealized P&L
    pub avail_bal: String, // Available balance
    pub upl: String,       // Unrealized P&L
}

/// OKX account balance
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxBalanceData {
    pub total_eq: String,
    pub details: Vec<OkxBalanceDetail>,
}

/// OKX position
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxPosition {
    pub inst_id: String,
    pub pos_side: String, // long, short, or net
    pub pos: String,      // Contracts; signed in net mode
    pub avg_px: String,
    pub mark_px: String,
    pub upl: String,
    pub lever: String,
    pub liq_px: String,
    pub mgn_mode: String, // cross, isolated
}

/// OKX ticker
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxTicker {
    pub inst_id: String,
    pub last: String,
    pub ask_px: String,
    pub bid_px: String,
}

/// Body of `POST /account/set-position-mode`
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OkxPositionModeRequest {
    pub pos_mode: String, // long_short_mode, net_mode
}

/// Body of `POST /account/set-leverage`
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OkxSetLeverageRequest {
    pub inst_id: String,
    pub lever: String,
    pub mgn_mode: String,
}

/// OKX market order request
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OkxOrderRequest {
    pub inst_id: String,  // Instrument ID
    pub td_mode: String,  // Trade mode: cross, isolated
    pub side: String,     // Order side: buy, sell
    pub pos_side: String, // Position side: long, short
    pub ord_type: String, // Order type: market
    pub sz: String,       // Quantity in contracts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
}

/// OKX trigger (algo) order request
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OkxAlgoOrderRequest {
    pub inst_id: String,
    pub td_mode: String,
    pub side: String,
    pub pos_side: String,
    pub ord_type: String,   // trigger
    pub sz: String,
    pub trigger_px: String, // Trigger price
    pub order_px: String,   // "-1" executes at market once triggered
    pub reduce_only: bool,
}

/// OKX order placement response
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxOrderResponse {
    pub ord_id: String,
    pub cl_ord_id: String,
    pub s_code: String,
    pub s_msg: String,
}

/// OKX algo order placement response
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxAlgoOrderResponse {
    pub algo_id: String,
    pub s_code: String,
    pub s_msg: String,
}

/// Resting order as listed by `orders-pending`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxPendingOrder {
    pub inst_id: String,
    pub ord_id: String,
}

/// Trigger order as listed by `orders-algo-pending`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OkxAlgoPending {
    pub inst_id: String,
    pub algo_id: String,
}

/// Body of `POST /trade/cancel-order`
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OkxCancelOrderRequest {
    pub inst_id: String,
    pub ord_id: String,
}

/// One entry of the `POST /trade/cancel-algos` array body
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OkxCancelAlgoRequest {
    pub inst_id: String,
    pub algo_id: String,
}
