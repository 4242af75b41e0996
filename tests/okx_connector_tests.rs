use async_trait::async_trait;
use okx_swap_trader::core::errors::ExchangeError;
use okx_swap_trader::core::events::WarningSink;
use okx_swap_trader::core::kernel::RestClient;
use okx_swap_trader::exchanges::okx::rest::{
    ALGO_ORDER_ENDPOINT, BALANCE_ENDPOINT, CANCEL_ALGOS_ENDPOINT, CANCEL_ORDER_ENDPOINT,
    INSTRUMENTS_ENDPOINT, LEVERAGE_ENDPOINT, ORDER_ENDPOINT, PENDING_ALGO_ORDERS_ENDPOINT,
    PENDING_ORDERS_ENDPOINT, POSITIONS_ENDPOINT, POSITION_MODE_ENDPOINT, TICKER_ENDPOINT,
};
use okx_swap_trader::exchanges::okx::OkxConnector;
use okx_swap_trader::{
    AccountInfo, MarginMode, MarketDataSource, OrderPlacer, OrderStatus, PositionSide,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct RecordedCall {
    method: &'static str,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Value,
}

impl RecordedCall {
    fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

enum Reply {
    Json(Value),
    NetworkFailure(String),
}

#[derive(Default)]
struct MockState {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
}

/// Scripted in-memory transport; endpoints without a queued reply answer with
/// an empty successful envelope
#[derive(Clone, Default)]
struct MockRest {
    state: Arc<MockState>,
}

impl MockRest {
    fn reply(&self, endpoint: &str, data: Value) -> &Self {
        self.push(endpoint, Reply::Json(json!({"code": "0", "msg": "", "data": data})))
    }

    fn reject(&self, endpoint: &str, code: &str, msg: &str) -> &Self {
        self.push(
            endpoint,
            Reply::Json(json!({"code": code, "msg": msg, "data": []})),
        )
    }

    fn fail(&self, endpoint: &str) -> &Self {
        self.push(endpoint, Reply::NetworkFailure("connection reset".to_string()))
    }

    fn push(&self, endpoint: &str, reply: Reply) -> &Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, endpoint: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .collect()
    }

    fn endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.endpoint).collect()
    }

    fn respond(
        &self,
        method: &'static str,
        endpoint: &str,
        query: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, ExchangeError> {
        self.state.calls.lock().unwrap().push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body: body.clone(),
        });

        let next = self
            .state
            .replies
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::NetworkFailure(message)) => Err(ExchangeError::NetworkError(format!(
                "{} {}: {}",
                method, endpoint, message
            ))),
            None => Ok(json!({"code": "0", "msg": "", "data": []})),
        }
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        _authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.respond("GET", endpoint, query_params, &Value::Null)
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        _authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.respond("POST", endpoint, &[], body)
    }

    async fn put(
        &self,
        endpoint: &str,
        body: &Value,
        _authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.respond("PUT", endpoint, &[], body)
    }
}

fn swap_instrument(inst_id: &str, lot_sz: &str, tick_sz: &str) -> Value {
    json!({
        "instType": "SWAP",
        "instId": inst_id,
        "lotSz": lot_sz,
        "tickSz": tick_sz,
        "minSz": lot_sz,
        "ctVal": "0.01",
        "state": "live"
    })
}

fn connector(mock: &MockRest) -> OkxConnector<MockRest> {
    OkxConnector::new(mock.clone())
}

#[tokio::test]
async fn test_precision_from_cached_instrument() {
    let mock = MockRest::default();
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([
            swap_instrument("ETH-USDT-SWAP", "1", "0.01"),
            swap_instrument("BTC-USDT-SWAP", "0.01", "0.1"),
        ]),
    );
    mock.reply(ALGO_ORDER_ENDPOINT, json!([{"algoId": "sl-1", "sCode": "0", "sMsg": ""}]));
    let okx = connector(&mock);

    let quantity = okx.format_quantity("BTCUSDT", dec!(0.127)).await.unwrap();
    assert_eq!(quantity, "0.13");

    let stop = okx
        .set_stop_loss("BTCUSDT", PositionSide::Long, dec!(0.127), dec!(64321.26))
        .await
        .unwrap();
    assert_eq!(stop.algo_id, "sl-1");
    assert_eq!(stop.quantity, "0.13");
    assert_eq!(stop.trigger_price, "64321.3");

    let algo = &mock.calls_to(ALGO_ORDER_ENDPOINT)[0];
    assert_eq!(algo.method, "POST");
    assert_eq!(algo.body["instId"], "BTC-USDT-SWAP");
    assert_eq!(algo.body["ordType"], "trigger");
    assert_eq!(algo.body["side"], "sell");
    assert_eq!(algo.body["posSide"], "long");
    assert_eq!(algo.body["sz"], "0.13");
    assert_eq!(algo.body["triggerPx"], "64321.3");
    assert_eq!(algo.body["orderPx"], "-1");
    assert_eq!(algo.body["reduceOnly"], true);
    assert_eq!(algo.body["tdMode"], "cross");

    // The instrument list is fetched once and then served from the cache
    let fetches = mock.calls_to(INSTRUMENTS_ENDPOINT);
    assert_eq!(fetches.len(), 1);
    assert_eq!(fetches[0].query_value("instType"), Some("SWAP"));
    assert_eq!(okx.instruments().len().await, 1);
}

#[tokio::test]
async fn test_take_profit_for_short_buys_back() {
    let mock = MockRest::default();
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([swap_instrument("SOL-USDT-SWAP", "1", "0.001")]),
    );
    mock.reply(ALGO_ORDER_ENDPOINT, json!([{"algoId": "tp-7"}]));
    let okx = connector(&mock);

    let take_profit = okx
        .set_take_profit("SOLUSDT", PositionSide::Short, dec!(12.4), dec!(141.23456))
        .await
        .unwrap();
    assert_eq!(take_profit.position_side, PositionSide::Short);
    assert_eq!(take_profit.quantity, "12");
    assert_eq!(take_profit.trigger_price, "141.235");

    let algo = &mock.calls_to(ALGO_ORDER_ENDPOINT)[0];
    assert_eq!(algo.body["side"], "buy");
    assert_eq!(algo.body["posSide"], "short");
}

#[tokio::test]
async fn test_open_long_cancels_then_sets_leverage_then_buys() {
    let mock = MockRest::default();
    mock.reply(
        PENDING_ORDERS_ENDPOINT,
        json!([{"instId": "ETH-USDT-SWAP", "ordId": "o-1"}]),
    );
    mock.reply(
        PENDING_ALGO_ORDERS_ENDPOINT,
        json!([{"instId": "ETH-USDT-SWAP", "algoId": "a-1"}]),
    );
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([swap_instrument("ETH-USDT-SWAP", "0.1", "0.01")]),
    );
    mock.reply(
        ORDER_ENDPOINT,
        json!([{"ordId": "123", "clOrdId": "", "sCode": "0", "sMsg": ""}]),
    );
    let okx = connector(&mock);

    let result = okx.open_long("ETHUSDT", dec!(0.5), 10).await.unwrap();
    assert_eq!(result.order_id, "123");
    assert_eq!(result.symbol, "ETHUSDT");
    assert_eq!(result.status, OrderStatus::Filled);
    assert_eq!(result.status.to_string(), "FILLED");

    assert_eq!(
        mock.endpoints(),
        vec![
            PENDING_ORDERS_ENDPOINT,
            CANCEL_ORDER_ENDPOINT,
            PENDING_ALGO_ORDERS_ENDPOINT,
            CANCEL_ALGOS_ENDPOINT,
            LEVERAGE_ENDPOINT,
            INSTRUMENTS_ENDPOINT,
            ORDER_ENDPOINT,
        ]
    );

    let pending = &mock.calls_to(PENDING_ORDERS_ENDPOINT)[0];
    assert_eq!(pending.query_value("instType"), Some("SWAP"));
    assert_eq!(pending.query_value("instId"), Some("ETH-USDT-SWAP"));

    let cancel = &mock.calls_to(CANCEL_ORDER_ENDPOINT)[0];
    assert_eq!(cancel.body, json!({"instId": "ETH-USDT-SWAP", "ordId": "o-1"}));

    let algo_pending = &mock.calls_to(PENDING_ALGO_ORDERS_ENDPOINT)[0];
    assert_eq!(algo_pending.query_value("ordType"), Some("trigger"));

    let cancel_algos = &mock.calls_to(CANCEL_ALGOS_ENDPOINT)[0];
    assert_eq!(
        cancel_algos.body,
        json!([{"instId": "ETH-USDT-SWAP", "algoId": "a-1"}])
    );

    let leverage = &mock.calls_to(LEVERAGE_ENDPOINT)[0];
    assert_eq!(
        leverage.body,
        json!({"instId": "ETH-USDT-SWAP", "lever": "10", "mgnMode": "cross"})
    );

    let order = &mock.calls_to(ORDER_ENDPOINT)[0];
    assert_eq!(order.body["instId"], "ETH-USDT-SWAP");
    assert_eq!(order.body["side"], "buy");
    assert_eq!(order.body["posSide"], "long");
    assert_eq!(order.body["ordType"], "market");
    assert_eq!(order.body["tdMode"], "cross");
    assert_eq!(order.body["sz"], "0.5");
    assert!(order.body.get("reduceOnly").is_none());
}

#[tokio::test]
async fn test_rejected_leverage_mode_still_switches_margin_mode() {
    let mock = MockRest::default();
    mock.reject(LEVERAGE_ENDPOINT, "59000", "Settings failed");
    mock.reply(ORDER_ENDPOINT, json!([{"ordId": "456"}]));

    let (sink, mut warnings) = WarningSink::channel();
    let okx = OkxConnector::with_warnings(mock.clone(), sink);

    okx.set_margin_mode("ETHUSDT", MarginMode::Isolated)
        .await
        .unwrap();
    assert_eq!(okx.margin_mode().await, MarginMode::Isolated);

    let position_mode = &mock.calls_to(POSITION_MODE_ENDPOINT)[0];
    assert_eq!(position_mode.body, json!({"posMode": "long_short_mode"}));

    let mode_leverage = &mock.calls_to(LEVERAGE_ENDPOINT)[0];
    assert_eq!(mode_leverage.body["lever"], "1");
    assert_eq!(mode_leverage.body["mgnMode"], "isolated");

    let warning = warnings.try_recv().unwrap();
    assert_eq!(warning.operation, "set_margin_mode");
    assert_eq!(warning.symbol, "ETHUSDT");
    assert!(warning.message.contains("Settings failed"));

    let result = okx.open_short("ETHUSDT", dec!(1), 5).await.unwrap();
    assert_eq!(result.order_id, "456");

    let open_leverage = &mock.calls_to(LEVERAGE_ENDPOINT)[1];
    assert_eq!(open_leverage.body["lever"], "5");
    assert_eq!(open_leverage.body["mgnMode"], "isolated");

    let order = &mock.calls_to(ORDER_ENDPOINT)[0];
    assert_eq!(order.body["tdMode"], "isolated");
    assert_eq!(order.body["side"], "sell");
    assert_eq!(order.body["posSide"], "short");
}

#[tokio::test]
async fn test_open_fails_when_leverage_is_rejected() {
    let mock = MockRest::default();
    mock.reject(LEVERAGE_ENDPOINT, "50004", "Endpoint request timeout");
    let okx = connector(&mock);

    let err = okx.open_long("BTCUSDT", dec!(1), 20).await.unwrap_err();
    assert!(matches!(err, ExchangeError::ServerError(_)));
    assert!(mock.calls_to(ORDER_ENDPOINT).is_empty());
}

#[tokio::test]
async fn test_open_surfaces_order_rejection() {
    let mock = MockRest::default();
    mock.push(
        ORDER_ENDPOINT,
        Reply::Json(json!({
            "code": "1",
            "msg": "Operation failed.",
            "data": [{"ordId": "", "sCode": "51008", "sMsg": "Order failed. Insufficient USDT margin"}]
        })),
    );
    let okx = connector(&mock);

    let err = okx.open_long("BTCUSDT", dec!(1), 20).await.unwrap_err();
    match err {
        ExchangeError::InvalidParameters(message) => assert!(message.contains("Insufficient")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_open_survives_failed_cancellation() {
    let mock = MockRest::default();
    mock.fail(PENDING_ORDERS_ENDPOINT);
    mock.reply(ORDER_ENDPOINT, json!([{"ordId": "789"}]));

    let (sink, mut warnings) = WarningSink::channel();
    let okx = OkxConnector::with_warnings(mock.clone(), sink);

    let result = okx.open_long("BTCUSDT", dec!(1), 3).await.unwrap();
    assert_eq!(result.order_id, "789");

    let warning = warnings.try_recv().unwrap();
    assert_eq!(warning.operation, "open_long");
    assert!(warning.message.contains("Failed to cancel existing orders"));
}

#[tokio::test]
async fn test_close_with_zero_quantity_closes_whole_position() {
    let mock = MockRest::default();
    mock.reply(
        POSITIONS_ENDPOINT,
        json!([
            {"instId": "BTC-USDT-SWAP", "posSide": "short", "pos": "0"},
            {"instId": "BTC-USDT-SWAP", "posSide": "long", "pos": "0.25", "avgPx": "64000"},
        ]),
    );
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([swap_instrument("BTC-USDT-SWAP", "0.01", "0.1")]),
    );
    mock.reply(ORDER_ENDPOINT, json!([{"ordId": "c-1"}]));
    let okx = connector(&mock);

    let result = okx.close_long("BTCUSDT", Decimal::ZERO).await.unwrap();
    assert_eq!(result.order_id, "c-1");
    assert_eq!(result.status, OrderStatus::Filled);

    let order = &mock.calls_to(ORDER_ENDPOINT)[0];
    assert_eq!(order.body["sz"], "0.25");
    assert_eq!(order.body["side"], "sell");
    assert_eq!(order.body["posSide"], "long");
    assert_eq!(order.body["reduceOnly"], true);

    // Leftover protection orders are cleared after the close
    let endpoints = mock.endpoints();
    let order_at = endpoints.iter().position(|e| e == ORDER_ENDPOINT).unwrap();
    assert_eq!(endpoints[order_at + 1], PENDING_ORDERS_ENDPOINT);
}

#[tokio::test]
async fn test_close_short_with_explicit_quantity_buys() {
    let mock = MockRest::default();
    mock.reply(ORDER_ENDPOINT, json!([{"ordId": "c-2"}]));
    let okx = connector(&mock);

    okx.close_short("ETHUSDT", dec!(2)).await.unwrap();

    assert!(mock.calls_to(POSITIONS_ENDPOINT).is_empty());
    let order = &mock.calls_to(ORDER_ENDPOINT)[0];
    assert_eq!(order.body["side"], "buy");
    assert_eq!(order.body["posSide"], "short");
    assert_eq!(order.body["sz"], "2");
}

#[tokio::test]
async fn test_close_without_position_is_an_error() {
    let mock = MockRest::default();
    mock.reply(
        POSITIONS_ENDPOINT,
        json!([{"instId": "BTC-USDT-SWAP", "posSide": "long", "pos": "1"}]),
    );
    let okx = connector(&mock);

    let err = okx.close_short("BTCUSDT", Decimal::ZERO).await.unwrap_err();
    match err {
        ExchangeError::PositionNotFound { symbol, side } => {
            assert_eq!(symbol, "BTCUSDT");
            assert_eq!(side, "short");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(mock.calls_to(ORDER_ENDPOINT).is_empty());
}

#[tokio::test]
async fn test_positions_exclude_empty_entries() {
    let mock = MockRest::default();
    mock.reply(
        POSITIONS_ENDPOINT,
        json!([
            {"instId": "BTC-USDT-SWAP", "posSide": "long", "pos": "0.5", "avgPx": "60000",
             "markPx": "61000", "upl": "500", "lever": "10", "liqPx": "54000"},
            {"instId": "ETH-USDT-SWAP", "posSide": "long", "pos": "0"},
            {"instId": "ETH-USDT-SWAP", "posSide": "short", "pos": "3", "avgPx": "2500"},
        ]),
    );
    let okx = connector(&mock);

    let positions = okx.get_positions().await.unwrap();
    assert_eq!(positions.len(), 2);
    assert!(positions.iter().all(|p| !p.quantity.is_zero()));

    let btc = &positions[0];
    assert_eq!(btc.symbol, "BTCUSDT");
    assert_eq!(btc.side, PositionSide::Long);
    assert_eq!(btc.quantity, dec!(0.5));
    assert_eq!(btc.mark_price, dec!(61000));
    assert_eq!(btc.unrealized_pnl, dec!(500));
    assert_eq!(btc.leverage, dec!(10));
    assert_eq!(btc.liquidation_price, dec!(54000));

    assert_eq!(positions[1].side, PositionSide::Short);

    let call = &mock.calls_to(POSITIONS_ENDPOINT)[0];
    assert_eq!(call.query_value("instType"), Some("SWAP"));
}

#[tokio::test]
async fn test_balance_summary() {
    let mock = MockRest::default();
    mock.reply(
        BALANCE_ENDPOINT,
        json!([{
            "totalEq": "10250.5",
            "details": [{"ccy": "USDT", "eq": "10250.5", "cashBal": "10000",
                         "availBal": "9000", "upl": "250.5"}]
        }]),
    );
    let okx = connector(&mock);

    let balance = okx.get_balance().await.unwrap();
    assert_eq!(balance.wallet_balance, dec!(10000));
    assert_eq!(balance.available_balance, dec!(9000));
    assert_eq!(balance.unrealized_pnl, dec!(250.5));

    let call = &mock.calls_to(BALANCE_ENDPOINT)[0];
    assert_eq!(call.method, "GET");
    assert_eq!(call.query_value("ccy"), Some("USDT"));
}

#[tokio::test]
async fn test_empty_balance_is_an_error() {
    let mock = MockRest::default();
    let okx = connector(&mock);

    let err = okx.get_balance().await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidResponseFormat(_)));
}

#[tokio::test]
async fn test_market_price() {
    let mock = MockRest::default();
    mock.reply(
        TICKER_ENDPOINT,
        json!([{"instId": "BTC-USDT-SWAP", "last": "64321.5", "askPx": "64321.6", "bidPx": "64321.4"}]),
    );
    let okx = connector(&mock);

    let price = okx.get_market_price("btcusdt").await.unwrap();
    assert_eq!(price, dec!(64321.5));

    let call = &mock.calls_to(TICKER_ENDPOINT)[0];
    assert_eq!(call.query_value("instId"), Some("BTC-USDT-SWAP"));
}

#[tokio::test]
async fn test_empty_ticker_is_an_error() {
    let mock = MockRest::default();
    let okx = connector(&mock);

    let err = okx.get_market_price("BTCUSDT").await.unwrap_err();
    assert!(matches!(err, ExchangeError::InvalidResponseFormat(_)));
}

#[tokio::test]
async fn test_cancel_all_continues_past_failures() {
    let mock = MockRest::default();
    mock.reply(
        PENDING_ORDERS_ENDPOINT,
        json!([
            {"instId": "ETH-USDT-SWAP", "ordId": "o-1"},
            {"instId": "ETH-USDT-SWAP", "ordId": "o-2"},
        ]),
    );
    mock.fail(CANCEL_ORDER_ENDPOINT);
    mock.fail(PENDING_ALGO_ORDERS_ENDPOINT);

    let (sink, mut warnings) = WarningSink::channel();
    let okx = OkxConnector::with_warnings(mock.clone(), sink);

    okx.cancel_all_orders("ETHUSDT").await.unwrap();

    let cancels = mock.calls_to(CANCEL_ORDER_ENDPOINT);
    assert_eq!(cancels.len(), 2);
    assert_eq!(cancels[1].body["ordId"], "o-2");
    assert!(mock.calls_to(CANCEL_ALGOS_ENDPOINT).is_empty());

    let first = warnings.try_recv().unwrap();
    assert_eq!(first.operation, "cancel_all_orders");
    assert!(first.message.contains("o-1"));
    let second = warnings.try_recv().unwrap();
    assert!(second.message.contains("trigger orders"));
    assert!(warnings.try_recv().is_err());
}

#[tokio::test]
async fn test_cancel_all_propagates_listing_failure() {
    let mock = MockRest::default();
    mock.fail(PENDING_ORDERS_ENDPOINT);
    let okx = connector(&mock);

    let err = okx.cancel_all_orders("ETHUSDT").await.unwrap_err();
    assert!(matches!(err, ExchangeError::NetworkError(_)));
    assert!(mock.calls_to(PENDING_ALGO_ORDERS_ENDPOINT).is_empty());
}

#[tokio::test]
async fn test_unknown_instrument_falls_back_to_four_decimals() {
    let mock = MockRest::default();
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([swap_instrument("BTC-USDT-SWAP", "0.01", "0.1")]),
    );
    let okx = connector(&mock);

    let quantity = okx
        .format_quantity("NEWCOINUSDT", dec!(0.12345))
        .await
        .unwrap();
    assert_eq!(quantity, "0.1235");
    assert!(okx.instruments().is_empty().await);
}

#[tokio::test]
async fn test_format_price_uses_tick_size() {
    let mock = MockRest::default();
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([swap_instrument("BTC-USDT-SWAP", "0.01", "0.1")]),
    );
    let okx = connector(&mock);

    assert_eq!(okx.format_price("BTCUSDT", dec!(64321.26)).await, "64321.3");
}

#[tokio::test]
async fn test_oversized_quantity_falls_back_instead_of_panicking() {
    let mock = MockRest::default();
    mock.reply(
        INSTRUMENTS_ENDPOINT,
        json!([swap_instrument("BTC-USDT-SWAP", "0.001", "0.1")]),
    );
    let okx = connector(&mock);

    let quantity = okx
        .format_quantity("BTCUSDT", dec!(100000000000000000000000000))
        .await
        .unwrap();
    assert_eq!(quantity, "100000000000000000000000000");
}

#[tokio::test]
async fn test_margin_mode_recorded_when_exchange_rejects_both_calls() {
    let mock = MockRest::default();
    mock.reject(POSITION_MODE_ENDPOINT, "59000", "Cannot switch with open positions");
    mock.reject(LEVERAGE_ENDPOINT, "59000", "Settings failed");

    let (sink, mut warnings) = WarningSink::channel();
    let okx = OkxConnector::with_warnings(mock.clone(), sink);

    okx.set_margin_mode("BTCUSDT", MarginMode::Isolated)
        .await
        .unwrap();
    assert_eq!(okx.margin_mode().await, MarginMode::Isolated);

    let first = warnings.try_recv().unwrap();
    assert!(first.message.contains("position mode"));
    let second = warnings.try_recv().unwrap();
    assert!(second.message.contains("isolated margin mode"));
    assert!(warnings.try_recv().is_err());
}
