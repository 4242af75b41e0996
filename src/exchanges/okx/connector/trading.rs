use crate::core::errors::ExchangeError;
use crate::core::events::WarningSink;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, OrderPlacer};
use crate::core::types::{OrderResult, OrderStatus, PositionSide, TriggerOrderResult};
use crate::exchanges::okx::connector::account::Account;
use crate::exchanges::okx::conversions::{
    convert_margin_mode_to_okx, convert_order_side_to_okx, convert_position_side_to_okx,
    inst_id_to_symbol, symbol_to_inst_id,
};
use crate::exchanges::okx::instruments::{InstrumentCache, SWAP_INST_TYPE};
use crate::exchanges::okx::rest::OkxRest;
use crate::exchanges::okx::types::{OkxAlgoOrderRequest, OkxCancelAlgoRequest, OkxOrderRequest};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const MARKET_ORD_TYPE: &str = "market";
const TRIGGER_ORD_TYPE: &str = "trigger";
/// Order price for trigger orders that execute at market
const MARKET_ORDER_PX: &str = "-1";

/// OKX trading implementation
pub struct Trading<R: RestClient> {
    rest: Arc<OkxRest<R>>,
    instruments: Arc<InstrumentCache<R>>,
    account: Account<R>,
    warnings: WarningSink,
}

impl<R: RestClient> Trading<R> {
    pub fn new(
        rest: Arc<OkxRest<R>>,
        instruments: Arc<InstrumentCache<R>>,
        account: Account<R>,
        warnings: WarningSink,
    ) -> Self {
        Self {
            rest,
            instruments,
            account,
            warnings,
        }
    }

    async fn open_position(
        &self,
        operation: &'static str,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        let inst_id = symbol_to_inst_id(symbol);

        // Stale protection orders from a previous position must not fire on the new one
        if let Err(e) = self.cancel_all(symbol).await {
            self.warnings.emit(
                operation,
                symbol,
                format!("Failed to cancel existing orders: {}", e),
            );
        }

        self.account.set_leverage(symbol, leverage).await?;

        let size = self.instruments.format_quantity(&inst_id, quantity).await;
        let mode = self.account.margin_mode().await;

        let order = OkxOrderRequest {
            inst_id,
            td_mode: convert_margin_mode_to_okx(mode),
            side: convert_order_side_to_okx(position_side.entry_side()),
            pos_side: convert_position_side_to_okx(position_side),
            ord_type: MARKET_ORD_TYPE.to_string(),
            sz: size.clone(),
            reduce_only: None,
        };

        let result = self.submit_market_order(operation, symbol, &order).await?;

        info!(
            symbol = %symbol,
            side = %position_side,
            size = %size,
            leverage,
            order_id = %result.order_id,
            "Position opened"
        );
        Ok(result)
    }

    async fn close_position(
        &self,
        operation: &'static str,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        let inst_id = symbol_to_inst_id(symbol);

        let quantity = if quantity.is_zero() {
            self.current_position_size(&inst_id, position_side).await?
        } else {
            quantity
        };

        let size = self.instruments.format_quantity(&inst_id, quantity).await;
        let mode = self.account.margin_mode().await;

        let order = OkxOrderRequest {
            inst_id,
            td_mode: convert_margin_mode_to_okx(mode),
            side: convert_order_side_to_okx(position_side.exit_side()),
            pos_side: convert_position_side_to_okx(position_side),
            ord_type: MARKET_ORD_TYPE.to_string(),
            sz: size.clone(),
            reduce_only: Some(true),
        };

        let result = self.submit_market_order(operation, symbol, &order).await?;

        info!(
            symbol = %symbol,
            side = %position_side,
            size = %size,
            order_id = %result.order_id,
            "Position closed"
        );

        // Protection orders for the closed position are now orphaned
        if let Err(e) = self.cancel_all(symbol).await {
            self.warnings.emit(
                operation,
                symbol,
                format!("Failed to cancel remaining orders: {}", e),
            );
        }

        Ok(result)
    }

    async fn current_position_size(
        &self,
        inst_id: &str,
        position_side: PositionSide,
    ) -> Result<Decimal, ExchangeError> {
        let symbol = inst_id_to_symbol(inst_id);
        self.account
            .get_positions()
            .await?
            .into_iter()
            .find(|position| position.symbol == symbol && position.side == position_side)
            .map(|position| position.quantity)
            .ok_or_else(|| ExchangeError::PositionNotFound {
                symbol,
                side: position_side.to_string(),
            })
    }

    async fn submit_market_order(
        &self,
        operation: &'static str,
        symbol: &str,
        order: &OkxOrderRequest,
    ) -> Result<OrderResult, ExchangeError> {
        let order_id = match self.rest.place_order(order).await? {
            Some(response) => response.ord_id,
            None => String::new(),
        };

        if order_id.is_empty() {
            self.warnings
                .emit(operation, symbol, "Order accepted without an order ID");
        }

        Ok(OrderResult {
            order_id,
            symbol: symbol.to_string(),
            status: OrderStatus::Filled,
        })
    }

    async fn place_trigger_order(
        &self,
        operation: &'static str,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        trigger_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError> {
        let inst_id = symbol_to_inst_id(symbol);
        let size = self.instruments.format_quantity(&inst_id, quantity).await;
        let trigger_px = self.instruments.format_price(&inst_id, trigger_price).await;
        let mode = self.account.margin_mode().await;

        let order = OkxAlgoOrderRequest {
            inst_id,
            td_mode: convert_margin_mode_to_okx(mode),
            side: convert_order_side_to_okx(position_side.exit_side()),
            pos_side: convert_position_side_to_okx(position_side),
            ord_type: TRIGGER_ORD_TYPE.to_string(),
            sz: size.clone(),
            trigger_px: trigger_px.clone(),
            order_px: MARKET_ORDER_PX.to_string(),
            reduce_only: true,
        };

        let algo_id = self
            .rest
            .place_algo_order(&order)
            .await?
            .map(|response| response.algo_id)
            .unwrap_or_default();

        if algo_id.is_empty() {
            self.warnings
                .emit(operation, symbol, "Trigger order accepted without an algo ID");
        }

        info!(
            operation,
            symbol = %symbol,
            side = %position_side,
            size = %size,
            trigger_price = %trigger_px,
            algo_id = %algo_id,
            "Trigger order placed"
        );

        Ok(TriggerOrderResult {
            algo_id,
            symbol: symbol.to_string(),
            position_side,
            quantity: size,
            trigger_price: trigger_px,
        })
    }

    async fn cancel_all(&self, symbol: &str) -> Result<(), ExchangeError> {
        let inst_id = symbol_to_inst_id(symbol);

        let pending = self
            .rest
            .get_pending_orders(SWAP_INST_TYPE, &inst_id)
            .await?;
        let mut cancelled = 0usize;
        for order in &pending {
            match self.rest.cancel_order(&inst_id, &order.ord_id).await {
                Ok(()) => cancelled += 1,
                Err(e) => self.warnings.emit(
                    "cancel_all_orders",
                    symbol,
                    format!("Failed to cancel order {}: {}", order.ord_id, e),
                ),
            }
        }

        match self
            .rest
            .get_pending_algo_orders(SWAP_INST_TYPE, &inst_id, TRIGGER_ORD_TYPE)
            .await
        {
            Ok(algos) => {
                for algo in &algos {
                    let request = [OkxCancelAlgoRequest {
                        inst_id: inst_id.clone(),
                        algo_id: algo.algo_id.clone(),
                    }];
                    match self.rest.cancel_algo_orders(&request).await {
                        Ok(()) => cancelled += 1,
                        Err(e) => self.warnings.emit(
                            "cancel_all_orders",
                            symbol,
                            format!("Failed to cancel trigger order {}: {}", algo.algo_id, e),
                        ),
                    }
                }
            }
            Err(e) => self.warnings.emit(
                "cancel_all_orders",
                symbol,
                format!("Failed to list trigger orders: {}", e),
            ),
        }

        debug!(symbol = %symbol, cancelled, "Cancelled pending orders");
        Ok(())
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn open_long(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        self.open_position("open_long", symbol, PositionSide::Long, quantity, leverage)
            .await
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn open_short(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        self.open_position("open_short", symbol, PositionSide::Short, quantity, leverage)
            .await
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn close_long(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.close_position("close_long", symbol, PositionSide::Long, quantity)
            .await
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn close_short(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.close_position("close_short", symbol, PositionSide::Short, quantity)
            .await
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn set_stop_loss(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError> {
        self.place_trigger_order("set_stop_loss", symbol, position_side, quantity, stop_price)
            .await
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn set_take_profit(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        take_profit_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError> {
        self.place_trigger_order(
            "set_take_profit",
            symbol,
            position_side,
            quantity,
            take_profit_price,
        )
        .await
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn cancel_all_orders(&self, symbol: &str) -> Result<(), ExchangeError> {
        self.cancel_all(symbol).await
    }
}
