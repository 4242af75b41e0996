use crate::core::{
    errors::ExchangeError,
    types::{AccountBalance, MarginMode, OrderResult, Position, PositionSide, TriggerOrderResult},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Account state and per-symbol position configuration
#[async_trait]
pub trait AccountInfo {
    /// Get the USDT balance summary
    async fn get_balance(&self) -> Result<AccountBalance, ExchangeError>;

    /// Get all non-empty positions
    async fn get_positions(&self) -> Result<Vec<Position>, ExchangeError>;

    /// Switch to hedge mode and the given margin mode.
    ///
    /// Exchange rejections are reported as warnings; the mode is recorded locally
    /// and applied to every later order regardless.
    async fn set_margin_mode(&self, symbol: &str, mode: MarginMode) -> Result<(), ExchangeError>;

    /// Set leverage for a symbol under the currently recorded margin mode
    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<(), ExchangeError>;
}

/// Position lifecycle: open, protect, close
#[async_trait]
pub trait OrderPlacer {
    /// Open (or add to) a long position with a market order
    async fn open_long(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError>;

    /// Open (or add to) a short position with a market order
    async fn open_short(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError>;

    /// Reduce a long position; a zero quantity closes all of it
    async fn close_long(&self, symbol: &str, quantity: Decimal)
        -> Result<OrderResult, ExchangeError>;

    /// Reduce a short position; a zero quantity closes all of it
    async fn close_short(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError>;

    /// Place a reduce-only stop-loss trigger protecting `position_side`
    async fn set_stop_loss(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError>;

    /// Place a reduce-only take-profit trigger protecting `position_side`
    async fn set_take_profit(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        take_profit_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError>;

    /// Cancel every resting and trigger order for a symbol
    async fn cancel_all_orders(&self, symbol: &str) -> Result<(), ExchangeError>;
}

#[async_trait]
pub trait MarketDataSource {
    /// Last traded price
    async fn get_market_price(&self, symbol: &str) -> Result<Decimal, ExchangeError>;

    /// Round a quantity to the instrument's lot size and render it for the wire
    async fn format_quantity(&self, symbol: &str, quantity: Decimal)
        -> Result<String, ExchangeError>;
}

/// The full capability contract strategy engines and schedulers depend on
pub trait Trader: AccountInfo + OrderPlacer + MarketDataSource + Send + Sync {}

impl<T> Trader for T where T: AccountInfo + OrderPlacer + MarketDataSource + Send + Sync {}
