use crate::core::errors::ExchangeError;
use crate::core::events::WarningSink;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, MarketDataSource, OrderPlacer};
use crate::core::types::{
    AccountBalance, MarginMode, OrderResult, Position, PositionSide, TriggerOrderResult,
};
use crate::exchanges::okx::instruments::InstrumentCache;
use crate::exchanges::okx::rest::OkxRest;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// OKX connector that composes all sub-trait implementations
///
/// The sub-components share one REST client, one instrument cache and one
/// recorded margin mode.
pub struct OkxConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
    instruments: Arc<InstrumentCache<R>>,
}

impl<R: RestClient> OkxConnector<R> {
    /// Create a connector that only logs best-effort failures
    pub fn new(rest: R) -> Self {
        Self::with_warnings(rest, WarningSink::default())
    }

    /// Create a connector that also forwards best-effort failures to `warnings`
    pub fn with_warnings(rest: R, warnings: WarningSink) -> Self {
        let rest = Arc::new(OkxRest::new(rest));
        let instruments = Arc::new(InstrumentCache::new(Arc::clone(&rest)));
        let margin_mode = Arc::new(RwLock::new(MarginMode::default()));

        let account = Account::new(Arc::clone(&rest), margin_mode, warnings.clone());

        Self {
            market: MarketData::new(Arc::clone(&rest), Arc::clone(&instruments)),
            trading: Trading::new(
                rest,
                Arc::clone(&instruments),
                account.clone(),
                warnings,
            ),
            account,
            instruments,
        }
    }

    /// Margin mode currently applied to orders
    pub async fn margin_mode(&self) -> MarginMode {
        self.account.margin_mode().await
    }

    /// Align a price to the instrument's tick size
    pub async fn format_price(&self, symbol: &str, price: Decimal) -> String {
        self.market.format_price(symbol, price).await
    }

    pub fn instruments(&self) -> &InstrumentCache<R> {
        &self.instruments
    }
}

/// Implement AccountInfo trait for the OKX connector
#[async_trait]
impl<R: RestClient> AccountInfo for OkxConnector<R> {
    async fn get_balance(&self) -> Result<AccountBalance, ExchangeError> {
        self.account.get_balance().await
    }

    async fn get_positions(&self) -> Result<Vec<Position>, ExchangeError> {
        self.account.get_positions().await
    }

    async fn set_margin_mode(&self, symbol: &str, mode: MarginMode) -> Result<(), ExchangeError> {
        self.account.set_margin_mode(symbol, mode).await
    }

    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<(), ExchangeError> {
        self.account.set_leverage(symbol, leverage).await
    }
}

/// Implement OrderPlacer trait for the OKX connector
#[async_trait]
impl<R: RestClient> OrderPlacer for OkxConnector<R> {
    async fn open_long(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.open_long(symbol, quantity, leverage).await
    }

    async fn open_short(
        &self,
        symbol: &str,
        quantity: Decimal,
        leverage: u32,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.open_short(symbol, quantity, leverage).await
    }

    async fn close_long(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.close_long(symbol, quantity).await
    }

    async fn close_short(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.trading.close_short(symbol, quantity).await
    }

    async fn set_stop_loss(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError> {
        self.trading
            .set_stop_loss(symbol, position_side, quantity, stop_price)
            .await
    }

    async fn set_take_profit(
        &self,
        symbol: &str,
        position_side: PositionSide,
        quantity: Decimal,
        take_profit_price: Decimal,
    ) -> Result<TriggerOrderResult, ExchangeError> {
        self.trading
            .set_take_profit(symbol, position_side, quantity, take_profit_price)
            .await
    }

    async fn cancel_all_orders(&self, symbol: &str) -> Result<(), ExchangeError> {
        self.trading.cancel_all_orders(symbol).await
    }
}

/// Implement MarketDataSource trait for the OKX connector
#[async_trait]
impl<R: RestClient> MarketDataSource for OkxConnector<R> {
    async fn get_market_price(&self, symbol: &str) -> Result<Decimal, ExchangeError> {
        self.market.get_market_price(symbol).await
    }

    async fn format_quantity(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<String, ExchangeError> {
        self.market.format_quantity(symbol, quantity).await
    }
}
