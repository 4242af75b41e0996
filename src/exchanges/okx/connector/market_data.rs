use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::exchanges::okx::conversions::symbol_to_inst_id;
use crate::exchanges::okx::instruments::InstrumentCache;
use crate::exchanges::okx::rest::OkxRest;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

/// OKX market data implementation
pub struct MarketData<R: RestClient> {
    rest: Arc<OkxRest<R>>,
    instruments: Arc<InstrumentCache<R>>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(rest: Arc<OkxRest<R>>, instruments: Arc<InstrumentCache<R>>) -> Self {
        Self { rest, instruments }
    }

    /// Align a trigger or limit price to the instrument's tick size
    pub async fn format_price(&self, symbol: &str, price: Decimal) -> String {
        self.instruments
            .format_price(&symbol_to_inst_id(symbol), price)
            .await
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn get_market_price(&self, symbol: &str) -> Result<Decimal, ExchangeError> {
        let inst_id = symbol_to_inst_id(symbol);
        let ticker = self.rest.get_ticker(&inst_id).await?;

        ticker.last.parse::<Decimal>().map_err(|e| {
            ExchangeError::DeserializationError(format!(
                "Invalid last price '{}' for {}: {}",
                ticker.last, inst_id, e
            ))
        })
    }

    async fn format_quantity(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<String, ExchangeError> {
        Ok(self
            .instruments
            .format_quantity(&symbol_to_inst_id(symbol), quantity)
            .await)
    }
}
