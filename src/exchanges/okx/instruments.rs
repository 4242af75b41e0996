use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::Instrument;
use crate::exchanges::okx::{conversions, format, rest::OkxRest};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

pub const SWAP_INST_TYPE: &str = "SWAP";

/// Process-lifetime cache of instrument precision, keyed by instrument ID
///
/// Instrument definitions are treated as static for the session, so entries
/// are never evicted.
pub struct InstrumentCache<R: RestClient> {
    rest: Arc<OkxRest<R>>,
    instruments: RwLock<HashMap<String, Instrument>>,
}

impl<R: RestClient> InstrumentCache<R> {
    pub fn new(rest: Arc<OkxRest<R>>) -> Self {
        Self {
            rest,
            instruments: RwLock::new(HashMap::new()),
        }
    }

    /// Get the precision record for an instrument, fetching the SWAP list on a miss
    #[instrument(skip(self), fields(exchange = "okx"))]
    pub async fn get_instrument(&self, inst_id: &str) -> Result<Instrument, ExchangeError> {
        if let Some(instrument) = self.instruments.read().await.get(inst_id) {
            return Ok(instrument.clone());
        }

        let listed = self.rest.get_instruments(SWAP_INST_TYPE).await?;
        debug!(count = listed.len(), "Fetched instrument list");

        let found = listed
            .iter()
            .find(|candidate| candidate.inst_id == inst_id)
            .map(conversions::convert_okx_instrument)
            .ok_or_else(|| ExchangeError::InstrumentNotFound(inst_id.to_string()))?;

        self.instruments
            .write()
            .await
            .insert(inst_id.to_string(), found.clone());

        Ok(found)
    }

    /// Number of cached instruments
    pub async fn len(&self) -> usize {
        self.instruments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.instruments.read().await.is_empty()
    }

    /// Align a quantity to the instrument's lot size
    ///
    /// Never fails: when the instrument can't be resolved the value is rendered
    /// with a fixed four decimals instead, which may be rejected by the exchange
    /// for coarser lots.
    pub async fn format_quantity(&self, inst_id: &str, quantity: Decimal) -> String {
        self.format_with(inst_id, quantity, |instrument| instrument.quantity_step)
            .await
    }

    /// Align a price to the instrument's tick size, with the same fallback as
    /// [`Self::format_quantity`]
    pub async fn format_price(&self, inst_id: &str, price: Decimal) -> String {
        self.format_with(inst_id, price, |instrument| instrument.price_step)
            .await
    }

    async fn format_with(
        &self,
        inst_id: &str,
        raw: Decimal,
        step_of: impl Fn(&Instrument) -> Decimal + Send,
    ) -> String {
        match self.get_instrument(inst_id).await {
            Ok(instrument) => format::format_to_step(raw, step_of(&instrument)).unwrap_or_else(|| {
                warn!(inst_id = %inst_id, "Value cannot be aligned to the instrument step, using fixed precision");
                format::format_fallback(raw)
            }),
            Err(e) => {
                warn!(inst_id = %inst_id, error = %e, "Instrument lookup failed, using fixed precision");
                format::format_fallback(raw)
            }
        }
    }
}
