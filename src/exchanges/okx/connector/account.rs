use crate::core::errors::ExchangeError;
use crate::core::events::WarningSink;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::{AccountBalance, MarginMode, Position};
use crate::exchanges::okx::conversions::{
    convert_margin_mode_to_okx, convert_okx_balance, convert_okx_position, symbol_to_inst_id,
};
use crate::exchanges::okx::instruments::SWAP_INST_TYPE;
use crate::exchanges::okx::rest::OkxRest;
use crate::exchanges::okx::types::OkxSetLeverageRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

const BALANCE_CURRENCY: &str = "USDT";
const HEDGE_POSITION_MODE: &str = "long_short_mode";

/// OKX account implementation
pub struct Account<R: RestClient> {
    rest: Arc<OkxRest<R>>,
    margin_mode: Arc<RwLock<MarginMode>>,
    warnings: WarningSink,
}

impl<R: RestClient> Clone for Account<R> {
    fn clone(&self) -> Self {
        Self {
            rest: Arc::clone(&self.rest),
            margin_mode: Arc::clone(&self.margin_mode),
            warnings: self.warnings.clone(),
        }
    }
}

impl<R: RestClient> Account<R> {
    pub fn new(
        rest: Arc<OkxRest<R>>,
        margin_mode: Arc<RwLock<MarginMode>>,
        warnings: WarningSink,
    ) -> Self {
        Self {
            rest,
            margin_mode,
            warnings,
        }
    }

    /// Margin mode applied to orders and leverage changes
    pub async fn margin_mode(&self) -> MarginMode {
        *self.margin_mode.read().await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn get_balance(&self) -> Result<AccountBalance, ExchangeError> {
        let okx_balance = self.rest.get_balance(BALANCE_CURRENCY).await?;
        Ok(convert_okx_balance(&okx_balance))
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn get_positions(&self) -> Result<Vec<Position>, ExchangeError> {
        let okx_positions = self.rest.get_positions(SWAP_INST_TYPE).await?;
        Ok(okx_positions
            .iter()
            .filter_map(convert_okx_position)
            .collect())
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn set_margin_mode(&self, symbol: &str, mode: MarginMode) -> Result<(), ExchangeError> {
        let inst_id = symbol_to_inst_id(symbol);

        // Fails when the account already runs in this mode or has open positions
        if let Err(e) = self.rest.set_position_mode(HEDGE_POSITION_MODE).await {
            self.warnings.emit(
                "set_margin_mode",
                symbol,
                format!("Failed to set long/short position mode: {}", e),
            );
        }

        *self.margin_mode.write().await = mode;

        let request = OkxSetLeverageRequest {
            inst_id,
            lever: "1".to_string(),
            mgn_mode: convert_margin_mode_to_okx(mode),
        };
        match self.rest.set_leverage(&request).await {
            Ok(()) => info!(symbol = %symbol, margin_mode = %mode, "Margin mode set"),
            Err(e) => {
                self.warnings.emit(
                    "set_margin_mode",
                    symbol,
                    format!("Failed to apply {} margin mode: {}", mode, e),
                );
                info!(
                    symbol = %symbol,
                    margin_mode = %mode,
                    "Margin mode recorded locally only; the exchange did not confirm it"
                );
            }
        }

        Ok(())
    }

    #[instrument(skip(self), fields(exchange = "okx"))]
    async fn set_leverage(&self, symbol: &str, leverage: u32) -> Result<(), ExchangeError> {
        let mode = self.margin_mode().await;
        let request = OkxSetLeverageRequest {
            inst_id: symbol_to_inst_id(symbol),
            lever: leverage.to_string(),
            mgn_mode: convert_margin_mode_to_okx(mode),
        };

        self.rest.set_leverage(&request).await?;

        info!(symbol = %symbol, leverage, margin_mode = %mode, "Leverage set");
        Ok(())
    }
}
