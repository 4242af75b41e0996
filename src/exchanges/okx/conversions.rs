use super::types as okx_types;
use crate::core::types::{
    conversion::string_to_decimal, AccountBalance, Instrument, MarginMode, OrderSide, Position,
    PositionSide,
};
use rust_decimal::Decimal;

const QUOTE_CURRENCY: &str = "USDT";
const SWAP_SUFFIX: &str = "-USDT-SWAP";

/// Convert a unified symbol to an OKX perpetual swap instrument ID,
/// e.g. `BTCUSDT` -> `BTC-USDT-SWAP`
pub fn symbol_to_inst_id(symbol: &str) -> String {
    let upper = symbol.to_uppercase();
    let base = upper.strip_suffix(QUOTE_CURRENCY).unwrap_or(&upper);
    format!("{}{}", base, SWAP_SUFFIX)
}

/// Convert an OKX instrument ID back to a unified symbol,
/// e.g. `BTC-USDT-SWAP` -> `BTCUSDT`
///
/// IDs with fewer than two `-` separated segments come back uppercased as-is.
pub fn inst_id_to_symbol(inst_id: &str) -> String {
    let mut parts = inst_id.split('-');
    match (parts.next(), parts.next()) {
        (Some(base), Some(quote)) => format!("{}{}", base, quote).to_uppercase(),
        _ => inst_id.to_uppercase(),
    }
}

pub fn convert_order_side_to_okx(side: OrderSide) -> String {
    match side {
        OrderSide::Buy => "buy".to_string(),
        OrderSide::Sell => "sell".to_string(),
    }
}

pub fn convert_position_side_to_okx(side: PositionSide) -> String {
    side.to_string()
}

pub fn convert_margin_mode_to_okx(mode: MarginMode) -> String {
    mode.to_string()
}

/// Convert an OKX instrument to the cached precision record
///
/// Unparsable steps become zero, which the formatter treats as "unknown".
pub fn convert_okx_instrument(instrument: &okx_types::OkxInstrument) -> Instrument {
    Instrument {
        id: instrument.inst_id.clone(),
        quantity_step: string_to_decimal(&instrument.lot_sz),
        price_step: string_to_decimal(&instrument.tick_sz),
    }
}

/// Convert an OKX position, dropping empty ones
pub fn convert_okx_position(position: &okx_types::OkxPosition) -> Option<Position> {
    let amount = string_to_decimal(&position.pos);
    if amount.is_zero() {
        return None;
    }

    let side = match position.pos_side.to_ascii_lowercase().as_str() {
        "long" => PositionSide::Long,
        "short" => PositionSide::Short,
        // net mode: direction is carried by the sign
        _ if amount.is_sign_negative() => PositionSide::Short,
        _ => PositionSide::Long,
    };

    Some(Position {
        symbol: inst_id_to_symbol(&position.inst_id),
        side,
        quantity: amount.abs(),
        entry_price: string_to_decimal(&position.avg_px),
        mark_price: string_to_decimal(&position.mark_px),
        unrealized_pnl: string_to_decimal(&position.upl),
        leverage: string_to_decimal(&position.lever),
        liquidation_price: string_to_decimal(&position.liq_px),
    })
}

/// Convert the OKX balance to the USDT account summary
///
/// Wallet balance excludes unrealized P&L: `cashBal` when present, otherwise
/// total equity minus unrealized P&L.
pub fn convert_okx_balance(balance: &okx_types::OkxBalanceData) -> AccountBalance {
    let total_equity = string_to_decimal(&balance.total_eq);

    let (cash_balance, available_balance, unrealized_pnl) = balance
        .details
        .iter()
        .find(|detail| detail.ccy.eq_ignore_ascii_case(QUOTE_CURRENCY))
        .map_or((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO), |detail| {
            (
                string_to_decimal(&detail.cash_bal),
                string_to_decimal(&detail.avail_bal),
                string_to_decimal(&detail.upl),
            )
        });

    let wallet_balance = if cash_balance.is_zero() {
        total_equity - unrealized_pnl
    } else {
        cash_balance
    };

    AccountBalance {
        wallet_balance,
        available_balance,
        unrealized_pnl,
    }
}
