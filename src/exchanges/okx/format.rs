//! Step alignment and wire rendering for quantities and prices.
//!
//! OKX rejects sizes that are not a multiple of `lotSz` and trigger prices that
//! are not a multiple of `tickSz`. Values are aligned to the *nearest* step, so
//! a formatted quantity may exceed the requested one.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used when no usable step is known
pub const FALLBACK_DECIMALS: u32 = 4;

/// Round `raw` to the nearest multiple of `step` and render it
///
/// Returns `None` when `step` is not positive or the step count overflows
/// `Decimal`, so the caller can decide on a fallback.
pub fn format_to_step(raw: Decimal, step: Decimal) -> Option<String> {
    if step <= Decimal::ZERO {
        return None;
    }

    let steps = raw
        .checked_div(step)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let decimals = step.scale();
    let aligned = steps
        .checked_mul(step)?
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    Some(render(aligned))
}

/// Fixed four-decimal rendering used when the instrument is unknown
pub fn format_fallback(raw: Decimal) -> String {
    render(raw.round_dp_with_strategy(FALLBACK_DECIMALS, RoundingStrategy::MidpointAwayFromZero))
}

/// Plain decimal notation without trailing zeros or a dangling point
fn render(value: Decimal) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    trim_trailing_zeros(&value.to_string())
}

pub fn trim_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
