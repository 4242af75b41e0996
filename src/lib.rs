pub mod core;
pub mod exchanges;

pub use crate::core::{
    errors::ExchangeError,
    events::TraderWarning,
    traits::{AccountInfo, MarketDataSource, OrderPlacer, Trader},
    types::*,
};
pub use exchanges::okx::{OkxBuilder, OkxConnector};
