pub mod conversions;
pub mod format;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod instruments;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, OkxBuilder};
pub use connector::{Account, MarketData, OkxConnector, Trading};
pub use instruments::InstrumentCache;
pub use rest::OkxRest;
pub use signer::OkxSigner;
pub use types::{OkxOrderRequest, OkxOrderResponse, OkxResponse, OkxTicker};
