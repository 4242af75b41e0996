use anyhow::Context;
use okx_swap_trader::core::config::ExchangeConfig;
use okx_swap_trader::{AccountInfo, MarketDataSource, OkxBuilder};
use rust_decimal::Decimal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Reads OKX_API_KEY, OKX_SECRET_KEY, OKX_PASSPHRASE and optionally OKX_TESTNET
    let config = load_config().context("Failed to load OKX credentials")?;
    let testnet = config.testnet;

    let (builder, mut warnings) = OkxBuilder::new().with_config(config).with_warning_channel();
    let okx = builder.build().context("Failed to build OKX connector")?;

    // Each warning is already logged by the connector; this only counts them
    let warning_count = tokio::spawn(async move {
        let mut count = 0usize;
        while warnings.recv().await.is_some() {
            count += 1;
        }
        count
    });

    info!(testnet, "Connected to OKX");

    // Read-only walkthrough; nothing here places orders
    let balance = okx.get_balance().await.context("Failed to fetch balance")?;
    println!(
        "Wallet: {} USDT, available: {} USDT, unrealized P&L: {} USDT",
        balance.wallet_balance, balance.available_balance, balance.unrealized_pnl
    );

    let positions = okx.get_positions().await.context("Failed to fetch positions")?;
    if positions.is_empty() {
        println!("No open positions");
    }
    for position in &positions {
        println!(
            "{} {}: {} @ {} (mark {}, P&L {}, {}x)",
            position.symbol,
            position.side,
            position.quantity,
            position.entry_price,
            position.mark_price,
            position.unrealized_pnl,
            position.leverage
        );
    }

    let price = okx
        .get_market_price("BTCUSDT")
        .await
        .context("Failed to fetch BTCUSDT price")?;
    println!("BTCUSDT last price: {}", price);

    let quantity = okx
        .format_quantity("BTCUSDT", Decimal::new(127, 3))
        .await
        .context("Failed to format quantity")?;
    println!("0.127 contracts on BTC-USDT-SWAP submits as {}", quantity);

    // Dropping the connector closes the warning channel
    drop(okx);
    let skipped = warning_count.await.context("Warning counter task failed")?;
    println!("{} best-effort step(s) failed during this run", skipped);

    Ok(())
}

#[cfg(feature = "env-file")]
fn load_config() -> Result<ExchangeConfig, okx_swap_trader::core::config::ConfigError> {
    ExchangeConfig::from_env_file("OKX")
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> Result<ExchangeConfig, okx_swap_trader::core::config::ConfigError> {
    ExchangeConfig::from_env("OKX")
}
