//! Demo run of the storefront: two shoppers, two products, two checkouts.

use clap::Parser;
use rust_decimal::Decimal;
use std::num::NonZeroUsize;
use storefront::lifecycle::{setup_tracing, FailedLinePolicy, Platform, PlatformConfig, PlatformError};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Runs the storefront demo")]
struct Cli {
    /// What to do with cart lines that run out of stock
    #[arg(long, env = "STOREFRONT_FAILED_LINES", value_enum, default_value_t = FailedLinePolicy::Charge)]
    failed_lines: FailedLinePolicy,

    /// Request queue capacity per actor
    #[arg(long, env = "STOREFRONT_BUFFER_SIZE", default_value_t = PlatformConfig::default().buffer_size)]
    buffer_size: NonZeroUsize,
}

impl From<Cli> for PlatformConfig {
    fn from(cli: Cli) -> Self {
        Self {
            buffer_size: cli.buffer_size,
            failed_lines: cli.failed_lines,
        }
    }
}

async fn run(platform: &Platform) -> Result<(), PlatformError> {
    let alice = platform.add_user("alice123", "password1").await?;
    let bob = platform.add_user("bob456", "password2").await?;

    let laptop = platform
        .add_product("Laptop", Decimal::new(89999, 2), 10)
        .await?;
    let smartphone = platform
        .add_product("Smartphone", Decimal::new(49999, 2), 20)
        .await?;

    platform.users.add_to_cart(alice, laptop, 2).await?;
    platform.users.add_to_cart(alice, smartphone, 1).await?;
    platform.users.add_to_cart(bob, smartphone, 3).await?;

    for user in [alice, bob] {
        let checkout = platform.process_order(user).await?;
        info!(%user, "Checkout finished");
        println!("{}", checkout.report());
    }

    println!("Orders:");
    for order in platform.orders().await? {
        println!("{}", platform.receipt(&order).await?);
        println!();
    }

    Ok(())
}

/// Failures are logged, not turned into an exit code.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_tracing();

    let platform = Platform::with_config(cli.into());
    if let Err(e) = run(&platform).await {
        error!(error = %e, "Demo failed");
    }
    if let Err(e) = platform.shutdown().await {
        error!(error = %e, "Shutdown failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["storefront"]).unwrap();
        assert_eq!(cli.buffer_size.get(), 32);
        assert_eq!(cli.failed_lines, FailedLinePolicy::Charge);
    }

    #[test]
    fn test_zero_buffer_size_is_a_usage_error() {
        let result = Cli::try_parse_from(["storefront", "--buffer-size", "0"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_demo_run_places_both_orders() {
        let platform = Platform::new();
        run(&platform).await.unwrap();

        let totals: Vec<Decimal> = platform
            .orders()
            .await
            .unwrap()
            .into_iter()
            .map(|order| order.total)
            .collect();
        assert_eq!(totals, vec![Decimal::new(229997, 2), Decimal::new(149997, 2)]);
        platform.shutdown().await.unwrap();
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::try_parse_from(["storefront", "--buffer-size", "4", "--failed-lines", "exclude"])
            .unwrap();
        let config = PlatformConfig::from(cli);
        assert_eq!(config.buffer_size.get(), 4);
        assert_eq!(config.failed_lines, FailedLinePolicy::Exclude);
    }
}
