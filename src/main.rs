//! clob-signer
//!
//! Offline order signing and request authentication for the Polymarket CLOB.
//! The private key and API credentials are read from `POLY_*` environment
//! variables (or a `.env` file).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clob_auth::{sign_request_at, Credentials, HttpMethod, OrderSigner};
use clob_core::config::ClientConfig;
use clob_core::signing::address_hex;
use clob_core::sizing::compute_amounts;
use clob_core::types::{OrderBookSnapshot, OrderRequest, OrderSide, OrderType, TimeInForce};
use clob_trading::transport::parse_order_book;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "clob-signer", version, about = "Polymarket CLOB order signer")]
struct Cli {
    /// Optional config file, overridden by CLOB_* variables.
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the signer and funding addresses.
    Address,
    /// Compute maker/taker amounts for an order.
    Amounts(OrderArgs),
    /// Size and sign an order, printing the submission JSON.
    SignOrder(SignOrderArgs),
    /// Print the authentication headers for a request.
    Headers(HeadersArgs),
}

#[derive(clap::Args, Debug)]
struct OrderArgs {
    #[arg(long, value_enum)]
    side: SideArg,
    #[arg(long = "type", value_enum, default_value = "limit")]
    order_type: OrderTypeArg,
    #[arg(long)]
    quantity: Decimal,
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long = "tif", value_enum)]
    time_in_force: Option<TimeInForceArg>,
    /// `/book` response JSON, required for market orders.
    #[arg(long, value_name = "PATH")]
    book: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct SignOrderArgs {
    #[arg(long)]
    token_id: String,
    #[command(flatten)]
    order: OrderArgs,
    #[arg(long)]
    neg_risk: bool,
    /// Used as the salt instead of a random one.
    #[arg(long)]
    client_order_id: Option<u64>,
    #[arg(long)]
    fee_rate_bps: Option<u64>,
    /// Unix seconds.
    #[arg(long)]
    expiration: Option<u64>,
    #[arg(long)]
    nonce: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct HeadersArgs {
    #[arg(long, default_value = "GET")]
    method: String,
    #[arg(long)]
    path: String,
    #[arg(long)]
    body: Option<String>,
    /// L1 nonce.
    #[arg(long)]
    nonce: Option<u64>,
    /// Unix seconds; defaults to now.
    #[arg(long)]
    timestamp: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    Buy,
    Sell,
}

impl From<SideArg> for OrderSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Buy => OrderSide::Buy,
            SideArg::Sell => OrderSide::Sell,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderTypeArg {
    Limit,
    Market,
}

impl From<OrderTypeArg> for OrderType {
    fn from(order_type: OrderTypeArg) -> Self {
        match order_type {
            OrderTypeArg::Limit => OrderType::Limit,
            OrderTypeArg::Market => OrderType::Market,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TimeInForceArg {
    Gtc,
    Gtd,
    Fok,
    Fak,
}

impl From<TimeInForceArg> for TimeInForce {
    fn from(tif: TimeInForceArg) -> Self {
        match tif {
            TimeInForceArg::Gtc => TimeInForce::Gtc,
            TimeInForceArg::Gtd => TimeInForce::Gtd,
            TimeInForceArg::Fok => TimeInForce::Fok,
            TimeInForceArg::Fak => TimeInForce::Fak,
        }
    }
}

impl OrderArgs {
    fn request(&self, token_id: &str) -> OrderRequest {
        let mut request = OrderRequest::market(token_id, self.side.into(), self.quantity);
        request.order_type = self.order_type.into();
        request.price = self.price;
        request.time_in_force = self.time_in_force.map(Into::into);
        request
    }

    fn load_book(&self) -> Result<Option<OrderBookSnapshot>> {
        self.book
            .as_ref()
            .map(|path| {
                let body = std::fs::read_to_string(path)
                    .with_context(|| format!("read order book {}", path.display()))?;
                parse_order_book(&body).context("parse order book")
            })
            .transpose()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clob_signer=info,clob_core=warn,clob_auth=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config_path.as_deref()).context("load configuration")?;

    match cli.command {
        Command::Address => {
            let credentials = Credentials::from_env().context("load credentials")?;
            println!("signer:  {}", address_hex(&credentials.address()));
            println!("funding: {}", address_hex(&credentials.funding_address()));
        }
        Command::Amounts(args) => {
            let request = args.request("0");
            let book = args.load_book()?;
            let amounts = compute_amounts(
                request.side,
                request.order_type,
                request.quantity,
                request.price,
                request.time_in_force,
                book.as_ref(),
            )?;
            println!(
                "{}",
                serde_json::json!({
                    "makerAmount": amounts.maker_amount.to_string(),
                    "takerAmount": amounts.taker_amount.to_string(),
                })
            );
        }
        Command::SignOrder(args) => {
            let credentials = Credentials::from_env().context("load credentials")?;
            let mut request = args.order.request(&args.token_id).neg_risk(args.neg_risk);
            request.client_order_id = args.client_order_id;
            request.fee_rate_bps = args.fee_rate_bps;
            request.expiration = args.expiration;
            request.nonce = args.nonce;

            let book = args.order.load_book()?;
            let amounts = compute_amounts(
                request.side,
                request.order_type,
                request.quantity,
                request.price,
                request.time_in_force,
                book.as_ref(),
            )?;
            let signer = OrderSigner::new(config.chain_id)?;
            let signed = signer.sign_request(&credentials, &request, amounts)?;

            info!(chain_id = config.chain_id, salt = signed.salt, "Order signed");
            println!("{}", serde_json::to_string_pretty(&signed)?);
        }
        Command::Headers(args) => {
            let credentials = Credentials::from_env().context("load credentials")?;
            let method: HttpMethod = args.method.parse()?;
            let timestamp = args
                .timestamp
                .unwrap_or_else(clob_auth::headers::unix_timestamp);
            let headers = sign_request_at(
                &credentials,
                method,
                &args.path,
                args.body.as_deref(),
                args.nonce,
                timestamp,
            )?;
            for (name, value) in headers.iter() {
                println!("{}: {}", name, value);
            }
        }
    }

    Ok(())
}
