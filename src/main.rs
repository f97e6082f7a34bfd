use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use trident_gateway::application::gateway::{
    DISPLAY_NAME, Gateway, HOMEPAGE_URL, LIVE_URL, SUPPORTED_CARD_TYPES, SUPPORTED_COUNTRIES,
    TEST_URL,
};
use trident_gateway::application::request::GatewayRequest;
use trident_gateway::domain::credentials::Credentials;
use trident_gateway::domain::transaction::ActionCode;
use trident_gateway::infrastructure::http::HttpTransport;
use trident_gateway::interfaces::csv::request_reader::{RequestReader, RequestRecord};
use trident_gateway::interfaces::csv::result_writer::ResultWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    gateway: GatewayArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GatewayArgs {
    /// Merchant profile id
    #[arg(long, env = "MES_LOGIN", global = true)]
    login: Option<String>,

    /// Merchant profile key
    #[arg(long, env = "MES_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Use the certification (test) endpoint
    #[arg(long, env = "MES_TEST", global = true)]
    test: bool,

    /// Post to this URL instead of the test or live endpoint
    #[arg(long, env = "MES_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "MES_TIMEOUT_SECS", default_value_t = 30, global = true)]
    timeout_secs: u64,
}

#[derive(Args)]
struct RequestArgs {
    #[arg(long)]
    amount: Option<Decimal>,
    /// Transaction id returned by an earlier call
    #[arg(long)]
    reference: Option<String>,
    #[arg(long)]
    card_number: Option<String>,
    #[arg(long)]
    exp_month: Option<u8>,
    #[arg(long)]
    exp_year: Option<u16>,
    #[arg(long)]
    cvv: Option<String>,
    /// Stored card id returned by `store`
    #[arg(long)]
    card_id: Option<String>,
    /// Expiration (MMYY) for a stored card
    #[arg(long)]
    card_exp_date: Option<String>,
    #[arg(long)]
    order_id: Option<String>,
    #[arg(long)]
    address1: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    /// MOTO/e-commerce indicator for purchases (default 7)
    #[arg(long)]
    moto: Option<u8>,
}

impl RequestArgs {
    fn into_record(self, operation: ActionCode) -> RequestRecord {
        RequestRecord {
            operation,
            amount: self.amount,
            reference: self.reference,
            card_number: self.card_number,
            exp_month: self.exp_month,
            exp_year: self.exp_year,
            cvv: self.cvv,
            card_id: self.card_id,
            card_exp_date: self.card_exp_date,
            order_id: self.order_id,
            address1: self.address1,
            zip: self.zip,
            moto: self.moto,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Authorize an amount without capturing it
    Authorize(RequestArgs),
    /// Authorize and capture in one step
    Purchase(RequestArgs),
    /// Capture a previous authorization
    Capture(RequestArgs),
    /// Store a card number and return its card id
    Store(RequestArgs),
    /// Remove a stored card
    Unstore(RequestArgs),
    /// Credit a card or stored card
    Credit(RequestArgs),
    /// Void a previous transaction
    Void(RequestArgs),
    /// Verify a card with a zero-amount authorization
    Verify(RequestArgs),
    /// Process every request in a CSV file and print results as CSV
    Batch {
        /// Input requests CSV file
        input: PathBuf,
    },
    /// Print the gateway descriptor
    Info,
}

fn build_gateway(args: &GatewayArgs) -> Result<Gateway> {
    let credentials = Credentials::new(
        args.login.clone().unwrap_or_default(),
        args.password.clone().unwrap_or_default(),
        args.test,
    )
    .into_diagnostic()?;
    let transport =
        HttpTransport::new().with_timeout(Some(Duration::from_secs(args.timeout_secs)));

    let gateway = Gateway::new(credentials, Box::new(transport));
    Ok(match &args.endpoint {
        Some(endpoint) => gateway.with_endpoint(endpoint),
        None => gateway,
    })
}

async fn run_batch(gateway: &Gateway, input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = RequestReader::new(file);

    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());
    for request in reader.requests() {
        match request {
            Ok(request) => match gateway.execute(&request).await {
                Ok(result) => writer.write_result(request.action(), &result).into_diagnostic()?,
                Err(e) => eprintln!("Error processing request: {}", e),
            },
            Err(e) => eprintln!("Error reading request: {}", e),
        }
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let Cli { gateway, command } = Cli::parse();

    let (operation, args) = match command {
        Command::Info => {
            let info = serde_json::json!({
                "display_name": DISPLAY_NAME,
                "homepage_url": HOMEPAGE_URL,
                "supported_countries": SUPPORTED_COUNTRIES,
                "supported_card_types": SUPPORTED_CARD_TYPES,
                "test_url": TEST_URL,
                "live_url": LIVE_URL,
            });
            println!("{}", serde_json::to_string_pretty(&info).into_diagnostic()?);
            return Ok(());
        }
        Command::Batch { input } => {
            let gateway = build_gateway(&gateway)?;
            return run_batch(&gateway, input).await;
        }
        Command::Authorize(args) => (ActionCode::Authorize, args),
        Command::Purchase(args) => (ActionCode::Purchase, args),
        Command::Capture(args) => (ActionCode::Capture, args),
        Command::Store(args) => (ActionCode::Store, args),
        Command::Unstore(args) => (ActionCode::Unstore, args),
        Command::Credit(args) => (ActionCode::Credit, args),
        Command::Void(args) => (ActionCode::Void, args),
        Command::Verify(args) => (ActionCode::Verify, args),
    };

    let gateway = build_gateway(&gateway)?;
    let request = GatewayRequest::try_from(args.into_record(operation)).into_diagnostic()?;
    let result = gateway.execute(&request).await.into_diagnostic()?;

    println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    Ok(())
}
