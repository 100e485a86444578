use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use futures_util::{StreamExt, stream};
use hibp_range::{
    BreachDecisionEngine, DEFAULT_RANGE_URL, HIBP_RANGE_URL_ENV, RangeClientConfig,
    parse_base_url,
};
use hibp_range_cli::{Error, FailurePolicy, Verdict, observe, telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "hibp-range")]
#[command(about = "Check passwords against Have I Been Pwned without sending them anywhere")]
struct Args {
    /// Password to check. When omitted, passwords are read one per line from stdin
    #[arg(long)]
    password: Option<String>,

    /// Base URL of the range API
    #[arg(long, env = HIBP_RANGE_URL_ENV, default_value = DEFAULT_RANGE_URL)]
    base_url: String,

    /// Per-check timeout in milliseconds
    #[arg(long, env = "HIBP_TIMEOUT_MS", default_value_t = 500)]
    timeout_ms: u64,

    /// User-Agent sent with every range query
    #[arg(long, default_value = concat!("hibp-range/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,

    /// Verdict when the range API cannot be consulted
    #[arg(long, value_enum, default_value_t = FailurePolicy::Closed)]
    on_error: FailurePolicy,

    /// Number of checks in flight at once
    #[arg(short = 'j', long, default_value_t = 16)]
    concurrency: usize,

    /// Print one JSON verdict per password instead of a text line
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every password was accepted.
async fn run(args: Args) -> Result<bool, Error> {
    telemetry::init(&args.log_level)?;

    if args.concurrency == 0 {
        return Err(Error::InvalidArgs);
    }

    let config = RangeClientConfig {
        base_url: parse_base_url(&args.base_url)?,
        user_agent: Some(args.user_agent.clone()),
        ..Default::default()
    };
    let engine = BreachDecisionEngine::from_config(&config)?;
    let timeout = Duration::from_millis(args.timeout_ms);

    let passwords = match args.password {
        Some(password) => vec![password],
        None => read_passwords().await?,
    };
    debug!(count = passwords.len(), "checking passwords");

    let results: Vec<_> = stream::iter(passwords.iter().enumerate())
        .map(|(index, password)| observe(index + 1, engine.check(password, timeout)))
        .buffered(args.concurrency)
        .collect()
        .await;
    drop(passwords);

    let mut all_ok = true;
    for (index, result) in results.iter().enumerate() {
        let verdict = Verdict::from_result(result, args.on_error);
        all_ok &= verdict.password_ok;

        if args.json {
            println!("{}", serde_json::to_string(&verdict)?);
        } else {
            println!("{}: {}", index + 1, verdict.summary());
        }
    }

    Ok(all_ok)
}

async fn read_passwords() -> Result<Vec<String>, Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut passwords = Vec::new();
    while let Some(line) = lines.next_line().await? {
        passwords.push(line);
    }
    Ok(passwords)
}
