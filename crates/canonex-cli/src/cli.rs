//! CLI argument definitions for canonex.
//!
//! # Commands
//!
//! | Command | Network | Description |
//! |---------|---------|-------------|
//! | `time` | yes | Exchange server clock |
//! | `markets` | yes | Canonical markets |
//! | `currencies` | yes | Canonical currencies keyed by code |
//! | `endpoints` | no | Declared REST endpoint table |
//! | `fees` | no | Fee schedule, optionally resolved for a volume |
//! | `request` | optional | Call any declared endpoint, or shape it with `--dry-run` |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--exchange` | `bitvavo` | Exchange to address |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `CANONEX_TIMEOUT_MS` or `10000` | Transport timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! canonex markets --active-only --pretty
//! canonex currencies --on-collision keep-first
//! canonex fees --volume 120000
//! canonex request '{market}/book' --param market=ADA-BTC --param depth=10 --dry-run
//! ```

use clap::{Args, Parser, Subcommand};

/// Canonical cryptocurrency exchange data CLI.
#[derive(Debug, Parser)]
#[command(
    name = "canonex",
    author,
    version,
    about = "Canonical cryptocurrency exchange data CLI",
    long_about = "canonex fetches exchange metadata and normalizes it into a provider-agnostic \
schema. Output is a single JSON document on stdout; logs go to stderr and are \
controlled with RUST_LOG.\n\
\n\
Credentials for private endpoints are read from CANONEX_BITVAVO_API_KEY and \
CANONEX_BITVAVO_API_SECRET."
)]
pub struct Cli {
    /// Exchange to address.
    #[arg(long, global = true, default_value = "bitvavo")]
    pub exchange: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Transport timeout in milliseconds. Overrides CANONEX_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the exchange server time.
    Time,

    /// Fetch all markets in canonical form.
    ///
    /// # Examples
    ///
    ///   canonex markets
    ///   canonex markets --active-only --pretty
    Markets(MarketsArgs),

    /// Fetch all currencies keyed by canonical code.
    ///
    /// Two assets that map to one code fail the command unless a
    /// collision policy is given.
    Currencies(CurrenciesArgs),

    /// List the declared REST endpoints.
    Endpoints(EndpointsArgs),

    /// Show the trading fee schedule.
    Fees(FeesArgs),

    /// Call a declared endpoint with arbitrary parameters.
    ///
    /// # Examples
    ///
    ///   canonex request ticker/24h --param market=ADA-EUR
    ///   canonex request order --scope private --method post --param market=ADA-EUR --dry-run
    Request(RequestArgs),
}

/// Arguments for the `markets` command.
#[derive(Debug, Args)]
pub struct MarketsArgs {
    /// Only list markets that are currently trading.
    #[arg(long, default_value_t = false)]
    pub active_only: bool,
}

/// Arguments for the `currencies` command.
#[derive(Debug, Args)]
pub struct CurrenciesArgs {
    /// Currency code collision policy: reject, keep-first or keep-last.
    ///
    /// Defaults to CANONEX_CURRENCY_COLLISION, then reject.
    #[arg(long)]
    pub on_collision: Option<String>,
}

/// Arguments for the `endpoints` command.
#[derive(Debug, Args)]
pub struct EndpointsArgs {
    /// Only list endpoints of this scope (public or private).
    #[arg(long)]
    pub scope: Option<String>,
}

/// Arguments for the `fees` command.
#[derive(Debug, Args)]
pub struct FeesArgs {
    /// 30-day trading volume used to resolve the applicable tier.
    #[arg(long)]
    pub volume: Option<f64>,
}

/// Arguments for the `request` command.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Endpoint path relative to the API version, e.g. `{market}/book`.
    pub path: String,

    /// API scope (public or private).
    #[arg(long, default_value = "public")]
    pub scope: String,

    /// HTTP method (GET, POST, PUT, DELETE).
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// Request parameter as key=value. Repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Print the shaped request instead of sending it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
