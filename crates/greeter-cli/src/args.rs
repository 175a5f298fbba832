use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "greeter", version, about = "Greeter program client")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log RPC round trips (debug level).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Cluster shorthand: localnet|devnet|testnet|mainnet-beta.
    #[arg(long, global = true, env = "GREETER_CLUSTER", default_value = "localnet")]
    pub cluster: String,

    /// RPC endpoint; overrides the cluster default.
    #[arg(long, global = true, env = "GREETER_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Websocket endpoint for confirmations; overrides the cluster default.
    #[arg(long, global = true, env = "GREETER_WS_URL")]
    pub ws_url: Option<String>,

    /// Confirm by polling RPC instead of a websocket subscription; wins over `--ws-url`.
    #[arg(long, global = true)]
    pub no_ws: bool,

    /// Commitment level: processed|confirmed|finalized.
    #[arg(long, global = true, env = "GREETER_COMMITMENT", default_value = "confirmed")]
    pub commitment: String,

    /// Seed for the greeting account address.
    #[arg(long, global = true, env = "GREETER_SEED", default_value = greeter_client::GREETING_SEED)]
    pub seed: String,

    /// Payer keypair file (JSON byte array or base58).
    #[arg(long, global = true, env = "GREETER_PAYER_KEYPAIR")]
    pub payer: Option<PathBuf>,

    /// Program keypair file (JSON byte array or base58).
    #[arg(long, global = true, env = "GREETER_PROGRAM_KEYPAIR")]
    pub program: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print payer, program and greeting account addresses (no network).
    Address,

    /// Create the greeting account if it does not exist yet.
    Provision,

    /// Send one greeting and print the updated counter.
    Greet,

    /// Read the current greeting counter.
    Counter,

    /// Provision (if needed) and greet once.
    Run,

    /// Check configuration, key material and endpoint reachability.
    Doctor,
}
