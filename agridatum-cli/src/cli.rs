//! Command-line arguments

use std::path::PathBuf;

use agridatum_client::Credentials;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "agridatum", version, about = "Record and verify signed harvests")]
pub struct Cli {
    /// Backend base URL (overrides AGRIDATUM_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Signing strategies in order, e.g. "remote,local" (overrides AGRIDATUM_SIGNING)
    #[arg(long, global = true)]
    pub signing: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for daily log files
    #[arg(long, global = true, env = "AGRIDATUM_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the farmer id derived from phone number and PIN
    Derive(FarmerArgs),

    /// Log in and print a summary of the farmer's records
    Login(FarmerArgs),

    /// Sign and submit a harvest
    Submit(SubmitArgs),

    /// List records, either the farmer's own or across all farmers
    Records(RecordsArgs),

    /// Verify a record by id or transaction hash
    Verify(VerifyArgs),

    /// Write the farmer's records to a JSON file
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FarmerArgs {
    /// Phone number
    #[arg(long, env = "AGRIDATUM_PHONE")]
    pub phone: String,

    /// Six digit PIN
    #[arg(long, env = "AGRIDATUM_PIN", hide_env_values = true)]
    pub pin: String,
}

impl FarmerArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.phone.clone(), self.pin.clone())
    }
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub farmer: FarmerArgs,

    /// Plot location, e.g. "North Field - Section A"
    #[arg(long)]
    pub plot: String,

    /// Crop type
    #[arg(long)]
    pub crop: String,

    /// Harvest weight in kilograms
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<f64>,
}

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// Phone number; lists all farmers' records when omitted
    #[arg(long, env = "AGRIDATUM_PHONE", requires = "pin")]
    pub phone: Option<String>,

    /// Six digit PIN
    #[arg(long, env = "AGRIDATUM_PIN", hide_env_values = true)]
    pub pin: Option<String>,

    /// Only this crop type
    #[arg(long)]
    pub crop: Option<String>,

    /// Earliest harvest date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest harvest date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct VerifyArgs {
    /// Backend record id
    #[arg(long)]
    pub record_id: Option<i64>,

    /// Chain transaction hash
    #[arg(long)]
    pub tx_hash: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub farmer: FarmerArgs,

    /// Output file; defaults to agridatum-records-<date>.json
    #[arg(long)]
    pub out: Option<PathBuf>,
}
