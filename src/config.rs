//! Command-line and environment configuration

use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/bank";
pub const DEFAULT_LOG_FILE: &str = "bankdesk.log";

/// Terminal client for a REST customer record service
#[derive(Debug, Clone, Parser)]
#[command(name = "bankdesk", version, about)]
pub struct Config {
    /// Base URL of the record service (endpoints are appended to it)
    #[arg(long, env = "BANKDESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// File that receives the application log (verbosity from RUST_LOG)
    #[arg(long, env = "BANKDESK_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}
