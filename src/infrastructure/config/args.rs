use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "A terminal product catalog client",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// API base URL, overriding the environment and config file.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Keep image verdicts in memory only.
    #[arg(long)]
    pub no_persist: bool,
}
