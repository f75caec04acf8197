use crate::config::toml_config::FileConfig;
use crate::config::ReviewSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "code-reviewer")]
#[command(about = "Paste code, get an AI review rendered in your terminal")]
pub struct CliConfig {
    #[arg(long, env = "API_BASE_URL", help = "Base URL of the review service")]
    pub api_base_url: Option<String>,

    #[arg(long, env = "REVIEW_TIMEOUT_SECS", help = "Seconds to wait for a review")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "TOML file with an [api] section")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        short,
        help = "Review this file ('-' for stdin) and print the result instead of opening the editor"
    )]
    pub file: Option<String>,

    #[arg(long, help = "Write logs to this file while the editor is open")]
    pub log_file: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn settings(&self) -> Result<ReviewSettings> {
        let file = match &self.config {
            Some(path) => Some(FileConfig::from_file(path)?),
            None => None,
        };

        let settings =
            ReviewSettings::resolve(self.api_base_url.clone(), self.timeout_secs, file.as_ref());
        settings.validate()?;
        Ok(settings)
    }
}
