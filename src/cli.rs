use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

use crate::config::{ConfigError, HarvestConfig};

pub const USAGE: &str = "Usage: category-harvester <api_url> <table_id> <api_token>";

/// Fetch every unique category path from a Baserow table and write a leveled CSV report.
#[derive(Debug, Parser)]
#[command(
    name = "category-harvester",
    version,
    override_usage = "category-harvester <api_url> <table_id> <api_token>"
)]
pub struct Cli {
    /// Base URL of the Baserow API (trailing slash allowed)
    pub api_url: String,

    /// Id of the table holding the `Category` column
    pub table_id: String,

    /// Database token sent as `Authorization: Token <api_token>`
    pub api_token: String,
}

impl Cli {
    pub fn into_config(self) -> Result<HarvestConfig, ConfigError> {
        HarvestConfig::new(&self.api_url, &self.table_id, &self.api_token)
    }
}

/// What `main` should do after looking at the arguments.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// `--help` or `--version`: print and exit successfully
    Info(String),
    /// Wrong argument count or shape: print usage and exit with status 1
    Usage,
}

/// Decides what to do with the raw process arguments (program name first).
///
/// Exactly three arguments always run, whatever they look like: a token
/// starting with `-` or even a literal `--help` is taken as a value. Any
/// other count is a usage error unless it asks for help or the version.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if args.len() == 4 {
        // `--` ends option parsing, so the three values are never read as flags
        args.insert(1, OsString::from("--"));
        return match Cli::try_parse_from(args) {
            Ok(cli) => Invocation::Run(cli),
            Err(_) => Invocation::Usage,
        };
    }

    match Cli::try_parse_from(args) {
        Ok(_) => Invocation::Usage,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Invocation::Info(e.to_string()),
            _ => Invocation::Usage,
        },
    }
}
