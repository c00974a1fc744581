use anyhow::{Context, Result};
use category_harvester::cli::{parse_args, Invocation, USAGE};
use category_harvester::progress::ConsoleProgress;
use category_harvester::{BaserowClient, HarvesterExecutor};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = match parse_args(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Info(text) => {
            print!("{}", text);
            return Ok(());
        }
        Invocation::Usage => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(1);
        }
    };

    let client = BaserowClient::new(&config).context("Failed to build HTTP client")?;
    let executor = HarvesterExecutor::new(client, &config.output_path)
        .with_json_output(config.json_path.clone());

    println!("Fetching categories from Baserow...");
    executor
        .run(&mut ConsoleProgress)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    Ok(())
}
