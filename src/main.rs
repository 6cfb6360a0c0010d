// Tessera administrative shell

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{self, BufReader};
use tracing::info;

use tessera::common::logging::init_tracing;
use tessera::common::TesseraConfig;
use tessera::shell::OutputFormat;
use tessera::ControlPlane;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Tessera administrative shell")]
struct Cli {
    /// Configuration file (TOML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// User to open the session as
    #[clap(short, long, default_value = "admin")]
    user: String,

    /// Verbose mode (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write responses as JSON lines
    #[clap(long)]
    json: bool,

    /// Do not print a prompt; for piped scripts
    #[clap(long)]
    batch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TesseraConfig::from_file(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => TesseraConfig::default(),
    };
    config.apply_env_overrides();

    match cli.verbose {
        0 => {}
        1 => config.log_level = "debug".to_string(),
        _ => config.log_level = "trace".to_string(),
    }
    init_tracing(&config.log_level)?;

    let plane = ControlPlane::from_config(&config)?;
    let mut session = plane
        .open_session(&cli.user)
        .with_context(|| format!("cannot open a session for '{}'", cli.user))?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let session_loop = plane
        .session_loop()
        .with_prompt_shown(!cli.batch)
        .with_format(format);

    info!(version = tessera::version::VERSION, user = %cli.user, "Starting session");

    let mut stdout = io::stdout();
    session_loop
        .run(&mut session, BufReader::new(io::stdin()), &mut stdout)
        .await?;

    Ok(())
}
