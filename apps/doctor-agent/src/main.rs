use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use doctor_agent::anthropic::{AnthropicConfig, MessagesClient};
use doctor_agent::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DoctorAgent, repl};
use nppes_async::{Client, NppesConfig};

#[derive(Parser, Debug)]
#[command(name = "doctor-agent")]
#[command(about = "Chat with an assistant that finds doctors in the NPPES NPI Registry", version)]
struct Cli {
    /// Model to use
    #[arg(long, env = "DOCTOR_AGENT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens per model response
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Maximum tool rounds per turn
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn run(cli: Cli, config: AnthropicConfig) -> anyhow::Result<()> {
    let nppes = Client::with_config(NppesConfig::new()).context("failed to build registry client")?;
    let registry = Arc::new(doctor_search::build_registry(Arc::new(nppes)));
    let client = MessagesClient::new(config).context("failed to build Anthropic client")?;

    let mut agent = DoctorAgent::new(client, registry)
        .with_model(cli.model)
        .with_max_tokens(cli.max_tokens)
        .with_max_iterations(cli.max_iterations);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    repl::run(&mut agent, stdin, &mut stdout, shutdown_signal()).await?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let Some(config) = AnthropicConfig::from_env() else {
        eprintln!(
            "{} ANTHROPIC_API_KEY environment variable not found.",
            "Error:".red().bold()
        );
        eprintln!("Please set it: export ANTHROPIC_API_KEY='sk-ant-...'");
        return ExitCode::FAILURE;
    };

    println!("Initializing Doctor Listing Agent...");

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
