//! MCP server exposing the NPPES doctor search over stdio or streamable HTTP.

mod config;
mod http;

use std::sync::Arc;

use clap::Parser;
use doctor_mcp_server::{DoctorServer, ServiceExt, UiResource, stdio};
use nppes_async::{Client, NppesConfig};

use crate::config::{Args, FileConfig, Settings, Transport};

/// Resolve on Ctrl-C. Errors installing the handler park the future forever.
pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the stdio transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    // Install the rustls CryptoProvider before any HTTP clients are created.
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let file = args
        .config
        .as_deref()
        .map(FileConfig::load)
        .unwrap_or_default();
    let settings = Settings::resolve(&args, file);

    let client = Client::with_config(NppesConfig::new())?;
    let registry = doctor_search::build_registry(Arc::new(client));

    if args.list_tools {
        let names = registry.list_names();
        eprintln!("Available tools ({}):", names.len());
        for n in names {
            eprintln!("  - {n}");
        }
        return Ok(());
    }

    let server = DoctorServer::new(
        Arc::new(registry),
        UiResource::doctor_card(settings.ui_template.clone()),
    )
    .with_info("doctor-listing", env!("CARGO_PKG_VERSION"))
    .with_output_mode(settings.output_mode);

    eprintln!(
        "Starting doctor-mcp ({:?} transport) with output mode: {:?}",
        settings.transport, settings.output_mode
    );

    match settings.transport {
        Transport::Stdio => {
            let service = server.serve(stdio()).await?;
            tokio::select! {
                res = service.waiting() => {
                    res?;
                }
                () = shutdown_signal() => {}
            }
        }
        Transport::Http => http::serve(server, &settings).await?,
    }

    Ok(())
}
