//! Command line and file configuration for `doctor-mcp`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use doctor_mcp_server::OutputMode;
use serde::Deserialize;

use crate::http::TrustedHosts;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PATH: &str = "/mcp";
pub const DEFAULT_UI_TEMPLATE: &str = "ui/doctor_card.html";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Stdio,
    Http,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputArg {
    Text,
    Structured,
}

impl From<OutputArg> for OutputMode {
    fn from(value: OutputArg) -> Self {
        match value {
            OutputArg::Text => Self::Text,
            OutputArg::Structured => Self::Structured,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "doctor-mcp")]
#[command(about = "MCP server for searching the NPPES NPI Registry", version)]
pub struct Args {
    /// Transport to serve on: stdio | http (default: stdio)
    #[arg(long, value_enum)]
    pub transport: Option<Transport>,

    /// Bind address for the HTTP transport (default: 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Port for the HTTP transport (default: 8000)
    #[arg(long)]
    pub port: Option<u16>,

    /// Mount path for the HTTP transport (default: /mcp)
    #[arg(long)]
    pub path: Option<String>,

    /// Output mode: text | structured (default: structured)
    #[arg(long, value_enum)]
    pub output: Option<OutputArg>,

    /// HTML template served as ui://doctor_card
    #[arg(long, value_name = "PATH")]
    pub ui_template: Option<PathBuf>,

    /// Comma-separated Host header allowlist for HTTP, `*` for any
    #[arg(long, env = "MCP_TRUSTED_HOSTS", value_name = "HOSTS")]
    pub trusted_hosts: Option<String>,

    /// JSON config file path (supports { "transport": "http", "port": 8000, ... })
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub transport: Option<Transport>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
    pub output: Option<OutputArg>,
    pub ui_template: Option<PathBuf>,
    pub trusted_hosts: Option<Vec<String>>,
}

impl FileConfig {
    /// Read a config file. Unreadable or malformed files are logged and ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse config JSON; ignoring");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config file; ignoring");
                Self::default()
            }
        }
    }
}

/// Effective settings after merging flags over the config file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub output_mode: OutputMode,
    pub ui_template: PathBuf,
    pub trusted_hosts: TrustedHosts,
}

impl Settings {
    pub fn resolve(args: &Args, file: FileConfig) -> Self {
        let trusted_hosts = match (&args.trusted_hosts, file.trusted_hosts) {
            (Some(raw), _) => TrustedHosts::parse(raw),
            (None, Some(list)) => TrustedHosts::parse(&list.join(",")),
            (None, None) => TrustedHosts::Any,
        };

        Self {
            transport: args.transport.or(file.transport).unwrap_or_default(),
            host: args
                .host
                .clone()
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            path: normalize_path(
                args.path
                    .as_deref()
                    .or(file.path.as_deref())
                    .unwrap_or(DEFAULT_PATH),
            ),
            output_mode: args
                .output
                .or(file.output)
                .map(OutputMode::from)
                .unwrap_or_default(),
            ui_template: args
                .ui_template
                .clone()
                .or(file.ui_template)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UI_TEMPLATE)),
            trusted_hosts,
        }
    }
}

/// Mount paths always start with `/` and never end with one, except the root.
fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["doctor-mcp"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_when_nothing_is_given() {
        let mut a = args(&[]);
        a.trusted_hosts = None;
        let s = Settings::resolve(&a, FileConfig::default());
        assert_eq!(s.transport, Transport::Stdio);
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 8000);
        assert_eq!(s.path, "/mcp");
        assert_eq!(s.output_mode, OutputMode::Structured);
        assert_eq!(s.ui_template, PathBuf::from("ui/doctor_card.html"));
        assert!(matches!(s.trusted_hosts, TrustedHosts::Any));
    }

    #[test]
    fn flags_win_over_file() {
        let a = args(&["--transport", "http", "--port", "9000", "--output", "text"]);
        let file: FileConfig = serde_json::from_value(serde_json::json!({
            "transport": "stdio",
            "port": 7000,
            "host": "127.0.0.1",
            "output": "structured"
        }))
        .unwrap();

        let s = Settings::resolve(&a, file);
        assert_eq!(s.transport, Transport::Http);
        assert_eq!(s.port, 9000);
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.output_mode, OutputMode::Text);
    }

    #[test]
    fn file_trusted_hosts_apply_without_flag() {
        let mut a = args(&[]);
        a.trusted_hosts = None;
        let file: FileConfig = serde_json::from_value(serde_json::json!({
            "trusted_hosts": ["example.com", "localhost"]
        }))
        .unwrap();

        let s = Settings::resolve(&a, file);
        assert!(s.trusted_hosts.allows("localhost:8000"));
        assert!(!s.trusted_hosts.allows("evil.test"));
    }

    #[test]
    fn paths_are_normalized() {
        assert_eq!(normalize_path("mcp"), "/mcp");
        assert_eq!(normalize_path("/mcp/"), "/mcp");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(" api/mcp "), "/api/mcp");
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(args(&[]).log_level(), "warn");
        assert_eq!(args(&["-v"]).log_level(), "info");
        assert_eq!(args(&["-vv"]).log_level(), "debug");
        assert_eq!(args(&["-vvvv"]).log_level(), "trace");
    }

    #[test]
    fn missing_config_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let fc = FileConfig::load(&dir.path().join("absent.json"));
        assert!(fc.transport.is_none());
    }

    #[test]
    fn malformed_config_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let fc = FileConfig::load(&path);
        assert!(fc.port.is_none());
    }
}
