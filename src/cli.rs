use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use clap::ValueHint;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Prometheus endpoint to scrape
    ///
    /// The endpoint serving the plaintext exposition format.
    #[arg(short, long, env="PROM_ENDPOINT", value_hint=ValueHint::Url, default_value="http://localhost:8080/metrics")]
    pub endpoint: String,

    /// Prometheus endpoint's port number
    ///
    /// Replaces the port of the endpoint. Example: http://localhost:<PORT>/metrics
    #[arg(short, long, env="PROM_PORT", value_hint=ValueHint::Other)]
    pub port: Option<u16>,

    /// Scrape interval of the prometheus endpoint
    ///
    /// The time in seconds between 2 consecutive scrapes.
    #[arg(short='i', long, env="PROM_SCRAPE_INTERVAL", value_hint=ValueHint::Other, default_value="30", value_parser=clap::value_parser!(u16).range(1..))]
    pub scrape_interval: u16,

    /// Dashboard definition
    ///
    /// YAML file with the panels and the display name table. The built-in
    /// employee dashboard is used when omitted.
    #[arg(short, long, env="PROMDASH_CONFIG", value_hint=ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    ///
    /// Set the logging level to use when logging to the log file
    #[arg(short, long, env="LOG_LEVEL", value_hint=ValueHint::Other, default_value="INFO")]
    pub loglevel: log::LevelFilter,

    /// File the log is written to
    #[arg(long, env="PROMDASH_LOG_FILE", value_hint=ValueHint::FilePath, default_value="promdash.log")]
    pub log_file: String,

    /// Scrape once, print the panels to stdout and exit
    #[arg(long)]
    pub once: bool,
}

fn port_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r":(\d{2,5})/").expect("valid port regex"))
}

/// Applies the `--port` override to the endpoint url.
pub fn endpoint_with_port(endpoint: &str, port: Option<u16>) -> String {
    let Some(port) = port else {
        return endpoint.to_string();
    };
    port_regex()
        .replace(endpoint, format!(":{port}/", port = port))
        .to_string()
}
