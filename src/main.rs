use std::sync::Arc;
use std::time::Duration;

use crate::logging::app_config;
use anyhow::Context;
use clap::Parser;
use cli::Cli;
use promdash::config::{self, DashboardConfig};
use promdash::dashboard::Dashboard;
use promdash::prom::{HttpSource, MetricScraper};

mod cli;
mod interactive;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // initialize the logger
    log4rs::init_config(app_config(&cli.log_file, cli.loglevel)?)?;
    log::info!("Starting the application!");

    let endpoint = cli::endpoint_with_port(&cli.endpoint, cli.port);
    log::info!("Reading metrics from endpoint: {}", endpoint);
    log::info!("Scraping interval is: {}s", cli.scrape_interval);

    let dashboard_config = match &cli.config {
        Some(path) => config::load_from_file(path)
            .with_context(|| format!("loading dashboard {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let dashboard = Dashboard::from(&dashboard_config);
    log::info!("Dashboard has {} panels", dashboard.panels.len());

    let interval = u64::from(cli.scrape_interval);
    // a scrape never outlives the interval it belongs to
    let source = HttpSource::new(&endpoint, Duration::from_secs(interval))?;
    let metric_scraper = MetricScraper::new(Arc::new(source));

    if cli.once {
        metric_scraper.scrape_now().await;
        let snapshot = metric_scraper.snapshot();
        print!("{}", dashboard.render_text(&snapshot));
        if let Some(err) = snapshot.last_error {
            anyhow::bail!(err);
        }
        return Ok(());
    }

    // start dashboard
    log::info!("Showing the dashboard");
    interactive::show(endpoint, interval, metric_scraper, dashboard).await?;
    Ok(())
}
