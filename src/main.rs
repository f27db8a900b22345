use dotenvy::dotenv;
use eyre::WrapErr;
use market_tagger::config;
use market_tagger::export::{OutputFormat, write_tags};
use market_tagger::subgraph::HttpTransport;
use market_tagger::tagging::TagBuilder;
use market_tagger::TagPipeline;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Logs go to stderr so stdout only carries the exported tags
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenv().ok();

    let api_key = std::env::var("THE_GRAPH_API_KEY")
        .map_err(|_| eyre::eyre!("THE_GRAPH_API_KEY must be set"))?;
    let chain_id = env_or("CHAIN_ID", "1");
    let networks_path = env_or("NETWORKS_JSON", "networks.json");
    let format: OutputFormat = env_or("OUTPUT_FORMAT", "json").parse()?;

    let networks = config::load_networks_file(&networks_path)
        .wrap_err_with(|| format!("loading {}", networks_path))?;

    info!("Fetching {} markets on network {}...", networks.project.name, chain_id);

    let pipeline = TagPipeline::new(
        networks.endpoints,
        TagBuilder::new(networks.project),
        Arc::new(HttpTransport::new()),
    );
    let report = pipeline
        .produce_tags(&chain_id, &api_key)
        .await
        .wrap_err_with(|| format!("producing tags for network {}", chain_id))?;

    write_tags(std::io::stdout().lock(), format, &report.tags)?;

    info!(
        "Done: {} tags written, {} rejected fields",
        report.tags.len(),
        report.rejections.len()
    );
    Ok(())
}
